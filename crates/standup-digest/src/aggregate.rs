use std::collections::HashMap;

use standup_core::Category;
use standup_notify::SlackField;
use standup_store::{ActivityStore, StoreError};

/// Marker glyph appended to a user's tally once per record.
pub const TALLY_MARK: &str = "■";

/// Aggregate one category for one date into a rendered digest block.
///
/// Records are grouped by user; each record appends one marker glyph to
/// that user's tally, so three records render as `user: ■■■`. Line
/// order follows the map's iteration order and is not stable between
/// runs — consumers must not rely on it.
pub fn aggregate(
    store: &ActivityStore,
    category: Category,
    date: &str,
) -> Result<SlackField, StoreError> {
    let records = store.query_by_date(category, date)?;

    let mut tally: HashMap<String, String> = HashMap::new();
    for record in &records {
        tally.entry(record.user.clone()).or_default().push_str(TALLY_MARK);
    }

    let mut value = String::new();
    for (user, marks) in &tally {
        value.push_str(user);
        value.push_str(": ");
        value.push_str(marks);
        value.push('\n');
    }

    Ok(SlackField {
        title: category.summary_title().to_string(),
        value,
        short: false,
    })
}
