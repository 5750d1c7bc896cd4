use standup_core::Category;
use standup_notify::{SlackField, SlackMessage};
use standup_store::{ActivityStore, StoreError};

use crate::aggregate::aggregate;

/// Fallback text of the composed digest.
pub const FALLBACK: &str = "Summary Data GitHubAction";

/// Fixed sign-off appended as the digest's last field.
pub const CLOSING: &str = "今日も1日おつかれさまでした :whale: ";

/// A composed digest plus the categories whose aggregation failed.
///
/// Failures degrade the report instead of aborting it: blocks for the
/// surviving categories and the closing field are always present.
#[derive(Debug)]
pub struct DigestOutcome {
    pub report: SlackMessage,
    pub failures: Vec<(Category, StoreError)>,
}

impl DigestOutcome {
    /// Table names of the categories that failed to aggregate.
    pub fn failed_categories(&self) -> Vec<&'static str> {
        self.failures.iter().map(|(category, _)| category.table()).collect()
    }
}

/// Compose the digest for one date: one block per tracked category, in
/// `Category::ALL` order, plus the fixed closing field.
///
/// A failing category is collected and skipped; the remaining
/// categories still aggregate. Delivery is the caller's job — the
/// composer never posts and never retries.
pub fn compose(store: &ActivityStore, date: &str) -> DigestOutcome {
    let mut fields = Vec::with_capacity(Category::ALL.len() + 1);
    let mut failures = Vec::new();

    for category in Category::ALL {
        match aggregate(store, category, date) {
            Ok(field) => fields.push(field),
            Err(err) => {
                tracing::warn!(
                    category = category.table(),
                    error = %err,
                    "aggregation failed; digest will be partial"
                );
                failures.push((category, err));
            }
        }
    }

    fields.push(SlackField {
        title: CLOSING.to_string(),
        value: String::new(),
        short: false,
    });

    DigestOutcome {
        report: SlackMessage {
            fallback: FALLBACK.to_string(),
            fields,
            ..SlackMessage::default()
        },
        failures,
    }
}
