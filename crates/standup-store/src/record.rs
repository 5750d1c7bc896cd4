use standup_core::{Activity, Zone};

use crate::{ActivityRecord, ActivityStore, StoreError};

/// Build a dated record for a classified activity and append it.
/// The date comes from the recording instant in the reference zone,
/// never from the payload.
pub fn record(store: &ActivityStore, zone: &Zone, activity: &Activity) -> Result<(), StoreError> {
    let record = ActivityRecord {
        url: activity.origin_url.clone(),
        user: activity.actor.clone(),
        date: zone.today(),
    };
    store.append(activity.category, &record)
}

/// Record an activity, logging and discarding any store failure.
///
/// The webhook path must keep answering the event source even when the
/// store is down; this is the only place a store error is swallowed.
pub fn record_or_log(store: &ActivityStore, zone: &Zone, activity: &Activity) {
    if let Err(err) = record(store, zone, activity) {
        tracing::warn!(
            category = activity.category.table(),
            actor = %activity.actor,
            error = %err,
            "failed to record activity; dropping"
        );
    }
}
