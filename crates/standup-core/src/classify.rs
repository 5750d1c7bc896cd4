use crate::category::Category;
use crate::webhook::WebHook;

/// A classified inbound event: what to record, where it happened, and
/// who acted.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub category: Category,
    pub origin_url: String,
    pub actor: String,
}

/// Outcome of classifying an inbound event.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// A tracked action worth recording.
    Activity(Activity),
    /// A recognized action whose recording is deliberately disabled
    /// (issue assignment).
    Reserved,
    /// Not a tracked event/action pair. A no-op, not an error.
    Unrecognized,
}

/// Map an inbound event name + payload to a recordable activity.
///
/// Dispatch is two-level: the event name picks a family (`issues` and
/// `issue_comment` route together, as do `pull_request` and
/// `pull_request_review_comment`), then the payload action picks the
/// category. The actor is always the event *sender* — the assignee is
/// who an issue landed on, not who acted.
pub fn classify(event_name: &str, webhook: &WebHook) -> Classification {
    let category = match (event_name, webhook.action.as_str()) {
        ("issues" | "issue_comment", "opened") => Category::IssueOpened,
        ("issues" | "issue_comment", "created") => Category::IssueCommented,
        ("issues" | "issue_comment", "assigned") => return Classification::Reserved,
        ("pull_request" | "pull_request_review_comment", "opened") => Category::PullRequestOpened,
        ("pull_request" | "pull_request_review_comment", "created") => {
            Category::PullRequestReviewCommented
        }
        _ => return Classification::Unrecognized,
    };
    Classification::Activity(Activity {
        category,
        origin_url: webhook.issue.url.clone(),
        actor: webhook.sender.login.clone(),
    })
}
