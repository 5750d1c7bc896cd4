use serde::{Deserialize, Serialize};

/// One tracked kind of GitHub lifecycle activity.
///
/// The set is closed: every variant owns one store table and one digest
/// block. Adding a category is one new variant — `ALL`, `table`, and
/// `summary_title` are matched exhaustively, so the compiler points at
/// every site the new entry must reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    IssueOpened,
    IssueCommented,
    PullRequestOpened,
    PullRequestReviewCommented,
}

impl Category {
    /// Every tracked category, in digest order.
    pub const ALL: [Category; 4] = [
        Category::IssueOpened,
        Category::IssueCommented,
        Category::PullRequestOpened,
        Category::PullRequestReviewCommented,
    ];

    /// Name of the store table holding this category's records.
    pub fn table(self) -> &'static str {
        match self {
            Category::IssueOpened => "issue_open",
            Category::IssueCommented => "issue_comment",
            Category::PullRequestOpened => "pull_request_open",
            Category::PullRequestReviewCommented => "pull_request_review_comment",
        }
    }

    /// Title of this category's block in the rendered digest.
    pub fn summary_title(self) -> &'static str {
        match self {
            Category::IssueOpened => "Issue Open Summary",
            Category::IssueCommented => "Issue Comment Summary",
            Category::PullRequestOpened => "PullRequest Open Summary",
            Category::PullRequestReviewCommented => "PullRequest ReviewComment Summary",
        }
    }
}
