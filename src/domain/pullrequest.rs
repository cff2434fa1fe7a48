//! Pull request summary

use serde::Serialize;

/// One pull request as reported by a source platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestSummary {
    /// Creation date as reported by the platform
    pub date: String,
    pub number: u64,
    pub url: String,
    /// e.g. "open", "MERGED"
    pub state: String,
}
