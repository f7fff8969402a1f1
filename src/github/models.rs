//! Data models for posted pull-request comments.

use serde::Deserialize;

/// Comment created on the pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedComment {
    /// Comment identifier assigned by GitHub.
    pub id: u64,
    /// HTML URL for displaying to a user.
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPostedComment {
    pub(super) id: u64,
    pub(super) html_url: Option<String>,
}

impl From<ApiPostedComment> for PostedComment {
    fn from(value: ApiPostedComment) -> Self {
        Self {
            id: value.id,
            html_url: value.html_url,
        }
    }
}
