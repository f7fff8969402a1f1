//! Report submission planning and execution.
//!
//! The comment step is deliberately permissive about missing configuration:
//! pipelines without commenting capability skip the network call and still
//! exit cleanly. A pull request number that is present but not numeric is
//! the one exception, and fails the run.

use crate::error::ReportError;

use super::gateway::CommentGateway;
use super::locator::{CommentTarget, PersonalAccessToken, PullRequestNumber, RepositorySlug};
use super::models::PostedComment;

/// Raw comment-step configuration as resolved from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentConfig<'a> {
    /// Source-control token, when configured.
    pub token: Option<&'a str>,
    /// Repository identifier in `owner/repo` form, when configured.
    pub repository: Option<&'a str>,
    /// Raw pull request number, when configured.
    pub pull_request: Option<&'a str>,
}

impl CommentConfig<'_> {
    fn missing_field(&self) -> Option<&'static str> {
        let blank = |value: Option<&str>| value.is_none_or(|inner| inner.trim().is_empty());

        if blank(self.token) {
            Some("token")
        } else if blank(self.repository) {
            Some("repository")
        } else if blank(self.pull_request) {
            Some("pull request number")
        } else {
            None
        }
    }
}

/// Validated comment-step inputs, ready for a gateway.
#[derive(Debug, Clone)]
pub struct PlannedComment {
    /// Token to authenticate the gateway with.
    pub token: PersonalAccessToken,
    /// Destination repository and pull request.
    pub target: CommentTarget,
}

/// Validates the comment configuration into a submission plan.
///
/// Returns `Ok(None)` when the token, repository, or pull request number is
/// missing or empty; the caller logs the skip and the process still exits
/// cleanly.
///
/// # Errors
///
/// Returns [`ReportError::InvalidPullRequestNumber`] when a pull request
/// number is present but not a positive integer, and
/// [`ReportError::InvalidRepository`] when the repository identifier is not
/// in `owner/repo` form. Both are fatal.
pub fn plan_submission(config: &CommentConfig<'_>) -> Result<Option<PlannedComment>, ReportError> {
    if let Some(field) = config.missing_field() {
        tracing::debug!(field, "comment configuration incomplete; skipping comment");
        return Ok(None);
    }

    let raw_number = config.pull_request.unwrap_or_default();
    let number = PullRequestNumber::parse(raw_number)?;
    let slug = RepositorySlug::parse(config.repository.unwrap_or_default())?;
    let token = PersonalAccessToken::new(config.token.unwrap_or_default())?;

    Ok(Some(PlannedComment {
        token,
        target: CommentTarget::new(slug, number),
    }))
}

/// Posts a report through a comment gateway.
pub struct ReportSubmission<'client, Gateway>
where
    Gateway: CommentGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> ReportSubmission<'client, Gateway>
where
    Gateway: CommentGateway,
{
    /// Create a new submission facade using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Post the report as exactly one comment on the target pull request.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the underlying gateway, including GitHub
    /// authentication errors or network problems.
    pub async fn submit(
        &self,
        target: &CommentTarget,
        report: &str,
    ) -> Result<PostedComment, ReportError> {
        tracing::debug!(number = target.number().get(), "commenting on pull request");
        self.client.create_comment(target, report).await
    }
}
