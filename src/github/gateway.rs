//! Gateways for posting pull-request comments through Octocrab.
//!
//! The trait-based design enables mocking in tests while the Octocrab
//! implementation handles real HTTP requests.

use async_trait::async_trait;
use http::{StatusCode, Uri};
use octocrab::Octocrab;

use crate::error::ReportError;

use super::locator::{CommentTarget, PersonalAccessToken};
use super::models::{ApiPostedComment, PostedComment};

/// Builds an Octocrab client for the given token and optional API base URL.
///
/// When no base URL is supplied the client targets the public service.
///
/// # Errors
///
/// Returns `ReportError::InvalidUrl` when the base URI cannot be parsed or
/// `ReportError::Api` when Octocrab fails to construct a client.
fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: Option<&str>,
) -> Result<Octocrab, ReportError> {
    let mut builder = Octocrab::builder().personal_token(token.as_ref());

    if let Some(base) = api_base {
        let base_uri: Uri = base
            .parse::<Uri>()
            .map_err(|error| ReportError::InvalidUrl(error.to_string()))?;
        builder = builder.base_uri(base_uri).map_err(|error| ReportError::Api {
            message: format!("build client failed: {error}"),
        })?;
    }

    builder
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}

/// Gateway that can create pull-request comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentGateway: Send + Sync {
    /// Create one issue comment on the target pull request.
    async fn create_comment(
        &self,
        target: &CommentTarget,
        body: &str,
    ) -> Result<PostedComment, ReportError>;
}

/// Octocrab-backed comment gateway.
pub struct OctocrabCommentGateway {
    client: Octocrab,
}

impl OctocrabCommentGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds a gateway for the given token and optional API base URL.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidUrl` when the base URI cannot be parsed
    /// or `ReportError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        api_base: Option<&str>,
    ) -> Result<Self, ReportError> {
        let octocrab = build_octocrab_client(token, api_base)?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl CommentGateway for OctocrabCommentGateway {
    async fn create_comment(
        &self,
        target: &CommentTarget,
        body: &str,
    ) -> Result<PostedComment, ReportError> {
        let payload = serde_json::json!({ "body": body });

        let comment: ApiPostedComment = self
            .client
            .post(target.comments_path(), Some(&payload))
            .await
            .map_err(|error| map_octocrab_error("create comment", &error))?;

        Ok(comment.into())
    }
}

// --- Error mapping helpers ---

/// Checks if a GitHub error status indicates an authentication failure.
const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> ReportError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return if is_auth_failure(source.status_code) {
            ReportError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        } else {
            ReportError::Api {
                message: format!(
                    "{operation} failed with status {status}: {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        };
    }

    if is_network_error(error) {
        return ReportError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    ReportError::Api {
        message: format!("{operation} failed: {error}"),
    }
}
