//! GitHub pull-request comment submission.
//!
//! This module wraps Octocrab to validate the comment configuration, build
//! an authenticated client (optionally against a GitHub Enterprise base
//! URL), and post the quality-gate report as a single issue comment. Errors
//! are mapped into user-friendly variants so that callers can surface
//! precise failures without exposing Octocrab internals.

pub mod gateway;
pub mod locator;
pub mod models;
pub mod submit;

pub use gateway::{CommentGateway, OctocrabCommentGateway};
pub use locator::{
    CommentTarget, PersonalAccessToken, PullRequestNumber, RepositoryName, RepositoryOwner,
    RepositorySlug,
};
pub use models::PostedComment;
pub use submit::{CommentConfig, PlannedComment, ReportSubmission, plan_submission};

#[cfg(test)]
pub use gateway::MockCommentGateway;
