//! Sonargate library crate for quality-gate pull-request reporting.
//!
//! The library fetches a project's quality-gate verdict from a
//! SonarQube-compatible service, renders the verdict and its conditions into
//! a human-readable report, and posts that report as a GitHub pull-request
//! comment. Failures in the quality-gate fetch are folded into the report
//! text rather than surfaced as process failures.

pub mod config;
pub mod error;
pub mod github;
pub mod sonar;
pub mod telemetry;

pub use config::SonargateConfig;
pub use error::ReportError;
pub use github::{
    CommentConfig, CommentGateway, CommentTarget, OctocrabCommentGateway, PersonalAccessToken,
    PlannedComment, PostedComment, PullRequestNumber, ReportSubmission, RepositorySlug,
    plan_submission,
};
pub use sonar::{
    Condition, GateStatus, HttpQualityGateSource, ProjectStatus, ProjectStatusQuery,
    QualityGateCheck, QualityGateSource, SonarToken, build_report,
};
