//! Quality-gate fetch, classification, and report rendering.
//!
//! This module wraps the quality service's `project_status` endpoint behind a
//! trait-based source, maps responses into domain models, and renders every
//! outcome (pass, fail, unknown status, or any fetch failure) into the report
//! string that is posted to the pull request. Nothing in this module lets an
//! error escape past [`build_report`].

pub mod check;
pub mod client;
pub mod models;
pub mod report;

pub use check::QualityGateCheck;
pub use client::{HttpQualityGateSource, ProjectStatusQuery, QualityGateSource, SonarToken};
pub use models::{Condition, GateStatus, ProjectStatus};
pub use report::{build_report, render_conditions};

#[cfg(test)]
pub use client::MockQualityGateSource;
