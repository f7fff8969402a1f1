//! Data models for the quality-gate project status.

use serde::Deserialize;

/// Quality-gate verdict reported by the quality service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateStatus {
    /// The gate passed.
    Ok,
    /// The gate failed.
    Error,
    /// Any other status value, preserved verbatim.
    Unknown(String),
}

impl GateStatus {
    /// Maps the service's raw status string onto a verdict.
    ///
    /// Matching is exact: the service reports upper-case values, and anything
    /// else is an unrecognised configuration.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "OK" => Self::Ok,
            "ERROR" => Self::Error,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// The status string as the service spells it.
    #[must_use]
    pub fn as_api_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::Error => "ERROR",
            Self::Unknown(raw) => raw.as_str(),
        }
    }
}

/// One metric evaluated against its threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Per-condition status (`OK`, `ERROR`, …).
    pub status: String,
    /// Metric key (e.g. `coverage`).
    pub metric_key: String,
    /// Comparator applied to the threshold (e.g. `GT`).
    pub comparator: String,
    /// Threshold at which the condition fails.
    pub error_threshold: String,
    /// Measured value.
    pub actual_value: String,
}

/// Parsed quality-gate result for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStatus {
    /// Overall gate verdict.
    pub status: GateStatus,
    /// All conditions, in the order the service returned them.
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiProjectStatusEnvelope {
    #[serde(rename = "projectStatus")]
    pub(super) project_status: ApiProjectStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiProjectStatus {
    pub(super) status: String,
    pub(super) conditions: Vec<ApiCondition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiCondition {
    pub(super) status: String,
    pub(super) metric_key: String,
    pub(super) comparator: String,
    pub(super) error_threshold: String,
    pub(super) actual_value: String,
}

impl From<ApiProjectStatus> for ProjectStatus {
    fn from(value: ApiProjectStatus) -> Self {
        Self {
            status: GateStatus::from_raw(&value.status),
            conditions: value.conditions.into_iter().map(ApiCondition::into).collect(),
        }
    }
}

impl From<ApiCondition> for Condition {
    fn from(value: ApiCondition) -> Self {
        Self {
            status: value.status,
            metric_key: value.metric_key,
            comparator: value.comparator,
            error_threshold: value.error_threshold,
            actual_value: value.actual_value,
        }
    }
}
