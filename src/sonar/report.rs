//! Condition rendering and quality-gate report classification.
//!
//! Everything here is a pure string transform. The fixed report wording is
//! pinned by the consumers that parse pull-request comments downstream, so
//! changes to these strings are breaking.

use crate::error::ReportError;

use super::models::{Condition, GateStatus, ProjectStatus};

const PASS_ICON: &str = "✅";
const FAIL_ICON: &str = "💣";

/// Renders the conditions whose status equals the target, in input order.
///
/// Each matching condition becomes one fixed-format multi-line block; blocks
/// are concatenated without separators. No matches yields the empty string.
#[must_use]
pub fn render_conditions(conditions: &[Condition], target: &GateStatus) -> String {
    let icon = if matches!(target, GateStatus::Ok) {
        PASS_ICON
    } else {
        FAIL_ICON
    };

    conditions
        .iter()
        .filter(|condition| condition.status == target.as_api_str())
        .map(|condition| {
            format!(
                "\n{icon}Status: {}, \nMetricKey: {}\nComparator: {}\nErrorThreshold: {}\nActualValue: {}\n",
                condition.status,
                condition.metric_key,
                condition.comparator,
                condition.error_threshold,
                condition.actual_value,
            )
        })
        .collect()
}

/// Converts a fetch outcome into the final report string.
///
/// Successful fetches render the verdict with its matching conditions; an
/// unrecognised status value and every fetch failure map to fixed marker
/// strings. No error escapes this function.
#[must_use]
pub fn build_report(outcome: Result<ProjectStatus, ReportError>) -> String {
    match outcome {
        Ok(project_status) => match &project_status.status {
            GateStatus::Ok => format!(
                "👋 Hey, the Quality Gate has PASSED.{}",
                render_conditions(&project_status.conditions, &GateStatus::Ok)
            ),
            GateStatus::Error => format!(
                "👋 Hey, the Quality Gate has FAILED.{}",
                render_conditions(&project_status.conditions, &GateStatus::Error)
            ),
            GateStatus::Unknown(_) => "quality_check=ERROR CONFIGURATION".to_owned(),
        },
        Err(error) => render_failure(&error),
    }
}

/// Maps a fetch failure onto its report marker string.
fn render_failure(error: &ReportError) -> String {
    match error {
        ReportError::GateRequest { .. } | ReportError::GateTransport { .. } => {
            format!("quality_check=API ERROR: REQUEST ERROR: {error}")
        }
        ReportError::GateResponseShape { .. } => {
            format!("quality_check=API ERROR: PARSE ERROR: {error}")
        }
        other => format!("quality_check=API ERROR: {other}"),
    }
}
