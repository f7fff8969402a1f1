//! High-level quality-gate check facade used by the CLI.

use super::client::{ProjectStatusQuery, QualityGateSource};
use super::report::build_report;

/// Runs the quality-gate fetch and renders the outcome as a report.
pub struct QualityGateCheck<'client, Source>
where
    Source: QualityGateSource,
{
    client: &'client Source,
}

impl<'client, Source> QualityGateCheck<'client, Source>
where
    Source: QualityGateSource,
{
    /// Create a new check facade using the provided source.
    #[must_use]
    pub const fn new(client: &'client Source) -> Self {
        Self { client }
    }

    /// Fetch the project status and render the report string.
    ///
    /// This never fails: fetch errors are classified into the report text.
    pub async fn report(&self, query: &ProjectStatusQuery) -> String {
        build_report(self.client.project_status(query).await)
    }
}
