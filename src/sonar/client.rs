//! HTTP source for the quality service's project-status endpoint.
//!
//! The trait-based design enables mocking in tests while the reqwest-backed
//! implementation handles real HTTP requests. The service token travels as
//! the basic-auth username with an empty password and never appears in
//! diagnostics.

use std::fmt;

use async_trait::async_trait;

use crate::error::ReportError;

use super::models::{ApiProjectStatusEnvelope, ProjectStatus};

/// Quality service token wrapper enforcing presence.
///
/// The `Debug` implementation redacts the value so the token cannot leak
/// through logging.
#[derive(Clone, PartialEq, Eq)]
pub struct SonarToken(String);

impl SonarToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingToken`] when the supplied string is
    /// blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ReportError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReportError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SonarToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("SonarToken([REDACTED])")
    }
}

/// Query parameters for one project-status request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStatusQuery {
    project_key: String,
    pull_request: Option<u64>,
}

impl ProjectStatusQuery {
    /// Creates a query for the given project key.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] when the key is blank.
    pub fn new(project_key: impl AsRef<str>) -> Result<Self, ReportError> {
        let trimmed = project_key.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReportError::Configuration {
                message: "project key must not be empty".to_owned(),
            });
        }
        Ok(Self {
            project_key: trimmed.to_owned(),
            pull_request: None,
        })
    }

    /// Attaches a pull request number using lenient coercion.
    ///
    /// Absent, blank, and non-numeric values are treated as "not provided"
    /// and the parameter is simply omitted from the query.
    #[must_use]
    pub fn with_pull_request(mut self, raw: Option<&str>) -> Self {
        self.pull_request = raw.map(str::trim).and_then(|value| value.parse::<u64>().ok());
        self
    }

    /// Project key under query.
    #[must_use]
    pub fn project_key(&self) -> &str {
        self.project_key.as_str()
    }

    /// Pull request number, when a usable one was supplied.
    #[must_use]
    pub const fn pull_request(&self) -> Option<u64> {
        self.pull_request
    }
}

/// Source that can load a project's quality-gate status.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QualityGateSource: Send + Sync {
    /// Fetch the project status for the given query.
    async fn project_status(&self, query: &ProjectStatusQuery)
    -> Result<ProjectStatus, ReportError>;
}

/// Reqwest-backed quality-gate source.
pub struct HttpQualityGateSource {
    client: reqwest::Client,
    base_url: String,
    token: SonarToken,
}

impl HttpQualityGateSource {
    /// Creates a source for the given base URL and token.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidUrl`] when the base URL cannot be
    /// parsed, or [`ReportError::Configuration`] when the HTTP client cannot
    /// be constructed.
    pub fn new(base_url: &str, token: SonarToken) -> Result<Self, ReportError> {
        url::Url::parse(base_url).map_err(|error| ReportError::InvalidUrl(error.to_string()))?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|error| ReportError::Configuration {
                message: format!("failed to configure quality service HTTP client: {error}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token,
        })
    }
}

#[async_trait]
impl QualityGateSource for HttpQualityGateSource {
    async fn project_status(
        &self,
        query: &ProjectStatusQuery,
    ) -> Result<ProjectStatus, ReportError> {
        let endpoint = format!("{}/api/qualitygates/project_status", self.base_url);

        let mut request = self
            .client
            .get(&endpoint)
            .basic_auth(self.token.value(), Some(""))
            .query(&[("projectKey", query.project_key())]);
        if let Some(number) = query.pull_request() {
            request = request.query(&[("pullRequest", number.to_string())]);
        }

        tracing::debug!(url = %endpoint, project_key = query.project_key(), "requesting quality gate status");

        let response = request
            .send()
            .await
            .map_err(|error| ReportError::GateTransport {
                message: error.to_string(),
            })?;

        let status = response.status();
        tracing::debug!(
            status = status.as_u16(),
            headers = ?response.headers(),
            "quality gate response received"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%body, "quality gate error response body");
            return Err(ReportError::GateRequest {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|error| ReportError::GateTransport {
                message: format!("reading response body failed: {error}"),
            })?;
        tracing::debug!(%body, "quality gate response body");

        let envelope: ApiProjectStatusEnvelope =
            serde_json::from_str(&body).map_err(|error| ReportError::GateResponseShape {
                message: error.to_string(),
            })?;

        Ok(envelope.project_status.into())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{HttpQualityGateSource, ProjectStatusQuery, QualityGateSource, SonarToken};
    use crate::error::ReportError;
    use crate::sonar::models::GateStatus;

    fn passing_body() -> serde_json::Value {
        serde_json::json!({
            "projectStatus": {
                "status": "OK",
                "conditions": [
                    {
                        "status": "OK",
                        "metricKey": "coverage",
                        "comparator": "GT",
                        "errorThreshold": "80",
                        "actualValue": "85"
                    }
                ]
            }
        })
    }

    fn source_for(server: &MockServer) -> HttpQualityGateSource {
        let token = SonarToken::new("my-token").expect("token should be valid");
        HttpQualityGateSource::new(&server.uri(), token).expect("should create source")
    }

    #[tokio::test]
    async fn fetches_project_status_with_basic_auth_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/qualitygates/project_status"))
            .and(query_param("projectKey", "my_project"))
            // base64("my-token:") - token as username, empty password
            .and(header("authorization", "Basic bXktdG9rZW46"))
            .respond_with(ResponseTemplate::new(200).set_body_json(passing_body()))
            .mount(&server)
            .await;

        let query = ProjectStatusQuery::new("my_project").expect("query should build");
        let project_status = source_for(&server)
            .project_status(&query)
            .await
            .expect("request should succeed");

        assert_eq!(project_status.status, GateStatus::Ok, "status mismatch");
        assert_eq!(project_status.conditions.len(), 1, "condition count");
        let condition = project_status
            .conditions
            .first()
            .expect("should have a condition");
        assert_eq!(condition.metric_key, "coverage");
        assert_eq!(condition.actual_value, "85");
    }

    #[tokio::test]
    async fn includes_pull_request_parameter_when_numeric() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/qualitygates/project_status"))
            .and(query_param("projectKey", "my_project"))
            .and(query_param("pullRequest", "42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(passing_body()))
            .mount(&server)
            .await;

        let query = ProjectStatusQuery::new("my_project")
            .expect("query should build")
            .with_pull_request(Some("42"));
        let result = source_for(&server).project_status(&query).await;

        assert!(result.is_ok(), "expected success, got {result:?}");
    }

    #[rstest]
    #[case::absent(None)]
    #[case::empty(Some(""))]
    #[case::blank(Some("   "))]
    #[case::non_numeric(Some("not-a-number"))]
    #[tokio::test]
    async fn omits_pull_request_parameter_for_unusable_values(#[case] raw: Option<&str>) {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/qualitygates/project_status"))
            .and(query_param("projectKey", "my_project"))
            .and(query_param_is_missing("pullRequest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(passing_body()))
            .mount(&server)
            .await;

        let query = ProjectStatusQuery::new("my_project")
            .expect("query should build")
            .with_pull_request(raw);
        let result = source_for(&server).project_status(&query).await;

        assert!(result.is_ok(), "expected success, got {result:?}");
    }

    #[tokio::test]
    async fn maps_unauthorised_response_to_request_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/qualitygates/project_status"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let query = ProjectStatusQuery::new("my_project").expect("query should build");
        let error = source_for(&server)
            .project_status(&query)
            .await
            .expect_err("request should fail");

        match error {
            ReportError::GateRequest { status, body } => {
                assert_eq!(status, 401, "status mismatch");
                assert_eq!(body, "Unauthorized", "body mismatch");
            }
            other => panic!("expected GateRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn maps_missing_project_status_to_shape_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/qualitygates/project_status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"error": "something happened"})),
            )
            .mount(&server)
            .await;

        let query = ProjectStatusQuery::new("my_project").expect("query should build");
        let error = source_for(&server)
            .project_status(&query)
            .await
            .expect_err("request should fail");

        match error {
            ReportError::GateResponseShape { message } => {
                assert!(
                    message.contains("projectStatus"),
                    "detail should name the missing field, got: {message}"
                );
            }
            other => panic!("expected GateResponseShape, got {other:?}"),
        }
    }

    #[rstest]
    fn rejects_blank_project_key() {
        let result = ProjectStatusQuery::new("  ");
        assert!(
            matches!(result, Err(ReportError::Configuration { .. })),
            "expected Configuration error, got {result:?}"
        );
    }

    #[rstest]
    fn rejects_blank_token() {
        let result = SonarToken::new("");
        assert!(
            matches!(result, Err(ReportError::MissingToken)),
            "expected MissingToken, got {result:?}"
        );
    }

    #[rstest]
    fn token_debug_output_is_redacted() {
        let token = SonarToken::new("squ_secret").expect("token should be valid");
        let rendered = format!("{token:?}");
        assert!(
            !rendered.contains("squ_secret"),
            "token value leaked into debug output: {rendered}"
        );
        assert!(rendered.contains("REDACTED"), "expected redaction marker");
    }
}
