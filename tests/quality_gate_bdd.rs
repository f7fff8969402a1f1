//! Behavioural tests for quality-gate report building.

use std::cell::RefCell;
use std::rc::Rc;

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::json;
use sonargate::{
    HttpQualityGateSource, ProjectStatusQuery, QualityGateCheck, ReportError, SonarToken,
};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Shared runtime wrapper that can be stored in rstest-bdd Slot.
#[derive(Clone)]
struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

#[derive(ScenarioState, Default)]
struct ReportState {
    runtime: Slot<SharedRuntime>,
    server: Slot<MockServer>,
    report: Slot<String>,
}

#[fixture]
fn report_state() -> ReportState {
    ReportState::default()
}

/// Ensures the runtime and server are initialised in `ReportState`.
fn ensure_runtime_and_server(report_state: &ReportState) -> Result<SharedRuntime, ReportError> {
    if report_state.runtime.with_ref(|_| ()).is_none() {
        let runtime = Runtime::new().map_err(|error| ReportError::Io {
            message: format!("failed to create Tokio runtime: {error}"),
        })?;
        report_state.runtime.set(SharedRuntime::new(runtime));
    }

    let shared_runtime = report_state.runtime.get().ok_or_else(|| ReportError::Api {
        message: "runtime not initialised".to_owned(),
    })?;

    if report_state.server.with_ref(|_| ()).is_none() {
        report_state
            .server
            .set(shared_runtime.block_on(MockServer::start()));
    }

    Ok(shared_runtime)
}

fn mount_status_response(
    report_state: &ReportState,
    response: ResponseTemplate,
) -> Result<(), ReportError> {
    let runtime = ensure_runtime_and_server(report_state)?;

    let mock = Mock::given(method("GET"))
        .and(path("/api/qualitygates/project_status"))
        .and(query_param("projectKey", "my_project"))
        .respond_with(response);

    report_state
        .server
        .with_ref(|server| {
            runtime.block_on(mock.mount(server));
        })
        .ok_or_else(|| ReportError::Api {
            message: "mock server not initialised".to_owned(),
        })
}

#[given("a mock quality service reporting a passing gate with one passing condition")]
fn seed_passing_gate(report_state: &ReportState) -> Result<(), ReportError> {
    let body = json!({
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
    });
    mount_status_response(report_state, ResponseTemplate::new(200).set_body_json(body))
}

#[given("a mock quality service reporting a failing gate with one failing condition")]
fn seed_failing_gate(report_state: &ReportState) -> Result<(), ReportError> {
    let body = json!({
        "projectStatus": {
            "status": "ERROR",
            "conditions": [
                {
                    "status": "ERROR",
                    "metricKey": "coverage",
                    "comparator": "GT",
                    "errorThreshold": "80",
                    "actualValue": "75"
                }
            ]
        }
    });
    mount_status_response(report_state, ResponseTemplate::new(200).set_body_json(body))
}

#[given("a mock quality service rejecting credentials")]
fn seed_rejecting_service(report_state: &ReportState) -> Result<(), ReportError> {
    mount_status_response(
        report_state,
        ResponseTemplate::new(401).set_body_string("Unauthorized"),
    )
}

#[given("a mock quality service returning a malformed body")]
fn seed_malformed_service(report_state: &ReportState) -> Result<(), ReportError> {
    mount_status_response(
        report_state,
        ResponseTemplate::new(200).set_body_json(json!({ "error": "something happened" })),
    )
}

#[when("the reporter builds the quality gate report")]
fn build_report(report_state: &ReportState) -> Result<(), ReportError> {
    let runtime = ensure_runtime_and_server(report_state)?;

    let server_url = report_state
        .server
        .with_ref(MockServer::uri)
        .ok_or_else(|| ReportError::InvalidUrl("mock server URL missing".to_owned()))?;

    let token = SonarToken::new("my-token")?;
    let source = HttpQualityGateSource::new(&server_url, token)?;
    let query = ProjectStatusQuery::new("my_project")?;

    let report = runtime.block_on(async { QualityGateCheck::new(&source).report(&query).await });
    report_state.report.set(report);
    Ok(())
}

fn assert_report_contains(report_state: &ReportState, expected: &str) -> Result<(), ReportError> {
    let matches = report_state
        .report
        .with_ref(|report| report.contains(expected))
        .unwrap_or(false);

    if matches {
        Ok(())
    } else {
        let report = report_state.report.with_ref(Clone::clone).unwrap_or_default();
        Err(ReportError::Api {
            message: format!("report missing {expected:?}: {report}"),
        })
    }
}

#[then("the report announces the quality gate passed")]
fn assert_passed_header(report_state: &ReportState) -> Result<(), ReportError> {
    assert_report_contains(report_state, "👋 Hey, the Quality Gate has PASSED.")
}

#[then("the report lists the passing coverage condition")]
fn assert_passing_condition(report_state: &ReportState) -> Result<(), ReportError> {
    assert_report_contains(
        report_state,
        "\n✅Status: OK, \nMetricKey: coverage\nComparator: GT\nErrorThreshold: 80\nActualValue: 85\n",
    )
}

#[then("the report announces the quality gate failed")]
fn assert_failed_header(report_state: &ReportState) -> Result<(), ReportError> {
    assert_report_contains(report_state, "👋 Hey, the Quality Gate has FAILED.")
}

#[then("the report lists the failing coverage condition")]
fn assert_failing_condition(report_state: &ReportState) -> Result<(), ReportError> {
    assert_report_contains(
        report_state,
        "\n💣Status: ERROR, \nMetricKey: coverage\nComparator: GT\nErrorThreshold: 80\nActualValue: 75\n",
    )
}

#[then("the report is a request error marker")]
fn assert_request_error_marker(report_state: &ReportState) -> Result<(), ReportError> {
    assert_report_contains(report_state, "quality_check=API ERROR: REQUEST ERROR:")?;
    assert_report_contains(report_state, "401")
}

#[then("the report is a parse error marker")]
fn assert_parse_error_marker(report_state: &ReportState) -> Result<(), ReportError> {
    assert_report_contains(report_state, "quality_check=API ERROR: PARSE ERROR:")?;
    assert_report_contains(report_state, "projectStatus")
}

#[scenario(path = "tests/features/quality_gate.feature", index = 0)]
fn passing_gate_report(report_state: ReportState) {
    let _ = report_state;
}

#[scenario(path = "tests/features/quality_gate.feature", index = 1)]
fn failing_gate_report(report_state: ReportState) {
    let _ = report_state;
}

#[scenario(path = "tests/features/quality_gate.feature", index = 2)]
fn unauthorised_report(report_state: ReportState) {
    let _ = report_state;
}

#[scenario(path = "tests/features/quality_gate.feature", index = 3)]
fn malformed_body_report(report_state: ReportState) {
    let _ = report_state;
}
