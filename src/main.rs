//! Sonargate CLI entrypoint for quality-gate pull-request reporting.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use sonargate::{
    CommentConfig, HttpQualityGateSource, OctocrabCommentGateway, ProjectStatusQuery,
    QualityGateCheck, ReportError, ReportSubmission, SonarToken, SonargateConfig, build_report,
    plan_submission, telemetry,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ReportError> {
    let config = load_config()?;
    telemetry::init(config.is_verbose());
    config.log_summary();

    let report = quality_gate_report(&config).await;
    write_report(&report)?;
    submit_report(&config, &report).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ReportError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<SonargateConfig, ReportError> {
    SonargateConfig::load().map_err(|error| ReportError::Configuration {
        message: error.to_string(),
    })
}

/// Fetches the quality-gate status and renders the report.
///
/// This never fails: missing configuration and fetch failures are both
/// classified into the report text.
async fn quality_gate_report(config: &SonargateConfig) -> String {
    match prepare_check(config) {
        Ok((source, query)) => QualityGateCheck::new(&source).report(&query).await,
        Err(error) => build_report(Err(error)),
    }
}

fn prepare_check(
    config: &SonargateConfig,
) -> Result<(HttpQualityGateSource, ProjectStatusQuery), ReportError> {
    let host_url = config.resolve_host_url()?;
    let token = SonarToken::new(config.resolve_sonar_token()?)?;
    let source = HttpQualityGateSource::new(&host_url, token)?;

    let query = ProjectStatusQuery::new(config.resolve_project_key()?)?
        .with_pull_request(config.resolve_pr_number().as_deref());

    Ok((source, query))
}

/// Posts the report as a pull-request comment when commenting is configured.
///
/// # Errors
///
/// Returns [`ReportError::InvalidPullRequestNumber`] when a configured pull
/// request number is not a positive integer, and propagates gateway
/// failures from the comment call itself. A wholly missing comment
/// configuration is a logged skip, not an error.
async fn submit_report(config: &SonargateConfig, report: &str) -> Result<(), ReportError> {
    let token = config.resolve_github_token();
    let repository = config.resolve_repository();
    let pull_request = config.resolve_pr_number();

    let comment_config = CommentConfig {
        token: token.as_deref(),
        repository: repository.as_deref(),
        pull_request: pull_request.as_deref(),
    };

    let Some(planned) = plan_submission(&comment_config)? else {
        tracing::debug!(
            "GitHub token, repository, or pull request number not configured; skipping comment"
        );
        return Ok(());
    };

    let gateway = OctocrabCommentGateway::for_token(
        &planned.token,
        config.resolve_github_api_base_url().as_deref(),
    )?;
    let posted = ReportSubmission::new(&gateway)
        .submit(&planned.target, report)
        .await?;

    tracing::info!(
        comment_id = posted.id,
        number = planned.target.number().get(),
        "posted quality gate report"
    );
    Ok(())
}

fn write_report(report: &str) -> Result<(), ReportError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{report}").map_err(|error| ReportError::Io {
        message: error.to_string(),
    })
}
