//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.sonargate.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `SONARGATE_HOST_URL`, `SONARGATE_PR_NUMBER`,
//!    and friends
//! 4. **Command-line arguments** – `--host-url`, `--project-key`, …
//!
//! Pipelines rarely set the prefixed variables: each resolver falls back to
//! the conventional CI variable (`SONAR_HOST_URL`, `SONAR_PROJECTKEY`,
//! `SONAR_TOKEN`, `GITHUB_TOKEN`, `GITHUB_REPOSITORY`, `PR_NUMBER`,
//! `GITHUB_API_BASE_URL`, `VERBOSE`) when no prefixed source provides a
//! value, the same way a `GITHUB_TOKEN` fallback works in most GitHub
//! tooling.

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `SONARGATE_HOST_URL`, `SONAR_HOST_URL`, or `--host-url`: quality service
///   base URL
/// - `SONARGATE_PROJECT_KEY`, `SONAR_PROJECTKEY`, or `--project-key`: project
///   key
/// - `SONARGATE_SONAR_TOKEN` or `SONAR_TOKEN`: quality service token
/// - `SONARGATE_GITHUB_TOKEN` or `GITHUB_TOKEN`: source-control token
/// - `SONARGATE_REPOSITORY`, `GITHUB_REPOSITORY`, or `--repository`:
///   repository in `owner/repo` form
/// - `SONARGATE_PR_NUMBER`, `PR_NUMBER`, or `--pr-number`: pull request
///   number
/// - `SONARGATE_GITHUB_API_BASE_URL` or `GITHUB_API_BASE_URL`: GitHub API
///   base override (GitHub Enterprise)
/// - `SONARGATE_VERBOSE`, `VERBOSE=true`, or `--verbose`: debug diagnostics
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "SONARGATE",
    discovery(
        dotfile_name = ".sonargate.toml",
        config_file_name = "sonargate.toml",
        app_name = "sonargate"
    )
)]
pub struct SonargateConfig {
    /// Base URL of the quality service (e.g. `https://sonar.example.com`).
    #[ortho_config(cli_short = 's')]
    pub host_url: Option<String>,

    /// Project key whose quality gate is inspected.
    #[ortho_config(cli_short = 'k')]
    pub project_key: Option<String>,

    /// Token for the quality service, passed as the basic-auth username.
    pub sonar_token: Option<String>,

    /// Token for the source-control service.
    pub github_token: Option<String>,

    /// Repository identifier in `owner/repo` form.
    #[ortho_config(cli_short = 'r')]
    pub repository: Option<String>,

    /// Pull request number to query and comment on.
    ///
    /// Kept as a raw string: the quality-gate query drops unusable values
    /// silently, while the comment step treats a present but non-numeric
    /// value as fatal.
    #[ortho_config(cli_short = 'p')]
    pub pr_number: Option<String>,

    /// GitHub API base URL override; the public service when absent.
    pub github_api_base_url: Option<String>,

    /// Enables debug-level diagnostics.
    #[ortho_config(cli_short = 'v')]
    pub verbose: bool,
}

/// Reads a legacy environment variable, discarding blank values.
fn legacy_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl SonargateConfig {
    /// Resolves the quality service base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] when no source provides a
    /// value.
    pub fn resolve_host_url(&self) -> Result<String, ReportError> {
        self.host_url
            .clone()
            .or_else(|| legacy_env("SONAR_HOST_URL"))
            .ok_or_else(|| ReportError::Configuration {
                message: "quality service URL is required (use --host-url or SONAR_HOST_URL)"
                    .to_owned(),
            })
    }

    /// Resolves the project key.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] when no source provides a
    /// value.
    pub fn resolve_project_key(&self) -> Result<String, ReportError> {
        self.project_key
            .clone()
            .or_else(|| legacy_env("SONAR_PROJECTKEY"))
            .ok_or_else(|| ReportError::Configuration {
                message: "project key is required (use --project-key or SONAR_PROJECTKEY)"
                    .to_owned(),
            })
    }

    /// Resolves the quality service token.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] when no source provides a
    /// value.
    pub fn resolve_sonar_token(&self) -> Result<String, ReportError> {
        self.sonar_token
            .clone()
            .or_else(|| legacy_env("SONAR_TOKEN"))
            .ok_or_else(|| ReportError::Configuration {
                message: "quality service token is required (use SONAR_TOKEN)".to_owned(),
            })
    }

    /// Resolves the source-control token, if any source provides one.
    ///
    /// Missing values are not an error here: the comment step downgrades an
    /// absent token to a logged skip.
    #[must_use]
    pub fn resolve_github_token(&self) -> Option<String> {
        self.github_token
            .clone()
            .or_else(|| legacy_env("GITHUB_TOKEN"))
    }

    /// Resolves the repository identifier, if any source provides one.
    #[must_use]
    pub fn resolve_repository(&self) -> Option<String> {
        self.repository
            .clone()
            .or_else(|| legacy_env("GITHUB_REPOSITORY"))
    }

    /// Resolves the raw pull request number, if any source provides one.
    #[must_use]
    pub fn resolve_pr_number(&self) -> Option<String> {
        self.pr_number.clone().or_else(|| legacy_env("PR_NUMBER"))
    }

    /// Resolves the GitHub API base URL override, if any source provides
    /// one.
    #[must_use]
    pub fn resolve_github_api_base_url(&self) -> Option<String> {
        self.github_api_base_url
            .clone()
            .or_else(|| legacy_env("GITHUB_API_BASE_URL"))
    }

    /// Whether debug diagnostics are enabled.
    ///
    /// The legacy `VERBOSE` variable is truthy only for the exact string
    /// `true`.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbose || env::var("VERBOSE").is_ok_and(|value| value == "true")
    }

    /// Logs every resolved configuration value at debug level.
    ///
    /// Tokens are shown as `[REDACTED]` when present; they never appear in
    /// diagnostics.
    pub fn log_summary(&self) {
        tracing::debug!(
            host_url = self.resolve_host_url().ok().as_deref().unwrap_or("<unset>"),
            project_key = self
                .resolve_project_key()
                .ok()
                .as_deref()
                .unwrap_or("<unset>"),
            sonar_token = redact(self.resolve_sonar_token().ok().as_deref()),
            github_token = redact(self.resolve_github_token().as_deref()),
            repository = self.resolve_repository().as_deref().unwrap_or("<unset>"),
            pr_number = self.resolve_pr_number().as_deref().unwrap_or("<unset>"),
            github_api_base_url = self
                .resolve_github_api_base_url()
                .as_deref()
                .unwrap_or("<default>"),
            verbose = self.is_verbose(),
            "resolved configuration"
        );
    }
}

/// Renders a secret as a placeholder suitable for diagnostics.
fn redact(value: Option<&str>) -> &'static str {
    if value.is_some_and(|token| !token.is_empty()) {
        "[REDACTED]"
    } else {
        "<unset>"
    }
}
