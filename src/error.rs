//! Crate-wide error type.
//!
//! [`ReportError`] is shared by both collaborator domains (the quality-gate
//! client and the GitHub comment gateway), so it is hoisted to the crate
//! root. Each variant carries enough context — a status, a value, or a
//! pre-formatted message — for the report classifier and the CLI error path
//! to render a useful diagnostic.

use thiserror::Error;

/// Every fallible operation in sonargate surfaces one of these variants.
#[derive(Debug, Clone, Error)]
pub enum ReportError {
    /// The quality-service token was absent or blank.
    #[error("quality service token is missing")]
    MissingToken,

    /// A configuration value was absent or invalid.
    #[error("{message}")]
    Configuration {
        /// Human-readable description of the configuration problem.
        message: String,
    },

    /// A base URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The quality-gate request returned a non-success HTTP status.
    #[error("quality service returned status {status}: {body}")]
    GateRequest {
        /// HTTP status code returned by the quality service.
        status: u16,
        /// Response body captured alongside the failing status.
        body: String,
    },

    /// The quality-gate request failed at the transport layer.
    #[error("{message}")]
    GateTransport {
        /// Description of the transport failure.
        message: String,
    },

    /// The quality-gate response could not be decoded into the expected shape.
    #[error("{message}")]
    GateResponseShape {
        /// Description of the decoding failure.
        message: String,
    },

    /// A repository identifier was not a valid `owner/repo` slug.
    #[error("invalid repository: {value}")]
    InvalidRepository {
        /// The offending repository value.
        value: String,
    },

    /// A pull-request number was present but not a positive integer.
    #[error("invalid pull request number: {value}")]
    InvalidPullRequestNumber {
        /// The offending pull-request value.
        value: String,
    },

    /// GitHub rejected the request on authentication grounds.
    #[error("{message}")]
    Authentication {
        /// Description of the authentication failure.
        message: String,
    },

    /// GitHub returned an API-level error.
    #[error("{message}")]
    Api {
        /// Description of the API failure.
        message: String,
    },

    /// A GitHub request failed at the network layer.
    #[error("{message}")]
    Network {
        /// Description of the network failure.
        message: String,
    },

    /// Writing the report to an output stream failed.
    #[error("{message}")]
    Io {
        /// Description of the I/O failure.
        message: String,
    },
}
