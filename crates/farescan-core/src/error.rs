//! Centralized error types for farescan.

use thiserror::Error;

/// Failure to obtain a bearer token. Always fatal to the run.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token endpoint rejected credentials (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Token response did not contain an access_token")]
    MissingToken,

    #[error("Token response was not valid JSON: {0}")]
    MalformedBody(String),

    #[error("Token request failed: {0}")]
    Transport(String),
}

/// Failure of a single grid-cell search. Logged and absorbed by the scanner.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Flight search returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Flight search response was malformed: {0}")]
    MalformedBody(String),

    #[error("Flight search request failed: {0}")]
    Transport(String),
}

/// A single offer, price or date that could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid price: {0}")]
    Price(String),

    #[error("Invalid date: {0}")]
    Date(String),

    #[error("Invalid airport code: {0}")]
    AirportCode(String),

    #[error("Malformed offer: {0}")]
    Offer(String),
}

/// Failure to deliver the deal alert. Always fatal to the run.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Could not build alert message: {0}")]
    Message(String),

    #[error("SMTP delivery failed: {0}")]
    Transport(String),
}

/// Invalid or incomplete configuration, reported before any network call.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Notification failed: {0}")]
    Notify(#[from] NotifyError),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create an invalid-setting error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl ParseError {
    /// Create a malformed-offer error.
    pub fn offer(msg: impl Into<String>) -> Self {
        Self::Offer(msg.into())
    }
}
