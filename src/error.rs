//! Error types for the azampay library

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Result type alias for azampay operations
pub type Result<T> = std::result::Result<T, AzamPayError>;

/// Main error type for azampay operations
#[derive(Error, Debug)]
pub enum AzamPayError {
    /// A required payload field was empty
    #[error("({operation}) Error: Field '{field}' is required.")]
    MissingField {
        operation: &'static str,
        field: String,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint URL could not be built
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Credential cannot be sent as a header value
    #[error("Invalid header value for {header}")]
    InvalidHeader { header: &'static str },

    /// 200 response without a body
    #[error("({operation}) Error: Server returned an empty body.")]
    EmptyBody { operation: &'static str },

    /// 200 response whose body does not match the response type
    #[error("({operation}) Error decoding response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// 400 or 417 response whose body does not match the error shape
    #[error("({operation}) Error decoding {kind} body: {source}")]
    ErrorBodyDecode {
        operation: &'static str,
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Gateway rejected the request (status 400)
    #[error("({operation}) {error}")]
    BadRequest {
        operation: &'static str,
        error: BadRequestError,
    },

    /// Gateway rejected the credentials (status 417)
    #[error("({operation}) {error}")]
    Unauthorized {
        operation: &'static str,
        error: UnauthorizedError,
    },

    /// Gateway failed internally (status 500)
    #[error("({operation}) Internal Server Error: status code 500")]
    InternalServerError { operation: &'static str },

    /// Any other status code
    #[error("({operation}) Error: status code {status}")]
    UnexpectedStatus { operation: &'static str, status: u16 },

    /// Token endpoint answered without a usable token
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AzamPayError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// HTTP status the gateway answered with, if the error came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized { .. } => Some(417),
            Self::InternalServerError { .. } => Some(500),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error was raised before anything was sent
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}

/// Body returned by the gateway with status 400
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BadRequestError {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(rename = "traceId", default)]
    pub trace_id: Option<String>,
    /// Validation messages keyed by field name
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bad Request: {}",
            self.title.as_deref().unwrap_or("request rejected")
        )?;
        if let Some(status) = self.status {
            write!(f, " (status {})", status)?;
        }
        for (field, messages) in &self.errors {
            write!(f, "; {}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}

/// Body returned by the gateway with status 417
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnauthorizedError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(rename = "statusCode", default)]
    pub status_code: Option<u16>,
}

impl fmt::Display for UnauthorizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unauthorized: {}",
            self.message.as_deref().unwrap_or("credentials rejected")
        )
    }
}
