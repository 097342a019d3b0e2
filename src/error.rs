// Copyright (c) 2026 QuizSage Shell Project. All rights reserved.

//! Error types for the QuizSage client
//!
//! Every failure surfaces to the immediate caller as a `Result`; nothing is
//! retried internally. API errors carry the HTTP status and the server's
//! joined error messages.

use thiserror::Error;

/// Result type alias for QuizSage client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the QuizSage client
#[derive(Error, Debug)]
pub enum Error {
    /// URL scheme is neither http nor https; raised before any I/O
    #[error("Unsupported request protocol '{0}'")]
    UnsupportedProtocol(String),

    /// Connection-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// The per-request timeout guard fired before the response started
    #[error("Request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Body failed to parse under its declared content type
    #[error("Parse error: {0}")]
    Parse(String),

    /// Non-2xx response from the server
    #[error("{status} : {message}")]
    Api { status: u16, message: String },

    /// Caller-supplied option is unusable (e.g. an invalid header override)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Shell usage error; message shown to the user as-is
    #[error("{0}")]
    Usage(String),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    // The transport never arms reqwest's own timeout; its errors are all
    // connection-level. Timeouts come from the transport's guard, which
    // knows the configured duration.
    fn from(e: reqwest::Error) -> Self {
        Error::Network(e.to_string())
    }
}

impl Error {
    /// Create an API error from a status code and server message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Error::Network(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a shell usage error
    pub fn usage<S: Into<String>>(msg: S) -> Self {
        Error::Usage(msg.into())
    }

    /// Stable error code for API errors: `ERR_STATUS_CODE_<status>`
    pub fn code(&self) -> Option<String> {
        match self {
            Error::Api { status, .. } => Some(format!("ERR_STATUS_CODE_{}", status)),
            _ => None,
        }
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code().map_or(false, |s| (400..500).contains(&s))
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code().map_or(false, |s| (500..600).contains(&s))
    }
}
