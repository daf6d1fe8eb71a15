//! Error types for td
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, local validation failure)
//! - 3: Rejected by the backend (invalid credentials, duplicate email)
//! - 4: Operation failed (server error, network failure)

use thiserror::Error;

/// Exit codes for the td CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const REJECTED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for td operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("{0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not logged in")]
    NotLoggedIn,

    // Backend rejections (exit code 3)
    #[error("Authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    // Operation failures (exit code 4)
    #[error("Server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response ({status}): {message}")]
    Unexpected { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::Validation(_) | Error::InvalidConfig(_) | Error::NotLoggedIn => {
                exit_codes::USER_ERROR
            }

            // Backend rejections
            Error::Auth { .. } | Error::Conflict(_) => exit_codes::REJECTED,

            // Operation failures
            Error::Server(_)
            | Error::Network(_)
            | Error::Unexpected { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// The single user-facing message for this error.
    ///
    /// Mirrors the notification text of the web client: one transient
    /// message per failed operation, no stack traces.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(message) => message.clone(),
            Error::InvalidConfig(message) => format!("Invalid configuration: {message}"),
            Error::NotLoggedIn => "Not logged in. Run `td login` first.".to_string(),
            Error::Auth { status: 401, .. } => "Invalid email or password".to_string(),
            Error::Auth { message, .. } => {
                if message.is_empty() {
                    "Invalid credentials".to_string()
                } else {
                    message.clone()
                }
            }
            Error::Conflict(_) => "Email already exists. Please login.".to_string(),
            Error::Server(_) => "Server error. Please try again later.".to_string(),
            Error::Network(_) => "Network error. Please check your connection.".to_string(),
            Error::Unexpected { message, .. } => {
                if message.is_empty() {
                    "Something went wrong".to_string()
                } else {
                    message.clone()
                }
            }
            Error::Io(_) | Error::Json(_) | Error::TomlParse(_) => {
                "Something went wrong".to_string()
            }
        }
    }

    /// Optional structured details for JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::Auth { status, .. } | Error::Unexpected { status, .. } => {
                Some(serde_json::json!({ "status": status }))
            }
            _ => None,
        }
    }
}

/// Result type alias for td operations
pub type Result<T> = std::result::Result<T, Error>;
