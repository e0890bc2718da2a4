use reqwest::StatusCode;
use thiserror::Error;

/// Shown when a response carries no usable message of its own.
pub const FETCH_FAILED: &str = "Failed to fetch weather data";

/// Shown when the weather service could not be reached at all.
pub const UNREACHABLE: &str = "Unable to fetch weather data. Please try again.";

/// Failure classes for a call to the weather service.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: DNS, refused connection, timeout.
    #[error("{}", UNREACHABLE)]
    Connectivity(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{}", .message.as_deref().unwrap_or(FETCH_FAILED))]
    Service {
        status: StatusCode,
        message: Option<String>,
    },

    /// The body could not be decoded into the expected shape.
    #[error("{}", FETCH_FAILED)]
    Malformed(#[source] serde_json::Error),
}

impl FetchError {
    /// Text for the user. Same as `Display`, but owned.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}
