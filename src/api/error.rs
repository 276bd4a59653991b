//! API Error Types
//!
//! Errors surfaced by the auction API client, and their conversion to the
//! single user-visible message a view shows inline.

use thiserror::Error;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure: connection refused, DNS, reset, timeout
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status; `message` is the server's `error` field when present
    #[error("{}", describe_server(.status, .message))]
    Server { status: u16, message: Option<String> },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configured base URL is not a valid URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Message the server attached to a failed request, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of a server-reported failure
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The server's message, or `fallback` when the server gave none
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

fn describe_server(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Request failed with status {}", status),
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::Server {
            status: 400,
            message: Some("Bid too low".to_string()),
        };
        assert_eq!(err.user_message("Failed to place bid"), "Bid too low");
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "Bid too low");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Failed to place bid"), "Failed to place bid");
        assert_eq!(err.to_string(), "Request failed with status 500");

        let blank = ApiError::Server {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(blank.user_message("Failed to add comment"), "Failed to add comment");

        let decode = ApiError::Decode(serde_json::from_str::<u32>("nope").unwrap_err());
        assert_eq!(decode.user_message("Failed to load auction"), "Failed to load auction");
    }
}
