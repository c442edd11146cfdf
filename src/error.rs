//! Error types for the API client.
//!
//! Mirrors the three failure classes the backend exposes: transport
//! problems, `success: false` envelopes carrying a server message, and
//! payloads missing the data the caller needs.

use thiserror::Error;

/// Errors produced while talking to the analytics backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connection refused, timeout, DNS).
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-2xx status and no usable envelope.
    #[error("API error {status}: {body}")]
    Http { status: u16, body: String },

    /// The envelope arrived with `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The envelope claimed success but carried no data, or the data
    /// could not be decoded into the expected shape.
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl ApiError {
    /// Classify a reqwest failure into a readable transport error.
    pub fn from_transport(err: reqwest::Error, base_url: &str, timeout_seconds: u64) -> Self {
        if err.is_timeout() {
            ApiError::Transport(format!("request timed out after {}s", timeout_seconds))
        } else if err.is_connect() {
            ApiError::Transport(format!("cannot connect to analytics API at {}", base_url))
        } else {
            ApiError::Transport(format!("request failed: {}", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_displays_server_message() {
        let err = ApiError::Rejected("未找到客服: 小林".to_string());
        assert_eq!(err.to_string(), "未找到客服: 小林");
    }

    #[test]
    fn test_http_error_includes_status() {
        let err = ApiError::Http {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert!(err.to_string().contains("502"));
    }
}
