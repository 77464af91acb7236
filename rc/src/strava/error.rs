//! Strava client error types

use thiserror::Error;

/// Errors that can occur talking to the Strava API
#[derive(Debug, Error)]
pub enum StravaError {
    #[error("Missing credential: set the {env_var} environment variable")]
    MissingCredential { env_var: String },

    #[error("Token refresh failed with status {status}: {message}")]
    TokenRefresh { status: u16, message: String },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StravaError {
    /// Check if this error is worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            StravaError::Api { status, .. } => is_retryable_status(*status),
            StravaError::Network(_) => true,
            StravaError::MissingCredential { .. } => false,
            StravaError::TokenRefresh { .. } => false,
            StravaError::InvalidResponse(_) => false,
            StravaError::Json(_) => false,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504 | 529)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable() {
        assert!(
            StravaError::Api {
                status: 503,
                message: "unavailable".to_string()
            }
            .is_retryable()
        );
        assert!(
            StravaError::Api {
                status: 429,
                message: "rate limited".to_string()
            }
            .is_retryable()
        );
        assert!(
            !StravaError::Api {
                status: 404,
                message: "not found".to_string()
            }
            .is_retryable()
        );
        assert!(
            !StravaError::TokenRefresh {
                status: 401,
                message: "bad token".to_string()
            }
            .is_retryable()
        );
        assert!(!StravaError::InvalidResponse("bad json".to_string()).is_retryable());
    }

    #[test]
    fn test_retryable_statuses() {
        for status in [408, 429, 500, 502, 503, 504, 529] {
            assert!(is_retryable_status(status), "{} should be retryable", status);
        }
        for status in [200, 301, 400, 401, 403, 404] {
            assert!(!is_retryable_status(status), "{} should not be retryable", status);
        }
    }

    #[test]
    fn test_missing_credential_message() {
        let err = StravaError::MissingCredential {
            env_var: "STRAVA_REFRESH_TOKEN".to_string(),
        };
        assert!(err.to_string().contains("STRAVA_REFRESH_TOKEN"));
    }
}
