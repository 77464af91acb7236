//! Tool error types

use thiserror::Error;

/// Errors that can occur during tool dispatch
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Strava client not initialized. Set the Strava credential environment variables.")]
    ClientNotConfigured,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_message() {
        let err = ToolError::UnknownTool {
            name: "frobnicate".to_string(),
        };
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn test_client_not_configured_mentions_credentials() {
        assert!(ToolError::ClientNotConfigured.to_string().contains("credential"));
    }
}
