//! Runcoach configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main runcoach configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Strava API configuration
    pub strava: StravaConfig,

    /// Activity mirror configuration
    pub sync: SyncConfig,

    /// Local storage configuration
    pub storage: StorageConfig,

    /// Coaching memory configuration
    pub coaching: CoachingConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that credential environment variables are set. Call this early
    /// in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        for env_var in [
            &self.strava.client_id_env,
            &self.strava.client_secret_env,
            &self.strava.refresh_token_env,
        ] {
            if std::env::var(env_var).is_err() {
                return Err(eyre::eyre!(
                    "Strava credentials not found. Set the {} environment variable.",
                    env_var
                ));
            }
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .runcoach.yml
        let local_config = PathBuf::from(".runcoach.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/runcoach/runcoach.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("runcoach").join("runcoach.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Strava API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StravaConfig {
    /// Environment variable containing the OAuth client id
    #[serde(rename = "client-id-env")]
    pub client_id_env: String,

    /// Environment variable containing the OAuth client secret
    #[serde(rename = "client-secret-env")]
    pub client_secret_env: String,

    /// Environment variable containing the long-lived refresh token
    #[serde(rename = "refresh-token-env")]
    pub refresh_token_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// OAuth token endpoint
    #[serde(rename = "token-url")]
    pub token_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for StravaConfig {
    fn default() -> Self {
        Self {
            client_id_env: "STRAVA_CLIENT_ID".to_string(),
            client_secret_env: "STRAVA_CLIENT_SECRET".to_string(),
            refresh_token_env: "STRAVA_REFRESH_TOKEN".to_string(),
            base_url: "https://www.strava.com/api/v3".to_string(),
            token_url: "https://www.strava.com/oauth/token".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Activity mirror configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// How many weeks back to fetch when mirroring
    #[serde(rename = "lookback-weeks")]
    pub lookback_weeks: u32,

    /// Maximum activities to request per sync
    #[serde(rename = "fetch-limit")]
    pub fetch_limit: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            lookback_weeks: 4,
            fetch_limit: 200,
        }
    }
}

/// Local storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory; RUNCOACH_DATA_DIR overrides, then the platform
    /// data-local dir
    #[serde(rename = "data-dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("RUNCOACH_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("runcoach")
}

/// Coaching memory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachingConfig {
    /// Keep the last N session notes
    #[serde(rename = "max-session-notes")]
    pub max_session_notes: usize,
}

impl Default for CoachingConfig {
    fn default() -> Self {
        Self { max_session_notes: 50 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.strava.base_url, "https://www.strava.com/api/v3");
        assert_eq!(config.sync.lookback_weeks, 4);
        assert_eq!(config.sync.fetch_limit, 200);
        assert_eq!(config.coaching.max_session_notes, 50);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
strava:
  client-id-env: MY_CLIENT_ID
  timeout-ms: 10000
sync:
  lookback-weeks: 8
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.strava.client_id_env, "MY_CLIENT_ID");
        assert_eq!(config.strava.timeout_ms, 10_000);
        assert_eq!(config.sync.lookback_weeks, 8);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = "sync:\n  fetch-limit: 50\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sync.fetch_limit, 50);
        assert_eq!(config.sync.lookback_weeks, 4);
        assert_eq!(config.strava.refresh_token_env, "STRAVA_REFRESH_TOKEN");
    }

    #[test]
    #[serial]
    fn test_validate_missing_credentials() {
        let mut config = Config::default();
        config.strava.client_id_env = "RC_MISSING_TEST_VAR".to_string();
        unsafe {
            std::env::remove_var("RC_MISSING_TEST_VAR");
        }

        let err = config.validate().err().unwrap();
        assert!(err.to_string().contains("RC_MISSING_TEST_VAR"));
    }

    #[test]
    #[serial]
    fn test_data_dir_env_override() {
        unsafe {
            std::env::set_var("RUNCOACH_DATA_DIR", "/tmp/rc-test-data");
        }
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/rc-test-data"));
        unsafe {
            std::env::remove_var("RUNCOACH_DATA_DIR");
        }
    }
}
