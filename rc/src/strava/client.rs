//! Strava API client
//!
//! Authenticates with a long-lived refresh token and a cached access token
//! that is re-exchanged when missing or expired. Transient failures retry
//! with exponential backoff.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::error::{StravaError, is_retryable_status};
use super::types::{Activity, Lap, TokenResponse};
use crate::config::StravaConfig;

/// Maximum number of attempts for transient errors
const MAX_RETRIES: u32 = 3;

/// Initial backoff delay for retries
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Cached access token with its expiry (unix seconds)
#[derive(Debug, Clone)]
struct AccessToken {
    token: String,
    expires_at: i64,
}

impl AccessToken {
    fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() >= self.expires_at
    }
}

/// Client for the Strava API
pub struct StravaClient {
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    http: Client,
    token: Mutex<Option<AccessToken>>,
}

impl StravaClient {
    /// Create a new client from configuration
    ///
    /// Reads the credentials from the environment variables named in config.
    pub fn from_config(config: &StravaConfig) -> Result<Self, StravaError> {
        let client_id = read_env(&config.client_id_env)?;
        let client_secret = read_env(&config.client_secret_env)?;
        let refresh_token = read_env(&config.refresh_token_env)?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(StravaError::Network)?;

        Ok(Self {
            base_url: config.base_url.clone(),
            token_url: config.token_url.clone(),
            client_id,
            client_secret,
            refresh_token,
            http,
            token: Mutex::new(None),
        })
    }

    /// Get the athlete's activities, newest first
    ///
    /// `before`/`after` are unix timestamps bounding the activity start time.
    pub async fn get_activities(
        &self,
        limit: u32,
        before: Option<i64>,
        after: Option<i64>,
    ) -> Result<Vec<Activity>, StravaError> {
        let mut params = vec![("per_page".to_string(), limit.to_string())];
        if let Some(before) = before {
            params.push(("before".to_string(), before.to_string()));
        }
        if let Some(after) = after {
            params.push(("after".to_string(), after.to_string()));
        }

        self.get("athlete/activities", &params).await
    }

    /// Get a single activity by id
    pub async fn get_activity(&self, activity_id: i64) -> Result<Activity, StravaError> {
        self.get(&format!("activities/{}", activity_id), &[]).await
    }

    /// Get time-series streams for an activity, keyed by stream type
    pub async fn get_activity_streams(&self, activity_id: i64, keys: &[&str]) -> Result<Value, StravaError> {
        let params = vec![
            ("keys".to_string(), keys.join(",")),
            ("key_by_type".to_string(), "true".to_string()),
        ];
        self.get(&format!("activities/{}/streams", activity_id), &params).await
    }

    /// Get lap data for an activity
    pub async fn get_activity_laps(&self, activity_id: i64) -> Result<Vec<Lap>, StravaError> {
        self.get(&format!("activities/{}/laps", activity_id), &[]).await
    }

    /// Authenticated GET with retry on transient failures
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(String, String)]) -> Result<T, StravaError> {
        let mut backoff = INITIAL_BACKOFF_MS;

        for attempt in 1..=MAX_RETRIES {
            match self.get_once(endpoint, params).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < MAX_RETRIES => {
                    warn!(endpoint, attempt, error = %e, "Request failed, retrying");
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                    backoff *= 2;
                }
                Err(e) => return Err(e),
            }
        }

        unreachable!("retry loop always returns")
    }

    async fn get_once<T: DeserializeOwned>(&self, endpoint: &str, params: &[(String, String)]) -> Result<T, StravaError> {
        let token = self.ensure_token().await?;
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "GET");

        let response = self.http.get(&url).bearer_auth(&token).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StravaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StravaError::InvalidResponse(format!("{}: {}", endpoint, e)))
    }

    /// Return a valid access token, refreshing it if missing or expired
    async fn ensure_token(&self) -> Result<String, StravaError> {
        let mut guard = self.token.lock().await;

        if let Some(token) = guard.as_ref()
            && !token.is_expired()
        {
            return Ok(token.token.clone());
        }

        let refreshed = self.refresh_access_token().await?;
        let token = refreshed.token.clone();
        *guard = Some(refreshed);
        Ok(token)
    }

    /// Exchange the refresh token for a fresh access token
    async fn refresh_access_token(&self) -> Result<AccessToken, StravaError> {
        debug!("Refreshing access token");

        let payload = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let mut backoff = INITIAL_BACKOFF_MS;
        for attempt in 1..=MAX_RETRIES {
            let response = self.http.post(&self.token_url).form(&payload).send().await?;
            let status = response.status();

            if status.is_success() {
                let token: TokenResponse = response
                    .json()
                    .await
                    .map_err(|e| StravaError::InvalidResponse(format!("token response: {}", e)))?;
                info!("Access token refreshed");
                return Ok(AccessToken {
                    token: token.access_token,
                    expires_at: token.expires_at,
                });
            }

            if is_retryable_status(status.as_u16()) && attempt < MAX_RETRIES {
                warn!(status = status.as_u16(), attempt, "Token refresh failed, retrying");
                tokio::time::sleep(Duration::from_millis(backoff)).await;
                backoff *= 2;
                continue;
            }

            let message = response.text().await.unwrap_or_default();
            return Err(StravaError::TokenRefresh {
                status: status.as_u16(),
                message,
            });
        }

        unreachable!("retry loop always returns")
    }
}

fn read_env(env_var: &str) -> Result<String, StravaError> {
    std::env::var(env_var).map_err(|_| StravaError::MissingCredential {
        env_var: env_var.to_string(),
    })
}
