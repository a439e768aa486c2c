//! Record Store HTTP Client
//!
//! Explicitly constructed handle for the remote insert call. Callers
//! create one at startup and hand it to whatever needs it.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::api::dto::{CreateEntryRequest, CreateEntryResponse, HealthResponse};
use crate::store::{CreationToken, Entry};

/// Configuration for the store client
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the checkin API (e.g., "http://localhost:8083")
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_api_url() -> String {
    "http://localhost:8083".to_string()
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }
}

/// HTTP client for the record store API
#[derive(Clone)]
pub struct StoreClient {
    client: Client,
    config: ClientConfig,
}

impl StoreClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Check that the API is up and its store answers
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self
            .client
            .get(self.url("/health/ready"))
            .send()
            .await
            .map_err(classify)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::Unavailable)
        }
    }

    /// Fetch the full health report
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(classify)?;

        if !response.status().is_success() {
            return Err(ClientError::ApiError {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Insert one entry remotely, returning its creation token.
    ///
    /// Sent once; failures are reported, never retried.
    pub async fn insert(&self, entry: &Entry) -> Result<CreationToken, ClientError> {
        let body = CreateEntryRequest::from(entry);

        let response = self
            .client
            .post(self.url("/api/v1/entries"))
            .json(&body)
            .send()
            .await
            .map_err(classify)?;

        if response.status().is_success() {
            let created: CreateEntryResponse = response
                .json()
                .await
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
            Ok(created.id)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::ApiError {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

fn classify(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable
    } else {
        ClientError::Request(e)
    }
}

/// Errors that can occur when talking to the record store API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Record store unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:8083");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_url_joining_ignores_trailing_slash() {
        let client = StoreClient::new(ClientConfig::new("http://example.test/")).unwrap();
        assert_eq!(client.url("/api/v1/entries"), "http://example.test/api/v1/entries");
    }

    #[tokio::test]
    async fn test_insert_against_closed_port_is_unavailable() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = StoreClient::new(ClientConfig::new(format!("http://{}", addr))).unwrap();
        let err = client
            .insert(&Entry::new("Samina", "Yes", 8, "3 cups"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Unavailable));
    }
}
