//! Pausegate HTTP Client
//!
//! A type-safe HTTP client for the pausegate server API.
//!
//! # Example
//!
//! ```no_run
//! use pausegate_client::PauseGateClient;
//!
//! # async fn example() -> pausegate_client::Result<()> {
//! let client = PauseGateClient::new("http://localhost:8080");
//!
//! let added = client.pause_system("alice", "edxapp", "Bad release").await?;
//! println!("Added pause event {}", added.event_id);
//! # Ok(())
//! # }
//! ```

pub mod error;
mod pauses;
mod status;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// HTTP client for the pausegate API
///
/// Methods are organized into groups:
/// - Pause events (pause, resolve, reconcile)
/// - Status (per-system pause state, configured systems)
#[derive(Debug, Clone)]
pub struct PauseGateClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

/// Error body returned by the server
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl PauseGateClient {
    /// Create a new client
    ///
    /// # Example
    /// ```
    /// use pausegate_client::PauseGateClient;
    ///
    /// let client = PauseGateClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Failed requests carry the server's `error` message when it sent one.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ErrorBody>(&error_text)
                .map(|body| body.error)
                .unwrap_or(error_text);
            tracing::debug!("API request failed with status {}: {}", status, message);
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PauseGateClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = PauseGateClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = PauseGateClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
