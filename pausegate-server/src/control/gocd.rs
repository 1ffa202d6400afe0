//! GoCD control plane client
//!
//! Talks to the GoCD pipeline API:
//! - `POST /go/api/pipelines/{name}/pause` with `{"pause_cause": ...}`
//! - `POST /go/api/pipelines/{name}/unpause`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::Serialize;

use super::{ControlError, PipelineControl};

const GOCD_ACCEPT: &str = "application/vnd.go.cd.v1+json";

/// HTTP client for a GoCD server
#[derive(Debug, Clone)]
pub struct GoCdClient {
    /// Base URL of the GoCD server (e.g., "https://gocd.example.com")
    base_url: String,
    username: String,
    password: String,
    client: Client,
}

impl GoCdClient {
    /// Creates a client with a request timeout
    pub fn new(
        base_url: &str,
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self, ControlError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, username, password, client))
    }

    /// Creates a client around a preconfigured reqwest client
    pub fn with_client(base_url: &str, username: &str, password: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_action<B: Serialize + ?Sized>(
        &self,
        pipeline: &str,
        action: &'static str,
        body: Option<&B>,
    ) -> Result<(), ControlError> {
        let url = format!("{}/go/api/pipelines/{}/{}", self.base_url, pipeline, action);

        let mut request = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header(header::ACCEPT, GOCD_ACCEPT)
            .header("X-GoCD-Confirm", "true");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        // Already in the requested state
        if status == StatusCode::CONFLICT {
            tracing::debug!("GoCD reports pipeline '{}' already handled for {}", pipeline, action);
            return Ok(());
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ControlError::Rejected {
                action,
                pipeline: pipeline.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct PauseRequest<'a> {
    pause_cause: &'a str,
}

#[async_trait]
impl PipelineControl for GoCdClient {
    async fn pause(&self, pipeline: &str, reason: &str) -> Result<(), ControlError> {
        tracing::info!("Pausing pipeline '{}' with cause '{}'", pipeline, reason);
        self.post_action(pipeline, "pause", Some(&PauseRequest { pause_cause: reason }))
            .await
    }

    async fn unpause(&self, pipeline: &str) -> Result<(), ControlError> {
        tracing::info!("Unpausing pipeline '{}'", pipeline);
        self.post_action::<()>(pipeline, "unpause", None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(url: &str) -> GoCdClient {
        GoCdClient::new(url, "gocd_test_user", "gocd_test_password", Duration::from_secs(5))
            .unwrap()
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = client("https://gocd.test.example.org/");
        assert_eq!(client.base_url(), "https://gocd.test.example.org");
    }

    #[tokio::test]
    async fn test_pause_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/go/api/pipelines/edxapp_release_advancer/pause")
            .match_header("accept", GOCD_ACCEPT)
            .match_header("x-gocd-confirm", "true")
            .match_header("authorization", Matcher::Regex("^Basic ".to_string()))
            .match_body(Matcher::Json(
                serde_json::json!({ "pause_cause": "Paused for a test reason." }),
            ))
            .with_status(200)
            .create_async()
            .await;

        client(&server.url())
            .pause("edxapp_release_advancer", "Paused for a test reason.")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unpause_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/go/api/pipelines/edxapp_release_advancer/unpause")
            .match_header("x-gocd-confirm", "true")
            .with_status(200)
            .create_async()
            .await;

        client(&server.url())
            .unpause("edxapp_release_advancer")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_conflict_is_success() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/go/api/pipelines/edxapp_release_advancer/pause")
            .with_status(409)
            .with_body("Failed to pause pipeline. Pipeline is already paused.")
            .create_async()
            .await;

        let result = client(&server.url())
            .pause("edxapp_release_advancer", "again")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_rejection_surfaces_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/go/api/pipelines/missing/unpause")
            .with_status(404)
            .with_body("Pipeline not found")
            .create_async()
            .await;

        let err = client(&server.url()).unpause("missing").await.unwrap_err();
        match err {
            ControlError::Rejected {
                action,
                pipeline,
                status,
                message,
            } => {
                assert_eq!(action, "unpause");
                assert_eq!(pipeline, "missing");
                assert_eq!(status, 404);
                assert_eq!(message, "Pipeline not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
