//! Status endpoints

use pausegate_core::domain::PipelineSystemRegistry;
use pausegate_core::dto::pause::{StatusQuery, SystemStatus};

use crate::PauseGateClient;
use crate::error::Result;

impl PauseGateClient {
    // =============================================================================
    // Status
    // =============================================================================

    /// Current pause events per pipeline system
    ///
    /// # Arguments
    /// * `pipeline_system` - Restrict to one system
    /// * `paused_only` - Omit systems that are not paused
    pub async fn status(
        &self,
        pipeline_system: Option<&str>,
        paused_only: bool,
    ) -> Result<SystemStatus> {
        let url = format!("{}/api/status", self.base_url);
        let query = StatusQuery {
            pipeline_system: pipeline_system.map(String::from),
            paused_only,
        };
        let response = self.client.get(&url).query(&query).send().await?;

        self.handle_response(response).await
    }

    /// Configured pipeline systems and their pipelines
    pub async fn list_systems(&self) -> Result<PipelineSystemRegistry> {
        let url = format!("{}/api/systems", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_status_single_system() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/status")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("pipeline_system".into(), "edxapp".into()),
                Matcher::UrlEncoded("paused_only".into(), "true".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"edxapp":[{"event_id":"a1b2c3d4","pipeline_system":"edxapp","who_paused":"alice","time_paused":"2017-04-07_01:00:00","who_cleared":null,"time_cleared":null,"pause_reason":"testing"}]}"#,
            )
            .create_async()
            .await;

        let status = PauseGateClient::new(server.url())
            .status(Some("edxapp"), true)
            .await
            .unwrap();

        let events = &status["edxapp"];
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_id, "a1b2c3d4");
        assert_eq!(events[0].time_paused.to_string(), "2017-04-07_01:00:00");
        assert!(events[0].is_active());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_status_all_systems() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/status")
            .match_query(Matcher::UrlEncoded("paused_only".into(), "false".into()))
            .with_status(200)
            .with_body(r#"{"ecommerce":[],"edxapp":[]}"#)
            .create_async()
            .await;

        let status = PauseGateClient::new(server.url())
            .status(None, false)
            .await
            .unwrap();

        assert_eq!(status.len(), 2);
        assert!(status.values().all(|events| events.is_empty()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_systems() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/systems")
            .with_status(200)
            .with_body(r#"{"edxapp":["edxapp_release_advancer"]}"#)
            .create_async()
            .await;

        let registry = PauseGateClient::new(server.url())
            .list_systems()
            .await
            .unwrap();
        assert_eq!(
            registry.pipelines_for("edxapp").unwrap(),
            ["edxapp_release_advancer"]
        );
    }

    #[tokio::test]
    async fn test_server_error_without_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/systems")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let err = PauseGateClient::new(server.url())
            .list_systems()
            .await
            .unwrap_err();
        assert!(err.is_server_error());
        assert_eq!(err.api_message(), Some("boom"));
    }
}
