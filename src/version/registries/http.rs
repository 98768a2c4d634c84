//! HTTP implementation of the UI5 version hosts

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::version::error::RegistryError;
use crate::version::registries::payload::{
    parse_latest, parse_official, parse_overview, parse_snapshot,
};
use crate::version::registry::Ui5Registry;
use crate::version::types::{SupportEntry, VersionList};

/// Registry implementation reading the UI5 CDN documents
pub struct HttpUi5Registry {
    client: reqwest::Client,
    config: RegistryConfig,
}

impl HttpUi5Registry {
    /// Creates a new HttpUi5Registry against a custom official host
    pub fn new(official_host: &str) -> Result<Self, RegistryError> {
        Self::with_config(RegistryConfig {
            official_host: official_host.to_string(),
            ..RegistryConfig::default()
        })
    }

    pub fn with_config(config: RegistryConfig) -> Result<Self, RegistryError> {
        let mut builder = reqwest::Client::builder().user_agent("ui5-info");
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    fn url(host: &str, path: &str) -> String {
        format!(
            "{}/{}",
            host.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_text(&self, url: &str) -> Result<String, RegistryError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("UI5 host returned status {}: {}", status, url);
            return Err(RegistryError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait::async_trait]
impl Ui5Registry for HttpUi5Registry {
    async fn fetch_official_versions(&self) -> Result<VersionList, RegistryError> {
        let url = Self::url(&self.config.official_host, &self.config.versions_path);
        let body = self.get_text(&url).await?;
        parse_official(&body)
    }

    async fn fetch_snapshot_versions(&self, host: &str) -> Result<VersionList, RegistryError> {
        let url = Self::url(host, &self.config.snapshot_path);
        let body = self.get_text(&url).await?;
        parse_snapshot(&body)
    }

    async fn fetch_support_overview(&self) -> Result<Vec<SupportEntry>, RegistryError> {
        let url = Self::url(&self.config.official_host, &self.config.overview_path);
        let body = self.get_text(&url).await?;
        parse_overview(&body)
    }

    async fn fetch_latest_version(&self) -> Result<String, RegistryError> {
        let url = Self::url(&self.config.official_host, &self.config.latest_path);
        let body = self.get_text(&url).await?;
        parse_latest(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn fetch_official_versions_reads_route_map() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/version.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "routes": [
                        { "path": "/", "target": { "version": "1.121.0" } },
                        { "path": "/1.121.0", "target": { "version": "1.121.0" } },
                        { "path": "/1.120.4", "target": { "version": "1.120.4" } }
                    ]
                }"#,
            )
            .create_async()
            .await;

        let registry = HttpUi5Registry::new(&server.url()).unwrap();
        let result = registry.fetch_official_versions().await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            result,
            VersionList::new(vec![
                "Latest".to_string(),
                "1.121.0".to_string(),
                "1.120.4".to_string()
            ])
            .with_latest("1.121.0")
        );
    }

    #[tokio::test]
    async fn fetch_snapshot_versions_uses_caller_host() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/neo-app.json")
            .with_status(200)
            .with_body(
                r#"{ "routes": [ { "path": "/1.122.0", "target": { "version": "1.122.0" } } ] }"#,
            )
            .create_async()
            .await;

        let registry = HttpUi5Registry::new("http://unused.invalid").unwrap();
        let result = registry
            .fetch_snapshot_versions(&format!("{}/", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.versions, vec!["snapshot-1.122.0".to_string()]);
    }

    #[tokio::test]
    async fn fetch_support_overview_returns_entries() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/versionoverview.json")
            .with_status(200)
            .with_body(
                r#"{ "versions": [ { "version": "1.120.*", "support": "Maintenance" } ] }"#,
            )
            .create_async()
            .await;

        let registry = HttpUi5Registry::new(&server.url()).unwrap();
        let result = registry.fetch_support_overview().await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].version, "1.120.*");
    }

    #[tokio::test]
    async fn fetch_latest_version_reads_version_json() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/version.json")
            .with_status(200)
            .with_body(r#"{ "latest": { "version": "1.121.0" } }"#)
            .create_async()
            .await;

        let registry = HttpUi5Registry::new(&server.url()).unwrap();
        let result = registry.fetch_latest_version().await.unwrap();

        mock.assert_async().await;
        assert_eq!(result, "1.121.0");
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/version.json")
            .with_status(503)
            .create_async()
            .await;

        let registry = HttpUi5Registry::new(&server.url()).unwrap();
        let result = registry.fetch_official_versions().await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(RegistryError::Status { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn malformed_payload_is_invalid_response() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/version.json")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let registry = HttpUi5Registry::new(&server.url()).unwrap();
        let result = registry.fetch_latest_version().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn fetch_official_versions_reads_minor_map_by_default() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/version.json")
            .with_status(200)
            .with_body(
                r#"{
                    "latest": { "version": "1.121.0" },
                    "1.121": { "version": "1.121.0", "patches": ["1.121.0"] },
                    "1.120": { "version": "1.120.5", "patches": ["1.120.4", "1.120.5"] }
                }"#,
            )
            .create_async()
            .await;

        let registry = HttpUi5Registry::new(&server.url()).unwrap();
        let result = registry.fetch_official_versions().await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            result,
            VersionList::new(vec![
                "Latest".to_string(),
                "1.121.0".to_string(),
                "1.120.4".to_string(),
                "1.120.5".to_string()
            ])
            .with_latest("1.121.0")
        );
    }

    #[tokio::test]
    async fn slow_host_hits_configured_timeout() {
        use std::io::Write;

        let mut server = Server::new_async().await;

        server
            .mock("GET", "/version.json")
            .with_status(200)
            .with_chunked_body(|writer| {
                std::thread::sleep(Duration::from_millis(500));
                writer.write_all(br#"{ "latest": { "version": "1.121.0" } }"#)
            })
            .create_async()
            .await;

        let registry = HttpUi5Registry::with_config(RegistryConfig {
            official_host: server.url(),
            timeout_ms: Some(100),
            ..RegistryConfig::default()
        })
        .unwrap();
        let result = registry.fetch_latest_version().await;

        match result {
            Err(RegistryError::Network(e)) => assert!(e.is_timeout(), "{e}"),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
