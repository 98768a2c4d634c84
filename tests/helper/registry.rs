//! Registry test utilities

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mockito::{Mock, ServerGuard};

use ui5_info::Ui5Info;
use ui5_info::config::{RegistryConfig, Ui5InfoConfig};
use ui5_info::version::cache::VersionCache;
use ui5_info::version::error::RegistryError;
use ui5_info::version::registries::HttpUi5Registry;
use ui5_info::version::registry::PackageQuery;

pub const ROUTE_MAP: &str = r#"{
  "welcomeFile": "/index.html",
  "routes": [
    { "path": "/", "target": { "type": "service", "name": "sapui5", "version": "1.120.4" } },
    { "path": "/1.120.4", "target": { "type": "service", "name": "sapui5", "version": "1.120.4" } },
    { "path": "/1.120.3", "target": { "type": "service", "name": "sapui5", "version": "1.120.3" } },
    { "path": "/1.119.1", "target": { "type": "service", "name": "sapui5", "version": "1.119.1" } },
    { "path": "/1.108.30", "target": { "type": "service", "name": "sapui5", "version": "1.108.30" } },
    { "path": "/1.96.40", "target": { "type": "service", "name": "sapui5", "version": "1.96.40" } },
    { "path": "/1.71.60", "target": { "type": "service", "name": "sapui5", "version": "1.71.60" } },
    { "path": "/1.60.0", "target": { "type": "service", "name": "sapui5", "version": "1.60.0" } }
  ]
}"#;

pub const MINOR_MAP: &str = r#"{
  "latest": { "version": "1.120.4", "support": "Maintenance", "lts": true },
  "1.120": { "version": "1.120.4", "support": "Maintenance", "patches": ["1.120.3", "1.120.4"] },
  "1.96": { "version": "1.96.40", "support": "Maintenance", "patches": ["1.96.39", "1.96.40"] },
  "1.60": { "version": "1.60.0", "support": "Out of maintenance", "patches": ["1.60.0"] }
}"#;

pub const SNAPSHOT_ROUTE_MAP: &str = r#"{
  "routes": [
    { "path": "/", "target": { "version": "1.121.0" } },
    { "path": "/snapshot-untested", "target": { "version": "snapshot-untested" } },
    { "path": "/1.121", "target": { "version": "1.121.0" } }
  ]
}"#;

pub const VERSION_OVERVIEW: &str = r#"{
  "versions": [
    { "version": "1.121.*", "support": "Out of maintenance" },
    { "version": "1.120.*", "support": "Maintenance" },
    { "version": "1.119.*", "support": "Out of maintenance" },
    { "version": "1.108.*", "support": "Maintenance" },
    { "version": "1.96.*", "support": "Maintenance" },
    { "version": "1.71.*", "support": "Maintenance" }
  ]
}"#;

pub const VERSION_JSON: &str = r#"{
  "latest": { "version": "1.120.4", "support": "Maintenance", "lts": true },
  "1.120": { "version": "1.120.4", "support": "Maintenance", "lts": true }
}"#;

/// Serve `body` as JSON at `path`
pub async fn serve_json(server: &mut ServerGuard, path: &str, body: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

/// Serve a server error at `path`
pub async fn serve_error(server: &mut ServerGuard, path: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(500)
        .create_async()
        .await
}

pub fn config_for(server: &ServerGuard) -> Ui5InfoConfig {
    Ui5InfoConfig {
        registry: RegistryConfig {
            official_host: server.url(),
            ..RegistryConfig::default()
        },
        ..Ui5InfoConfig::default()
    }
}

/// Service against a mock official host with a scripted npm query
pub fn service_with_npm(server: &ServerGuard, npm: FakePackageQuery) -> Ui5Info {
    let config = config_for(server);
    let registry = HttpUi5Registry::with_config(config.registry.clone())
        .expect("Failed to build HTTP client");

    Ui5Info::build(
        Arc::new(registry),
        Arc::new(npm),
        Arc::new(VersionCache::new()),
        config.min_ui5_version(),
    )
}

/// Package query returning a fixed result and counting its calls
pub struct FakePackageQuery {
    versions: Option<Vec<String>>,
    calls: Arc<AtomicUsize>,
}

impl FakePackageQuery {
    pub fn returning(versions: Vec<String>) -> Self {
        Self {
            versions: Some(versions),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            versions: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl PackageQuery for FakePackageQuery {
    async fn query_versions(&self) -> Result<Vec<String>, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.versions {
            Some(versions) => Ok(versions.clone()),
            None => Err(RegistryError::InvalidResponse(
                "npm unavailable".to_string(),
            )),
        }
    }
}
