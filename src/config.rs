use serde::Deserialize;
use std::path::{Path, PathBuf};

use tracing::debug;

// =============================================================================
// Registry endpoints
// =============================================================================

/// Host serving the official UI5 version listings
pub const DEFAULT_OFFICIAL_HOST: &str = "https://ui5.sap.com";

/// Minor-version map listing the patches of every line
pub const DEFAULT_VERSIONS_PATH: &str = "version.json";

/// Minor-version map carrying the `latest` entry
pub const DEFAULT_LATEST_PATH: &str = "version.json";

/// Maintenance status document
pub const DEFAULT_OVERVIEW_PATH: &str = "versionoverview.json";

/// Route map served by snapshot hosts
pub const DEFAULT_SNAPSHOT_PATH: &str = "neo-app.json";

// =============================================================================
// Version floors
// =============================================================================

/// Oldest UI5 version offered when the caller does not set a floor
pub const DEFAULT_MIN_UI5_VERSION: &str = "1.65.0";

/// Oldest UI5 version supporting Fiori elements for OData V4
pub const MIN_UI5_VERSION_FE_V4: &str = "1.84.0";

// =============================================================================
// npm registry query
// =============================================================================

pub const DEFAULT_NPM_COMMAND: &str = if cfg!(windows) { "npm.cmd" } else { "npm" };

pub const DEFAULT_NPM_PACKAGE: &str = "@sapui5/distribution-layer";

/// Tool configuration, usually read from `config.json`
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Ui5InfoConfig {
    pub registry: RegistryConfig,
    pub npm: NpmConfig,
    pub min_ui5_version: Option<String>,
}

/// Remote hosts and document paths
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    pub official_host: String,
    pub versions_path: String,
    pub latest_path: String,
    pub overview_path: String,
    pub snapshot_path: String,
    /// Passed through to the HTTP client and the npm process; no timeout when unset
    pub timeout_ms: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            official_host: DEFAULT_OFFICIAL_HOST.to_string(),
            versions_path: DEFAULT_VERSIONS_PATH.to_string(),
            latest_path: DEFAULT_LATEST_PATH.to_string(),
            overview_path: DEFAULT_OVERVIEW_PATH.to_string(),
            snapshot_path: DEFAULT_SNAPSHOT_PATH.to_string(),
            timeout_ms: None,
        }
    }
}

/// Package registry query settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct NpmConfig {
    pub command: String,
    pub package: String,
}

impl Default for NpmConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_NPM_COMMAND.to_string(),
            package: DEFAULT_NPM_PACKAGE.to_string(),
        }
    }
}

impl Ui5InfoConfig {
    /// Floor applied when a request does not carry its own
    pub fn min_ui5_version(&self) -> &str {
        self.min_ui5_version
            .as_deref()
            .unwrap_or(DEFAULT_MIN_UI5_VERSION)
    }

    /// Load configuration from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }
}

/// Returns the path to the config file for ui5-info.
/// Uses $XDG_CONFIG_HOME/ui5-info if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/ui5-info,
/// or ./ui5-info if neither is available.
pub fn config_path() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
        .join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("ui5-info")
}
