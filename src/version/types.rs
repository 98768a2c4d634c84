//! Common types shared by the version sources, the pipeline and the service

use serde::{Deserialize, Serialize};

use crate::config::MIN_UI5_VERSION_FE_V4;
use crate::version::compare::compare_versions;

/// Sentinel standing for "whatever the newest release is"
pub const LATEST: &str = "Latest";

/// Root of a snapshot host
pub const SNAPSHOT: &str = "snapshot";

/// Untested nightly channel of a snapshot host
pub const SNAPSHOT_UNTESTED: &str = "snapshot-untested";

/// Prefix marking a version as coming from a snapshot host
pub const SNAPSHOT_PREFIX: &str = "snapshot-";

/// A resolved version as handed to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRecord {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintained: Option<bool>,
}

impl VersionRecord {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            default: None,
            maintained: None,
        }
    }
}

/// Raw output of a version source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionList {
    pub versions: Vec<String>,
    /// Concrete version the `Latest` sentinel resolves to, when the source knows it
    pub latest: Option<String>,
}

impl VersionList {
    pub fn new(versions: Vec<String>) -> Self {
        Self {
            versions,
            latest: None,
        }
    }

    pub fn with_latest(mut self, latest: impl Into<String>) -> Self {
        self.latest = Some(latest.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// Result of asking a source for data, recording whether the static fallback stepped in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Remote(T),
    Fallback(T),
}

impl<T> Fetched<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Fetched::Remote(value) | Fetched::Fallback(value) => value,
        }
    }
}

/// Maintenance state of a minor version line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportState {
    Maintenance,
    OutOfMaintenance,
    Skipped,
}

impl SupportState {
    /// Parse the label used by the overview document. Unknown labels count as out of maintenance.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Maintenance" => SupportState::Maintenance,
            "Skipped" => SupportState::Skipped,
            _ => SupportState::OutOfMaintenance,
        }
    }
}

/// One row of the maintenance overview, e.g. `1.120.*` in maintenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportEntry {
    pub version: String,
    pub support: SupportState,
}

impl SupportEntry {
    pub fn new(version: impl Into<String>, support: SupportState) -> Self {
        Self {
            version: version.into(),
            support,
        }
    }
}

/// Fiori elements OData flavour the generated app targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FioriElementsVersion {
    V2,
    V4,
}

/// Options for [`crate::version::service::Ui5Info::get_versions`]
///
/// Every option maps to one independent stage; see [`crate::version::pipeline`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterOptions {
    /// Serve from and populate the in-memory cache
    pub use_cache: bool,
    /// Versions below this floor are dropped
    #[serde(rename = "minSupportedUI5Version")]
    pub min_supported_ui5_version: Option<String>,
    /// Merge in the route map of this snapshot host
    pub snapshot_versions_host: Option<String>,
    /// Read versions from the npm registry instead of the official host
    pub only_npm_version: bool,
    pub include_maintained: bool,
    pub include_default: bool,
    /// Resolve `Latest` and drop every entry that is not a plain version number
    pub only_version_numbers: bool,
    pub only_latest_patch_version: bool,
    /// Version pinned at the top of the result
    #[serde(rename = "ui5SelectedVersion")]
    pub ui5_selected_version: Option<String>,
    pub fiori_elements_version: Option<FioriElementsVersion>,
}

impl FilterOptions {
    /// Effective floor: the requested one (or `default_floor`), raised for Fiori elements V4
    pub fn min_version(&self, default_floor: &str) -> String {
        let floor = self
            .min_supported_ui5_version
            .as_deref()
            .unwrap_or(default_floor);

        match self.fiori_elements_version {
            Some(FioriElementsVersion::V4)
                if compare_versions(floor, MIN_UI5_VERSION_FE_V4).is_lt() =>
            {
                MIN_UI5_VERSION_FE_V4.to_string()
            }
            _ => floor.to_string(),
        }
    }
}
