//! Source traits for fetching UI5 versions from remote hosts and package registries

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::{SupportEntry, VersionList};

/// Trait for the HTTP hosts publishing UI5 version documents
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Ui5Registry: Send + Sync {
    /// Fetches the official version listing
    ///
    /// # Returns
    /// * `Ok(VersionList)` - Versions in document order, with `latest` when the
    ///   document names it
    /// * `Err(RegistryError)` - If the fetch fails or the payload has an unknown shape
    async fn fetch_official_versions(&self) -> Result<VersionList, RegistryError>;

    /// Fetches the route map of a snapshot host, versions tagged as snapshots
    async fn fetch_snapshot_versions(&self, host: &str) -> Result<VersionList, RegistryError>;

    /// Fetches the maintenance overview
    async fn fetch_support_overview(&self) -> Result<Vec<SupportEntry>, RegistryError>;

    /// Fetches the concrete version the `Latest` sentinel stands for
    async fn fetch_latest_version(&self) -> Result<String, RegistryError>;
}

/// Trait for querying published versions from a package registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PackageQuery: Send + Sync {
    /// Runs the query and returns every published version
    async fn query_versions(&self) -> Result<Vec<String>, RegistryError>;
}
