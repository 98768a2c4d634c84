//! In-memory cache of fetched version lists
//!
//! Entries live until [`VersionCache::clear`] or process exit; there is no
//! expiry. Locks are held only while reading or writing an entry, never across
//! a fetch, so two callers racing on an empty entry may both fetch; the last
//! write wins.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::version::error::RegistryError;
use crate::version::types::{SupportEntry, VersionList};

/// Which source a cached list came from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Official,
    Snapshot(String),
    Npm,
}

impl SourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            SourceKind::Official => "official",
            SourceKind::Snapshot(host) => host,
            SourceKind::Npm => "npm",
        }
    }
}

#[derive(Debug, Default)]
pub struct VersionCache {
    versions: Mutex<HashMap<SourceKind, VersionList>>,
    overview: Mutex<Option<Vec<SupportEntry>>>,
}

/// Entries are replaced whole, so a poisoned lock still guards complete data
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl VersionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached list for `kind`; empty lists count as missing
    pub fn get_versions(&self, kind: &SourceKind) -> Option<VersionList> {
        lock(&self.versions)
            .get(kind)
            .filter(|list| !list.is_empty())
            .cloned()
    }

    pub fn put_versions(&self, kind: SourceKind, list: VersionList) {
        debug!("Caching {} versions for {}", list.versions.len(), kind.as_str());
        lock(&self.versions).insert(kind, list);
    }

    pub fn get_overview(&self) -> Option<Vec<SupportEntry>> {
        lock(&self.overview)
            .as_ref()
            .filter(|entries| !entries.is_empty())
            .cloned()
    }

    pub fn put_overview(&self, entries: Vec<SupportEntry>) {
        debug!("Caching {} support overview entries", entries.len());
        *lock(&self.overview) = Some(entries);
    }

    pub fn clear(&self) {
        lock(&self.versions).clear();
        *lock(&self.overview) = None;
    }

    /// Return the cached list when `use_cache` is set and an entry exists,
    /// otherwise run `fetch`.
    ///
    /// A fetched list is stored when `use_cache` or `persist` is set. A failed
    /// fetch leaves the entry untouched.
    pub async fn get_or_fetch_versions<F, Fut>(
        &self,
        kind: SourceKind,
        use_cache: bool,
        persist: bool,
        fetch: F,
    ) -> Result<VersionList, RegistryError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<VersionList, RegistryError>>,
    {
        if use_cache && let Some(cached) = self.get_versions(&kind) {
            debug!("Cache hit for {}", kind.as_str());
            return Ok(cached);
        }

        let list = fetch().await?;
        if use_cache || persist {
            self.put_versions(kind, list.clone());
        }
        Ok(list)
    }

    /// Same contract as [`Self::get_or_fetch_versions`] for the overview slot
    pub async fn get_or_fetch_overview<F, Fut>(
        &self,
        use_cache: bool,
        fetch: F,
    ) -> Result<Vec<SupportEntry>, RegistryError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<SupportEntry>, RegistryError>>,
    {
        if use_cache && let Some(cached) = self.get_overview() {
            debug!("Cache hit for support overview");
            return Ok(cached);
        }

        let entries = fetch().await?;
        if use_cache {
            self.put_overview(entries.clone());
        }
        Ok(entries)
    }
}
