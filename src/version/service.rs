//! Public entry point: version listing, latest lookup and theme resolution
//!
//! Remote failures never reach callers. Each source result is wrapped in
//! [`Fetched`] so the static fallback shows up in [`Resolution`] rather than
//! only in the logs.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Ui5InfoConfig;
use crate::theme::{ThemeDescriptor, filter_themes, ui5_themes};
use crate::version::cache::{SourceKind, VersionCache};
use crate::version::compare::{highest_version, is_sentinel, strip_snapshot_tag};
use crate::version::error::RegistryError;
use crate::version::maintenance::{
    AnnotateOptions, annotate, fallback_support_table, fallback_versions,
};
use crate::version::pipeline::{PipelineOptions, run_pipeline};
use crate::version::registries::{HttpUi5Registry, NpmQuery};
use crate::version::registry::{PackageQuery, Ui5Registry};
use crate::version::types::{FilterOptions, Fetched, SupportEntry, VersionList, VersionRecord};

/// Lists gathered from the sources before filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Sources {
    official: Vec<String>,
    snapshot: Vec<String>,
    latest: Option<String>,
}

/// Outcome of [`Ui5Info::resolve_versions`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub records: Vec<VersionRecord>,
    /// The version list came from the static maintenance table
    pub versions_fallback: bool,
    /// The maintenance flags came from the static maintenance table
    pub overview_fallback: bool,
}

pub struct Ui5Info {
    registry: Arc<dyn Ui5Registry>,
    npm: Arc<dyn PackageQuery>,
    cache: Arc<VersionCache>,
    min_ui5_version: String,
}

impl Ui5Info {
    /// Build a service talking to the configured hosts, with a fresh cache
    pub fn new(config: &Ui5InfoConfig) -> Result<Self, RegistryError> {
        let registry = HttpUi5Registry::with_config(config.registry.clone())?;
        let npm = NpmQuery::new(&config.npm, config.registry.timeout_ms);

        Ok(Self::build(
            Arc::new(registry),
            Arc::new(npm),
            Arc::new(VersionCache::new()),
            config.min_ui5_version(),
        ))
    }

    /// Build a service from explicit sources and cache
    pub fn build(
        registry: Arc<dyn Ui5Registry>,
        npm: Arc<dyn PackageQuery>,
        cache: Arc<VersionCache>,
        min_ui5_version: &str,
    ) -> Self {
        Self {
            registry,
            npm,
            cache,
            min_ui5_version: min_ui5_version.to_string(),
        }
    }

    pub fn cache(&self) -> &VersionCache {
        &self.cache
    }

    /// Available UI5 versions after filtering; never empty
    pub async fn get_versions(&self, options: &FilterOptions) -> Vec<VersionRecord> {
        self.resolve_versions(options).await.records
    }

    /// Same as [`Self::get_versions`], also reporting which data came from the fallback table
    pub async fn resolve_versions(&self, options: &FilterOptions) -> Resolution {
        let min_version = options.min_version(&self.min_ui5_version);

        let sources = async {
            if options.only_npm_version {
                self.npm_sources(options.use_cache, &min_version).await
            } else {
                self.listing_sources(options, &min_version).await
            }
        };
        let overview = async {
            if options.include_maintained {
                Some(self.support_overview(options.use_cache).await)
            } else {
                None
            }
        };
        let (sources, overview) = futures::join!(sources, overview);

        let versions_fallback = sources.is_fallback();
        let sources = sources.into_inner();
        let overview_fallback = overview.as_ref().is_some_and(Fetched::is_fallback);
        let overview = overview.map(Fetched::into_inner).unwrap_or_default();

        let pipeline = PipelineOptions {
            min_version,
            only_version_numbers: options.only_version_numbers || options.only_npm_version,
            only_latest_patch_version: options.only_latest_patch_version,
            selected_version: options.ui5_selected_version.clone(),
        };
        let versions = run_pipeline(
            sources.official,
            sources.snapshot,
            sources.latest.as_deref(),
            &pipeline,
        );

        let records = annotate(
            versions,
            &overview,
            sources.latest.as_deref(),
            AnnotateOptions {
                include_default: options.include_default,
                include_maintained: options.include_maintained,
            },
        );

        Resolution {
            records,
            versions_fallback,
            overview_fallback,
        }
    }

    async fn listing_sources(&self, options: &FilterOptions, min_version: &str) -> Fetched<Sources> {
        let official = self.cache.get_or_fetch_versions(
            SourceKind::Official,
            options.use_cache,
            false,
            || self.registry.fetch_official_versions(),
        );
        let snapshot = async {
            match options.snapshot_versions_host.as_deref() {
                Some(host) => self
                    .cache
                    .get_or_fetch_versions(
                        SourceKind::Snapshot(host.to_string()),
                        options.use_cache,
                        false,
                        || self.registry.fetch_snapshot_versions(host),
                    )
                    .await
                    .map(|list| list.versions),
                None => Ok(Vec::new()),
            }
        };

        match futures::join!(official, snapshot) {
            (Ok(official), Ok(snapshot)) => Fetched::Remote(Sources {
                official: official.versions,
                snapshot,
                latest: official.latest,
            }),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Failed to fetch UI5 versions, using fallback list: {}", e);
                Fetched::Fallback(Self::fallback_sources(min_version))
            }
        }
    }

    async fn npm_sources(&self, use_cache: bool, min_version: &str) -> Fetched<Sources> {
        let result = self
            .cache
            .get_or_fetch_versions(SourceKind::Npm, use_cache, true, || async {
                self.npm.query_versions().await.map(VersionList::new)
            })
            .await;

        match result {
            Ok(list) => {
                info!("Found {} UI5 versions on npm", list.versions.len());
                Fetched::Remote(Sources {
                    latest: highest_version(list.versions.iter().map(String::as_str)),
                    official: list.versions,
                    snapshot: Vec::new(),
                })
            }
            Err(e) => {
                warn!("Failed to query UI5 versions from npm, using fallback list: {}", e);
                Fetched::Fallback(Self::fallback_sources(min_version))
            }
        }
    }

    fn fallback_sources(min_version: &str) -> Sources {
        let official = fallback_versions(min_version);
        Sources {
            latest: official.first().cloned(),
            official,
            snapshot: Vec::new(),
        }
    }

    async fn support_overview(&self, use_cache: bool) -> Fetched<Vec<SupportEntry>> {
        match self
            .cache
            .get_or_fetch_overview(use_cache, || self.registry.fetch_support_overview())
            .await
        {
            Ok(entries) => Fetched::Remote(entries),
            Err(e) => {
                warn!("Failed to fetch UI5 support overview, using fallback table: {}", e);
                Fetched::Fallback(fallback_support_table())
            }
        }
    }

    /// Concrete version behind `Latest`; never fails
    pub async fn get_latest_version(&self, use_cache: bool) -> String {
        self.resolve_latest_version(use_cache).await.into_inner()
    }

    pub async fn resolve_latest_version(&self, use_cache: bool) -> Fetched<String> {
        match self.try_latest_version(use_cache).await {
            Ok(latest) => Fetched::Remote(latest),
            Err(e) => {
                warn!("Failed to fetch latest UI5 version, using fallback table: {}", e);
                let latest = fallback_versions(&self.min_ui5_version)
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| self.min_ui5_version.clone());
                Fetched::Fallback(latest)
            }
        }
    }

    async fn try_latest_version(&self, use_cache: bool) -> Result<String, RegistryError> {
        if use_cache
            && let Some(latest) = self
                .cache
                .get_versions(&SourceKind::Official)
                .and_then(|list| list.latest)
        {
            return Ok(latest);
        }

        self.registry.fetch_latest_version().await
    }

    /// Themes available in `version`.
    ///
    /// No version or a sentinel means the latest release; if that cannot be
    /// looked up every theme is returned unfiltered.
    pub async fn get_themes_for_version(&self, version: Option<&str>) -> Vec<ThemeDescriptor> {
        let version = match version {
            Some(v) if !is_sentinel(v) => strip_snapshot_tag(v).unwrap_or(v).to_string(),
            _ => match self.try_latest_version(true).await {
                Ok(latest) => latest,
                Err(e) => {
                    warn!("Failed to resolve latest UI5 version for themes: {}", e);
                    return ui5_themes();
                }
            },
        };

        filter_themes(&ui5_themes(), &version)
    }
}
