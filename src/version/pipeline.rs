//! Filter and reduction stages applied to fetched version lists
//!
//! Each stage is a pure function of its input. [`run_pipeline`] applies them
//! in this order:
//!
//! 1. [`merge`] official and snapshot lists
//! 2. [`sort_versions`] into presentation order
//! 3. [`filter_newer_equal`] against the floor
//! 4. [`only_version_numbers`] when requested
//! 5. [`latest_patch_only`] when requested
//! 6. [`dedupe`]
//! 7. [`pin_selected`] when a version is pre-selected
//! 8. [`ensure_non_empty`]

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};

use crate::version::compare::{
    compare_for_listing, compare_versions, is_sentinel, is_version_number, major_minor,
    strip_snapshot_tag,
};
use crate::version::types::LATEST;

/// Switches for the optional stages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub min_version: String,
    pub only_version_numbers: bool,
    pub only_latest_patch_version: bool,
    pub selected_version: Option<String>,
}

pub fn merge(official: Vec<String>, snapshot: Vec<String>) -> Vec<String> {
    let mut merged = official;
    merged.extend(snapshot);
    merged
}

pub fn sort_versions(mut versions: Vec<String>) -> Vec<String> {
    versions.sort_by(|a, b| compare_for_listing(a, b));
    versions
}

/// Drop versions below `min_version`. Sentinels always pass; snapshot tags are
/// judged by the version they carry.
pub fn filter_newer_equal(versions: Vec<String>, min_version: &str) -> Vec<String> {
    versions
        .into_iter()
        .filter(|v| {
            if is_sentinel(v) {
                return true;
            }
            let numeric = strip_snapshot_tag(v).unwrap_or(v);
            compare_versions(numeric, min_version).is_ge()
        })
        .collect()
}

/// Replace a leading `Latest` with the version it resolves to, then keep only
/// plain version numbers.
pub fn only_version_numbers(mut versions: Vec<String>, latest: Option<&str>) -> Vec<String> {
    if let Some(latest) = latest
        && versions.first().is_some_and(|v| v == LATEST)
    {
        versions[0] = latest.to_string();
    }

    versions.retain(|v| is_version_number(v));
    versions
}

/// Keep the highest patch of each `major.minor` line, in first-seen line order.
///
/// Snapshot-tagged and plain versions of the same line are kept apart;
/// sentinels pass through as their own group.
pub fn latest_patch_only(versions: Vec<String>) -> Vec<String> {
    let mut lines: IndexMap<String, String> = IndexMap::new();

    for version in versions {
        let key = match major_minor(&version) {
            Some((major, minor)) if strip_snapshot_tag(&version).is_some() => {
                format!("snapshot-{major}.{minor}")
            }
            Some((major, minor)) => format!("{major}.{minor}"),
            None => version.clone(),
        };

        match lines.entry(key) {
            Entry::Occupied(mut best) => {
                let candidate = strip_snapshot_tag(&version).unwrap_or(&version);
                let current = strip_snapshot_tag(best.get()).unwrap_or(best.get());
                if compare_versions(candidate, current).is_gt() {
                    best.insert(version);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(version);
            }
        }
    }

    lines.into_values().collect()
}

/// Remove exact duplicates, keeping the first occurrence
pub fn dedupe(versions: Vec<String>) -> Vec<String> {
    versions
        .into_iter()
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Move `selected` to the top, inserting it when it is not listed
pub fn pin_selected(mut versions: Vec<String>, selected: &str) -> Vec<String> {
    versions.retain(|v| v != selected);
    versions.insert(0, selected.to_string());
    versions
}

/// Callers always get at least one version: the floor itself
pub fn ensure_non_empty(versions: Vec<String>, min_version: &str) -> Vec<String> {
    if versions.is_empty() {
        vec![min_version.to_string()]
    } else {
        versions
    }
}

/// Run every stage in order
pub fn run_pipeline(
    official: Vec<String>,
    snapshot: Vec<String>,
    latest: Option<&str>,
    options: &PipelineOptions,
) -> Vec<String> {
    let mut versions = sort_versions(merge(official, snapshot));
    versions = filter_newer_equal(versions, &options.min_version);

    if options.only_version_numbers {
        versions = only_version_numbers(versions, latest);
    }
    if options.only_latest_patch_version {
        versions = latest_patch_only(versions);
    }

    versions = dedupe(versions);

    if let Some(selected) = options.selected_version.as_deref() {
        versions = pin_selected(versions, selected);
    }

    ensure_non_empty(versions, &options.min_version)
}
