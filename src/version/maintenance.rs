//! Maintenance status and default-version marking

use crate::version::compare::{compare_versions, major_minor};
use crate::version::pipeline::sort_versions;
use crate::version::types::{LATEST, SupportEntry, SupportState, VersionRecord};

/// Support windows shipped with the crate, used when the overview document cannot be fetched
const FALLBACK_SUPPORT_TABLE: &[(&str, SupportState)] = &[
    ("1.136.*", SupportState::Maintenance),
    ("1.135.*", SupportState::Maintenance),
    ("1.134.*", SupportState::OutOfMaintenance),
    ("1.133.*", SupportState::OutOfMaintenance),
    ("1.132.*", SupportState::OutOfMaintenance),
    ("1.131.*", SupportState::OutOfMaintenance),
    ("1.130.*", SupportState::OutOfMaintenance),
    ("1.129.*", SupportState::Skipped),
    ("1.128.*", SupportState::OutOfMaintenance),
    ("1.127.*", SupportState::OutOfMaintenance),
    ("1.126.*", SupportState::OutOfMaintenance),
    ("1.125.*", SupportState::OutOfMaintenance),
    ("1.124.*", SupportState::OutOfMaintenance),
    ("1.123.*", SupportState::Skipped),
    ("1.122.*", SupportState::OutOfMaintenance),
    ("1.121.*", SupportState::OutOfMaintenance),
    ("1.120.*", SupportState::Maintenance),
    ("1.119.*", SupportState::OutOfMaintenance),
    ("1.114.*", SupportState::OutOfMaintenance),
    ("1.108.*", SupportState::Maintenance),
    ("1.96.*", SupportState::Maintenance),
    ("1.84.*", SupportState::Maintenance),
    ("1.71.*", SupportState::Maintenance),
    ("1.38.*", SupportState::OutOfMaintenance),
];

pub fn fallback_support_table() -> Vec<SupportEntry> {
    FALLBACK_SUPPORT_TABLE
        .iter()
        .map(|(version, support)| SupportEntry::new(*version, *support))
        .collect()
}

/// Versions offered when no source could be reached: maintained lines at or
/// above `min_version`, newest first, with the wildcard patch resolved to `0`.
pub fn fallback_versions(min_version: &str) -> Vec<String> {
    let versions = FALLBACK_SUPPORT_TABLE
        .iter()
        .filter(|(_, support)| *support == SupportState::Maintenance)
        .map(|(version, _)| version.replace('*', "0"))
        .filter(|version| compare_versions(version, min_version).is_ge())
        .collect();

    sort_versions(versions)
}

/// A version is maintained when its `major.minor` line is listed as in maintenance.
///
/// `Latest` is judged by the version it resolves to; other sentinels are never maintained.
pub fn is_maintained(version: &str, overview: &[SupportEntry], latest: Option<&str>) -> bool {
    let version = match (version, latest) {
        (LATEST, Some(latest)) => latest,
        _ => version,
    };
    let Some(line) = major_minor(version) else {
        return false;
    };

    overview.iter().any(|entry| {
        entry.support == SupportState::Maintenance && major_minor(&entry.version) == Some(line)
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotateOptions {
    pub include_default: bool,
    pub include_maintained: bool,
}

/// Turn the filtered list into records carrying `default` and `maintained` flags.
///
/// The first version is the default. When maintenance is also requested and
/// that version is unmaintained, the default moves to the first maintained
/// version further down; if there is none the first version stays default.
pub fn annotate(
    versions: Vec<String>,
    overview: &[SupportEntry],
    latest: Option<&str>,
    options: AnnotateOptions,
) -> Vec<VersionRecord> {
    let maintained: Vec<bool> = versions
        .iter()
        .map(|v| is_maintained(v, overview, latest))
        .collect();

    let default_index = match (options.include_default, options.include_maintained) {
        (false, _) => None,
        (true, false) => Some(0),
        (true, true) => Some(maintained.iter().position(|m| *m).unwrap_or(0)),
    };

    versions
        .into_iter()
        .enumerate()
        .map(|(idx, version)| VersionRecord {
            version,
            default: (default_index == Some(idx)).then_some(true),
            maintained: options.include_maintained.then_some(maintained[idx]),
        })
        .collect()
}
