//! Wire formats of the UI5 version documents
//!
//! Payloads are checked for shape here and converted straight into
//! [`VersionList`] and [`SupportEntry`]; nothing downstream sees raw JSON.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::version::compare::{highest_version, is_version_number};
use crate::version::error::RegistryError;
use crate::version::types::{
    LATEST, SNAPSHOT, SNAPSHOT_PREFIX, SupportEntry, SupportState, VersionList,
};

/// `neo-app.json`: one route per deployed version, `/` pointing at the newest
#[derive(Debug, Deserialize)]
struct RouteMap {
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    path: String,
    target: RouteTarget,
}

#[derive(Debug, Deserialize)]
struct RouteTarget {
    version: String,
}

/// `version.json`: one entry per minor line plus a `latest` entry
#[derive(Debug, Deserialize)]
struct MinorEntry {
    version: String,
    #[serde(default)]
    patches: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VersionsDocument {
    Routes(RouteMap),
    Minors(IndexMap<String, MinorEntry>),
}

/// `versionoverview.json`
#[derive(Debug, Deserialize)]
struct Overview {
    versions: Vec<OverviewEntry>,
}

#[derive(Debug, Deserialize)]
struct OverviewEntry {
    version: String,
    support: String,
}

const LATEST_KEY: &str = "latest";

fn invalid(e: serde_json::Error) -> RegistryError {
    RegistryError::InvalidResponse(e.to_string())
}

fn route_name(path: &str) -> &str {
    path.trim_matches('/')
}

/// Parse an official listing in either the route-map or the minor-map shape.
///
/// The root route becomes the `Latest` sentinel and its target is reported as
/// `latest`. In a minor map the `latest` entry plays the same role, and every
/// `patches` array is flattened; a line without patches contributes its own
/// version.
pub fn parse_official(body: &str) -> Result<VersionList, RegistryError> {
    match serde_json::from_str::<VersionsDocument>(body).map_err(invalid)? {
        VersionsDocument::Routes(map) => {
            let mut latest = None;
            let versions = map
                .routes
                .into_iter()
                .map(|route| {
                    if route_name(&route.path).is_empty() {
                        latest = Some(route.target.version);
                        LATEST.to_string()
                    } else {
                        route.target.version
                    }
                })
                .collect();
            Ok(VersionList { versions, latest })
        }
        VersionsDocument::Minors(mut minors) => {
            let latest_entry = minors.shift_remove(LATEST_KEY);
            let mut versions = Vec::new();
            if latest_entry.is_some() {
                versions.push(LATEST.to_string());
            }

            let latest = latest_entry
                .map(|entry| entry.version)
                .or_else(|| highest_version(minors.values().map(|entry| entry.version.as_str())));
            versions.extend(minors.into_values().flat_map(|entry| {
                if entry.patches.is_empty() {
                    vec![entry.version]
                } else {
                    entry.patches
                }
            }));
            Ok(VersionList { versions, latest })
        }
    }
}

/// Parse a snapshot host route map.
///
/// The root route becomes `snapshot`, named channels such as
/// `/snapshot-untested` keep their name, and numbered routes are tagged
/// `snapshot-<version>`.
pub fn parse_snapshot(body: &str) -> Result<VersionList, RegistryError> {
    let map: RouteMap = serde_json::from_str(body).map_err(invalid)?;
    let mut latest = None;

    let versions = map
        .routes
        .into_iter()
        .map(|route| {
            let name = route_name(&route.path);
            if name.is_empty() {
                latest = Some(route.target.version);
                SNAPSHOT.to_string()
            } else if is_version_number(name) || is_version_number(&route.target.version) {
                format!("{SNAPSHOT_PREFIX}{}", route.target.version)
            } else {
                name.to_string()
            }
        })
        .collect();

    Ok(VersionList { versions, latest })
}

/// Parse the maintenance overview
pub fn parse_overview(body: &str) -> Result<Vec<SupportEntry>, RegistryError> {
    let overview: Overview = serde_json::from_str(body).map_err(invalid)?;

    Ok(overview
        .versions
        .into_iter()
        .map(|entry| SupportEntry::new(entry.version, SupportState::from_label(&entry.support)))
        .collect())
}

/// Read `latest.version` from a minor map
pub fn parse_latest(body: &str) -> Result<String, RegistryError> {
    let minors: IndexMap<String, MinorEntry> = serde_json::from_str(body).map_err(invalid)?;

    minors
        .get(LATEST_KEY)
        .map(|entry| entry.version.clone())
        .ok_or_else(|| RegistryError::InvalidResponse("missing `latest` entry".to_string()))
}
