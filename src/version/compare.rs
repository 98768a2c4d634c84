//! Ordering rules for UI5 version strings
//!
//! Two orders live here:
//! - [`compare_versions`]: plain numeric comparison, used for floors and windows
//! - [`compare_for_listing`]: the order versions are presented in (sentinels
//!   first, then newest to oldest, snapshots above their release)

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use crate::version::types::{LATEST, SNAPSHOT, SNAPSHOT_PREFIX, SNAPSHOT_UNTESTED};

static VERSION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)*$").expect("valid version regex"));

/// Sentinels in their fixed presentation order
const SENTINEL_ORDER: [&str; 3] = [LATEST, SNAPSHOT, SNAPSHOT_UNTESTED];

/// Compare two dotted version strings numerically.
///
/// Each segment is read up to its first non-digit, so `"80-snapshot"` counts
/// as 80. Missing segments and segments without leading digits count as 0, so
/// `"1.2"` equals `"1.2.0"` and `"1.9"` sorts before `"1.10"`. Never fails.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();
    let len = a_parts.len().max(b_parts.len());

    for idx in 0..len {
        let a_seg = a_parts.get(idx).map_or(0, |s| segment_value(s));
        let b_seg = b_parts.get(idx).map_or(0, |s| segment_value(s));

        match a_seg.cmp(&b_seg) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }

    Ordering::Equal
}

fn segment_value(segment: &str) -> u64 {
    let segment = segment.trim();
    let digits = segment
        .find(|c: char| !c.is_ascii_digit())
        .map_or(segment, |end| &segment[..end]);
    digits.parse().unwrap_or(0)
}

/// True for plain version numbers such as `1.120.3`
pub fn is_version_number(version: &str) -> bool {
    VERSION_NUMBER.is_match(version)
}

/// Returns the version without its `snapshot-` tag, if it carries one
pub fn strip_snapshot_tag(version: &str) -> Option<&str> {
    version
        .strip_prefix(SNAPSHOT_PREFIX)
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
}

/// Sentinels are non-numeric placeholders like `Latest` or `snapshot-untested`
pub fn is_sentinel(version: &str) -> bool {
    strip_snapshot_tag(version).is_none() && !version.starts_with(|c: char| c.is_ascii_digit())
}

/// Highest plain version number among `versions`
pub fn highest_version<'a>(versions: impl IntoIterator<Item = &'a str>) -> Option<String> {
    versions
        .into_iter()
        .filter(|v| is_version_number(v))
        .max_by(|a, b| compare_versions(a, b))
        .map(str::to_string)
}

/// `major.minor` of a version (tag stripped), `None` for sentinels.
///
/// Wildcards are accepted, so `1.120.*` yields `(1, 120)`.
pub fn major_minor(version: &str) -> Option<(u64, u64)> {
    if is_sentinel(version) {
        return None;
    }
    let numeric = strip_snapshot_tag(version).unwrap_or(version);
    let mut parts = numeric.split('.');
    let major = parts.next().map_or(0, segment_value);
    let minor = parts.next().map_or(0, segment_value);
    Some((major, minor))
}

#[derive(Debug, PartialEq, Eq)]
enum Listed<'a> {
    Sentinel(&'a str),
    Snapshot(&'a str),
    Release(&'a str),
}

impl<'a> Listed<'a> {
    fn classify(version: &'a str) -> Self {
        if let Some(numeric) = strip_snapshot_tag(version) {
            Listed::Snapshot(numeric)
        } else if is_sentinel(version) {
            Listed::Sentinel(version)
        } else {
            Listed::Release(version)
        }
    }

    fn numeric(&self) -> &'a str {
        match self {
            Listed::Sentinel(v) | Listed::Snapshot(v) | Listed::Release(v) => v,
        }
    }
}

fn sentinel_rank(version: &str) -> usize {
    SENTINEL_ORDER
        .iter()
        .position(|s| *s == version)
        .unwrap_or(SENTINEL_ORDER.len())
}

/// Presentation order: `Latest`, `snapshot`, `snapshot-untested` (other
/// sentinels lexically after them), then versions from newest to oldest with
/// a `snapshot-` tagged version directly above its release.
pub fn compare_for_listing(a: &str, b: &str) -> Ordering {
    let (a_listed, b_listed) = (Listed::classify(a), Listed::classify(b));

    match (&a_listed, &b_listed) {
        (Listed::Sentinel(x), Listed::Sentinel(y)) => sentinel_rank(x)
            .cmp(&sentinel_rank(y))
            .then_with(|| x.cmp(y)),
        (Listed::Sentinel(_), _) => Ordering::Less,
        (_, Listed::Sentinel(_)) => Ordering::Greater,
        _ => compare_versions(b_listed.numeric(), a_listed.numeric()).then_with(|| {
            match (&a_listed, &b_listed) {
                (Listed::Snapshot(_), Listed::Release(_)) => Ordering::Less,
                (Listed::Release(_), Listed::Snapshot(_)) => Ordering::Greater,
                _ => a.cmp(b),
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2", "1.2.0", Ordering::Equal)]
    #[case("1.9", "1.10", Ordering::Less)]
    #[case("1.120.0", "1.96.40", Ordering::Greater)]
    #[case("1.2.3", "1.2.3", Ordering::Equal)]
    #[case("1.2.x", "1.2.0", Ordering::Equal)] // non-numeric segment counts as 0
    #[case("1.80-snapshot", "1.80.0", Ordering::Equal)]
    #[case("1.80-snapshot", "1.79.9", Ordering::Greater)]
    #[case("1.8rc1", "1.8.0", Ordering::Equal)]
    #[case("abc", "0.0.0", Ordering::Equal)]
    #[case("2", "1.999.999", Ordering::Greater)]
    fn compare_versions_is_numeric(
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_versions(a, b), expected);
        assert_eq!(compare_versions(b, a), expected.reverse());
    }

    #[rstest]
    #[case("1.120.0", true)]
    #[case("1", true)]
    #[case("Latest", false)]
    #[case("snapshot-1.120.0", false)]
    #[case("1.80-snapshot", false)]
    #[case("1.120.", false)]
    fn is_version_number_matches_plain_numbers(#[case] version: &str, #[case] expected: bool) {
        assert_eq!(is_version_number(version), expected);
    }

    #[test]
    fn highest_version_ignores_sentinels() {
        assert_eq!(
            highest_version(["Latest", "1.9.0", "1.10.0", "snapshot-1.11.0"]),
            Some("1.10.0".to_string())
        );
        assert_eq!(highest_version(["Latest"]), None);
    }

    #[rstest]
    #[case("1.120.*", Some((1, 120)))]
    #[case("1.96.40", Some((1, 96)))]
    #[case("snapshot-1.121.0", Some((1, 121)))]
    #[case("2", Some((2, 0)))]
    #[case("1.80-snapshot", Some((1, 80)))]
    #[case("Latest", None)]
    #[case("snapshot-untested", None)]
    fn major_minor_extracts_line(#[case] version: &str, #[case] expected: Option<(u64, u64)>) {
        assert_eq!(major_minor(version), expected);
    }

    #[test]
    fn compare_for_listing_puts_sentinels_first_then_newest() {
        let mut versions = vec![
            "1.96.0",
            "snapshot-1.121.0",
            "1.121.0",
            "snapshot-untested",
            "1.120.5",
            "Latest",
            "snapshot",
            "1.120.10",
        ];

        versions.sort_by(|a, b| compare_for_listing(a, b));

        assert_eq!(
            versions,
            vec![
                "Latest",
                "snapshot",
                "snapshot-untested",
                "snapshot-1.121.0",
                "1.121.0",
                "1.120.10",
                "1.120.5",
                "1.96.0",
            ]
        );
    }

    #[test]
    fn compare_for_listing_is_antisymmetric() {
        let samples = [
            "Latest",
            "snapshot",
            "snapshot-untested",
            "nightly",
            "snapshot-1.120.0",
            "1.120.0",
            "1.120",
            "1.9",
        ];

        for a in samples {
            for b in samples {
                assert_eq!(
                    compare_for_listing(a, b),
                    compare_for_listing(b, a).reverse(),
                    "{a} vs {b}"
                );
            }
        }
    }
}
