//! UI5 theme support windows

use std::fmt;

use serde::Serialize;

use crate::version::compare::{compare_versions, is_sentinel, strip_snapshot_tag};

/// First version where Horizon replaces Quartz as the default theme
pub const MIN_UI5_VERSION_HORIZON_DEFAULT: &str = "1.108.0";

const DEPRECATED_SUFFIX: &str = " (deprecated)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ThemeId {
    #[serde(rename = "sap_belize")]
    SapBelize,
    #[serde(rename = "sap_fiori_3")]
    SapFiori3,
    #[serde(rename = "sap_fiori_3_dark")]
    SapFiori3Dark,
    #[serde(rename = "sap_horizon")]
    SapHorizon,
    #[serde(rename = "sap_horizon_dark")]
    SapHorizonDark,
}

impl ThemeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::SapBelize => "sap_belize",
            ThemeId::SapFiori3 => "sap_fiori_3",
            ThemeId::SapFiori3Dark => "sap_fiori_3_dark",
            ThemeId::SapHorizon => "sap_horizon",
            ThemeId::SapHorizonDark => "sap_horizon_dark",
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDescriptor {
    pub id: ThemeId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_since: Option<String>,
    /// Exclusive upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_until: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecate_since: Option<String>,
}

impl ThemeDescriptor {
    pub fn new(id: ThemeId, label: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            support_since: None,
            support_until: None,
            deprecate_since: None,
        }
    }

    pub fn since(mut self, version: &str) -> Self {
        self.support_since = Some(version.to_string());
        self
    }

    pub fn until(mut self, version: &str) -> Self {
        self.support_until = Some(version.to_string());
        self
    }

    pub fn deprecated_since(mut self, version: &str) -> Self {
        self.deprecate_since = Some(version.to_string());
        self
    }

    fn supports(&self, version: &str) -> bool {
        let after_since = self
            .support_since
            .as_deref()
            .is_none_or(|since| compare_versions(version, since).is_ge());
        let before_until = self
            .support_until
            .as_deref()
            .is_none_or(|until| compare_versions(version, until).is_lt());
        after_since && before_until
    }

    fn is_deprecated_in(&self, version: &str) -> bool {
        self.deprecate_since
            .as_deref()
            .is_some_and(|since| compare_versions(version, since).is_ge())
    }
}

/// Every known theme, in presentation order
pub fn ui5_themes() -> Vec<ThemeDescriptor> {
    vec![
        ThemeDescriptor::new(ThemeId::SapBelize, "Belize")
            .deprecated_since("1.120.0")
            .until("2.0.0"),
        ThemeDescriptor::new(ThemeId::SapFiori3, "Quartz Light"),
        ThemeDescriptor::new(ThemeId::SapFiori3Dark, "Quartz Dark").since("1.72.0"),
        ThemeDescriptor::new(ThemeId::SapHorizon, "Morning Horizon").since("1.102.0"),
        ThemeDescriptor::new(ThemeId::SapHorizonDark, "Evening Horizon").since("1.102.0"),
    ]
}

/// Themes whose support window contains `version`, in table order.
///
/// Deprecated themes get ` (deprecated)` appended to their label.
pub fn filter_themes(themes: &[ThemeDescriptor], version: &str) -> Vec<ThemeDescriptor> {
    themes
        .iter()
        .filter(|theme| theme.supports(version))
        .map(|theme| {
            let mut theme = theme.clone();
            if theme.is_deprecated_in(version) {
                theme.label.push_str(DEPRECATED_SUFFIX);
            }
            theme
        })
        .collect()
}

/// Default theme for a version; no version or a sentinel means the newest default
pub fn get_default_theme(version: Option<&str>) -> ThemeId {
    let version = match version {
        Some(v) if !is_sentinel(v) => strip_snapshot_tag(v).unwrap_or(v),
        _ => return ThemeId::SapHorizon,
    };

    if compare_versions(version, MIN_UI5_VERSION_HORIZON_DEFAULT).is_ge() {
        ThemeId::SapHorizon
    } else {
        ThemeId::SapFiori3
    }
}
