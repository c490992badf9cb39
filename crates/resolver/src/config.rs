use crate::error::{ResolverError, Result};
use metalabel_model::LabelType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for meta-label resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Root marker types; a label type carrying one of them is a marker
    pub root_markers: Vec<LabelType>,

    /// Treat self-labeled types as markers (self-fixed-point policy)
    pub self_describing: bool,

    /// Which marker types stay visible in the effective set
    pub marker_retention: MarkerRetention,

    /// How many declaration levels below a candidate are searched for a
    /// root marker (1 = the candidate's own declaration only)
    pub marker_search_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_markers: vec![],
            self_describing: true,
            marker_retention: MarkerRetention::CarrySelfDescribing,
            marker_search_depth: 1,
        }
    }
}

impl ResolverConfig {
    /// Root-marker policy for `root` plus the self-fixed-point policy
    pub fn with_root(root: impl Into<LabelType>) -> Self {
        Self {
            root_markers: vec![root.into()],
            ..Default::default()
        }
    }

    /// Only self-labeled markers, no external root
    pub fn self_describing_only() -> Self {
        Self::default()
    }

    pub fn retention(mut self, retention: MarkerRetention) -> Self {
        self.marker_retention = retention;
        self
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate().map_err(ResolverError::invalid_config)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loading resolver config from {}", path.as_ref().display());
        Self::from_toml_str(&raw)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.marker_search_depth == 0 {
            return Err("marker_search_depth must be > 0".to_string());
        }

        if self.root_markers.is_empty() && !self.self_describing {
            return Err(
                "no marker policy enabled: set root_markers or self_describing".to_string(),
            );
        }

        if let Some(blank) = self.root_markers.iter().find(|m| m.name().trim().is_empty()) {
            return Err(format!("root marker name must not be blank: {blank:?}"));
        }

        Ok(())
    }
}

/// Visibility of marker types discovered through meta-labels
///
/// Markers are plumbing that classify other label types. A marker that
/// labels itself describes itself and may be carried into the effective
/// set like any other label. Markers declared directly on an element are
/// always kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerRetention {
    /// Drop every discovered marker
    SuppressAll,

    /// Keep self-labeled markers, drop the rest
    #[default]
    CarrySelfDescribing,

    /// Keep self-labeled markers that also carry a configured root marker
    CarryRooted,

    /// Keep every discovered marker
    CarryAll,
}
