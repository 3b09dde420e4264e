//! Platform version gates
//!
//! Version ids follow the host convention `major * 10000 + minor * 100 + patch`
//! without the leading `1.`, e.g. `1.21.2` is `12102`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// First version with the item model component
pub const ITEM_MODEL_MIN_VERSION: u32 = 12102;
/// First version with the hide-tooltip component
pub const HIDE_TOOLTIP_MIN_VERSION: u32 = 12005;
/// First version where hiding attributes needs the modifiers cleared as well
pub const ATTRIBUTE_WORKAROUND_MIN_VERSION: u32 = 12100;

/// Version-gated item features
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    ItemModel,
    HideTooltip,
}

impl Feature {
    pub fn name(&self) -> &'static str {
        match self {
            Feature::ItemModel => "item-model",
            Feature::HideTooltip => "hide-tooltip",
        }
    }

    pub fn min_version(&self) -> u32 {
        match self {
            Feature::ItemModel => ITEM_MODEL_MIN_VERSION,
            Feature::HideTooltip => HIDE_TOOLTIP_MIN_VERSION,
        }
    }
}

/// Running platform: version id plus features the host reports broken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    version_id: u32,
    disabled: BTreeSet<Feature>,
}

impl Platform {
    pub fn new(version_id: u32) -> Self {
        Self {
            version_id,
            disabled: BTreeSet::new(),
        }
    }

    /// Mark a feature unavailable even though the version gate passes.
    pub fn without(mut self, feature: Feature) -> Self {
        self.disabled.insert(feature);
        self
    }

    pub fn version_id(&self) -> u32 {
        self.version_id
    }

    pub fn at_least(&self, version_id: u32) -> bool {
        self.version_id >= version_id
    }

    /// Version gate only; a feature below its gate is skipped, not attempted.
    pub fn gates(&self, feature: Feature) -> bool {
        self.at_least(feature.min_version())
    }

    /// Whether an attempted feature will actually apply
    pub fn supports(&self, feature: Feature) -> bool {
        self.gates(feature) && !self.disabled.contains(&feature)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PLATFORM_VERSION)
    }
}
