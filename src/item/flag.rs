//! Item flags hiding parts of the tooltip.

use crate::error::RenderError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemFlag {
    HideEnchants,
    HideAttributes,
    HideUnbreakable,
    HideDestroys,
    HidePlacedOn,
    HideAdditionalTooltip,
    HideDye,
    HideArmorTrim,
    HideStoredEnchants,
}

impl ItemFlag {
    pub const ALL: [ItemFlag; 9] = [
        ItemFlag::HideEnchants,
        ItemFlag::HideAttributes,
        ItemFlag::HideUnbreakable,
        ItemFlag::HideDestroys,
        ItemFlag::HidePlacedOn,
        ItemFlag::HideAdditionalTooltip,
        ItemFlag::HideDye,
        ItemFlag::HideArmorTrim,
        ItemFlag::HideStoredEnchants,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ItemFlag::HideEnchants => "HIDE_ENCHANTS",
            ItemFlag::HideAttributes => "HIDE_ATTRIBUTES",
            ItemFlag::HideUnbreakable => "HIDE_UNBREAKABLE",
            ItemFlag::HideDestroys => "HIDE_DESTROYS",
            ItemFlag::HidePlacedOn => "HIDE_PLACED_ON",
            ItemFlag::HideAdditionalTooltip => "HIDE_ADDITIONAL_TOOLTIP",
            ItemFlag::HideDye => "HIDE_DYE",
            ItemFlag::HideArmorTrim => "HIDE_ARMOR_TRIM",
            ItemFlag::HideStoredEnchants => "HIDE_STORED_ENCHANTS",
        }
    }

    /// Normalize user text (`hide attributes`) and look up the flag.
    pub fn from_user_text(text: &str) -> Result<Self, RenderError> {
        normalize(text).parse()
    }
}

/// `' '` becomes `'_'`, then upper-case.
pub fn normalize(text: &str) -> String {
    text.replace(' ', "_").to_uppercase()
}

impl FromStr for ItemFlag {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemFlag::ALL
            .iter()
            .copied()
            .find(|flag| flag.name() == s)
            .ok_or_else(|| RenderError::UnknownFlag(s.to_string()))
    }
}

impl fmt::Display for ItemFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
