//! Attribute appliers
//!
//! Each function writes one resolved attribute into an item. Fallible ones
//! return the failure instead of applying anything partial.

use crate::error::RenderError;
use crate::item::{Enchantment, ItemFlag, ItemStack, NamespacedKey, TagCompound};
use crate::platform::{Feature, Platform, ATTRIBUTE_WORKAROUND_MIN_VERSION};
use std::fmt;

/// Attributes the engine resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Name,
    Lore,
    Amount,
    Damage,
    CustomModelData,
    ItemModel,
    Glow,
    Unbreakable,
    HideTooltip,
    Flags,
    Enchantments,
    Nbt,
}

impl Attribute {
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Name => "name",
            Attribute::Lore => "lore",
            Attribute::Amount => "amount",
            Attribute::Damage => "damage",
            Attribute::CustomModelData => "custom-model-data",
            Attribute::ItemModel => "item-model",
            Attribute::Glow => "glow",
            Attribute::Unbreakable => "unbreakable",
            Attribute::HideTooltip => "hide-tooltip",
            Attribute::Flags => "flags",
            Attribute::Enchantments => "enchantments",
            Attribute::Nbt => "nbt",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn apply_amount(item: &mut ItemStack, amount: i32) {
    item.amount = amount.max(0).unsigned_abs();
}

pub fn apply_damage(item: &mut ItemStack, damage: i16) {
    item.durability = damage;
}

pub fn apply_custom_model_data(item: &mut ItemStack, data: i32) {
    item.custom_model_data = Some(data);
}

/// Blank text clears the model; malformed text leaves it untouched.
pub fn apply_item_model(
    item: &mut ItemStack,
    raw: &str,
    platform: &Platform,
) -> Result<(), RenderError> {
    let trimmed = raw.trim();
    let key = if trimmed.is_empty() {
        None
    } else {
        Some(NamespacedKey::parse(trimmed)?)
    };
    if !platform.supports(Feature::ItemModel) {
        return Err(unsupported(Feature::ItemModel, platform));
    }
    item.item_model = key;
    Ok(())
}

pub fn apply_glow(item: &mut ItemStack, glow: bool) {
    if glow {
        item.flags.insert(ItemFlag::HideEnchants);
        item.add_visible_enchant(Enchantment::GLOW_MARKER, 1);
    } else {
        item.remove_enchant_everywhere(Enchantment::GLOW_MARKER);
    }
}

/// Only ever sets the flag.
pub fn apply_unbreakable(item: &mut ItemStack, unbreakable: bool) {
    if unbreakable {
        item.unbreakable = true;
    }
}

pub fn apply_hide_tooltip(item: &mut ItemStack, platform: &Platform) -> Result<(), RenderError> {
    if !platform.supports(Feature::HideTooltip) {
        return Err(unsupported(Feature::HideTooltip, platform));
    }
    item.hide_tooltip = true;
    Ok(())
}

/// Apply one user-written flag. Hiding attributes on newer platforms also
/// drops the modifiers, otherwise the client still lists them.
pub fn apply_flag(item: &mut ItemStack, text: &str, platform: &Platform) -> Result<(), RenderError> {
    let flag = ItemFlag::from_user_text(text)?;
    item.flags.insert(flag);
    if flag == ItemFlag::HideAttributes && platform.at_least(ATTRIBUTE_WORKAROUND_MIN_VERSION) {
        item.attribute_modifiers.clear();
    }
    Ok(())
}

pub fn apply_enchantment(item: &mut ItemStack, name: &str, level: u32) -> Result<(), RenderError> {
    let enchantment = Enchantment::matching(name)
        .ok_or_else(|| RenderError::UnknownEnchantment(name.to_string()))?;
    item.enchants.insert(enchantment, level);
    Ok(())
}

/// Overlay `tags` on the item's current tag set.
pub fn apply_nbt(item: &mut ItemStack, tags: &TagCompound) {
    let mut merged = item.tag.clone();
    merged.put_all(tags);
    item.tag = merged;
}

fn unsupported(feature: Feature, platform: &Platform) -> RenderError {
    RenderError::Unsupported {
        feature: feature.name(),
        version: platform.version_id(),
    }
}
