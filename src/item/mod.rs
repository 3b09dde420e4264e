//! Rendered Items
//!
//! The concrete object a frame renders into. Mirrors the parts of a game
//! item the render engine touches: display text, counts, model data,
//! cosmetic flags, enchantment storage and the NBT tag set.

pub mod enchantment;
pub mod flag;
pub mod key;
pub mod tag;

pub use enchantment::Enchantment;
pub use flag::ItemFlag;
pub use key::NamespacedKey;
pub use tag::{TagCompound, TagValue};

use std::collections::{BTreeMap, BTreeSet};

/// Which enchantment map an item keeps its visible enchantments in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetaKind {
    #[default]
    Standard,
    /// Books keep enchantments in a separate stored map
    EnchantmentStorage,
}

/// Attribute modifier carried by an item
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeModifier {
    pub attribute: String,
    pub amount: f64,
}

/// A renderable item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    pub material: NamespacedKey,
    pub amount: u32,
    pub meta_kind: MetaKind,
    pub display_name: Option<String>,
    pub lore: Vec<String>,
    /// Legacy durability field
    pub durability: i16,
    /// Legacy single-value model data
    pub custom_model_data: Option<i32>,
    pub item_model: Option<NamespacedKey>,
    pub unbreakable: bool,
    pub hide_tooltip: bool,
    pub flags: BTreeSet<ItemFlag>,
    pub enchants: BTreeMap<Enchantment, u32>,
    pub stored_enchants: BTreeMap<Enchantment, u32>,
    pub attribute_modifiers: Vec<AttributeModifier>,
    pub tag: TagCompound,
}

const AIR_MATERIALS: [&str; 3] = ["air", "cave_air", "void_air"];

impl ItemStack {
    pub fn new(material: NamespacedKey) -> Self {
        let meta_kind = if material.key() == "enchanted_book" {
            MetaKind::EnchantmentStorage
        } else {
            MetaKind::Standard
        };
        Self {
            material,
            amount: 1,
            meta_kind,
            display_name: None,
            lore: Vec::new(),
            durability: 0,
            custom_model_data: None,
            item_model: None,
            unbreakable: false,
            hide_tooltip: false,
            flags: BTreeSet::new(),
            enchants: BTreeMap::new(),
            stored_enchants: BTreeMap::new(),
            attribute_modifiers: Vec::new(),
            tag: TagCompound::new(),
        }
    }

    pub fn air() -> Self {
        Self::new(NamespacedKey::air())
    }

    pub fn is_air(&self) -> bool {
        self.material.namespace() == key::MINECRAFT_NAMESPACE
            && AIR_MATERIALS.contains(&self.material.key())
    }

    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    /// Add an enchantment to whichever map this item displays.
    pub fn add_visible_enchant(&mut self, enchantment: Enchantment, level: u32) {
        match self.meta_kind {
            MetaKind::Standard => self.enchants.insert(enchantment, level),
            MetaKind::EnchantmentStorage => self.stored_enchants.insert(enchantment, level),
        };
    }

    /// Remove an enchantment from both maps. Returns whether anything was removed.
    pub fn remove_enchant_everywhere(&mut self, enchantment: Enchantment) -> bool {
        let direct = self.enchants.remove(&enchantment).is_some();
        let stored = self.stored_enchants.remove(&enchantment).is_some();
        direct || stored
    }
}
