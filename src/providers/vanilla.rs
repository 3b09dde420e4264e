use crate::context::Context;
use crate::item::{ItemStack, NamespacedKey};
use crate::registry::ItemSourceProvider;

/// Namespaces the vanilla source answers to
pub const VANILLA_NAMESPACES: [&str; 3] = ["minecraft", "material", "mat"];

/// Plain material lookup: `stone`, `DIAMOND_SWORD`, `minecraft:oak_log`
#[derive(Debug, Clone, Copy, Default)]
pub struct VanillaItemSource;

impl ItemSourceProvider for VanillaItemSource {
    fn get_item(&self, identifier: &str, _context: &Context) -> Option<ItemStack> {
        let material = identifier.trim().to_lowercase();
        NamespacedKey::minecraft(material.as_str())
            .ok()
            .map(ItemStack::new)
    }
}
