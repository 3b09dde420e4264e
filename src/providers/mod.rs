//! First-party providers shipped with the crate.

mod texture;
mod vanilla;

pub use texture::{frame_from_definition, ProviderTexture};
pub use vanilla::{VanillaItemSource, VANILLA_NAMESPACES};

use crate::discovery::{Declaration, ItemSourceDeclaration, ProviderModule};
use std::sync::Arc;

/// Declares the built-in providers
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinModule;

impl ProviderModule for BuiltinModule {
    fn declare(&self, declarations: &mut Vec<Declaration>) {
        declarations.push(
            ItemSourceDeclaration::new("VanillaItemSource", || Ok(Arc::new(VanillaItemSource)))
                .namespaces(VANILLA_NAMESPACES)
                .into(),
        );
    }
}
