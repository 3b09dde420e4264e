//! Registry-backed texture source.

use crate::context::{Context, ExpressionEvaluator};
use crate::frame::{Frame, FrameDefinition};
use crate::icon::{ItemCallback, TextureSource};
use crate::registry::{CapabilityRegistry, ItemSourceProvider};
use std::sync::Arc;
use tracing::debug;

use super::VanillaItemSource;

/// Texture text of the form `namespace:identifier`, resolved through the
/// item-source providers of a registry. Text without a namespace names a
/// vanilla material.
#[derive(Debug, Clone)]
pub struct ProviderTexture {
    registry: Arc<CapabilityRegistry>,
    source: String,
}

impl ProviderTexture {
    pub fn new(registry: Arc<CapabilityRegistry>, source: impl Into<String>) -> Self {
        Self {
            registry,
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl TextureSource for ProviderTexture {
    fn generate_item(&self, context: &Context, callback: ItemCallback) {
        let text = match context.parse_text(&self.source) {
            Ok(text) => text,
            Err(error) => {
                debug!(source = %self.source, %error, "Texture text failed to evaluate");
                return;
            }
        };

        let item = match text.split_once(':') {
            Some((namespace, identifier)) => self
                .registry
                .item_source_provider(namespace.trim())
                .and_then(|provider| provider.get_item(identifier, context)),
            None => VanillaItemSource.get_item(&text, context),
        };

        match item {
            Some(item) => callback(item),
            None => debug!(texture = %text, "Texture produced no item"),
        }
    }
}

/// Build a frame from `definition`, resolving its texture text against `registry`.
pub fn frame_from_definition(
    definition: FrameDefinition,
    evaluator: &dyn ExpressionEvaluator,
    registry: &Arc<CapabilityRegistry>,
) -> Frame {
    let texture = definition.texture.clone();
    let builder = definition.into_builder(evaluator);
    match texture {
        Some(source) => builder
            .texture(Arc::new(ProviderTexture::new(Arc::clone(registry), source)))
            .build(),
        None => builder.build(),
    }
}
