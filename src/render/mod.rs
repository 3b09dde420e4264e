//! Resolution Engine
//!
//! Turns a frame, its fallback ("default") frame and a render context into a
//! concrete item. Each attribute resolves by precedence:
//!
//! 1. the frame's static override, used as-is;
//! 2. the frame's own expression, evaluated against the context;
//! 3. the fallback frame's expression, unless the frame *is* the fallback;
//! 4. otherwise the item keeps whatever value it already had.
//!
//! A failing attribute is recorded and skipped; the render always yields an
//! item.

pub mod attributes;
pub mod text;

pub use attributes::Attribute;

use crate::context::{Context, Value};
use crate::error::RenderError;
use crate::frame::{Expression, Frame};
use crate::icon::{IconElement, Scale};
use crate::item::ItemStack;
use crate::platform::{Feature, Platform};
use std::sync::Arc;
use tracing::{debug, trace};

/// One skipped attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeFailure {
    pub attribute: Attribute,
    pub error: RenderError,
}

/// Rendered item plus the attributes that could not be applied
#[derive(Debug, Clone)]
pub struct Resolution {
    pub item: ItemStack,
    pub failures: Vec<AttributeFailure>,
}

impl Resolution {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, attribute: Attribute) -> bool {
        self.failures.iter().any(|f| f.attribute == attribute)
    }
}

/// Frame plus optional fallback layer
struct Layers<'a> {
    frame: &'a Frame,
    fallback: Option<&'a Frame>,
}

impl<'a> Layers<'a> {
    fn new(frame: &'a Frame, default: &'a Frame) -> Self {
        // A frame never falls back to itself.
        let fallback = (!std::ptr::eq(frame, default)).then_some(default);
        Self { frame, fallback }
    }

    fn pick<T: ?Sized>(&self, get: impl Fn(&'a Frame) -> Option<&'a T>) -> Option<&'a T> {
        get(self.frame).or_else(|| self.fallback.and_then(|d| get(d)))
    }

    /// Static override first, then the layered expression.
    fn scalar<T>(
        &self,
        context: &Context,
        static_value: Option<T>,
        get: impl Fn(&'a Frame) -> Option<&'a Expression>,
        convert: impl FnOnce(Value) -> Result<T, RenderError>,
    ) -> Option<Result<T, RenderError>> {
        if let Some(value) = static_value {
            return Some(Ok(value));
        }
        let expr = self.pick(get)?;
        Some(
            context
                .parse(expr.content())
                .map_err(RenderError::from)
                .and_then(convert),
        )
    }
}

/// The resolution engine
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    platform: Platform,
}

impl Renderer {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Render `frame` into `icon`.
    ///
    /// Without a texture the icon's previous item is the base. With one, the
    /// texture supplies the base and the attribute pass runs whenever its
    /// callback fires, possibly later and on another thread.
    pub fn render_for(
        &self,
        frame: &Arc<Frame>,
        scale: &Scale,
        icon: &IconElement,
        default: &Arc<Frame>,
        set_slot: bool,
    ) {
        if set_slot {
            if let Some(slot) = frame.slot() {
                icon.set_slots(slot.flat_release(scale));
            }
        }

        match frame.texture() {
            None => {
                let previous = icon.item_stack();
                let item = self.generate_properties(previous, frame, default, icon.context());
                icon.set_item_stack(item);
            }
            Some(texture) => {
                let renderer = self.clone();
                let frame = Arc::clone(frame);
                let default = Arc::clone(default);
                let target = icon.clone();
                texture.generate_item(
                    icon.context(),
                    Box::new(move |base| {
                        let item =
                            renderer.generate_properties(base, &frame, &default, target.context());
                        target.set_item_stack(item);
                    }),
                );
            }
        }
    }

    /// Apply the attribute pass and return the item.
    pub fn generate_properties(
        &self,
        item: ItemStack,
        frame: &Frame,
        default: &Frame,
        context: &Context,
    ) -> ItemStack {
        self.resolve(item, frame, default, context).item
    }

    /// Apply the attribute pass, reporting skipped attributes.
    pub fn resolve(
        &self,
        mut item: ItemStack,
        frame: &Frame,
        default: &Frame,
        context: &Context,
    ) -> Resolution {
        if item.is_air() {
            return Resolution {
                item,
                failures: Vec::new(),
            };
        }

        let layers = Layers::new(frame, default);
        let statics = frame.statics();
        let mut failures = Vec::new();
        let mut record = |attribute: Attribute, result: Result<(), RenderError>| {
            if let Err(error) = result {
                debug!(%attribute, %error, "Render attribute skipped");
                failures.push(AttributeFailure { attribute, error });
            }
        };

        // Display text is coloured after evaluation, so it resolves apart
        // from the scalar attributes.
        if let Some(name) = layers.pick(Frame::name) {
            record(
                Attribute::Name,
                context.parse_text(name).map_err(RenderError::from).map(|text| {
                    item.display_name = Some(text::prefix_colored(&text));
                }),
            );
        }
        if let Some(lore) = layers.pick(Frame::lore) {
            record(
                Attribute::Lore,
                context.parse_lines(lore).map_err(RenderError::from).map(|lines| {
                    item.lore = text::lore_colored(lines, frame.enhanced_lore());
                }),
            );
        }

        if let Some(result) =
            layers.scalar(context, statics.amount, Frame::amount, |v| v.to_int())
        {
            record(
                Attribute::Amount,
                result.map(|v| attributes::apply_amount(&mut item, v)),
            );
        }
        if let Some(result) =
            layers.scalar(context, statics.damage, Frame::damage, |v| v.to_short())
        {
            record(
                Attribute::Damage,
                result.map(|v| attributes::apply_damage(&mut item, v)),
            );
        }
        if let Some(result) = layers.scalar(
            context,
            statics.custom_model_data,
            Frame::custom_model_data,
            |v| v.to_int(),
        ) {
            record(
                Attribute::CustomModelData,
                result.map(|v| attributes::apply_custom_model_data(&mut item, v)),
            );
        }
        if self.platform.gates(Feature::ItemModel) {
            if let Some(result) = layers.scalar(
                context,
                statics.item_model.clone(),
                Frame::item_model,
                |v| Ok(v.as_text()),
            ) {
                record(
                    Attribute::ItemModel,
                    result.and_then(|raw| {
                        attributes::apply_item_model(&mut item, &raw, &self.platform)
                    }),
                );
            }
        }
        if let Some(result) = layers.scalar(context, statics.glow, Frame::glow, |v| Ok(v.to_bool()))
        {
            record(
                Attribute::Glow,
                result.map(|on| attributes::apply_glow(&mut item, on)),
            );
        }
        if let Some(result) = layers.scalar(context, statics.unbreakable, Frame::unbreakable, |v| {
            Ok(v.to_bool())
        }) {
            record(
                Attribute::Unbreakable,
                result.map(|on| attributes::apply_unbreakable(&mut item, on)),
            );
        }
        if let Some(result) = layers.scalar(context, statics.hide_tooltip, Frame::hide_tooltip, |v| {
            Ok(v.to_bool())
        }) {
            record(
                Attribute::HideTooltip,
                result.and_then(|hide| {
                    if hide && self.platform.gates(Feature::HideTooltip) {
                        attributes::apply_hide_tooltip(&mut item, &self.platform)
                    } else {
                        Ok(())
                    }
                }),
            );
        }
        for flag in layers.pick(Frame::flags).into_iter().flatten() {
            record(
                Attribute::Flags,
                attributes::apply_flag(&mut item, flag, &self.platform),
            );
        }
        for (name, level) in layers.pick(Frame::enchantments).into_iter().flatten() {
            record(
                Attribute::Enchantments,
                attributes::apply_enchantment(&mut item, name, *level),
            );
        }

        // Static tags win over the template; the two never mix.
        if let Some(template) = layers.pick(Frame::nbt) {
            let tags = match &statics.nbt {
                Some(fixed) => fixed.clone(),
                None => template.build(|s| context.parse_text(s)),
            };
            attributes::apply_nbt(&mut item, &tags);
        } else if let Some(fixed) = &statics.nbt {
            attributes::apply_nbt(&mut item, fixed);
        }

        trace!(failures = failures.len(), "Frame resolved");
        Resolution { item, failures }
    }
}
