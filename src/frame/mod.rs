//! Frames
//!
//! Immutable declarative templates for a menu icon. Every attribute is
//! optional: an absent attribute defers to the fallback frame during
//! resolution. `static` overrides carry values already known at definition
//! time and bypass expression evaluation entirely.

pub mod definition;
pub mod nbt;

pub use definition::FrameDefinition;
pub use nbt::{NbtTemplate, TagTemplate};

use crate::icon::{Slot, TextureSource};
use crate::item::TagCompound;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Raw template text evaluated against a context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression(String);

impl Expression {
    pub fn new(content: impl Into<String>) -> Self {
        Expression(content.into())
    }

    pub fn content(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Expression {
    fn from(s: &str) -> Self {
        Expression::new(s)
    }
}

impl From<String> for Expression {
    fn from(s: String) -> Self {
        Expression(s)
    }
}

/// Values that skip evaluation when present
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticOverrides {
    pub amount: Option<i32>,
    pub damage: Option<i16>,
    pub custom_model_data: Option<i32>,
    pub item_model: Option<String>,
    pub glow: Option<bool>,
    pub unbreakable: Option<bool>,
    pub hide_tooltip: Option<bool>,
    pub nbt: Option<TagCompound>,
}

/// Declarative icon template
#[derive(Clone, Default)]
pub struct Frame {
    name: Option<String>,
    lore: Option<Vec<String>>,
    amount: Option<Expression>,
    damage: Option<Expression>,
    custom_model_data: Option<Expression>,
    item_model: Option<Expression>,
    glow: Option<Expression>,
    unbreakable: Option<Expression>,
    hide_tooltip: Option<Expression>,
    flags: Option<Vec<String>>,
    enchantments: Option<BTreeMap<String, u32>>,
    nbt: Option<NbtTemplate>,
    statics: StaticOverrides,
    enhanced_lore: Option<bool>,
    slot: Option<Slot>,
    texture: Option<Arc<dyn TextureSource>>,
}

impl Frame {
    pub fn builder() -> FrameBuilder {
        FrameBuilder::default()
    }

    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    pub fn lore(&self) -> Option<&Vec<String>> {
        self.lore.as_ref()
    }

    pub fn amount(&self) -> Option<&Expression> {
        self.amount.as_ref()
    }

    pub fn damage(&self) -> Option<&Expression> {
        self.damage.as_ref()
    }

    pub fn custom_model_data(&self) -> Option<&Expression> {
        self.custom_model_data.as_ref()
    }

    pub fn item_model(&self) -> Option<&Expression> {
        self.item_model.as_ref()
    }

    pub fn glow(&self) -> Option<&Expression> {
        self.glow.as_ref()
    }

    pub fn unbreakable(&self) -> Option<&Expression> {
        self.unbreakable.as_ref()
    }

    pub fn hide_tooltip(&self) -> Option<&Expression> {
        self.hide_tooltip.as_ref()
    }

    pub fn flags(&self) -> Option<&Vec<String>> {
        self.flags.as_ref()
    }

    pub fn enchantments(&self) -> Option<&BTreeMap<String, u32>> {
        self.enchantments.as_ref()
    }

    pub fn nbt(&self) -> Option<&NbtTemplate> {
        self.nbt.as_ref()
    }

    pub fn statics(&self) -> &StaticOverrides {
        &self.statics
    }

    pub fn enhanced_lore(&self) -> Option<bool> {
        self.enhanced_lore
    }

    pub fn slot(&self) -> Option<&Slot> {
        self.slot.as_ref()
    }

    pub fn texture(&self) -> Option<&Arc<dyn TextureSource>> {
        self.texture.as_ref()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("name", &self.name)
            .field("lore", &self.lore)
            .field("amount", &self.amount)
            .field("damage", &self.damage)
            .field("custom_model_data", &self.custom_model_data)
            .field("item_model", &self.item_model)
            .field("glow", &self.glow)
            .field("unbreakable", &self.unbreakable)
            .field("hide_tooltip", &self.hide_tooltip)
            .field("flags", &self.flags)
            .field("enchantments", &self.enchantments)
            .field("nbt", &self.nbt)
            .field("statics", &self.statics)
            .field("enhanced_lore", &self.enhanced_lore)
            .field("slot", &self.slot)
            .field("texture", &self.texture.is_some())
            .finish()
    }
}

/// Builder for [`Frame`]
#[derive(Default)]
pub struct FrameBuilder {
    frame: Frame,
}

impl FrameBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.frame.name = Some(name.into());
        self
    }

    pub fn lore<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frame.lore = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    pub fn amount(mut self, expr: impl Into<Expression>) -> Self {
        self.frame.amount = Some(expr.into());
        self
    }

    pub fn damage(mut self, expr: impl Into<Expression>) -> Self {
        self.frame.damage = Some(expr.into());
        self
    }

    pub fn custom_model_data(mut self, expr: impl Into<Expression>) -> Self {
        self.frame.custom_model_data = Some(expr.into());
        self
    }

    pub fn item_model(mut self, expr: impl Into<Expression>) -> Self {
        self.frame.item_model = Some(expr.into());
        self
    }

    pub fn glow(mut self, expr: impl Into<Expression>) -> Self {
        self.frame.glow = Some(expr.into());
        self
    }

    pub fn unbreakable(mut self, expr: impl Into<Expression>) -> Self {
        self.frame.unbreakable = Some(expr.into());
        self
    }

    pub fn hide_tooltip(mut self, expr: impl Into<Expression>) -> Self {
        self.frame.hide_tooltip = Some(expr.into());
        self
    }

    pub fn flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frame.flags = Some(flags.into_iter().map(Into::into).collect());
        self
    }

    pub fn enchantment(mut self, name: impl Into<String>, level: u32) -> Self {
        self.frame
            .enchantments
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), level);
        self
    }

    pub fn nbt(mut self, template: NbtTemplate) -> Self {
        self.frame.nbt = Some(template);
        self
    }

    pub fn static_amount(mut self, amount: i32) -> Self {
        self.frame.statics.amount = Some(amount);
        self
    }

    pub fn static_damage(mut self, damage: i16) -> Self {
        self.frame.statics.damage = Some(damage);
        self
    }

    pub fn static_custom_model_data(mut self, data: i32) -> Self {
        self.frame.statics.custom_model_data = Some(data);
        self
    }

    pub fn static_item_model(mut self, model: impl Into<String>) -> Self {
        self.frame.statics.item_model = Some(model.into());
        self
    }

    pub fn static_glow(mut self, glow: bool) -> Self {
        self.frame.statics.glow = Some(glow);
        self
    }

    pub fn static_unbreakable(mut self, unbreakable: bool) -> Self {
        self.frame.statics.unbreakable = Some(unbreakable);
        self
    }

    pub fn static_hide_tooltip(mut self, hide: bool) -> Self {
        self.frame.statics.hide_tooltip = Some(hide);
        self
    }

    pub fn static_nbt(mut self, tags: TagCompound) -> Self {
        self.frame.statics.nbt = Some(tags);
        self
    }

    pub fn enhanced_lore(mut self, enhanced: bool) -> Self {
        self.frame.enhanced_lore = Some(enhanced);
        self
    }

    pub fn slot(mut self, slot: Slot) -> Self {
        self.frame.slot = Some(slot);
        self
    }

    pub fn texture(mut self, texture: Arc<dyn TextureSource>) -> Self {
        self.frame.texture = Some(texture);
        self
    }

    pub fn build(self) -> Frame {
        self.frame
    }

    /// Build into a shared frame, the form the renderer takes.
    pub fn shared(self) -> Arc<Frame> {
        Arc::new(self.frame)
    }
}
