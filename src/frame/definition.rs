//! Serialized frame definitions (TOML / JSON menu files).

use crate::context::{ExpressionEvaluator, Value};
use crate::error::ConfigError;
use crate::frame::nbt::{NbtTemplate, TagTemplate};
use crate::frame::{Frame, FrameBuilder};
use crate::icon::{Pos, Slot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Either a single value or a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }
}

/// Scalar attribute as written in a definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FrameDefinition {
    pub name: Option<String>,
    pub lore: Option<OneOrMany<String>>,
    pub amount: Option<Scalar>,
    pub damage: Option<Scalar>,
    pub custom_model_data: Option<Scalar>,
    pub item_model: Option<String>,
    pub glow: Option<Scalar>,
    pub unbreakable: Option<Scalar>,
    pub hide_tooltip: Option<Scalar>,
    pub flags: Option<OneOrMany<String>>,
    pub enchantments: Option<BTreeMap<String, u32>>,
    pub nbt: Option<BTreeMap<String, serde_json::Value>>,
    pub enhanced_lore: Option<bool>,
    pub slot: Option<OneOrMany<usize>>,
    /// Texture source text, resolved by the caller into a `TextureSource`
    pub texture: Option<String>,
}

impl FrameDefinition {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(input).map_err(|e| ConfigError::Definition(e.to_string()))
    }

    /// Convert into a frame, precomputing static overrides for constant text.
    pub fn into_frame(self, evaluator: &dyn ExpressionEvaluator) -> Frame {
        self.into_builder(evaluator).build()
    }

    /// As [`into_frame`](Self::into_frame) but leaves the builder open, e.g.
    /// to attach the texture named by `texture`.
    pub fn into_builder(self, evaluator: &dyn ExpressionEvaluator) -> FrameBuilder {
        let mut builder = Frame::builder();
        let constant = |text: &str| evaluator.is_constant(text).then(|| Value::infer(text));

        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        if let Some(lore) = self.lore {
            builder = builder.lore(lore.into_vec());
        }
        if let Some(amount) = self.amount.map(Scalar::into_text) {
            if let Some(v) = constant(&amount).and_then(|v| v.to_int().ok()) {
                builder = builder.static_amount(v);
            }
            builder = builder.amount(amount);
        }
        if let Some(damage) = self.damage.map(Scalar::into_text) {
            if let Some(v) = constant(&damage).and_then(|v| v.to_short().ok()) {
                builder = builder.static_damage(v);
            }
            builder = builder.damage(damage);
        }
        if let Some(data) = self.custom_model_data.map(Scalar::into_text) {
            if let Some(v) = constant(&data).and_then(|v| v.to_int().ok()) {
                builder = builder.static_custom_model_data(v);
            }
            builder = builder.custom_model_data(data);
        }
        if let Some(model) = self.item_model {
            if evaluator.is_constant(&model) {
                builder = builder.static_item_model(model.trim());
            }
            builder = builder.item_model(model);
        }
        if let Some(glow) = self.glow.map(Scalar::into_text) {
            if let Some(v) = constant(&glow) {
                builder = builder.static_glow(v.to_bool());
            }
            builder = builder.glow(glow);
        }
        if let Some(unbreakable) = self.unbreakable.map(Scalar::into_text) {
            if let Some(v) = constant(&unbreakable) {
                builder = builder.static_unbreakable(v.to_bool());
            }
            builder = builder.unbreakable(unbreakable);
        }
        if let Some(hide) = self.hide_tooltip.map(Scalar::into_text) {
            if let Some(v) = constant(&hide) {
                builder = builder.static_hide_tooltip(v.to_bool());
            }
            builder = builder.hide_tooltip(hide);
        }
        if let Some(flags) = self.flags {
            builder = builder.flags(flags.into_vec());
        }
        for (name, level) in self.enchantments.unwrap_or_default() {
            builder = builder.enchantment(name, level);
        }
        if let Some(nbt) = self.nbt {
            let mut template = NbtTemplate::new();
            for (key, value) in &nbt {
                if let Some(node) = TagTemplate::from_json(value) {
                    template.insert(key.clone(), node);
                }
            }
            if template.is_constant(evaluator) {
                builder = builder.static_nbt(template.to_literal());
            }
            builder = builder.nbt(template);
        }
        if let Some(enhanced) = self.enhanced_lore {
            builder = builder.enhanced_lore(enhanced);
        }
        if let Some(slot) = self.slot {
            builder = builder.slot(Slot::new(
                slot.into_vec().into_iter().map(Pos::Index).collect(),
            ));
        }
        builder
    }
}
