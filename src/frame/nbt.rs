//! NBT templates: tag trees whose text leaves are expressions.

use crate::context::ExpressionEvaluator;
use crate::error::EvaluationError;
use crate::item::{TagCompound, TagValue};
use std::collections::BTreeMap;

/// One node of an NBT template
#[derive(Debug, Clone, PartialEq)]
pub enum TagTemplate {
    /// Expression text, resolved to a string tag
    Text(String),
    Fixed(TagValue),
    List(Vec<TagTemplate>),
    Compound(BTreeMap<String, TagTemplate>),
}

/// Root of an NBT template
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NbtTemplate(BTreeMap<String, TagTemplate>);

impl NbtTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, template: TagTemplate) -> Self {
        self.0.insert(key.into(), template);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, template: TagTemplate) {
        self.0.insert(key.into(), template);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build the tag set, resolving every text leaf through `resolve`.
    ///
    /// Entries whose resolution fails are left out; the rest still build.
    pub fn build<F>(&self, mut resolve: F) -> TagCompound
    where
        F: FnMut(&str) -> Result<String, EvaluationError>,
    {
        self.0
            .iter()
            .filter_map(|(key, node)| build_node(node, &mut resolve).map(|v| (key.clone(), v)))
            .collect()
    }

    /// True when every text leaf is constant under `evaluator`.
    pub fn is_constant(&self, evaluator: &dyn ExpressionEvaluator) -> bool {
        self.0.values().all(|node| node_is_constant(node, evaluator))
    }

    /// Build with text leaves taken literally.
    pub fn to_literal(&self) -> TagCompound {
        self.build(|s| Ok(s.to_string()))
    }
}

fn build_node<F>(node: &TagTemplate, resolve: &mut F) -> Option<TagValue>
where
    F: FnMut(&str) -> Result<String, EvaluationError>,
{
    match node {
        TagTemplate::Text(text) => resolve(text).ok().map(TagValue::String),
        TagTemplate::Fixed(value) => Some(value.clone()),
        TagTemplate::List(items) => Some(TagValue::List(
            items.iter().filter_map(|n| build_node(n, resolve)).collect(),
        )),
        TagTemplate::Compound(entries) => Some(TagValue::Compound(
            entries
                .iter()
                .filter_map(|(k, n)| build_node(n, resolve).map(|v| (k.clone(), v)))
                .collect(),
        )),
    }
}

fn node_is_constant(node: &TagTemplate, evaluator: &dyn ExpressionEvaluator) -> bool {
    match node {
        TagTemplate::Text(text) => evaluator.is_constant(text),
        TagTemplate::Fixed(_) => true,
        TagTemplate::List(items) => items.iter().all(|n| node_is_constant(n, evaluator)),
        TagTemplate::Compound(entries) => entries.values().all(|n| node_is_constant(n, evaluator)),
    }
}

impl TagTemplate {
    /// Convert a JSON-like definition value. `null` has no tag form.
    pub fn from_json(value: &serde_json::Value) -> Option<TagTemplate> {
        use serde_json::Value as Json;
        match value {
            Json::Null => None,
            Json::Bool(b) => Some(TagTemplate::Fixed(TagValue::Byte(i8::from(*b)))),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(TagTemplate::Fixed(match i32::try_from(i) {
                        Ok(small) => TagValue::Int(small),
                        Err(_) => TagValue::Long(i),
                    }))
                } else {
                    n.as_f64().map(|f| TagTemplate::Fixed(TagValue::Double(f)))
                }
            }
            Json::String(s) => Some(TagTemplate::Text(s.clone())),
            Json::Array(items) => Some(TagTemplate::List(
                items.iter().filter_map(TagTemplate::from_json).collect(),
            )),
            Json::Object(map) => Some(TagTemplate::Compound(
                map.iter()
                    .filter_map(|(k, v)| TagTemplate::from_json(v).map(|t| (k.clone(), t)))
                    .collect(),
            )),
        }
    }
}
