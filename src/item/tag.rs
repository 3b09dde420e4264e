//! NBT tag values attached to items.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TagValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    List(Vec<TagValue>),
    Compound(TagCompound),
}

/// Ordered key → tag map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagCompound(BTreeMap<String, TagValue>);

impl TagCompound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: TagValue) -> Option<TagValue> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<TagValue> {
        self.0.remove(key)
    }

    /// Shallow overlay: top-level keys of `other` replace ours.
    pub fn put_all(&mut self, other: &TagCompound) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TagValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, TagValue)> for TagCompound {
    fn from_iter<I: IntoIterator<Item = (String, TagValue)>>(iter: I) -> Self {
        TagCompound(iter.into_iter().collect())
    }
}
