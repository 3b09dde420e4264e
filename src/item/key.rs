//! Namespaced identifiers (`namespace:key`).

use crate::error::RenderError;
use std::fmt;
use std::str::FromStr;

pub const MINECRAFT_NAMESPACE: &str = "minecraft";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamespacedKey {
    namespace: String,
    key: String,
}

impl NamespacedKey {
    pub fn air() -> Self {
        Self {
            namespace: MINECRAFT_NAMESPACE.to_string(),
            key: "air".to_string(),
        }
    }

    pub fn minecraft(key: &str) -> Result<Self, RenderError> {
        Self::new(MINECRAFT_NAMESPACE, key)
    }

    pub fn new(namespace: &str, key: &str) -> Result<Self, RenderError> {
        let valid = !namespace.is_empty()
            && !key.is_empty()
            && namespace.chars().all(is_namespace_char)
            && key.chars().all(is_key_char);
        if !valid {
            return Err(RenderError::MalformedKey(format!("{}:{}", namespace, key)));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            key: key.to_string(),
        })
    }

    /// Parse `namespace:key`; a missing or empty namespace means `minecraft`.
    pub fn parse(input: &str) -> Result<Self, RenderError> {
        let malformed = || RenderError::MalformedKey(input.to_string());
        let mut parts = input.split(':');
        let first = parts.next().ok_or_else(malformed)?;
        match (parts.next(), parts.next()) {
            (None, _) => Self::minecraft(first).map_err(|_| malformed()),
            (Some(key), None) => {
                let namespace = if first.is_empty() {
                    MINECRAFT_NAMESPACE
                } else {
                    first
                };
                Self::new(namespace, key).map_err(|_| malformed())
            }
            _ => Err(malformed()),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-')
}

fn is_key_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.key)
    }
}

impl FromStr for NamespacedKey {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
