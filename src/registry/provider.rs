//! Provider capability interfaces stored by the registry.

use crate::context::Context;
use crate::error::{ActivatorError, GeneratorError};
use crate::item::ItemStack;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Optional integration that can report whether it is live
pub trait PluginHook {
    fn is_hooked(&self) -> bool;
}

/// Produces base items for one or more namespaces
pub trait ItemSourceProvider: Send + Sync {
    /// Item for `identifier` (the part after `namespace:`), if known.
    fn get_item(&self, identifier: &str, context: &Context) -> Option<ItemStack>;

    /// Conditional-hook capability, consulted before registration.
    fn as_hook(&self) -> Option<&dyn PluginHook> {
        None
    }
}

/// One generated element: the variables it binds for its frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedElement {
    pub variables: BTreeMap<String, String>,
}

impl GeneratedElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Context for rendering this element's frame
    pub fn bind(&self, context: &Context) -> Context {
        self.variables
            .iter()
            .fold(context.clone(), |ctx, (k, v)| ctx.with_variable(k.as_str(), v.as_str()))
    }
}

/// Produces higher-level UI elements, e.g. one per online player
pub trait ElementGenerator: Send + Sync {
    fn generate(&self, context: &Context) -> Result<Vec<GeneratedElement>, GeneratorError>;
}

/// Opens menus in response to some trigger, configured by a typed payload
pub trait MenuActivator: Send + Sync {
    type Payload: DeserializeOwned;

    /// Decode the activator section of a menu definition.
    fn decode(&self, raw: &serde_json::Value) -> Result<Self::Payload, ActivatorError> {
        Ok(serde_json::from_value(raw.clone())?)
    }

    /// Handle the trigger; `true` when the menu should open.
    fn activate(&self, payload: &Self::Payload, context: &Context) -> Result<bool, ActivatorError>;
}

/// Payload-erased activator as stored in the registry
pub trait DynActivator: Send + Sync {
    fn activate_raw(&self, raw: &serde_json::Value, context: &Context)
        -> Result<bool, ActivatorError>;
}

impl<A: MenuActivator> DynActivator for A {
    fn activate_raw(
        &self,
        raw: &serde_json::Value,
        context: &Context,
    ) -> Result<bool, ActivatorError> {
        let payload = self.decode(raw)?;
        self.activate(&payload, context)
    }
}
