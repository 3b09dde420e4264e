//! Capability Registry
//!
//! Table of registered providers keyed by namespace (item sources), by
//! namespace and id (element generators) or by name (activators). The table
//! is filled by the discovery scan through `&mut` access and then shared
//! read-only; registration after startup is not supported.

pub mod provider;

pub use provider::{
    DynActivator, ElementGenerator, GeneratedElement, ItemSourceProvider, MenuActivator,
    PluginHook,
};

use crate::error::RegistryError;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Provider kind of a registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CapabilityKind {
    ItemSource,
    Generator,
    Activator,
}

/// Composite key for element generators
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeneratorKey {
    pub namespace: String,
    pub id: String,
}

impl GeneratorKey {
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for GeneratorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.id)
    }
}

/// `(kind, key)` listing of one registration
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegistryEntry {
    pub kind: CapabilityKind,
    pub key: String,
}

#[derive(Default, Clone)]
pub struct CapabilityRegistry {
    item_sources: HashMap<String, Arc<dyn ItemSourceProvider>>,
    generators: HashMap<GeneratorKey, Arc<dyn ElementGenerator>>,
    activators: HashMap<String, Arc<dyn DynActivator>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register under `namespace`; an earlier provider under it is replaced.
    pub fn register_item_source_provider(
        &mut self,
        namespace: impl Into<String>,
        provider: Arc<dyn ItemSourceProvider>,
    ) {
        self.item_sources.insert(namespace.into(), provider);
    }

    pub fn register_element_generator(
        &mut self,
        namespace: impl Into<String>,
        id: impl Into<String>,
        generator: Arc<dyn ElementGenerator>,
    ) {
        self.generators
            .insert(GeneratorKey::new(namespace, id), generator);
    }

    pub fn register_activator(&mut self, name: impl Into<String>, activator: Arc<dyn DynActivator>) {
        self.activators.insert(name.into(), activator);
    }

    pub fn item_source_provider(&self, namespace: &str) -> Option<&Arc<dyn ItemSourceProvider>> {
        self.item_sources.get(namespace)
    }

    pub fn element_generator(&self, namespace: &str, id: &str) -> Option<&Arc<dyn ElementGenerator>> {
        self.generators.get(&GeneratorKey::new(namespace, id))
    }

    pub fn activator(&self, name: &str) -> Option<&Arc<dyn DynActivator>> {
        self.activators.get(name)
    }

    pub fn len(&self) -> usize {
        self.item_sources.len() + self.generators.len() + self.activators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registrations, sorted by kind then key
    pub fn entries(&self) -> Vec<RegistryEntry> {
        let mut entries: Vec<RegistryEntry> = self
            .item_sources
            .keys()
            .map(|k| RegistryEntry {
                kind: CapabilityKind::ItemSource,
                key: k.clone(),
            })
            .chain(self.generators.keys().map(|k| RegistryEntry {
                kind: CapabilityKind::Generator,
                key: k.to_string(),
            }))
            .chain(self.activators.keys().map(|k| RegistryEntry {
                kind: CapabilityKind::Activator,
                key: k.clone(),
            }))
            .collect();
        entries.sort();
        entries
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("entries", &self.entries())
            .finish()
    }
}

static GLOBAL: OnceLock<Arc<CapabilityRegistry>> = OnceLock::new();

/// Install the process-wide registry. Only the first call succeeds.
pub fn install(registry: CapabilityRegistry) -> Result<Arc<CapabilityRegistry>, RegistryError> {
    let shared = Arc::new(registry);
    GLOBAL
        .set(Arc::clone(&shared))
        .map_err(|_| RegistryError::AlreadyInstalled)?;
    Ok(shared)
}

/// The process-wide registry, once installed
pub fn global() -> Option<Arc<CapabilityRegistry>> {
    GLOBAL.get().cloned()
}
