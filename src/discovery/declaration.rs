//! Provider declarations
//!
//! A declaration is the explicit stand-in for a marker annotation: the
//! capability kind, its keys, and a factory that builds the provider.

use crate::error::InstantiationError;
use crate::registry::{DynActivator, ElementGenerator, ItemSourceProvider};
use std::collections::HashSet;
use std::sync::Arc;

/// Namespace element generators register under when none is given
pub const DEFAULT_GENERATOR_NAMESPACE: &str = "Invero";

pub type Factory<T> = Box<dyn Fn() -> Result<T, InstantiationError> + Send + Sync>;

/// Answers whether an optional integration is present in this process
pub trait DependencyProbe {
    fn is_available(&self, dependency: &str) -> bool;
}

/// Probe over a fixed set of integration names
#[derive(Debug, Clone, Default)]
pub struct Integrations(HashSet<String>);

impl Integrations {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Integrations(names.into_iter().map(Into::into).collect())
    }
}

impl DependencyProbe for Integrations {
    fn is_available(&self, dependency: &str) -> bool {
        self.0.contains(dependency)
    }
}

/// Item-source provider declaration
pub struct ItemSourceDeclaration {
    pub(crate) class: String,
    pub(crate) namespaces: Vec<String>,
    pub(crate) requires: Vec<String>,
    pub(crate) factory: Factory<Arc<dyn ItemSourceProvider>>,
}

impl ItemSourceDeclaration {
    pub fn new<F>(class: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn ItemSourceProvider>, InstantiationError> + Send + Sync + 'static,
    {
        Self {
            class: class.into(),
            namespaces: Vec::new(),
            requires: Vec::new(),
            factory: Box::new(factory),
        }
    }

    pub fn namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    /// Integration that must be present for this provider to register
    pub fn requires(mut self, dependency: impl Into<String>) -> Self {
        self.requires.push(dependency.into());
        self
    }
}

/// Element generator declaration
pub struct GeneratorDeclaration {
    pub(crate) class: String,
    pub(crate) namespace: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) factory: Factory<Arc<dyn ElementGenerator>>,
}

impl GeneratorDeclaration {
    pub fn new<F>(class: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn ElementGenerator>, InstantiationError> + Send + Sync + 'static,
    {
        Self {
            class: class.into(),
            namespace: None,
            id: None,
            factory: Box::new(factory),
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub(crate) fn effective_namespace(&self) -> &str {
        self.namespace
            .as_deref()
            .unwrap_or(DEFAULT_GENERATOR_NAMESPACE)
    }
}

/// Activator declaration
pub struct ActivatorDeclaration {
    pub(crate) class: String,
    pub(crate) names: Vec<String>,
    pub(crate) requires: Vec<String>,
    pub(crate) factory: Factory<Arc<dyn DynActivator>>,
}

impl ActivatorDeclaration {
    pub fn new<F>(class: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn DynActivator>, InstantiationError> + Send + Sync + 'static,
    {
        Self {
            class: class.into(),
            names: Vec::new(),
            requires: Vec::new(),
            factory: Box::new(factory),
        }
    }

    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn requires(mut self, dependency: impl Into<String>) -> Self {
        self.requires.push(dependency.into());
        self
    }
}

/// Any provider declaration
pub enum Declaration {
    ItemSource(ItemSourceDeclaration),
    Generator(GeneratorDeclaration),
    Activator(ActivatorDeclaration),
}

impl Declaration {
    pub fn class(&self) -> &str {
        match self {
            Declaration::ItemSource(d) => &d.class,
            Declaration::Generator(d) => &d.class,
            Declaration::Activator(d) => &d.class,
        }
    }
}

impl From<ItemSourceDeclaration> for Declaration {
    fn from(d: ItemSourceDeclaration) -> Self {
        Declaration::ItemSource(d)
    }
}

impl From<GeneratorDeclaration> for Declaration {
    fn from(d: GeneratorDeclaration) -> Self {
        Declaration::Generator(d)
    }
}

impl From<ActivatorDeclaration> for Declaration {
    fn from(d: ActivatorDeclaration) -> Self {
        Declaration::Activator(d)
    }
}

/// A module that contributes providers, called once when the scanner is assembled
pub trait ProviderModule {
    fn declare(&self, declarations: &mut Vec<Declaration>);
}
