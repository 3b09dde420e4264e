//! Discovery Scanner
//!
//! Runs once during the `Active` startup phase. Walks every declared provider,
//! builds it and registers it into a fresh [`CapabilityRegistry`].
//!
//! Failure isolation differs by kind:
//! - item sources: an unavailable dependency (probe or factory) or an
//!   unhooked conditional hook skips the provider; other failures are fatal;
//! - element generators: a missing id skips; any construction failure is fatal;
//! - activators: any failure skips that activator.

pub mod declaration;

pub use declaration::{
    ActivatorDeclaration, Declaration, DependencyProbe, GeneratorDeclaration, Integrations,
    ItemSourceDeclaration, ProviderModule, DEFAULT_GENERATOR_NAMESPACE,
};

use crate::error::DiscoveryError;
use crate::registry::{CapabilityKind, CapabilityRegistry, RegistryEntry};
use tracing::{debug, info};

/// Host startup phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifeCycle {
    Const,
    Init,
    Load,
    Enable,
    Active,
    Disable,
}

/// Why a declaration produced no registry entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Optional integration absent
    MissingDependency(String),
    /// Conditional hook reported itself inactive
    NotHooked,
    /// Generator declared without an id
    MissingId,
    /// Activator could not be built
    ActivatorFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub class: String,
    pub reason: SkipReason,
}

/// What a scan registered and what it passed over
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub registered: Vec<RegistryEntry>,
    pub skipped: Vec<Skipped>,
}

impl ScanReport {
    pub fn skipped_class(&self, class: &str) -> Option<&SkipReason> {
        self.skipped
            .iter()
            .find(|s| s.class == class)
            .map(|s| &s.reason)
    }

    fn skip(&mut self, class: &str, reason: SkipReason) {
        self.skipped.push(Skipped {
            class: class.to_string(),
            reason,
        });
    }

    fn record(&mut self, kind: CapabilityKind, key: String) {
        self.registered.push(RegistryEntry { kind, key });
    }
}

/// Result of a successful scan
#[derive(Debug)]
pub struct Discovery {
    pub registry: CapabilityRegistry,
    pub report: ScanReport,
}

/// Collects declarations and registers them in one pass
#[derive(Default)]
pub struct DiscoveryScanner {
    declarations: Vec<Declaration>,
}

impl DiscoveryScanner {
    /// The only phase a scan may run in
    pub const LIFECYCLE: LifeCycle = LifeCycle::Active;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, declaration: impl Into<Declaration>) -> &mut Self {
        self.declarations.push(declaration.into());
        self
    }

    pub fn install_module(&mut self, module: &dyn ProviderModule) -> &mut Self {
        module.declare(&mut self.declarations);
        self
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Build every declared provider and register it.
    ///
    /// Declarations are visited in order, so a later registration under an
    /// existing key replaces the earlier one.
    pub fn scan(
        &self,
        phase: LifeCycle,
        probe: &dyn DependencyProbe,
    ) -> Result<Discovery, DiscoveryError> {
        if phase != Self::LIFECYCLE {
            return Err(DiscoveryError::WrongLifeCycle {
                expected: Self::LIFECYCLE,
                actual: phase,
            });
        }

        let mut registry = CapabilityRegistry::new();
        let mut report = ScanReport::default();

        for declaration in &self.declarations {
            match declaration {
                Declaration::ItemSource(decl) => {
                    visit_item_source(decl, probe, &mut registry, &mut report)?
                }
                Declaration::Generator(decl) => visit_generator(decl, &mut registry, &mut report)?,
                Declaration::Activator(decl) => {
                    visit_activator(decl, probe, &mut registry, &mut report)
                }
            }
        }

        info!(
            declarations = self.declarations.len(),
            registered = report.registered.len(),
            skipped = report.skipped.len(),
            "Discovery scan complete"
        );
        Ok(Discovery { registry, report })
    }
}

fn first_missing<'a>(requires: &'a [String], probe: &dyn DependencyProbe) -> Option<&'a String> {
    requires.iter().find(|dep| !probe.is_available(dep))
}

fn visit_item_source(
    decl: &ItemSourceDeclaration,
    probe: &dyn DependencyProbe,
    registry: &mut CapabilityRegistry,
    report: &mut ScanReport,
) -> Result<(), DiscoveryError> {
    if let Some(dep) = first_missing(&decl.requires, probe) {
        report.skip(&decl.class, SkipReason::MissingDependency(dep.clone()));
        return Ok(());
    }

    let provider = match (decl.factory)() {
        Ok(provider) => provider,
        Err(e) if e.is_missing_dependency() => {
            report.skip(&decl.class, SkipReason::MissingDependency(e.to_string()));
            return Ok(());
        }
        Err(source) => {
            return Err(DiscoveryError::Instantiation {
                class: decl.class.clone(),
                source,
            })
        }
    };

    if provider.as_hook().is_some_and(|hook| !hook.is_hooked()) {
        report.skip(&decl.class, SkipReason::NotHooked);
        return Ok(());
    }

    for namespace in &decl.namespaces {
        debug!(class = %decl.class, %namespace, "Registered item source provider");
        registry.register_item_source_provider(namespace.clone(), provider.clone());
        report.record(CapabilityKind::ItemSource, namespace.clone());
    }
    Ok(())
}

fn visit_generator(
    decl: &GeneratorDeclaration,
    registry: &mut CapabilityRegistry,
    report: &mut ScanReport,
) -> Result<(), DiscoveryError> {
    let Some(id) = decl.id.as_deref() else {
        debug!(class = %decl.class, "Element generator declared without id, skipping");
        report.skip(&decl.class, SkipReason::MissingId);
        return Ok(());
    };

    let generator = (decl.factory)().map_err(|source| DiscoveryError::Instantiation {
        class: decl.class.clone(),
        source,
    })?;

    let namespace = decl.effective_namespace();
    debug!(class = %decl.class, %namespace, %id, "Registered element generator");
    registry.register_element_generator(namespace, id, generator);
    report.record(CapabilityKind::Generator, format!("{}:{}", namespace, id));
    Ok(())
}

fn visit_activator(
    decl: &ActivatorDeclaration,
    probe: &dyn DependencyProbe,
    registry: &mut CapabilityRegistry,
    report: &mut ScanReport,
) {
    if let Some(dep) = first_missing(&decl.requires, probe) {
        report.skip(&decl.class, SkipReason::MissingDependency(dep.clone()));
        return;
    }

    let activator = match (decl.factory)() {
        Ok(activator) => activator,
        Err(e) => {
            report.skip(&decl.class, SkipReason::ActivatorFailed(e.to_string()));
            return;
        }
    };

    for name in &decl.names {
        debug!(class = %decl.class, %name, "Registered activator");
        registry.register_activator(name.clone(), activator.clone());
        report.record(CapabilityKind::Activator, name.clone());
    }
}
