//! Startup discovery: registration and failure isolation

use super::test_utils::viewer_context;
use invero::context::Context;
use invero::discovery::{
    ActivatorDeclaration, Declaration, DiscoveryScanner, GeneratorDeclaration, Integrations,
    ItemSourceDeclaration, LifeCycle, ProviderModule, SkipReason, DEFAULT_GENERATOR_NAMESPACE,
};
use invero::error::{ActivatorError, DiscoveryError, GeneratorError, InstantiationError};
use invero::item::{ItemStack, NamespacedKey};
use invero::providers::BuiltinModule;
use invero::registry::{
    CapabilityKind, ElementGenerator, GeneratedElement, ItemSourceProvider, MenuActivator,
};
use serde::Deserialize;
use std::sync::Arc;

struct MythicSource;

impl ItemSourceProvider for MythicSource {
    fn get_item(&self, identifier: &str, _context: &Context) -> Option<ItemStack> {
        let mut item = ItemStack::new(NamespacedKey::minecraft("iron_sword").ok()?);
        item.display_name = Some(identifier.to_string());
        Some(item)
    }
}

struct OnlinePlayers;

impl ElementGenerator for OnlinePlayers {
    fn generate(&self, _context: &Context) -> Result<Vec<GeneratedElement>, GeneratorError> {
        Ok(["Alex", "Steve"]
            .into_iter()
            .map(|name| GeneratedElement::new().with("player", name))
            .collect())
    }
}

#[derive(Deserialize)]
struct CommandPayload {
    commands: Vec<String>,
}

struct CommandActivator;

impl MenuActivator for CommandActivator {
    type Payload = CommandPayload;

    fn activate(&self, payload: &CommandPayload, context: &Context) -> Result<bool, ActivatorError> {
        let issued = context.scope().variable("command").unwrap_or_default();
        Ok(payload.commands.iter().any(|c| c == issued))
    }
}

struct ThirdPartyModule;

impl ProviderModule for ThirdPartyModule {
    fn declare(&self, declarations: &mut Vec<Declaration>) {
        declarations.push(
            ItemSourceDeclaration::new("MythicSource", || Ok(Arc::new(MythicSource)))
                .namespaces(["mythic", "mm"])
                .requires("MythicMobs")
                .into(),
        );
        declarations.push(
            ItemSourceDeclaration::new("ItemsAdderSource", || {
                Err(InstantiationError::wrap(
                    "ItemsAdderSource failed to initialise",
                    InstantiationError::MissingDependency("dev.lone.itemsadder.api".to_string()),
                ))
            })
            .namespaces(["ia"])
            .into(),
        );
    }
}

fn full_scanner() -> DiscoveryScanner {
    let mut scanner = DiscoveryScanner::new();
    scanner
        .install_module(&BuiltinModule)
        .install_module(&ThirdPartyModule)
        .declare(
            GeneratorDeclaration::new("OnlinePlayers", || Ok(Arc::new(OnlinePlayers)))
                .id("online_players"),
        )
        .declare(
            ActivatorDeclaration::new("CommandActivator", || Ok(Arc::new(CommandActivator)))
                .names(["command"]),
        );
    scanner
}

#[test]
fn test_scan_registers_available_providers() {
    let discovery = full_scanner()
        .scan(LifeCycle::Active, &Integrations::of(["MythicMobs"]))
        .unwrap();
    let registry = discovery.registry;

    let ctx = viewer_context(&[]);
    let sword = registry
        .item_source_provider("mm")
        .and_then(|p| p.get_item("Frostmourne", &ctx))
        .unwrap();
    assert_eq!(sword.display_name.as_deref(), Some("Frostmourne"));
    assert!(registry.item_source_provider("minecraft").is_some());

    let generator = registry
        .element_generator(DEFAULT_GENERATOR_NAMESPACE, "online_players")
        .unwrap();
    let elements = generator.generate(&ctx).unwrap();
    assert_eq!(elements.len(), 2);
    let bound = elements[0].bind(&ctx);
    assert_eq!(bound.parse_text("{{player}}").unwrap(), "Alex");

    let activator = registry.activator("command").unwrap();
    let ctx = ctx.with_variable("command", "shop");
    let payload = serde_json::json!({"commands": ["shop"]});
    assert_eq!(activator.activate_raw(&payload, &ctx), Ok(true));

    assert!(registry.item_source_provider("ia").is_none());
    assert_eq!(
        discovery
            .report
            .skipped_class("ItemsAdderSource")
            .map(|r| matches!(r, SkipReason::MissingDependency(_))),
        Some(true)
    );
}

#[test]
fn test_absent_integration_is_not_an_error() {
    let discovery = full_scanner()
        .scan(LifeCycle::Active, &Integrations::none())
        .unwrap();
    assert!(discovery.registry.item_source_provider("mythic").is_none());
    assert!(discovery.registry.item_source_provider("mm").is_none());
    assert_eq!(
        discovery.report.skipped_class("MythicSource"),
        Some(&SkipReason::MissingDependency("MythicMobs".to_string()))
    );
}

#[test]
fn test_class_not_found_yields_no_entries() {
    let mut scanner = DiscoveryScanner::new();
    scanner.declare(
        ItemSourceDeclaration::new("OraxenSource", || {
            Err(InstantiationError::MissingDependency("io.th0rgal.oraxen".to_string()))
        })
        .namespaces(["oraxen"]),
    );
    let discovery = scanner.scan(LifeCycle::Active, &Integrations::none()).unwrap();
    assert!(discovery.registry.is_empty());
    assert!(discovery.report.registered.is_empty());
}

#[test]
fn test_generator_without_id_is_skipped() {
    let mut scanner = DiscoveryScanner::new();
    scanner.declare(GeneratorDeclaration::new("Anonymous", || Ok(Arc::new(OnlinePlayers))));
    let discovery = scanner.scan(LifeCycle::Active, &Integrations::none()).unwrap();
    assert!(discovery.registry.is_empty());
    assert_eq!(
        discovery.report.skipped_class("Anonymous"),
        Some(&SkipReason::MissingId)
    );
}

#[test]
fn test_generator_construction_failure_aborts_scan() {
    let mut scanner = DiscoveryScanner::new();
    scanner.declare(
        GeneratorDeclaration::new("Exploding", || {
            Err(InstantiationError::Failed("constructor threw".to_string()))
        })
        .id("boom"),
    );
    match scanner.scan(LifeCycle::Active, &Integrations::none()) {
        Err(DiscoveryError::Instantiation { class, .. }) => assert_eq!(class, "Exploding"),
        other => panic!("expected instantiation failure, got {:?}", other.map(|d| d.report)),
    }
}

#[test]
fn test_item_source_generic_failure_aborts_scan() {
    let mut scanner = DiscoveryScanner::new();
    scanner.declare(
        ItemSourceDeclaration::new("Broken", || {
            Err(InstantiationError::Failed("bad state".to_string()))
        })
        .namespaces(["broken"]),
    );
    assert!(matches!(
        scanner.scan(LifeCycle::Active, &Integrations::none()),
        Err(DiscoveryError::Instantiation { .. })
    ));
}

#[test]
fn test_later_declaration_replaces_earlier() {
    struct Named(&'static str);

    impl ItemSourceProvider for Named {
        fn get_item(&self, _identifier: &str, _context: &Context) -> Option<ItemStack> {
            NamespacedKey::minecraft(self.0).ok().map(ItemStack::new)
        }
    }

    let mut scanner = DiscoveryScanner::new();
    scanner
        .declare(ItemSourceDeclaration::new("First", || Ok(Arc::new(Named("stone")))).namespaces(["x"]))
        .declare(ItemSourceDeclaration::new("Second", || Ok(Arc::new(Named("dirt")))).namespaces(["x"]));

    let discovery = scanner.scan(LifeCycle::Active, &Integrations::none()).unwrap();
    let item = discovery
        .registry
        .item_source_provider("x")
        .and_then(|p| p.get_item("any", &viewer_context(&[])))
        .unwrap();
    assert_eq!(item.material.key(), "dirt");
    assert_eq!(discovery.report.registered.len(), 2);
    assert_eq!(
        discovery
            .registry
            .entries()
            .iter()
            .filter(|e| e.kind == CapabilityKind::ItemSource)
            .count(),
        1
    );
}

#[test]
fn test_scan_outside_active_phase_rejected() {
    let result = full_scanner().scan(LifeCycle::Load, &Integrations::none());
    assert!(matches!(
        result,
        Err(DiscoveryError::WrongLifeCycle {
            expected: LifeCycle::Active,
            actual: LifeCycle::Load
        })
    ));
}
