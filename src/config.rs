//! Configuration System
//!
//! Settings are loaded into an immutable [`InveroSettings`] snapshot from
//! layered sources: defaults, the global config file, workspace files and
//! `INVERO__SECTION__KEY` environment variables. A reload produces a new
//! snapshot; [`SettingsManager`] swaps it in and tells observers which keys
//! changed.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::platform::{Feature, Platform};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

mod merge;
mod sources;

/// Platform version assumed when the host does not report one
pub const DEFAULT_PLATFORM_VERSION: u32 = 12105;

/// Menu definition file name filter
pub const DEFAULT_WORKSPACE_FILTER: &str = r"^(?![#!]).*\.(?i)(conf|hocon|yaml|yml|json)$";

/// Global node file name filter
pub const DEFAULT_GLOBAL_NODES_FILTER: &str =
    r"^(?![#!]).*\.(?i)(conf|hocon|yaml|yml|toml|json)$";

/// Root settings snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InveroSettings {
    pub workspaces: WorkspaceSettings,
    pub database: DatabaseSettings,
    pub kether: KetherSettings,
    pub menu: MenuSettings,
    pub global_nodes: GlobalNodeSettings,
    pub render: RenderSettings,
    pub logging: LoggingConfig,
}

/// Where menu definitions are loaded from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    pub paths: Vec<PathBuf>,
    /// Reload menus when their files change
    pub file_listener: bool,
    pub filter: String,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            file_listener: true,
            filter: DEFAULT_WORKSPACE_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseType {
    #[default]
    #[serde(rename = "SQLITE")]
    Sqlite,
    #[serde(rename = "SQL")]
    Sql,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    #[serde(rename = "type")]
    pub kind: DatabaseType,
    /// Connection section, only read for [`DatabaseType::Sql`]
    pub sql: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KetherSettings {
    pub auto_placeholder_translate: bool,
}

impl Default for KetherSettings {
    fn default() -> Self {
        Self {
            auto_placeholder_translate: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    pub virtual_by_default: bool,
    pub enable_raw_title_in_vanilla_inventory: bool,
}

/// Lookup order between a menu's own nodes and global nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodePriority {
    #[default]
    MenuFirst,
    GlobalFirst,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalNodeSettings {
    pub enabled: bool,
    pub paths: Vec<PathBuf>,
    pub filter: String,
    pub priority: NodePriority,
}

impl Default for GlobalNodeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            paths: Vec::new(),
            filter: DEFAULT_GLOBAL_NODES_FILTER.to_string(),
            priority: NodePriority::MenuFirst,
        }
    }
}

/// Host platform description used by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub platform_version: u32,
    /// Features the host reports as unsupported despite its version
    pub disabled_features: Vec<Feature>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            platform_version: DEFAULT_PLATFORM_VERSION,
            disabled_features: Vec::new(),
        }
    }
}

impl RenderSettings {
    pub fn platform(&self) -> Platform {
        self.disabled_features
            .iter()
            .fold(Platform::new(self.platform_version), |p, f| p.without(*f))
    }
}

/// One key whose value differs between two snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingChange {
    pub key: &'static str,
    pub old: String,
    pub new: String,
}

impl fmt::Display for SettingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.key, self.old, self.new)
    }
}

impl InveroSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workspaces.filter.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "workspaces.filter cannot be empty".to_string(),
            ));
        }
        if self.global_nodes.filter.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "global_nodes.filter cannot be empty".to_string(),
            ));
        }
        if self.render.platform_version == 0 {
            return Err(ConfigError::Invalid(
                "render.platform_version must be a positive version id".to_string(),
            ));
        }
        Ok(())
    }

    /// Keys whose values differ from `old`
    pub fn changes_from(&self, old: &InveroSettings) -> Vec<SettingChange> {
        let mut changes = Vec::new();
        macro_rules! diff {
            ($key:literal, $($field:ident).+) => {
                if old.$($field).+ != self.$($field).+ {
                    changes.push(SettingChange {
                        key: $key,
                        old: format!("{:?}", old.$($field).+),
                        new: format!("{:?}", self.$($field).+),
                    });
                }
            };
        }
        diff!("workspaces.paths", workspaces.paths);
        diff!("workspaces.file_listener", workspaces.file_listener);
        diff!("workspaces.filter", workspaces.filter);
        diff!("database.type", database.kind);
        diff!("database.sql", database.sql);
        diff!(
            "kether.auto_placeholder_translate",
            kether.auto_placeholder_translate
        );
        diff!("menu.virtual_by_default", menu.virtual_by_default);
        diff!(
            "menu.enable_raw_title_in_vanilla_inventory",
            menu.enable_raw_title_in_vanilla_inventory
        );
        diff!("global_nodes.enabled", global_nodes.enabled);
        diff!("global_nodes.paths", global_nodes.paths);
        diff!("global_nodes.filter", global_nodes.filter);
        diff!("global_nodes.priority", global_nodes.priority);
        diff!("render.platform_version", render.platform_version);
        diff!("render.disabled_features", render.disabled_features);
        diff!("logging", logging);
        changes
    }
}

/// Loads settings from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings for `workspace_root`.
    pub fn load(workspace_root: &Path) -> Result<InveroSettings, ConfigError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let settings: InveroSettings = builder
            .add_source(
                config::Environment::with_prefix("INVERO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a single file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<InveroSettings, ConfigError> {
        let settings: InveroSettings = merge::merge_policy::builder_with_defaults()?
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Global config file location, if one can be determined
    pub fn xdg_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }
}

/// Receives the diff whenever a new snapshot is applied
pub trait SettingsObserver: Send + Sync {
    fn settings_changed(&self, settings: &InveroSettings, changes: &[SettingChange]);
}

/// Holds the current snapshot and its observers
pub struct SettingsManager {
    current: RwLock<Arc<InveroSettings>>,
    observers: RwLock<Vec<Arc<dyn SettingsObserver>>>,
}

impl SettingsManager {
    pub fn new(settings: InveroSettings) -> Self {
        Self {
            current: RwLock::new(Arc::new(settings)),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Current snapshot
    pub fn get(&self) -> Arc<InveroSettings> {
        Arc::clone(&self.current.read())
    }

    pub fn subscribe(&self, observer: Arc<dyn SettingsObserver>) {
        self.observers.write().push(observer);
    }

    /// Validate and swap in `settings`, then notify observers if anything changed.
    pub fn apply(&self, settings: InveroSettings) -> Result<Vec<SettingChange>, ConfigError> {
        settings.validate()?;
        let settings = Arc::new(settings);
        let changes = {
            let mut current = self.current.write();
            let changes = settings.changes_from(&current);
            *current = Arc::clone(&settings);
            changes
        };

        if !changes.is_empty() {
            for change in &changes {
                info!(key = change.key, old = %change.old, new = %change.new, "Setting changed");
            }
            let observers = self.observers.read().clone();
            for observer in observers {
                observer.settings_changed(&settings, &changes);
            }
        }
        Ok(changes)
    }

    /// Reload from `workspace_root` and apply the result.
    pub fn reload(&self, workspace_root: &Path) -> Result<Vec<SettingChange>, ConfigError> {
        self.apply(ConfigLoader::load(workspace_root)?)
    }
}
