//! Merge rules: scalar defaults applied before any file source.

use crate::config::{DEFAULT_GLOBAL_NODES_FILTER, DEFAULT_PLATFORM_VERSION, DEFAULT_WORKSPACE_FILTER};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("workspaces.file_listener", true)?
        .set_default("workspaces.filter", DEFAULT_WORKSPACE_FILTER)?
        .set_default("database.type", "SQLITE")?
        .set_default("kether.auto_placeholder_translate", true)?
        .set_default("menu.virtual_by_default", false)?
        .set_default("menu.enable_raw_title_in_vanilla_inventory", false)?
        .set_default("global_nodes.enabled", true)?
        .set_default("global_nodes.filter", DEFAULT_GLOBAL_NODES_FILTER)?
        .set_default("global_nodes.priority", "menu-first")?
        .set_default("render.platform_version", DEFAULT_PLATFORM_VERSION as i64)?
        .set_default("logging.level", "info")
}
