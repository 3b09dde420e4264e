//! Integration tests for settings loading and reload notification

use super::test_utils::{item, viewer_context};
use invero::config::{
    ConfigLoader, InveroSettings, NodePriority, SettingChange, SettingsManager, SettingsObserver,
};
use invero::frame::Frame;
use invero::platform::Feature;
use invero::render::{Attribute, Renderer};
use parking_lot::Mutex;
use std::sync::Arc;
use tempfile::TempDir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Points HOME at an empty directory and clears the variables the loader reads.
struct IsolatedEnv {
    _home: TempDir,
    saved: Vec<(&'static str, Option<String>)>,
}

impl IsolatedEnv {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let keys = ["HOME", "XDG_CONFIG_HOME", "INVERO_ENV"];
        let saved = keys.iter().map(|k| (*k, std::env::var(k).ok())).collect();
        std::env::set_var("HOME", home.path());
        std::env::remove_var("XDG_CONFIG_HOME");
        std::env::remove_var("INVERO_ENV");
        Self { _home: home, saved }
    }
}

impl Drop for IsolatedEnv {
    fn drop(&mut self) {
        for (k, v) in &self.saved {
            match v {
                Some(v) => std::env::set_var(k, v),
                None => std::env::remove_var(k),
            }
        }
    }
}

fn write_workspace_config(root: &std::path::Path, name: &str, contents: &str) {
    let dir = root.join("config");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_environment_file_overrides_base_file() {
    let _lock = ENV_MUTEX.lock();
    let _env = IsolatedEnv::new();
    std::env::set_var("INVERO_ENV", "production");

    let workspace = TempDir::new().unwrap();
    write_workspace_config(
        workspace.path(),
        "config.toml",
        r#"
[workspaces]
paths = ["menus"]

[global_nodes]
priority = "global-first"

[render]
platform_version = 12004
"#,
    );
    write_workspace_config(
        workspace.path(),
        "production.toml",
        "[render]\nplatform_version = 12102\n",
    );

    let settings = ConfigLoader::load(workspace.path()).unwrap();
    assert_eq!(settings.workspaces.paths.len(), 1);
    assert_eq!(settings.global_nodes.priority, NodePriority::GlobalFirst);
    assert_eq!(settings.render.platform_version, 12102);
}

#[test]
fn test_render_settings_drive_the_renderer() {
    let _lock = ENV_MUTEX.lock();
    let _env = IsolatedEnv::new();

    let workspace = TempDir::new().unwrap();
    write_workspace_config(
        workspace.path(),
        "config.toml",
        r#"
[render]
platform_version = 12102
disabled_features = ["hide-tooltip"]
"#,
    );
    let settings = ConfigLoader::load(workspace.path()).unwrap();
    let platform = settings.render.platform();
    assert!(!platform.supports(Feature::HideTooltip));

    let frame = Frame::builder()
        .hide_tooltip("true")
        .item_model("invero:gem")
        .build();
    let resolution =
        Renderer::new(platform).resolve(item("stone"), &frame, &frame, &viewer_context(&[]));
    assert!(resolution.failed(Attribute::HideTooltip));
    assert!(!resolution.failed(Attribute::ItemModel));
    assert!(resolution.item.item_model.is_some());
}

#[test]
fn test_invalid_workspace_config_rejected() {
    let _lock = ENV_MUTEX.lock();
    let _env = IsolatedEnv::new();

    let workspace = TempDir::new().unwrap();
    write_workspace_config(workspace.path(), "config.toml", "[workspaces]\nfilter = \"\"\n");
    assert!(ConfigLoader::load(workspace.path()).is_err());
}

#[derive(Default)]
struct RawTitleToggle {
    seen: Mutex<Vec<SettingChange>>,
}

impl SettingsObserver for RawTitleToggle {
    fn settings_changed(&self, _settings: &InveroSettings, changes: &[SettingChange]) {
        self.seen.lock().extend(
            changes
                .iter()
                .filter(|c| c.key == "menu.enable_raw_title_in_vanilla_inventory")
                .cloned(),
        );
    }
}

#[test]
fn test_reload_notifies_observers_with_diff() {
    let _lock = ENV_MUTEX.lock();
    let _env = IsolatedEnv::new();

    let workspace = TempDir::new().unwrap();
    let manager = SettingsManager::new(ConfigLoader::load(workspace.path()).unwrap());
    let observer = Arc::new(RawTitleToggle::default());
    manager.subscribe(observer.clone());

    write_workspace_config(
        workspace.path(),
        "config.toml",
        "[menu]\nenable_raw_title_in_vanilla_inventory = true\n",
    );
    let changes = manager.reload(workspace.path()).unwrap();

    assert_eq!(changes.len(), 1);
    let seen = observer.seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].old, "false");
    assert_eq!(seen[0].new, "true");
    assert!(manager.get().menu.enable_raw_title_in_vanilla_inventory);
}
