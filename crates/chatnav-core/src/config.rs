//! Configuration management for chatnav.
//!
//! Loads configuration from ${CHATNAV_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Sidebar width used when nothing is configured, and when a narrow sidebar is expanded.
pub const DEFAULT_SIDEBAR_WIDTH: u32 = 300;

/// Modifier keys that can qualify a session-switching hotkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotkeyModifier {
    Ctrl,
    Alt,
    Super,
    Shift,
}

/// Session-switching hotkey configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeysConfig {
    /// Any of these modifiers plus ArrowUp/ArrowDown switches sessions.
    pub modifiers: Vec<HotkeyModifier>,
}

impl Default for HotkeysConfig {
    fn default() -> Self {
        Self {
            modifiers: vec![
                HotkeyModifier::Ctrl,
                HotkeyModifier::Alt,
                HotkeyModifier::Super,
            ],
        }
    }
}

/// Drag handle timing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Minimum interval between applied width updates while dragging.
    pub rate_limit_ms: u64,
    /// Press/release pairs shorter than this are treated as a toggle click.
    pub click_threshold_ms: u64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            rate_limit_ms: 50,
            click_threshold_ms: 300,
        }
    }
}

/// One action button in the announcement dialog.
///
/// An action without a `url` dismisses the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementActionConfig {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Announcement dialog content and initial visibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnouncementConfig {
    /// Whether the dialog is visible when the panel is first mounted.
    pub show_on_start: bool,
    pub title: String,
    pub body: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<AnnouncementActionConfig>,
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self {
            show_on_start: false,
            title: "Announcements".to_string(),
            body: vec!["No announcements yet.".to_string()],
            actions: Vec::new(),
        }
    }
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments and sections from the template are kept, user values win.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for chatnav configuration and data directories.
    //!
    //! CHATNAV_HOME resolution order:
    //! 1. CHATNAV_HOME environment variable (if set)
    //! 2. ~/.config/chatnav (default)
    //! 3. ./.chatnav when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the chatnav home directory.
    pub fn chatnav_home() -> PathBuf {
        if let Ok(home) = std::env::var("CHATNAV_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".chatnav"),
            |h| h.join(".config").join("chatnav"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        chatnav_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        chatnav_home().join("logs")
    }
}

/// Main configuration structure.
///
/// This is the configuration store the sidebar reads on every frame. The
/// sidebar width is the only field the sidebar itself writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sidebar width preference in pixels.
    pub sidebar_width: u32,

    /// Create a session directly instead of opening the mask picker.
    pub dont_show_mask_splash_screen: bool,

    #[serde(default)]
    pub hotkeys: HotkeysConfig,

    #[serde(default)]
    pub drag: DragConfig,

    #[serde(default)]
    pub announcement: AnnouncementConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
            dont_show_mask_splash_screen: false,
            hotkeys: HotkeysConfig::default(),
            drag: DragConfig::default(),
            announcement: AnnouncementConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies a batch of changes as one read-modify-write step.
    ///
    /// Returns true when the sidebar width changed.
    pub fn update(&mut self, apply: impl FnOnce(&mut Config)) -> bool {
        let previous_width = self.sidebar_width;
        apply(self);
        let changed = previous_width != self.sidebar_width;
        if changed {
            tracing::debug!(
                from = previous_width,
                to = self.sidebar_width,
                "sidebar width updated"
            );
        }
        changed
    }

    /// Saves only the sidebar_width field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    pub fn save_sidebar_width_to(path: &Path, width: u32) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["sidebar_width"] = value(i64::from(width));

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a config file from the default template.
    ///
    /// Fails if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.sidebar_width, DEFAULT_SIDEBAR_WIDTH);
        assert!(!config.dont_show_mask_splash_screen);
        assert!(!config.announcement.show_on_start);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "sidebar_width = 120\n[drag]\nrate_limit_ms = 16\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.sidebar_width, 120);
        assert_eq!(config.drag.rate_limit_ms, 16);
        assert_eq!(config.drag.click_threshold_ms, 300);
        assert_eq!(config.hotkeys.modifiers.len(), 3);
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.sidebar_width, defaults.sidebar_width);
        assert_eq!(config.hotkeys.modifiers, defaults.hotkeys.modifiers);
        assert_eq!(config.drag.rate_limit_ms, defaults.drag.rate_limit_ms);
        assert_eq!(config.announcement.title, defaults.announcement.title);
        assert_eq!(config.announcement.body, defaults.announcement.body);
    }

    #[test]
    fn test_announcement_actions_parse() {
        let toml = r#"
[announcement]
show_on_start = true

[[announcement.actions]]
label = "Docs"
url = "https://example.com/docs"

[[announcement.actions]]
label = "Chat"
url = "https://example.com/chat"

[[announcement.actions]]
label = "Got it"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.announcement.show_on_start);
        assert_eq!(config.announcement.actions.len(), 3);
        assert_eq!(config.announcement.actions[1].label, "Chat");
        assert_eq!(
            config.announcement.actions[0].url.as_deref(),
            Some("https://example.com/docs")
        );
        assert_eq!(config.announcement.actions[2].url, None);
    }

    #[test]
    fn test_update_reports_width_change() {
        let mut config = Config::default();
        assert!(config.update(|c| c.sidebar_width = 100));
        assert!(!config.update(|c| c.dont_show_mask_splash_screen = true));
        assert_eq!(config.sidebar_width, 100);
        assert!(config.dont_show_mask_splash_screen);
    }

    #[test]
    fn test_save_sidebar_width_creates_file_from_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");

        Config::save_sidebar_width_to(&config_path, 420).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("sidebar_width = 420"));
        assert!(contents.contains("# Skip the mask picker"));
        assert_eq!(Config::load_from(&config_path).unwrap().sidebar_width, 420);
    }

    #[test]
    fn test_save_sidebar_width_preserves_user_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "sidebar_width = 300\ndont_show_mask_splash_screen = true\n[hotkeys]\nmodifiers = [\"alt\"]\n",
        )
        .unwrap();

        Config::save_sidebar_width_to(&config_path, 100).unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.sidebar_width, 100);
        assert!(config.dont_show_mask_splash_screen);
        assert_eq!(config.hotkeys.modifiers, vec![HotkeyModifier::Alt]);
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "# existing").unwrap();

        let err = Config::init(&config_path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
