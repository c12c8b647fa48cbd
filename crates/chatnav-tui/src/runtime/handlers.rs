//! Effect handlers for the TUI runtime.
//!
//! These functions perform I/O only. They never touch state; the runtime
//! turns their failures into toasts.

use std::path::Path;

use anyhow::{Context, Result};
use chatnav_core::config::Config;

/// Writes the sidebar width preference, keeping every other config value.
pub fn persist_sidebar_width(config_path: &Path, width: u32) -> Result<()> {
    Config::save_sidebar_width_to(config_path, width)
        .with_context(|| format!("Failed to save sidebar width to {}", config_path.display()))?;
    tracing::info!(width, path = %config_path.display(), "sidebar width saved");
    Ok(())
}

pub fn open_url(url: &str) -> Result<()> {
    open::that(url).with_context(|| format!("Failed to open {url}"))?;
    tracing::info!(url, "opened link");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_sidebar_width_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        persist_sidebar_width(&path, 420).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.sidebar_width, 420);
    }

    #[test]
    fn test_persist_sidebar_width_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the write fail.
        let path = dir.path().join("config.toml");
        std::fs::create_dir(&path).unwrap();

        let err = persist_sidebar_width(&path, 420).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
