//! Full-screen sidebar navigator for chat sessions.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};
use std::path::PathBuf;

use anyhow::Result;
use chatnav_core::config::Config;
use chatnav_core::sessions::ChatStore;
pub use features::sidebar;
pub use runtime::TuiRuntime;

/// Runs the interactive navigator until the user quits.
pub fn run_interactive(config: Config, store: ChatStore, config_path: PathBuf) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!("chatnav requires a terminal.");
    }

    tracing::info!(
        sessions = store.sessions().len(),
        sidebar_width = config.sidebar_width,
        "starting navigator"
    );
    let mut runtime = TuiRuntime::new(config, store, config_path)?;
    runtime.run()?;
    tracing::info!("navigator closed");
    Ok(())
}
