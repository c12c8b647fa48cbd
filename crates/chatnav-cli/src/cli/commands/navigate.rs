//! Interactive navigator command.

use anyhow::{Context, Result};
use chatnav_core::config::{Config, paths};
use chatnav_core::logging;
use chatnav_core::sessions::{ChatSession, ChatStore};

const DEMO_TOPICS: &[&str] = &[
    "Weekend trip itinerary",
    "Rust borrow checker questions",
    "Quarterly report outline",
    "Recipe ideas for dinner",
    "Job interview practice",
    "Translate a cover letter",
    "Explain quantum tunnelling",
    "Debug a flaky test",
];

pub fn run(seed_sessions: usize) -> Result<()> {
    let _log_guard = logging::init(&paths::logs_dir())?;

    let config_path = paths::config_path();
    let config = Config::load_from(&config_path).context("load config")?;
    tracing::info!(path = %config_path.display(), "config loaded");
    let store = demo_store(seed_sessions);

    chatnav_tui::run_interactive(config, store, config_path)
}

/// Builds a store with `count` demo conversations (one empty session for zero).
fn demo_store(count: usize) -> ChatStore {
    let sessions = (0..count)
        .map(|i| {
            let topic = DEMO_TOPICS[i % DEMO_TOPICS.len()];
            let topic = if i < DEMO_TOPICS.len() {
                topic.to_string()
            } else {
                format!("{topic} ({})", i / DEMO_TOPICS.len() + 1)
            };
            ChatSession::with_topic(topic, (i * 7) % 23 + 1)
        })
        .collect();
    ChatStore::with_sessions(sessions)
}
