//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.

mod handlers;

use std::io::Stdout;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chatnav_core::config::Config;
use chatnav_core::sessions::ChatStore;
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::common::SystemClock;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Frame budget while the user is interacting (about 60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle. Longer timeout reduces CPU usage.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop and panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// Where width changes are persisted.
    config_path: PathBuf,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    pub fn new(config: Config, store: ChatStore, config_path: PathBuf) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let state = AppState::new(config, store, Rc::new(SystemClock::new()));

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            config_path,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Mounts the sidebar, runs the event loop and unmounts on the way out.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_mouse_capture()?;

        let effects = update::mount(&mut self.state);
        self.execute_effects(effects);

        let result = self.event_loop();

        update::unmount(&mut self.state);
        let _ = terminal::disable_mouse_capture();

        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let mut events = self.collect_events()?;

            // Frame goes first so the layout binding is current for hit-testing.
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                    dirty = true;
                }
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }

                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Poll fast while dragging, while a toast is counting down, or right
        // after input. Otherwise poll slowly to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tui.sidebar.drag.is_dragging()
            || self.state.tui.toast.is_some()
            || recent_terminal_activity;

        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        if event::poll(time_until_tick)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::OpenBrowser { url } => {
                if let Err(error) = handlers::open_url(&url) {
                    tracing::warn!(error = %format!("{error:#}"), "open link failed");
                    self.state.tui.show_toast(format!("Could not open {url}"));
                }
            }
            UiEffect::PersistSidebarWidth { width } => {
                if let Err(error) = handlers::persist_sidebar_width(&self.config_path, width) {
                    tracing::warn!(error = %format!("{error:#}"), "persist sidebar width failed");
                    self.state.tui.show_toast("Could not save sidebar width");
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
