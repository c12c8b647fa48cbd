//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── config: Config           (width preference, hotkeys, dialog content)
//! │   ├── store: ChatStore         (sessions and current index)
//! │   ├── route: Route             (what the main area shows)
//! │   ├── sidebar: SidebarState    (drag controller, hotkeys, layout binding)
//! │   ├── surface: EventSurface    (listener registrations)
//! │   └── toast: Option<Toast>
//! └── overlay: Option<Overlay>     (announcement dialog, delete confirmation)
//! ```
//!
//! State is split so overlay handlers can borrow the overlay mutably while
//! the reducer still holds `&mut TuiState`.

use std::rc::Rc;

use chatnav_core::config::Config;
use chatnav_core::sessions::ChatStore;

use crate::common::{Clock, EventSurface};
use crate::overlays::Overlay;
use crate::sidebar::{Route, SidebarState};

/// How long a toast stays on the status line.
pub const TOAST_DURATION_MS: u64 = 3000;

// ============================================================================
// AppState (Combined State)
// ============================================================================

pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config, store: ChatStore, clock: Rc<dyn Clock>) -> Self {
        Self {
            tui: TuiState::new(config, store, clock),
            overlay: None,
        }
    }

    /// Whether the announcement dialog is currently open.
    pub fn announcement_visible(&self) -> bool {
        self.overlay.as_ref().is_some_and(Overlay::is_announcement)
    }
}

// ============================================================================
// Toast
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub shown_at_ms: u64,
}

impl Toast {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.shown_at_ms) >= TOAST_DURATION_MS
    }
}

// ============================================================================
// TuiState
// ============================================================================

/// Non-overlay UI state.
pub struct TuiState {
    pub should_quit: bool,
    pub config: Config,
    pub store: ChatStore,
    pub route: Route,
    pub sidebar: SidebarState,
    pub surface: EventSurface,
    pub clock: Rc<dyn Clock>,
    pub toast: Option<Toast>,
}

impl TuiState {
    pub fn new(config: Config, store: ChatStore, clock: Rc<dyn Clock>) -> Self {
        let sidebar = SidebarState::new(&config);
        Self {
            should_quit: false,
            config,
            store,
            route: Route::default(),
            sidebar,
            surface: EventSurface::new(),
            clock,
            toast: None,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "toast");
        self.toast = Some(Toast {
            message,
            shown_at_ms: self.now_ms(),
        });
    }

    /// Drops the toast once it has been visible long enough.
    pub fn expire_toast(&mut self) {
        let now = self.now_ms();
        if self.toast.as_ref().is_some_and(|toast| toast.is_expired(now)) {
            self.toast = None;
        }
    }
}
