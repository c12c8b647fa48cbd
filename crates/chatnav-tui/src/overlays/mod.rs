//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input
//! and mouse presses. Each overlay is self-contained: it owns its state, input
//! handlers, and render function.
//!
//! ## Module Structure
//!
//! - `announcement.rs`: Announcement dialog (notice button or Ctrl+G)
//! - `confirm_delete.rs`: Confirmation before deleting the current session
//! - `render_utils.rs`: Shared rendering utilities for overlays

pub mod announcement;
pub mod confirm_delete;
pub mod render_utils;

pub use announcement::{ActionKind, AnnouncementAction, AnnouncementState};
pub use confirm_delete::ConfirmDeleteState;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::mutations::StateMutation;

// ============================================================================
// OverlayRequest / OverlayTransition / OverlayUpdate
// ============================================================================

/// Requests to open a new overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRequest {
    Announcement,
    ConfirmDelete,
}

/// Transition returned by overlay input handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay input handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub mutations: Vec<StateMutation>,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            mutations: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_mutations(mut self, mutations: Vec<StateMutation>) -> Self {
        self.mutations = mutations;
        self
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

// ============================================================================
// Overlay
// ============================================================================

#[derive(Debug)]
pub enum Overlay {
    Announcement(AnnouncementState),
    ConfirmDelete(ConfirmDeleteState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::Announcement(a) => a.render(frame, area),
            Overlay::ConfirmDelete(c) => c.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Announcement(a) => a.handle_key(key),
            Overlay::ConfirmDelete(c) => c.handle_key(key),
        }
    }

    /// Handles a left click at (`column`, `row`) on a screen of size `area`.
    pub fn handle_click(&mut self, column: u16, row: u16, area: Rect) -> OverlayUpdate {
        match self {
            Overlay::Announcement(a) => a.handle_click(column, row, area),
            Overlay::ConfirmDelete(c) => c.handle_click(column, row, area),
        }
    }

    pub fn is_announcement(&self) -> bool {
        matches!(self, Overlay::Announcement(_))
    }
}

/// Routes a key to the active overlay, if any.
///
/// Returns `None` when no overlay is open so the caller can handle the key.
pub fn handle_overlay_key(overlay: &mut Option<Overlay>, key: KeyEvent) -> Option<OverlayUpdate> {
    overlay.as_mut().map(|overlay| overlay.handle_key(key))
}

// ============================================================================
// OverlayExt - Extension trait for Option<Overlay>
// ============================================================================

/// Extension trait for `Option<Overlay>` providing convenience render helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some(overlay) = self {
            overlay.render(frame, area);
        }
    }
}
