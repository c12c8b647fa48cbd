//! UI event types.
//!
//! All external inputs are converted to `UiEvent` before being processed by
//! the reducer.

use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Periodic tick; expires toasts and triggers a render.
    Tick,
    /// Emitted before each batch with the current terminal size.
    Frame { width: u16, height: u16 },
    /// Raw terminal input (keys, mouse, resize).
    Terminal(CrosstermEvent),
}
