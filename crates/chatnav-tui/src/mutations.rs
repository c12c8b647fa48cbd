//! Cross-slice state mutations.
//!
//! Sidebar handlers and overlays return these mutations to request changes
//! outside their own slice. The main reducer applies them in order.

use crate::sidebar::Route;

/// Mutations for cross-slice state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateMutation {
    Session(SessionMutation),
    Config(ConfigMutation),
    Navigate(Route),
    ShowToast(String),
}

/// Session store changes, delegated to the store as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMutation {
    Select(usize),
    Create,
    Delete(usize),
}

/// Config store changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigMutation {
    SetSidebarWidth(u32),
}
