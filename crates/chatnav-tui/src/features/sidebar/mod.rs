//! Sidebar panel shell.
//!
//! Composes the width policy, drag controller and hotkey navigator into one
//! panel: header buttons, the session list, the tail action bar and the drag
//! handle on the right edge.

mod render;
mod state;
mod update;

pub use render::render_sidebar;
pub use state::{
    ButtonLabels, LayoutBinding, Route, ScreenAreas, SidebarAction, SidebarGeometry, SidebarHit,
    SidebarLayout, SidebarState, button_labels, list_offset,
};
pub use update::{SidebarContext, SidebarUpdate, handle_action, handle_mouse, key_action};
