pub mod drag;
pub mod hotkeys;
pub mod layout;
pub mod sidebar;
