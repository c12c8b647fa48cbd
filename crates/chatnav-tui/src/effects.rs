//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only; the reducer never touches the outside world.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Open a URL in the system browser.
    OpenBrowser { url: String },

    /// Write the sidebar width preference to the config file.
    PersistSidebarWidth { width: u32 },
}
