//! Shared building blocks for the sidebar: time, listener bookkeeping, text.

mod clock;
mod listeners;
mod text;

pub use clock::{Clock, ManualClock, SystemClock};
pub use listeners::{EventSurface, ListenerKind, Subscription};
pub use text::{display_width, truncate_with_ellipsis};
