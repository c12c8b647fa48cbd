//! Process-wide listener registry.
//!
//! The runtime routes keyboard and pointer events through an [`EventSurface`].
//! Components never attach handlers directly: they hold [`Subscription`]
//! guards, and the surface only forwards an event kind while at least one
//! guard for it is alive. Dropping a guard removes the listener, so teardown
//! happens on every exit path, including early returns and unwinding.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use enum_map::{Enum, EnumMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum ListenerKind {
    KeyDown,
    PointerMove,
    PointerUp,
}

#[derive(Debug, Default)]
struct Registry {
    active: EnumMap<ListenerKind, usize>,
    registered: EnumMap<ListenerKind, usize>,
    removed: EnumMap<ListenerKind, usize>,
}

/// Shared handle to the listener registry. Clones refer to the same surface.
#[derive(Debug, Clone, Default)]
pub struct EventSurface {
    registry: Rc<RefCell<Registry>>,
}

impl EventSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. It stays registered until the guard is dropped.
    pub fn subscribe(&self, kind: ListenerKind) -> Subscription {
        {
            let mut registry = self.registry.borrow_mut();
            registry.active[kind] += 1;
            registry.registered[kind] += 1;
        }
        tracing::trace!(?kind, "listener registered");
        Subscription {
            kind,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.active(kind) > 0
    }

    /// Listeners of `kind` currently attached.
    pub fn active(&self, kind: ListenerKind) -> usize {
        self.registry.borrow().active[kind]
    }

    /// Listeners of `kind` ever attached.
    pub fn registered(&self, kind: ListenerKind) -> usize {
        self.registry.borrow().registered[kind]
    }

    /// Listeners of `kind` ever removed.
    pub fn removed(&self, kind: ListenerKind) -> usize {
        self.registry.borrow().removed[kind]
    }
}

/// Guard for one registered listener.
#[derive(Debug)]
#[must_use = "dropping a subscription removes the listener immediately"]
pub struct Subscription {
    kind: ListenerKind,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        registry.active[self.kind] = registry.active[self.kind].saturating_sub(1);
        registry.removed[self.kind] += 1;
        tracing::trace!(kind = ?self.kind, "listener removed");
    }
}
