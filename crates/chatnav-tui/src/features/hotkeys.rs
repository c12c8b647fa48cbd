//! Session switching hotkeys (modifier + ArrowUp / ArrowDown).

use chatnav_core::config::HotkeyModifier;
use chatnav_core::sessions::SessionStore;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::{EventSurface, ListenerKind, Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Handled,
    PassThrough,
}

/// Maps configured modifiers onto crossterm's modifier flags.
///
/// `super` also matches META, which is how some terminals report Cmd.
pub fn modifiers_from_config(modifiers: &[HotkeyModifier]) -> KeyModifiers {
    modifiers
        .iter()
        .fold(KeyModifiers::NONE, |acc, modifier| match modifier {
            HotkeyModifier::Ctrl => acc | KeyModifiers::CONTROL,
            HotkeyModifier::Alt => acc | KeyModifiers::ALT,
            HotkeyModifier::Super => acc | KeyModifiers::SUPER | KeyModifiers::META,
            HotkeyModifier::Shift => acc | KeyModifiers::SHIFT,
        })
}

/// Circular index arithmetic. `None` when there is nothing to select.
pub fn wrap_index(current: usize, delta: i64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let count = count as i64;
    Some((current as i64 + delta).rem_euclid(count) as usize)
}

/// Keyboard listener that moves the current session up or down.
///
/// Holds no session state; the index change is delegated to the store. The
/// key-down subscription lives exactly as long as the navigator.
#[derive(Debug)]
pub struct HotkeyNavigator {
    modifiers: KeyModifiers,
    _key_down: Subscription,
}

impl HotkeyNavigator {
    pub fn mount(surface: &EventSurface, modifiers: KeyModifiers) -> Self {
        Self {
            modifiers,
            _key_down: surface.subscribe(ListenerKind::KeyDown),
        }
    }

    /// Direction for a qualifying key press, `None` for everything else.
    pub fn direction(&self, key: &KeyEvent) -> Option<i64> {
        if key.kind != KeyEventKind::Press || !key.modifiers.intersects(self.modifiers) {
            return None;
        }
        match key.code {
            KeyCode::Up => Some(-1),
            KeyCode::Down => Some(1),
            _ => None,
        }
    }

    pub fn handle_key(&self, key: &KeyEvent, store: &mut impl SessionStore) -> KeyDisposition {
        let Some(delta) = self.direction(key) else {
            return KeyDisposition::PassThrough;
        };

        let count = store.session_count();
        let current = store.current_index();
        if let Some(next) = wrap_index(current, delta, count) {
            tracing::debug!(current, next, count, "hotkey session switch");
            store.select_session(next);
        }
        KeyDisposition::Handled
    }
}
