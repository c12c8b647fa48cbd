//! Sidebar input handling.
//!
//! Handlers never mutate state outside the sidebar slice; cross-slice changes
//! are returned as [`StateMutation`]s for the reducer to apply.

use chatnav_core::config::Config;
use chatnav_core::sessions::{ChatStore, SessionStore};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::state::{Route, SidebarAction, SidebarHit, SidebarLayout, SidebarState, list_offset};
use crate::common::{EventSurface, ListenerKind};
use crate::effects::UiEffect;
use crate::features::layout::{ViewportClass, column_to_px};
use crate::mutations::{ConfigMutation, SessionMutation, StateMutation};
use crate::overlays::OverlayRequest;

/// Read-only view of the stores the sidebar acts on.
pub struct SidebarContext<'a> {
    pub config: &'a Config,
    pub store: &'a ChatStore,
    pub route: Route,
}

#[derive(Debug, Default)]
pub struct SidebarUpdate {
    pub mutations: Vec<StateMutation>,
    pub effects: Vec<UiEffect>,
    pub overlay: Option<OverlayRequest>,
}

impl SidebarUpdate {
    fn mutations(mutations: Vec<StateMutation>) -> Self {
        Self {
            mutations,
            ..Self::default()
        }
    }

    fn overlay(request: OverlayRequest) -> Self {
        Self {
            overlay: Some(request),
            ..Self::default()
        }
    }

    /// Stores a new width preference and persists it.
    fn width(width: u32) -> Self {
        Self {
            mutations: vec![StateMutation::Config(ConfigMutation::SetSidebarWidth(width))],
            effects: vec![UiEffect::PersistSidebarWidth { width }],
            overlay: None,
        }
    }
}

/// Panel shortcuts. Session switching lives in the hotkey navigator.
pub fn key_action(key: &KeyEvent) -> Option<SidebarAction> {
    if key.modifiers == KeyModifiers::NONE && key.code == KeyCode::Esc {
        return Some(SidebarAction::GoHome);
    }
    if key.modifiers != KeyModifiers::CONTROL {
        return None;
    }
    match key.code {
        KeyCode::Char('n') => Some(SidebarAction::NewChat),
        KeyCode::Char('w') => Some(SidebarAction::DeleteCurrent),
        KeyCode::Char('s') => Some(SidebarAction::Settings),
        KeyCode::Char('e') => Some(SidebarAction::Masks),
        KeyCode::Char('p') => Some(SidebarAction::Plugins),
        KeyCode::Char('g') => Some(SidebarAction::Notice),
        KeyCode::Char('b') => Some(SidebarAction::ToggleNarrow),
        _ => None,
    }
}

pub fn handle_action(
    sidebar: &SidebarState,
    ctx: &SidebarContext<'_>,
    action: SidebarAction,
) -> SidebarUpdate {
    tracing::debug!(?action, "sidebar action");
    match action {
        SidebarAction::NewChat => {
            if ctx.config.dont_show_mask_splash_screen {
                SidebarUpdate::mutations(vec![
                    StateMutation::Session(SessionMutation::Create),
                    StateMutation::Navigate(Route::Chat),
                ])
            } else {
                SidebarUpdate::mutations(vec![StateMutation::Navigate(Route::NewChat {
                    from_home: false,
                })])
            }
        }
        SidebarAction::Masks => SidebarUpdate::mutations(vec![StateMutation::Navigate(
            Route::NewChat { from_home: true },
        )]),
        SidebarAction::Plugins => SidebarUpdate::mutations(vec![StateMutation::ShowToast(
            "Work in progress".to_string(),
        )]),
        SidebarAction::DeleteCurrent => {
            if ctx.store.session_count() == 0 {
                return SidebarUpdate::default();
            }
            SidebarUpdate::overlay(OverlayRequest::ConfirmDelete)
        }
        SidebarAction::Settings => {
            SidebarUpdate::mutations(vec![StateMutation::Navigate(Route::Settings)])
        }
        SidebarAction::Notice => SidebarUpdate::overlay(OverlayRequest::Announcement),
        SidebarAction::ToggleNarrow => {
            SidebarUpdate::width(sidebar.drag.toggle(ctx.config.sidebar_width))
        }
        SidebarAction::SelectSession(index) => SidebarUpdate::mutations(vec![
            StateMutation::Session(SessionMutation::Select(index)),
            StateMutation::Navigate(Route::Chat),
        ]),
        SidebarAction::GoHome => {
            SidebarUpdate::mutations(vec![StateMutation::Navigate(Route::Home)])
        }
    }
}

/// Handles a mouse event.
///
/// Pointer moves and releases reach the drag controller only while it holds
/// its listeners, wherever the pointer is. Presses are hit-tested against the
/// bound sidebar geometry and ignored when `accept_presses` is false.
pub fn handle_mouse(
    sidebar: &mut SidebarState,
    surface: &EventSurface,
    ctx: &SidebarContext<'_>,
    mouse: MouseEvent,
    accept_presses: bool,
    now_ms: u64,
) -> SidebarUpdate {
    let pointer_x = column_to_px(mouse.column);

    match mouse.kind {
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved
            if surface.is_listening(ListenerKind::PointerMove) =>
        {
            match sidebar.drag.pointer_move(pointer_x, now_ms) {
                Some(width) => SidebarUpdate::mutations(vec![StateMutation::Config(
                    ConfigMutation::SetSidebarWidth(width),
                )]),
                None => SidebarUpdate::default(),
            }
        }
        MouseEventKind::Up(MouseButton::Left) if surface.is_listening(ListenerKind::PointerUp) => {
            match sidebar
                .drag
                .pointer_up(pointer_x, ctx.config.sidebar_width, now_ms)
            {
                Some(release) => SidebarUpdate::width(release.width),
                None => SidebarUpdate::default(),
            }
        }
        MouseEventKind::Down(MouseButton::Left) if accept_presses => {
            let geometry = sidebar.binding().sidebar();
            let Some(panel) = geometry.screen_areas(ctx.route).sidebar else {
                return SidebarUpdate::default();
            };
            let layout = SidebarLayout::compute(
                panel,
                sidebar.is_narrow(),
                geometry.viewport == ViewportClass::Desktop,
            );
            let count = ctx.store.session_count();
            let offset = list_offset(ctx.store.current_index(), count, usize::from(layout.list.height));

            match layout.hit(mouse.column, mouse.row, offset, count) {
                Some(SidebarHit::DragHandle) => {
                    sidebar
                        .drag
                        .pointer_down(surface, pointer_x, ctx.config.sidebar_width, now_ms);
                    SidebarUpdate::default()
                }
                Some(SidebarHit::Action(action)) => handle_action(sidebar, ctx, action),
                Some(SidebarHit::Header) | None => SidebarUpdate::default(),
            }
        }
        _ => SidebarUpdate::default(),
    }
}

#[cfg(test)]
mod tests {
    use chatnav_core::sessions::ChatSession;

    use super::*;

    fn store() -> ChatStore {
        ChatStore::with_sessions(vec![
            ChatSession::with_topic("one", 1),
            ChatSession::with_topic("two", 2),
            ChatSession::with_topic("three", 3),
        ])
    }

    fn bound_sidebar(config: &Config) -> SidebarState {
        let mut sidebar = SidebarState::new(config);
        sidebar.bind_layout(config.sidebar_width, 200, 40);
        sidebar
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_key_actions() {
        assert_eq!(key_action(&ctrl('n')), Some(SidebarAction::NewChat));
        assert_eq!(key_action(&ctrl('b')), Some(SidebarAction::ToggleNarrow));
        assert_eq!(
            key_action(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(SidebarAction::GoHome)
        );
        assert_eq!(
            key_action(&KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            key_action(&KeyEvent::new(
                KeyCode::Char('n'),
                KeyModifiers::CONTROL | KeyModifiers::SHIFT
            )),
            None
        );
    }

    #[test]
    fn test_new_chat_goes_to_mask_picker_by_default() {
        let config = Config::default();
        let store = store();
        let sidebar = SidebarState::new(&config);
        let ctx = SidebarContext {
            config: &config,
            store: &store,
            route: Route::Home,
        };

        let update = handle_action(&sidebar, &ctx, SidebarAction::NewChat);
        assert_eq!(
            update.mutations,
            vec![StateMutation::Navigate(Route::NewChat { from_home: false })]
        );
    }

    #[test]
    fn test_new_chat_creates_session_when_splash_disabled() {
        let config = Config {
            dont_show_mask_splash_screen: true,
            ..Config::default()
        };
        let store = store();
        let sidebar = SidebarState::new(&config);
        let ctx = SidebarContext {
            config: &config,
            store: &store,
            route: Route::Home,
        };

        let update = handle_action(&sidebar, &ctx, SidebarAction::NewChat);
        assert_eq!(
            update.mutations,
            vec![
                StateMutation::Session(SessionMutation::Create),
                StateMutation::Navigate(Route::Chat),
            ]
        );
    }

    #[test]
    fn test_masks_plugins_and_dialog_requests() {
        let config = Config::default();
        let store = store();
        let sidebar = SidebarState::new(&config);
        let ctx = SidebarContext {
            config: &config,
            store: &store,
            route: Route::Home,
        };

        assert_eq!(
            handle_action(&sidebar, &ctx, SidebarAction::Masks).mutations,
            vec![StateMutation::Navigate(Route::NewChat { from_home: true })]
        );
        assert!(matches!(
            handle_action(&sidebar, &ctx, SidebarAction::Plugins).mutations[..],
            [StateMutation::ShowToast(_)]
        ));
        assert_eq!(
            handle_action(&sidebar, &ctx, SidebarAction::DeleteCurrent).overlay,
            Some(OverlayRequest::ConfirmDelete)
        );
        assert_eq!(
            handle_action(&sidebar, &ctx, SidebarAction::Notice).overlay,
            Some(OverlayRequest::Announcement)
        );
    }

    #[test]
    fn test_toggle_narrow_persists_width() {
        let config = Config::default();
        let store = store();
        let sidebar = SidebarState::new(&config);
        let ctx = SidebarContext {
            config: &config,
            store: &store,
            route: Route::Home,
        };

        let update = handle_action(&sidebar, &ctx, SidebarAction::ToggleNarrow);
        assert_eq!(update.effects, vec![UiEffect::PersistSidebarWidth { width: 100 }]);
    }

    #[test]
    fn test_drag_through_handle() {
        let config = Config::default();
        let store = store();
        let surface = EventSurface::new();
        let mut sidebar = bound_sidebar(&config);
        let ctx = SidebarContext {
            config: &config,
            store: &store,
            route: Route::Chat,
        };

        let down = handle_mouse(
            &mut sidebar,
            &surface,
            &ctx,
            mouse(MouseEventKind::Down(MouseButton::Left), 37, 10),
            true,
            0,
        );
        assert!(down.mutations.is_empty());
        assert!(surface.is_listening(ListenerKind::PointerMove));

        // Pointer left the handle; moves still arrive while listening.
        let moved = handle_mouse(
            &mut sidebar,
            &surface,
            &ctx,
            mouse(MouseEventKind::Drag(MouseButton::Left), 50, 10),
            true,
            100,
        );
        assert_eq!(
            moved.mutations,
            vec![StateMutation::Config(ConfigMutation::SetSidebarWidth(404))]
        );

        let up = handle_mouse(
            &mut sidebar,
            &surface,
            &ctx,
            mouse(MouseEventKind::Up(MouseButton::Left), 50, 10),
            true,
            400,
        );
        assert_eq!(up.effects, vec![UiEffect::PersistSidebarWidth { width: 404 }]);
        assert!(!surface.is_listening(ListenerKind::PointerMove));
        assert!(!surface.is_listening(ListenerKind::PointerUp));
    }

    #[test]
    fn test_moves_without_drag_are_ignored() {
        let config = Config::default();
        let store = store();
        let surface = EventSurface::new();
        let mut sidebar = bound_sidebar(&config);
        let ctx = SidebarContext {
            config: &config,
            store: &store,
            route: Route::Chat,
        };

        for kind in [
            MouseEventKind::Moved,
            MouseEventKind::Drag(MouseButton::Left),
            MouseEventKind::Up(MouseButton::Left),
        ] {
            let update = handle_mouse(&mut sidebar, &surface, &ctx, mouse(kind, 50, 3), true, 0);
            assert!(update.mutations.is_empty());
            assert!(update.effects.is_empty());
        }
    }

    #[test]
    fn test_clicks_on_list_select_or_go_home() {
        let config = Config::default();
        let store = store();
        let surface = EventSurface::new();
        let mut sidebar = bound_sidebar(&config);
        let ctx = SidebarContext {
            config: &config,
            store: &store,
            route: Route::Home,
        };
        let panel = sidebar
            .binding()
            .sidebar()
            .screen_areas(Route::Home)
            .sidebar
            .unwrap();
        let layout = SidebarLayout::compute(panel, false, true);

        let select = handle_mouse(
            &mut sidebar,
            &surface,
            &ctx,
            mouse(MouseEventKind::Down(MouseButton::Left), layout.list.x + 2, layout.list.y + 2),
            true,
            0,
        );
        assert_eq!(
            select.mutations,
            vec![
                StateMutation::Session(SessionMutation::Select(2)),
                StateMutation::Navigate(Route::Chat),
            ]
        );

        let empty = handle_mouse(
            &mut sidebar,
            &surface,
            &ctx,
            mouse(MouseEventKind::Down(MouseButton::Left), layout.list.x + 2, layout.list.y + 8),
            true,
            0,
        );
        assert_eq!(empty.mutations, vec![StateMutation::Navigate(Route::Home)]);
    }

    #[test]
    fn test_presses_blocked_when_not_accepted() {
        let config = Config::default();
        let store = store();
        let surface = EventSurface::new();
        let mut sidebar = bound_sidebar(&config);
        let ctx = SidebarContext {
            config: &config,
            store: &store,
            route: Route::Chat,
        };

        let update = handle_mouse(
            &mut sidebar,
            &surface,
            &ctx,
            mouse(MouseEventKind::Down(MouseButton::Left), 37, 10),
            false,
            0,
        );
        assert!(update.mutations.is_empty());
        assert!(!sidebar.drag.is_dragging());
    }
}
