//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use chatnav_core::sessions::{DEFAULT_TOPIC, SessionStore};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::hotkeys::KeyDisposition;
use crate::mutations::{ConfigMutation, SessionMutation, StateMutation};
use crate::overlays::{
    self, AnnouncementState, ConfirmDeleteState, Overlay, OverlayRequest, OverlayTransition,
    OverlayUpdate,
};
use crate::sidebar::{self, SidebarContext, SidebarUpdate};
use crate::state::{AppState, TuiState};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.expire_toast();
            vec![]
        }
        UiEvent::Frame { width, height } => {
            handle_frame(&mut app.tui, width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
    }
}

/// Mounts the sidebar: acquires the keyboard listener and, when configured,
/// opens the announcement dialog. Mounting twice is a no-op.
pub fn mount(app: &mut AppState) -> Vec<UiEffect> {
    if !app.tui.sidebar.mount(&app.tui.surface) {
        return vec![];
    }
    if app.tui.config.announcement.show_on_start {
        open_overlay(app, OverlayRequest::Announcement)
    } else {
        vec![]
    }
}

/// Unmounts the sidebar, releasing every listener it holds.
pub fn unmount(app: &mut AppState) {
    app.tui.sidebar.unmount();
}

fn handle_frame(tui: &mut TuiState, width: u16, height: u16) {
    tui.sidebar.bind_layout(tui.config.sidebar_width, width, height);
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Resize(width, height) => {
            handle_frame(&mut app.tui, width, height);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // A drag in progress owns Esc, even with a dialog open.
    if key.code == KeyCode::Esc
        && let Some(width) = app.tui.sidebar.drag.cancel()
    {
        apply_mutations(
            &mut app.tui,
            vec![StateMutation::Config(ConfigMutation::SetSidebarWidth(width))],
        );
        return vec![];
    }

    if let Some(update) = overlays::handle_overlay_key(&mut app.overlay, key) {
        return process_overlay_update(app, update);
    }

    if let Some(navigator) = app.tui.sidebar.hotkeys()
        && navigator.handle_key(&key, &mut app.tui.store) == KeyDisposition::Handled
    {
        return vec![];
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c' | 'q')) {
        return vec![UiEffect::Quit];
    }

    let Some(action) = sidebar::key_action(&key) else {
        return vec![];
    };
    let ctx = SidebarContext {
        config: &app.tui.config,
        store: &app.tui.store,
        route: app.tui.route,
    };
    let update = sidebar::handle_action(&app.tui.sidebar, &ctx, action);
    process_sidebar_update(app, update)
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    if mouse.kind == MouseEventKind::Down(MouseButton::Left)
        && let Some(overlay) = app.overlay.as_mut()
    {
        let area = app.tui.sidebar.binding().sidebar().viewport_area();
        let update = overlay.handle_click(mouse.column, mouse.row, area);
        return process_overlay_update(app, update);
    }

    // Presses belong to an open dialog; an active drag still gets its moves.
    let accept_presses = app.overlay.is_none();
    let tui = &mut app.tui;
    let now_ms = tui.now_ms();
    let ctx = SidebarContext {
        config: &tui.config,
        store: &tui.store,
        route: tui.route,
    };
    let update = sidebar::handle_mouse(
        &mut tui.sidebar,
        &tui.surface,
        &ctx,
        mouse,
        accept_presses,
        now_ms,
    );
    process_sidebar_update(app, update)
}

fn process_sidebar_update(app: &mut AppState, update: SidebarUpdate) -> Vec<UiEffect> {
    apply_mutations(&mut app.tui, update.mutations);
    let mut effects = update.effects;
    if let Some(request) = update.overlay {
        effects.extend(open_overlay(app, request));
    }
    effects
}

fn process_overlay_update(app: &mut AppState, update: OverlayUpdate) -> Vec<UiEffect> {
    if matches!(update.transition, OverlayTransition::Close) {
        app.overlay = None;
    }
    apply_mutations(&mut app.tui, update.mutations);
    update.effects
}

/// Opens an overlay unless one is already showing.
fn open_overlay(app: &mut AppState, request: OverlayRequest) -> Vec<UiEffect> {
    if app.overlay.is_some() {
        tracing::debug!(?request, "overlay already open");
        return vec![];
    }

    match request {
        OverlayRequest::Announcement => {
            let (state, effects) = AnnouncementState::open(&app.tui.config.announcement);
            app.overlay = Some(Overlay::Announcement(state));
            effects
        }
        OverlayRequest::ConfirmDelete => {
            let index = app.tui.store.current_index();
            let topic = app
                .tui
                .store
                .current_session()
                .map_or_else(|| DEFAULT_TOPIC.to_string(), |s| s.topic.clone());
            let (state, effects) = ConfirmDeleteState::open(index, topic);
            app.overlay = Some(Overlay::ConfirmDelete(state));
            effects
        }
    }
}

/// Applies cross-slice state mutations in order.
pub fn apply_mutations(tui: &mut TuiState, mutations: Vec<StateMutation>) {
    for mutation in mutations {
        match mutation {
            StateMutation::Session(SessionMutation::Select(index)) => {
                tui.store.select_session(index);
            }
            StateMutation::Session(SessionMutation::Create) => {
                tui.store.create_session();
            }
            StateMutation::Session(SessionMutation::Delete(index)) => {
                tui.store.delete_session(index);
            }
            StateMutation::Config(ConfigMutation::SetSidebarWidth(width)) => {
                if tui.config.update(|config| config.sidebar_width = width) {
                    let bound = tui.sidebar.binding().sidebar();
                    tui.sidebar.bind_layout(
                        tui.config.sidebar_width,
                        bound.viewport_width,
                        bound.viewport_height,
                    );
                }
            }
            StateMutation::Navigate(route) => {
                if tui.route != route {
                    tracing::debug!(from = ?tui.route, to = ?route, "navigate");
                }
                tui.route = route;
            }
            StateMutation::ShowToast(message) => tui.show_toast(message),
        }
    }
}
