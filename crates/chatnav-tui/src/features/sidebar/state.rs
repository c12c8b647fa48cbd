//! Sidebar state and geometry.

use chatnav_core::config::Config;
use crossterm::event::KeyModifiers;
use ratatui::layout::Rect;

use crate::common::{EventSurface, display_width};
use crate::features::drag::{DragController, DragTiming};
use crate::features::hotkeys::{HotkeyNavigator, modifiers_from_config};
use crate::features::layout::{EffectiveLayout, SidebarLimits, ViewportClass, compute_layout};

/// Where the main area is pointed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Chat,
    NewChat {
        from_home: bool,
    },
    Settings,
}

/// Sidebar size as last bound from the config store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarGeometry {
    pub layout: EffectiveLayout,
    pub viewport: ViewportClass,
    /// Sidebar width in terminal columns.
    pub columns: u16,
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl Default for SidebarGeometry {
    fn default() -> Self {
        let layout = compute_layout(
            SidebarLimits::default().default,
            ViewportClass::Desktop,
            &SidebarLimits::default(),
        );
        Self {
            layout,
            viewport: ViewportClass::Desktop,
            columns: 0,
            viewport_width: 0,
            viewport_height: 0,
        }
    }
}

/// The single sizing variable the rest of the UI reads.
///
/// Only [`SidebarState::bind_layout`] writes it; render and mouse hit-testing
/// read it.
#[derive(Debug, Default)]
pub struct LayoutBinding {
    sidebar: SidebarGeometry,
}

impl LayoutBinding {
    pub fn sidebar(&self) -> SidebarGeometry {
        self.sidebar
    }
}

/// Screen regions derived from the bound geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub sidebar: Option<Rect>,
    pub main: Option<Rect>,
    pub status: Rect,
}

impl SidebarGeometry {
    /// The whole terminal area the geometry was bound for.
    pub fn viewport_area(&self) -> Rect {
        Rect::new(0, 0, self.viewport_width, self.viewport_height)
    }

    /// Splits the viewport into sidebar, main area and the status line.
    ///
    /// On mobile the sidebar covers the whole content area on the home route
    /// and is hidden everywhere else.
    pub fn screen_areas(&self, route: Route) -> ScreenAreas {
        let width = self.viewport_width;
        let content_height = self.viewport_height.saturating_sub(1);
        let status = Rect::new(0, content_height, width, u16::from(self.viewport_height > 0));
        let content = Rect::new(0, 0, width, content_height);

        match self.viewport {
            ViewportClass::Mobile if route == Route::Home => ScreenAreas {
                sidebar: Some(content),
                main: None,
                status,
            },
            ViewportClass::Mobile => ScreenAreas {
                sidebar: None,
                main: Some(content),
                status,
            },
            ViewportClass::Desktop => {
                let columns = self.columns.min(width);
                ScreenAreas {
                    sidebar: Some(Rect::new(0, 0, columns, content_height)),
                    main: Some(Rect::new(columns, 0, width - columns, content_height)),
                    status,
                }
            }
        }
    }
}

// ============================================================================
// SidebarState
// ============================================================================

#[derive(Debug)]
pub struct SidebarState {
    pub drag: DragController,
    hotkeys: Option<HotkeyNavigator>,
    hotkey_modifiers: KeyModifiers,
    binding: LayoutBinding,
}

impl SidebarState {
    pub fn new(config: &Config) -> Self {
        Self {
            drag: DragController::new(SidebarLimits::default(), DragTiming::from(config.drag)),
            hotkeys: None,
            hotkey_modifiers: modifiers_from_config(&config.hotkeys.modifiers),
            binding: LayoutBinding::default(),
        }
    }

    pub fn binding(&self) -> &LayoutBinding {
        &self.binding
    }

    pub fn is_narrow(&self) -> bool {
        self.binding.sidebar.layout.is_narrow
    }

    /// Recomputes the effective layout and writes it to the binding.
    pub fn bind_layout(&mut self, preference: u32, viewport_width: u16, viewport_height: u16) {
        let viewport = ViewportClass::from_columns(viewport_width);
        let layout = compute_layout(preference, viewport, self.drag.limits());
        let geometry = SidebarGeometry {
            layout,
            viewport,
            columns: layout.columns(viewport_width),
            viewport_width,
            viewport_height,
        };
        if geometry.layout != self.binding.sidebar.layout
            || geometry.viewport != self.binding.sidebar.viewport
        {
            tracing::debug!(?layout, ?viewport, "sidebar layout changed");
        }
        self.binding.sidebar = geometry;
    }

    /// Acquires the keyboard listener. Returns false when already mounted.
    pub fn mount(&mut self, surface: &EventSurface) -> bool {
        if self.hotkeys.is_some() {
            return false;
        }
        self.hotkeys = Some(HotkeyNavigator::mount(surface, self.hotkey_modifiers));
        tracing::info!("sidebar mounted");
        true
    }

    /// Releases the keyboard listener and abandons any drag in progress.
    pub fn unmount(&mut self) {
        self.hotkeys = None;
        self.drag.cancel();
        tracing::info!("sidebar unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.hotkeys.is_some()
    }

    pub fn hotkeys(&self) -> Option<&HotkeyNavigator> {
        self.hotkeys.as_ref()
    }
}

// ============================================================================
// Sidebar layout (shared by render and hit-testing)
// ============================================================================

/// Clickable things inside the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    NewChat,
    Masks,
    Plugins,
    DeleteCurrent,
    Settings,
    Notice,
    ToggleNarrow,
    SelectSession(usize),
    GoHome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarHit {
    DragHandle,
    Action(SidebarAction),
    Header,
}

pub struct ButtonLabels {
    pub masks: &'static str,
    pub plugins: &'static str,
    pub delete: &'static str,
    pub settings: &'static str,
    pub notice: &'static str,
    pub new_chat: &'static str,
}

/// Narrow mode hides text labels and keeps only the icons.
pub fn button_labels(is_narrow: bool) -> ButtonLabels {
    if is_narrow {
        ButtonLabels {
            masks: "◇",
            plugins: "✚",
            delete: "✕",
            settings: "⚙",
            notice: "✉",
            new_chat: "+",
        }
    } else {
        ButtonLabels {
            masks: " ◇ Masks ",
            plugins: " ✚ Plugins ",
            delete: " ✕ ",
            settings: " ⚙ ",
            notice: " ✉ Notice ",
            new_chat: " + New Chat ",
        }
    }
}

/// Sidebar sub-areas for a given panel rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SidebarLayout {
    pub panel: Rect,
    pub header: Rect,
    pub masks: Rect,
    pub plugins: Rect,
    pub list: Rect,
    pub delete: Rect,
    pub settings: Rect,
    pub notice: Rect,
    pub new_chat: Rect,
    pub drag_handle: Option<Rect>,
}

impl SidebarLayout {
    pub fn compute(panel: Rect, is_narrow: bool, has_handle: bool) -> Self {
        let handle_width = u16::from(has_handle && panel.width > 1);
        let drag_handle = (handle_width > 0)
            .then(|| Rect::new(panel.x + panel.width - 1, panel.y, 1, panel.height));

        let content_x = panel.x + 1;
        let right = panel.x + panel.width.saturating_sub(handle_width);
        let content_width = right.saturating_sub(content_x);
        let bottom = panel.y + panel.height;

        let header_height = if is_narrow { 1 } else { 2 };
        let header = clip(Rect::new(content_x, panel.y, content_width, header_height), bottom);
        let bar_y = panel.y + header_height + 1;
        let tail_y = bottom.saturating_sub(1);
        let list_y = bar_y + 2;
        let list = clip(
            Rect::new(content_x, list_y, content_width, tail_y.saturating_sub(list_y + 1)),
            bottom,
        );

        let labels = button_labels(is_narrow);
        let [masks, plugins] = place_buttons(content_x, bar_y, right, bottom, [
            labels.masks,
            labels.plugins,
        ]);
        let [delete, settings, notice, new_chat] = place_buttons(content_x, tail_y, right, bottom, [
            labels.delete,
            labels.settings,
            labels.notice,
            labels.new_chat,
        ]);

        Self {
            panel,
            header,
            masks,
            plugins,
            list,
            delete,
            settings,
            notice,
            new_chat,
            drag_handle,
        }
    }

    /// Resolves a click at (`column`, `row`).
    pub fn hit(&self, column: u16, row: u16, list_offset: usize, count: usize) -> Option<SidebarHit> {
        if !contains(self.panel, column, row) {
            return None;
        }
        if self.drag_handle.is_some_and(|h| contains(h, column, row)) {
            return Some(SidebarHit::DragHandle);
        }

        let buttons = [
            (self.masks, SidebarAction::Masks),
            (self.plugins, SidebarAction::Plugins),
            (self.delete, SidebarAction::DeleteCurrent),
            (self.settings, SidebarAction::Settings),
            (self.notice, SidebarAction::Notice),
            (self.new_chat, SidebarAction::NewChat),
        ];
        if let Some((_, action)) = buttons.iter().find(|(r, _)| contains(*r, column, row)) {
            return Some(SidebarHit::Action(*action));
        }

        if contains(self.list, column, row) {
            let index = list_offset + usize::from(row - self.list.y);
            let action = if index < count {
                SidebarAction::SelectSession(index)
            } else {
                SidebarAction::GoHome
            };
            return Some(SidebarHit::Action(action));
        }

        if contains(self.header, column, row) {
            return Some(SidebarHit::Header);
        }

        // Remaining body space behaves like empty list space.
        Some(SidebarHit::Action(SidebarAction::GoHome))
    }
}

/// First visible list row that keeps `current` on screen.
pub fn list_offset(current: usize, count: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 || count <= visible_rows {
        return 0;
    }
    let max_offset = count - visible_rows;
    (current + 1).saturating_sub(visible_rows).min(max_offset)
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

fn clip(rect: Rect, bottom: u16) -> Rect {
    if rect.y >= bottom {
        return Rect::new(rect.x, rect.y, rect.width, 0);
    }
    Rect::new(rect.x, rect.y, rect.width, rect.height.min(bottom - rect.y))
}

/// Lays labels out left to right with one column between them, clipped to `right`.
fn place_buttons<const N: usize>(
    x: u16,
    y: u16,
    right: u16,
    bottom: u16,
    labels: [&str; N],
) -> [Rect; N] {
    let height = u16::from(y < bottom);
    let mut cursor = x;
    labels.map(|label| {
        let start = cursor.min(right);
        let end = cursor.saturating_add(display_width(label)).min(right);
        cursor = cursor.saturating_add(display_width(label) + 1);
        Rect::new(start, y, end - start, height)
    })
}
