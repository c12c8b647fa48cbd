//! Announcement dialog.
//!
//! The body is opaque content: behavior only depends on whether the dialog is
//! open and on its action buttons. Each action is independent; only an
//! explicit dismiss action (or the close button) closes the dialog.

use chatnav_core::config::AnnouncementConfig;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use super::OverlayUpdate;
use super::render_utils::{
    InputHint, OverlayConfig, button_at, button_row_areas, overlay_layout, render_buttons,
    render_overlay, render_separator,
};
use crate::effects::UiEffect;

const CLOSE_LABEL: &str = "Close";
const DIALOG_WIDTH: u16 = 60;
const HINTS: &[InputHint<'static>] = &[
    InputHint { key: "Tab", action: "focus" },
    InputHint { key: "Enter", action: "activate" },
    InputHint { key: "Esc", action: "close" },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    OpenUrl(String),
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementAction {
    pub label: String,
    pub kind: ActionKind,
}

#[derive(Debug, Clone)]
pub struct AnnouncementState {
    pub title: String,
    pub body: Vec<String>,
    pub actions: Vec<AnnouncementAction>,
    /// Focused button; `actions.len()` is the close button.
    pub focused: usize,
}

impl AnnouncementState {
    pub fn open(config: &AnnouncementConfig) -> (Self, Vec<UiEffect>) {
        let actions = config
            .actions
            .iter()
            .map(|action| AnnouncementAction {
                label: action.label.clone(),
                kind: action
                    .url
                    .clone()
                    .map_or(ActionKind::Dismiss, ActionKind::OpenUrl),
            })
            .collect();
        (
            Self {
                title: config.title.clone(),
                body: config.body.clone(),
                actions,
                focused: 0,
            },
            vec![],
        )
    }

    fn button_count(&self) -> usize {
        self.actions.len() + 1
    }

    /// Activates the button at `index`. Out-of-range indices do nothing.
    pub fn activate(&self, index: usize) -> OverlayUpdate {
        if index == self.actions.len() {
            return OverlayUpdate::close();
        }
        match self.actions.get(index).map(|action| &action.kind) {
            Some(ActionKind::OpenUrl(url)) => {
                OverlayUpdate::stay().with_ui_effects(vec![UiEffect::OpenBrowser {
                    url: url.clone(),
                }])
            }
            Some(ActionKind::Dismiss) => OverlayUpdate::close(),
            None => OverlayUpdate::stay(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Tab | KeyCode::Right | KeyCode::Down => {
                self.focused = (self.focused + 1) % self.button_count();
                OverlayUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Up => {
                self.focused = (self.focused + self.button_count() - 1) % self.button_count();
                OverlayUpdate::stay()
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.focused),
            _ => OverlayUpdate::stay(),
        }
    }

    /// Selects and activates the button under a left click. Clicks elsewhere
    /// keep the dialog open.
    pub fn handle_click(&mut self, column: u16, row: u16, area: Rect) -> OverlayUpdate {
        let layout = overlay_layout(area, &self.overlay_config());
        match button_at(&self.button_areas(layout.body), column, row) {
            Some(index) => {
                self.focused = index;
                self.activate(index)
            }
            None => OverlayUpdate::stay(),
        }
    }

    fn overlay_config(&self) -> OverlayConfig<'_> {
        let body_lines = self.body.len().min(usize::from(u16::MAX)) as u16;
        OverlayConfig {
            title: &self.title,
            border_color: Color::Cyan,
            width: DIALOG_WIDTH,
            height: body_lines.saturating_add(6),
            hints: HINTS,
        }
    }

    fn labels(&self) -> Vec<&str> {
        self.actions
            .iter()
            .map(|action| action.label.as_str())
            .chain(std::iter::once(CLOSE_LABEL))
            .collect()
    }

    /// Body text height; a separator and the button row sit below it.
    fn text_height(body: Rect) -> u16 {
        body.height.saturating_sub(2)
    }

    /// Screen areas of the buttons, actions first and close last. Empty when
    /// the dialog is too short to show them.
    fn button_areas(&self, body: Rect) -> Vec<Rect> {
        let y = body.y + Self::text_height(body) + 1;
        if y >= body.y.saturating_add(body.height) {
            return Vec::new();
        }
        button_row_areas(Rect::new(body.x, y, body.width, 1), &self.labels())
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = render_overlay(frame, area, &self.overlay_config());

        let text_height = Self::text_height(layout.body);
        let body: Vec<Line> = self.body.iter().map(|l| Line::from(l.as_str())).collect();
        frame.render_widget(
            Paragraph::new(body).wrap(Wrap { trim: false }),
            Rect::new(layout.body.x, layout.body.y, layout.body.width, text_height),
        );

        render_separator(frame, layout.body, text_height);
        render_buttons(
            frame,
            &self.button_areas(layout.body),
            &self.labels(),
            Some(self.focused),
            Color::Cyan,
        );
    }
}

#[cfg(test)]
mod tests {
    use chatnav_core::config::AnnouncementActionConfig;

    use super::*;
    use crate::overlays::OverlayTransition;

    fn config_with_actions() -> AnnouncementConfig {
        AnnouncementConfig {
            show_on_start: false,
            title: "News".to_string(),
            body: vec!["line one".to_string(), "line two".to_string()],
            actions: vec![
                AnnouncementActionConfig {
                    label: "Docs".to_string(),
                    url: Some("https://example.com/docs".to_string()),
                },
                AnnouncementActionConfig {
                    label: "Community".to_string(),
                    url: Some("https://example.com/community".to_string()),
                },
            ],
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_actions_open_urls_without_closing() {
        let (state, _) = AnnouncementState::open(&config_with_actions());

        let first = state.activate(0);
        let second = state.activate(1);

        assert!(matches!(first.transition, OverlayTransition::Stay));
        assert_eq!(
            first.effects,
            vec![UiEffect::OpenBrowser {
                url: "https://example.com/docs".to_string()
            }]
        );
        assert!(matches!(second.transition, OverlayTransition::Stay));
        assert_eq!(
            second.effects,
            vec![UiEffect::OpenBrowser {
                url: "https://example.com/community".to_string()
            }]
        );
    }

    #[test]
    fn test_close_button_is_last() {
        let (state, _) = AnnouncementState::open(&config_with_actions());
        let update = state.activate(2);
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert!(update.effects.is_empty());
    }

    #[test]
    fn test_action_without_url_dismisses() {
        let mut config = config_with_actions();
        config.actions.push(AnnouncementActionConfig {
            label: "Got it".to_string(),
            url: None,
        });
        let (state, _) = AnnouncementState::open(&config);

        assert_eq!(state.actions[2].kind, ActionKind::Dismiss);
        let update = state.activate(2);
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert!(update.effects.is_empty());
    }

    #[test]
    fn test_clicks_hit_rendered_buttons() {
        let area = Rect::new(0, 0, 100, 30);
        let (mut state, _) = AnnouncementState::open(&config_with_actions());
        let body = overlay_layout(area, &state.overlay_config()).body;
        let buttons = state.button_areas(body);
        assert_eq!(buttons.len(), 3);

        let docs = buttons[0];
        let update = state.handle_click(docs.x + 1, docs.y, area);
        assert!(matches!(update.transition, OverlayTransition::Stay));
        assert_eq!(
            update.effects,
            vec![UiEffect::OpenBrowser {
                url: "https://example.com/docs".to_string()
            }]
        );

        let outside = state.handle_click(0, 0, area);
        assert!(matches!(outside.transition, OverlayTransition::Stay));
        assert!(outside.effects.is_empty());

        let close = buttons[2];
        let update = state.handle_click(close.x + close.width - 1, close.y, area);
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert_eq!(state.focused, 2);
    }

    #[test]
    fn test_close_button_drawn_where_clicks_land() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        let (state, _) = AnnouncementState::open(&config_with_actions());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| state.render(frame, frame.area()))
            .unwrap();

        let body = overlay_layout(Rect::new(0, 0, 100, 30), &state.overlay_config()).body;
        let close = state.button_areas(body)[2];
        let buffer = terminal.backend().buffer();
        let drawn: String = (close.x..close.x + close.width)
            .map(|x| buffer[(x, close.y)].symbol())
            .collect();
        assert_eq!(drawn, "[ Close ]");
    }

    #[test]
    fn test_focus_cycles_and_enter_activates() {
        let (mut state, _) = AnnouncementState::open(&config_with_actions());

        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.focused, 1);
        state.handle_key(key(KeyCode::Tab));
        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.focused, 0);
        state.handle_key(key(KeyCode::BackTab));
        assert_eq!(state.focused, 2);

        let update = state.handle_key(key(KeyCode::Enter));
        assert!(matches!(update.transition, OverlayTransition::Close));
    }

    #[test]
    fn test_escape_closes_and_other_keys_stay() {
        let (mut state, _) = AnnouncementState::open(&AnnouncementConfig::default());

        assert!(matches!(
            state.handle_key(key(KeyCode::Char('x'))).transition,
            OverlayTransition::Stay
        ));
        assert!(matches!(
            state.handle_key(key(KeyCode::Esc)).transition,
            OverlayTransition::Close
        ));
    }

    #[test]
    fn test_without_actions_enter_closes() {
        let (mut state, _) = AnnouncementState::open(&AnnouncementConfig::default());
        assert!(state.actions.is_empty());
        assert!(matches!(
            state.handle_key(key(KeyCode::Enter)).transition,
            OverlayTransition::Close
        ));
    }
}
