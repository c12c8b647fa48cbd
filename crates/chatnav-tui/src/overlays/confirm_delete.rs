//! Confirmation step before deleting a session.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use super::render_utils::{
    InputHint, OverlayConfig, button_at, button_row_areas, overlay_layout, render_buttons,
    render_overlay,
};
use crate::common::truncate_with_ellipsis;
use crate::effects::UiEffect;
use crate::mutations::{SessionMutation, StateMutation};

const BUTTONS: [&str; 2] = ["Delete", "Cancel"];
const HINTS: &[InputHint<'static>] = &[
    InputHint { key: "y", action: "delete" },
    InputHint { key: "n", action: "cancel" },
];
const OVERLAY: OverlayConfig<'static> = OverlayConfig {
    title: "Delete Conversation",
    border_color: Color::Red,
    width: 48,
    height: 7,
    hints: HINTS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDeleteState {
    /// Index of the session to delete, captured when the overlay opened.
    pub index: usize,
    pub topic: String,
}

impl ConfirmDeleteState {
    pub fn open(index: usize, topic: String) -> (Self, Vec<UiEffect>) {
        (Self { index, topic }, vec![])
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter if !ctrl => self.confirm(),
            KeyCode::Char('n' | 'N') | KeyCode::Esc if !ctrl => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    /// Left click: `Delete` confirms, `Cancel` closes, anything else is ignored.
    pub fn handle_click(&self, column: u16, row: u16, area: Rect) -> OverlayUpdate {
        let body = overlay_layout(area, &OVERLAY).body;
        match button_at(&Self::button_areas(body), column, row) {
            Some(0) => self.confirm(),
            Some(_) => OverlayUpdate::close(),
            None => OverlayUpdate::stay(),
        }
    }

    fn confirm(&self) -> OverlayUpdate {
        OverlayUpdate::close().with_mutations(vec![
            StateMutation::Session(SessionMutation::Delete(self.index)),
            StateMutation::ShowToast("Conversation deleted".to_string()),
        ])
    }

    /// Buttons sit on the last body row, below the topic and the question.
    fn button_areas(body: Rect) -> Vec<Rect> {
        if body.height < 4 {
            return Vec::new();
        }
        let row = Rect::new(body.x, body.y + body.height - 1, body.width, 1);
        button_row_areas(row, &BUTTONS)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = render_overlay(frame, area, &OVERLAY);

        let topic_width = usize::from(layout.body.width).saturating_sub(2);
        let lines = vec![
            Line::from(Span::styled(
                format!("\"{}\"", truncate_with_ellipsis(&self.topic, topic_width)),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(Span::styled(
                "Delete the selected conversation?",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), layout.body);
        render_buttons(
            frame,
            &Self::button_areas(layout.body),
            &BUTTONS,
            None,
            Color::Red,
        );
    }
}
