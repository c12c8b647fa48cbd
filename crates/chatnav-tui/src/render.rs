//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame and never mutate
//! state or return effects.

use chatnav_core::config::HotkeyModifier;
use chatnav_core::sessions::SessionStore;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::common::truncate_with_ellipsis;
use crate::features::layout::ViewportClass;
use crate::overlays::OverlayExt;
use crate::sidebar::{Route, render_sidebar};
use crate::state::{AppState, TuiState};

const KEY_HINTS: &[(&str, &str)] = &[
    ("Ctrl+N", "new"),
    ("Ctrl+W", "delete"),
    ("Ctrl+↑/↓", "switch"),
    ("Ctrl+B", "narrow"),
    ("Ctrl+G", "notice"),
    ("Ctrl+Q", "quit"),
];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let tui = &app.tui;
    let geometry = tui.sidebar.binding().sidebar();
    let areas = geometry.screen_areas(tui.route);

    if let Some(panel) = areas.sidebar {
        render_sidebar(
            frame,
            panel,
            &tui.sidebar,
            &tui.store,
            geometry.viewport == ViewportClass::Desktop,
        );
    }
    if let Some(main) = areas.main {
        render_main(tui, frame, main);
    }
    render_status_line(tui, frame, areas.status);

    app.overlay.render(frame, area);
}

fn render_main(tui: &TuiState, frame: &mut Frame, area: Rect) {
    let (title, lines) = match tui.route {
        Route::Home => ("Home", home_lines()),
        Route::Chat => ("Chat", chat_lines(tui)),
        Route::NewChat { from_home } => ("New Chat", new_chat_lines(from_home)),
        Route::Settings => ("Settings", settings_lines(tui)),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn home_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Welcome to ChatNav",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Pick a conversation on the left, or start a new one.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "Drag the sidebar edge to resize it; click it to collapse.",
            Style::default().fg(Color::Gray),
        )),
    ]
}

fn chat_lines(tui: &TuiState) -> Vec<Line<'static>> {
    let Some(session) = tui.store.current_session() else {
        return vec![Line::from("No conversation selected.")];
    };
    vec![
        Line::from(Span::styled(
            session.topic.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "Conversation {} of {} · {} messages",
                tui.store.current_index() + 1,
                tui.store.session_count(),
                session.message_count
            ),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!("Last updated {}", session.last_update.format("%Y-%m-%d %H:%M")),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn new_chat_lines(from_home: bool) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "Choose a mask to start with",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Masks preset the assistant's persona for a new conversation.",
            Style::default().fg(Color::Gray),
        )),
    ];
    if from_home {
        lines.push(Line::from(Span::styled(
            "Opened from the mask gallery.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn settings_lines(tui: &TuiState) -> Vec<Line<'static>> {
    let config = &tui.config;
    let modifiers: Vec<&str> = config
        .hotkeys
        .modifiers
        .iter()
        .map(|modifier| match modifier {
            HotkeyModifier::Ctrl => "ctrl",
            HotkeyModifier::Alt => "alt",
            HotkeyModifier::Super => "super",
            HotkeyModifier::Shift => "shift",
        })
        .collect();
    let label = Style::default().fg(Color::Gray);

    vec![
        Line::from(vec![
            Span::styled("Sidebar width: ", label),
            Span::raw(format!("{}px", config.sidebar_width)),
        ]),
        Line::from(vec![
            Span::styled("Skip mask picker: ", label),
            Span::raw(config.dont_show_mask_splash_screen.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Switch modifiers: ", label),
            Span::raw(modifiers.join(", ")),
        ]),
        Line::from(vec![
            Span::styled("Drag timing: ", label),
            Span::raw(format!(
                "{}ms rate limit, {}ms click",
                config.drag.rate_limit_ms, config.drag.click_threshold_ms
            )),
        ]),
    ]
}

fn render_status_line(tui: &TuiState, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }

    let line = if let Some(toast) = &tui.toast {
        Line::from(Span::styled(
            truncate_with_ellipsis(&toast.message, usize::from(area.width)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    } else {
        let mut spans = Vec::new();
        for (i, (key, action)) in KEY_HINTS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
            spans.push(Span::styled(
                format!(" {action}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
}
