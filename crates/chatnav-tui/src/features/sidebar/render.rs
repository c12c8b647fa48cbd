use chatnav_core::sessions::{ChatStore, SessionStore};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{SidebarLayout, SidebarState, button_labels, list_offset};
use crate::common::{display_width, truncate_with_ellipsis};

const TITLE: &str = "ChatNav";
const SUBTITLE: &str = "Your conversations";

/// Draws the sidebar into `panel`.
pub fn render_sidebar(
    frame: &mut Frame,
    panel: Rect,
    sidebar: &SidebarState,
    store: &ChatStore,
    has_handle: bool,
) {
    let is_narrow = sidebar.is_narrow();
    let layout = SidebarLayout::compute(panel, is_narrow, has_handle);

    render_header(frame, &layout, is_narrow);
    render_session_list(frame, &layout, store, is_narrow);
    render_buttons(frame, &layout, is_narrow);

    if let Some(handle) = layout.drag_handle {
        let color = if sidebar.drag.is_dragging() {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let lines: Vec<Line> = (0..handle.height).map(|_| Line::from("│")).collect();
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().fg(color)),
            handle,
        );
    }
}

fn render_header(frame: &mut Frame, layout: &SidebarLayout, is_narrow: bool) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let lines = if is_narrow {
        vec![Line::from(Span::styled("◆", title_style))]
    } else {
        vec![
            Line::from(Span::styled(TITLE, title_style)),
            Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::DarkGray))),
        ]
    };
    frame.render_widget(Paragraph::new(lines), layout.header);
}

fn render_session_list(
    frame: &mut Frame,
    layout: &SidebarLayout,
    store: &ChatStore,
    is_narrow: bool,
) {
    let list = layout.list;
    if list.height == 0 || list.width == 0 {
        return;
    }

    let count = store.session_count();
    let current = store.current_index();
    let offset = list_offset(current, count, usize::from(list.height));
    let width = usize::from(list.width);

    let lines: Vec<Line> = store
        .sessions()
        .iter()
        .enumerate()
        .skip(offset)
        .take(usize::from(list.height))
        .map(|(index, session)| {
            let style = if index == current {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            if is_narrow {
                let label = format!("{:^width$}", index + 1);
                return Line::from(Span::styled(label, style));
            }

            let count_label = format!("{} msgs", session.message_count);
            let topic_width = width.saturating_sub(usize::from(display_width(&count_label)) + 1);
            let topic = truncate_with_ellipsis(&session.topic, topic_width);
            let padding = width
                .saturating_sub(usize::from(display_width(&topic)))
                .saturating_sub(usize::from(display_width(&count_label)));
            Line::from(vec![
                Span::styled(topic, style),
                Span::styled(" ".repeat(padding), style),
                Span::styled(count_label, style.fg(Color::DarkGray)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), list);
}

fn render_buttons(frame: &mut Frame, layout: &SidebarLayout, is_narrow: bool) {
    let labels = button_labels(is_narrow);
    let plain = if is_narrow {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::Gray).bg(Color::Black)
    };
    let primary = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let danger = Style::default().fg(Color::Red);

    let buttons = [
        (layout.masks, labels.masks, plain),
        (layout.plugins, labels.plugins, plain),
        (layout.delete, labels.delete, danger),
        (layout.settings, labels.settings, plain),
        (layout.notice, labels.notice, plain),
        (layout.new_chat, labels.new_chat, primary),
    ];
    for (area, label, style) in buttons {
        if area.width == 0 || area.height == 0 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(Span::styled(label, style)).alignment(Alignment::Left),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use chatnav_core::config::Config;
    use chatnav_core::sessions::ChatSession;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_wide_sidebar_shows_labels_and_topics() {
        let config = Config::default();
        let mut sidebar = SidebarState::new(&config);
        sidebar.bind_layout(300, 120, 20);
        let store = ChatStore::with_sessions(vec![ChatSession::with_topic("Trip planning", 4)]);

        let mut terminal = Terminal::new(TestBackend::new(38, 20)).unwrap();
        terminal
            .draw(|frame| render_sidebar(frame, Rect::new(0, 0, 38, 20), &sidebar, &store, true))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Trip planning"));
        assert!(text.contains("4 msgs"));
        assert!(text.contains("New Chat"));
        assert!(text.contains("Masks"));
    }

    #[test]
    fn test_narrow_sidebar_hides_text_labels() {
        let config = Config::default();
        let mut sidebar = SidebarState::new(&config);
        sidebar.bind_layout(100, 120, 20);
        let store = ChatStore::with_sessions(vec![ChatSession::with_topic("Trip planning", 4)]);

        let mut terminal = Terminal::new(TestBackend::new(13, 20)).unwrap();
        terminal
            .draw(|frame| render_sidebar(frame, Rect::new(0, 0, 13, 20), &sidebar, &store, true))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(!text.contains("New Chat"));
        assert!(!text.contains("Trip"));
        assert!(text.contains('1'));
    }
}
