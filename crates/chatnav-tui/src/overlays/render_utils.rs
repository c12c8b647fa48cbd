use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::display_width;

/// Centers an overlay of the requested size inside `area`, shrinking it to fit.
pub fn calculate_overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));

    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Renders the base container for an overlay (clears background, draws border and title).
pub fn render_overlay_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

pub struct OverlayConfig<'a> {
    pub title: &'a str,
    pub border_color: Color,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
}

/// Layout rectangles for an overlay.
pub struct OverlayLayout {
    pub popup: Rect,
    pub body: Rect,
}

/// Layout of a standard overlay inside `area`, without drawing anything.
///
/// Mouse hit-testing uses this to find the same rectangles the renderer draws.
pub fn overlay_layout(area: Rect, config: &OverlayConfig<'_>) -> OverlayLayout {
    let popup = calculate_overlay_area(area, config.width, config.height);
    let footer_height = u16::from(!config.hints.is_empty());
    let body = Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2 + footer_height),
    );

    OverlayLayout { popup, body }
}

/// Render a standard overlay container and return its layout.
pub fn render_overlay(frame: &mut Frame, area: Rect, config: &OverlayConfig<'_>) -> OverlayLayout {
    let layout = overlay_layout(area, config);
    render_overlay_container(frame, layout.popup, config.title, config.border_color);

    if !config.hints.is_empty() {
        let inner = Rect::new(
            layout.body.x,
            layout.body.y,
            layout.body.width,
            layout.popup.height.saturating_sub(2),
        );
        render_hints(frame, inner, config.hints, config.border_color);
    }

    layout
}

/// Places `[ label ]` buttons centered on `row`, one column apart.
///
/// Buttons past the right edge are clipped; fully hidden ones get zero width.
pub fn button_row_areas(row: Rect, labels: &[&str]) -> Vec<Rect> {
    let widths: Vec<u16> = labels
        .iter()
        .map(|label| display_width(label).saturating_add(4))
        .collect();
    let gaps = u16::try_from(widths.len().saturating_sub(1)).unwrap_or(u16::MAX);
    let total = widths.iter().fold(gaps, |sum, w| sum.saturating_add(*w));

    let right = row.x.saturating_add(row.width);
    let mut x = row.x + row.width.saturating_sub(total) / 2;
    let mut areas = Vec::with_capacity(widths.len());
    for width in widths {
        areas.push(Rect::new(x, row.y, width.min(right.saturating_sub(x)), 1));
        x = x.saturating_add(width + 1).min(right);
    }
    areas
}

/// Index of the button under (`column`, `row`), if any.
pub fn button_at(areas: &[Rect], column: u16, row: u16) -> Option<usize> {
    let position = Position::new(column, row);
    areas.iter().position(|area| area.contains(position))
}

/// Draws buttons into the areas from [`button_row_areas`], highlighting `focused`.
pub fn render_buttons(
    frame: &mut Frame,
    areas: &[Rect],
    labels: &[&str],
    focused: Option<usize>,
    color: Color,
) {
    for (index, (area, label)) in areas.iter().zip(labels).enumerate() {
        if area.width == 0 {
            continue;
        }
        let style = if focused == Some(index) {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!("[ {label} ]"), style)),
            *area,
        );
    }
}

/// Helper struct for keyboard hints.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

/// Renders a line of keyboard hints at the bottom of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight_color: Color) {
    let hints_y = area.y + area.height.saturating_sub(1);
    let hints_area = Rect::new(area.x, hints_y, area.width, 1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight_color)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

/// Renders a separator line `y_offset` rows into `area`.
pub fn render_separator(frame: &mut Frame, area: Rect, y_offset: u16) {
    if y_offset >= area.height {
        return;
    }
    let separator = "─".repeat(area.width as usize);
    let separator_area = Rect::new(area.x, area.y + y_offset, area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        separator_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_area_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(
            calculate_overlay_area(area, 50, 10),
            Rect::new(25, 15, 50, 10)
        );
    }

    #[test]
    fn test_body_leaves_room_for_border_and_hints() {
        let config = OverlayConfig {
            title: "t",
            border_color: Color::Cyan,
            width: 40,
            height: 8,
            hints: &[InputHint { key: "Esc", action: "close" }],
        };
        let layout = overlay_layout(Rect::new(0, 0, 100, 40), &config);
        assert_eq!(layout.popup, Rect::new(30, 16, 40, 8));
        assert_eq!(layout.body, Rect::new(31, 17, 38, 5));
    }

    #[test]
    fn test_button_row_is_centered_and_hit_tested() {
        let row = Rect::new(10, 5, 30, 1);
        let areas = button_row_areas(row, &["Yes", "No"]);
        // "[ Yes ]" is 7 wide, "[ No ]" is 6, plus one gap: 14 of 30.
        assert_eq!(areas, vec![Rect::new(18, 5, 7, 1), Rect::new(26, 5, 6, 1)]);

        assert_eq!(button_at(&areas, 18, 5), Some(0));
        assert_eq!(button_at(&areas, 25, 5), None);
        assert_eq!(button_at(&areas, 31, 5), Some(1));
        assert_eq!(button_at(&areas, 31, 6), None);
    }

    #[test]
    fn test_button_row_clips_to_width() {
        let areas = button_row_areas(Rect::new(0, 0, 10, 1), &["Release notes", "Close"]);
        assert_eq!(areas[0], Rect::new(0, 0, 10, 1));
        assert_eq!(areas[1].width, 0);
        assert_eq!(button_at(&areas, 10, 0), None);
    }

    #[test]
    fn test_overlay_area_shrinks_to_fit() {
        let area = Rect::new(10, 0, 30, 8);
        let popup = calculate_overlay_area(area, 50, 20);
        assert_eq!(popup.width, 28);
        assert_eq!(popup.height, 6);
        assert!(popup.x >= area.x);
    }
}
