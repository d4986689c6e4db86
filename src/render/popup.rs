//! Popups: quote tooltip, key binding help and the copy-by-selection view

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::core::{AppState, ViewMode};
use crate::handler::{Control, ControlHitMap, KeyBindingRegistry};

const CLOSE_MARK: &str = "[×]";

/// Tooltip for the surfaced quote, anchored to the bottom of `area`
pub fn render_tooltip(frame: &mut Frame, state: &AppState, area: Rect, hits: &mut ControlHitMap) {
    let Some(tooltip) = state.chips().tooltip() else {
        return;
    };
    let Some(quote) = state.content.quote(tooltip.quote) else {
        return;
    };

    let width = (area.width * 3 / 5).max(30).min(area.width);
    let height = 7.min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + area.height - height,
        width,
        height,
    );

    let lines = vec![
        Line::from(Span::styled(
            format!("“{}”", quote.text),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("— {}, {} ({}), {}", quote.author, quote.work, quote.year, quote.cite),
            Style::default().fg(Color::Gray),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Quote ")
        .title(Line::from(CLOSE_MARK).right_aligned());
    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup);
    frame.render_widget(para, popup);

    hits.register(popup, Control::Tooltip);
    let close_width = Line::from(CLOSE_MARK).width() as u16;
    if popup.width > close_width + 1 {
        hits.register(
            Rect::new(popup.x + popup.width - close_width - 1, popup.y, close_width, 1),
            Control::TooltipClose,
        );
    }
}

/// Key binding overview
pub fn render_help_popup(frame: &mut Frame, keys: &KeyBindingRegistry) {
    let rows: [(&str, &str); 9] = [
        ("previous", "Previous slide"),
        ("next", "Next slide"),
        ("home", "First slide"),
        ("end", "Last slide"),
        ("collapse_all", "Collapse chips"),
        ("close_tooltip", "Close quote"),
        ("copy_references", "Copy references"),
        ("show_help", "This help"),
        ("quit", "Quit"),
    ];

    let mut lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for (action, description) in rows {
        let bound = keys.keys_for(action).join("/");
        lines.push(Line::from(format!("  {:<16} {}", bound, description)));
    }
    lines.push(Line::from("  1-9              Toggle chip N"));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Mouse",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from("  drag ←/→         Next / previous slide"));
    lines.push(Line::from("  click            Buttons, dots, chips, [×]"));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Esc, Enter or ? to close",
        Style::default().fg(Color::DarkGray),
    )));

    let area = centered_rect(60, lines.len() as u16 + 2, frame.area());
    let para = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(para, area);
}

/// Reference text laid out for manual selection when the clipboard is unavailable
pub fn render_selection_popup(frame: &mut Frame, state: &AppState) {
    let ViewMode::Selection { text, scroll } = &state.mode else {
        return;
    };
    let area = centered_rect(80, frame.area().height.saturating_sub(4), frame.area());
    let para = Paragraph::new(text.as_str())
        .scroll((*scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Select to copy · Esc to close ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(para, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
