//! Status line, warning banner and live region

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::AppState;
use crate::handler::{Control, ControlHitMap};

const COPY_LABEL: &str = "[⧉ Copy refs]";
const COPIED_LABEL: &str = "[✓ Copied!]";

/// Label of the copy button
pub fn copy_label(copied: bool) -> &'static str {
    if copied {
        COPIED_LABEL
    } else {
        COPY_LABEL
    }
}

/// Render the one-line status bar
pub fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect, hits: &mut ControlHitMap) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    // Left: copy button, grounding badge, message or help hint
    let label = copy_label(state.copy_confirmed);
    let label_style = if state.copy_confirmed {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let message = state.message.as_deref().unwrap_or("? for help");
    let left = Line::from(vec![
        Span::styled(label, label_style),
        Span::raw(" "),
        Span::styled(state.grounding_badge(), Style::default().fg(Color::Yellow)),
        Span::raw(format!(" | {}", message)),
    ]);
    frame.render_widget(Paragraph::new(left), chunks[0]);

    let label_width = Line::from(label).width() as u16;
    hits.register(
        Rect::new(chunks[0].x, chunks[0].y, label_width.min(chunks[0].width), 1),
        Control::CopyButton,
    );

    // Right: location fragment and edge policy
    let location = state.surface.location.as_deref().unwrap_or("--");
    let mut right = format!("{} · {}", location, state.navigator().policy().display_name());
    if state.paused {
        right.push_str(" · paused");
    }
    let para = Paragraph::new(right)
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, chunks[1]);
}

/// Missing deck fields, shown above the slide
pub fn render_banner(frame: &mut Frame, banner: &str, area: Rect) {
    let para = Paragraph::new(banner).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(para, area);
}

/// Screen-reader announcement line
pub fn render_live_region(frame: &mut Frame, state: &AppState, area: Rect) {
    if let Some(ref text) = state.surface.live_region {
        let para = Paragraph::new(text.as_str()).style(Style::default().fg(Color::Gray));
        frame.render_widget(para, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_label_reverts() {
        assert_eq!(copy_label(true), "[✓ Copied!]");
        assert_eq!(copy_label(false), "[⧉ Copy refs]");
    }
}
