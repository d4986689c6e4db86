//! Navigation controls: prev/next buttons, progress bar, dots and counter

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph},
    Frame,
};

use crate::core::AppState;
use crate::handler::{Control, ControlHitMap};
use crate::view::ProgressView;

use super::RenderOptions;

const ACTIVE_DOT: &str = "●";
const INACTIVE_DOT: &str = "○";

/// Render the controls row (3 lines high)
pub fn render_controls(
    frame: &mut Frame,
    state: &AppState,
    area: Rect,
    options: &RenderOptions,
    hits: &mut ControlHitMap,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10),
            Constraint::Min(0),
            Constraint::Length(13),
        ])
        .split(area);

    if let Some(buttons) = state.surface.buttons {
        render_button(
            frame,
            "◀ Prev",
            buttons.prev_disabled,
            chunks[0],
            Control::PrevButton,
            hits,
        );
        render_button(
            frame,
            buttons.next_label(),
            buttons.next_disabled,
            chunks[2],
            Control::NextButton,
            hits,
        );
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(chunks[1]);

    if let Some(ref progress) = state.surface.progress {
        if options.show_progress_bar {
            let gauge = LineGauge::default()
                .filled_style(Style::default().fg(Color::Cyan))
                .unfilled_style(Style::default().fg(Color::DarkGray))
                .label("")
                .ratio(progress.ratio.clamp(0.0, 1.0));
            frame.render_widget(gauge, rows[0]);
        }
        if options.show_progress_dots {
            render_dots(frame, progress, rows[1], hits);
        }
    }

    if let Some(ref counter) = state.surface.counter {
        let para = Paragraph::new(counter.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(para, rows[2]);
    }
}

fn render_button(
    frame: &mut Frame,
    label: &str,
    disabled: bool,
    area: Rect,
    control: Control,
    hits: &mut ControlHitMap,
) {
    let style = if disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    let para = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    frame.render_widget(para, area);

    if !disabled {
        hits.register(area, control);
    }
}

/// Dots are laid out as "● ○ ○", centered. Each dot is clickable.
fn render_dots(frame: &mut Frame, progress: &ProgressView, area: Rect, hits: &mut ControlHitMap) {
    let visible = dot_capacity(area.width).min(progress.dots.len());
    if visible == 0 {
        return;
    }
    let used = (visible * 2 - 1) as u16;
    let start = area.x + (area.width.saturating_sub(used)) / 2;

    let spans: Vec<Span> = progress.dots[..visible]
        .iter()
        .enumerate()
        .flat_map(|(i, active)| {
            let dot = if *active {
                Span::styled(ACTIVE_DOT, Style::default().fg(Color::Cyan))
            } else {
                Span::styled(INACTIVE_DOT, Style::default().fg(Color::DarkGray))
            };
            let gap = if i + 1 < visible { " " } else { "" };
            [dot, Span::raw(gap)]
        })
        .collect();
    let line_area = Rect::new(start, area.y, used.min(area.width), 1);
    frame.render_widget(Paragraph::new(Line::from(spans)), line_area);

    for i in 0..visible {
        let x = start + (i * 2) as u16;
        hits.register(Rect::new(x, area.y, 1, 1), Control::Dot(i));
    }
}

/// How many dots fit in `width` cells
fn dot_capacity(width: u16) -> usize {
    (usize::from(width) + 1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_capacity_counts_gaps() {
        assert_eq!(dot_capacity(0), 0);
        assert_eq!(dot_capacity(1), 1);
        assert_eq!(dot_capacity(5), 3);
        assert_eq!(dot_capacity(6), 3);
    }
}
