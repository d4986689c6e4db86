//! Slide rendering

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::action::format_reference;
use crate::content::{Slide, SlideKind};
use crate::core::{AppState, SlideDirection};
use crate::handler::{Control, ControlHitMap};

/// Horizontal distance a slide travels while sliding in
const SLIDE_IN_CELLS: f64 = 6.0;

/// Background phase tied to the slide position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbientPhase {
    Open,
    Closed,
    MirrorWindow,
}

impl AmbientPhase {
    /// Phase for the 0-based slide `index`. Ranges count slides from 1.
    pub fn for_slide(index: usize) -> Self {
        match index + 1 {
            0..=3 => AmbientPhase::Open,
            4..=6 => AmbientPhase::Closed,
            _ => AmbientPhase::MirrorWindow,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AmbientPhase::Open => "open",
            AmbientPhase::Closed => "closed",
            AmbientPhase::MirrorWindow => "mirror-window",
        }
    }

    /// Border colour
    pub fn color(self) -> Color {
        match self {
            AmbientPhase::Open => Color::Cyan,
            AmbientPhase::Closed => Color::Magenta,
            AmbientPhase::MirrorWindow => Color::Yellow,
        }
    }
}

/// Slide area shifted for the slide-in animation
pub fn slide_in_area(
    area: Rect,
    progress: Option<f64>,
    last_move: Option<(usize, SlideDirection)>,
) -> Rect {
    let (Some(progress), Some((_, direction))) = (progress, last_move) else {
        return area;
    };
    let offset = ((1.0 - progress.clamp(0.0, 1.0)) * SLIDE_IN_CELLS).round() as u16;
    let offset = offset.min(area.width / 4);
    match direction {
        SlideDirection::Forward => Rect {
            x: area.x + offset,
            width: area.width - offset,
            ..area
        },
        SlideDirection::Backward => Rect {
            width: area.width - offset,
            ..area
        },
    }
}

/// Render the active slide and register its chips
pub fn render_slide(
    frame: &mut Frame,
    state: &AppState,
    area: Rect,
    now: Instant,
    hits: &mut ControlHitMap,
) {
    let index = state.current();
    let Some(slide) = state.content.slides.get(index) else {
        return;
    };
    let phase = AmbientPhase::for_slide(index);
    let area = slide_in_area(
        area,
        state.transition_progress(now),
        state.navigator().model().last_move(),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(phase.color()))
        .title(Span::styled(
            format!(" {} ", slide.title),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(format!(" {} ", phase.label())).right_aligned());
    let inner = block.inner(area);

    let (lines, chip_widths) = match slide.kind {
        SlideKind::Standard => standard_lines(slide, state, index),
        SlideKind::References => (reference_lines(state), Vec::new()),
    };
    let max_scroll = lines.len().saturating_sub(1);
    let scroll = usize::from(state.body_scroll).min(max_scroll);

    let para = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(para, area);

    for (chip, width) in chip_widths {
        let line = slide.chip_line(chip);
        let Some(row) = line.checked_sub(scroll) else {
            continue;
        };
        if row >= usize::from(inner.height) {
            continue;
        }
        let rect = Rect::new(
            inner.x,
            inner.y + row as u16,
            width.min(usize::from(inner.width)) as u16,
            1,
        );
        hits.register(rect, Control::Chip(chip));
    }
}

/// Lines of a standard slide plus (chip index, width) for expandable chips
fn standard_lines<'a>(
    slide: &'a Slide,
    state: &AppState,
    index: usize,
) -> (Vec<Line<'a>>, Vec<(usize, usize)>) {
    let mut lines = Vec::new();
    let mut chip_widths = Vec::new();

    if let Some(ref subtitle) = slide.subtitle {
        lines.push(Line::from(Span::styled(
            subtitle.as_str(),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }

    for body in &slide.body {
        lines.push(Line::from(body.as_str()));
    }
    if !slide.body.is_empty() {
        lines.push(Line::from(""));
    }

    let expanded = state.chips().expanded();
    for (i, chip) in slide.chips.iter().enumerate() {
        let is_expanded = expanded.is_some_and(|c| c.slide == index && c.index == i);
        let (marker, style) = if !chip.is_expandable() {
            ("·", Style::default().fg(Color::DarkGray))
        } else if is_expanded {
            (
                "▾",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("▸", Style::default().fg(Color::Cyan))
        };

        let line = Line::from(vec![
            Span::styled(format!("{} [{}] ", marker, i + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(chip.label.as_str(), style),
        ]);
        if chip.is_expandable() {
            chip_widths.push((i, line.width()));
        }
        lines.push(line);

        if is_expanded {
            if let Some(ref text) = chip.expanded_text {
                for text_line in text.lines() {
                    lines.push(Line::from(Span::styled(
                        format!("      {}", text_line),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::ITALIC),
                    )));
                }
            }
        }
    }

    (lines, chip_widths)
}

/// Reference list; quotes already surfaced are ticked
fn reference_lines(state: &AppState) -> Vec<Line<'static>> {
    let usage = state.chips().usage();
    state
        .content
        .quotes
        .iter()
        .enumerate()
        .map(|(i, quote)| {
            let (mark, style) = if usage.contains(i) {
                ("✓ ", Style::default().fg(Color::Green))
            } else {
                ("  ", Style::default())
            };
            Line::from(vec![
                Span::styled(mark, style),
                Span::raw(format_reference(quote)),
            ])
        })
        .collect()
}
