//! Rendering helpers for the event loop

use std::time::Instant;

use ratatui::prelude::*;

use crate::core::{AppState, ViewMode};
use crate::handler::{ControlHitMap, KeyBindingRegistry};
use crate::render::{
    render_banner, render_controls, render_help_popup, render_live_region,
    render_selection_popup, render_slide, render_status_bar, render_tooltip, RenderOptions,
};

/// Context for rendering a frame
pub struct RenderContext<'a> {
    pub state: &'a AppState,
    pub keys: &'a KeyBindingRegistry,
    pub options: &'a RenderOptions,
    pub now: Instant,
    /// Rebuilt every frame from the controls actually drawn
    pub hits: &'a mut ControlHitMap,
}

/// Render a complete frame
pub fn render_frame(frame: &mut Frame, ctx: RenderContext) {
    let RenderContext {
        state,
        keys,
        options,
        now,
        hits,
    } = ctx;
    hits.clear();

    let banner = state.warnings.banner();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if banner.is_some() { 1 } else { 0 }),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    if let Some(ref banner) = banner {
        render_banner(frame, banner, chunks[0]);
    }
    render_slide(frame, state, chunks[1], now, hits);
    render_controls(frame, state, chunks[2], options, hits);
    render_status_bar(frame, state, chunks[3], hits);
    render_live_region(frame, state, chunks[4]);

    // Tooltip sits on top of the slide, so its regions are registered last
    render_tooltip(frame, state, chunks[1], hits);

    match state.mode {
        ViewMode::Present => {}
        ViewMode::Help => {
            hits.clear();
            render_help_popup(frame, keys);
        }
        ViewMode::Selection { .. } => {
            hits.clear();
            render_selection_popup(frame, state);
        }
    }
}
