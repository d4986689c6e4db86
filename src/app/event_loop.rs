//! Main event loop for the application

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use ratatui::prelude::*;

use crate::app::{exit_code, Config};
use crate::content::DeckContent;
use crate::core::{AppState, ViewMode};
use crate::handler::{
    handle_key_event, handle_mouse_event, resolve_fragment, ControlHitMap, KeyBindingRegistry,
    SwipeDetector,
};
use crate::watcher::{LocationFile, LocationWatcher};

use super::render::{render_frame, RenderContext};

/// Redraw interval while a slide is animating in
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Longest wait between loop iterations when nothing is scheduled
const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Result of running the app
pub struct AppResult {
    pub exit_code: i32,
    /// Slide shown when the presenter exited
    pub final_slide: usize,
}

/// Starting slide: `--slide` first, then the location file, then the first slide
pub fn start_index(fragment: Option<&str>, location: Option<&LocationFile>, total: usize) -> usize {
    fragment
        .map(str::to_string)
        .or_else(|| location.and_then(LocationFile::read))
        .map(|raw| resolve_fragment(&raw, total))
        .unwrap_or(0)
}

/// Load the deck and build the presenter state
pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let deck_path = config
        .deck
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("no deck file given"))?;
    let content = DeckContent::load(deck_path)
        .with_context(|| format!("failed to load deck {}", deck_path.display()))?;

    let location = config.location_file.as_ref().map(LocationFile::new);
    let start = start_index(
        config.start_fragment.as_deref(),
        location.as_ref(),
        content.total_slides(),
    );

    let mut state = AppState::new(content, config.settings.clone(), start)?;
    if let Some(location) = location {
        state = state.with_location(location);
    }
    tracing::info!(
        deck = %deck_path.display(),
        slides = state.total(),
        start,
        policy = state.navigator().policy().display_name(),
        "deck loaded"
    );
    Ok(state)
}

/// How long to wait for input before the next iteration
fn poll_timeout(state: &AppState, now: Instant) -> Duration {
    let timeout = state
        .next_timeout(now)
        .unwrap_or(IDLE_INTERVAL)
        .min(IDLE_INTERVAL);
    if state.transition_progress(now).is_some() {
        timeout.min(FRAME_INTERVAL)
    } else {
        timeout
    }
}

/// Pause animations while unfocused. A drag in progress is abandoned,
/// since its release may happen elsewhere.
fn focus_changed(state: &mut AppState, swipe: &mut SwipeDetector, focused: bool) {
    if !focused {
        swipe.reset();
    }
    state.paused = !focused;
}

/// Main event loop
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &Config,
    mut state: AppState,
) -> anyhow::Result<AppResult> {
    let watcher = match config.location_file.as_deref() {
        Some(path) => match LocationWatcher::new(path) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                // Continue without following external edits
                tracing::warn!(path = %path.display(), "location watcher unavailable: {}", e);
                None
            }
        },
        None => None,
    };

    let keys = KeyBindingRegistry::from_file();
    let mut swipe = SwipeDetector::new(config.swipe_min_distance);
    let mut hits = ControlHitMap::new();
    let mut mouse_captured = config.mouse_enabled;

    loop {
        let now = Instant::now();
        state.tick(now);

        if state.layout_dirty {
            state.layout_dirty = false;
            hits.clear();
            terminal.clear()?;
        }

        // Release the mouse while the selection popup is open so the
        // terminal's own text selection works
        let want_capture =
            config.mouse_enabled && !matches!(state.mode, ViewMode::Selection { .. });
        if want_capture != mouse_captured {
            if want_capture {
                execute!(terminal.backend_mut(), EnableMouseCapture)?;
            } else {
                execute!(terminal.backend_mut(), DisableMouseCapture)?;
                swipe.reset();
            }
            mouse_captured = want_capture;
        }

        terminal.draw(|frame| {
            render_frame(
                frame,
                RenderContext {
                    state: &state,
                    keys: &keys,
                    options: &config.render,
                    now,
                    hits: &mut hits,
                },
            )
        })?;

        if let Some(ref watcher) = watcher {
            if watcher.poll() {
                if let Some(fragment) = state.location().and_then(LocationFile::external_change) {
                    tracing::debug!(%fragment, "location changed externally");
                    state.navigate_to_fragment(&fragment, Instant::now());
                }
            }
        }

        if state.should_quit {
            break;
        }

        if event::poll(poll_timeout(&state, now))? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = handle_key_event(&state.mode, &keys, key);
                    state.apply(action, now);
                }
                Event::Mouse(mouse) if mouse_captured && state.mode == ViewMode::Present => {
                    let action = handle_mouse_event(mouse, &mut swipe, &hits);
                    state.apply(action, now);
                }
                Event::Resize(..) => state.schedule_resize(now),
                Event::FocusLost => focus_changed(&mut state, &mut swipe, false),
                Event::FocusGained => focus_changed(&mut state, &mut swipe, true),
                _ => {}
            }
        }
    }

    Ok(AppResult {
        exit_code: exit_code::SUCCESS,
        final_slide: state.current(),
    })
}
