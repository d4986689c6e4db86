//! Application state management
//!
//! `AppState` is the single context object: it owns the navigator, the chip
//! controller, the timers and the view surface, and every input channel
//! reaches them through [`AppState::apply`].

use std::time::{Duration, Instant};

use super::expand::{ChipId, DismissReason, ExpandableContentController, ToggleOutcome};
use super::gate::TransitionToken;
use super::intent::{EdgePolicy, NavigationIntent};
use super::mode::ViewMode;
use super::slide::{NavOutcome, Navigator, Rejection};
use super::timer::{Scheduler, TimerKey};
use crate::action::{ClipboardBackend, ClipboardExporter, CopyOutcome, SystemClipboard};
use crate::content::{ContentWarnings, DeckContent};
use crate::error::Result;
use crate::handler::{resolve_fragment, InputAction};
use crate::view::{Reflection, ReflectionReport, SurfaceLayout, ViewReflector, ViewSurface};
use crate::watcher::LocationFile;

/// Delay before a freshly expanded chip is scrolled into view
const SCROLL_INTO_VIEW_DELAY: Duration = Duration::from_millis(300);
/// Quiet period after the last resize before the layout is rebuilt
const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Timing and policy knobs (from config file and CLI)
#[derive(Debug, Clone)]
pub struct DeckSettings {
    pub policy: EdgePolicy,
    pub transition: Duration,
    pub tooltip_timeout: Duration,
    pub copy_confirm: Duration,
    pub layout: SurfaceLayout,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            policy: EdgePolicy::Clamp,
            transition: Duration::from_millis(450),
            tooltip_timeout: Duration::from_secs(10),
            copy_confirm: Duration::from_millis(2000),
            layout: SurfaceLayout::default(),
        }
    }
}

/// Main application state
pub struct AppState {
    /// Deck content (read-only)
    pub content: DeckContent,
    /// Missing deck fields found at startup
    pub warnings: ContentWarnings,
    /// Current view mode
    pub mode: ViewMode,
    /// Reflected view targets
    pub surface: ViewSurface,
    /// Status message
    pub message: Option<String>,
    /// "Copied!" confirmation is showing
    pub copy_confirmed: bool,
    /// Scroll offset of the slide body
    pub body_scroll: u16,
    /// Animations suspended (terminal lost focus)
    pub paused: bool,
    /// Layout must be rebuilt (debounced resize fired)
    pub layout_dirty: bool,
    /// Exit flag
    pub should_quit: bool,
    /// Why the last navigation request was dropped
    pub last_rejection: Option<Rejection>,
    /// Steps skipped by the last reflection pass
    pub last_report: ReflectionReport,
    navigator: Navigator,
    chips: ExpandableContentController,
    timers: Scheduler<TimerKey>,
    settings: DeckSettings,
    location: Option<LocationFile>,
    transition_started: Option<Instant>,
}

impl AppState {
    /// Create state for `content`, starting on slide `start`
    pub fn new(content: DeckContent, settings: DeckSettings, start: usize) -> Result<Self> {
        let navigator = Navigator::new(content.total_slides(), start, settings.policy)?;
        let warnings = content.validate();
        if let Some(banner) = warnings.banner() {
            tracing::warn!("{}", banner);
        }

        let mut state = Self {
            content,
            warnings,
            mode: ViewMode::Present,
            surface: ViewSurface::mount(settings.layout),
            message: None,
            copy_confirmed: false,
            body_scroll: 0,
            paused: false,
            layout_dirty: false,
            should_quit: false,
            last_rejection: None,
            last_report: ReflectionReport::default(),
            navigator,
            chips: ExpandableContentController::new(),
            timers: Scheduler::new(),
            settings,
            location: None,
            transition_started: None,
        };
        state.reflect(false);
        Ok(state)
    }

    /// Mirror the location fragment into `location` from now on
    pub fn with_location(mut self, location: LocationFile) -> Self {
        self.location = Some(location);
        self.sync_location();
        self
    }

    pub fn current(&self) -> usize {
        self.navigator.current()
    }

    pub fn total(&self) -> usize {
        self.navigator.model().total()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn chips(&self) -> &ExpandableContentController {
        &self.chips
    }

    pub fn settings(&self) -> &DeckSettings {
        &self.settings
    }

    pub fn location(&self) -> Option<&LocationFile> {
        self.location.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.navigator.gate().is_in_flight()
    }

    /// Grounding badge text
    pub fn grounding_badge(&self) -> String {
        self.chips.usage().badge(self.content.quotes.len())
    }

    /// Set status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear status message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Route one input action
    pub fn apply(&mut self, action: InputAction, now: Instant) {
        match action {
            InputAction::None => {}
            InputAction::Quit => self.should_quit = true,
            InputAction::Navigate(intent) => {
                self.navigate(intent, now);
            }
            InputAction::CollapseAll => self.collapse_all(),
            InputAction::ToggleChip(index) => self.toggle_chip(index, now),
            InputAction::CloseTooltip => self.dismiss_tooltip(DismissReason::Closed),
            InputAction::ClickOutside => self.dismiss_tooltip(DismissReason::ClickOutside),
            InputAction::CopyReferences => self.copy_references_with(SystemClipboard, now),
            InputAction::ShowHelp => self.mode = ViewMode::Help,
            InputAction::Cancel => {
                if matches!(self.mode, ViewMode::Selection { .. }) {
                    self.clear_message();
                }
                self.mode = ViewMode::Present;
            }
            InputAction::ScrollUp => self.scroll(-1),
            InputAction::ScrollDown => self.scroll(1),
        }
    }

    /// Request a slide change through the transition gate.
    ///
    /// Expanded content is collapsed before the commit; views are reflected
    /// after it and the gate release is scheduled.
    pub fn navigate(&mut self, intent: NavigationIntent, now: Instant) -> NavOutcome {
        if let Err(reason) = self.navigator.plan(intent) {
            self.last_rejection = Some(reason);
            tracing::debug!(?intent, %reason, "navigation rejected");
            return NavOutcome::Rejected(reason);
        }

        self.collapse_all();
        self.timers.cancel(&TimerKey::ScrollIntoView);
        self.body_scroll = 0;

        let outcome = self.navigator.request_navigate(intent);
        match outcome {
            NavOutcome::Applied { token, .. } => {
                self.last_rejection = None;
                self.timers
                    .schedule(TimerKey::TransitionRelease(token), self.settings.transition, now);
                self.transition_started = Some(now);
                self.reflect(true);
            }
            NavOutcome::Rejected(reason) => self.last_rejection = Some(reason),
        }
        outcome
    }

    /// A location fragment arrived (startup link or external change).
    ///
    /// When the fragment does not move the deck, the location file is put
    /// back to the committed slide.
    pub fn navigate_to_fragment(&mut self, raw: &str, now: Instant) -> NavOutcome {
        let index = resolve_fragment(raw, self.total());
        let outcome = self.navigate(NavigationIntent::GoTo(index), now);
        if !outcome.is_applied() {
            self.restore_location();
        }
        outcome
    }

    /// Toggle chip `index` on the active slide
    pub fn toggle_chip(&mut self, index: usize, now: Instant) {
        let slide = self.current();
        let Some(chip) = self.content.chip(slide, index) else {
            tracing::debug!(slide, index, "no such chip");
            return;
        };
        if !chip.is_expandable() {
            tracing::debug!(slide, index, "chip has nothing to expand");
            return;
        }
        let quote = chip.quote.filter(|q| *q < self.content.quotes.len());

        match self.chips.toggle(ChipId::new(slide, index), quote) {
            ToggleOutcome::Expanded {
                tooltip,
                closed_tooltip,
                ..
            } => {
                if let Some(old) = closed_tooltip {
                    self.timers.cancel(&TimerKey::TooltipDismiss(old));
                }
                if let Some(id) = tooltip {
                    self.timers.schedule(
                        TimerKey::TooltipDismiss(id),
                        self.settings.tooltip_timeout,
                        now,
                    );
                }
                self.timers
                    .schedule(TimerKey::ScrollIntoView, SCROLL_INTO_VIEW_DELAY, now);
            }
            ToggleOutcome::Collapsed { closed_tooltip, .. } => {
                if let Some(old) = closed_tooltip {
                    self.timers.cancel(&TimerKey::TooltipDismiss(old));
                }
                self.timers.cancel(&TimerKey::ScrollIntoView);
            }
        }
    }

    /// Collapse every chip and close the tooltip
    pub fn collapse_all(&mut self) {
        if let Some(id) = self.chips.collapse_all() {
            self.timers.cancel(&TimerKey::TooltipDismiss(id));
        }
    }

    /// Dismiss the open tooltip, if any. Safe to call repeatedly.
    pub fn dismiss_tooltip(&mut self, reason: DismissReason) {
        let Some(id) = self.chips.tooltip().map(|t| t.id) else {
            return;
        };
        self.chips.dismiss_tooltip(id, reason);
        self.timers.cancel(&TimerKey::TooltipDismiss(id));
    }

    /// Copy the reference list through `backend`
    pub fn copy_references_with(&mut self, backend: impl ClipboardBackend, now: Instant) {
        let mut exporter = ClipboardExporter::new(backend);
        match exporter.copy_references(&self.content.quotes) {
            CopyOutcome::Copied => {
                self.copy_confirmed = true;
                self.timers
                    .schedule(TimerKey::CopyConfirmation, self.settings.copy_confirm, now);
            }
            CopyOutcome::NeedsSelection(text) => {
                self.set_message("Clipboard unavailable: select the text to copy");
                self.mode = ViewMode::Selection { text, scroll: 0 };
            }
        }
    }

    /// Terminal was resized; rebuild the layout once resizing settles
    pub fn schedule_resize(&mut self, now: Instant) {
        self.timers.schedule(TimerKey::Resize, RESIZE_DEBOUNCE, now);
    }

    /// Fire every timer that is due
    pub fn tick(&mut self, now: Instant) {
        for key in self.timers.drain_due(now) {
            match key {
                TimerKey::TransitionRelease(token) => self.settle(token),
                TimerKey::TooltipDismiss(id) => {
                    self.chips.dismiss_tooltip(id, DismissReason::Timeout);
                }
                TimerKey::CopyConfirmation => self.copy_confirmed = false,
                TimerKey::ScrollIntoView => self.scroll_expanded_into_view(),
                TimerKey::Resize => self.layout_dirty = true,
            }
        }
    }

    /// Time until the next timer fires
    pub fn next_timeout(&self, now: Instant) -> Option<Duration> {
        self.timers.time_until_next(now)
    }

    /// Progress of the running transition in `[0, 1]`, if animating
    pub fn transition_progress(&self, now: Instant) -> Option<f64> {
        if self.paused {
            return None;
        }
        let started = self.transition_started?;
        let total = self.settings.transition.as_secs_f64();
        if total <= 0.0 {
            return None;
        }
        Some((now.duration_since(started).as_secs_f64() / total).min(1.0))
    }

    fn settle(&mut self, token: TransitionToken) {
        if self.navigator.settle(token) {
            ViewReflector::settle_markers(&mut self.surface);
            self.transition_started = None;
        }
    }

    fn reflect(&mut self, in_transition: bool) {
        let input = Reflection {
            model: self.navigator.model(),
            policy: self.navigator.policy(),
            title: self.content.title(self.navigator.current()),
            in_transition,
        };
        self.last_report = ViewReflector::reflect(&input, &mut self.surface);
        self.sync_location();
    }

    fn sync_location(&mut self) {
        let (Some(location), Some(fragment)) = (self.location.as_mut(), self.surface.location.as_deref())
        else {
            return;
        };
        if let Err(e) = location.write(fragment) {
            tracing::warn!(path = %location.path().display(), "location not written: {}", e);
        }
    }

    fn restore_location(&mut self) {
        let (Some(location), Some(fragment)) = (self.location.as_mut(), self.surface.location.as_deref())
        else {
            return;
        };
        if location.read().as_deref() == Some(fragment) {
            return;
        }
        tracing::debug!(%fragment, "restoring location file");
        if let Err(e) = location.force_write(fragment) {
            tracing::warn!(path = %location.path().display(), "location not written: {}", e);
        }
    }

    fn scroll(&mut self, delta: i32) {
        match &mut self.mode {
            ViewMode::Selection { scroll, .. } => *scroll = apply_delta(*scroll, delta),
            ViewMode::Present => self.body_scroll = apply_delta(self.body_scroll, delta),
            ViewMode::Help => {}
        }
    }

    fn scroll_expanded_into_view(&mut self) {
        let Some(chip) = self.chips.expanded() else {
            return;
        };
        if chip.slide != self.current() {
            return;
        }
        if let Some(slide) = self.content.slides.get(chip.slide) {
            let line = slide.chip_line(chip.index);
            self.body_scroll = u16::try_from(line.saturating_sub(2)).unwrap_or(u16::MAX);
        }
    }
}

fn apply_delta(value: u16, delta: i32) -> u16 {
    if delta < 0 {
        value.saturating_sub(delta.unsigned_abs() as u16)
    } else {
        value.saturating_add(delta as u16)
    }
}
