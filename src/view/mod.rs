//! View reflection
//!
//! After every committed slide change the reflector projects the slide model
//! onto each view target. Steps are independent: a missing target is logged
//! and skipped, the rest still run. Steps only read the model.

use crate::core::{EdgePolicy, SlideDirection, SlideIndexModel};
use crate::error::{DeckviewError, Result};
use crate::handler::encode_fragment;

/// Per-slide animation state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlideMarker {
    Active,
    /// Departed while moving forward
    Prev,
    /// Departed while moving backward
    Next,
    #[default]
    Hidden,
}

/// Progress bar ratio and dot states
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressView {
    /// 0.0 on the first slide, 1.0 on the last
    pub ratio: f64,
    pub dots: Vec<bool>,
}

/// Prev/next control state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub prev_disabled: bool,
    pub next_disabled: bool,
    /// True when Next restarts the deck
    pub next_restarts: bool,
}

impl ButtonState {
    pub fn next_label(&self) -> &'static str {
        if self.next_restarts {
            "Restart ↻"
        } else {
            "Next ▶"
        }
    }
}

/// Render targets. `None` means the target is not mounted.
#[derive(Debug, Clone, Default)]
pub struct ViewSurface {
    pub progress: Option<ProgressView>,
    pub counter: Option<String>,
    pub buttons: Option<ButtonState>,
    pub markers: Option<Vec<SlideMarker>>,
    pub location: Option<String>,
    pub live_region: Option<String>,
}

/// Which targets to mount
#[derive(Debug, Clone, Copy)]
pub struct SurfaceLayout {
    pub progress: bool,
    pub counter: bool,
    pub announcement: bool,
}

impl Default for SurfaceLayout {
    fn default() -> Self {
        Self {
            progress: true,
            counter: true,
            announcement: true,
        }
    }
}

impl ViewSurface {
    /// Mount targets according to `layout`; buttons, markers and location
    /// are always present
    pub fn mount(layout: SurfaceLayout) -> Self {
        Self {
            progress: layout.progress.then(ProgressView::default),
            counter: layout.counter.then(String::new),
            buttons: Some(ButtonState::default()),
            markers: Some(Vec::new()),
            location: Some(String::new()),
            live_region: layout.announcement.then(String::new),
        }
    }

    /// Index of the slide marked active
    pub fn active_slide(&self) -> Option<usize> {
        self.markers
            .as_ref()?
            .iter()
            .position(|m| *m == SlideMarker::Active)
    }
}

/// Inputs shared by every reflection step
pub struct Reflection<'a> {
    pub model: &'a SlideIndexModel,
    pub policy: EdgePolicy,
    pub title: &'a str,
    /// Whether the departing slide should carry a direction hint
    pub in_transition: bool,
}

type Step = fn(&Reflection, &mut ViewSurface) -> Result<()>;

const STEPS: [(&str, Step); 6] = [
    ("progress", reflect_progress),
    ("counter", reflect_counter),
    ("buttons", reflect_buttons),
    ("markers", reflect_markers),
    ("location", reflect_location),
    ("announcement", reflect_announcement),
];

/// Steps skipped during a reflection pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflectionReport {
    pub skipped: Vec<&'static str>,
}

impl ReflectionReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Runs every reflection step against a surface
pub struct ViewReflector;

impl ViewReflector {
    /// Project the model onto every mounted target
    pub fn reflect(input: &Reflection, surface: &mut ViewSurface) -> ReflectionReport {
        let mut report = ReflectionReport::default();
        for (name, step) in STEPS {
            if let Err(e) = step(input, surface) {
                tracing::warn!(step = name, "{}", e);
                report.skipped.push(name);
            }
        }
        report
    }

    /// Drop direction hints once the transition has settled
    pub fn settle_markers(surface: &mut ViewSurface) {
        if let Some(markers) = surface.markers.as_mut() {
            for m in markers.iter_mut() {
                if matches!(m, SlideMarker::Prev | SlideMarker::Next) {
                    *m = SlideMarker::Hidden;
                }
            }
        }
    }
}

/// Progress bar ratio for `current` in a deck of `total`
pub fn progress_ratio(current: usize, total: usize) -> f64 {
    if total <= 1 {
        1.0
    } else {
        current as f64 / (total - 1) as f64
    }
}

/// Screen-reader announcement for a slide
pub fn announcement(current: usize, total: usize, title: &str) -> String {
    format!("Slide {} of {}: {}", current + 1, total, title)
}

fn reflect_progress(input: &Reflection, surface: &mut ViewSurface) -> Result<()> {
    let progress = surface
        .progress
        .as_mut()
        .ok_or(DeckviewError::MissingTarget("progress"))?;
    let (current, total) = (input.model.current(), input.model.total());
    progress.ratio = progress_ratio(current, total);
    progress.dots = (0..total).map(|i| i == current).collect();
    Ok(())
}

fn reflect_counter(input: &Reflection, surface: &mut ViewSurface) -> Result<()> {
    let counter = surface
        .counter
        .as_mut()
        .ok_or(DeckviewError::MissingTarget("counter"))?;
    *counter = format!("{} of {}", input.model.current() + 1, input.model.total());
    Ok(())
}

fn reflect_buttons(input: &Reflection, surface: &mut ViewSurface) -> Result<()> {
    let buttons = surface
        .buttons
        .as_mut()
        .ok_or(DeckviewError::MissingTarget("buttons"))?;
    let at_last = input.model.is_last();
    *buttons = match input.policy {
        EdgePolicy::Clamp => ButtonState {
            prev_disabled: input.model.is_first(),
            next_disabled: at_last,
            next_restarts: false,
        },
        EdgePolicy::Wrap => ButtonState {
            prev_disabled: input.model.is_first(),
            next_disabled: false,
            next_restarts: at_last,
        },
    };
    Ok(())
}

fn reflect_markers(input: &Reflection, surface: &mut ViewSurface) -> Result<()> {
    let markers = surface
        .markers
        .as_mut()
        .ok_or(DeckviewError::MissingTarget("markers"))?;
    let current = input.model.current();

    markers.clear();
    markers.resize(input.model.total(), SlideMarker::Hidden);
    if input.in_transition {
        if let Some((from, direction)) = input.model.last_move() {
            if from != current && from < markers.len() {
                markers[from] = match direction {
                    SlideDirection::Forward => SlideMarker::Prev,
                    SlideDirection::Backward => SlideMarker::Next,
                };
            }
        }
    }
    markers[current] = SlideMarker::Active;
    Ok(())
}

fn reflect_location(input: &Reflection, surface: &mut ViewSurface) -> Result<()> {
    let location = surface
        .location
        .as_mut()
        .ok_or(DeckviewError::MissingTarget("location"))?;
    *location = encode_fragment(input.model.current());
    Ok(())
}

fn reflect_announcement(input: &Reflection, surface: &mut ViewSurface) -> Result<()> {
    let live = surface
        .live_region
        .as_mut()
        .ok_or(DeckviewError::MissingTarget("announcement"))?;
    *live = announcement(input.model.current(), input.model.total(), input.title);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NavigationIntent, Navigator};

    fn reflect_at(nav: &Navigator, surface: &mut ViewSurface, in_transition: bool) -> ReflectionReport {
        let input = Reflection {
            model: nav.model(),
            policy: nav.policy(),
            title: "Key Terms",
            in_transition,
        };
        ViewReflector::reflect(&input, surface)
    }

    #[test]
    fn full_reflection() {
        let nav = Navigator::new(12, 2, EdgePolicy::Clamp).unwrap();
        let mut surface = ViewSurface::mount(SurfaceLayout::default());
        let report = reflect_at(&nav, &mut surface, false);

        assert!(report.is_complete());
        assert_eq!(surface.counter.as_deref(), Some("3 of 12"));
        assert_eq!(surface.location.as_deref(), Some("#slide-2"));
        assert_eq!(
            surface.live_region.as_deref(),
            Some("Slide 3 of 12: Key Terms")
        );
        let progress = surface.progress.as_ref().unwrap();
        assert!((progress.ratio - 2.0 / 11.0).abs() < 1e-9);
        assert_eq!(progress.dots.iter().filter(|d| **d).count(), 1);
        assert!(progress.dots[2]);
        assert_eq!(surface.active_slide(), Some(2));
    }

    #[test]
    fn missing_targets_are_skipped_not_fatal() {
        let nav = Navigator::new(4, 1, EdgePolicy::Clamp).unwrap();
        let mut surface = ViewSurface::mount(SurfaceLayout {
            progress: false,
            counter: false,
            announcement: true,
        });
        let report = reflect_at(&nav, &mut surface, false);

        assert_eq!(report.skipped, vec!["progress", "counter"]);
        assert_eq!(surface.location.as_deref(), Some("#slide-1"));
        assert_eq!(surface.live_region.as_deref(), Some("Slide 2 of 4: Key Terms"));
    }

    #[test]
    fn buttons_under_clamp() {
        let mut surface = ViewSurface::mount(SurfaceLayout::default());
        let nav = Navigator::new(3, 0, EdgePolicy::Clamp).unwrap();
        reflect_at(&nav, &mut surface, false);
        let b = surface.buttons.unwrap();
        assert!(b.prev_disabled && !b.next_disabled);

        let nav = Navigator::new(3, 2, EdgePolicy::Clamp).unwrap();
        reflect_at(&nav, &mut surface, false);
        let b = surface.buttons.unwrap();
        assert!(!b.prev_disabled && b.next_disabled);
        assert_eq!(b.next_label(), "Next ▶");
    }

    #[test]
    fn buttons_under_wrap_never_disable_next() {
        let mut surface = ViewSurface::mount(SurfaceLayout::default());
        let nav = Navigator::new(3, 2, EdgePolicy::Wrap).unwrap();
        reflect_at(&nav, &mut surface, false);
        let b = surface.buttons.unwrap();
        assert!(!b.next_disabled);
        assert!(b.next_restarts);
        assert_eq!(b.next_label(), "Restart ↻");
    }

    #[test]
    fn departing_slide_gets_direction_hint() {
        let mut nav = Navigator::new(5, 1, EdgePolicy::Clamp).unwrap();
        let mut surface = ViewSurface::mount(SurfaceLayout::default());

        nav.request_navigate(NavigationIntent::Next);
        reflect_at(&nav, &mut surface, true);
        let markers = surface.markers.clone().unwrap();
        assert_eq!(markers[1], SlideMarker::Prev);
        assert_eq!(markers[2], SlideMarker::Active);

        ViewReflector::settle_markers(&mut surface);
        nav.settle_current();
        let markers = surface.markers.clone().unwrap();
        assert_eq!(markers[1], SlideMarker::Hidden);
        assert_eq!(markers[2], SlideMarker::Active);

        nav.request_navigate(NavigationIntent::Home);
        reflect_at(&nav, &mut surface, true);
        assert_eq!(surface.markers.as_ref().unwrap()[2], SlideMarker::Next);
    }

    #[test]
    fn exactly_one_active_for_every_index() {
        let mut surface = ViewSurface::mount(SurfaceLayout::default());
        for start in 0..7 {
            let mut nav = Navigator::new(7, start, EdgePolicy::Wrap).unwrap();
            nav.request_navigate(NavigationIntent::Next);
            reflect_at(&nav, &mut surface, true);
            let markers = surface.markers.as_ref().unwrap();
            assert_eq!(
                markers.iter().filter(|m| **m == SlideMarker::Active).count(),
                1
            );
            assert_eq!(surface.active_slide(), Some(nav.current()));
        }
    }

    #[test]
    fn single_slide_progress_is_full() {
        assert_eq!(progress_ratio(0, 1), 1.0);
        assert_eq!(progress_ratio(0, 5), 0.0);
        assert_eq!(progress_ratio(4, 5), 1.0);
    }
}
