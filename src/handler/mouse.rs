//! Mouse input: swipe gestures and clickable controls

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use super::key::InputAction;
use crate::core::NavigationIntent;

/// Default minimum horizontal drag (in columns) that counts as a swipe
pub const DEFAULT_SWIPE_MIN_DISTANCE: u16 = 8;

/// Movement (in cells) below which a press/release pair is a click
const CLICK_SLOP: u16 = 1;

/// What a completed press/release pair turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Swipe(NavigationIntent),
    Click { column: u16, row: u16 },
    /// Moved too little for a swipe, too much for a click, or mostly vertical
    Dropped,
}

/// Tracks the start of a left-button drag and classifies it on release
#[derive(Debug, Clone)]
pub struct SwipeDetector {
    start: Option<(u16, u16)>,
    min_distance: u16,
}

impl Default for SwipeDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_MIN_DISTANCE)
    }
}

impl SwipeDetector {
    pub fn new(min_distance: u16) -> Self {
        Self {
            start: None,
            min_distance: min_distance.max(CLICK_SLOP + 1),
        }
    }

    /// Record the press position
    pub fn press(&mut self, column: u16, row: u16) {
        self.start = Some((column, row));
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Classify the gesture ending at (column, row).
    ///
    /// A release without a recorded press is treated as a click.
    pub fn release(&mut self, column: u16, row: u16) -> Gesture {
        let Some((start_col, start_row)) = self.start.take() else {
            return Gesture::Click { column, row };
        };

        let dx = i32::from(column) - i32::from(start_col);
        let dy = i32::from(row) - i32::from(start_row);
        let (adx, ady) = (dx.unsigned_abs(), dy.unsigned_abs());

        if adx <= u32::from(CLICK_SLOP) && ady <= u32::from(CLICK_SLOP) {
            return Gesture::Click { column, row };
        }
        // Vertical movement dominates: a scroll, not a swipe
        if adx < u32::from(self.min_distance) || ady >= adx {
            return Gesture::Dropped;
        }
        if dx < 0 {
            Gesture::Swipe(NavigationIntent::Next)
        } else {
            Gesture::Swipe(NavigationIntent::Previous)
        }
    }

    /// Forget a pending press (e.g. focus lost mid-drag)
    pub fn reset(&mut self) {
        self.start = None;
    }
}

/// Clickable control drawn on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    PrevButton,
    NextButton,
    /// Progress dot for the slide at this index
    Dot(usize),
    /// Chip at this position on the active slide
    Chip(usize),
    TooltipClose,
    /// Body of the tooltip (clicks here do not dismiss it)
    Tooltip,
    CopyButton,
}

impl Control {
    /// Action emitted when this control is clicked
    pub fn action(self) -> InputAction {
        match self {
            Control::PrevButton => InputAction::Navigate(NavigationIntent::Previous),
            Control::NextButton => InputAction::Navigate(NavigationIntent::Next),
            Control::Dot(index) => InputAction::Navigate(NavigationIntent::GoTo(index)),
            Control::Chip(index) => InputAction::ToggleChip(index),
            Control::TooltipClose => InputAction::CloseTooltip,
            Control::Tooltip => InputAction::None,
            Control::CopyButton => InputAction::CopyReferences,
        }
    }
}

/// Screen regions of the controls drawn in the last frame
#[derive(Debug, Default, Clone)]
pub struct ControlHitMap {
    regions: Vec<(Rect, Control)>,
}

impl ControlHitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Register a control. Later registrations sit on top of earlier ones.
    pub fn register(&mut self, area: Rect, control: Control) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, control));
        }
    }

    /// Topmost control under (column, row)
    pub fn hit(&self, column: u16, row: u16) -> Option<Control> {
        let pos = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(pos))
            .map(|(_, control)| *control)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Process a mouse event and return the resulting action
pub fn handle_mouse_event(
    event: MouseEvent,
    swipe: &mut SwipeDetector,
    hits: &ControlHitMap,
) -> InputAction {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            swipe.press(event.column, event.row);
            InputAction::None
        }
        MouseEventKind::Up(MouseButton::Left) => match swipe.release(event.column, event.row) {
            Gesture::Swipe(intent) => InputAction::Navigate(intent),
            Gesture::Click { column, row } => hits
                .hit(column, row)
                .map(Control::action)
                .unwrap_or(InputAction::ClickOutside),
            Gesture::Dropped => InputAction::None,
        },
        MouseEventKind::ScrollUp => InputAction::ScrollUp,
        MouseEventKind::ScrollDown => InputAction::ScrollDown,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn swipe_left_is_next() {
        let mut d = SwipeDetector::new(8);
        d.press(40, 10);
        assert_eq!(d.release(20, 11), Gesture::Swipe(NavigationIntent::Next));
    }

    #[test]
    fn swipe_right_is_previous() {
        let mut d = SwipeDetector::new(8);
        d.press(10, 10);
        assert_eq!(d.release(30, 9), Gesture::Swipe(NavigationIntent::Previous));
    }

    #[test]
    fn short_swipe_is_dropped() {
        let mut d = SwipeDetector::new(8);
        d.press(10, 10);
        assert_eq!(d.release(15, 10), Gesture::Dropped);
    }

    #[test]
    fn vertical_dominant_swipe_is_dropped() {
        let mut d = SwipeDetector::new(8);
        d.press(10, 2);
        assert_eq!(d.release(22, 14), Gesture::Dropped);
        d.press(10, 2);
        assert_eq!(d.release(20, 30), Gesture::Dropped);
    }

    #[test]
    fn tiny_movement_is_click() {
        let mut d = SwipeDetector::new(8);
        d.press(10, 10);
        assert_eq!(d.release(11, 10), Gesture::Click { column: 11, row: 10 });
        assert!(!d.is_tracking());
    }

    #[test]
    fn hit_map_topmost_wins() {
        let mut hits = ControlHitMap::new();
        hits.register(Rect::new(0, 0, 20, 5), Control::Chip(0));
        hits.register(Rect::new(5, 1, 10, 3), Control::Tooltip);
        hits.register(Rect::new(14, 1, 1, 1), Control::TooltipClose);

        assert_eq!(hits.hit(1, 0), Some(Control::Chip(0)));
        assert_eq!(hits.hit(6, 2), Some(Control::Tooltip));
        assert_eq!(hits.hit(14, 1), Some(Control::TooltipClose));
        assert_eq!(hits.hit(40, 40), None);
    }

    #[test]
    fn empty_regions_are_ignored() {
        let mut hits = ControlHitMap::new();
        hits.register(Rect::new(0, 0, 0, 3), Control::PrevButton);
        assert!(hits.is_empty());
    }

    #[test]
    fn click_on_dot_goes_to_slide() {
        let mut hits = ControlHitMap::new();
        hits.register(Rect::new(10, 20, 2, 1), Control::Dot(4));
        let mut swipe = SwipeDetector::default();

        let down = handle_mouse_event(
            mouse(MouseEventKind::Down(MouseButton::Left), 10, 20),
            &mut swipe,
            &hits,
        );
        assert_eq!(down, InputAction::None);
        let up = handle_mouse_event(
            mouse(MouseEventKind::Up(MouseButton::Left), 10, 20),
            &mut swipe,
            &hits,
        );
        assert_eq!(up, InputAction::Navigate(NavigationIntent::GoTo(4)));
    }

    #[test]
    fn click_on_nothing_is_outside() {
        let hits = ControlHitMap::new();
        let mut swipe = SwipeDetector::default();
        handle_mouse_event(
            mouse(MouseEventKind::Down(MouseButton::Left), 3, 3),
            &mut swipe,
            &hits,
        );
        let up = handle_mouse_event(
            mouse(MouseEventKind::Up(MouseButton::Left), 3, 3),
            &mut swipe,
            &hits,
        );
        assert_eq!(up, InputAction::ClickOutside);
    }

    #[test]
    fn drag_across_screen_swipes() {
        let hits = ControlHitMap::new();
        let mut swipe = SwipeDetector::default();
        handle_mouse_event(
            mouse(MouseEventKind::Down(MouseButton::Left), 60, 12),
            &mut swipe,
            &hits,
        );
        let up = handle_mouse_event(
            mouse(MouseEventKind::Up(MouseButton::Left), 10, 13),
            &mut swipe,
            &hits,
        );
        assert_eq!(up, InputAction::Navigate(NavigationIntent::Next));
    }
}
