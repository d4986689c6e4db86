//! Keyboard event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::keymap::KeyBindingRegistry;
use crate::core::{NavigationIntent, ViewMode};

/// Actions produced by any input channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    /// Change slide
    Navigate(NavigationIntent),
    /// Collapse every expanded chip and close the tooltip
    CollapseAll,
    /// Toggle the chip at this position on the active slide
    ToggleChip(usize),
    /// Close the quote tooltip
    CloseTooltip,
    /// Click that hit no control (dismisses the tooltip)
    ClickOutside,
    /// Copy the reference list
    CopyReferences,
    /// Show help popup
    ShowHelp,
    /// Close the current popup/mode
    Cancel,
    /// Scroll popup content up
    ScrollUp,
    /// Scroll popup content down
    ScrollDown,
}

/// Handle key event and return the resulting action
pub fn handle_key_event(mode: &ViewMode, registry: &KeyBindingRegistry, key: KeyEvent) -> InputAction {
    // Ctrl+C always quits, regardless of key map
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputAction::Quit;
    }

    let action = match mode {
        ViewMode::Present => registry.lookup_present(&key),
        ViewMode::Help => registry.lookup_help(&key),
        ViewMode::Selection { .. } => registry.lookup_selection(&key),
    };
    action.unwrap_or(InputAction::None)
}
