//! Keymap configuration and registry
//!
//! Loads key bindings from `~/.config/deckview/keymap.toml`

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::key::InputAction;
use crate::app::ConfigFile;
use crate::core::NavigationIntent;

/// Keymap configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct KeymapFile {
    /// Key bindings while presenting
    pub present: HashMap<String, String>,
    /// Key bindings for help popup
    pub help: HashMap<String, String>,
    /// Key bindings for the reference selection popup
    pub selection: HashMap<String, String>,
}

impl KeymapFile {
    /// Get the keymap file path (~/.config/deckview/keymap.toml)
    pub fn keymap_path() -> Option<PathBuf> {
        ConfigFile::config_dir().map(|p| p.join("keymap.toml"))
    }

    /// Load keymap from file
    pub fn load() -> Self {
        Self::keymap_path()
            .and_then(|path| {
                if path.exists() {
                    fs::read_to_string(&path).ok()
                } else {
                    None
                }
            })
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Load keymap from a specific path (for testing)
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Key binding registry for dynamic key dispatch
pub struct KeyBindingRegistry {
    /// Presentation bindings: key_str -> action_name
    present: HashMap<String, String>,
    /// Help popup bindings
    help: HashMap<String, String>,
    /// Selection popup bindings
    selection: HashMap<String, String>,
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindingRegistry {
    /// Create a new registry with default bindings
    pub fn new() -> Self {
        let mut registry = Self {
            present: HashMap::new(),
            help: HashMap::new(),
            selection: HashMap::new(),
        };
        registry.load_defaults();
        registry
    }

    /// Load registry from keymap file, merging with defaults
    pub fn from_file() -> Self {
        let mut registry = Self::new();
        registry.merge(KeymapFile::load());
        registry
    }

    /// Merge user bindings (override defaults)
    pub fn merge(&mut self, keymap: KeymapFile) {
        self.present.extend(keymap.present);
        self.help.extend(keymap.help);
        self.selection.extend(keymap.selection);
    }

    /// Load default key bindings
    fn load_defaults(&mut self) {
        let present = &mut self.present;
        present.insert("left".to_string(), "previous".to_string());
        present.insert("up".to_string(), "previous".to_string());
        present.insert("right".to_string(), "next".to_string());
        present.insert("down".to_string(), "next".to_string());
        present.insert("space".to_string(), "next".to_string());
        present.insert("home".to_string(), "home".to_string());
        present.insert("end".to_string(), "end".to_string());
        present.insert("esc".to_string(), "collapse_all".to_string());
        present.insert("x".to_string(), "close_tooltip".to_string());
        present.insert("c".to_string(), "copy_references".to_string());
        present.insert("?".to_string(), "show_help".to_string());
        present.insert("q".to_string(), "quit".to_string());
        for n in 1..=9 {
            present.insert(n.to_string(), format!("toggle_chip_{}", n));
        }

        let help = &mut self.help;
        help.insert("esc".to_string(), "cancel".to_string());
        help.insert("enter".to_string(), "cancel".to_string());
        help.insert("q".to_string(), "cancel".to_string());
        help.insert("?".to_string(), "cancel".to_string());

        let selection = &mut self.selection;
        selection.insert("esc".to_string(), "cancel".to_string());
        selection.insert("q".to_string(), "cancel".to_string());
        selection.insert("enter".to_string(), "cancel".to_string());
        selection.insert("up".to_string(), "scroll_up".to_string());
        selection.insert("k".to_string(), "scroll_up".to_string());
        selection.insert("down".to_string(), "scroll_down".to_string());
        selection.insert("j".to_string(), "scroll_down".to_string());
    }

    /// Look up action for a key event while presenting
    pub fn lookup_present(&self, key: &KeyEvent) -> Option<InputAction> {
        let key_str = key_event_to_string(key);
        self.present
            .get(&key_str)
            .and_then(|action| parse_present_action(action))
    }

    /// Look up action for a key event in help mode
    pub fn lookup_help(&self, key: &KeyEvent) -> Option<InputAction> {
        let key_str = key_event_to_string(key);
        self.help
            .get(&key_str)
            .and_then(|action| match action.as_str() {
                "cancel" => Some(InputAction::Cancel),
                "quit" => Some(InputAction::Quit),
                _ => None,
            })
    }

    /// Look up action for a key event in the selection popup
    pub fn lookup_selection(&self, key: &KeyEvent) -> Option<InputAction> {
        let key_str = key_event_to_string(key);
        self.selection
            .get(&key_str)
            .and_then(|action| match action.as_str() {
                "cancel" => Some(InputAction::Cancel),
                "scroll_up" => Some(InputAction::ScrollUp),
                "scroll_down" => Some(InputAction::ScrollDown),
                "quit" => Some(InputAction::Quit),
                _ => None,
            })
    }

    /// Key strings bound to `action` while presenting, sorted (for the help popup)
    pub fn keys_for(&self, action: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .present
            .iter()
            .filter(|(_, a)| a.as_str() == action)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}

/// Convert a KeyEvent to a string representation
fn key_event_to_string(key: &KeyEvent) -> String {
    let mut parts = Vec::new();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("ctrl");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("alt");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        // Only add shift for non-character keys or when combined with ctrl/alt
        if !matches!(key.code, KeyCode::Char(_)) || !parts.is_empty() {
            parts.push("shift");
        }
    }

    let key_name = match key.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("f{}", n),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Esc => "esc".to_string(),
        _ => return String::new(),
    };

    if parts.is_empty() {
        key_name
    } else {
        parts.push(&key_name);
        parts.join("+")
    }
}

/// Parse presentation action string to InputAction
fn parse_present_action(action: &str) -> Option<InputAction> {
    match action {
        "next" => Some(InputAction::Navigate(NavigationIntent::Next)),
        "previous" | "prev" => Some(InputAction::Navigate(NavigationIntent::Previous)),
        "home" | "first" => Some(InputAction::Navigate(NavigationIntent::Home)),
        "end" | "last" => Some(InputAction::Navigate(NavigationIntent::End)),
        "collapse_all" => Some(InputAction::CollapseAll),
        "close_tooltip" => Some(InputAction::CloseTooltip),
        "copy_references" => Some(InputAction::CopyReferences),
        "show_help" => Some(InputAction::ShowHelp),
        "quit" => Some(InputAction::Quit),
        other => {
            if let Some(n) = other.strip_prefix("toggle_chip_") {
                return n
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .map(|n| InputAction::ToggleChip(n - 1));
            }
            if let Some(n) = other.strip_prefix("goto_") {
                return n
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .map(|n| InputAction::Navigate(NavigationIntent::GoTo(n - 1)));
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn key_strings() {
        let k = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(key_event_to_string(&k), "space");
        let k = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(key_event_to_string(&k), "?");
        let k = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(key_event_to_string(&k), "ctrl+n");
        let k = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
        assert_eq!(key_event_to_string(&k), "shift+left");
    }

    #[test]
    fn parse_actions() {
        assert_eq!(
            parse_present_action("toggle_chip_3"),
            Some(InputAction::ToggleChip(2))
        );
        assert_eq!(parse_present_action("toggle_chip_0"), None);
        assert_eq!(
            parse_present_action("goto_4"),
            Some(InputAction::Navigate(NavigationIntent::GoTo(3)))
        );
        assert_eq!(parse_present_action("launch_rockets"), None);
    }

    #[test]
    fn user_bindings_override_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[present]
l = "next"
h = "previous"
space = "home"
"#
        )
        .unwrap();

        let mut registry = KeyBindingRegistry::new();
        registry.merge(KeymapFile::load_from(&file.path().to_path_buf()).unwrap());

        let l = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(
            registry.lookup_present(&l),
            Some(InputAction::Navigate(NavigationIntent::Next))
        );
        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(
            registry.lookup_present(&space),
            Some(InputAction::Navigate(NavigationIntent::Home))
        );
        // Untouched defaults survive
        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(
            registry.lookup_present(&right),
            Some(InputAction::Navigate(NavigationIntent::Next))
        );
    }

    #[test]
    fn keys_for_action() {
        let registry = KeyBindingRegistry::new();
        assert_eq!(registry.keys_for("previous"), vec!["left", "up"]);
        assert_eq!(registry.keys_for("next"), vec!["down", "right", "space"]);
    }
}
