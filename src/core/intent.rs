//! Navigation intents and edge policy

use std::str::FromStr;

use serde::Deserialize;

/// A normalized request to change the current slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Advance one slide
    Next,
    /// Go back one slide
    Previous,
    /// Jump to an absolute 0-based index
    GoTo(usize),
    /// Jump to the first slide
    Home,
    /// Jump to the last slide
    End,
}

/// What `Next` does on the last slide
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Reject `Next` at the last slide
    #[default]
    Clamp,
    /// Redirect `Next` at the last slide to the first slide
    Wrap,
}

impl EdgePolicy {
    /// Get display name for status bar
    pub fn display_name(&self) -> &'static str {
        match self {
            EdgePolicy::Clamp => "clamp",
            EdgePolicy::Wrap => "wrap",
        }
    }
}

impl FromStr for EdgePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "wrap" | "restart" => Ok(Self::Wrap),
            _ => Err(()),
        }
    }
}
