//! Deck content loading and validation
//!
//! A deck is a TOML file holding the slides plus the reference dataset
//! (quotes, key arguments, evidence, definitions). It is loaded once and
//! treated as read-only for the rest of the session.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DeckviewError, Result};

/// One reference quote
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quote {
    pub author: String,
    pub work: String,
    pub year: i32,
    /// Citation locator, e.g. "p. 24"
    pub cite: String,
    #[serde(default)]
    pub text: String,
}

/// How a slide body is produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    /// Title, subtitle, body lines and chips
    #[default]
    Standard,
    /// Body is the formatted reference list
    References,
}

/// Interactive chip on a slide
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Chip {
    pub label: String,
    /// Index into `DeckContent::quotes`
    pub quote: Option<usize>,
    /// Text revealed inline when a prompt chip expands
    pub expanded_text: Option<String>,
}

impl Chip {
    /// Whether toggling this chip has anything to show
    pub fn is_expandable(&self) -> bool {
        self.quote.is_some() || self.expanded_text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Slide {
    pub title: String,
    pub subtitle: Option<String>,
    pub body: Vec<String>,
    pub kind: SlideKind,
    pub chips: Vec<Chip>,
}

impl Slide {
    /// Line offset of chip `index` within the rendered slide body.
    ///
    /// Layout: subtitle and a blank line, body lines and a blank line, then
    /// one line per chip. Only one chip is expanded at a time, so expanded
    /// text never sits above the chip being measured.
    pub fn chip_line(&self, index: usize) -> usize {
        let subtitle = if self.subtitle.is_some() { 2 } else { 0 };
        let body = if self.body.is_empty() {
            0
        } else {
            self.body.len() + 1
        };
        subtitle + body + index
    }
}

/// The full deck dataset
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeckContent {
    pub case_medium: String,
    pub quotes: Vec<Quote>,
    pub key_arguments: BTreeMap<String, String>,
    pub micro_evidence: Vec<String>,
    pub definitions: BTreeMap<String, String>,
    pub slides: Vec<Slide>,
}

impl DeckContent {
    /// Load a deck from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a deck; a deck without slides is an error
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let deck: DeckContent =
            toml::from_str(content).map_err(|e| DeckviewError::content(e.to_string()))?;
        if deck.slides.is_empty() {
            return Err(DeckviewError::EmptyDeck);
        }
        Ok(deck)
    }

    pub fn total_slides(&self) -> usize {
        self.slides.len()
    }

    /// Title of slide `index`, or an empty string
    pub fn title(&self, index: usize) -> &str {
        self.slides
            .get(index)
            .map(|s| s.title.as_str())
            .unwrap_or_default()
    }

    /// Chip `chip` on slide `slide`
    pub fn chip(&self, slide: usize, chip: usize) -> Option<&Chip> {
        self.slides.get(slide)?.chips.get(chip)
    }

    pub fn quote(&self, index: usize) -> Option<&Quote> {
        self.quotes.get(index)
    }

    /// Missing required fields. An empty list means the deck is complete.
    pub fn validate(&self) -> ContentWarnings {
        let mut missing = Vec::new();

        if self.case_medium.trim().is_empty() {
            missing.push("case_medium".to_string());
        }
        if self.quotes.is_empty() {
            missing.push("quotes".to_string());
        }
        if self.key_arguments.is_empty() {
            missing.push("key_arguments".to_string());
        }
        if self.micro_evidence.is_empty() {
            missing.push("micro_evidence".to_string());
        }

        for (s, slide) in self.slides.iter().enumerate() {
            for (c, chip) in slide.chips.iter().enumerate() {
                if let Some(q) = chip.quote {
                    if q >= self.quotes.len() {
                        missing.push(format!("slides[{}].chips[{}].quote", s, c));
                    }
                }
            }
        }

        ContentWarnings { missing }
    }
}

/// Result of validating a deck
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentWarnings {
    pub missing: Vec<String>,
}

impl ContentWarnings {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    /// Banner text shown above the slides, if anything is missing
    pub fn banner(&self) -> Option<String> {
        if self.missing.is_empty() {
            None
        } else {
            Some(format!("⚠ Missing deck fields: {}", self.missing.join(", ")))
        }
    }
}
