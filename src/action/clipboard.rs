//! Reference export and clipboard access

use std::io::{self, Write};
use std::str::FromStr;

use crate::content::Quote;
use crate::error::{DeckviewError, Result};

/// Header line of the plain-text export
pub const REFERENCES_HEADER: &str = "References:";

/// Format one quote as a reference line
pub fn format_reference(quote: &Quote) -> String {
    format!(
        "{}. {}. {}. {}.",
        quote.author, quote.work, quote.year, quote.cite
    )
}

/// Format the full reference list: header, blank line, one reference per line
pub fn format_references(quotes: &[Quote]) -> String {
    let lines: Vec<String> = quotes.iter().map(format_reference).collect();
    format!("{}\n\n{}", REFERENCES_HEADER, lines.join("\n"))
}

/// Output format for `--references`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Plain-text reference list (default)
    #[default]
    Lines,
    /// JSON array of quotes
    Json,
}

impl FromStr for ExportFormat {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" | "line" | "text" => Ok(Self::Lines),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// Write the reference export to `out`
pub fn output_references(quotes: &[Quote], format: ExportFormat, out: &mut impl Write) -> io::Result<()> {
    match format {
        ExportFormat::Lines => writeln!(out, "{}", format_references(quotes)),
        ExportFormat::Json => {
            let json = serde_json::to_string_pretty(quotes).map_err(io::Error::other)?;
            writeln!(out, "{}", json)
        }
    }
}

/// Something that can receive text
pub trait ClipboardBackend {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via arboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardBackend for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        arboard::Clipboard::new()
            .and_then(|mut cb| cb.set_text(text.to_string()))
            .map_err(|e| DeckviewError::clipboard(e.to_string()))
    }
}

/// What happened when copying
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Text is on the clipboard
    Copied,
    /// Clipboard unavailable; the text must be offered for manual selection
    NeedsSelection(String),
}

/// Formats references and pushes them to a clipboard backend
pub struct ClipboardExporter<B: ClipboardBackend> {
    backend: B,
}

impl<B: ClipboardBackend> ClipboardExporter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Copy the reference list, falling back to selection on failure
    pub fn copy_references(&mut self, quotes: &[Quote]) -> CopyOutcome {
        let text = format_references(quotes);
        match self.backend.set_text(&text) {
            Ok(()) => CopyOutcome::Copied,
            Err(e) => {
                tracing::warn!("{}; falling back to selection", e);
                CopyOutcome::NeedsSelection(text)
            }
        }
    }
}
