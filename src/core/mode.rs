//! View mode definitions

/// Current view/input mode with embedded state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewMode {
    /// Normal presentation
    #[default]
    Present,
    /// Key binding overview
    Help,
    /// Reference text shown for manual selection (clipboard fallback)
    Selection { text: String, scroll: u16 },
}
