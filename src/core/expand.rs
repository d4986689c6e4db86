//! Expandable content chips, quote tooltips and quote usage tracking

use std::collections::BTreeSet;

/// A chip on a slide, addressed by slide index and position on the slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChipId {
    pub slide: usize,
    pub index: usize,
}

impl ChipId {
    pub fn new(slide: usize, index: usize) -> Self {
        Self { slide, index }
    }
}

/// Quotes the audience has seen at least once. Never shrinks.
#[derive(Debug, Clone, Default)]
pub struct QuoteUsageSet {
    used: BTreeSet<usize>,
}

impl QuoteUsageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a quote as surfaced. Returns true if it was new.
    pub fn insert(&mut self, quote: usize) -> bool {
        self.used.insert(quote)
    }

    pub fn contains(&self, quote: usize) -> bool {
        self.used.contains(&quote)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Badge text, e.g. "Grounded 2/6"
    pub fn badge(&self, total_quotes: usize) -> String {
        format!("Grounded {}/{}", self.used.len(), total_quotes)
    }
}

/// Why a tooltip went away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Close button or close key
    Closed,
    /// Click that landed outside the tooltip and its chip
    ClickOutside,
    /// Auto-dismiss timer
    Timeout,
    /// Chip toggled off, collapse-all or slide change
    Collapsed,
    /// Another quote chip opened its own tooltip
    Replaced,
}

/// Transient popup showing a quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub id: u64,
    pub chip: ChipId,
    pub quote: usize,
}

/// Result of toggling a chip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Expanded {
        chip: ChipId,
        /// Chip that had to collapse to make room
        collapsed: Option<ChipId>,
        /// Tooltip opened for a quote chip
        tooltip: Option<u64>,
        /// Tooltip that was closed as a side effect
        closed_tooltip: Option<u64>,
    },
    Collapsed {
        chip: ChipId,
        closed_tooltip: Option<u64>,
    },
}

/// Zero-or-one expanded chip, plus the quote tooltip it may own
#[derive(Debug, Default)]
pub struct ExpandableContentController {
    expanded: Option<ChipId>,
    tooltip: Option<Tooltip>,
    usage: QuoteUsageSet,
    next_tooltip_id: u64,
}

impl ExpandableContentController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expanded(&self) -> Option<ChipId> {
        self.expanded
    }

    pub fn is_expanded(&self, chip: ChipId) -> bool {
        self.expanded == Some(chip)
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn usage(&self) -> &QuoteUsageSet {
        &self.usage
    }

    /// Expand `chip`, or collapse it if it is already expanded.
    ///
    /// `quote` is the reference quote the chip maps to, if any; expanding such
    /// a chip records usage and opens a tooltip.
    pub fn toggle(&mut self, chip: ChipId, quote: Option<usize>) -> ToggleOutcome {
        if self.expanded == Some(chip) {
            self.expanded = None;
            let closed_tooltip = self.close_tooltip_of(chip);
            tracing::debug!(?chip, "chip collapsed");
            return ToggleOutcome::Collapsed {
                chip,
                closed_tooltip,
            };
        }

        let collapsed = self.expanded.replace(chip);
        let closed_tooltip = self.tooltip.take().map(|t| {
            tracing::debug!(id = t.id, reason = ?DismissReason::Replaced, "tooltip dismissed");
            t.id
        });

        let tooltip = quote.map(|quote| {
            self.usage.insert(quote);
            self.next_tooltip_id += 1;
            let id = self.next_tooltip_id;
            self.tooltip = Some(Tooltip { id, chip, quote });
            id
        });

        tracing::debug!(?chip, ?collapsed, "chip expanded");
        ToggleOutcome::Expanded {
            chip,
            collapsed,
            tooltip,
            closed_tooltip,
        }
    }

    /// Collapse everything. Returns the id of a tooltip that was closed.
    pub fn collapse_all(&mut self) -> Option<u64> {
        self.expanded = None;
        self.tooltip.take().map(|t| {
            tracing::debug!(id = t.id, reason = ?DismissReason::Collapsed, "tooltip dismissed");
            t.id
        })
    }

    /// Dismiss the tooltip with `id`.
    ///
    /// Idempotent: a tooltip that is already gone (or a stale id) yields `None`.
    /// Dismissing a quote tooltip collapses the chip that owns it.
    pub fn dismiss_tooltip(&mut self, id: u64, reason: DismissReason) -> Option<Tooltip> {
        if self.tooltip.as_ref().map(|t| t.id) != Some(id) {
            return None;
        }
        let tooltip = self.tooltip.take()?;
        if self.expanded == Some(tooltip.chip) {
            self.expanded = None;
        }
        tracing::debug!(id, ?reason, "tooltip dismissed");
        Some(tooltip)
    }

    fn close_tooltip_of(&mut self, chip: ChipId) -> Option<u64> {
        match &self.tooltip {
            Some(t) if t.chip == chip => self.tooltip.take().map(|t| t.id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_returns_to_collapsed() {
        let mut c = ExpandableContentController::new();
        let x = ChipId::new(3, 0);
        c.toggle(x, None);
        assert!(c.is_expanded(x));
        c.toggle(x, None);
        assert_eq!(c.expanded(), None);
    }

    #[test]
    fn toggle_other_chip_leaves_only_latest() {
        let mut c = ExpandableContentController::new();
        let x = ChipId::new(3, 0);
        let y = ChipId::new(3, 1);
        c.toggle(x, None);
        let outcome = c.toggle(y, None);

        assert!(c.is_expanded(y));
        assert!(!c.is_expanded(x));
        assert!(matches!(
            outcome,
            ToggleOutcome::Expanded { collapsed: Some(prev), .. } if prev == x
        ));
    }

    #[test]
    fn quote_chip_opens_tooltip_and_records_usage() {
        let mut c = ExpandableContentController::new();
        let chip = ChipId::new(4, 2);
        let outcome = c.toggle(chip, Some(5));

        let tooltip = c.tooltip().unwrap();
        assert_eq!(tooltip.quote, 5);
        assert_eq!(tooltip.chip, chip);
        assert!(matches!(
            outcome,
            ToggleOutcome::Expanded { tooltip: Some(id), .. } if id == tooltip.id
        ));
        assert!(c.usage().contains(5));
        assert_eq!(c.usage().badge(6), "Grounded 1/6");
    }

    #[test]
    fn usage_never_shrinks() {
        let mut c = ExpandableContentController::new();
        c.toggle(ChipId::new(0, 0), Some(1));
        c.toggle(ChipId::new(0, 1), Some(2));
        c.collapse_all();
        c.toggle(ChipId::new(0, 0), Some(1));
        assert_eq!(c.usage().len(), 2);
    }

    #[test]
    fn new_quote_replaces_tooltip() {
        let mut c = ExpandableContentController::new();
        c.toggle(ChipId::new(0, 0), Some(0));
        let first = c.tooltip().unwrap().id;
        let outcome = c.toggle(ChipId::new(0, 1), Some(1));

        assert_ne!(c.tooltip().unwrap().id, first);
        assert!(matches!(
            outcome,
            ToggleOutcome::Expanded { closed_tooltip: Some(id), .. } if id == first
        ));
    }

    #[test]
    fn collapsing_quote_chip_closes_its_tooltip() {
        let mut c = ExpandableContentController::new();
        let chip = ChipId::new(0, 0);
        c.toggle(chip, Some(0));
        let id = c.tooltip().unwrap().id;
        let outcome = c.toggle(chip, Some(0));
        assert_eq!(
            outcome,
            ToggleOutcome::Collapsed {
                chip,
                closed_tooltip: Some(id)
            }
        );
        assert!(c.tooltip().is_none());
    }

    #[test]
    fn dismiss_is_idempotent() {
        let mut c = ExpandableContentController::new();
        let chip = ChipId::new(1, 0);
        c.toggle(chip, Some(0));
        let id = c.tooltip().unwrap().id;

        assert!(c.dismiss_tooltip(id, DismissReason::Closed).is_some());
        assert!(c.dismiss_tooltip(id, DismissReason::Timeout).is_none());
        assert_eq!(c.expanded(), None);
    }

    #[test]
    fn stale_dismiss_leaves_new_tooltip() {
        let mut c = ExpandableContentController::new();
        c.toggle(ChipId::new(1, 0), Some(0));
        let old = c.tooltip().unwrap().id;
        c.toggle(ChipId::new(1, 1), Some(1));

        assert!(c.dismiss_tooltip(old, DismissReason::Timeout).is_none());
        assert!(c.tooltip().is_some());
        assert!(c.is_expanded(ChipId::new(1, 1)));
    }

    #[test]
    fn collapse_all_clears_everything() {
        let mut c = ExpandableContentController::new();
        c.toggle(ChipId::new(2, 0), Some(3));
        assert!(c.collapse_all().is_some());
        assert_eq!(c.expanded(), None);
        assert!(c.tooltip().is_none());
        assert!(c.collapse_all().is_none());
    }
}
