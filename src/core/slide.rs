//! Slide index model and the gated navigator
//!
//! `Navigator::request_navigate` is the only path that mutates the current
//! slide. Every input channel funnels into it.

use super::gate::{TransitionGate, TransitionToken};
use super::intent::{EdgePolicy, NavigationIntent};
use crate::error::{DeckviewError, Result};

/// Why a navigation request was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// Another transition has not settled yet
    #[error("transition already in flight")]
    AlreadyInFlight,
    /// Target index is outside the deck
    #[error("target out of bounds")]
    OutOfBounds,
    /// Target equals the current slide
    #[error("already on target slide")]
    NoOp,
}

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Applied {
        from: usize,
        to: usize,
        token: TransitionToken,
    },
    Rejected(Rejection),
}

impl NavOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, NavOutcome::Applied { .. })
    }
}

/// Direction of the last committed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    Forward,
    Backward,
}

impl SlideDirection {
    fn between(from: usize, to: usize) -> Self {
        if to > from {
            SlideDirection::Forward
        } else {
            SlideDirection::Backward
        }
    }
}

/// Authoritative current slide and fixed slide count
#[derive(Debug, Clone)]
pub struct SlideIndexModel {
    current: usize,
    total: usize,
    /// Previous index and direction of the last commit (for transition hints)
    last_move: Option<(usize, SlideDirection)>,
}

impl SlideIndexModel {
    /// Create a model positioned on `start`; out-of-range starts fall back to 0
    pub fn new(total: usize, start: usize) -> Result<Self> {
        if total == 0 {
            return Err(DeckviewError::EmptyDeck);
        }
        let current = if start < total { start } else { 0 };
        Ok(Self {
            current,
            total,
            last_move: None,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn last(&self) -> usize {
        self.total - 1
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.last()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.total
    }

    /// Slide the last commit departed from, with its direction
    pub fn last_move(&self) -> Option<(usize, SlideDirection)> {
        self.last_move
    }

    /// Check a target against the deck bounds
    pub fn validate(&self, target: usize) -> Result<usize> {
        if self.contains(target) {
            Ok(target)
        } else {
            Err(DeckviewError::OutOfBoundsNavigation {
                target,
                total: self.total,
            })
        }
    }

    fn commit(&mut self, target: usize) {
        self.last_move = Some((self.current, SlideDirection::between(self.current, target)));
        self.current = target;
    }
}

/// Slide model guarded by the transition gate
#[derive(Debug)]
pub struct Navigator {
    model: SlideIndexModel,
    gate: TransitionGate,
    policy: EdgePolicy,
}

impl Navigator {
    pub fn new(total: usize, start: usize, policy: EdgePolicy) -> Result<Self> {
        Ok(Self {
            model: SlideIndexModel::new(total, start)?,
            gate: TransitionGate::new(),
            policy,
        })
    }

    pub fn model(&self) -> &SlideIndexModel {
        &self.model
    }

    pub fn gate(&self) -> &TransitionGate {
        &self.gate
    }

    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    pub fn current(&self) -> usize {
        self.model.current()
    }

    /// Compute the target for `intent` without mutating anything
    pub fn plan(&self, intent: NavigationIntent) -> std::result::Result<usize, Rejection> {
        if self.gate.is_in_flight() {
            return Err(Rejection::AlreadyInFlight);
        }

        let current = self.model.current();
        let target = match intent {
            NavigationIntent::Next if self.model.is_last() => match self.policy {
                EdgePolicy::Clamp => return Err(Rejection::OutOfBounds),
                EdgePolicy::Wrap => 0,
            },
            NavigationIntent::Next => current + 1,
            NavigationIntent::Previous => current
                .checked_sub(1)
                .ok_or(Rejection::OutOfBounds)?,
            NavigationIntent::GoTo(n) => n,
            NavigationIntent::Home => 0,
            NavigationIntent::End => self.model.last(),
        };

        if let Err(e) = self.model.validate(target) {
            tracing::debug!("{}", e);
            return Err(Rejection::OutOfBounds);
        }
        if target == current {
            return Err(Rejection::NoOp);
        }
        Ok(target)
    }

    /// Apply `intent` if the gate is open and the target is valid.
    ///
    /// On success the gate stays closed until `settle` is called with the
    /// returned token.
    pub fn request_navigate(&mut self, intent: NavigationIntent) -> NavOutcome {
        let target = match self.plan(intent) {
            Ok(target) => target,
            Err(reason) => {
                tracing::debug!(?intent, %reason, "navigation rejected");
                return NavOutcome::Rejected(reason);
            }
        };

        let Some(token) = self.gate.begin() else {
            return NavOutcome::Rejected(Rejection::AlreadyInFlight);
        };
        let from = self.model.current();
        self.model.commit(target);
        tracing::debug!(from, to = target, token = token.value(), "slide committed");

        NavOutcome::Applied {
            from,
            to: target,
            token,
        }
    }

    /// Release the gate for the transition identified by `token`
    pub fn settle(&mut self, token: TransitionToken) -> bool {
        self.gate.release(token)
    }

    /// Settle whatever transition is running (used when animations are skipped)
    pub fn settle_current(&mut self) -> bool {
        match self.gate.current_token() {
            Some(token) => self.gate.release(token),
            None => false,
        }
    }
}
