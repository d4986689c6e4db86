//! Transition gate
//!
//! Serializes slide changes: while a transition is in flight every further
//! navigation request is rejected, not queued.

/// Identifies one transition; release callbacks carry it so a stale timer
/// can never reopen the gate for a newer transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionToken(u64);

impl TransitionToken {
    /// Raw token value (for logging)
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Whether a transition is currently running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionState {
    #[default]
    Idle,
    InFlight(TransitionToken),
}

/// Tracks the single in-flight transition
#[derive(Debug, Default)]
pub struct TransitionGate {
    state: TransitionState,
    next_token: u64,
}

impl TransitionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, TransitionState::InFlight(_))
    }

    /// Token of the running transition, if any
    pub fn current_token(&self) -> Option<TransitionToken> {
        match self.state {
            TransitionState::InFlight(token) => Some(token),
            TransitionState::Idle => None,
        }
    }

    /// Close the gate for a new transition.
    ///
    /// Returns `None` when a transition is already in flight.
    pub fn begin(&mut self) -> Option<TransitionToken> {
        if self.is_in_flight() {
            return None;
        }
        self.next_token += 1;
        let token = TransitionToken(self.next_token);
        self.state = TransitionState::InFlight(token);
        Some(token)
    }

    /// Reopen the gate. Only the token of the running transition releases it.
    pub fn release(&mut self, token: TransitionToken) -> bool {
        if self.state == TransitionState::InFlight(token) {
            self.state = TransitionState::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_closes_gate() {
        let mut gate = TransitionGate::new();
        assert!(!gate.is_in_flight());
        let token = gate.begin().unwrap();
        assert!(gate.is_in_flight());
        assert_eq!(gate.current_token(), Some(token));
    }

    #[test]
    fn begin_while_in_flight_is_refused() {
        let mut gate = TransitionGate::new();
        gate.begin().unwrap();
        assert!(gate.begin().is_none());
    }

    #[test]
    fn release_with_matching_token() {
        let mut gate = TransitionGate::new();
        let token = gate.begin().unwrap();
        assert!(gate.release(token));
        assert_eq!(gate.state(), TransitionState::Idle);
    }

    #[test]
    fn stale_token_does_not_release() {
        let mut gate = TransitionGate::new();
        let first = gate.begin().unwrap();
        assert!(gate.release(first));
        let second = gate.begin().unwrap();

        assert!(!gate.release(first));
        assert_eq!(gate.state(), TransitionState::InFlight(second));
    }

    #[test]
    fn tokens_are_unique() {
        let mut gate = TransitionGate::new();
        let a = gate.begin().unwrap();
        gate.release(a);
        let b = gate.begin().unwrap();
        assert_ne!(a, b);
        assert!(b > a);
    }
}
