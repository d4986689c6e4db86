//! Core module - Slide model, transition gate, chips, timers and state

pub mod expand;
pub mod gate;
pub mod intent;
pub mod mode;
pub mod slide;
pub mod state;
pub mod timer;

pub use expand::{
    ChipId, DismissReason, ExpandableContentController, QuoteUsageSet, ToggleOutcome, Tooltip,
};
pub use gate::{TransitionGate, TransitionState, TransitionToken};
pub use intent::{EdgePolicy, NavigationIntent};
pub use mode::ViewMode;
pub use slide::{NavOutcome, Navigator, Rejection, SlideDirection, SlideIndexModel};
pub use state::{AppState, DeckSettings};
pub use timer::{Scheduler, TimerKey};
