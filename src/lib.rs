//! deckview - A slide presenter for the terminal
//!
//! Slides are driven by a single navigation state machine: keyboard,
//! mouse drags, on-screen controls and location fragments all become
//! navigation intents, a transition gate admits one slide change at a
//! time, and every view is projected from the committed slide index.

pub mod action;
pub mod app;
pub mod content;
pub mod core;
pub mod error;
pub mod handler;
pub mod render;
pub mod view;
pub mod watcher;

pub use error::{DeckviewError, Result};
