//! Handler module - Input normalization
//!
//! Keyboard, mouse and location changes all become an [`InputAction`].

pub mod hash;
pub mod key;
pub mod keymap;
pub mod mouse;

pub use hash::{encode_fragment, parse_fragment, resolve_fragment, FRAGMENT_PREFIX};
pub use key::{handle_key_event, InputAction};
pub use keymap::{KeyBindingRegistry, KeymapFile};
pub use mouse::{handle_mouse_event, Control, ControlHitMap, Gesture, SwipeDetector};
