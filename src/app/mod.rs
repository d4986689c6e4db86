//! Application module
//!
//! This module contains the CLI and config file handling, logging setup
//! and the event loop for deckview.

mod config;
mod config_file;
mod event_loop;
mod logging;
mod render;

pub use config::{print_help, Config, LOG_ENV, POLICY_ENV};
pub use config_file::{ConfigFile, GeneralConfig, NavigationConfig, UiConfig};
pub use event_loop::{build_state, run_app, start_index, AppResult};
pub use logging::init_file_logging;
pub use render::{render_frame, RenderContext};

/// Process exit codes
pub mod exit_code {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// `--check` found missing deck fields
    pub const WARNINGS: i32 = 1;
    /// Runtime error
    pub const ERROR: i32 = 2;
    /// Invalid arguments
    pub const INVALID: i32 = 3;
}
