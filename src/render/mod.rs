//! Render module - UI rendering

pub mod popup;
pub mod progress;
pub mod slide;
pub mod status;

pub use popup::{render_help_popup, render_selection_popup, render_tooltip};
pub use progress::render_controls;
pub use slide::{render_slide, slide_in_area, AmbientPhase};
pub use status::{copy_label, render_banner, render_live_region, render_status_bar};

/// Display switches from the config file
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub show_progress_dots: bool,
    pub show_progress_bar: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_progress_dots: true,
            show_progress_bar: true,
        }
    }
}
