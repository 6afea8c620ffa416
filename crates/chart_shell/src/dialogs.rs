//! Collaborator traits for the GUI toolkit
//!
//! The session drives its flows through these traits; the toolkit layer
//! implements them over its real dialogs and windows, and tests implement
//! them with stubs. Every dialog can be cancelled, which the session treats
//! as a no-op.

use chart_engine::{Color, RenderedChart};
use std::path::PathBuf;

/// A modal color chooser
pub trait ColorPicker {
    /// Ask the user for a color for the named category, seeded with
    /// `current`. `None` means the dialog was cancelled.
    fn pick(&mut self, current: Color, label: &str) -> Option<Color>;
}

/// A save-as dialog for the PNG export
pub trait SaveDialog {
    /// Ask the user where to write the file. `None` means cancelled.
    fn choose_path(&mut self) -> Option<PathBuf>;
}

/// A window that can display a rendered chart
pub trait ChartWindow {
    fn show(&mut self, chart: &RenderedChart) -> Result<(), String>;
}
