//! The designer session
//!
//! One session owns the form and the color overrides and runs the three
//! user-facing flows: edit a category color, show the chart in a window,
//! and save it as a PNG. Dialogs come in through the collaborator traits,
//! so the flows run the same under tests as under a real toolkit.

use crate::dialogs::{ChartWindow, ColorPicker, SaveDialog};
use crate::form::ChartForm;
use chart_engine::{export_png, render_chart, ChartError, Color, ColorResolver, RenderedChart};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from the session flows
#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("chart window error: {0}")]
    Window(String),
}

pub type ShellResult<T> = Result<T, ShellError>;

/// How a save flow ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Cancelled,
}

/// The designer's mutable state
#[derive(Debug, Clone, Default)]
pub struct ChartSession {
    pub form: ChartForm,
    colors: ColorResolver,
}

impl ChartSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The swatch row: one resolved color per label currently typed into
    /// the form. Re-resolved on every call so label edits show immediately.
    pub fn swatches(&self) -> Vec<Color> {
        self.colors.resolved(self.form.preview_labels().len())
    }

    /// Run the color-edit flow for one category. Cancelling the picker
    /// leaves the existing color untouched; picking sets an override that
    /// survives later label edits at the same index.
    pub fn edit_color(&mut self, index: usize, picker: &mut dyn ColorPicker) -> bool {
        let labels = self.form.preview_labels();
        let current = self.colors.resolve(index, labels.len());
        let label = labels.get(index).map(String::as_str).unwrap_or("");
        match picker.pick(current, label) {
            Some(color) => {
                info!(index, color = %color.to_hex(), "category color overridden");
                self.colors.set_override(index, color);
                true
            }
            None => false,
        }
    }

    /// Drop every color override, restoring the palette defaults
    pub fn reset_colors(&mut self) {
        self.colors.reset();
    }

    /// Parse the current form and render it to primitives
    pub fn render(&self) -> ShellResult<RenderedChart> {
        let request = self.form.parse(&self.colors)?;
        Ok(render_chart(&request)?)
    }

    /// Show the chart for the current form contents
    pub fn show_chart(&self, window: &mut dyn ChartWindow) -> ShellResult<()> {
        let request = self.form.parse(&self.colors).inspect_err(|e| {
            warn!(error = %e, "chart input rejected");
        })?;
        info!(
            kind = request.kind.name(),
            categories = request.category_count(),
            "showing chart"
        );
        let rendered = render_chart(&request)?;
        window.show(&rendered).map_err(ShellError::Window)
    }

    /// Run the save flow: ask for a path first, then validate and export.
    /// A cancelled dialog is not an error, and no validation is reported
    /// for a flow the user abandoned.
    pub fn save_chart(&self, dialog: &mut dyn SaveDialog) -> ShellResult<SaveOutcome> {
        let Some(path) = dialog.choose_path() else {
            return Ok(SaveOutcome::Cancelled);
        };
        let request = self.form.parse(&self.colors).inspect_err(|e| {
            warn!(error = %e, "chart input rejected");
        })?;
        export_png(&request, &path)?;
        info!(path = %path.display(), kind = request.kind.name(), "chart saved");
        Ok(SaveOutcome::Saved(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_engine::ChartKind;

    struct StubPicker {
        reply: Option<Color>,
        calls: usize,
    }

    impl ColorPicker for StubPicker {
        fn pick(&mut self, _current: Color, _label: &str) -> Option<Color> {
            self.calls += 1;
            self.reply
        }
    }

    struct StubDialog {
        path: Option<PathBuf>,
    }

    impl SaveDialog for StubDialog {
        fn choose_path(&mut self) -> Option<PathBuf> {
            self.path.clone()
        }
    }

    struct RecordingWindow {
        shown: usize,
        fail: bool,
    }

    impl ChartWindow for RecordingWindow {
        fn show(&mut self, _chart: &RenderedChart) -> Result<(), String> {
            if self.fail {
                return Err("display lost".to_string());
            }
            self.shown += 1;
            Ok(())
        }
    }

    #[test]
    fn test_swatches_follow_label_edits() {
        let mut session = ChartSession::new();
        assert_eq!(session.swatches().len(), 5);

        session.form.labels = "A,B".to_string();
        assert_eq!(session.swatches().len(), 2);
    }

    #[test]
    fn test_edit_color_sets_override() {
        let mut session = ChartSession::new();
        let custom = Color::rgb(200, 10, 10);
        let mut picker = StubPicker {
            reply: Some(custom),
            calls: 0,
        };

        assert!(session.edit_color(2, &mut picker));
        assert_eq!(session.swatches()[2], custom);

        // The override flows through to the parsed request.
        let req = session.form.parse(&session.colors).unwrap();
        assert_eq!(req.colors[2], custom);
    }

    #[test]
    fn test_edit_color_cancel_is_noop() {
        let mut session = ChartSession::new();
        let before = session.swatches();
        let mut picker = StubPicker {
            reply: None,
            calls: 0,
        };

        assert!(!session.edit_color(0, &mut picker));
        assert_eq!(picker.calls, 1);
        assert_eq!(session.swatches(), before);
    }

    #[test]
    fn test_edit_color_past_label_count_does_not_panic() {
        let mut session = ChartSession::new();
        let custom = Color::rgb(7, 7, 7);
        let mut picker = StubPicker {
            reply: Some(custom),
            calls: 0,
        };

        // Index at the label count: the seed color wraps to a palette
        // default and the override sticks for when labels grow.
        assert!(session.edit_color(5, &mut picker));
        session.form.labels.push_str(",Review");
        assert_eq!(session.swatches()[5], custom);
    }

    #[test]
    fn test_override_survives_label_edit_at_same_index() {
        let mut session = ChartSession::new();
        let custom = Color::rgb(5, 5, 5);
        let mut picker = StubPicker {
            reply: Some(custom),
            calls: 0,
        };
        session.edit_color(0, &mut picker);

        session.form.labels = "Totally,Different,Labels".to_string();
        assert_eq!(session.swatches()[0], custom);
    }

    #[test]
    fn test_reset_colors_restores_palette() {
        let mut session = ChartSession::new();
        let mut picker = StubPicker {
            reply: Some(Color::BLACK),
            calls: 0,
        };
        session.edit_color(1, &mut picker);
        session.reset_colors();

        let fresh = ChartSession::new();
        assert_eq!(session.swatches(), fresh.swatches());
    }

    #[test]
    fn test_show_chart_displays_once() {
        let session = ChartSession::new();
        let mut window = RecordingWindow {
            shown: 0,
            fail: false,
        };
        session.show_chart(&mut window).unwrap();
        assert_eq!(window.shown, 1);
    }

    #[test]
    fn test_show_chart_rejects_invalid_form() {
        let mut session = ChartSession::new();
        session.form.values = "0,0,0,0,0".to_string();
        let mut window = RecordingWindow {
            shown: 0,
            fail: false,
        };

        let err = session.show_chart(&mut window).unwrap_err();
        assert!(matches!(err, ShellError::Chart(ChartError::ZeroTotal)));
        assert_eq!(window.shown, 0);
    }

    #[test]
    fn test_show_chart_surfaces_window_failure() {
        let session = ChartSession::new();
        let mut window = RecordingWindow {
            shown: 0,
            fail: true,
        };
        let err = session.show_chart(&mut window).unwrap_err();
        assert!(matches!(err, ShellError::Window(_)));
    }

    #[test]
    fn test_save_chart_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut session = ChartSession::new();
        session.form.kind = ChartKind::Radial;
        let mut dialog = StubDialog {
            path: Some(path.clone()),
        };

        let outcome = session.save_chart(&mut dialog).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved(path.clone()));
        assert!(path.exists());
    }

    #[test]
    fn test_save_chart_cancel_skips_validation() {
        let mut session = ChartSession::new();
        // Invalid form, but the user cancels before validation runs.
        session.form.values = "abc".to_string();
        let mut dialog = StubDialog { path: None };

        let outcome = session.save_chart(&mut dialog).unwrap();
        assert_eq!(outcome, SaveOutcome::Cancelled);
    }

    #[test]
    fn test_save_chart_reports_invalid_form_after_confirm() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.png");
        let mut session = ChartSession::new();
        session.form.title = "  ".to_string();
        let mut dialog = StubDialog {
            path: Some(path.clone()),
        };

        let err = session.save_chart(&mut dialog).unwrap_err();
        assert!(matches!(
            err,
            ShellError::Chart(ChartError::MissingField("title"))
        ));
        assert!(!path.exists());
    }
}
