//! The editable chart form
//!
//! Raw text exactly as the user typed it, plus the kind selector and the
//! display checkboxes. Parsing into a validated request happens on demand,
//! never while typing, so half-finished input is not an error.

use chart_engine::{
    parse_chart_request, split_labels, ChartKind, ChartRequest, ChartResult, ColorResolver,
    DisplayOptions,
};
use serde::{Deserialize, Serialize};

/// The form's current field contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartForm {
    pub title: String,
    /// Comma-separated category labels
    pub labels: String,
    /// Comma-separated category values
    pub values: String,
    pub kind: ChartKind,
    pub options: DisplayOptions,
}

impl Default for ChartForm {
    fn default() -> Self {
        Self {
            title: "My Chart".to_string(),
            labels: "Contact,Connect,Curate,Conclude,Reconnect".to_string(),
            values: "20,20,20,20,20".to_string(),
            kind: ChartKind::Pie,
            options: DisplayOptions::default(),
        }
    }
}

impl ChartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// The labels as currently typed, split and trimmed. Used for the color
    /// swatch row, which must track label edits live.
    pub fn preview_labels(&self) -> Vec<String> {
        split_labels(&self.labels)
    }

    /// Parse the form into a validated request, resolving colors through
    /// `resolver`
    pub fn parse(&self, resolver: &ColorResolver) -> ChartResult<ChartRequest> {
        parse_chart_request(
            &self.title,
            &self.labels,
            &self.values,
            self.kind,
            self.options,
            resolver,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_engine::ChartError;

    #[test]
    fn test_default_form_is_valid() {
        let form = ChartForm::default();
        assert_eq!(form.title, "My Chart");
        assert_eq!(form.kind, ChartKind::Pie);
        assert!(form.options.show_title);

        let req = form.parse(&ColorResolver::new()).unwrap();
        assert_eq!(req.category_count(), 5);
        assert_eq!(req.labels[0], "Contact");
        assert_eq!(req.values, vec![20.0; 5]);
    }

    #[test]
    fn test_preview_labels_track_edits() {
        let mut form = ChartForm::default();
        form.labels = "North, South ".to_string();
        assert_eq!(form.preview_labels(), vec!["North", "South"]);
    }

    #[test]
    fn test_parse_surfaces_validation_errors() {
        let mut form = ChartForm::default();
        form.values = "10,20".to_string();
        let err = form.parse(&ColorResolver::new()).unwrap_err();
        assert!(matches!(
            err,
            ChartError::CountMismatch {
                labels: 5,
                values: 2
            }
        ));
    }
}
