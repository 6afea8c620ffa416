//! Chart request model
//!
//! This module defines the data structures for a validated chart request:
//! the chart kind, category labels and values, display flags, and the
//! per-category colors resolved for this render.

use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// The four chart shapes the designer can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Classic pie chart
    Pie,
    /// Pie with a concentric hole covering the inner 50% of the radius
    Donut,
    /// Polar bars spanning the full circle / N each, length = raw value
    Rose,
    /// Polar bars at 70% of the rose width, leaving gaps between bars
    Radial,
}

impl ChartKind {
    /// All kinds, in the order the designer offers them
    pub fn all() -> [ChartKind; 4] {
        [
            ChartKind::Pie,
            ChartKind::Donut,
            ChartKind::Rose,
            ChartKind::Radial,
        ]
    }

    /// The kind's display name
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Pie => "pie",
            ChartKind::Donut => "donut",
            ChartKind::Rose => "rose",
            ChartKind::Radial => "radial",
        }
    }

    /// Whether this kind is drawn as polar bars rather than wedges
    pub fn is_polar(&self) -> bool {
        matches!(self, ChartKind::Rose | ChartKind::Radial)
    }
}

impl Default for ChartKind {
    fn default() -> Self {
        ChartKind::Pie
    }
}

/// Which optional chart elements to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub show_title: bool,
    pub show_labels: bool,
    pub show_percentages: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_title: true,
            show_labels: true,
            show_percentages: true,
        }
    }
}

/// A validated chart request, ready for layout and rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Chart title
    pub title: String,
    /// Category labels, aligned by index with `values`
    pub labels: Vec<String>,
    /// Category values, aligned by index with `labels`
    pub values: Vec<f64>,
    /// The chart shape to draw
    pub kind: ChartKind,
    /// Display flags
    pub options: DisplayOptions,
    /// One resolved color per category
    pub colors: Vec<Color>,
}

impl ChartRequest {
    /// Check the request invariants: matching non-empty label/value lists,
    /// finite values, and a non-zero total. Negative values are accepted;
    /// they produce degenerate geometry but are not an input error.
    pub fn validate(&self) -> ChartResult<()> {
        if self.title.is_empty() {
            return Err(ChartError::MissingField("title"));
        }
        if self.labels.is_empty() {
            return Err(ChartError::MissingField("labels"));
        }
        if self.values.is_empty() {
            return Err(ChartError::MissingField("values"));
        }
        for value in &self.values {
            if !value.is_finite() {
                return Err(ChartError::MalformedNumber {
                    token: value.to_string(),
                });
            }
        }
        if self.labels.len() != self.values.len() {
            return Err(ChartError::CountMismatch {
                labels: self.labels.len(),
                values: self.values.len(),
            });
        }
        if self.values.iter().sum::<f64>() == 0.0 {
            return Err(ChartError::ZeroTotal);
        }
        Ok(())
    }

    /// Number of categories
    pub fn category_count(&self) -> usize {
        self.labels.len()
    }

    /// Each value's share of the total, in percent. Callers must have
    /// validated the request first; a zero total would divide by zero here.
    pub fn percentages(&self) -> Vec<f64> {
        percentages(&self.values)
    }

    /// The maximum value across all categories
    pub fn max_value(&self) -> f64 {
        self.values.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }

    /// The mean value across all categories
    pub fn mean_value(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

/// Compute each value's share of the total, in percent
pub fn percentages(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    values.iter().map(|v| v / total * 100.0).collect()
}

/// RGBA color representation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (fully opaque)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "FF0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::rgb(r, g, b))
    }

    /// Convert to a hex string (with # prefix, alpha dropped)
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to a CSS color string
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }

    /// Replace the alpha channel, taking a 0.0-1.0 opacity
    pub fn with_opacity(&self, opacity: f64) -> Self {
        Self {
            a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..*self
        }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
