//! Color resolution
//!
//! This module provides the default categorical palette and the
//! [`ColorResolver`], which layers index-keyed user overrides on top of it.
//! The resolver is an explicit value object owned by the session; it is the
//! only mutable color state in the system.

use crate::model::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The fixed categorical palette (the 20 tab20 colors)
pub const CATEGORICAL_PALETTE: [Color; 20] = [
    Color::rgb(31, 119, 180),
    Color::rgb(174, 199, 232),
    Color::rgb(255, 127, 14),
    Color::rgb(255, 187, 120),
    Color::rgb(44, 160, 44),
    Color::rgb(152, 223, 138),
    Color::rgb(214, 39, 40),
    Color::rgb(255, 152, 150),
    Color::rgb(148, 103, 189),
    Color::rgb(197, 176, 213),
    Color::rgb(140, 86, 75),
    Color::rgb(196, 156, 148),
    Color::rgb(227, 119, 194),
    Color::rgb(247, 182, 210),
    Color::rgb(127, 127, 127),
    Color::rgb(199, 199, 199),
    Color::rgb(188, 189, 34),
    Color::rgb(219, 219, 141),
    Color::rgb(23, 190, 207),
    Color::rgb(158, 218, 229),
];

/// Default color for category `index` out of `category_count`.
///
/// For up to 20 categories the palette is sampled evenly so neighboring
/// categories stay visually distinct; beyond 20 the colors wrap around.
/// An index at or past `category_count` wraps too, so callers may probe
/// positions beyond the current label list.
pub fn default_color(index: usize, category_count: usize) -> Color {
    let len = CATEGORICAL_PALETTE.len();
    if category_count == 0 {
        return CATEGORICAL_PALETTE[0];
    }
    if category_count <= len {
        CATEGORICAL_PALETTE[(index * len / category_count) % len]
    } else {
        CATEGORICAL_PALETTE[index % len]
    }
}

/// Per-category colors with user overrides layered over the palette.
///
/// Overrides are keyed by category index, not by label text: if the label
/// list is edited, an override applies to whatever label now occupies that
/// index. The session re-resolves the swatch preview on every label edit,
/// which keeps this visible to the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorResolver {
    overrides: HashMap<usize, Color>,
}

impl ColorResolver {
    /// Create a resolver with no overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for category `index` out of `category_count`: the override if
    /// one is set, otherwise the palette default.
    pub fn resolve(&self, index: usize, category_count: usize) -> Color {
        self.overrides
            .get(&index)
            .copied()
            .unwrap_or_else(|| default_color(index, category_count))
    }

    /// Resolve every category at once, in index order
    pub fn resolved(&self, category_count: usize) -> Vec<Color> {
        (0..category_count)
            .map(|i| self.resolve(i, category_count))
            .collect()
    }

    /// Set an override; it takes strict precedence over the palette
    pub fn set_override(&mut self, index: usize, color: Color) {
        self.overrides.insert(index, color);
    }

    /// Remove a single override, restoring the palette default
    pub fn clear_override(&mut self, index: usize) {
        self.overrides.remove(&index);
    }

    /// Whether an override is set for `index`
    pub fn has_override(&self, index: usize) -> bool {
        self.overrides.contains_key(&index)
    }

    /// Remove every override
    pub fn reset(&mut self) {
        self.overrides.clear();
    }
}
