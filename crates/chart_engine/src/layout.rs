//! Chart layout calculations
//!
//! This module turns a validated [`ChartRequest`] into screen-space
//! geometry: wedges for pie/donut charts, annular sectors for polar bars,
//! the donut hole, the title band, and every annotation mapped from the
//! placement module's data-space coordinates into pixels.
//!
//! Angle convention throughout: radians, 0 = east, counter-clockwise
//! positive, matching the placement module. The y-flip into screen
//! coordinates happens only when points are produced.

use crate::error::{ChartError, ChartResult};
use crate::model::{ChartKind, ChartRequest, Color};
use crate::placement::{placer_for, CategoryMetrics, HAlign, Placement, VAlign};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// A rectangle in layout coordinates
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LayoutRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Shrink the rectangle by the given padding on every side
    pub fn inset(&self, padding: f64) -> Self {
        Self {
            x: self.x + padding,
            y: self.y + padding,
            width: (self.width - 2.0 * padding).max(0.0),
            height: (self.height - 2.0 * padding).max(0.0),
        }
    }

    /// Shrink from the top only
    pub fn inset_top(&self, amount: f64) -> Self {
        Self {
            x: self.x,
            y: self.y + amount,
            width: self.width,
            height: (self.height - amount).max(0.0),
        }
    }
}

/// A point in layout coordinates
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Layout for one pie/donut wedge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WedgeLayout {
    pub center: LayoutPoint,
    /// Inner radius in pixels (0 for pie, half the outer radius for donut)
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
    pub value: f64,
    pub percentage: f64,
    pub category_index: usize,
    pub color: Color,
}

/// Layout for one polar bar (an annular sector from the center out)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolarBarLayout {
    pub center: LayoutPoint,
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
    /// Bar length in pixels
    pub radius: f64,
    pub value: f64,
    pub percentage: f64,
    pub category_index: usize,
    pub color: Color,
}

/// The donut's center disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoleLayout {
    pub center: LayoutPoint,
    pub radius: f64,
    pub color: Color,
}

/// What an annotation is annotating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationRole {
    Label,
    Percentage,
}

/// An annotation mapped into screen coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedAnnotation {
    pub position: LayoutPoint,
    pub text: String,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub font_size: f64,
    pub placement: Placement,
    pub role: AnnotationRole,
    pub category_index: usize,
}

/// Complete layout for a chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartLayout {
    pub kind: ChartKind,
    pub total_bounds: LayoutRect,
    pub plot_area: LayoutRect,
    /// Title bounds and text, when the title is shown
    pub title: Option<(LayoutRect, String)>,
    /// Wedges (pie/donut charts)
    pub wedges: Vec<WedgeLayout>,
    /// Polar bars (rose/radial charts)
    pub bars: Vec<PolarBarLayout>,
    /// Donut center disk
    pub hole: Option<HoleLayout>,
    pub annotations: Vec<PlacedAnnotation>,
}

/// Layout calculator for charts
pub struct ChartLayoutCalculator {
    /// Padding around the chart
    pub padding: f64,
    /// Font size for the title band
    pub title_font_size: f64,
    /// Extra gap between the title band and the plot
    pub title_gap: f64,
    /// Fill color for the donut hole
    pub hole_color: Color,
}

impl Default for ChartLayoutCalculator {
    fn default() -> Self {
        Self {
            padding: 10.0,
            title_font_size: 22.0,
            title_gap: 8.0,
            hole_color: Color::WHITE,
        }
    }
}

impl ChartLayoutCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate the complete layout for a chart of the given pixel size
    pub fn calculate(
        &self,
        request: &ChartRequest,
        width: f64,
        height: f64,
    ) -> ChartResult<ChartLayout> {
        request.validate()?;

        let total_bounds = LayoutRect::new(0.0, 0.0, width, height);
        let mut available = total_bounds.inset(self.padding);

        let title = if request.options.show_title {
            let band_height = self.title_font_size * 1.5;
            let bounds = LayoutRect::new(available.x, available.y, available.width, band_height);
            available = available.inset_top(band_height + self.title_gap);
            Some((bounds, request.title.clone()))
        } else {
            None
        };

        let mut layout = ChartLayout {
            kind: request.kind,
            total_bounds,
            plot_area: available,
            title,
            wedges: Vec::new(),
            bars: Vec::new(),
            hole: None,
            annotations: Vec::new(),
        };

        let center = LayoutPoint::new(available.center_x(), available.center_y());
        let plot_radius = available.width.min(available.height) / 2.0;

        let percentages = request.percentages();
        let max_value = request.max_value();
        let avg_value = request.mean_value();
        let placer = placer_for(request.kind);

        // Data units per pixel: the placer's radial limit exactly fills the
        // plot radius, so the furthest label ring is never clipped.
        let limit = placer.radial_limit(max_value, avg_value);
        let scale = plot_radius / limit;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ChartError::Render(
                "values produce a degenerate radial scale".to_string(),
            ));
        }

        match request.kind {
            ChartKind::Pie | ChartKind::Donut => {
                self.calculate_wedges(request, &percentages, center, scale, &mut layout);
            }
            ChartKind::Rose | ChartKind::Radial => {
                self.calculate_polar_bars(request, &percentages, center, scale, &mut layout);
            }
        }

        // Annotations: data space -> pixels, flipping y.
        for (index, (label, &value)) in request.labels.iter().zip(&request.values).enumerate() {
            let mid_angle = match request.kind {
                ChartKind::Pie | ChartKind::Donut => layout.wedges[index].mid_angle,
                ChartKind::Rose | ChartKind::Radial => layout.bars[index].mid_angle,
            };
            let cat = CategoryMetrics {
                index,
                label,
                value,
                percentage: percentages[index],
                mid_angle,
                max_value,
                avg_value,
            };
            if request.options.show_labels {
                let ann = placer.place_label(&cat);
                layout
                    .annotations
                    .push(place(&ann, center, scale, AnnotationRole::Label, index));
            }
            if request.options.show_percentages {
                let ann = placer.place_percentage(&cat);
                layout
                    .annotations
                    .push(place(&ann, center, scale, AnnotationRole::Percentage, index));
            }
        }

        Ok(layout)
    }

    /// Wedges start at 90 degrees ("up") and proceed counter-clockwise in
    /// the labels' order, each spanning an angle proportional to its value.
    fn calculate_wedges(
        &self,
        request: &ChartRequest,
        percentages: &[f64],
        center: LayoutPoint,
        scale: f64,
        layout: &mut ChartLayout,
    ) {
        let outer_radius = scale; // wedge radius is 1.0 in data space
        let inner_radius = if request.kind == ChartKind::Donut {
            outer_radius * 0.5
        } else {
            0.0
        };

        let mut current = FRAC_PI_2;
        for (index, &value) in request.values.iter().enumerate() {
            let sweep = percentages[index] / 100.0 * 2.0 * PI;
            let start_angle = current;
            let end_angle = current + sweep;
            layout.wedges.push(WedgeLayout {
                center,
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
                mid_angle: (start_angle + end_angle) / 2.0,
                value,
                percentage: percentages[index],
                category_index: index,
                color: category_color(request, index),
            });
            current = end_angle;
        }

        if request.kind == ChartKind::Donut {
            layout.hole = Some(HoleLayout {
                center,
                radius: outer_radius * 0.5,
                color: self.hole_color,
            });
        }
    }

    /// N angularly equal bars starting east, counter-clockwise, bar length
    /// equal to the raw value. Rose bars span the full circle / N; radial
    /// bars take 70% of that, leaving gaps.
    fn calculate_polar_bars(
        &self,
        request: &ChartRequest,
        percentages: &[f64],
        center: LayoutPoint,
        scale: f64,
        layout: &mut ChartLayout,
    ) {
        let n = request.category_count();
        let step = 2.0 * PI / n as f64;
        let width = if request.kind == ChartKind::Radial {
            step * 0.7
        } else {
            step
        };

        for (index, &value) in request.values.iter().enumerate() {
            let mid_angle = index as f64 * step;
            layout.bars.push(PolarBarLayout {
                center,
                start_angle: mid_angle - width / 2.0,
                end_angle: mid_angle + width / 2.0,
                mid_angle,
                radius: (value * scale).max(0.0),
                value,
                percentage: percentages[index],
                category_index: index,
                color: category_color(request, index),
            });
        }
    }
}

/// The request's resolved color for a category, falling back to the palette
/// default when the colors list is shorter than the labels list
fn category_color(request: &ChartRequest, index: usize) -> Color {
    request
        .colors
        .get(index)
        .copied()
        .unwrap_or_else(|| crate::palette::default_color(index, request.category_count()))
}

fn place(
    ann: &crate::placement::Annotation,
    center: LayoutPoint,
    scale: f64,
    role: AnnotationRole,
    category_index: usize,
) -> PlacedAnnotation {
    PlacedAnnotation {
        position: LayoutPoint::new(center.x + ann.x * scale, center.y - ann.y * scale),
        text: ann.text.clone(),
        h_align: ann.h_align,
        v_align: ann.v_align,
        font_size: ann.font_size,
        placement: ann.placement,
        role,
        category_index,
    }
}
