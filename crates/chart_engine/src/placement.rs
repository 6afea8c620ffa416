//! Annotation placement
//!
//! This module decides where each category's label and percentage text goes,
//! one [`AnnotationPlacer`] strategy per chart kind. Positions are computed
//! in data space: the unit circle for pie and donut (wedge radius 1.0), raw
//! value units for rose and radial bars, y pointing up. The layout maps them
//! into screen coordinates afterwards.
//!
//! The rules are closed-form: a wedge or bar whose percentage clears the 8%
//! threshold (and, for polar bars, whose length clears a fraction of the
//! longest bar) gets its percentage inside the shape; everything else gets
//! it just outside, slightly smaller. Labels sit beyond the rim at a
//! distance that shrinks as the bar's own value approaches the maximum, so
//! small bars keep their labels pulled in close.

use crate::model::ChartKind;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Percentage at or above which text is placed inside the wedge/bar.
/// The boundary is inclusive: exactly 8% goes internal.
pub const INTERNAL_PCT_THRESHOLD: f64 = 8.0;

/// Whether an annotation landed inside or outside its wedge/bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    Internal,
    External,
}

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// A placed piece of annotation text, in data-space coordinates (y up)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    /// Mid-angle of the wedge, or the bar's angle, in radians (0 = east, CCW)
    pub mid_angle: f64,
    pub x: f64,
    pub y: f64,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub font_size: f64,
    pub placement: Placement,
}

/// Everything a placer needs to know about one category
#[derive(Debug, Clone)]
pub struct CategoryMetrics<'a> {
    pub index: usize,
    pub label: &'a str,
    pub value: f64,
    pub percentage: f64,
    /// Mid-angle of the wedge, or the bar's angle, in radians (0 = east, CCW)
    pub mid_angle: f64,
    /// Maximum value across all categories
    pub max_value: f64,
    /// Mean value across all categories
    pub avg_value: f64,
}

/// Per-kind annotation placement strategy
pub trait AnnotationPlacer {
    /// Place the category label text
    fn place_label(&self, cat: &CategoryMetrics<'_>) -> Annotation;

    /// Place the percentage text
    fn place_percentage(&self, cat: &CategoryMetrics<'_>) -> Annotation;

    /// Outer data-space radius the plot must accommodate so the furthest
    /// label is never clipped.
    fn radial_limit(&self, max_value: f64, avg_value: f64) -> f64;
}

/// The placer for a chart kind
pub fn placer_for(kind: ChartKind) -> &'static dyn AnnotationPlacer {
    match kind {
        ChartKind::Pie => &PiePlacer,
        ChartKind::Donut => &DonutPlacer,
        ChartKind::Rose => &RosePlacer,
        ChartKind::Radial => &RadialPlacer,
    }
}

pub struct PiePlacer;
pub struct DonutPlacer;
pub struct RosePlacer;
pub struct RadialPlacer;

/// Radial distance of pie/donut labels from the center (wedge radius = 1.0)
const WEDGE_LABEL_DISTANCE: f64 = 1.15;
/// Headroom past the label ring so label text itself fits in the plot
const WEDGE_LABEL_HEADROOM: f64 = 0.15;

const LABEL_FONT_SIZE: f64 = 14.0;
const PCT_FONT_SIZE: f64 = 12.0;

impl AnnotationPlacer for PiePlacer {
    fn place_label(&self, cat: &CategoryMetrics<'_>) -> Annotation {
        wedge_label(cat)
    }

    fn place_percentage(&self, cat: &CategoryMetrics<'_>) -> Annotation {
        // Internal percentages sit at 70% of the pie radius.
        wedge_percentage(cat, 0.70)
    }

    fn radial_limit(&self, _max_value: f64, _avg_value: f64) -> f64 {
        WEDGE_LABEL_DISTANCE + WEDGE_LABEL_HEADROOM
    }
}

impl AnnotationPlacer for DonutPlacer {
    fn place_label(&self, cat: &CategoryMetrics<'_>) -> Annotation {
        wedge_label(cat)
    }

    fn place_percentage(&self, cat: &CategoryMetrics<'_>) -> Annotation {
        // Centered in the ring: the hole covers the inner 50%.
        wedge_percentage(cat, 0.75)
    }

    fn radial_limit(&self, _max_value: f64, _avg_value: f64) -> f64 {
        WEDGE_LABEL_DISTANCE + WEDGE_LABEL_HEADROOM
    }
}

impl AnnotationPlacer for RosePlacer {
    fn place_label(&self, cat: &CategoryMetrics<'_>) -> Annotation {
        let base = rose_base_distance(cat.avg_value, cat.max_value);
        polar_label(cat, base + 0.06 * (cat.value / cat.max_value))
    }

    fn place_percentage(&self, cat: &CategoryMetrics<'_>) -> Annotation {
        let internal =
            cat.percentage >= INTERNAL_PCT_THRESHOLD && cat.value >= 0.20 * cat.max_value;
        if internal {
            let fraction = if cat.percentage > 15.0 { 0.65 } else { 0.75 };
            // Font grows with the share, within readable bounds.
            let font = (PCT_FONT_SIZE * (cat.percentage / 12.0).max(0.8)).clamp(10.0, 13.0);
            internal_polar_percentage(cat, fraction, font)
        } else {
            let font = (PCT_FONT_SIZE * 0.85).clamp(9.0, 11.0);
            external_polar_percentage(cat, font)
        }
    }

    fn radial_limit(&self, max_value: f64, avg_value: f64) -> f64 {
        max_value * (rose_base_distance(avg_value, max_value) + 0.2)
    }
}

impl AnnotationPlacer for RadialPlacer {
    fn place_label(&self, cat: &CategoryMetrics<'_>) -> Annotation {
        let base = radial_base_distance(cat.avg_value, cat.max_value);
        polar_label(cat, base + 0.1 * (cat.value / cat.max_value))
    }

    fn place_percentage(&self, cat: &CategoryMetrics<'_>) -> Annotation {
        let internal =
            cat.percentage >= INTERNAL_PCT_THRESHOLD && cat.value >= 0.25 * cat.max_value;
        if internal {
            let fraction = if cat.percentage > 15.0 { 0.6 } else { 0.7 };
            internal_polar_percentage(cat, fraction, PCT_FONT_SIZE)
        } else {
            external_polar_percentage(cat, PCT_FONT_SIZE - 1.0)
        }
    }

    fn radial_limit(&self, max_value: f64, avg_value: f64) -> f64 {
        max_value * (radial_base_distance(avg_value, max_value) + 0.25)
    }
}

/// Base label distance for rose charts, as a multiple of the max value
fn rose_base_distance(avg_value: f64, max_value: f64) -> f64 {
    1.12 + 0.08 * (avg_value / max_value)
}

/// Base label distance for radial bar charts, as a multiple of the max value
fn radial_base_distance(avg_value: f64, max_value: f64) -> f64 {
    1.08 + 0.15 * (avg_value / max_value)
}

fn pct_text(percentage: f64) -> String {
    format!("{percentage:.1}%")
}

/// Pie/donut label: fixed distance outside the rim at the wedge mid-angle,
/// aligned away from the circle.
fn wedge_label(cat: &CategoryMetrics<'_>) -> Annotation {
    let x = WEDGE_LABEL_DISTANCE * cat.mid_angle.cos();
    let y = WEDGE_LABEL_DISTANCE * cat.mid_angle.sin();
    Annotation {
        text: cat.label.to_string(),
        mid_angle: cat.mid_angle,
        x,
        y,
        h_align: if x > 0.0 { HAlign::Left } else { HAlign::Right },
        v_align: VAlign::Center,
        font_size: LABEL_FONT_SIZE,
        placement: Placement::External,
    }
}

/// Pie/donut percentage: inside at `internal_radius` when the wedge clears
/// the 8% threshold, otherwise just outside the rim at a reduced size.
fn wedge_percentage(cat: &CategoryMetrics<'_>, internal_radius: f64) -> Annotation {
    if cat.percentage >= INTERNAL_PCT_THRESHOLD {
        Annotation {
            text: pct_text(cat.percentage),
            mid_angle: cat.mid_angle,
            x: internal_radius * cat.mid_angle.cos(),
            y: internal_radius * cat.mid_angle.sin(),
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            font_size: PCT_FONT_SIZE,
            placement: Placement::Internal,
        }
    } else {
        // Slightly flattened ellipse keeps external text clear of neighbors
        // near the top and bottom of the circle.
        Annotation {
            text: pct_text(cat.percentage),
            mid_angle: cat.mid_angle,
            x: 1.15 * cat.mid_angle.cos(),
            y: 1.10 * cat.mid_angle.sin(),
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            font_size: PCT_FONT_SIZE - 1.0,
            placement: Placement::External,
        }
    }
}

fn internal_polar_percentage(cat: &CategoryMetrics<'_>, fraction: f64, font_size: f64) -> Annotation {
    let r = cat.value * fraction;
    Annotation {
        text: pct_text(cat.percentage),
        mid_angle: cat.mid_angle,
        x: r * cat.mid_angle.cos(),
        y: r * cat.mid_angle.sin(),
        h_align: HAlign::Center,
        v_align: VAlign::Center,
        font_size,
        placement: Placement::Internal,
    }
}

/// External polar percentage: near the bar tip, but never closer to the
/// center than 30% of the longest bar.
fn external_polar_percentage(cat: &CategoryMetrics<'_>, font_size: f64) -> Annotation {
    let r = (cat.value * 0.3).max(cat.max_value * 0.3);
    Annotation {
        text: pct_text(cat.percentage),
        mid_angle: cat.mid_angle,
        x: r * cat.mid_angle.cos(),
        y: r * cat.mid_angle.sin(),
        h_align: HAlign::Center,
        v_align: VAlign::Center,
        font_size,
        placement: Placement::External,
    }
}

/// Polar label beyond the bar tip, aligned so the text leans away from the
/// bar based on its angular position relative to the vertical axis.
fn polar_label(cat: &CategoryMetrics<'_>, distance: f64) -> Annotation {
    let r = cat.max_value * distance;
    let (h_align, v_align) = polar_alignment(cat.mid_angle);
    Annotation {
        text: cat.label.to_string(),
        mid_angle: cat.mid_angle,
        x: r * cat.mid_angle.cos(),
        y: r * cat.mid_angle.sin(),
        h_align,
        v_align,
        font_size: LABEL_FONT_SIZE,
        placement: Placement::External,
    }
}

/// Alignment for polar labels from the bar's angle relative to vertical
fn polar_alignment(angle: f64) -> (HAlign, VAlign) {
    let from_vertical = angle - FRAC_PI_2;
    let h = if from_vertical.cos() > 0.1 {
        HAlign::Left
    } else if from_vertical.cos() < -0.1 {
        HAlign::Right
    } else {
        HAlign::Center
    };
    let v = if from_vertical.sin() > 0.1 {
        VAlign::Bottom
    } else if from_vertical.sin() < -0.1 {
        VAlign::Top
    } else {
        VAlign::Center
    };
    (h, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn metrics(percentage: f64, value: f64, max: f64, avg: f64) -> CategoryMetrics<'static> {
        CategoryMetrics {
            index: 0,
            label: "A",
            value,
            percentage,
            mid_angle: FRAC_PI_2,
            max_value: max,
            avg_value: avg,
        }
    }

    #[test]
    fn test_pie_threshold_is_inclusive() {
        // Exactly 8% goes internal.
        let at = PiePlacer.place_percentage(&metrics(8.0, 8.0, 50.0, 20.0));
        assert_eq!(at.placement, Placement::Internal);

        let below = PiePlacer.place_percentage(&metrics(7.999, 8.0, 50.0, 20.0));
        assert_eq!(below.placement, Placement::External);
    }

    #[test]
    fn test_pie_internal_radius() {
        let ann = PiePlacer.place_percentage(&metrics(50.0, 50.0, 50.0, 50.0));
        let r = (ann.x * ann.x + ann.y * ann.y).sqrt();
        assert!((r - 0.70).abs() < 1e-9);
        assert_eq!(ann.font_size, 12.0);
    }

    #[test]
    fn test_donut_internal_radius_sits_in_ring() {
        let ann = DonutPlacer.place_percentage(&metrics(50.0, 50.0, 50.0, 50.0));
        let r = (ann.x * ann.x + ann.y * ann.y).sqrt();
        assert!((r - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_wedge_external_is_flattened() {
        let mut cat = metrics(2.0, 2.0, 100.0, 50.0);
        cat.mid_angle = PI / 4.0;
        let ann = PiePlacer.place_percentage(&cat);
        assert_eq!(ann.placement, Placement::External);
        assert!((ann.x - 1.15 * cat.mid_angle.cos()).abs() < 1e-9);
        assert!((ann.y - 1.10 * cat.mid_angle.sin()).abs() < 1e-9);
        assert_eq!(ann.font_size, 11.0);
    }

    #[test]
    fn test_wedge_label_distance_and_text() {
        let ann = PiePlacer.place_label(&metrics(10.0, 10.0, 100.0, 50.0));
        let r = (ann.x * ann.x + ann.y * ann.y).sqrt();
        assert!((r - 1.15).abs() < 1e-9);
        assert_eq!(ann.text, "A");
        assert_eq!(ann.font_size, 14.0);
    }

    #[test]
    fn test_radial_needs_both_thresholds() {
        // 10% share but a short bar: external despite clearing the 8% bar.
        let short = RadialPlacer.place_percentage(&metrics(10.0, 2.0, 10.0, 5.0));
        assert_eq!(short.placement, Placement::External);

        // 10% share and long enough: internal.
        let long = RadialPlacer.place_percentage(&metrics(10.0, 4.0, 10.0, 5.0));
        assert_eq!(long.placement, Placement::Internal);
    }

    #[test]
    fn test_radial_internal_fraction_drops_above_15_pct() {
        let small = RadialPlacer.place_percentage(&metrics(10.0, 10.0, 10.0, 10.0));
        let r_small = (small.x * small.x + small.y * small.y).sqrt();
        assert!((r_small - 7.0).abs() < 1e-9); // 0.7 of the bar

        let big = RadialPlacer.place_percentage(&metrics(20.0, 10.0, 10.0, 10.0));
        let r_big = (big.x * big.x + big.y * big.y).sqrt();
        assert!((r_big - 6.0).abs() < 1e-9); // 0.6 of the bar
    }

    #[test]
    fn test_equal_radial_bars_all_internal_at_lower_fraction() {
        // Five equal bars: 20% each, every bar is the max.
        for _ in 0..5 {
            let ann = RadialPlacer.place_percentage(&metrics(20.0, 20.0, 20.0, 20.0));
            assert_eq!(ann.placement, Placement::Internal);
            let r = (ann.x * ann.x + ann.y * ann.y).sqrt();
            assert!((r - 20.0 * 0.6).abs() < 1e-9);
        }
    }

    #[test]
    fn test_external_polar_radius_floor() {
        // A tiny bar's percentage is held out at 30% of the max bar.
        let ann = RosePlacer.place_percentage(&metrics(1.0, 1.0, 100.0, 30.0));
        let r = (ann.x * ann.x + ann.y * ann.y).sqrt();
        assert!((r - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_rose_font_scales_and_clamps() {
        // Large share maxes out at 13.
        let big = RosePlacer.place_percentage(&metrics(60.0, 60.0, 60.0, 30.0));
        assert_eq!(big.font_size, 13.0);

        // Small internal share floors at the 0.8 factor: 12 * 0.8 = 9.6 -> 10.
        let small = RosePlacer.place_percentage(&metrics(8.0, 50.0, 50.0, 25.0));
        assert_eq!(small.placement, Placement::Internal);
        assert_eq!(small.font_size, 10.0);
    }

    #[test]
    fn test_rose_uses_20_pct_size_threshold() {
        // 21% of max passes for rose but would fail radial's 25%.
        let cat = metrics(9.0, 2.1, 10.0, 5.0);
        assert_eq!(RosePlacer.place_percentage(&cat).placement, Placement::Internal);
        assert_eq!(
            RadialPlacer.place_percentage(&cat).placement,
            Placement::External
        );
    }

    #[test]
    fn test_polar_label_distance_shrinks_for_small_bars() {
        let max = RosePlacer.place_label(&metrics(40.0, 10.0, 10.0, 5.0));
        let small = RosePlacer.place_label(&metrics(4.0, 1.0, 10.0, 5.0));
        let r_max = (max.x * max.x + max.y * max.y).sqrt();
        let r_small = (small.x * small.x + small.y * small.y).sqrt();
        assert!(r_max > r_small);
        // Base distance for avg/max = 0.5 is 1.16; the max bar adds 0.06.
        assert!((r_max - 10.0 * (1.16 + 0.06)).abs() < 1e-9);
    }

    #[test]
    fn test_polar_alignment_quadrants() {
        // Bar pointing east: cos(θ - π/2) = sin θ = 0 -> centered,
        // sin(θ - π/2) = -cos θ = -1 -> top-aligned.
        assert_eq!(polar_alignment(0.0), (HAlign::Center, VAlign::Top));
        // Straight up: centered both ways.
        assert_eq!(polar_alignment(FRAC_PI_2), (HAlign::Center, VAlign::Center));
        // 135°: cos(θ - π/2) = 0.707 and sin(θ - π/2) = 0.707.
        let (h, v) = polar_alignment(3.0 * PI / 4.0);
        assert_eq!(h, HAlign::Left);
        assert_eq!(v, VAlign::Bottom);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn wedge_placement_follows_threshold(pct in 0.0f64..100.0) {
                let ann = PiePlacer.place_percentage(&metrics(pct, pct, 100.0, 50.0));
                let expected = if pct >= INTERNAL_PCT_THRESHOLD {
                    Placement::Internal
                } else {
                    Placement::External
                };
                prop_assert_eq!(ann.placement, expected);
            }

            #[test]
            fn polar_label_stays_within_radial_limit(
                value in 0.01f64..1e4,
                max in 0.01f64..1e4,
                avg in 0.01f64..1e4,
            ) {
                prop_assume!(value <= max && avg <= max);
                let cat = metrics(value / max * 100.0, value, max, avg);
                for placer in [&RosePlacer as &dyn AnnotationPlacer, &RadialPlacer] {
                    let ann = placer.place_label(&cat);
                    let r = (ann.x * ann.x + ann.y * ann.y).sqrt();
                    prop_assert!(r <= placer.radial_limit(max, avg) + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_radial_limits() {
        // Rose: max * (1.12 + 0.08 * avg/max + 0.2)
        let limit = RosePlacer.radial_limit(10.0, 5.0);
        assert!((limit - 10.0 * (1.12 + 0.04 + 0.2)).abs() < 1e-9);

        // Radial: max * (1.08 + 0.15 * avg/max + 0.25)
        let limit = RadialPlacer.radial_limit(10.0, 10.0);
        assert!((limit - 10.0 * (1.08 + 0.15 + 0.25)).abs() < 1e-9);

        // Pie/donut are in unit-radius space.
        assert!((PiePlacer.radial_limit(99.0, 1.0) - 1.30).abs() < 1e-9);
    }
}
