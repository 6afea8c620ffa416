//! Chart rendering
//!
//! This module renders a [`ChartLayout`] to render primitives and on to an
//! SVG string. Primitives keep wedges and bars as arcs in data-space angles
//! (0 = east, counter-clockwise, y up); the y-flip into SVG's y-down plane
//! happens in path generation.

use crate::layout::{AnnotationRole, ChartLayout, PlacedAnnotation};
use crate::model::{ChartKind, Color};
use crate::placement::{HAlign, VAlign};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A render primitive for chart elements
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderPrimitive {
    /// A filled rectangle, optionally with rounded corners
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: Option<f64>,
        fill: String,
        stroke: Option<String>,
        stroke_width: Option<f64>,
    },
    /// A circle
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
        stroke: Option<String>,
        stroke_width: Option<f64>,
    },
    /// An annular sector; a full wedge when `inner_radius` is zero.
    /// Angles are in data space: radians, 0 = east, counter-clockwise, y up.
    Arc {
        cx: f64,
        cy: f64,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
        fill: String,
        stroke: Option<String>,
        stroke_width: Option<f64>,
    },
    /// Text
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        font_family: String,
        fill: String,
        anchor: TextAnchor,
        baseline: TextBaseline,
        weight: FontWeight,
    },
}

/// Text anchor position
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Text baseline position
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

/// Font weight
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Rendered chart output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedChart {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<RenderPrimitive>,
}

/// Chart renderer
pub struct ChartRenderer {
    /// Background color; `None` leaves the canvas transparent
    pub background_color: Option<Color>,
    /// Font family for all text
    pub font_family: String,
    /// Title font size
    pub title_font_size: f64,
    /// Title text color
    pub title_color: Color,
    /// Label and external percentage text color
    pub text_color: Color,
    /// Fill of the rounded badge behind internal percentages
    pub badge_color: Color,
    /// Text color on the percentage badge
    pub badge_text_color: Color,
    /// Wedge outline color (pie/donut)
    pub wedge_edge_color: Color,
    /// Wedge outline width
    pub wedge_edge_width: f64,
    /// Radial bar outline color; rose bars reuse the wedge edge color
    pub bar_edge_color: Color,
    /// Polar bar outline width
    pub bar_edge_width: f64,
    /// Wedge/bar fill opacity
    pub fill_opacity: f64,
    /// Donut ring fill opacity
    pub donut_fill_opacity: f64,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self {
            background_color: None,
            font_family: "sans-serif".to_string(),
            title_font_size: 22.0,
            title_color: Color::rgb(26, 26, 26),
            text_color: Color::rgb(34, 34, 34),
            badge_color: Color::rgb(0x36, 0x4F, 0xC7).with_opacity(0.9),
            badge_text_color: Color::WHITE,
            wedge_edge_color: Color::rgb(250, 250, 250),
            wedge_edge_width: 3.0,
            bar_edge_color: Color::WHITE,
            bar_edge_width: 2.0,
            fill_opacity: 0.92,
            donut_fill_opacity: 0.95,
        }
    }
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a layout to primitives
    pub fn render(&self, layout: &ChartLayout) -> RenderedChart {
        let mut primitives = Vec::new();

        if let Some(bg) = self.background_color {
            primitives.push(RenderPrimitive::Rect {
                x: 0.0,
                y: 0.0,
                width: layout.total_bounds.width,
                height: layout.total_bounds.height,
                rx: None,
                fill: bg.to_css(),
                stroke: None,
                stroke_width: None,
            });
        }

        if let Some((bounds, ref text)) = layout.title {
            primitives.push(RenderPrimitive::Text {
                x: bounds.center_x(),
                y: bounds.center_y(),
                text: text.clone(),
                font_size: self.title_font_size,
                font_family: self.font_family.clone(),
                fill: self.title_color.to_css(),
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Middle,
                weight: FontWeight::Bold,
            });
        }

        self.render_wedges(&mut primitives, layout);
        self.render_bars(&mut primitives, layout);
        self.render_annotations(&mut primitives, layout);

        RenderedChart {
            width: layout.total_bounds.width,
            height: layout.total_bounds.height,
            primitives,
        }
    }

    /// Render a layout straight to an SVG string
    pub fn render_svg(&self, layout: &ChartLayout) -> String {
        self.to_svg(&self.render(layout))
    }

    /// Convert rendered primitives to an SVG string
    pub fn to_svg(&self, rendered: &RenderedChart) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            rendered.width, rendered.height, rendered.width, rendered.height
        );
        svg.push('\n');

        for primitive in &rendered.primitives {
            svg.push_str(&self.primitive_to_svg(primitive));
            svg.push('\n');
        }

        svg.push_str("</svg>");
        svg
    }

    fn render_wedges(&self, primitives: &mut Vec<RenderPrimitive>, layout: &ChartLayout) {
        let opacity = if layout.kind == ChartKind::Donut {
            self.donut_fill_opacity
        } else {
            self.fill_opacity
        };

        for wedge in &layout.wedges {
            primitives.push(RenderPrimitive::Arc {
                cx: wedge.center.x,
                cy: wedge.center.y,
                inner_radius: wedge.inner_radius,
                outer_radius: wedge.outer_radius,
                start_angle: wedge.start_angle,
                end_angle: wedge.end_angle,
                fill: wedge.color.with_opacity(opacity).to_css(),
                stroke: Some(self.wedge_edge_color.to_css()),
                stroke_width: Some(self.wedge_edge_width),
            });
        }

        if let Some(ref hole) = layout.hole {
            primitives.push(RenderPrimitive::Circle {
                cx: hole.center.x,
                cy: hole.center.y,
                r: hole.radius,
                fill: hole.color.to_css(),
                stroke: None,
                stroke_width: None,
            });
        }
    }

    fn render_bars(&self, primitives: &mut Vec<RenderPrimitive>, layout: &ChartLayout) {
        // Rose bars share the wedges' near-white edge; radial bars stroke
        // pure white.
        let edge = if layout.kind == ChartKind::Rose {
            self.wedge_edge_color
        } else {
            self.bar_edge_color
        };
        for bar in &layout.bars {
            if bar.radius <= 0.0 {
                continue;
            }
            primitives.push(RenderPrimitive::Arc {
                cx: bar.center.x,
                cy: bar.center.y,
                inner_radius: 0.0,
                outer_radius: bar.radius,
                start_angle: bar.start_angle,
                end_angle: bar.end_angle,
                fill: bar.color.with_opacity(self.fill_opacity).to_css(),
                stroke: Some(edge.to_css()),
                stroke_width: Some(self.bar_edge_width),
            });
        }
    }

    fn render_annotations(&self, primitives: &mut Vec<RenderPrimitive>, layout: &ChartLayout) {
        for ann in &layout.annotations {
            // Every percentage rides on a badge; external ones only shrink
            // the font.
            let badged = ann.role == AnnotationRole::Percentage;
            if badged {
                self.render_badge(primitives, ann);
            }
            primitives.push(RenderPrimitive::Text {
                x: ann.position.x,
                y: ann.position.y,
                text: ann.text.clone(),
                font_size: ann.font_size,
                font_family: self.font_family.clone(),
                fill: if badged {
                    self.badge_text_color.to_css()
                } else {
                    self.text_color.to_css()
                },
                anchor: anchor_for(ann.h_align),
                baseline: baseline_for(ann.v_align),
                weight: if badged {
                    FontWeight::Bold
                } else {
                    FontWeight::Normal
                },
            });
        }
    }

    /// Rounded rectangle behind an internal percentage, sized from the text
    fn render_badge(&self, primitives: &mut Vec<RenderPrimitive>, ann: &PlacedAnnotation) {
        let pad = 0.3 * ann.font_size;
        let text_width = ann.text.chars().count() as f64 * ann.font_size * 0.6;
        let width = text_width + 2.0 * pad;
        let height = ann.font_size + 2.0 * pad;
        primitives.push(RenderPrimitive::Rect {
            x: ann.position.x - width / 2.0,
            y: ann.position.y - height / 2.0,
            width,
            height,
            rx: Some(pad),
            fill: self.badge_color.to_css(),
            stroke: None,
            stroke_width: None,
        });
    }

    fn primitive_to_svg(&self, primitive: &RenderPrimitive) -> String {
        match primitive {
            RenderPrimitive::Rect {
                x,
                y,
                width,
                height,
                rx,
                fill,
                stroke,
                stroke_width,
            } => {
                let mut attrs = format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    x, y, width, height
                );
                if let Some(rx) = rx {
                    attrs.push_str(&format!(r#" rx="{}""#, rx));
                }
                attrs.push_str(&format!(r#" fill="{}""#, fill));
                if let Some(s) = stroke {
                    attrs.push_str(&format!(r#" stroke="{}""#, s));
                }
                if let Some(sw) = stroke_width {
                    attrs.push_str(&format!(r#" stroke-width="{}""#, sw));
                }
                attrs.push_str("/>");
                attrs
            }
            RenderPrimitive::Circle {
                cx,
                cy,
                r,
                fill,
                stroke,
                stroke_width,
            } => {
                let mut attrs =
                    format!(r#"<circle cx="{}" cy="{}" r="{}" fill="{}""#, cx, cy, r, fill);
                if let Some(s) = stroke {
                    attrs.push_str(&format!(r#" stroke="{}""#, s));
                }
                if let Some(sw) = stroke_width {
                    attrs.push_str(&format!(r#" stroke-width="{}""#, sw));
                }
                attrs.push_str("/>");
                attrs
            }
            RenderPrimitive::Arc {
                cx,
                cy,
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
                fill,
                stroke,
                stroke_width,
            } => {
                let path = arc_to_path(
                    *cx,
                    *cy,
                    *inner_radius,
                    *outer_radius,
                    *start_angle,
                    *end_angle,
                );
                let mut attrs = format!(r#"<path d="{}" fill="{}""#, path, fill);
                if let Some(s) = stroke {
                    attrs.push_str(&format!(r#" stroke="{}""#, s));
                }
                if let Some(sw) = stroke_width {
                    attrs.push_str(&format!(r#" stroke-width="{}""#, sw));
                }
                attrs.push_str("/>");
                attrs
            }
            RenderPrimitive::Text {
                x,
                y,
                text,
                font_size,
                font_family,
                fill,
                anchor,
                baseline,
                weight,
            } => {
                let anchor_str = match anchor {
                    TextAnchor::Start => "start",
                    TextAnchor::Middle => "middle",
                    TextAnchor::End => "end",
                };
                let baseline_str = match baseline {
                    TextBaseline::Top => "hanging",
                    TextBaseline::Middle => "central",
                    TextBaseline::Bottom => "text-after-edge",
                };
                let weight_str = match weight {
                    FontWeight::Normal => "normal",
                    FontWeight::Bold => "bold",
                };
                format!(
                    r#"<text x="{}" y="{}" font-size="{}" font-family="{}" font-weight="{}" fill="{}" text-anchor="{}" dominant-baseline="{}">{}</text>"#,
                    x,
                    y,
                    font_size,
                    font_family,
                    weight_str,
                    fill,
                    anchor_str,
                    baseline_str,
                    escape_xml(text)
                )
            }
        }
    }
}

fn anchor_for(h_align: HAlign) -> TextAnchor {
    match h_align {
        HAlign::Left => TextAnchor::Start,
        HAlign::Center => TextAnchor::Middle,
        HAlign::Right => TextAnchor::End,
    }
}

fn baseline_for(v_align: VAlign) -> TextBaseline {
    match v_align {
        VAlign::Top => TextBaseline::Top,
        VAlign::Center => TextBaseline::Middle,
        VAlign::Bottom => TextBaseline::Bottom,
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// SVG path for an annular sector given data-space angles.
///
/// Data angles grow counter-clockwise with y up; SVG's y axis points down,
/// so a data point lands at screen angle -theta. The outer arc therefore
/// runs with sweep flag 0, and the inner return arc with sweep flag 1.
fn arc_to_path(
    cx: f64,
    cy: f64,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> String {
    let large_arc = if (end_angle - start_angle).abs() > PI {
        1
    } else {
        0
    };

    let point = |r: f64, theta: f64| (cx + r * theta.cos(), cy - r * theta.sin());

    let (outer_start_x, outer_start_y) = point(outer_radius, start_angle);
    let (outer_end_x, outer_end_y) = point(outer_radius, end_angle);

    if inner_radius > 0.0 {
        let (inner_start_x, inner_start_y) = point(inner_radius, start_angle);
        let (inner_end_x, inner_end_y) = point(inner_radius, end_angle);

        format!(
            "M {} {} A {} {} 0 {} 0 {} {} L {} {} A {} {} 0 {} 1 {} {} Z",
            outer_start_x,
            outer_start_y,
            outer_radius,
            outer_radius,
            large_arc,
            outer_end_x,
            outer_end_y,
            inner_end_x,
            inner_end_y,
            inner_radius,
            inner_radius,
            large_arc,
            inner_start_x,
            inner_start_y
        )
    } else {
        format!(
            "M {} {} L {} {} A {} {} 0 {} 0 {} {} Z",
            cx,
            cy,
            outer_start_x,
            outer_start_y,
            outer_radius,
            outer_radius,
            large_arc,
            outer_end_x,
            outer_end_y
        )
    }
}
