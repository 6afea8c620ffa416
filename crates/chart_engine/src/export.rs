//! Chart export
//!
//! Renders a chart request straight to an SVG string or a PNG file. PNG
//! export rasterizes the SVG at 150 DPI onto a transparent canvas, so the
//! output drops cleanly onto slides and documents.

use crate::error::{ChartError, ChartResult};
use crate::layout::ChartLayoutCalculator;
use crate::model::ChartRequest;
use crate::render::{ChartRenderer, RenderedChart};
use std::path::Path;
use std::sync::Arc;

/// Default canvas size, in CSS pixels
pub const DEFAULT_SIZE: f64 = 700.0;

/// Export raster density
pub const EXPORT_DPI: f64 = 150.0;
/// CSS pixel density the SVG coordinates are expressed in
pub const BASE_DPI: f64 = 96.0;

/// Render a request to primitives at the default canvas size
pub fn render_chart(request: &ChartRequest) -> ChartResult<RenderedChart> {
    let layout = ChartLayoutCalculator::new().calculate(request, DEFAULT_SIZE, DEFAULT_SIZE)?;
    Ok(ChartRenderer::new().render(&layout))
}

/// Render a request to an SVG string at the default canvas size
pub fn render_svg(request: &ChartRequest) -> ChartResult<String> {
    let layout = ChartLayoutCalculator::new().calculate(request, DEFAULT_SIZE, DEFAULT_SIZE)?;
    Ok(ChartRenderer::new().render_svg(&layout))
}

/// Render a request and write it to `path` as a PNG.
///
/// The raster is scaled up from the SVG's CSS pixels to 150 DPI. Pixels not
/// covered by the chart stay fully transparent. Output is deterministic for
/// a given request and installed font set.
pub fn export_png(request: &ChartRequest, path: &Path) -> ChartResult<()> {
    let svg = render_svg(request)?;

    let mut opt = usvg::Options::default();
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    opt.fontdb = Arc::new(db);

    let tree = usvg::Tree::from_data(svg.as_bytes(), &opt)
        .map_err(|e| ChartError::Export(format!("failed to parse generated SVG: {e}")))?;

    let scale = EXPORT_DPI / BASE_DPI;
    let pixel_size = (DEFAULT_SIZE * scale).ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(pixel_size, pixel_size).ok_or_else(|| {
        ChartError::Export(format!("failed to allocate {pixel_size}x{pixel_size} pixmap"))
    })?;

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale as f32, scale as f32),
        &mut pixmap.as_mut(),
    );

    pixmap
        .save_png(path)
        .map_err(|e| ChartError::Export(format!("failed to write PNG: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChartKind, DisplayOptions};
    use crate::palette::ColorResolver;

    fn request(kind: ChartKind) -> ChartRequest {
        ChartRequest {
            title: "Export Test".to_string(),
            labels: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            values: vec![10.0, 30.0, 60.0],
            kind,
            options: DisplayOptions::default(),
            colors: ColorResolver::new().resolved(3),
        }
    }

    #[test]
    fn test_render_svg_for_every_kind() {
        for kind in ChartKind::all() {
            let svg = render_svg(&request(kind)).unwrap();
            assert!(svg.starts_with("<svg"), "no svg for {}", kind.name());
            assert!(svg.contains("Export Test"));
        }
    }

    #[test]
    fn test_export_png_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        export_png(&request(ChartKind::Donut), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_export_png_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        let req = request(ChartKind::Rose);
        export_png(&req, &a).unwrap();
        export_png(&req, &b).unwrap();
        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }

    #[test]
    fn test_export_rejects_invalid_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        let mut req = request(ChartKind::Pie);
        req.values = vec![0.0, 0.0, 0.0];

        let err = export_png(&req, &path).unwrap_err();
        assert!(matches!(err, ChartError::ZeroTotal));
        assert!(!path.exists());
    }
}
