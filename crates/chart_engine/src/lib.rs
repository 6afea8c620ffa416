//! Chart engine - geometry, annotation placement, and rendering for the chart designer
//!
//! This crate provides support for:
//! - Representing a chart request with a strongly-typed model
//! - Parsing and validating raw form input
//! - Resolving per-category colors (palette defaults plus user overrides)
//! - Placing label and percentage annotations per chart kind
//! - Calculating pie, donut, rose, and radial bar geometry
//! - Rendering charts to primitives or SVG
//! - Exporting charts to PNG files

mod error;
mod export;
mod layout;
mod model;
mod palette;
mod parse;
mod placement;
mod render;

pub use error::*;
pub use export::*;
pub use layout::*;
pub use model::*;
pub use palette::*;
pub use parse::*;
pub use placement::*;
pub use render::*;
