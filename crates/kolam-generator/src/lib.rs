//! Kolam Pattern Generator
//!
//! Procedurally draws Kolam designs as standalone SVG documents from a small
//! set of numeric parameters (grid size, complexity, symmetry, stroke and
//! palette). Five drawing styles are supported: sikku, neli, pulli,
//! geometric and freehand.

pub mod params;
pub mod parser;
pub mod svg;

pub use params::*;
pub use parser::ParamsParser;
pub use svg::placeholder::generate_placeholder;
pub use svg::SvgGenerator;
