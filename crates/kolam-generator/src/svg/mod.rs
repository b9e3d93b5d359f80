//! SVG generation for Kolam designs
//!
//! Every design is built in three layers: the dot grid, one style layer
//! chosen by `GeneratorParams::style`, and an optional center marker for
//! radial symmetry.

pub mod document;
pub mod placeholder;
pub mod styles;

use crate::params::GeneratorParams;
use anyhow::{Context, Result};
use document::{Point, SvgDocument};
use kolamkala_common::{KolamStyle, SymmetryType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tracing::debug;

/// Row-major dot positions plus the grid geometry styles need
pub struct DotGrid {
    pub dots: Vec<Point>,
    pub cols: usize,
    pub spacing: f64,
}

impl DotGrid {
    pub fn new(rows: u32, cols: u32, spacing: u32) -> Self {
        let spacing = f64::from(spacing);
        let mut dots = Vec::with_capacity(rows as usize * cols as usize);

        for r in 0..rows {
            for c in 0..cols {
                dots.push(Point::new(
                    (f64::from(c) + 0.5) * spacing + spacing / 2.0,
                    (f64::from(r) + 0.5) * spacing + spacing / 2.0,
                ));
            }
        }

        Self {
            dots,
            cols: cols as usize,
            spacing,
        }
    }

    /// Index of the right-hand neighbour in the same row
    pub fn right_of(&self, idx: usize) -> Option<usize> {
        (self.cols > 0 && (idx + 1) % self.cols != 0 && idx + 1 < self.dots.len())
            .then_some(idx + 1)
    }

    /// Index of the neighbour one row down
    pub fn below(&self, idx: usize) -> Option<usize> {
        (self.cols > 0 && idx + self.cols < self.dots.len()).then_some(idx + self.cols)
    }

    /// Index of the neighbour one row down and one column right
    pub fn below_right(&self, idx: usize) -> Option<usize> {
        self.right_of(idx)
            .and_then(|_| (idx + self.cols + 1 < self.dots.len()).then_some(idx + self.cols + 1))
    }
}

/// Main generator that turns parameters into an SVG document
pub struct SvgGenerator {
    params: GeneratorParams,
}

impl SvgGenerator {
    /// Create a new generator for a parameter set
    pub fn new(params: GeneratorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Render with the thread-local RNG; sikku and freehand differ on every call
    pub fn generate(&self) -> String {
        self.generate_with_rng(&mut rand::thread_rng())
    }

    /// Render reproducibly: the same seed always yields the same document
    pub fn generate_seeded(&self, seed: u64) -> String {
        self.generate_with_rng(&mut StdRng::seed_from_u64(seed))
    }

    /// Render with a caller-supplied RNG
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let params = &self.params;
        let width = params.width();
        let height = params.height();
        let center = Point::new(width / 2.0, height / 2.0);

        let grid = DotGrid::new(params.rows, params.cols, params.dot_spacing);
        let mut doc = SvgDocument::new(width, height, "transparent");

        for dot in &grid.dots {
            doc.dot(*dot, params.stroke_width, params.primary_color());
        }

        match params.style {
            KolamStyle::Sikku => styles::draw_sikku(&mut doc, &grid, params, rng),
            KolamStyle::Neli => styles::draw_neli(&mut doc, &grid, params),
            KolamStyle::Pulli => styles::draw_pulli(&mut doc, &grid, params),
            KolamStyle::Geometric => styles::draw_geometric(&mut doc, center, params),
            KolamStyle::Freehand => styles::draw_freehand(&mut doc, &grid, params, rng),
        }

        if params.symmetry_type == SymmetryType::Radial && params.symmetry_axes > 1 {
            doc.dot(center, params.stroke_width * 2.0, params.primary_color());
        }

        debug!(
            "Generated {} design {}x{} ({} dots)",
            params.style,
            params.rows,
            params.cols,
            grid.dots.len()
        );

        doc.finish()
    }

    /// Render and write the document to a file
    pub fn generate_to_file<P: AsRef<Path>>(&self, output_path: P) -> Result<()> {
        let svg = self.generate();
        std::fs::write(output_path.as_ref(), svg).with_context(|| {
            format!(
                "Failed to write SVG to {}",
                output_path.as_ref().display()
            )
        })?;
        Ok(())
    }
}
