//! Style layers - one drawing rule per Kolam family

use super::document::{Point, Stroke, SvgDocument};
use super::DotGrid;
use crate::params::GeneratorParams;
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Sikku: jittered curves from every inner dot to its right and lower neighbours
pub fn draw_sikku<R: Rng + ?Sized>(
    doc: &mut SvgDocument,
    grid: &DotGrid,
    params: &GeneratorParams,
    rng: &mut R,
) {
    let jitter = grid.spacing * 0.3 * f64::from(params.complexity);
    let primary = Stroke::new(params.primary_color(), params.stroke_width).round_cap();
    let secondary = Stroke::new(params.secondary_color(), params.stroke_width).round_cap();

    for (idx, current) in grid.dots.iter().enumerate() {
        let (Some(right), Some(below)) = (grid.right_of(idx), grid.below(idx)) else {
            continue;
        };
        let right = grid.dots[right];
        let below = grid.dots[below];

        let ctrl = Point::new(
            (current.x + right.x + below.x) / 3.0 + (rng.gen::<f64>() - 0.5) * jitter,
            (current.y + right.y + below.y) / 3.0 + (rng.gen::<f64>() - 0.5) * jitter,
        );

        doc.quadratic(*current, ctrl, right, &primary);
        doc.quadratic(*current, ctrl, below, &secondary);
    }
}

/// Petals per rosette
fn petal_count(complexity: u32) -> u32 {
    complexity.saturating_add(4)
}

/// Freehand curves per design
fn curve_count(complexity: u32) -> u32 {
    complexity.saturating_mul(3).saturating_add(5)
}

/// Neli: petal rosettes on every n-th dot, denser as complexity grows
pub fn draw_neli(doc: &mut SvgDocument, grid: &DotGrid, params: &GeneratorParams) {
    let complexity = f64::from(params.complexity);
    let petal_size = grid.spacing * 0.4 * (1.0 + complexity * 0.2);
    let stride = 4u32.saturating_sub(params.complexity).max(1) as usize;
    let petals = petal_count(params.complexity);

    let primary = Stroke::new(params.primary_color(), params.stroke_width).round_cap();
    let secondary = Stroke::new(params.secondary_color(), params.stroke_width).round_cap();

    for dot in grid.dots.iter().step_by(stride) {
        for p in 0..petals {
            let angle = f64::from(p) / f64::from(petals) * TAU;
            let end = dot.polar(angle, petal_size);
            let ctrl = dot.polar(angle + 0.3, petal_size * 1.5);
            let stroke = if p % 2 == 0 { &primary } else { &secondary };

            doc.quadratic(*dot, ctrl, end, stroke);
        }
    }
}

/// Pulli: grid edges, plus dashed diagonals from complexity 3 upwards
pub fn draw_pulli(doc: &mut SvgDocument, grid: &DotGrid, params: &GeneratorParams) {
    let edge = Stroke::new(params.primary_color(), params.stroke_width).round_cap();
    let diagonal = Stroke::new(params.secondary_color(), params.stroke_width * 0.7)
        .round_cap()
        .dashed(params.stroke_width * 2.0);

    for (idx, current) in grid.dots.iter().enumerate() {
        if let Some(right) = grid.right_of(idx) {
            doc.line(*current, grid.dots[right], &edge);
        }
        if let Some(below) = grid.below(idx) {
            doc.line(*current, grid.dots[below], &edge);
        }
        if params.complexity >= 3 {
            if let Some(diag) = grid.below_right(idx) {
                doc.line(*current, grid.dots[diag], &diagonal);
            }
        }
    }
}

/// Geometric: `complexity` concentric polygons and one spoke per vertex
///
/// Anchored at the canvas center; the dot grid plays no part.
pub fn draw_geometric(doc: &mut SvgDocument, center: Point, params: &GeneratorParams) {
    let radius = center.x.min(center.y) * 0.8;
    let sides = if params.symmetry_axes == 0 {
        6
    } else {
        params.symmetry_axes
    };

    let vertex_angle = |i: u32| f64::from(i) / f64::from(sides) * TAU - FRAC_PI_2;

    let primary = Stroke::new(params.primary_color(), params.stroke_width).round_join();
    let secondary = Stroke::new(params.secondary_color(), params.stroke_width).round_join();

    for layer in 1..=params.complexity {
        let layer_radius = radius * (f64::from(layer) / f64::from(params.complexity));
        let points: Vec<Point> = (0..sides)
            .map(|i| center.polar(vertex_angle(i), layer_radius))
            .collect();
        let stroke = if layer % 2 == 0 { &primary } else { &secondary };

        doc.polygon(&points, stroke);
    }

    let spoke = Stroke::new(params.primary_color(), params.stroke_width * 0.5).round_cap();
    for i in 0..sides {
        doc.line(center, center.polar(vertex_angle(i), radius), &spoke);
    }
}

/// Freehand: random cubic curves between arbitrary dot pairs
pub fn draw_freehand<R: Rng + ?Sized>(
    doc: &mut SvgDocument,
    grid: &DotGrid,
    params: &GeneratorParams,
    rng: &mut R,
) {
    if grid.dots.is_empty() {
        return;
    }

    let curves = curve_count(params.complexity);
    let spread = grid.spacing * 2.0;

    let primary = Stroke::new(params.primary_color(), params.stroke_width).round_cap();
    let secondary = Stroke::new(params.secondary_color(), params.stroke_width).round_cap();

    for i in 0..curves {
        let start = grid.dots[rng.gen_range(0..grid.dots.len())];
        let end = grid.dots[rng.gen_range(0..grid.dots.len())];
        let mid = start.midpoint(&end);

        let ctrl1 = Point::new(
            mid.x + (rng.gen::<f64>() - 0.5) * spread,
            mid.y + (rng.gen::<f64>() - 0.5) * spread,
        );
        let ctrl2 = Point::new(
            mid.x + (rng.gen::<f64>() - 0.5) * spread,
            mid.y + (rng.gen::<f64>() - 0.5) * spread,
        );
        let stroke = if i % 2 == 0 { &primary } else { &secondary };

        doc.cubic(start, ctrl1, ctrl2, end, stroke);
    }
}
