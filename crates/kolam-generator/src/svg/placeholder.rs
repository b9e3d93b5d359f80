//! Fixed-size preview thumbnails for gallery entries

use super::document::{Point, Stroke, SvgDocument};
use kolamkala_common::KolamStyle;
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, TAU};

const SIZE: f64 = 200.0;

const PALETTES: [[&str; 2]; 5] = [
    ["#8B1E3F", "#D8B75A"],
    ["#654321", "#D4A574"],
    ["#FF6B6B", "#4ECDC4"],
    ["#333333", "#666666"],
    ["#FF6B35", "#F7931E"],
];

/// Render the 200x200 thumbnail for a gallery entry
///
/// The palette is picked from the entry id; only the freehand thumbnail uses `rng`.
pub fn generate_placeholder<R: Rng + ?Sized>(id: u32, style: KolamStyle, rng: &mut R) -> String {
    let palette = PALETTES[id as usize % PALETTES.len()];
    let center = Point::new(SIZE / 2.0, SIZE / 2.0);
    let mut doc = SvgDocument::new(SIZE, SIZE, "#FEFEFE");

    match style {
        KolamStyle::Sikku => {
            let stroke = Stroke::new(palette[0], 3.0);
            for i in 0..4u32 {
                let angle = f64::from(i) / 4.0 * TAU;
                let from = center.polar(angle, 60.0);
                let to = center.polar(angle + FRAC_PI_2, 60.0);
                doc.quadratic(from, center, to, &stroke);
            }
        }
        KolamStyle::Neli => {
            for i in 0..8u32 {
                let angle = f64::from(i) / 8.0 * TAU;
                let stroke = Stroke::new(palette[i as usize % 2], 2.0);
                doc.ring(center.polar(angle, 50.0), 15.0, &stroke);
            }
            doc.ring(center, 20.0, &Stroke::new(palette[0], 3.0));
        }
        KolamStyle::Pulli => {
            let edge = Stroke::new(palette[1], 2.0);
            for r in 0..5u32 {
                for c in 0..5u32 {
                    let dot = Point::new(40.0 + f64::from(c) * 30.0, 40.0 + f64::from(r) * 30.0);
                    doc.dot(dot, 3.0, palette[0]);
                    if c < 4 {
                        doc.line(dot, Point::new(dot.x + 30.0, dot.y), &edge);
                    }
                    if r < 4 {
                        doc.line(dot, Point::new(dot.x, dot.y + 30.0), &edge);
                    }
                }
            }
        }
        KolamStyle::Geometric => {
            let sides = 6u32;
            for layer in 1..=3u32 {
                let radius = 30.0 * f64::from(layer);
                let points: Vec<Point> = (0..sides)
                    .map(|i| center.polar(f64::from(i) / f64::from(sides) * TAU - FRAC_PI_2, radius))
                    .collect();
                doc.polygon(&points, &Stroke::new(palette[layer as usize % 2], 2.0));
            }
        }
        KolamStyle::Freehand => {
            for i in 0..10 {
                let from = Point::new(rng.gen::<f64>() * SIZE, rng.gen::<f64>() * SIZE);
                let to = Point::new(rng.gen::<f64>() * SIZE, rng.gen::<f64>() * SIZE);
                let ctrl = rng.gen::<f64>() * SIZE;
                let stroke = Stroke::new(palette[i % 2], 2.0).opacity(0.5);
                doc.quadratic(from, Point::new(ctrl, ctrl), to, &stroke);
            }
        }
    }

    doc.finish()
}
