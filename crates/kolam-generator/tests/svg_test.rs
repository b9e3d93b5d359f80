//! End-to-end tests for SVG generation

use kolam_generator::{GeneratorParams, SvgGenerator};
use kolamkala_common::{KolamStyle, SymmetryType};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;

/// An SVG element with its attributes
struct Element {
    name: String,
    attrs: HashMap<String, String>,
}

/// Parse the document, panicking if it is not well-formed XML
fn parse(svg: &str) -> Vec<Element> {
    let mut reader = Reader::from_str(svg);
    let mut elements = Vec::new();

    loop {
        match reader.read_event().expect("generated SVG is well-formed") {
            Event::Start(e) | Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let attrs = e
                    .attributes()
                    .map(|attr| {
                        let attr = attr.expect("valid attribute");
                        (
                            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                            String::from_utf8_lossy(&attr.value).into_owned(),
                        )
                    })
                    .collect();
                elements.push(Element { name, attrs });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    elements
}

fn params(style: KolamStyle, complexity: u32) -> GeneratorParams {
    GeneratorParams {
        style,
        complexity,
        ..GeneratorParams::default()
    }
}

#[test]
fn test_declared_size_matches_grid() {
    for style in KolamStyle::ALL {
        for (rows, cols, spacing) in [(3, 3, 30), (5, 7, 50), (9, 4, 70), (1, 1, 35)] {
            let p = GeneratorParams {
                rows,
                cols,
                dot_spacing: spacing,
                ..params(style, 3)
            };
            let svg = SvgGenerator::new(p).generate_seeded(11);
            let elements = parse(&svg);
            let root = &elements[0];

            let width = (cols * spacing + spacing).to_string();
            let height = (rows * spacing + spacing).to_string();

            assert_eq!(root.name, "svg");
            assert_eq!(root.attrs["width"], width, "{} width", style);
            assert_eq!(root.attrs["height"], height, "{} height", style);
            assert_eq!(root.attrs["viewBox"], format!("0 0 {} {}", width, height));
        }
    }
}

#[test]
fn test_pulli_diagonals_only_from_complexity_three() {
    for complexity in 1..=5 {
        let p = GeneratorParams {
            rows: 4,
            cols: 6,
            ..params(KolamStyle::Pulli, complexity)
        };
        let svg = SvgGenerator::new(p).generate();
        let diagonals = parse(&svg)
            .into_iter()
            .filter(|e| e.name == "line" && e.attrs.contains_key("stroke-dasharray"))
            .count();

        if complexity < 3 {
            assert_eq!(diagonals, 0, "complexity {}", complexity);
        } else {
            assert_eq!(diagonals, 3 * 5, "complexity {}", complexity);
        }
    }
}

#[test]
fn test_geometric_polygon_layers_and_vertices() {
    for complexity in 1..=5 {
        for axes in 2..=12 {
            let p = GeneratorParams {
                symmetry_axes: axes,
                ..params(KolamStyle::Geometric, complexity)
            };
            let svg = SvgGenerator::new(p).generate();
            let polygons: Vec<Element> = parse(&svg)
                .into_iter()
                .filter(|e| e.name == "polygon")
                .collect();

            assert_eq!(polygons.len(), complexity as usize);
            for polygon in &polygons {
                let vertices = polygon.attrs["points"].split_whitespace().count();
                assert_eq!(vertices, axes as usize);
            }
        }
    }
}

#[test]
fn test_geometric_large_axis_count_degrades_gracefully() {
    let p = GeneratorParams {
        symmetry_axes: 100,
        ..params(KolamStyle::Geometric, 2)
    };
    let svg = SvgGenerator::new(p).generate();
    let spokes = parse(&svg).iter().filter(|e| e.name == "line").count();

    assert_eq!(spokes, 100);
}

#[test]
fn test_same_seed_same_document() {
    for style in KolamStyle::ALL {
        let generator = SvgGenerator::new(params(style, 4));
        assert_eq!(generator.generate_seeded(99), generator.generate_seeded(99));
    }
}

#[test]
fn test_random_styles_vary_between_seeds() {
    for style in [KolamStyle::Sikku, KolamStyle::Freehand] {
        let generator = SvgGenerator::new(params(style, 4));
        assert_ne!(generator.generate_seeded(1), generator.generate_seeded(2));
    }
}

#[test]
fn test_deterministic_styles_ignore_seed() {
    for style in [KolamStyle::Neli, KolamStyle::Pulli, KolamStyle::Geometric] {
        let generator = SvgGenerator::new(params(style, 4));
        assert_eq!(generator.generate_seeded(1), generator.generate_seeded(2));
    }
}

#[test]
fn test_degenerate_inputs_never_panic() {
    for style in KolamStyle::ALL {
        for (rows, cols, complexity, axes) in [(0, 0, 3, 4), (0, 5, 3, 4), (5, 0, 3, 4), (1, 1, 0, 0), (2, 2, 5, 1)] {
            let p = GeneratorParams {
                rows,
                cols,
                symmetry_axes: axes,
                symmetry_type: SymmetryType::Radial,
                ..params(style, complexity)
            };
            let svg = SvgGenerator::new(p).generate();
            assert!(!parse(&svg).is_empty());
        }
    }
}

#[test]
fn test_max_complexity_on_empty_grid_never_panics() {
    // geometric draws one polygon per complexity level, so it is left out
    for style in [
        KolamStyle::Sikku,
        KolamStyle::Neli,
        KolamStyle::Pulli,
        KolamStyle::Freehand,
    ] {
        let p = GeneratorParams {
            rows: 0,
            cols: 0,
            ..params(style, u32::MAX)
        };
        let svg = SvgGenerator::new(p).generate_seeded(1);

        let elements = parse(&svg);
        assert_eq!(elements[0].name, "svg");
        assert!(!elements.iter().any(|e| e.name == "path"));
    }
}

#[test]
fn test_dot_grid_is_always_drawn() {
    for style in KolamStyle::ALL {
        let p = GeneratorParams {
            rows: 4,
            cols: 3,
            stroke_width: 2.5,
            ..params(style, 2)
        };
        let svg = SvgGenerator::new(p).generate();
        let dots = parse(&svg)
            .into_iter()
            .filter(|e| e.name == "circle" && e.attrs["r"] == "2.5")
            .count();

        assert_eq!(dots, 12, "{}", style);
    }
}

#[test]
fn test_radial_marker() {
    let radial = GeneratorParams {
        symmetry_type: SymmetryType::Radial,
        symmetry_axes: 6,
        stroke_width: 2.0,
        ..params(KolamStyle::Pulli, 1)
    };
    let svg = SvgGenerator::new(radial.clone()).generate();
    let markers = parse(&svg)
        .into_iter()
        .filter(|e| e.name == "circle" && e.attrs["r"] == "4")
        .count();
    assert_eq!(markers, 1);

    let single_axis = GeneratorParams {
        symmetry_axes: 1,
        ..radial
    };
    let svg = SvgGenerator::new(single_axis).generate();
    assert_eq!(svg.matches("<circle").count(), 25);
}

#[test]
fn test_palette_is_applied() {
    let p = GeneratorParams {
        colors: vec!["#111111".to_string(), "#222222".to_string()],
        ..params(KolamStyle::Sikku, 2)
    };
    let svg = SvgGenerator::new(p).generate();
    let elements = parse(&svg);

    assert!(elements
        .iter()
        .filter(|e| e.name == "circle")
        .all(|e| e.attrs["fill"] == "#111111"));
    assert!(elements
        .iter()
        .any(|e| e.name == "path" && e.attrs["stroke"] == "#222222"));
}

#[test]
fn test_generate_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("kolam.svg");

    SvgGenerator::new(GeneratorParams::default())
        .generate_to_file(&output)
        .expect("Failed to write SVG");

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("<svg"));
    assert!(written.ends_with("</svg>"));
}
