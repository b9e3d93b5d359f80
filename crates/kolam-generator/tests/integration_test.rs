//! Integration tests for the bundled parameter files

use kolam_generator::{ParamsParser, SvgGenerator};
use kolamkala_common::{KolamStyle, SymmetryType};

#[test]
fn test_parse_traditional_sikku_example() {
    let params = ParamsParser::parse_file("../../docs/examples/traditional-sikku.json")
        .expect("Failed to parse traditional-sikku.json");

    assert_eq!(params.style, KolamStyle::Sikku);
    assert_eq!(params.rows, 5);
    assert_eq!(params.colors.len(), 2);
}

#[test]
fn test_parse_simple_pulli_example_uses_defaults() {
    let params = ParamsParser::parse_file("../../docs/examples/simple-pulli.json")
        .expect("Failed to parse simple-pulli.json");

    assert_eq!(params.style, KolamStyle::Pulli);
    assert_eq!(params.symmetry_type, SymmetryType::Vertical);
    assert_eq!(params.dot_spacing, 40);
    assert_eq!(params.stroke_width, 3.0);
}

#[test]
fn test_parse_festival_geometric_example() {
    let params = ParamsParser::parse_file("../../docs/examples/festival-geometric.json")
        .expect("Failed to parse festival-geometric.json");

    assert_eq!(params.symmetry_axes, 12);
    assert_eq!(params.complexity, 5);

    let svg = SvgGenerator::new(params).generate();
    assert_eq!(svg.matches("<polygon").count(), 5);
}

#[test]
fn test_every_example_renders() {
    for name in [
        "traditional-sikku",
        "lotus-neli",
        "simple-pulli",
        "festival-geometric",
        "harvest-freehand",
    ] {
        let path = format!("../../docs/examples/{}.json", name);
        let params = ParamsParser::parse_file(&path)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path, e));

        let svg = SvgGenerator::new(params).generate_seeded(1);
        assert!(svg.starts_with("<svg"), "{} did not render", name);
    }
}

#[test]
fn test_missing_file_reports_path() {
    let err = ParamsParser::parse_file("../../docs/examples/does-not-exist.json").unwrap_err();
    assert!(err.to_string().contains("does-not-exist.json"));
}
