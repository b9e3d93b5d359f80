use kolam_generator::{ParamsParser, SvgGenerator};
use std::fs;

fn main() {
    let examples = vec![
        "traditional-sikku",
        "lotus-neli",
        "simple-pulli",
        "festival-geometric",
        "harvest-freehand",
    ];

    // Create output directory
    fs::create_dir_all("generated_patterns").expect("Failed to create output dir");

    for example in examples {
        let params_path = format!("docs/examples/{}.json", example);
        let output_path = format!("generated_patterns/{}.svg", example);

        println!("Rendering {} -> {}", params_path, output_path);

        let params = ParamsParser::parse_file(&params_path)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", params_path, e));

        let generator = SvgGenerator::new(params);
        generator
            .generate_to_file(&output_path)
            .expect("Failed to write SVG");

        println!(
            "  Wrote {} bytes\n",
            fs::metadata(&output_path).map(|m| m.len()).unwrap_or(0)
        );
    }

    println!("All patterns rendered in ./generated_patterns/");
}
