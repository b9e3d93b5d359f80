//! Parameter parser and validator
//!
//! This module handles parsing generator parameters from JSON and checking
//! them against the ranges a saved design is allowed to carry.

use crate::params::*;
use anyhow::{Context, Result};
use kolamkala_common::is_hex_color;
use std::path::Path;

/// Parser for generator parameters
pub struct ParamsParser;

impl ParamsParser {
    /// Parse parameters from a JSON string
    ///
    /// Missing or zero optional values fall back to their defaults before
    /// validation runs.
    pub fn parse_str(json_str: &str) -> Result<GeneratorParams> {
        let params: GeneratorParams =
            serde_json::from_str(json_str).context("Failed to parse generator parameters")?;

        let params = Self::apply_defaults(params);
        Self::validate(&params)?;

        Ok(params)
    }

    /// Parse parameters from a JSON file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<GeneratorParams> {
        let json_str = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read parameter file: {}", path.as_ref().display())
        })?;

        Self::parse_str(&json_str)
    }

    /// Replace zero-valued optional fields with their defaults
    pub fn apply_defaults(mut params: GeneratorParams) -> GeneratorParams {
        if params.symmetry_axes == 0 {
            params.symmetry_axes = default_symmetry_axes();
        }
        if params.dot_spacing == 0 {
            params.dot_spacing = default_dot_spacing();
        }
        if params.stroke_width == 0.0 {
            params.stroke_width = default_stroke_width();
        }
        params
    }

    /// Validate a parsed parameter set
    ///
    /// Checks for:
    /// - Complexity between 1 and 5
    /// - Symmetry axes between 2 and 12
    /// - A non-empty dot grid with positive spacing
    /// - A positive, finite stroke width
    /// - A non-empty palette of hex colors
    pub fn validate(params: &GeneratorParams) -> Result<()> {
        if !(1..=5).contains(&params.complexity) {
            anyhow::bail!(
                "complexity must be between 1 and 5, got {}",
                params.complexity
            );
        }

        if !(2..=12).contains(&params.symmetry_axes) {
            anyhow::bail!(
                "symmetryAxes must be between 2 and 12, got {}",
                params.symmetry_axes
            );
        }

        if params.rows == 0 || params.cols == 0 {
            anyhow::bail!("rows and cols must be at least 1");
        }

        if params.dot_spacing == 0 {
            anyhow::bail!("dotSpacing must be at least 1");
        }

        if !params.stroke_width.is_finite() || params.stroke_width <= 0.0 {
            anyhow::bail!("strokeWidth must be a positive number");
        }

        if params.colors.is_empty() {
            anyhow::bail!("At least one color is required");
        }

        for (idx, color) in params.colors.iter().enumerate() {
            if !is_hex_color(color) {
                anyhow::bail!("Color {} is not a hex color: {}", idx, color);
            }
        }

        Ok(())
    }
}
