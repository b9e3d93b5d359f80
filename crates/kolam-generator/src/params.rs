//! Generator parameter definitions
//!
//! This module defines the knobs exposed by the pattern generator, the
//! built-in color presets, and helpers for randomized and lesson-driven
//! parameter sets.

use kolamkala_common::{KolamStyle, SymmetryType};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Primary stroke color used when the palette is empty
pub const DEFAULT_PRIMARY_COLOR: &str = "#8B1E3F";

/// Secondary stroke color used when the palette has no usable entry
pub const DEFAULT_SECONDARY_COLOR: &str = "#D8B75A";

/// Upper bound for rows and columns when rendering untrusted input
pub const MAX_GRID_DIM: u32 = 50;

/// Upper bound for polygon sides when rendering untrusted input
pub const MAX_SYMMETRY_AXES: u32 = 360;

/// Upper bound for complexity when rendering untrusted input
pub const MAX_COMPLEXITY: u32 = 10;

/// Upper bound for dot spacing when rendering untrusted input
pub const MAX_DOT_SPACING: u32 = 500;

/// Upper bound for stroke width when rendering untrusted input
pub const MAX_STROKE_WIDTH: f64 = 50.0;

/// Palette entries kept when rendering untrusted input
pub const MAX_COLORS: usize = 8;

/// Parameters for a single generated design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorParams {
    /// Drawing style branch
    pub style: KolamStyle,

    /// Detail level, 1-5 in the UI
    pub complexity: u32,

    /// Symmetry family
    #[serde(default)]
    pub symmetry_type: SymmetryType,

    /// Number of polygon sides for geometric designs, 2-12 in the UI
    #[serde(default = "default_symmetry_axes")]
    pub symmetry_axes: u32,

    /// Dot rows
    pub rows: u32,

    /// Dot columns
    pub cols: u32,

    /// Distance between neighbouring dots, in SVG user units
    #[serde(default = "default_dot_spacing")]
    pub dot_spacing: u32,

    /// Stroke width, also used as the dot radius
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Ordered palette: primary first, secondary second
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,
}

pub(crate) fn default_symmetry_axes() -> u32 {
    4
}

pub(crate) fn default_dot_spacing() -> u32 {
    40
}

pub(crate) fn default_stroke_width() -> f64 {
    3.0
}

pub(crate) fn default_colors() -> Vec<String> {
    vec![DEFAULT_PRIMARY_COLOR.to_string()]
}

impl Default for GeneratorParams {
    /// The design shown when the generator first opens
    fn default() -> Self {
        Self {
            style: KolamStyle::Sikku,
            complexity: 3,
            symmetry_type: SymmetryType::Vertical,
            symmetry_axes: 4,
            rows: 5,
            cols: 5,
            dot_spacing: 50,
            stroke_width: 2.0,
            colors: TRADITIONAL.colors(),
        }
    }
}

impl GeneratorParams {
    /// Canvas width: one spacing of margin around the dot grid
    pub fn width(&self) -> f64 {
        f64::from(self.cols) * f64::from(self.dot_spacing) + f64::from(self.dot_spacing)
    }

    /// Canvas height: one spacing of margin around the dot grid
    pub fn height(&self) -> f64 {
        f64::from(self.rows) * f64::from(self.dot_spacing) + f64::from(self.dot_spacing)
    }

    /// Primary stroke color, falling back to the traditional maroon
    pub fn primary_color(&self) -> &str {
        self.colors
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_PRIMARY_COLOR)
    }

    /// Secondary stroke color; single-color palettes reuse the primary
    pub fn secondary_color(&self) -> &str {
        self.colors
            .get(1)
            .or_else(|| self.colors.first())
            .map(String::as_str)
            .unwrap_or(DEFAULT_SECONDARY_COLOR)
    }

    /// Clamp every value into bounds that are safe to render for untrusted callers
    pub fn sanitized(&self) -> Self {
        let stroke_width = if self.stroke_width.is_finite() && self.stroke_width >= 0.0 {
            self.stroke_width.min(MAX_STROKE_WIDTH)
        } else {
            default_stroke_width()
        };

        Self {
            style: self.style,
            complexity: self.complexity.min(MAX_COMPLEXITY),
            symmetry_type: self.symmetry_type,
            symmetry_axes: self.symmetry_axes.min(MAX_SYMMETRY_AXES),
            rows: self.rows.min(MAX_GRID_DIM),
            cols: self.cols.min(MAX_GRID_DIM),
            dot_spacing: self.dot_spacing.clamp(1, MAX_DOT_SPACING),
            stroke_width,
            colors: self.colors.iter().take(MAX_COLORS).cloned().collect(),
        }
    }

    /// A fully random design, drawn from the same ranges as the UI controls
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let style = KolamStyle::ALL[rng.gen_range(0..KolamStyle::ALL.len())];
        let symmetry_type = SymmetryType::ALL[rng.gen_range(0..SymmetryType::ALL.len())];
        let preset = &COLOR_PRESETS[rng.gen_range(0..COLOR_PRESETS.len())];

        Self {
            style,
            complexity: rng.gen_range(1..=5),
            symmetry_type,
            symmetry_axes: rng.gen_range(2..=12),
            rows: rng.gen_range(3..=9),
            cols: rng.gen_range(3..=9),
            dot_spacing: rng.gen_range(30..=70),
            stroke_width: f64::from(rng.gen_range(1u32..=4)),
            colors: preset.colors(),
        }
    }

    /// Expand a lesson practice preset into a full parameter set
    pub fn from_preset(preset: &GeneratorPreset) -> Self {
        Self {
            style: preset.style,
            complexity: preset.complexity,
            symmetry_type: preset.symmetry_type,
            rows: preset.rows,
            cols: preset.cols,
            ..Self::default()
        }
    }
}

/// Compact parameter set attached to lessons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorPreset {
    pub style: KolamStyle,
    pub complexity: u32,
    pub symmetry_type: SymmetryType,
    pub rows: u32,
    pub cols: u32,
}

/// Named palette offered by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorPreset {
    pub name: &'static str,
    pub colors: &'static [&'static str],
}

impl ColorPreset {
    /// Owned copy of the palette, ready to drop into `GeneratorParams`
    pub fn colors(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_string()).collect()
    }

    /// Case-insensitive lookup by preset name
    pub fn find(name: &str) -> Option<&'static ColorPreset> {
        COLOR_PRESETS
            .iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name))
    }
}

const TRADITIONAL: ColorPreset = ColorPreset {
    name: "Traditional",
    colors: &["#8B1E3F", "#D8B75A"],
};

/// Built-in palettes, in display order
pub const COLOR_PRESETS: [ColorPreset; 5] = [
    TRADITIONAL,
    ColorPreset {
        name: "Earth Tones",
        colors: &["#654321", "#D4A574"],
    },
    ColorPreset {
        name: "Festival",
        colors: &["#FF6B6B", "#4ECDC4", "#FFE66D"],
    },
    ColorPreset {
        name: "Monochrome",
        colors: &["#333333"],
    },
    ColorPreset {
        name: "Sunset",
        colors: &["#FF6B35", "#F7931E", "#FFC107"],
    },
];
