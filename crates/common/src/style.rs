//! Shared vocabulary for Kolam patterns and the records that describe them

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five Kolam families the generator knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KolamStyle {
    /// Interlocking curves woven around the dots
    Sikku,
    /// Floral petals radiating from selected dots
    Neli,
    /// Straight edges joining neighbouring dots
    Pulli,
    /// Concentric polygons around the canvas center
    Geometric,
    /// Random curves between arbitrary dots
    Freehand,
}

impl KolamStyle {
    pub const ALL: [KolamStyle; 5] = [
        KolamStyle::Sikku,
        KolamStyle::Neli,
        KolamStyle::Pulli,
        KolamStyle::Geometric,
        KolamStyle::Freehand,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KolamStyle::Sikku => "sikku",
            KolamStyle::Neli => "neli",
            KolamStyle::Pulli => "pulli",
            KolamStyle::Geometric => "geometric",
            KolamStyle::Freehand => "freehand",
        }
    }

    /// Human-readable label shown in style pickers
    pub fn label(&self) -> &'static str {
        match self {
            KolamStyle::Sikku => "Sikku (Curved Lines)",
            KolamStyle::Neli => "Neli (Floral)",
            KolamStyle::Pulli => "Pulli (Dot-based)",
            KolamStyle::Geometric => "Geometric",
            KolamStyle::Freehand => "Freehand",
        }
    }
}

impl fmt::Display for KolamStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symmetry family selected in the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymmetryType {
    #[default]
    Vertical,
    Horizontal,
    Radial,
}

impl SymmetryType {
    pub const ALL: [SymmetryType; 3] = [
        SymmetryType::Vertical,
        SymmetryType::Horizontal,
        SymmetryType::Radial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SymmetryType::Vertical => "vertical",
            SymmetryType::Horizontal => "horizontal",
            SymmetryType::Radial => "radial",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SymmetryType::Vertical => "Vertical",
            SymmetryType::Horizontal => "Horizontal",
            SymmetryType::Radial => "Radial",
        }
    }
}

impl fmt::Display for SymmetryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category picked on the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Bug,
    Suggestion,
    Praise,
    Other,
}

/// Stroke weight reported by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineThickness {
    Thin,
    #[default]
    Medium,
    Thick,
}

impl LineThickness {
    /// Lenient parse used for third-party payloads; unknown values fall back to `Medium`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "thin" => LineThickness::Thin,
            "thick" => LineThickness::Thick,
            _ => LineThickness::Medium,
        }
    }
}

/// Whether the analyzed drawing is outlined, filled or both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillStyle {
    #[default]
    Outline,
    Filled,
    Mixed,
}

impl FillStyle {
    /// Lenient parse used for third-party payloads; unknown values fall back to `Outline`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "filled" => FillStyle::Filled,
            "mixed" => FillStyle::Mixed,
            _ => FillStyle::Outline,
        }
    }
}
