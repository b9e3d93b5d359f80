//! Static learning curriculum and gallery catalog

use kolam_generator::GeneratorPreset;
use kolamkala_common::{KolamStyle, SymmetryType};
use serde::{Deserialize, Serialize};

/// One step of a lesson
#[derive(Debug, Clone, Serialize)]
pub struct LessonStep {
    pub order: u32,
    pub title: &'static str,
    pub description: &'static str,
}

/// A lesson in the learning curriculum
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: &'static str,
    pub level: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub video_id: &'static str,
    pub steps: &'static [LessonStep],
    /// Generator settings for practising the lesson
    pub practice_preset: GeneratorPreset,
}

/// Summary of a curriculum level
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    pub level: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub lesson_count: usize,
}

const VIDEO_ID: &str = "dQw4w9WgXcQ";

const fn step(order: u32, title: &'static str, description: &'static str) -> LessonStep {
    LessonStep {
        order,
        title,
        description,
    }
}

const fn preset(
    style: KolamStyle,
    complexity: u32,
    symmetry_type: SymmetryType,
    grid: u32,
) -> GeneratorPreset {
    GeneratorPreset {
        style,
        complexity,
        symmetry_type,
        rows: grid,
        cols: grid,
    }
}

pub const LESSONS: [Lesson; 9] = [
    Lesson {
        id: "beginner-1",
        level: 1,
        title: "Introduction to Kolam Art",
        description: "Learn the basics of Kolam, its cultural significance, and the tools you'll need to get started.",
        duration: "15 min",
        video_id: VIDEO_ID,
        steps: &[
            step(1, "Understanding Kolam", "Kolam is a traditional South Indian art form drawn using rice flour, chalk, or colored powders at the entrance of homes."),
            step(2, "Materials Needed", "You'll need rice flour (or chalk powder), a flat surface, and optionally a template or guide dots."),
            step(3, "Basic Techniques", "Learn to hold and release powder consistently to create smooth, continuous lines."),
        ],
        practice_preset: preset(KolamStyle::Pulli, 1, SymmetryType::Vertical, 3),
    },
    Lesson {
        id: "beginner-2",
        level: 1,
        title: "Drawing Your First Dot Grid",
        description: "Master the foundation of most Kolam designs - the dot grid or pulli pattern.",
        duration: "20 min",
        video_id: VIDEO_ID,
        steps: &[
            step(1, "Planning Your Grid", "Start with a simple 3x3 dot grid. Mark evenly spaced dots in rows and columns."),
            step(2, "Connecting Dots", "Practice connecting adjacent dots with straight lines to form basic shapes."),
            step(3, "Creating Symmetry", "Ensure your design is symmetrical by working from the center outward."),
        ],
        practice_preset: preset(KolamStyle::Pulli, 2, SymmetryType::Vertical, 5),
    },
    Lesson {
        id: "beginner-3",
        level: 1,
        title: "Simple Floral Patterns",
        description: "Create beautiful flower-like designs using basic Kolam techniques.",
        duration: "25 min",
        video_id: VIDEO_ID,
        steps: &[
            step(1, "Petal Formation", "Learn to draw curved lines that form petals around a central dot."),
            step(2, "Adding Details", "Enhance your flower with additional curves and decorative elements."),
            step(3, "Completing the Design", "Connect multiple flowers to create a cohesive pattern."),
        ],
        practice_preset: preset(KolamStyle::Neli, 2, SymmetryType::Radial, 5),
    },
    Lesson {
        id: "intermediate-1",
        level: 2,
        title: "Sikku Kolam Fundamentals",
        description: "Learn the art of drawing continuous curved lines that weave around dots.",
        duration: "30 min",
        video_id: VIDEO_ID,
        steps: &[
            step(1, "Understanding Sikku", "Sikku means 'interlocking' - these designs feature continuous lines that never cross themselves."),
            step(2, "The Weaving Technique", "Practice weaving your line around dots, going over and under in a consistent pattern."),
            step(3, "Closing the Loop", "Learn to end your line exactly where it started, creating a seamless design."),
            step(4, "Adding Complexity", "Gradually add more dots and intricate weaving patterns to your Sikku designs."),
        ],
        practice_preset: preset(KolamStyle::Sikku, 3, SymmetryType::Vertical, 5),
    },
    Lesson {
        id: "intermediate-2",
        level: 2,
        title: "Geometric Symmetry",
        description: "Create stunning geometric Kolam designs with perfect radial symmetry.",
        duration: "35 min",
        video_id: VIDEO_ID,
        steps: &[
            step(1, "Center Point", "Every geometric Kolam starts with establishing a clear center point."),
            step(2, "Dividing the Space", "Learn to divide your design space into equal sectors for radial symmetry."),
            step(3, "Drawing One Sector", "Create your design in one sector, then replicate it around the center."),
            step(4, "Connecting Sectors", "Add elements that bridge sectors to create unity in your design."),
        ],
        practice_preset: preset(KolamStyle::Geometric, 3, SymmetryType::Radial, 7),
    },
    Lesson {
        id: "intermediate-3",
        level: 2,
        title: "Color Theory in Kolam",
        description: "Explore the use of colored powders to create vibrant festival Kolams.",
        duration: "30 min",
        video_id: VIDEO_ID,
        steps: &[
            step(1, "Traditional Colors", "Understand the significance of red, yellow, green, and other traditional colors."),
            step(2, "Color Placement", "Learn where to place colors for maximum visual impact."),
            step(3, "Blending Techniques", "Practice creating smooth transitions between colors."),
        ],
        practice_preset: preset(KolamStyle::Neli, 3, SymmetryType::Radial, 7),
    },
    Lesson {
        id: "advanced-1",
        level: 3,
        title: "Complex Sikku Patterns",
        description: "Master advanced Sikku designs with multiple interlocking loops and intricate paths.",
        duration: "45 min",
        video_id: VIDEO_ID,
        steps: &[
            step(1, "Multi-Loop Planning", "Plan designs with multiple independent loops that interact harmoniously."),
            step(2, "Nested Patterns", "Create patterns within patterns for added depth and complexity."),
            step(3, "Asymmetric Balance", "Learn to create visually balanced designs that aren't strictly symmetrical."),
            step(4, "Troubleshooting", "Common mistakes and how to fix or work around them."),
        ],
        practice_preset: preset(KolamStyle::Sikku, 5, SymmetryType::Radial, 9),
    },
    Lesson {
        id: "advanced-2",
        level: 3,
        title: "Festival Special Kolams",
        description: "Learn to create elaborate festival Kolams for Pongal, Diwali, and other celebrations.",
        duration: "60 min",
        video_id: VIDEO_ID,
        steps: &[
            step(1, "Festival Traditions", "Understand the specific Kolam traditions for different festivals."),
            step(2, "Large-Scale Design", "Techniques for creating Kolams that span large areas."),
            step(3, "Incorporating Symbols", "Add traditional symbols like lamps, peacocks, and lotus flowers."),
            step(4, "Group Kolam Drawing", "Coordinate with others to create community Kolams."),
        ],
        practice_preset: preset(KolamStyle::Geometric, 5, SymmetryType::Radial, 9),
    },
    Lesson {
        id: "advanced-3",
        level: 3,
        title: "Contemporary Fusion Designs",
        description: "Blend traditional Kolam with modern artistic elements.",
        duration: "50 min",
        video_id: VIDEO_ID,
        steps: &[
            step(1, "Traditional Meets Modern", "Identify elements from both styles that can work together."),
            step(2, "Experimental Techniques", "Try non-traditional tools and materials."),
            step(3, "Personal Style", "Develop your unique artistic voice within the Kolam tradition."),
        ],
        practice_preset: preset(KolamStyle::Freehand, 4, SymmetryType::Horizontal, 7),
    },
];

const LEVELS: [(u32, &str, &str); 3] = [
    (1, "Beginner", "Start your Kolam journey with basic patterns and techniques"),
    (2, "Intermediate", "Advance to complex patterns and symmetry techniques"),
    (3, "Advanced", "Master intricate designs and festival special Kolams"),
];

/// Lessons for one level, in curriculum order
pub fn lessons_for_level(level: i64) -> Vec<&'static Lesson> {
    LESSONS
        .iter()
        .filter(|lesson| i64::from(lesson.level) == level)
        .collect()
}

/// Find a lesson by id
pub fn find_lesson(id: &str) -> Option<&'static Lesson> {
    LESSONS.iter().find(|lesson| lesson.id == id)
}

/// The three curriculum levels with their lesson counts
pub fn levels() -> Vec<LevelInfo> {
    LEVELS
        .iter()
        .map(|&(level, title, description)| LevelInfo {
            level,
            title,
            description,
            lesson_count: LESSONS.iter().filter(|l| l.level == level).count(),
        })
        .collect()
}

/// Read a level the way a lenient integer parse would
///
/// Leading whitespace and a sign are accepted and trailing garbage is
/// ignored. Missing, unparseable and zero levels all mean level 1.
pub fn parse_level(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 1;
    };

    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(0) | Err(_) => 1,
        Ok(level) => sign * level,
    }
}

/// Coarse difficulty shown in the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GalleryComplexity {
    Low,
    Medium,
    High,
}

impl GalleryComplexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryComplexity::Low => "Low",
            GalleryComplexity::Medium => "Medium",
            GalleryComplexity::High => "High",
        }
    }
}

/// An entry of the curated gallery
#[derive(Debug, Clone, Serialize)]
pub struct GalleryEntry {
    pub id: u32,
    pub name: &'static str,
    pub style: KolamStyle,
    pub complexity: GalleryComplexity,
    pub region: &'static str,
    pub festive: bool,
}

const fn entry(
    id: u32,
    name: &'static str,
    style: KolamStyle,
    complexity: GalleryComplexity,
    region: &'static str,
    festive: bool,
) -> GalleryEntry {
    GalleryEntry {
        id,
        name,
        style,
        complexity,
        region,
        festive,
    }
}

use self::GalleryComplexity::{High, Low, Medium};
use kolamkala_common::KolamStyle::{Freehand, Geometric, Neli, Pulli, Sikku};

const TAMIL_NADU: &str = "Tamil Nadu";
const KERALA: &str = "Kerala";
const KARNATAKA: &str = "Karnataka";
const ANDHRA_PRADESH: &str = "Andhra Pradesh";

pub const GALLERY: [GalleryEntry; 30] = [
    entry(1, "Traditional Sikku", Sikku, Medium, TAMIL_NADU, false),
    entry(2, "Pongal Festival Kolam", Neli, High, TAMIL_NADU, true),
    entry(3, "Simple Pulli Grid", Pulli, Low, KERALA, false),
    entry(4, "Diwali Special", Geometric, High, KARNATAKA, true),
    entry(5, "Morning Daily Kolam", Sikku, Low, TAMIL_NADU, false),
    entry(6, "Temple Entrance Design", Geometric, High, ANDHRA_PRADESH, false),
    entry(7, "Flower Kolam", Neli, Medium, TAMIL_NADU, false),
    entry(8, "Wedding Ceremony Kolam", Freehand, High, TAMIL_NADU, true),
    entry(9, "Basic Dot Pattern", Pulli, Low, KERALA, false),
    entry(10, "Radial Symmetry Design", Geometric, Medium, KARNATAKA, false),
    entry(11, "Interlocking Loops", Sikku, High, TAMIL_NADU, false),
    entry(12, "Peacock Kolam", Neli, High, TAMIL_NADU, true),
    entry(13, "Square Grid", Pulli, Low, KERALA, false),
    entry(14, "Star Pattern", Geometric, Medium, KARNATAKA, false),
    entry(15, "Festival Rangoli", Freehand, High, ANDHRA_PRADESH, true),
    entry(16, "Daily Simple Kolam", Sikku, Low, TAMIL_NADU, false),
    entry(17, "Lotus Flower", Neli, Medium, TAMIL_NADU, false),
    entry(18, "Hexagonal Pattern", Geometric, High, KARNATAKA, false),
    entry(19, "Traditional Pulli", Pulli, Medium, KERALA, false),
    entry(20, "Harvest Festival Kolam", Freehand, High, TAMIL_NADU, true),
    entry(21, "Continuous Line Art", Sikku, Medium, TAMIL_NADU, false),
    entry(22, "Multi-Petal Flower", Neli, Medium, TAMIL_NADU, false),
    entry(23, "Diamond Grid", Pulli, Low, KERALA, false),
    entry(24, "Mandala Kolam", Geometric, High, KARNATAKA, true),
    entry(25, "New Year Special", Freehand, High, ANDHRA_PRADESH, true),
    entry(26, "Small Entrance Kolam", Sikku, Low, TAMIL_NADU, false),
    entry(27, "Rose Pattern", Neli, Medium, TAMIL_NADU, false),
    entry(28, "Circular Geometry", Geometric, Medium, KARNATAKA, false),
    entry(29, "Traditional Dot Work", Pulli, Medium, KERALA, false),
    entry(30, "Temple Festival Kolam", Geometric, High, TAMIL_NADU, true),
];

/// Gallery query; `all` or an absent value disables a filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryFilter {
    pub search: Option<String>,
    pub style: Option<String>,
    pub complexity: Option<String>,
    pub region: Option<String>,
    /// Only festive entries when true
    pub festive: Option<bool>,
}

fn selects(filter: &Option<String>, value: &str) -> bool {
    match filter.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(wanted) => wanted.eq_ignore_ascii_case("all") || wanted.eq_ignore_ascii_case(value),
    }
}

impl GalleryFilter {
    /// Every filter must match
    pub fn matches(&self, entry: &GalleryEntry) -> bool {
        let search = self
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();

        entry.name.to_lowercase().contains(&search)
            && selects(&self.style, entry.style.as_str())
            && selects(&self.complexity, entry.complexity.as_str())
            && selects(&self.region, entry.region)
            && (!self.festive.unwrap_or(false) || entry.festive)
    }

    /// Matching entries in catalog order
    pub fn apply(&self) -> Vec<&'static GalleryEntry> {
        GALLERY.iter().filter(|entry| self.matches(entry)).collect()
    }
}

/// Find a gallery entry by id
pub fn find_gallery_entry(id: u32) -> Option<&'static GalleryEntry> {
    GALLERY.iter().find(|entry| entry.id == id)
}
