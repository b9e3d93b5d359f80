//! Data models for the KolamKala API

use chrono::{DateTime, Utc};
use kolam_generator::GeneratorParams;
use kolamkala_common::{Error, FeedbackType, FillStyle, LineThickness, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use uuid::Uuid;

/// Records that are listed newest-first
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
}

/// Account record; kept in storage only, no route exposes it
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Input for creating a user
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

/// Message submitted through the contact form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub feedback_type: FeedbackType,
    pub created_at: DateTime<Utc>,
}

/// Contact form payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub feedback_type: FeedbackType,
}

const MIN_NAME_CHARS: usize = 2;
const MIN_SUBJECT_CHARS: usize = 5;
const MIN_MESSAGE_CHARS: usize = 20;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

fn require_chars(field: &str, value: &str, min: usize) -> Result<()> {
    let count = value.trim().chars().count();
    if count < min {
        return Err(Error::Validation(format!(
            "{} must be at least {} characters, got {}",
            field, min, count
        )));
    }
    Ok(())
}

impl NewContactMessage {
    /// Check the form rules; whitespace does not count towards minimum lengths
    pub fn validate(&self) -> Result<()> {
        require_chars("name", &self.name, MIN_NAME_CHARS)?;

        if !email_regex().is_match(self.email.trim()) {
            return Err(Error::Validation(format!(
                "email is not a valid address: {}",
                self.email
            )));
        }

        require_chars("subject", &self.subject, MIN_SUBJECT_CHARS)?;
        require_chars("message", &self.message, MIN_MESSAGE_CHARS)?;

        Ok(())
    }
}

impl Timestamped for ContactMessage {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A generated design saved to history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedKolam {
    pub id: Uuid,
    #[serde(flatten)]
    pub params: GeneratorParams,
    pub svg_content: String,
    pub created_at: DateTime<Utc>,
}

/// Save request: generator parameters plus the rendered document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGeneratedKolam {
    #[serde(flatten)]
    pub params: GeneratorParams,
    #[serde(default)]
    pub svg_content: String,
}

impl Timestamped for GeneratedKolam {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Dot grid detected in an analyzed image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotMatrix {
    pub rows: u32,
    pub cols: u32,
}

/// Persisted outcome of a vision-model analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: Uuid,
    pub original_image_url: String,
    pub annotated_image_url: Option<String>,
    pub symmetry: Vec<String>,
    pub dot_matrix: Option<DotMatrix>,
    pub pattern_type: String,
    /// 0-100
    pub confidence: u32,
    pub colors: Vec<String>,
    /// 0-100
    pub complexity: u32,
    pub line_thickness: LineThickness,
    pub style: FillStyle,
    pub created_at: DateTime<Utc>,
}

/// Analysis record before it is assigned an id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnalysisResult {
    pub original_image_url: String,
    pub annotated_image_url: Option<String>,
    pub symmetry: Vec<String>,
    pub dot_matrix: Option<DotMatrix>,
    pub pattern_type: String,
    pub confidence: u32,
    pub colors: Vec<String>,
    pub complexity: u32,
    pub line_thickness: LineThickness,
    pub style: FillStyle,
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn whole_number(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round().min(f64::from(u32::MAX)) as u32)
}

fn percentage(value: Option<f64>) -> u32 {
    value
        .filter(|n| n.is_finite())
        .map(|n| n.round().clamp(0.0, 100.0) as u32)
        .unwrap_or(0)
}

impl NewAnalysisResult {
    /// Derive a record from the model's JSON, filling gaps with neutral defaults
    ///
    /// Model confidence is a 0-1 fraction and is stored as a 0-100 integer.
    pub fn from_response(original_image_url: String, response: &Value) -> Self {
        let pattern = response.get("pattern");

        let dot_matrix = response.get("dotMatrix").and_then(|matrix| {
            Some(DotMatrix {
                rows: whole_number(matrix.get("rows"))?,
                cols: whole_number(matrix.get("cols"))?,
            })
        });

        let pattern_type = pattern
            .and_then(|p| p.get("label"))
            .and_then(Value::as_str)
            .filter(|label| !label.is_empty())
            .unwrap_or("unknown")
            .to_string();

        let confidence = pattern
            .and_then(|p| p.get("confidence"))
            .and_then(Value::as_f64)
            .map(|c| c * 100.0);

        Self {
            original_image_url,
            annotated_image_url: None,
            symmetry: string_list(response.get("symmetry")),
            dot_matrix,
            pattern_type,
            confidence: percentage(confidence),
            colors: string_list(response.get("colors")),
            complexity: percentage(response.get("complexity").and_then(Value::as_f64)),
            line_thickness: response
                .get("lineThickness")
                .and_then(Value::as_str)
                .map(LineThickness::from_label)
                .unwrap_or_default(),
            style: response
                .get("style")
                .and_then(Value::as_str)
                .map(FillStyle::from_label)
                .unwrap_or_default(),
        }
    }
}

impl Timestamped for AnalysisResult {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contact() -> NewContactMessage {
        NewContactMessage {
            name: "Meena".to_string(),
            email: "meena@example.com".to_string(),
            subject: "Lovely site".to_string(),
            message: "The pulli lessons helped me a lot.".to_string(),
            feedback_type: FeedbackType::Praise,
        }
    }

    #[test]
    fn test_valid_contact_message() {
        assert!(contact().validate().is_ok());
    }

    #[test]
    fn test_contact_rules() {
        let cases = [
            NewContactMessage { name: "M".into(), ..contact() },
            NewContactMessage { email: "meena.example.com".into(), ..contact() },
            NewContactMessage { email: "meena@example".into(), ..contact() },
            NewContactMessage { email: "me ena@example.com".into(), ..contact() },
            NewContactMessage { subject: "Hi".into(), ..contact() },
            NewContactMessage { message: "Too short".into(), ..contact() },
            NewContactMessage { name: "   ".into(), ..contact() },
        ];

        for case in cases {
            let err = case.validate().unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{:?}", case);
        }
    }

    #[test]
    fn test_contact_rejects_unknown_feedback_type() {
        let payload = json!({
            "name": "Meena",
            "email": "meena@example.com",
            "subject": "Lovely site",
            "message": "The pulli lessons helped me a lot.",
            "feedbackType": "complaint"
        });

        assert!(serde_json::from_value::<NewContactMessage>(payload).is_err());
    }

    #[test]
    fn test_analysis_from_full_response() {
        let response = json!({
            "symmetry": ["vertical", "rotational"],
            "dotMatrix": {"rows": 7, "cols": 7},
            "pattern": {"label": "neli", "confidence": 0.923},
            "colors": ["#FFFFFF", "#D8B75A"],
            "complexity": 72,
            "lineThickness": "thin",
            "style": "filled"
        });

        let record = NewAnalysisResult::from_response("data:image/png;base64,AAAA...".into(), &response);

        assert_eq!(record.symmetry, vec!["vertical", "rotational"]);
        assert_eq!(record.dot_matrix, Some(DotMatrix { rows: 7, cols: 7 }));
        assert_eq!(record.pattern_type, "neli");
        assert_eq!(record.confidence, 92);
        assert_eq!(record.colors.len(), 2);
        assert_eq!(record.complexity, 72);
        assert_eq!(record.line_thickness, LineThickness::Thin);
        assert_eq!(record.style, FillStyle::Filled);
        assert!(record.annotated_image_url.is_none());
    }

    #[test]
    fn test_analysis_defaults_for_missing_fields() {
        let record = NewAnalysisResult::from_response("data:image/jpeg;base64,...".into(), &json!({}));

        assert!(record.symmetry.is_empty());
        assert!(record.dot_matrix.is_none());
        assert_eq!(record.pattern_type, "unknown");
        assert_eq!(record.confidence, 0);
        assert!(record.colors.is_empty());
        assert_eq!(record.complexity, 0);
        assert_eq!(record.line_thickness, LineThickness::Medium);
        assert_eq!(record.style, FillStyle::Outline);
    }

    #[test]
    fn test_analysis_tolerates_odd_values() {
        let response = json!({
            "dotMatrix": null,
            "pattern": {"label": "pulli", "confidence": 1.7},
            "complexity": -4,
            "colors": ["#000000", 42]
        });

        let record = NewAnalysisResult::from_response(String::new(), &response);
        assert!(record.dot_matrix.is_none());
        assert_eq!(record.confidence, 100);
        assert_eq!(record.complexity, 0);
        assert_eq!(record.colors, vec!["#000000"]);
    }

    #[test]
    fn test_generated_kolam_serializes_flat_camel_case() {
        let kolam = GeneratedKolam {
            id: Uuid::new_v4(),
            params: GeneratorParams::default(),
            svg_content: "<svg/>".to_string(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&kolam).unwrap();
        assert_eq!(value["style"], "sikku");
        assert_eq!(value["symmetryType"], "vertical");
        assert_eq!(value["dotSpacing"], 50);
        assert_eq!(value["svgContent"], "<svg/>");
        assert!(value.get("params").is_none());
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_user_password_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            username: "kolam".to_string(),
            password: "hunter2".to_string(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
    }
}
