//! In-memory storage for the KolamKala API
//!
//! Four independent append-only tables. Nothing is updated or deleted once
//! written, and every table remembers insertion order so that records created
//! within the same clock tick still list newest-first.

use crate::models::{
    AnalysisResult, ContactMessage, GeneratedKolam, NewAnalysisResult, NewContactMessage,
    NewGeneratedKolam, NewUser, Timestamped, User,
};
use chrono::Utc;
use kolamkala_common::{Error, Result};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Rows keyed by id, plus the order they were inserted in
struct Table<T> {
    rows: HashMap<Uuid, T>,
    order: Vec<Uuid>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn insert(&mut self, id: Uuid, row: T) {
        if self.rows.insert(id, row).is_none() {
            self.order.push(id);
        }
    }

    fn get(&self, id: &Uuid) -> Option<T> {
        self.rows.get(id).cloned()
    }

    fn find<P: Fn(&T) -> bool>(&self, predicate: P) -> Option<T> {
        self.order
            .iter()
            .filter_map(|id| self.rows.get(id))
            .find(|row| predicate(row))
            .cloned()
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

impl<T: Clone + Timestamped> Table<T> {
    /// Newest first; ties on the timestamp keep reverse insertion order
    fn newest_first(&self) -> Vec<T> {
        let mut rows: Vec<T> = self
            .order
            .iter()
            .rev()
            .filter_map(|id| self.rows.get(id).cloned())
            .collect();

        // stable sort keeps the reverse insertion order for equal timestamps
        rows.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        rows
    }
}

/// Storage backend for every KolamKala record type
pub struct Storage {
    users: Table<User>,
    contact_messages: Table<ContactMessage>,
    generated_kolams: Table<GeneratedKolam>,
    analysis_results: Table<AnalysisResult>,
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            users: Table::new(),
            contact_messages: Table::new(),
            generated_kolams: Table::new(),
            analysis_results: Table::new(),
        }
    }

    /// Get a user by id
    pub fn get_user(&self, id: &Uuid) -> Option<User> {
        self.users.get(id)
    }

    /// Get a user by exact username
    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users.find(|user| user.username == username)
    }

    /// Create a user
    /// Returns Err(Conflict) if the username is already taken
    pub fn create_user(&mut self, new_user: NewUser) -> Result<User> {
        if self.get_user_by_username(&new_user.username).is_some() {
            debug!("Username already taken: {}", new_user.username);
            return Err(Error::Conflict(format!(
                "Username already exists: {}",
                new_user.username
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            password: new_user.password,
        };
        self.users.insert(user.id, user.clone());

        info!("Created user: {}", user.username);
        Ok(user)
    }

    /// Store a contact message
    pub fn create_contact_message(&mut self, message: NewContactMessage) -> ContactMessage {
        let message = ContactMessage {
            id: Uuid::new_v4(),
            name: message.name,
            email: message.email,
            subject: message.subject,
            message: message.message,
            feedback_type: message.feedback_type,
            created_at: Utc::now(),
        };
        self.contact_messages.insert(message.id, message.clone());

        debug!(
            "Stored contact message {} ({} total)",
            message.id,
            self.contact_messages.len()
        );
        message
    }

    /// All contact messages, newest first
    pub fn list_contact_messages(&self) -> Vec<ContactMessage> {
        self.contact_messages.newest_first()
    }

    /// Store a generated design
    pub fn create_generated_kolam(&mut self, kolam: NewGeneratedKolam) -> GeneratedKolam {
        let kolam = GeneratedKolam {
            id: Uuid::new_v4(),
            params: kolam.params,
            svg_content: kolam.svg_content,
            created_at: Utc::now(),
        };
        self.generated_kolams.insert(kolam.id, kolam.clone());

        debug!(
            "Stored generated kolam {} ({} total)",
            kolam.id,
            self.generated_kolams.len()
        );
        kolam
    }

    /// All generated designs, newest first
    pub fn list_generated_kolams(&self) -> Vec<GeneratedKolam> {
        self.generated_kolams.newest_first()
    }

    /// Get a generated design by id
    pub fn get_generated_kolam(&self, id: &Uuid) -> Option<GeneratedKolam> {
        self.generated_kolams.get(id)
    }

    /// Store an analysis result
    pub fn create_analysis_result(&mut self, result: NewAnalysisResult) -> AnalysisResult {
        let result = AnalysisResult {
            id: Uuid::new_v4(),
            original_image_url: result.original_image_url,
            annotated_image_url: result.annotated_image_url,
            symmetry: result.symmetry,
            dot_matrix: result.dot_matrix,
            pattern_type: result.pattern_type,
            confidence: result.confidence,
            colors: result.colors,
            complexity: result.complexity,
            line_thickness: result.line_thickness,
            style: result.style,
            created_at: Utc::now(),
        };
        self.analysis_results.insert(result.id, result.clone());

        debug!(
            "Stored analysis result {} ({} total)",
            result.id,
            self.analysis_results.len()
        );
        result
    }

    /// All analysis results, newest first
    pub fn list_analysis_results(&self) -> Vec<AnalysisResult> {
        self.analysis_results.newest_first()
    }

    /// Get an analysis result by id
    pub fn get_analysis_result(&self, id: &Uuid) -> Option<AnalysisResult> {
        self.analysis_results.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kolam_generator::GeneratorParams;
    use kolamkala_common::{FeedbackType, KolamStyle};
    use serde_json::json;

    fn contact(subject: &str) -> NewContactMessage {
        NewContactMessage {
            name: "Arun".to_string(),
            email: "arun@example.com".to_string(),
            subject: subject.to_string(),
            message: "Please add more festival designs.".to_string(),
            feedback_type: FeedbackType::Suggestion,
        }
    }

    fn kolam(style: KolamStyle) -> NewGeneratedKolam {
        NewGeneratedKolam {
            params: GeneratorParams {
                style,
                ..GeneratorParams::default()
            },
            svg_content: "<svg/>".to_string(),
        }
    }

    #[test]
    fn test_create_and_get_user() {
        let mut storage = Storage::new();

        let user = storage
            .create_user(NewUser {
                username: "lakshmi".to_string(),
                password: "rangoli".to_string(),
            })
            .expect("Failed to create user");

        assert_eq!(storage.get_user(&user.id).unwrap().username, "lakshmi");
        assert_eq!(storage.get_user_by_username("lakshmi").unwrap().id, user.id);
        assert!(storage.get_user_by_username("Lakshmi").is_none());
        assert!(storage.get_user(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_duplicate_username_conflicts() {
        let mut storage = Storage::new();
        let new_user = NewUser {
            username: "lakshmi".to_string(),
            password: "one".to_string(),
        };

        storage.create_user(new_user.clone()).unwrap();
        let err = storage.create_user(new_user).unwrap_err();

        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn test_contact_messages_newest_first() {
        let mut storage = Storage::new();

        let first = storage.create_contact_message(contact("First message"));
        let second = storage.create_contact_message(contact("Second message"));
        let third = storage.create_contact_message(contact("Third message"));

        let ids: Vec<Uuid> = storage
            .list_contact_messages()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[test]
    fn test_generated_kolams_round_trip() {
        let mut storage = Storage::new();

        let pulli = storage.create_generated_kolam(kolam(KolamStyle::Pulli));
        let neli = storage.create_generated_kolam(kolam(KolamStyle::Neli));

        let listed = storage.list_generated_kolams();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, neli.id);

        let fetched = storage.get_generated_kolam(&pulli.id).unwrap();
        assert_eq!(fetched.params.style, KolamStyle::Pulli);
        assert_eq!(fetched.svg_content, "<svg/>");
    }

    #[test]
    fn test_analysis_results_are_independent_of_other_tables() {
        let mut storage = Storage::new();
        storage.create_contact_message(contact("Unrelated message"));

        let result = storage.create_analysis_result(NewAnalysisResult::from_response(
            "data:image/png;base64,iVBOR...".to_string(),
            &json!({"pattern": {"label": "sikku", "confidence": 0.5}}),
        ));

        assert_eq!(storage.list_analysis_results().len(), 1);
        assert!(storage.list_generated_kolams().is_empty());
        assert_eq!(
            storage.get_analysis_result(&result.id).unwrap().confidence,
            50
        );
    }
}
