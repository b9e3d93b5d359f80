//! KolamKala REST API
//!
//! This service backs the KolamKala web application: it stores contact
//! messages and generated designs, proxies uploaded images to a vision
//! model, and serves the learning curriculum and gallery catalog.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/contact` / `GET /api/contact` - Contact messages
//! - `POST /api/analyze` - Analyze an uploaded image
//! - `POST /api/generate` - Save a generated design
//! - `POST /api/generate/preview` - Render a design as SVG
//! - `GET /api/generate/random` - Random generator parameters
//! - `GET /api/generate/options` - Styles, symmetries and palettes
//! - `GET /api/generated` / `GET /api/generated/{id}` - Saved designs
//! - `GET /api/lessons?level=N` - Lessons for a level
//! - `GET /api/lessons/levels` - Curriculum levels
//! - `GET /api/lessons/{id}` / `GET /api/lessons/{id}/practice` - One lesson
//! - `GET /api/gallery` / `GET /api/gallery/{id}/preview` - Gallery catalog
//! - `GET /api/history` - Saved analyses and designs
//! - `GET /api/analysis/{id}` - One saved analysis

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod handlers;
pub mod models;
pub mod storage;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use analysis::{CannedAnalyzer, OpenAiAnalyzer, PatternAnalyzer};
pub use storage::Storage;

/// Application state shared across handlers
pub struct AppState {
    /// Record tables; never held across the analysis call
    pub storage: RwLock<Storage>,

    /// Backend used by `/api/analyze`
    pub analyzer: Arc<dyn PatternAnalyzer>,
}

impl AppState {
    /// Create new application state with empty storage
    pub fn new(analyzer: Arc<dyn PatternAnalyzer>) -> Self {
        Self {
            storage: RwLock::new(Storage::new()),
            analyzer,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(CannedAnalyzer))
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_handler))
        // Contact form
        .route(
            "/api/contact",
            post(handlers::create_contact_handler).get(handlers::list_contact_handler),
        )
        // Image analysis
        .route(
            "/api/analyze",
            post(handlers::analyze_handler)
                .layer(DefaultBodyLimit::max(handlers::ANALYZE_BODY_LIMIT)),
        )
        .route("/api/analysis/{id}", get(handlers::get_analysis_handler))
        // Generator
        .route("/api/generate", post(handlers::generate_handler))
        .route("/api/generate/preview", post(handlers::preview_handler))
        .route("/api/generate/random", get(handlers::random_params_handler))
        .route(
            "/api/generate/options",
            get(handlers::generator_options_handler),
        )
        .route("/api/generated", get(handlers::list_generated_handler))
        .route("/api/generated/{id}", get(handlers::get_generated_handler))
        // Learning
        .route("/api/lessons", get(handlers::lessons_handler))
        .route("/api/lessons/levels", get(handlers::levels_handler))
        .route("/api/lessons/{id}", get(handlers::get_lesson_handler))
        .route(
            "/api/lessons/{id}/practice",
            get(handlers::lesson_practice_handler),
        )
        // Gallery
        .route("/api/gallery", get(handlers::gallery_handler))
        .route(
            "/api/gallery/{id}/preview",
            get(handlers::gallery_preview_handler),
        )
        // History
        .route("/api/history", get(handlers::history_handler))
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
