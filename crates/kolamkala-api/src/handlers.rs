//! API request handlers for KolamKala

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Multipart, Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use kolam_generator::{
    generate_placeholder, ColorPreset, GeneratorParams, ParamsParser, SvgGenerator, COLOR_PRESETS,
};
use kolamkala_common::{Error, KolamStyle, SymmetryType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    analysis::{AnalysisOutcome, ImageUpload},
    catalog::{self, GalleryEntry, GalleryFilter, Lesson, LevelInfo},
    models::{AnalysisResult, ContactMessage, GeneratedKolam, NewAnalysisResult, NewContactMessage, NewGeneratedKolam},
    AppState,
};

/// Largest accepted image, in bytes
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Request body cap for uploads: the image plus multipart framing
pub const ANALYZE_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 64 * 1024;

/// Multipart field carrying the image
const IMAGE_FIELD: &str = "image";

const ACCEPTED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// API Error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message
        });

        (self.status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(message) => ApiError::bad_request(message),
            Error::NotFound(message) => ApiError::not_found(message),
            Error::Conflict(message) => ApiError {
                status: StatusCode::CONFLICT,
                message,
            },
            other => {
                // internal details stay in the log
                error!("Internal error: {}", other);
                ApiError::internal("Internal server error")
            }
        }
    }
}

/// Response for a created record
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: Uuid,
}

impl CreatedResponse {
    fn new(id: Uuid) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Json(Self { success: true, id }))
    }
}

/// Preview request: generator parameters and an optional seed
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(flatten)]
    pub params: GeneratorParams,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// A value/label pair for a picker
#[derive(Debug, Serialize)]
pub struct OptionItem {
    pub value: &'static str,
    pub label: &'static str,
}

/// Everything the generator controls offer
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOptions {
    pub styles: Vec<OptionItem>,
    pub symmetries: Vec<OptionItem>,
    pub color_presets: &'static [ColorPreset],
}

/// Lessons query
#[derive(Debug, Deserialize)]
pub struct LessonsQuery {
    pub level: Option<String>,
}

/// Filtered gallery
#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub items: Vec<&'static GalleryEntry>,
    pub total: usize,
}

/// Saved analyses and designs
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub analysis_results: Vec<AnalysisResult>,
    pub generated_kolams: Vec<GeneratedKolam>,
}

fn invalid_id(err: PathRejection) -> ApiError {
    warn!("Path rejected: {}", err);
    ApiError::bad_request("Invalid id")
}

fn svg_response(svg: String) -> Response {
    ([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response()
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "kolamkala-api"
    }))
}

/// Store a contact form submission
pub async fn create_contact_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewContactMessage>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let invalid = || ApiError::bad_request("Invalid contact form data");

    let Json(payload) = payload.map_err(|e| {
        warn!("Contact form rejected: {}", e);
        invalid()
    })?;

    payload.validate().map_err(|e| {
        warn!("Contact form rejected: {}", e);
        invalid()
    })?;

    let message = state.storage.write().await.create_contact_message(payload);
    info!("Contact message received: {}", message.id);

    Ok(CreatedResponse::new(message.id))
}

/// List contact messages, newest first
pub async fn list_contact_handler(State(state): State<Arc<AppState>>) -> Json<Vec<ContactMessage>> {
    Json(state.storage.read().await.list_contact_messages())
}

fn upload_error(err: MultipartError) -> ApiError {
    warn!("Malformed upload: {}", err);
    ApiError::bad_request("Invalid image upload")
}

/// Pull the `image` field out of a multipart body
async fn read_image(multipart: &mut Multipart) -> Result<ImageUpload, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let mime_type = field.content_type().unwrap_or_default().to_ascii_lowercase();
        if !ACCEPTED_IMAGE_TYPES.contains(&mime_type.as_str()) {
            warn!("Unsupported image type: {:?}", mime_type);
            return Err(ApiError::bad_request("Only JPEG and PNG images are supported"));
        }

        let bytes = field.bytes().await.map_err(upload_error)?;
        if bytes.is_empty() {
            return Err(ApiError::bad_request("No image file provided"));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ApiError::bad_request("Image exceeds the 10MB limit"));
        }

        return Ok(ImageUpload::new(mime_type, bytes.to_vec()));
    }

    Err(ApiError::bad_request("No image file provided"))
}

/// Analyze an uploaded image
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        warn!("Analyze request is not multipart: {}", e);
        ApiError::bad_request("No image file provided")
    })?;

    let image = read_image(&mut multipart).await?;
    info!(
        "Analyzing {} byte {} image with {}",
        image.bytes.len(),
        image.mime_type,
        state.analyzer.name()
    );

    let outcome = state.analyzer.analyze(&image).await.map_err(|e| {
        error!("Analysis error: {}", e);
        ApiError::internal("Failed to analyze image")
    })?;

    let body = match outcome {
        AnalysisOutcome::Sample(body) => body,
        AnalysisOutcome::Detected(body) => {
            let record = NewAnalysisResult::from_response(image.stored_url(), &body);
            let stored = state.storage.write().await.create_analysis_result(record);
            info!("Analysis stored: {} ({})", stored.id, stored.pattern_type);
            body
        }
    };

    Ok(Json(body))
}

/// Save a generated design
pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewGeneratedKolam>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let save_failed = || ApiError::bad_request("Failed to save generated Kolam");

    let Json(mut kolam) = payload.map_err(|e| {
        warn!("Generated kolam rejected: {}", e);
        save_failed()
    })?;

    kolam.params = ParamsParser::apply_defaults(kolam.params);
    ParamsParser::validate(&kolam.params).map_err(|e| {
        warn!("Generated kolam rejected: {}", e);
        save_failed()
    })?;

    if kolam.svg_content.trim().is_empty() {
        kolam.svg_content = SvgGenerator::new(kolam.params.sanitized()).generate();
    }

    let saved = state.storage.write().await.create_generated_kolam(kolam);
    info!("Generated kolam saved: {} ({})", saved.id, saved.params.style);

    Ok(CreatedResponse::new(saved.id))
}

/// List saved designs, newest first
pub async fn list_generated_handler(State(state): State<Arc<AppState>>) -> Json<Vec<GeneratedKolam>> {
    Json(state.storage.read().await.list_generated_kolams())
}

/// Get one saved design
pub async fn get_generated_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<GeneratedKolam>, ApiError> {
    let Path(id) = id.map_err(invalid_id)?;
    let kolam = state
        .storage
        .read()
        .await
        .get_generated_kolam(&id)
        .ok_or_else(|| Error::NotFound(format!("Generated kolam not found: {}", id)))?;

    Ok(Json(kolam))
}

/// Render a design server-side without saving it
pub async fn preview_handler(
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Preview rejected: {}", e);
        ApiError::bad_request("Invalid generator parameters")
    })?;

    let params = ParamsParser::apply_defaults(request.params).sanitized();
    let generator = SvgGenerator::new(params);

    let svg = match request.seed {
        Some(seed) => generator.generate_seeded(seed),
        None => generator.generate(),
    };

    Ok(svg_response(svg))
}

/// A random parameter set for the "surprise me" control
pub async fn random_params_handler() -> Json<GeneratorParams> {
    Json(GeneratorParams::random(&mut rand::thread_rng()))
}

/// Styles, symmetries and palettes the generator offers
pub async fn generator_options_handler() -> Json<GeneratorOptions> {
    Json(GeneratorOptions {
        styles: KolamStyle::ALL
            .iter()
            .map(|style| OptionItem {
                value: style.as_str(),
                label: style.label(),
            })
            .collect(),
        symmetries: SymmetryType::ALL
            .iter()
            .map(|symmetry| OptionItem {
                value: symmetry.as_str(),
                label: symmetry.label(),
            })
            .collect(),
        color_presets: &COLOR_PRESETS,
    })
}

/// Lessons for one level; the level defaults to 1
pub async fn lessons_handler(Query(query): Query<LessonsQuery>) -> Json<Vec<&'static Lesson>> {
    let level = catalog::parse_level(query.level.as_deref());
    Json(catalog::lessons_for_level(level))
}

/// Curriculum levels
pub async fn levels_handler() -> Json<Vec<LevelInfo>> {
    Json(catalog::levels())
}

/// One lesson by id
pub async fn get_lesson_handler(Path(id): Path<String>) -> Result<Json<&'static Lesson>, ApiError> {
    catalog::find_lesson(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Lesson not found: {}", id)))
}

/// Full generator parameters for a lesson's practice preset
pub async fn lesson_practice_handler(
    Path(id): Path<String>,
) -> Result<Json<GeneratorParams>, ApiError> {
    let lesson = catalog::find_lesson(&id)
        .ok_or_else(|| ApiError::not_found(format!("Lesson not found: {}", id)))?;

    Ok(Json(GeneratorParams::from_preset(&lesson.practice_preset)))
}

/// Filter the curated gallery
pub async fn gallery_handler(
    filter: Result<Query<GalleryFilter>, QueryRejection>,
) -> Result<Json<GalleryResponse>, ApiError> {
    let Query(filter) = filter.map_err(|e| {
        warn!("Gallery query rejected: {}", e);
        ApiError::bad_request("Invalid gallery filter")
    })?;

    let items = filter.apply();
    Ok(Json(GalleryResponse {
        total: items.len(),
        items,
    }))
}

/// Thumbnail for a gallery entry
pub async fn gallery_preview_handler(
    id: Result<Path<u32>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id.map_err(invalid_id)?;
    let entry = catalog::find_gallery_entry(id)
        .ok_or_else(|| ApiError::not_found(format!("Gallery entry not found: {}", id)))?;

    let svg = generate_placeholder(entry.id, entry.style, &mut rand::thread_rng());
    Ok(svg_response(svg))
}

/// Saved analyses and designs, each newest first
pub async fn history_handler(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    let storage = state.storage.read().await;

    Json(HistoryResponse {
        analysis_results: storage.list_analysis_results(),
        generated_kolams: storage.list_generated_kolams(),
    })
}

/// Get one analysis result
pub async fn get_analysis_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Path(id) = id.map_err(invalid_id)?;
    let result = state
        .storage
        .read()
        .await
        .get_analysis_result(&id)
        .ok_or_else(|| Error::NotFound(format!("Analysis result not found: {}", id)))?;

    Ok(Json(result))
}
