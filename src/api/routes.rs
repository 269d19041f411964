//! Herd API routes
//!
//! Exposes the registry, purity classification and genealogy trees to the
//! dashboard. Animal path parameters accept either the UUID or the herd code.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use crate::config::{HerdConfig, MAX_GENEALOGY_LEVEL};
use crate::error::HerdError;
use crate::genealogy::{build_genealogy_tree, GenealogyNode};
use crate::models::{Animal, BirthRecord, Breed};
use crate::purity::{PurityClassifier, PurityDecision, PurityGrade, PurityTable};
use crate::repository::{AnimalRepository, InMemoryHerdStore};
use crate::services::{NewAcquisition, NewBirth, Registration, RegistrationService};

type ApiResult<T> = Result<T, (StatusCode, String)>;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryHerdStore>>,
    pub config: Arc<HerdConfig>,
}

impl AppState {
    pub fn new(store: InMemoryHerdStore, config: HerdConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
        }
    }

    fn classifier(&self) -> PurityClassifier {
        PurityClassifier::new(self.config.purity.table)
    }
}

pub fn create_herd_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/animals", get(list_animals))
        .route("/api/animals/:id", get(get_animal))
        .route("/api/animals/:id/genealogy", get(get_genealogy))
        .route("/api/animals/:id/birth", patch(update_birth_notes))
        .route("/api/purity/classify", post(classify_purity))
        .route("/api/births", post(register_birth))
        .route("/api/acquisitions", post(register_acquisition))
        .with_state(state)
}

fn to_status(err: HerdError) -> (StatusCode, String) {
    let status = match &err {
        HerdError::NotFound { .. } => StatusCode::NOT_FOUND,
        HerdError::Duplicate { .. } => StatusCode::CONFLICT,
        e if e.is_client_error() => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

fn animal_not_found(key: &str) -> (StatusCode, String) {
    to_status(HerdError::not_found("Animal", key))
}

/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// GET /api/animals
async fn list_animals(State(state): State<AppState>) -> Json<Vec<Animal>> {
    let store = state.store.read().await;
    Json(store.list_animals())
}

/// GET /api/animals/{id_or_code}
async fn get_animal(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<Animal>> {
    let store = state.store.read().await;
    store
        .resolve_animal(&key)
        .map(Json)
        .ok_or_else(|| animal_not_found(&key))
}

#[derive(Debug, Deserialize)]
pub struct GenealogyQuery {
    pub max_level: Option<u32>,
}

/// GET /api/animals/{id_or_code}/genealogy?max_level=4
async fn get_genealogy(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<GenealogyQuery>,
) -> ApiResult<Json<GenealogyNode>> {
    let max_level = params.max_level.unwrap_or(state.config.genealogy.max_level);
    if max_level > MAX_GENEALOGY_LEVEL {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("max_level must be at most {}", MAX_GENEALOGY_LEVEL),
        ));
    }

    let store = state.store.read().await;
    let animal = store
        .resolve_animal(&key)
        .ok_or_else(|| animal_not_found(&key))?;

    build_genealogy_tree(&*store, animal.id, 0, max_level)
        .map(Json)
        .ok_or_else(|| animal_not_found(&key))
}

#[derive(Debug, Deserialize)]
pub struct BirthNotesRequest {
    pub observation: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// PATCH /api/animals/{id_or_code}/birth
async fn update_birth_notes(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(body): Json<BirthNotesRequest>,
) -> ApiResult<Json<BirthRecord>> {
    let classifier = state.classifier();
    let mut store = state.store.write().await;
    let animal = store
        .resolve_animal(&key)
        .ok_or_else(|| animal_not_found(&key))?;

    RegistrationService::new(&mut *store, classifier)
        .update_birth_notes(animal.id, body.observation, body.attachments)
        .map(Json)
        .map_err(to_status)
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub mother: Option<PurityGrade>,
    pub father: Option<PurityGrade>,
    pub mother_breed: Option<Breed>,
    pub father_breed: Option<Breed>,
    /// Overrides the configured table for this request
    pub table: Option<PurityTable>,
}

/// POST /api/purity/classify
async fn classify_purity(
    State(state): State<AppState>,
    Json(body): Json<ClassifyRequest>,
) -> Json<PurityDecision> {
    let table = body.table.unwrap_or(state.config.purity.table);
    Json(PurityClassifier::new(table).classify(
        body.mother,
        body.father,
        body.mother_breed,
        body.father_breed,
    ))
}

/// POST /api/births
async fn register_birth(
    State(state): State<AppState>,
    Json(body): Json<NewBirth>,
) -> ApiResult<(StatusCode, Json<Registration>)> {
    let classifier = state.classifier();
    let mut store = state.store.write().await;
    RegistrationService::new(&mut *store, classifier)
        .register_birth(body)
        .map(|reg| (StatusCode::CREATED, Json(reg)))
        .map_err(to_status)
}

/// POST /api/acquisitions
async fn register_acquisition(
    State(state): State<AppState>,
    Json(body): Json<NewAcquisition>,
) -> ApiResult<(StatusCode, Json<Registration>)> {
    let classifier = state.classifier();
    let mut store = state.store.write().await;
    RegistrationService::new(&mut *store, classifier)
        .register_acquisition(body)
        .map(|reg| (StatusCode::CREATED, Json(reg)))
        .map_err(to_status)
}
