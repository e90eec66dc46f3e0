//! REST API endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/animals` | Filter animals (`name`, `species`, `diet`, repeated `personalityTraits`) |
//! | `GET` | `/api/animals/{id}` | Single animal, or 404 |
//! | `POST` | `/api/animals` | Create an animal |
//! | `GET` | `/api/zookeepers` | Filter zookeepers (`id`, `name`, `age`, `favoriteAnimal`) |
//! | `GET` | `/api/zookeepers/{id}` | Single zookeeper, or 404 |
//! | `POST` | `/api/zookeepers` | Create a zookeeper |
//!
//! Each handler picks its collection out of [`AppState`] and delegates to a
//! generic helper, so both kinds share one code path.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use zookeepr_types::{Animal, Candidate, FromQueryPairs, Record, Zookeeper};

use crate::error::ApiError;
use crate::state::{AppState, SharedStore};

/// Raw query pairs, in order, with repeated keys kept.
pub type QueryPairs = Vec<(String, String)>;

// ---------------------------------------------------------------------------
// Animals
// ---------------------------------------------------------------------------

/// List animals matching every supplied constraint.
pub async fn list_animals(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<QueryPairs>,
) -> Json<Vec<Animal>> {
    list_in(&state.animals, &pairs).await
}

/// Return the animal with the given id.
pub async fn get_animal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Animal>, ApiError> {
    get_in(&state.animals, &id).await
}

/// Validate and create an animal from the JSON body.
pub async fn create_animal(
    State(state): State<Arc<AppState>>,
    Json(candidate): Json<Candidate>,
) -> Result<Json<Animal>, ApiError> {
    create_in(&state.animals, candidate).await
}

// ---------------------------------------------------------------------------
// Zookeepers
// ---------------------------------------------------------------------------

/// List zookeepers matching every supplied constraint.
pub async fn list_zookeepers(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<QueryPairs>,
) -> Json<Vec<Zookeeper>> {
    list_in(&state.zookeepers, &pairs).await
}

/// Return the zookeeper with the given id.
pub async fn get_zookeeper(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Zookeeper>, ApiError> {
    get_in(&state.zookeepers, &id).await
}

/// Validate and create a zookeeper from the JSON body.
pub async fn create_zookeeper(
    State(state): State<Arc<AppState>>,
    Json(candidate): Json<Candidate>,
) -> Result<Json<Zookeeper>, ApiError> {
    create_in(&state.zookeepers, candidate).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn list_in<R: Record>(store: &SharedStore<R>, pairs: &[(String, String)]) -> Json<Vec<R>> {
    let query = R::Query::from_pairs(pairs.iter().map(|(k, v)| (k, v)));
    let store = store.read().await;
    Json(store.filter(&query).into_iter().cloned().collect())
}

async fn get_in<R: Record>(store: &SharedStore<R>, id: &str) -> Result<Json<R>, ApiError> {
    let store = store.read().await;
    store
        .find_by_id(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("{} {id}", R::NOUN)))
}

async fn create_in<R: Record>(
    store: &SharedStore<R>,
    candidate: Candidate,
) -> Result<Json<R>, ApiError> {
    let mut store = store.write().await;
    Ok(Json(store.create(candidate).await?))
}
