// Business Directory - REST API with Axum

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::business::{Business, BusinessPayload};
use crate::error::{DirectoryError, DirectoryResult};
use crate::service::BusinessDirectory;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub directory: BusinessDirectory,
}

/// Acknowledgement body for writes
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    fn success(message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub status: String,
    pub businesses: Vec<Business>,
}

/// Name of the free-text search parameter
pub const SEARCH_PARAM: &str = "pencarian";

/// First `pencarian` value in the query string, or "" when absent.
/// Repeated parameters are not an error; later values are ignored.
pub fn search_term(pairs: Vec<(String, String)>) -> String {
    pairs
        .into_iter()
        .find(|(key, _)| key == SEARCH_PARAM)
        .map(|(_, value)| value)
        .unwrap_or_default()
}

// ============================================================================
// Extraction helpers
// ============================================================================

// Bodies go through a JSON object first so a repeated key keeps its last value
fn parse_body(payload: Result<Json<serde_json::Value>, JsonRejection>) -> DirectoryResult<BusinessPayload> {
    let Json(value) = payload.map_err(|rejection| DirectoryError::InvalidBody(rejection.body_text()))?;

    serde_json::from_value(value).map_err(|err| DirectoryError::InvalidBody(err.to_string()))
}

fn parse_id(id: Result<Path<i64>, PathRejection>) -> DirectoryResult<i64> {
    id.map(|Path(id)| id)
        .map_err(|rejection| DirectoryError::InvalidId(rejection.body_text()))
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Liveness probe
async fn health_check() -> impl IntoResponse {
    Json(MessageResponse::success("ok"))
}

/// POST /business - Insert a new business
async fn create_business(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> DirectoryResult<impl IntoResponse> {
    let record = parse_body(payload)?.validate()?;

    state.directory.create(record).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::success("data has been inserted to database")),
    ))
}

/// PUT /business/:id - Replace every field of a business
async fn update_business(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> DirectoryResult<impl IntoResponse> {
    let id = parse_id(id)?;
    let record = parse_body(payload)?.validate()?;

    state.directory.update(id, record).await?;

    Ok(Json(MessageResponse::success("data has been updated to database")))
}

/// DELETE /business/:id - Remove a business
async fn delete_business(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> DirectoryResult<impl IntoResponse> {
    let id = parse_id(id)?;

    state.directory.delete(id).await?;

    Ok(Json(MessageResponse::success("data has been deleted from database")))
}

/// GET /businesses?pencarian=<text> - Substring search over categories, city and name
async fn search_businesses(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> DirectoryResult<impl IntoResponse> {
    let Query(pairs) = query.map_err(|rejection| DirectoryError::InvalidQuery(rejection.body_text()))?;

    let businesses = state.directory.search(search_term(pairs)).await?;

    Ok(Json(SearchResponse {
        status: "success".to_string(),
        businesses,
    }))
}

// ============================================================================
// Router
// ============================================================================

pub fn build_router(directory: BusinessDirectory) -> Router {
    let state = AppState { directory };

    Router::new()
        .route("/health", get(health_check))
        .route("/business", post(create_business))
        .route("/business/:id", put(update_business).delete(delete_business))
        .route("/businesses", get(search_businesses))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
