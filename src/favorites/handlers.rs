use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, instrument};
use uuid::Uuid;

use crate::plans::types::GrocerySuggestion;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/favorites", get(list_favorites))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/favorites/:id", post(promote_favorite))
}

#[instrument(skip(state))]
pub async fn list_favorites(
    State(state): State<AppState>,
) -> Result<Json<Vec<GrocerySuggestion>>, (StatusCode, String)> {
    match state.favorites.list_all().await {
        Ok(favorites) => Ok(Json(favorites)),
        Err(e) => {
            error!(error = %e, "list favorites failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// Promote a suggestion out of the current in-progress snapshot into the
/// durable favorites collection. Not idempotent: promoting twice appends twice.
#[instrument(skip(state))]
pub async fn promote_favorite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<GrocerySuggestion>), (StatusCode, String)> {
    match state.planner.promote_favorite(id).await {
        Ok(Some(favorite)) => Ok((StatusCode::CREATED, Json(favorite))),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Suggestion not found".into())),
        Err(e) => {
            error!(error = %e, %id, "promote favorite failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
