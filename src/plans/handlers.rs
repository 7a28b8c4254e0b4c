use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::Stream;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::state::AppState;

use super::dto::{GenerateAccepted, GenerateRequest, PlanStateResponse, ToggleFavoriteResponse};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/plans/current", get(current_plan))
        .route("/plans/events", get(plan_events))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/plans", post(generate_plan))
        .route("/plans/suggestions/:id/favorite", post(toggle_favorite))
}

/// Kick off a generation request. Invalid profiles are rejected here, before
/// the model is ever consulted; everything after the 202 is observable through
/// the plan state.
#[instrument(skip(state, body))]
pub async fn generate_plan(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<GenerateAccepted>), (StatusCode, String)> {
    if let Err(err) = body.profile.validate() {
        warn!(%err, "rejecting plan request");
        return Err((StatusCode::BAD_REQUEST, err.to_string()));
    }
    let meal_count = body.meal_count.unwrap_or(state.config.default_meal_count);

    let planner = Arc::clone(&state.planner);
    tokio::spawn(async move {
        // Failures land in the published plan state and are logged inside.
        let _ = planner.generate(&body.profile, meal_count).await;
    });

    Ok((StatusCode::ACCEPTED, Json(GenerateAccepted { meal_count })))
}

pub async fn current_plan(State(state): State<AppState>) -> Json<PlanStateResponse> {
    Json(PlanStateResponse::from(&state.planner.current()))
}

/// Push every plan snapshot to the client as it is published.
pub async fn plan_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.planner.subscribe();
    let stream = futures::stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let response = PlanStateResponse::from(&*rx.borrow_and_update());
        let event = Event::default().event("plan").json_data(&response).ok()?;
        Some((Ok(event), (rx, false)))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[instrument(skip(state))]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ToggleFavoriteResponse>, (StatusCode, String)> {
    match state.planner.toggle_favorited(id) {
        Some(is_favorited) => Ok(Json(ToggleFavoriteResponse { id, is_favorited })),
        None => Err((StatusCode::NOT_FOUND, "Suggestion not found".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plans::types::PlanPhase;
    use crate::profile::UserProfile;

    fn request(store: &str) -> GenerateRequest {
        GenerateRequest {
            profile: UserProfile {
                age: Some(30),
                current_weight_lbs: Some(230.0),
                goal_weight_lbs: Some(200.0),
                store: store.into(),
                target_protein_g: None,
                target_carbs_g: None,
                target_fat_g: None,
            },
            meal_count: None,
        }
    }

    #[tokio::test]
    async fn generate_rejects_invalid_profile_with_400() {
        let state = AppState::fake();
        let err = generate_plan(State(state), Json(request("  ")))
            .await
            .expect_err("blank store must be rejected");
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1, "Please fill in all fields.");
    }

    #[tokio::test]
    async fn generate_accepts_valid_profile_and_defaults_meal_count() {
        let state = AppState::fake();
        let (status, Json(accepted)) = generate_plan(State(state.clone()), Json(request("Target")))
            .await
            .expect("valid request is accepted");
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(accepted.meal_count, state.config.default_meal_count);
    }

    #[tokio::test]
    async fn current_plan_starts_idle() {
        let state = AppState::fake();
        let Json(response) = current_plan(State(state)).await;
        assert_eq!(response.phase, PlanPhase::Idle);
        assert!(!response.is_loading);
        assert!(response.suggestions.is_empty());
    }

    #[tokio::test]
    async fn toggle_unknown_suggestion_is_404() {
        let state = AppState::fake();
        let err = toggle_favorite(State(state), Path(Uuid::new_v4()))
            .await
            .expect_err("unknown id");
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }
}
