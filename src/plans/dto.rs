use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plans::types::{PartialGrocerySuggestion, PlanPhase, PlanState, PlanTotals};
use crate::profile::UserProfile;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(flatten)]
    pub profile: UserProfile,
    /// 1 for a quick single-meal suggestion, 3 for a full day.
    pub meal_count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct GenerateAccepted {
    pub meal_count: u32,
}

#[derive(Debug, Serialize)]
pub struct ToggleFavoriteResponse {
    pub id: Uuid,
    pub is_favorited: bool,
}

#[derive(Debug, Serialize)]
pub struct PlanStateResponse {
    pub request_seq: u64,
    pub phase: PlanPhase,
    pub is_loading: bool,
    pub suggestions: Vec<PartialGrocerySuggestion>,
    pub error_message: Option<String>,
    pub totals: PlanTotals,
}

impl From<&PlanState> for PlanStateResponse {
    fn from(state: &PlanState) -> Self {
        Self {
            request_seq: state.request_seq,
            phase: state.phase,
            is_loading: state.is_loading(),
            suggestions: state.suggestions.clone(),
            error_message: state.error_message.clone(),
            totals: state.totals(),
        }
    }
}
