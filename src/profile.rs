use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// User inputs a plan request is built from. All biometric fields are optional
/// at the type level because the presentation layer edits them piecemeal;
/// `validate` is the gate a generation request must pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: Option<u32>,
    pub current_weight_lbs: Option<f64>,
    pub goal_weight_lbs: Option<f64>,
    #[serde(default)]
    pub store: String,
    /// Macro targets in grams, each independently optional.
    pub target_protein_g: Option<f64>,
    pub target_carbs_g: Option<f64>,
    pub target_fat_g: Option<f64>,
}

impl UserProfile {
    pub fn validate(&self) -> Result<(), PlanError> {
        let age_ok = matches!(self.age, Some(a) if a > 0);
        let weight_ok = matches!(self.current_weight_lbs, Some(w) if w > 0.0);
        let goal_ok = matches!(self.goal_weight_lbs, Some(w) if w > 0.0);
        if !age_ok || !weight_ok || !goal_ok || self.store.trim().is_empty() {
            return Err(PlanError::InvalidProfile);
        }
        Ok(())
    }

    pub fn has_macro_targets(&self) -> bool {
        self.target_protein_g.is_some()
            || self.target_carbs_g.is_some()
            || self.target_fat_g.is_some()
    }
}
