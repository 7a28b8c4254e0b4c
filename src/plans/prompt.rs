use std::fmt::Write as _;

use crate::error::PlanError;
use crate::profile::UserProfile;

/// Render the natural-language instruction block and the short directive prompt
/// for one generation call. Pure and byte-stable for equal inputs.
///
/// Fails with `InvalidProfile` when the profile misses a required field or
/// `meal_count` is not positive; callers must not reach the model in that case.
pub fn build_request(
    profile: &UserProfile,
    meal_count: u32,
) -> Result<(String, String), PlanError> {
    profile.validate()?;
    if meal_count == 0 {
        return Err(PlanError::InvalidProfile);
    }

    // validate() guarantees these are present.
    let age = profile.age.unwrap_or_default();
    let current = profile.current_weight_lbs.unwrap_or_default().round() as i64;
    let goal = profile.goal_weight_lbs.unwrap_or_default().round() as i64;
    let store = profile.store.trim();

    let mut instructions = String::new();
    let _ = writeln!(
        instructions,
        "You are a nutrition and grocery planning assistant. Given the following user:"
    );
    let _ = writeln!(instructions, "- Age: {age}");
    let _ = writeln!(instructions, "- Current weight (lbs): {current}");
    let _ = writeln!(instructions, "- Goal weight (lbs): {goal}");
    let _ = writeln!(instructions, "- Preferred grocery store: {store}");

    if profile.has_macro_targets() {
        let _ = writeln!(instructions);
        let _ = writeln!(instructions, "Macro targets:");
        if let Some(protein) = profile.target_protein_g {
            let _ = writeln!(instructions, "- Target protein: {} g", protein.round() as i64);
        }
        if let Some(carbs) = profile.target_carbs_g {
            let _ = writeln!(instructions, "- Target carbs: {} g", carbs.round() as i64);
        }
        if let Some(fat) = profile.target_fat_g {
            let _ = writeln!(instructions, "- Target fat: {} g", fat.round() as i64);
        }
    }

    let _ = writeln!(instructions);
    let _ = writeln!(
        instructions,
        "Suggest budget-conscious meal plans for one day that can be shopped at the specified store. For each meal, include:"
    );
    let _ = writeln!(instructions, "- A short meal name");
    let _ = writeln!(
        instructions,
        "- 3-6 specific grocery items to buy (brand-agnostic when possible, but realistic for the store)"
    );
    let _ = writeln!(instructions, "- Estimated protein grams and calories for the meal");
    let _ = writeln!(
        instructions,
        "- Estimated total cost in USD for the listed items (reasonable ballpark)"
    );
    if profile.has_macro_targets() {
        let _ = writeln!(
            instructions,
            "When balancing against the calorie and macro goals, prioritize hitting the protein target."
        );
    }

    let prompt = if meal_count == 1 {
        "Plan 1 meal".to_string()
    } else {
        format!("Plan {meal_count} meals")
    };

    Ok((instructions, prompt))
}
