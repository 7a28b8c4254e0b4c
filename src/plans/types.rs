use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A grocery item as the model streams it: any field may not be generated yet.
/// Ids are assigned locally, never by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialGroceryItem {
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub name: Option<String>,
    pub url: Option<String>,
}

impl Default for PartialGroceryItem {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            url: None,
        }
    }
}

/// A meal suggestion mid-generation. Distinct from [`GrocerySuggestion`]:
/// everything except the locally generated id may still be absent, and the two
/// types must not be conflated (promotion is the only bridge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialGrocerySuggestion {
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub meal: Option<String>,
    pub items: Option<Vec<PartialGroceryItem>>,
    pub protein_grams: Option<u32>,
    pub calories: Option<u32>,
    pub estimated_cost: Option<f64>,
    pub is_favorited: Option<bool>,
}

impl Default for PartialGrocerySuggestion {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            meal: None,
            items: None,
            protein_grams: None,
            calories: None,
            estimated_cost: None,
            is_favorited: None,
        }
    }
}

impl PartialGrocerySuggestion {
    /// Resolve an in-progress suggestion into a complete, persistable one.
    /// Missing strings get placeholders, missing numerics become zero, and the
    /// result is always favorited regardless of the transient flag.
    pub fn promote(&self) -> GrocerySuggestion {
        let meal = match self.meal.as_deref().map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => "Meal".to_string(),
        };
        let items = self
            .items
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|item| GroceryItem {
                id: item.id,
                name: item.name.clone().unwrap_or_else(|| "No Value".into()),
                url: item.url.clone().unwrap_or_default(),
            })
            .collect();
        GrocerySuggestion {
            id: self.id,
            meal,
            items,
            protein_grams: self.protein_grams.unwrap_or(0),
            calories: self.calories.unwrap_or(0),
            estimated_cost: self.estimated_cost.unwrap_or(0.0),
            is_favorited: true,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: Uuid,
    pub name: String,
    /// Store-resolvable product link; empty means no link available.
    pub url: String,
}

impl GroceryItem {
    pub fn link(&self) -> Option<&str> {
        let url = self.url.trim();
        (!url.is_empty()).then_some(url)
    }
}

/// A finalized meal suggestion as it lives in the favorites store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrocerySuggestion {
    pub id: Uuid,
    pub meal: String,
    pub items: Vec<GroceryItem>,
    pub protein_grams: u32,
    pub calories: u32,
    pub estimated_cost: f64,
    pub is_favorited: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanPhase {
    Idle,
    Requesting,
    Streaming,
    Completed,
    Failed,
}

/// The aggregator's exposed state: always the most recent cumulative snapshot,
/// replaced wholesale on every stream element.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanState {
    pub request_seq: u64,
    pub phase: PlanPhase,
    pub suggestions: Vec<PartialGrocerySuggestion>,
    pub error_message: Option<String>,
}

impl PlanState {
    pub fn idle() -> Self {
        Self {
            request_seq: 0,
            phase: PlanPhase::Idle,
            suggestions: Vec::new(),
            error_message: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, PlanPhase::Requesting | PlanPhase::Streaming)
    }

    pub fn totals(&self) -> PlanTotals {
        PlanTotals::from_suggestions(&self.suggestions)
    }
}

/// Daily-total footer values over the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanTotals {
    pub protein_grams: u32,
    pub calories: u32,
    pub estimated_cost: f64,
}

impl PlanTotals {
    pub fn from_suggestions(suggestions: &[PartialGrocerySuggestion]) -> Self {
        let mut totals = Self {
            protein_grams: 0,
            calories: 0,
            estimated_cost: 0.0,
        };
        for s in suggestions {
            totals.protein_grams += s.protein_grams.unwrap_or(0);
            totals.calories += s.calories.unwrap_or(0);
            totals.estimated_cost += s.estimated_cost.unwrap_or(0.0);
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promote_fills_documented_defaults() {
        let partial = PartialGrocerySuggestion {
            meal: Some("🍳 Breakfast Scramble".into()),
            ..Default::default()
        };

        let complete = partial.promote();
        assert_eq!(complete.meal, "🍳 Breakfast Scramble");
        assert!(complete.items.is_empty());
        assert_eq!(complete.protein_grams, 0);
        assert_eq!(complete.calories, 0);
        assert_eq!(complete.estimated_cost, 0.0);
        assert!(complete.is_favorited);
    }

    #[test]
    fn promote_placeholders_blank_meal_and_item_fields() {
        let partial = PartialGrocerySuggestion {
            meal: Some("   ".into()),
            items: Some(vec![PartialGroceryItem::default()]),
            ..Default::default()
        };

        let complete = partial.promote();
        assert_eq!(complete.meal, "Meal");
        assert_eq!(complete.items[0].name, "No Value");
        assert_eq!(complete.items[0].url, "");
        assert!(complete.items[0].link().is_none());
    }

    #[test]
    fn promote_forces_favorited_even_when_flag_unset() {
        let partial = PartialGrocerySuggestion {
            is_favorited: Some(false),
            ..Default::default()
        };
        assert!(partial.promote().is_favorited);
    }

    #[test]
    fn promote_keeps_identity() {
        let partial = PartialGrocerySuggestion::default();
        assert_eq!(partial.promote().id, partial.id);
    }

    #[test]
    fn totals_sum_without_rounding() {
        let suggestions = vec![
            PartialGrocerySuggestion {
                protein_grams: Some(10),
                calories: Some(300),
                estimated_cost: Some(1.50),
                ..Default::default()
            },
            PartialGrocerySuggestion {
                protein_grams: Some(20),
                calories: Some(400),
                estimated_cost: Some(2.25),
                ..Default::default()
            },
        ];

        let totals = PlanTotals::from_suggestions(&suggestions);
        assert_eq!(totals.protein_grams, 30);
        assert_eq!(totals.calories, 700);
        assert_eq!(totals.estimated_cost, 3.75);
    }

    #[test]
    fn totals_treat_ungenerated_fields_as_zero() {
        let suggestions = vec![PartialGrocerySuggestion::default()];
        let totals = PlanTotals::from_suggestions(&suggestions);
        assert_eq!(totals.protein_grams, 0);
        assert_eq!(totals.calories, 0);
        assert_eq!(totals.estimated_cost, 0.0);
    }

    #[test]
    fn partial_deserializes_with_any_fields_absent() {
        let partial: PartialGrocerySuggestion = serde_json::from_str(
            r#"{"meal":"🥗 Lunch Bowl","proteinGrams":42,"items":[{"name":"Chicken breast"}]}"#,
        )
        .expect("partial json should parse");

        assert_eq!(partial.meal.as_deref(), Some("🥗 Lunch Bowl"));
        assert_eq!(partial.protein_grams, Some(42));
        assert_eq!(partial.calories, None);
        let items = partial.items.expect("items present");
        assert_eq!(items[0].name.as_deref(), Some("Chicken breast"));
        assert_eq!(items[0].url, None);
    }
}
