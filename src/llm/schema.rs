use std::fmt::Write as _;

/// Render the target-schema description included with every request, so the
/// model emits JSON the partial types deserialize from. Field guides mirror the
/// generation contract: meal and item names carry an emoji, urls point at the
/// item's product page, and the model must never set `isFavorited` itself.
pub fn render() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Respond with a JSON array of meal suggestions. Each suggestion has:");
    let _ = writeln!(out, "- \"meal\": name of the meal with an appropriate emoji");
    let _ = writeln!(out, "- \"items\": array of grocery items, each with:");
    let _ = writeln!(out, "  - \"name\": name of the item with an appropriate emoji");
    let _ = writeln!(out, "  - \"url\": URL to the item's product page at the store");
    let _ = writeln!(out, "- \"proteinGrams\": estimated protein in grams (integer)");
    let _ = writeln!(out, "- \"calories\": estimated calories (integer)");
    let _ = writeln!(out, "- \"estimatedCost\": estimated cost in USD (number)");
    let _ = writeln!(out, "- \"isFavorited\": this value should be false");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_every_generated_field() {
        let schema = render();
        for field in ["meal", "items", "name", "url", "proteinGrams", "calories", "estimatedCost"] {
            assert!(schema.contains(field), "schema must describe {field}");
        }
    }

    #[test]
    fn forbids_model_set_favorites() {
        assert!(render().contains("\"isFavorited\": this value should be false"));
    }
}
