use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tracing::debug;

use super::{LanguageModel, StructuredRequest, SuggestionSnapshot, SuggestionStream};

/// Replays a fixed sequence of cumulative snapshots, pausing between elements.
/// Stands in for the on-device runtime in the demo binary and in tests.
pub struct ScriptedModel {
    snapshots: Vec<SuggestionSnapshot>,
    step_delay: Duration,
}

impl ScriptedModel {
    pub fn new(snapshots: Vec<SuggestionSnapshot>, step_delay: Duration) -> Self {
        Self { snapshots, step_delay }
    }

    /// A three-meal day filling in over four snapshots, shaped like real model
    /// output (names with emoji, store product links, ballpark macros).
    pub fn demo() -> Self {
        let script = [
            r#"[{"meal":"🍳 Protein Breakfast Scramble"}]"#,
            r#"[{"meal":"🍳 Protein Breakfast Scramble",
                 "items":[{"name":"🥚 Eggs, dozen","url":"https://www.target.com/s?searchTerm=eggs+dozen"},
                          {"name":"🥬 Baby spinach","url":"https://www.target.com/s?searchTerm=baby+spinach"},
                          {"name":"🧀 Shredded cheddar","url":"https://www.target.com/s?searchTerm=shredded+cheddar"}],
                 "proteinGrams":38,"calories":450,"estimatedCost":7.5},
                {"meal":"🥗 Grilled Chicken Power Bowl"}]"#,
            r#"[{"meal":"🍳 Protein Breakfast Scramble",
                 "items":[{"name":"🥚 Eggs, dozen","url":"https://www.target.com/s?searchTerm=eggs+dozen"},
                          {"name":"🥬 Baby spinach","url":"https://www.target.com/s?searchTerm=baby+spinach"},
                          {"name":"🧀 Shredded cheddar","url":"https://www.target.com/s?searchTerm=shredded+cheddar"}],
                 "proteinGrams":38,"calories":450,"estimatedCost":7.5},
                {"meal":"🥗 Grilled Chicken Power Bowl",
                 "items":[{"name":"🍗 Chicken breast, 1 lb","url":"https://www.target.com/s?searchTerm=chicken+breast"},
                          {"name":"🍚 Brown rice","url":"https://www.target.com/s?searchTerm=brown+rice"},
                          {"name":"🥦 Broccoli crowns","url":"https://www.target.com/s?searchTerm=broccoli"},
                          {"name":"🫒 Olive oil","url":"https://www.target.com/s?searchTerm=olive+oil"}],
                 "proteinGrams":52,"calories":620,"estimatedCost":11.25},
                {"meal":"🐟 Baked Salmon Dinner"}]"#,
            r#"[{"meal":"🍳 Protein Breakfast Scramble",
                 "items":[{"name":"🥚 Eggs, dozen","url":"https://www.target.com/s?searchTerm=eggs+dozen"},
                          {"name":"🥬 Baby spinach","url":"https://www.target.com/s?searchTerm=baby+spinach"},
                          {"name":"🧀 Shredded cheddar","url":"https://www.target.com/s?searchTerm=shredded+cheddar"}],
                 "proteinGrams":38,"calories":450,"estimatedCost":7.5,"isFavorited":false},
                {"meal":"🥗 Grilled Chicken Power Bowl",
                 "items":[{"name":"🍗 Chicken breast, 1 lb","url":"https://www.target.com/s?searchTerm=chicken+breast"},
                          {"name":"🍚 Brown rice","url":"https://www.target.com/s?searchTerm=brown+rice"},
                          {"name":"🥦 Broccoli crowns","url":"https://www.target.com/s?searchTerm=broccoli"},
                          {"name":"🫒 Olive oil","url":"https://www.target.com/s?searchTerm=olive+oil"}],
                 "proteinGrams":52,"calories":620,"estimatedCost":11.25,"isFavorited":false},
                {"meal":"🐟 Baked Salmon Dinner",
                 "items":[{"name":"🐟 Atlantic salmon fillet","url":"https://www.target.com/s?searchTerm=salmon+fillet"},
                          {"name":"🥔 Baby potatoes","url":"https://www.target.com/s?searchTerm=baby+potatoes"},
                          {"name":"🥬 Asparagus bunch","url":"https://www.target.com/s?searchTerm=asparagus"}],
                 "proteinGrams":45,"calories":580,"estimatedCost":13.0,"isFavorited":false}]"#,
        ];
        let snapshots = script
            .iter()
            .map(|json| serde_json::from_str(json).expect("demo script is valid json"))
            .collect();
        Self::new(snapshots, Duration::from_millis(400))
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn stream_structured(&self, request: StructuredRequest) -> anyhow::Result<SuggestionStream> {
        debug!(prompt = %request.prompt, snapshots = self.snapshots.len(), "replaying scripted generation");
        let delay = self.step_delay;
        let stream = futures::stream::iter(self.snapshots.clone())
            .then(move |snapshot| async move {
                tokio::time::sleep(delay).await;
                Ok(snapshot)
            })
            .boxed();
        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_script_streams_cumulative_snapshots() {
        let model = ScriptedModel {
            step_delay: Duration::ZERO,
            ..ScriptedModel::demo()
        };
        let request = StructuredRequest {
            instructions: String::new(),
            prompt: "Plan 3 meals".into(),
            schema: String::new(),
        };

        let mut stream = model.stream_structured(request).await.expect("stream opens");
        let mut last = Vec::new();
        let mut count = 0usize;
        while let Some(snapshot) = stream.next().await {
            last = snapshot.expect("scripted snapshots never fail");
            count += 1;
        }

        assert_eq!(count, 4);
        assert_eq!(last.len(), 3);
        assert!(last.iter().all(|s| s.meal.is_some() && s.items.is_some()));
        assert!(last.iter().all(|s| s.is_favorited == Some(false)));
    }
}
