pub mod schema;
pub mod scripted;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::plans::types::PartialGrocerySuggestion;

/// One cumulative snapshot of the in-progress suggestion set. Each element the
/// model emits is a full replacement for the previous one, never a delta.
pub type SuggestionSnapshot = Vec<PartialGrocerySuggestion>;

pub type SuggestionStream = BoxStream<'static, anyhow::Result<SuggestionSnapshot>>;

/// Everything one generation call hands the model: the instruction block, the
/// short directive prompt, and the rendered target-schema description.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub instructions: String,
    pub prompt: String,
    pub schema: String,
}

/// The device's generative-model runtime, treated as an opaque capability:
/// given instructions and a target schema it returns a finite stream of
/// progressively completing structured snapshots.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn stream_structured(&self, request: StructuredRequest) -> anyhow::Result<SuggestionStream>;
}
