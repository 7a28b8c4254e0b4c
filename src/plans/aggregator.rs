use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::error::PlanError;
use crate::favorites::repo::FavoritesStore;
use crate::llm::{schema, LanguageModel, StructuredRequest};
use crate::plans::prompt::build_request;
use crate::plans::types::{GrocerySuggestion, PlanPhase, PlanState};
use crate::profile::UserProfile;

/// Drives generation calls and owns the exposed plan state.
///
/// The model emits cumulative snapshots, so every received element overwrites
/// the previous state wholesale. Each `generate` call gets a monotonically
/// increasing sequence number; publishes tagged with a superseded sequence are
/// dropped, so the exposed state never interleaves two calls.
pub struct StreamAggregator {
    model: Arc<dyn LanguageModel>,
    favorites: Arc<dyn FavoritesStore>,
    snapshot_timeout: Duration,
    next_seq: AtomicU64,
    tx: watch::Sender<PlanState>,
}

impl StreamAggregator {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        favorites: Arc<dyn FavoritesStore>,
        snapshot_timeout: Duration,
    ) -> Self {
        Self {
            model,
            favorites,
            snapshot_timeout,
            next_seq: AtomicU64::new(0),
            tx: watch::channel(PlanState::idle()).0,
        }
    }

    pub fn current(&self) -> PlanState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PlanState> {
        self.tx.subscribe()
    }

    /// Run one generation request to a terminal state. A newer call supersedes
    /// this one: its publishes are then discarded and it returns quietly.
    #[instrument(skip(self, profile))]
    pub async fn generate(&self, profile: &UserProfile, meal_count: u32) -> Result<(), PlanError> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish_if_current(seq, |state| {
            state.phase = PlanPhase::Requesting;
            state.suggestions.clear();
            state.error_message = None;
        });

        let (instructions, prompt) = match build_request(profile, meal_count) {
            Ok(parts) => parts,
            Err(err) => {
                warn!(%err, "rejecting generation request");
                self.publish_if_current(seq, |state| {
                    state.phase = PlanPhase::Failed;
                    state.error_message = Some(err.to_string());
                });
                return Err(err);
            }
        };

        let request = StructuredRequest {
            instructions,
            prompt,
            schema: schema::render(),
        };
        let mut stream = match self.model.stream_structured(request).await {
            Ok(stream) => stream,
            Err(e) => {
                error!(error = %e, "model call failed");
                return self.fail(seq);
            }
        };

        let mut received = false;
        loop {
            match tokio::time::timeout(self.snapshot_timeout, stream.next()).await {
                Err(_) => {
                    error!(timeout = ?self.snapshot_timeout, "timed out waiting for snapshot");
                    return self.fail(seq);
                }
                Ok(None) => break,
                Ok(Some(Err(e))) => {
                    error!(error = %e, "snapshot stream failed");
                    return self.fail(seq);
                }
                Ok(Some(Ok(snapshot))) => {
                    received = true;
                    let applied = self.publish_if_current(seq, |state| {
                        state.phase = PlanPhase::Streaming;
                        state.suggestions = snapshot;
                    });
                    if !applied {
                        debug!(seq, "superseded by a newer request");
                        return Ok(());
                    }
                }
            }
        }

        // A stream that closed without a single snapshot is a failed parse.
        if !received {
            warn!("stream ended without snapshots");
            return self.fail(seq);
        }
        self.publish_if_current(seq, |state| state.phase = PlanPhase::Completed);
        info!(seq, "generation completed");
        Ok(())
    }

    /// Flip the transient favorite flag on a suggestion in the current
    /// snapshot. Does not touch the durable store; promotion is separate.
    pub fn toggle_favorited(&self, id: Uuid) -> Option<bool> {
        let mut toggled = None;
        self.tx.send_if_modified(|state| {
            match state.suggestions.iter_mut().find(|s| s.id == id) {
                Some(suggestion) => {
                    let flag = !suggestion.is_favorited.unwrap_or(false);
                    suggestion.is_favorited = Some(flag);
                    toggled = Some(flag);
                    true
                }
                None => false,
            }
        });
        toggled
    }

    /// Promote a suggestion from the latest snapshot into a complete favorite
    /// and append it to the durable store. Repeated promotion appends
    /// duplicates. Returns `None` when the id is not in the current snapshot.
    pub async fn promote_favorite(&self, id: Uuid) -> anyhow::Result<Option<GrocerySuggestion>> {
        let partial = self.tx.borrow().suggestions.iter().find(|s| s.id == id).cloned();
        let Some(partial) = partial else {
            return Ok(None);
        };
        let complete = partial.promote();
        self.favorites.append(complete.clone()).await?;
        info!(suggestion = %complete.id, meal = %complete.meal, "favorited suggestion");
        Ok(Some(complete))
    }

    fn fail(&self, seq: u64) -> Result<(), PlanError> {
        self.publish_if_current(seq, |state| {
            state.phase = PlanPhase::Failed;
            state.suggestions.clear();
            state.error_message = Some(PlanError::GenerationFailed.to_string());
        });
        Err(PlanError::GenerationFailed)
    }

    fn publish_if_current(&self, seq: u64, update: impl FnOnce(&mut PlanState)) -> bool {
        let mut applied = false;
        self.tx.send_if_modified(|state| {
            if seq < state.request_seq {
                return false;
            }
            state.request_seq = seq;
            update(state);
            applied = true;
            true
        });
        applied
    }
}
