use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::favorites::repo::{FavoritesStore, InMemoryFavorites, JsonFileFavorites};
use crate::llm::scripted::ScriptedModel;
use crate::llm::LanguageModel;
use crate::plans::aggregator::StreamAggregator;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub planner: Arc<StreamAggregator>,
    pub favorites: Arc<dyn FavoritesStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let favorites =
            Arc::new(JsonFileFavorites::open(&config.favorites_path).await?) as Arc<dyn FavoritesStore>;

        // The on-device runtime is an external capability; the scripted model
        // stands in for it here.
        let model = Arc::new(ScriptedModel::demo()) as Arc<dyn LanguageModel>;

        let planner = Arc::new(StreamAggregator::new(
            model,
            Arc::clone(&favorites),
            config.generation_timeout(),
        ));

        Ok(Self {
            config,
            planner,
            favorites,
        })
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        model: Arc<dyn LanguageModel>,
        favorites: Arc<dyn FavoritesStore>,
    ) -> Self {
        let planner = Arc::new(StreamAggregator::new(
            model,
            Arc::clone(&favorites),
            config.generation_timeout(),
        ));
        Self {
            config,
            planner,
            favorites,
        }
    }

    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            favorites_path: "unused".into(),
            default_meal_count: 3,
            generation_timeout_secs: 5,
        });
        let model = Arc::new(ScriptedModel::new(Vec::new(), Duration::ZERO)) as Arc<dyn LanguageModel>;
        let favorites = Arc::new(InMemoryFavorites::default()) as Arc<dyn FavoritesStore>;
        Self::from_parts(config, model, favorites)
    }
}
