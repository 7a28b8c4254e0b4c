use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub favorites_path: String,
    pub default_meal_count: u32,
    pub generation_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            favorites_path: std::env::var("FAVORITES_PATH")
                .unwrap_or_else(|_| "favorites.json".into()),
            default_meal_count: std::env::var("DEFAULT_MEAL_COUNT")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(3),
            generation_timeout_secs: std::env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60),
        })
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }
}
