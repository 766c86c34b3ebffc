use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub search_debounce: Duration,
    pub search_result_limit: usize,
}

impl EngineConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let debounce_ms = env::var("SEARCH_DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(300);
        let search_result_limit = env::var("SEARCH_RESULT_LIMIT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(100);
        Ok(Self {
            search_debounce: Duration::from_millis(debounce_ms),
            search_result_limit,
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(300),
            search_result_limit: 100,
        }
    }
}
