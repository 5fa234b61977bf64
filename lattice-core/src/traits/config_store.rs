use crate::config::SearchConfig;
use crate::errors::ConfigError;

/// Key-value store holding the persisted [`SearchConfig`]. Read on every
/// query; a load failure makes the engine fall back to
/// [`SearchConfig::conservative`].
pub trait IConfigStore: Send + Sync {
    fn load(&self) -> Result<SearchConfig, ConfigError>;
}
