/// Configuration-store errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load search config: {reason}")]
    LoadFailed { reason: String },

    #[error("failed to parse search config: {reason}")]
    ParseFailed { reason: String },

    #[error("negative fusion weight for {signal}: {value}")]
    NegativeWeight { signal: &'static str, value: f64 },
}
