/// Index-cache errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("corrupted cache entry for key {key}: {details}")]
    CorruptedEntry { key: String, details: String },

    #[error("index build failed for key {key}: {reason}")]
    BuildFailed { key: String, reason: String },
}
