//! Error taxonomy for the Lattice workspace.
//!
//! One enum per subsystem, aggregated into [`LatticeError`].

mod cache_error;
mod config_error;
mod filter_error;
mod search_error;

pub use cache_error::CacheError;
pub use config_error::ConfigError;
pub use filter_error::FilterError;
pub use search_error::SearchError;

/// Convenience alias used across the workspace.
pub type LatticeResult<T> = Result<T, LatticeError>;

/// Top-level error aggregating every subsystem.
#[derive(Debug, thiserror::Error)]
pub enum LatticeError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("repository error: {reason}")]
    Repository { reason: String },
}

impl LatticeError {
    /// Shorthand for repository-layer failures surfaced by collaborators.
    pub fn repository(reason: impl Into<String>) -> Self {
        Self::Repository {
            reason: reason.into(),
        }
    }
}
