//! Collaborator seams. The engine depends on these, never on concrete
//! backends; implementations are selected at startup and injected.

mod classifier;
mod clock;
mod config_store;
mod repository;
mod vector;

pub use classifier::IQueryClassifier;
pub use clock::{IClock, SystemClock};
pub use config_store::IConfigStore;
pub use repository::IGraphRepository;
pub use vector::IVectorSearchProvider;
