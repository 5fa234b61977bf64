//! Query classification and routing.
//!
//! The classifier decides what shape a query is (keyword-like vs.
//! natural-language), the router turns that into a retrieval strategy.

mod heuristic;
mod router;

pub use heuristic::HeuristicClassifier;
pub use router::{route, SearchStrategy};
