pub mod heuristic;
pub mod trust;

pub use heuristic::{HeuristicScore, HeuristicScorer, Indicator};
pub use trust::TrustList;
