// Core algorithm exports
pub mod enrichment;
pub mod filters;
pub mod ranking;
pub mod recommender;
pub mod scoring;

pub use enrichment::{candidate_ids, mark_in_system};
pub use filters::{applied_filters, filter_candidates, passes_hard_constraints};
pub use ranking::rank;
pub use recommender::{RecommendationResult, Recommender};
pub use scoring::score_candidate;
