//! Tour Match - Recommendation service for accommodations and local guides
//!
//! This library provides the recommendation engine behind the marketplace's
//! `/api/recommendations/*` endpoints: hard-constraint filtering, weighted
//! scoring with human-readable reasons, and deterministic top-k ranking.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Recommender, RecommendationResult};
pub use error::RecommendationError;
pub use models::{
    Candidate, FilterCriteria, RecommendationResponse, ScoredCandidate, ScoringConfig,
    ScoringWeights,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let recommender = Recommender::with_default_config();
        assert_eq!(recommender.config().weights, ScoringWeights::default());
    }
}
