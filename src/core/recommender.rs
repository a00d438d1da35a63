use crate::core::{
    filters::{applied_filters, filter_candidates},
    ranking::rank,
    scoring::score_candidate,
};
use crate::error::RecommendationError;
use crate::models::{Candidate, FilterCriteria, ScoredCandidate, ScoringConfig};

/// Result of the recommendation process
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationResult {
    pub recommendations: Vec<ScoredCandidate>,
    /// Count after filtering, before truncation
    pub total_candidates: usize,
    pub filters_applied: Vec<String>,
    /// Set when nothing passed filtering
    pub message: Option<String>,
}

/// Main recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Criteria validation
/// 2. Hard-constraint filtering
/// 3. Weighted scoring with reasons
/// 4. Ranking and top-k truncation
///
/// Every stage is a pure function of its inputs, so a `Recommender` can be
/// shared freely between workers.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    config: ScoringConfig,
}

impl Recommender {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Recommend candidates for a request
    ///
    /// # Arguments
    /// * `criteria` - Validated-or-not criteria for one request
    /// * `candidates` - Snapshot fetched from the store for this request
    /// * `top_k` - Maximum number of recommendations to return
    ///
    /// # Errors
    /// `InvalidCriteria` for malformed criteria or a zero `top_k`. An empty
    /// result is not an error.
    pub fn recommend(
        &self,
        criteria: &FilterCriteria,
        candidates: Vec<Candidate>,
        top_k: usize,
    ) -> Result<RecommendationResult, RecommendationError> {
        criteria.validate()?;
        if top_k == 0 {
            return Err(RecommendationError::InvalidCriteria(
                "top_k must be a positive integer".to_string(),
            ));
        }

        let fetched = candidates.len();
        let filtered = filter_candidates(candidates, criteria);
        let total_candidates = filtered.len();

        tracing::debug!(
            "{} of {} {} candidates passed filtering",
            total_candidates,
            fetched,
            criteria.kind()
        );

        let scored: Vec<ScoredCandidate> = filtered
            .into_iter()
            .map(|candidate| {
                let (score, reasons) = score_candidate(&candidate, criteria, &self.config);
                ScoredCandidate {
                    candidate,
                    score,
                    reasons,
                    rank: 0,
                }
            })
            .collect();

        let recommendations = rank(scored, top_k)?;
        let message = recommendations.is_empty().then(|| no_match_message(criteria));

        Ok(RecommendationResult {
            recommendations,
            total_candidates,
            filters_applied: applied_filters(criteria),
            message,
        })
    }
}

fn no_match_message(criteria: &FilterCriteria) -> String {
    let (noun, required) = match criteria {
        FilterCriteria::Accommodation(_) => ("accommodations", "required amenities"),
        FilterCriteria::Guide(_) => ("guides", "languages or gender preference"),
    };
    format!(
        "No {} match your filters. Try widening your budget, relaxing the location, or removing some {}.",
        noun, required
    )
}
