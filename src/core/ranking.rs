use std::cmp::Ordering;
use crate::error::RecommendationError;
use crate::models::ScoredCandidate;

/// Sort, truncate to `top_k` and number the results from 1
///
/// Order: score descending, then rating descending (unrated last), then
/// candidate id ascending, so identical input always ranks identically.
pub fn rank(
    mut scored: Vec<ScoredCandidate>,
    top_k: usize,
) -> Result<Vec<ScoredCandidate>, RecommendationError> {
    if top_k == 0 {
        return Err(RecommendationError::InvalidCriteria(
            "top_k must be a positive integer".to_string(),
        ));
    }

    scored.sort_by(compare);
    scored.truncate(top_k);

    for (position, entry) in scored.iter_mut().enumerate() {
        entry.rank = position + 1;
    }

    Ok(scored)
}

/// Ranking order between two scored candidates
pub fn compare(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| rating_key(b).total_cmp(&rating_key(a)))
        .then_with(|| a.candidate.id.cmp(&b.candidate.id))
}

#[inline]
fn rating_key(entry: &ScoredCandidate) -> f64 {
    entry
        .candidate
        .rating
        .filter(|r| r.is_finite())
        .unwrap_or(f64::NEG_INFINITY)
}
