use std::collections::HashSet;
use crate::models::ScoredCandidate;

/// Flag each ranked recommendation that maps to a bookable listing
///
/// Runs after ranking; it never changes order or scores.
pub fn mark_in_system(recommendations: &mut [ScoredCandidate], bookable_ids: &HashSet<String>) {
    for entry in recommendations.iter_mut() {
        entry.candidate.in_system = bookable_ids.contains(&entry.candidate.id);
    }
}

/// Ids to look up for enrichment, in rank order
pub fn candidate_ids(recommendations: &[ScoredCandidate]) -> Vec<String> {
    recommendations
        .iter()
        .map(|entry| entry.candidate.id.clone())
        .collect()
}
