use std::collections::HashSet;
use crate::core::filters::normalize;
use crate::models::{
    BudgetRange, Candidate, CandidateProfile, FilterCriteria, PriceRange, ScoringConfig,
};

/// Value given to a travel style that only partially matches
const PARTIAL_STYLE_MATCH: f64 = 0.5;

/// One scored dimension of a candidate
#[derive(Debug)]
struct Axis {
    weight: f64,
    value: f64,
    /// Criteria axes count towards the degenerate-request check; rating does not
    criterion: bool,
    reason: Option<String>,
}

/// Calculate a match score (0-1) and the reasons behind it
///
/// Scoring formula, over the axes that apply to the request:
/// score = sum(weight * value) / sum(weight)
///
/// - budget fit: price near the middle of the budget window scores higher
/// - preferences: share of requested interests/expertise the candidate offers
/// - travel style: exact or partial style match (accommodations)
/// - rating: rating / 5, unrated candidates get a neutral value
///
/// When no criteria axis carries weight the score is the rating value alone.
pub fn score_candidate(
    candidate: &Candidate,
    criteria: &FilterCriteria,
    config: &ScoringConfig,
) -> (f64, Vec<String>) {
    let weights = &config.weights;
    let mut axes = Vec::with_capacity(4);

    // Budget fit
    let fit = budget_fit(candidate.price.as_ref(), criteria.budget());
    axes.push(Axis {
        weight: weights.budget_fit,
        value: fit,
        criterion: true,
        reason: (fit >= config.reason_threshold).then(|| "Within your budget range".to_string()),
    });

    // Soft preferences
    let requested = criteria.soft_preferences();
    if requested.iter().any(|p| !p.trim().is_empty()) {
        let (matched, total) = preference_overlap(requested, offered_preferences(candidate));
        let value = matched as f64 / total as f64;
        let label = match criteria {
            FilterCriteria::Accommodation(_) => "interests",
            FilterCriteria::Guide(_) => "expertise areas",
        };
        axes.push(Axis {
            weight: weights.preferences,
            value,
            criterion: true,
            reason: (matched > 0 && value >= config.reason_threshold)
                .then(|| format!("Matches {} of your {} {}", matched, total, label)),
        });
    }

    // Travel style
    if let Some(style) = criteria.travel_style().filter(|s| !s.trim().is_empty()) {
        let value = travel_style_match(style, offered_styles(candidate));
        let reason = if value >= 1.0 {
            Some(format!("Suited to {} travel", style.trim()))
        } else if value > 0.0 && value >= config.reason_threshold {
            Some(format!("Partly suited to {} travel", style.trim()))
        } else {
            None
        };
        axes.push(Axis {
            weight: weights.travel_style,
            value,
            criterion: true,
            reason,
        });
    }

    // Rating
    axes.push(Axis {
        weight: weights.rating,
        value: rating_score(candidate.rating, config.unrated_score),
        criterion: false,
        reason: candidate
            .rating
            .filter(|r| r.is_finite() && *r >= config.high_rating)
            .map(|r| format!("Highly rated: {:.1}/5", r.min(5.0))),
    });

    let criteria_weight: f64 = axes
        .iter()
        .filter(|a| a.criterion)
        .map(|a| a.weight.max(0.0))
        .sum();

    let score = if criteria_weight <= 0.0 {
        rating_score(candidate.rating, config.unrated_score)
    } else {
        let total_weight: f64 = axes.iter().map(|a| a.weight.max(0.0)).sum();
        let weighted: f64 = axes.iter().map(|a| a.weight.max(0.0) * a.value).sum();
        weighted / total_weight
    };

    // Reasons follow axis weight, heaviest first; equal weights keep axis order.
    // Zero-weight axes contribute nothing and explain nothing.
    axes.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    let reasons = axes
        .into_iter()
        .filter(|a| a.weight > 0.0)
        .filter_map(|a| a.reason)
        .collect();

    (sanitise(score), reasons)
}

/// Clamp to 0-1, mapping non-finite values to 0
#[inline]
fn sanitise(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Calculate budget fit (0-1)
/// Linear falloff from the centre of the budget window to its edges
#[inline]
pub fn budget_fit(price: Option<&PriceRange>, budget: &BudgetRange) -> f64 {
    let Some(price) = price else {
        return 0.0;
    };

    let half = budget.half_width();
    if half <= 0.0 {
        return 1.0;
    }

    let point = price.midpoint().clamp(budget.min, budget.max);
    let deviation = (point - budget.center()).abs();

    1.0 - (deviation / half).min(1.0)
}

/// Count how many requested preferences the candidate offers
///
/// Returns (matched, requested) with blank and duplicate requests ignored.
pub fn preference_overlap(requested: &[String], offered: &[String]) -> (usize, usize) {
    let offered: HashSet<String> = offered.iter().map(|o| normalize(o)).collect();
    let requested: HashSet<String> = requested
        .iter()
        .map(|r| normalize(r))
        .filter(|r| !r.is_empty())
        .collect();

    let matched = requested.iter().filter(|r| offered.contains(*r)).count();
    (matched, requested.len())
}

/// Calculate travel style score (0-1)
/// Exact match scores 1, one style containing the other scores half
pub fn travel_style_match(requested: &str, offered: &[String]) -> f64 {
    let wanted = normalize(requested);
    if wanted.is_empty() {
        return 0.0;
    }

    let mut best: f64 = 0.0;
    for style in offered.iter().map(|s| normalize(s)).filter(|s| !s.is_empty()) {
        if style == wanted {
            return 1.0;
        }
        if style.contains(&wanted) || wanted.contains(&style) {
            best = best.max(PARTIAL_STYLE_MATCH);
        }
    }
    best
}

/// Normalised rating (0-1); unrated candidates get `unrated`
#[inline]
pub fn rating_score(rating: Option<f64>, unrated: f64) -> f64 {
    match rating.filter(|r| r.is_finite()) {
        Some(r) => (r / 5.0).clamp(0.0, 1.0),
        None => unrated.clamp(0.0, 1.0),
    }
}

fn offered_preferences(candidate: &Candidate) -> &[String] {
    match &candidate.profile {
        CandidateProfile::Accommodation(p) => &p.interests,
        CandidateProfile::Guide(p) => &p.expertise,
    }
}

fn offered_styles(candidate: &Candidate) -> &[String] {
    match &candidate.profile {
        CandidateProfile::Accommodation(p) => &p.travel_styles,
        CandidateProfile::Guide(_) => &[],
    }
}
