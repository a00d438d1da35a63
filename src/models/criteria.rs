use serde::{Deserialize, Serialize};
use crate::error::RecommendationError;
use crate::models::domain::{CandidateKind, Gender};

/// Inclusive budget window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

impl BudgetRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn half_width(&self) -> f64 {
        (self.max - self.min) / 2.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationFilter {
    pub district: Option<String>,
    pub province: Option<String>,
    /// Only accept an exact district match
    pub city_only: bool,
}

impl LocationFilter {
    pub fn is_empty(&self) -> bool {
        self.district.is_none() && self.province.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccommodationCriteria {
    pub budget: BudgetRange,
    pub required_amenities: Vec<String>,
    pub interests: Vec<String>,
    pub travel_style: Option<String>,
    pub location: LocationFilter,
    pub group_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideCriteria {
    pub budget: BudgetRange,
    pub languages: Vec<String>,
    pub expertise: Vec<String>,
    pub location: LocationFilter,
    pub gender_preference: Option<Gender>,
}

/// Per-request recommendation criteria, one variant per candidate kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterCriteria {
    Accommodation(AccommodationCriteria),
    Guide(GuideCriteria),
}

impl FilterCriteria {
    pub fn kind(&self) -> CandidateKind {
        match self {
            FilterCriteria::Accommodation(_) => CandidateKind::Accommodation,
            FilterCriteria::Guide(_) => CandidateKind::Guide,
        }
    }

    pub fn budget(&self) -> &BudgetRange {
        match self {
            FilterCriteria::Accommodation(c) => &c.budget,
            FilterCriteria::Guide(c) => &c.budget,
        }
    }

    pub fn location(&self) -> &LocationFilter {
        match self {
            FilterCriteria::Accommodation(c) => &c.location,
            FilterCriteria::Guide(c) => &c.location,
        }
    }

    /// Attributes every candidate must carry (amenities or languages)
    pub fn required(&self) -> &[String] {
        match self {
            FilterCriteria::Accommodation(c) => &c.required_amenities,
            FilterCriteria::Guide(c) => &c.languages,
        }
    }

    /// Soft preferences that only influence the score
    pub fn soft_preferences(&self) -> &[String] {
        match self {
            FilterCriteria::Accommodation(c) => &c.interests,
            FilterCriteria::Guide(c) => &c.expertise,
        }
    }

    pub fn travel_style(&self) -> Option<&str> {
        match self {
            FilterCriteria::Accommodation(c) => c.travel_style.as_deref(),
            FilterCriteria::Guide(_) => None,
        }
    }

    /// Reject malformed criteria; nothing is coerced
    pub fn validate(&self) -> Result<(), RecommendationError> {
        let budget = self.budget();
        if !budget.min.is_finite() || !budget.max.is_finite() {
            return Err(RecommendationError::InvalidCriteria(
                "budget bounds must be finite numbers".to_string(),
            ));
        }
        if budget.min < 0.0 {
            return Err(RecommendationError::InvalidCriteria(
                "budget_min must not be negative".to_string(),
            ));
        }
        if budget.min > budget.max {
            return Err(RecommendationError::InvalidCriteria(format!(
                "budget_min ({}) must not exceed budget_max ({})",
                budget.min, budget.max
            )));
        }

        match self {
            FilterCriteria::Accommodation(c) if c.group_size == 0 => {
                Err(RecommendationError::InvalidCriteria(
                    "group_size must be at least 1".to_string(),
                ))
            }
            FilterCriteria::Guide(c) if c.languages.iter().all(|l| l.trim().is_empty()) => {
                Err(RecommendationError::InvalidCriteria(
                    "at least one language must be selected".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide_criteria(languages: Vec<&str>) -> FilterCriteria {
        FilterCriteria::Guide(GuideCriteria {
            budget: BudgetRange::new(500.0, 2000.0),
            languages: languages.into_iter().map(String::from).collect(),
            expertise: vec![],
            location: LocationFilter::default(),
            gender_preference: None,
        })
    }

    #[test]
    fn test_inverted_budget_rejected() {
        let criteria = FilterCriteria::Accommodation(AccommodationCriteria {
            budget: BudgetRange::new(5000.0, 1000.0),
            required_amenities: vec![],
            interests: vec![],
            travel_style: None,
            location: LocationFilter::default(),
            group_size: 2,
        });

        let err = criteria.validate().unwrap_err();
        assert!(matches!(err, RecommendationError::InvalidCriteria(_)));
    }

    #[test]
    fn test_guide_requires_language() {
        assert!(guide_criteria(vec![]).validate().is_err());
        assert!(guide_criteria(vec!["  "]).validate().is_err());
        assert!(guide_criteria(vec!["english"]).validate().is_ok());
    }

    #[test]
    fn test_accessors_follow_variant() {
        let criteria = guide_criteria(vec!["thai"]);
        assert_eq!(criteria.kind(), CandidateKind::Guide);
        assert_eq!(criteria.required(), &["thai".to_string()]);
        assert!(criteria.travel_style().is_none());
        assert_eq!(criteria.budget().center(), 1250.0);
    }
}
