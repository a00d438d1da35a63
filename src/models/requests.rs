use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::criteria::{
    AccommodationCriteria, BudgetRange, FilterCriteria, GuideCriteria, LocationFilter,
};
use crate::models::domain::Gender;

/// Request for accommodation recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_accommodation_budget"))]
pub struct AccommodationRecommendationRequest {
    #[validate(range(min = 0.0))]
    #[serde(alias = "budgetMin")]
    pub budget_min: f64,
    #[validate(range(min = 0.0))]
    #[serde(alias = "budgetMax")]
    pub budget_max: f64,
    #[serde(alias = "requiredAmenities", alias = "amenities", default)]
    pub required_amenities: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(alias = "travelStyle", default)]
    pub travel_style: Option<String>,
    #[serde(alias = "city", default)]
    pub district: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(alias = "cityOnly", default)]
    pub city_only: bool,
    #[validate(range(min = 1))]
    #[serde(alias = "groupSize", default = "default_group_size")]
    pub group_size: u32,
    #[validate(range(min = 1))]
    #[serde(alias = "topK", default)]
    pub top_k: Option<i64>,
}

fn default_group_size() -> u32 {
    1
}

impl AccommodationRecommendationRequest {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::Accommodation(AccommodationCriteria {
            budget: BudgetRange::new(self.budget_min, self.budget_max),
            required_amenities: self.required_amenities.clone(),
            interests: self.interests.clone(),
            travel_style: non_blank(&self.travel_style),
            location: LocationFilter {
                district: non_blank(&self.district),
                province: non_blank(&self.province),
                city_only: self.city_only,
            },
            group_size: self.group_size,
        })
    }
}

/// Request for guide recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_guide_budget"))]
pub struct GuideRecommendationRequest {
    #[validate(range(min = 0.0))]
    #[serde(alias = "budgetMin")]
    pub budget_min: f64,
    #[validate(range(min = 0.0))]
    #[serde(alias = "budgetMax")]
    pub budget_max: f64,
    #[validate(length(min = 1, message = "at least one language must be selected"))]
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(alias = "city", default)]
    pub district: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(alias = "cityOnly", default)]
    pub city_only: bool,
    #[serde(alias = "genderPreference", default)]
    pub gender_preference: Option<Gender>,
    #[validate(range(min = 1))]
    #[serde(alias = "topK", default)]
    pub top_k: Option<i64>,
}

impl GuideRecommendationRequest {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::Guide(GuideCriteria {
            budget: BudgetRange::new(self.budget_min, self.budget_max),
            languages: self.languages.clone(),
            expertise: self.expertise.clone(),
            location: LocationFilter {
                district: non_blank(&self.district),
                province: non_blank(&self.province),
                city_only: self.city_only,
            },
            gender_preference: self.gender_preference,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn check_budget(min: f64, max: f64) -> Result<(), ValidationError> {
    if min > max {
        let mut err = ValidationError::new("budget_range");
        err.message = Some("budget_min must not exceed budget_max".into());
        return Err(err);
    }
    Ok(())
}

fn validate_accommodation_budget(
    req: &AccommodationRecommendationRequest,
) -> Result<(), ValidationError> {
    check_budget(req.budget_min, req.budget_max)
}

fn validate_guide_budget(req: &GuideRecommendationRequest) -> Result<(), ValidationError> {
    check_budget(req.budget_min, req.budget_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accommodation_request_defaults() {
        let req: AccommodationRecommendationRequest =
            serde_json::from_str(r#"{"budgetMin": 1000, "budgetMax": 5000}"#).unwrap();

        assert_eq!(req.group_size, 1);
        assert!(!req.city_only);
        assert!(req.top_k.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_inverted_budget_fails_validation() {
        let req: AccommodationRecommendationRequest =
            serde_json::from_str(r#"{"budget_min": 5000, "budget_max": 1000}"#).unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_guide_request_needs_language() {
        let req: GuideRecommendationRequest = serde_json::from_str(
            r#"{"budget_min": 500, "budget_max": 1500, "languages": []}"#,
        )
        .unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_non_positive_top_k_fails_validation() {
        let req: GuideRecommendationRequest = serde_json::from_str(
            r#"{"budget_min": 500, "budget_max": 1500, "languages": ["thai"], "top_k": 0}"#,
        )
        .unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_blank_location_is_dropped() {
        let req: GuideRecommendationRequest = serde_json::from_str(
            r#"{"budget_min": 0, "budget_max": 100, "languages": ["thai"],
                "city": "  ", "province": "Phuket", "genderPreference": "female"}"#,
        )
        .unwrap();

        match req.criteria() {
            FilterCriteria::Guide(c) => {
                assert!(c.location.district.is_none());
                assert_eq!(c.location.province.as_deref(), Some("Phuket"));
                assert_eq!(c.gender_preference, Some(Gender::Female));
            }
            _ => panic!("expected guide criteria"),
        }
    }
}
