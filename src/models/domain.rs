use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of listing a recommendation is made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Accommodation,
    Guide,
}

impl CandidateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateKind::Accommodation => "accommodation",
            CandidateKind::Guide => "guide",
        }
    }
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Where a listing is, at district (city) and province granularity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, alias = "city")]
    pub district: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
}

/// Nightly or daily price range; a fixed price has `min == max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn fixed(price: f64) -> Self {
        Self { min: price, max: price }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Attributes specific to an accommodation listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccommodationProfile {
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "travel_styles", alias = "travelStyles", default)]
    pub travel_styles: Vec<String>,
    #[serde(rename = "max_group_size", alias = "maxGroupSize", default)]
    pub max_group_size: Option<u32>,
}

/// Attributes specific to a local guide
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideProfile {
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateProfile {
    Accommodation(AccommodationProfile),
    Guide(GuideProfile),
}

/// A listing eligible for recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub price: Option<PriceRange>,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Whether the entry maps to a bookable listing on the platform
    #[serde(rename = "in_system", alias = "inSystem", default)]
    pub in_system: bool,
    #[serde(flatten)]
    pub profile: CandidateProfile,
}

impl Candidate {
    pub fn kind(&self) -> CandidateKind {
        match self.profile {
            CandidateProfile::Accommodation(_) => CandidateKind::Accommodation,
            CandidateProfile::Guide(_) => CandidateKind::Guide,
        }
    }
}

/// Ranked recommendation with the reasons behind its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
    pub reasons: Vec<String>,
    pub rank: usize,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub budget_fit: f64,
    pub preferences: f64,
    pub travel_style: f64,
    pub rating: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            budget_fit: 0.30,
            preferences: 0.30,
            travel_style: 0.20,
            rating: 0.20,
        }
    }
}

/// Everything the scoring stage needs besides the candidate and criteria
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    /// Rating value (0-1) assumed for unrated candidates
    pub unrated_score: f64,
    /// Minimum axis value that produces a reason
    pub reason_threshold: f64,
    /// Minimum rating out of 5 that produces a "highly rated" reason
    pub high_rating: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            unrated_score: 0.5,
            reason_threshold: 0.5,
            high_rating: 4.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_range_orders_bounds() {
        let range = PriceRange::new(3000.0, 1000.0);
        assert_eq!(range.min, 1000.0);
        assert_eq!(range.max, 3000.0);
        assert_eq!(range.midpoint(), 2000.0);
    }

    #[test]
    fn test_candidate_json_shape() {
        let json = r#"{
            "id": "g-1",
            "name": "Somchai",
            "location": {"city": "Chiang Mai", "province": "Chiang Mai"},
            "price": {"min": 1500, "max": 1500},
            "rating": 4.6,
            "kind": "guide",
            "languages": ["thai", "english"],
            "gender": "male"
        }"#;

        let candidate: Candidate = serde_json::from_str(json).unwrap();

        assert_eq!(candidate.kind(), CandidateKind::Guide);
        assert_eq!(candidate.location.district.as_deref(), Some("Chiang Mai"));
        assert!(!candidate.in_system);
        match candidate.profile {
            CandidateProfile::Guide(ref guide) => {
                assert_eq!(guide.gender, Some(Gender::Male));
                assert!(guide.expertise.is_empty());
            }
            _ => panic!("expected guide profile"),
        }

        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["kind"], "guide");
        assert_eq!(value["in_system"], false);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = ScoringWeights::default();
        let sum = w.budget_fit + w.preferences + w.travel_style + w.rating;
        assert!((sum - 1.0).abs() < 1e-9);
    }
}
