// Model exports
pub mod criteria;
pub mod domain;
pub mod requests;
pub mod responses;

pub use criteria::{AccommodationCriteria, BudgetRange, FilterCriteria, GuideCriteria, LocationFilter};
pub use domain::{
    AccommodationProfile, Candidate, CandidateKind, CandidateProfile, Gender, GuideProfile,
    Location, PriceRange, ScoredCandidate, ScoringConfig, ScoringWeights,
};
pub use requests::{AccommodationRecommendationRequest, GuideRecommendationRequest};
pub use responses::{ErrorResponse, HealthResponse, RecommendationResponse};
