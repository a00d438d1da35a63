use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tracing::Instrument;
use validator::Validate;
use crate::config::RecommendationSettings;
use crate::core::{candidate_ids, mark_in_system, Recommender};
use crate::error::RecommendationError;
use crate::models::{
    AccommodationRecommendationRequest, FilterCriteria, GuideRecommendationRequest,
    HealthResponse, RecommendationResponse,
};
use crate::services::CandidateStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CandidateStore>,
    pub recommender: Recommender,
    pub limits: RecommendationSettings,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations/accommodations", web::post().to(recommend_accommodations))
        .route("/recommendations/guides", web::post().to(recommend_guides));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Accommodation recommendations
///
/// POST /api/recommendations/accommodations
///
/// Request body:
/// ```json
/// {
///   "budget_min": 1000,
///   "budget_max": 5000,
///   "required_amenities": ["wifi"],
///   "interests": ["beach"],
///   "travel_style": "family",
///   "district": "Hua Hin",
///   "province": "Prachuap Khiri Khan",
///   "city_only": false,
///   "group_size": 4,
///   "top_k": 10
/// }
/// ```
async fn recommend_accommodations(
    state: web::Data<AppState>,
    req: web::Json<AccommodationRecommendationRequest>,
) -> Result<HttpResponse, RecommendationError> {
    req.validate()?;
    let top_k = resolve_top_k(req.top_k, &state.limits)?;

    let response = run_pipeline(&state, req.criteria(), top_k).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Guide recommendations
///
/// POST /api/recommendations/guides
///
/// Request body:
/// ```json
/// {
///   "budget_min": 800,
///   "budget_max": 2500,
///   "languages": ["english", "thai"],
///   "expertise": ["history", "street food"],
///   "province": "Chiang Mai",
///   "gender_preference": "female",
///   "top_k": 5
/// }
/// ```
async fn recommend_guides(
    state: web::Data<AppState>,
    req: web::Json<GuideRecommendationRequest>,
) -> Result<HttpResponse, RecommendationError> {
    req.validate()?;
    let top_k = resolve_top_k(req.top_k, &state.limits)?;

    let response = run_pipeline(&state, req.criteria(), top_k).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Fetch, recommend and enrich for one request
async fn run_pipeline(
    state: &AppState,
    criteria: FilterCriteria,
    top_k: usize,
) -> Result<RecommendationResponse, RecommendationError> {
    let request_id = uuid::Uuid::new_v4();
    let kind = criteria.kind();
    let span = tracing::info_span!("recommend", %request_id, %kind, top_k);

    async move {
        // Reject bad criteria before touching the store
        criteria.validate()?;

        let candidates = state.store.fetch_candidates(&criteria).await.map_err(|e| {
            tracing::error!("Failed to fetch {} candidates: {}", kind, e);
            RecommendationError::from(e)
        })?;

        let mut result = state.recommender.recommend(&criteria, candidates, top_k)?;

        let ids = candidate_ids(&result.recommendations);
        match state.store.bookable_ids(kind, &ids).await {
            Ok(bookable) => mark_in_system(&mut result.recommendations, &bookable),
            Err(e) => tracing::warn!("In-system lookup failed, keeping catalog flags: {}", e),
        }

        tracing::info!(
            "Returning {} {} recommendations (from {} matching candidates)",
            result.recommendations.len(),
            kind,
            result.total_candidates
        );

        Ok::<_, RecommendationError>(RecommendationResponse::from(result))
    }
    .instrument(span)
    .await
}

/// Apply the configured default and ceiling; out-of-range values are errors
pub fn resolve_top_k(
    requested: Option<i64>,
    limits: &RecommendationSettings,
) -> Result<usize, RecommendationError> {
    let Some(requested) = requested else {
        return Ok(limits.default_top_k);
    };

    if requested <= 0 {
        return Err(RecommendationError::InvalidCriteria(
            "top_k must be a positive integer".to_string(),
        ));
    }

    match usize::try_from(requested) {
        Ok(top_k) if top_k <= limits.max_top_k => Ok(top_k),
        _ => Err(RecommendationError::InvalidCriteria(format!(
            "top_k must not exceed {}",
            limits.max_top_k
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_top_k() {
        let limits = RecommendationSettings {
            default_top_k: 10,
            max_top_k: 50,
        };

        assert_eq!(resolve_top_k(None, &limits).unwrap(), 10);
        assert_eq!(resolve_top_k(Some(3), &limits).unwrap(), 3);
        assert!(resolve_top_k(Some(0), &limits).is_err());
        assert!(resolve_top_k(Some(-4), &limits).is_err());
        assert!(resolve_top_k(Some(51), &limits).is_err());
    }
}
