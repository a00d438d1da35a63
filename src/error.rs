use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use crate::models::ErrorResponse;
use crate::services::PostgresError;

/// Failures surfaced by the recommendation pipeline
#[derive(Debug, Error)]
pub enum RecommendationError {
    /// Malformed request criteria; reported to the caller as-is
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),

    /// The candidate store could not be reached or queried
    #[error("Candidate store unavailable: {0}")]
    StoreUnavailable(String),
}

impl RecommendationError {
    pub fn code(&self) -> &'static str {
        match self {
            RecommendationError::InvalidCriteria(_) => "invalid_criteria",
            RecommendationError::StoreUnavailable(_) => "service_unavailable",
        }
    }
}

impl From<PostgresError> for RecommendationError {
    fn from(err: PostgresError) -> Self {
        RecommendationError::StoreUnavailable(err.to_string())
    }
}

impl From<validator::ValidationErrors> for RecommendationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RecommendationError::InvalidCriteria(errors.to_string())
    }
}

impl ResponseError for RecommendationError {
    fn status_code(&self) -> StatusCode {
        match self {
            RecommendationError::InvalidCriteria(_) => StatusCode::BAD_REQUEST,
            RecommendationError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let invalid = RecommendationError::InvalidCriteria("bad budget".to_string());
        let down = RecommendationError::StoreUnavailable("timeout".to_string());

        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(down.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(down.code(), "service_unavailable");
    }
}
