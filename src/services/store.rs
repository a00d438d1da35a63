use async_trait::async_trait;
use std::collections::HashSet;
use crate::models::{Candidate, CandidateKind, FilterCriteria};
use crate::services::postgres::{PostgresClient, PostgresError};

/// Source of candidate snapshots and listing status for the handlers
///
/// Implementations must be Send + Sync; one instance is shared by every worker.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Candidates of the requested kind, pre-filtered on budget overlap
    async fn fetch_candidates(&self, criteria: &FilterCriteria) -> Result<Vec<Candidate>, PostgresError>;

    /// Which of `ids` are approved, bookable listings
    async fn bookable_ids(
        &self,
        kind: CandidateKind,
        ids: &[String],
    ) -> Result<HashSet<String>, PostgresError>;

    async fn health_check(&self) -> Result<bool, PostgresError>;
}

#[async_trait]
impl CandidateStore for PostgresClient {
    async fn fetch_candidates(&self, criteria: &FilterCriteria) -> Result<Vec<Candidate>, PostgresError> {
        PostgresClient::fetch_candidates(self, criteria).await
    }

    async fn bookable_ids(
        &self,
        kind: CandidateKind,
        ids: &[String],
    ) -> Result<HashSet<String>, PostgresError> {
        PostgresClient::bookable_ids(self, kind, ids).await
    }

    async fn health_check(&self) -> Result<bool, PostgresError> {
        PostgresClient::health_check(self).await
    }
}
