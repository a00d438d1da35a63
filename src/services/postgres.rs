use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use crate::config::{CatalogSettings, DatabaseSettings};
use crate::models::{
    AccommodationProfile, BudgetRange, Candidate, CandidateKind, CandidateProfile, FilterCriteria,
    Gender, GuideProfile, Location, PriceRange,
};

/// Budget overlap pre-filter; a single known bound stands in for a fixed price
const BUDGET_OVERLAP: &str =
    "COALESCE(price_min, price_max) <= $2 AND COALESCE(price_max, price_min) >= $1";

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Read-only PostgreSQL client for the candidate catalog
///
/// Each recommendation request reads its own snapshot; nothing is cached and
/// nothing is written back.
pub struct PostgresClient {
    pool: PgPool,
    catalog: CatalogSettings,
}

impl PostgresClient {
    /// Connect eagerly, failing if the database cannot be reached
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
        catalog: CatalogSettings,
    ) -> Result<Self, PostgresError> {
        check_catalog(&catalog)?;

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool, catalog })
    }

    /// Build a pool that only connects on first use
    pub fn lazy(
        database_url: &str,
        acquire_timeout: Duration,
        catalog: CatalogSettings,
    ) -> Result<Self, PostgresError> {
        check_catalog(&catalog)?;

        let pool = PgPoolOptions::new()
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)?;

        Ok(Self { pool, catalog })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        database: &DatabaseSettings,
        catalog: &CatalogSettings,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL (catalog: {}, {})", catalog.accommodations, catalog.guides);

        Self::new(
            &database.url,
            database.max_connections.unwrap_or(10),
            database.min_connections.unwrap_or(1),
            Duration::from_secs(database.acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(database.idle_timeout_secs.unwrap_or(600)),
            catalog.clone(),
        )
        .await
    }

    /// Fetch the candidate snapshot for one request
    ///
    /// Rows are pre-filtered on budget overlap only; every hard constraint is
    /// re-checked by the filter stage.
    pub async fn fetch_candidates(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<Candidate>, PostgresError> {
        match criteria.kind() {
            CandidateKind::Accommodation => self.fetch_accommodations(criteria.budget()).await,
            CandidateKind::Guide => self.fetch_guides(criteria.budget()).await,
        }
    }

    pub async fn fetch_accommodations(
        &self,
        budget: &BudgetRange,
    ) -> Result<Vec<Candidate>, PostgresError> {
        let query = format!(
            r#"
            SELECT id, name, district, province, price_min, price_max, rating, in_system,
                   amenities, interests, travel_styles, max_group_size
            FROM {}
            WHERE {}
            "#,
            self.catalog.accommodations, BUDGET_OVERLAP
        );

        let rows = sqlx::query(&query)
            .bind(budget.min)
            .bind(budget.max)
            .fetch_all(&self.pool)
            .await?;

        let candidates = rows
            .iter()
            .map(accommodation_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fetched {} accommodation candidates", candidates.len());
        Ok(candidates)
    }

    pub async fn fetch_guides(&self, budget: &BudgetRange) -> Result<Vec<Candidate>, PostgresError> {
        let query = format!(
            r#"
            SELECT id, name, district, province, price_min, price_max, rating, in_system,
                   languages, expertise, gender
            FROM {}
            WHERE {}
            "#,
            self.catalog.guides, BUDGET_OVERLAP
        );

        let rows = sqlx::query(&query)
            .bind(budget.min)
            .bind(budget.max)
            .fetch_all(&self.pool)
            .await?;

        let candidates = rows
            .iter()
            .map(guide_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fetched {} guide candidates", candidates.len());
        Ok(candidates)
    }

    /// Which of `ids` are approved, bookable listings on the platform
    pub async fn bookable_ids(
        &self,
        kind: CandidateKind,
        ids: &[String],
    ) -> Result<HashSet<String>, PostgresError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let table = match kind {
            CandidateKind::Accommodation => &self.catalog.accommodation_listings,
            CandidateKind::Guide => &self.catalog.guide_listings,
        };
        let query = format!(
            r#"
            SELECT id
            FROM {}
            WHERE id = ANY($1) AND status = 'approved'
            "#,
            table
        );

        let rows = sqlx::query(&query).bind(ids).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("id").map_err(Into::into))
            .collect()
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Relation names are interpolated into SQL, so only plain identifiers pass
fn check_catalog(catalog: &CatalogSettings) -> Result<(), PostgresError> {
    for name in [
        &catalog.accommodations,
        &catalog.guides,
        &catalog.accommodation_listings,
        &catalog.guide_listings,
    ] {
        if !is_identifier(name) {
            return Err(PostgresError::InvalidInput(format!(
                "catalog relation {:?} is not a plain SQL identifier",
                name
            )));
        }
    }
    Ok(())
}

/// `name` or `schema.name`, each part starting with a letter or underscore
fn is_identifier(name: &str) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

fn common_fields(row: &PgRow) -> Result<(String, String, Location, Option<PriceRange>, Option<f64>, bool), sqlx::Error> {
    let price = price_from_bounds(row.try_get("price_min")?, row.try_get("price_max")?);

    Ok((
        row.try_get("id")?,
        row.try_get("name")?,
        Location {
            district: row.try_get("district")?,
            province: row.try_get("province")?,
        },
        price,
        row.try_get("rating")?,
        row.try_get::<Option<bool>, _>("in_system")?.unwrap_or(false),
    ))
}

fn price_from_bounds(min: Option<f64>, max: Option<f64>) -> Option<PriceRange> {
    match (min, max) {
        (Some(a), Some(b)) => Some(PriceRange::new(a, b)),
        (Some(p), None) | (None, Some(p)) => Some(PriceRange::fixed(p)),
        (None, None) => None,
    }
}

fn accommodation_from_row(row: &PgRow) -> Result<Candidate, PostgresError> {
    let (id, name, location, price, rating, in_system) = common_fields(row)?;
    let max_group_size: Option<i32> = row.try_get("max_group_size")?;

    Ok(Candidate {
        id,
        name,
        location,
        price,
        rating,
        in_system,
        profile: CandidateProfile::Accommodation(AccommodationProfile {
            amenities: row.try_get::<Option<Vec<String>>, _>("amenities")?.unwrap_or_default(),
            interests: row.try_get::<Option<Vec<String>>, _>("interests")?.unwrap_or_default(),
            travel_styles: row
                .try_get::<Option<Vec<String>>, _>("travel_styles")?
                .unwrap_or_default(),
            max_group_size: max_group_size.and_then(|n| u32::try_from(n).ok()),
        }),
    })
}

fn guide_from_row(row: &PgRow) -> Result<Candidate, PostgresError> {
    let (id, name, location, price, rating, in_system) = common_fields(row)?;
    let gender: Option<String> = row.try_get("gender")?;

    Ok(Candidate {
        id,
        name,
        location,
        price,
        rating,
        in_system,
        profile: CandidateProfile::Guide(GuideProfile {
            languages: row.try_get::<Option<Vec<String>>, _>("languages")?.unwrap_or_default(),
            expertise: row.try_get::<Option<Vec<String>>, _>("expertise")?.unwrap_or_default(),
            gender: gender.as_deref().and_then(parse_gender),
        }),
    })
}

fn parse_gender(value: &str) -> Option<Gender> {
    match value.trim().to_lowercase().as_str() {
        "male" | "m" => Some(Gender::Male),
        "female" | "f" => Some(Gender::Female),
        _ => None,
    }
}
