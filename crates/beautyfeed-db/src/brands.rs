//! Database operations for the `brands` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `brands` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BrandRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns the brand whose name matches `name` exactly, or `None`.
///
/// Matching is case-sensitive: `"Nivea"` and `"NIVEA"` are different brands.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_brand_by_name(pool: &PgPool, name: &str) -> Result<Option<BrandRow>, DbError> {
    let row = sqlx::query_as::<_, BrandRow>(
        "SELECT id, name, slug, created_at, updated_at \
         FROM brands \
         WHERE name = $1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Creates a new brand row and returns it.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails (including unique constraint
/// violations on `name` or `slug`).
pub async fn insert_brand(pool: &PgPool, name: &str, slug: &str) -> Result<BrandRow, DbError> {
    let row = sqlx::query_as::<_, BrandRow>(
        "INSERT INTO brands (name, slug) \
         VALUES ($1, $2) \
         RETURNING id, name, slug, created_at, updated_at",
    )
    .bind(name)
    .bind(slug)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns the total number of brand rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_brands(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM brands")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
