//! Database operations for the `categories` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use beautyfeed_core::NewCategory;

use crate::DbError;

/// A row from the `categories` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub external_id: String,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i64>,
    /// 0 for roots, 1 for children.
    pub level: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upserts a category by `external_id`, resetting it to a root
/// (`parent_id = NULL`, `level = 0`).
///
/// Parent links are written separately by [`link_category_parent`] once every
/// category of the feed exists, so a parent dropped from the feed does not
/// survive a re-import.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_category(pool: &PgPool, category: &NewCategory) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO categories (external_id, name, slug, level) \
         VALUES ($1, $2, $3, 0) \
         ON CONFLICT (external_id) DO UPDATE SET \
             name       = EXCLUDED.name, \
             slug       = EXCLUDED.slug, \
             parent_id  = NULL, \
             level      = 0, \
             updated_at = NOW() \
         RETURNING id",
    )
    .bind(&category.external_id)
    .bind(&category.name)
    .bind(&category.slug)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Points category `id` at `parent_id` and records its depth.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no category has `id`, or
/// [`DbError::Sqlx`] if the update fails (e.g. `parent_id` does not exist).
pub async fn link_category_parent(
    pool: &PgPool,
    id: i64,
    parent_id: i64,
    level: i16,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE categories \
         SET parent_id = $2, level = $3, updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(parent_id)
    .bind(level)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Returns a category by its feed id, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_category_by_external_id(
    pool: &PgPool,
    external_id: &str,
) -> Result<Option<CategoryRow>, DbError> {
    let row = sqlx::query_as::<_, CategoryRow>(
        "SELECT id, external_id, name, slug, parent_id, level, created_at, updated_at \
         FROM categories \
         WHERE external_id = $1",
    )
    .bind(external_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns the total number of category rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_categories(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
