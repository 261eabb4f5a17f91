//! Database operations for the `products` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use beautyfeed_core::NewProduct;

use crate::DbError;

/// A row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub external_id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub old_price: Option<Decimal>,
    pub currency: String,
    pub in_stock: bool,
    pub brand_id: Option<i64>,
    pub category_id: Option<i64>,
    pub images: Vec<String>,
    pub attributes: serde_json::Value,
    pub vendor_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upserts a product row.
///
/// Conflicts on `external_id` overwrite every feed-derived column and bump
/// `updated_at`; `created_at` keeps the first-import time. Rows are never
/// deleted here, so offers that disappear from a feed stay in the table.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_product(pool: &PgPool, product: &NewProduct) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO products \
             (external_id, name, slug, description, price, old_price, currency, \
              in_stock, brand_id, category_id, images, attributes, vendor_code) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, \
                 $8, $9, $10, $11, $12::jsonb, $13) \
         ON CONFLICT (external_id) DO UPDATE SET \
             name        = EXCLUDED.name, \
             slug        = EXCLUDED.slug, \
             description = EXCLUDED.description, \
             price       = EXCLUDED.price, \
             old_price   = EXCLUDED.old_price, \
             currency    = EXCLUDED.currency, \
             in_stock    = EXCLUDED.in_stock, \
             brand_id    = EXCLUDED.brand_id, \
             category_id = EXCLUDED.category_id, \
             images      = EXCLUDED.images, \
             attributes  = EXCLUDED.attributes, \
             vendor_code = EXCLUDED.vendor_code, \
             updated_at  = NOW() \
         RETURNING id",
    )
    .bind(&product.external_id)
    .bind(&product.name)
    .bind(&product.slug)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.old_price)
    .bind(&product.currency)
    .bind(product.in_stock)
    .bind(product.brand_id)
    .bind(product.category_id)
    .bind(&product.images)
    .bind(product.attributes.to_json())
    .bind(&product.vendor_code)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Returns a product by its feed id, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_product_by_external_id(
    pool: &PgPool,
    external_id: &str,
) -> Result<Option<ProductRow>, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "SELECT id, external_id, name, slug, description, price, old_price, currency, \
                in_stock, brand_id, category_id, images, attributes, vendor_code, \
                created_at, updated_at \
         FROM products \
         WHERE external_id = $1",
    )
    .bind(external_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns the total number of product rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_products(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
