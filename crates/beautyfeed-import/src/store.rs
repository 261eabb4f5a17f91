//! The write surface the importer needs from a catalog store.

use async_trait::async_trait;
use sqlx::PgPool;

use beautyfeed_core::{NewCategory, NewProduct};
use beautyfeed_db::DbError;

/// Catalog persistence used by [`crate::Importer`].
///
/// Every method is awaited to completion before the importer moves to the
/// next record. Ids returned are the store's internal ids, never feed ids.
#[async_trait]
pub trait CatalogStore: Send {
    type Error: std::fmt::Display + Send;

    /// Insert or update by external id; the row is left as a root.
    async fn upsert_category(&mut self, category: &NewCategory) -> Result<i64, Self::Error>;

    async fn link_category_parent(
        &mut self,
        id: i64,
        parent_id: i64,
        level: i16,
    ) -> Result<(), Self::Error>;

    /// Exact, case-sensitive name lookup.
    async fn find_brand_by_name(&mut self, name: &str) -> Result<Option<i64>, Self::Error>;

    async fn insert_brand(&mut self, name: &str, slug: &str) -> Result<i64, Self::Error>;

    /// Insert or update by external id.
    async fn upsert_product(&mut self, product: &NewProduct) -> Result<i64, Self::Error>;
}

/// [`CatalogStore`] backed by the Postgres catalog tables.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    type Error = DbError;

    async fn upsert_category(&mut self, category: &NewCategory) -> Result<i64, DbError> {
        beautyfeed_db::upsert_category(&self.pool, category).await
    }

    async fn link_category_parent(
        &mut self,
        id: i64,
        parent_id: i64,
        level: i16,
    ) -> Result<(), DbError> {
        beautyfeed_db::link_category_parent(&self.pool, id, parent_id, level).await
    }

    async fn find_brand_by_name(&mut self, name: &str) -> Result<Option<i64>, DbError> {
        let row = beautyfeed_db::find_brand_by_name(&self.pool, name).await?;
        Ok(row.map(|b| b.id))
    }

    async fn insert_brand(&mut self, name: &str, slug: &str) -> Result<i64, DbError> {
        let row = beautyfeed_db::insert_brand(&self.pool, name, slug).await?;
        Ok(row.id)
    }

    async fn upsert_product(&mut self, product: &NewProduct) -> Result<i64, DbError> {
        beautyfeed_db::upsert_product(&self.pool, product).await
    }
}
