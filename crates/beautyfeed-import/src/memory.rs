//! An in-process [`CatalogStore`] with the same upsert semantics as the
//! Postgres tables. Backs `import --dry-run` and the importer tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use beautyfeed_core::{NewCategory, NewProduct};

use crate::CatalogStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryStoreError {
    #[error("no category with id {0}")]
    UnknownCategory(i64),
    #[error("brand name or slug already taken: {0}")]
    DuplicateBrand(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCategory {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i64>,
    pub level: i16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBrand {
    pub id: i64,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct StoredProduct {
    pub id: i64,
    pub product: NewProduct,
    /// Number of upserts that touched this row, the first insert included.
    pub writes: u32,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    next_id: i64,
    categories: BTreeMap<String, StoredCategory>,
    brands: BTreeMap<String, StoredBrand>,
    products: BTreeMap<String, StoredProduct>,
    brand_lookups: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(&self, external_id: &str) -> Option<&StoredCategory> {
        self.categories.get(external_id)
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn brand(&self, name: &str) -> Option<&StoredBrand> {
        self.brands.get(name)
    }

    #[must_use]
    pub fn brand_count(&self) -> usize {
        self.brands.len()
    }

    /// How many times the importer asked the store for a brand by name.
    #[must_use]
    pub fn brand_lookups(&self) -> usize {
        self.brand_lookups
    }

    #[must_use]
    pub fn product(&self, external_id: &str) -> Option<&StoredProduct> {
        self.products.get(external_id)
    }

    #[must_use]
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn has_category_id(&self, id: i64) -> bool {
        self.categories.values().any(|c| c.id == id)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    type Error = MemoryStoreError;

    async fn upsert_category(&mut self, category: &NewCategory) -> Result<i64, Self::Error> {
        if let Some(existing) = self.categories.get_mut(&category.external_id) {
            existing.name.clone_from(&category.name);
            existing.slug.clone_from(&category.slug);
            existing.parent_id = None;
            existing.level = 0;
            return Ok(existing.id);
        }

        let id = self.allocate_id();
        self.categories.insert(
            category.external_id.clone(),
            StoredCategory {
                id,
                name: category.name.clone(),
                slug: category.slug.clone(),
                parent_id: None,
                level: 0,
            },
        );
        Ok(id)
    }

    async fn link_category_parent(
        &mut self,
        id: i64,
        parent_id: i64,
        level: i16,
    ) -> Result<(), Self::Error> {
        if !self.has_category_id(parent_id) {
            return Err(MemoryStoreError::UnknownCategory(parent_id));
        }
        let category = self
            .categories
            .values_mut()
            .find(|c| c.id == id)
            .ok_or(MemoryStoreError::UnknownCategory(id))?;
        category.parent_id = Some(parent_id);
        category.level = level;
        Ok(())
    }

    async fn find_brand_by_name(&mut self, name: &str) -> Result<Option<i64>, Self::Error> {
        self.brand_lookups += 1;
        Ok(self.brands.get(name).map(|b| b.id))
    }

    async fn insert_brand(&mut self, name: &str, slug: &str) -> Result<i64, Self::Error> {
        if self.brands.contains_key(name) || self.brands.values().any(|b| b.slug == slug) {
            return Err(MemoryStoreError::DuplicateBrand(name.to_string()));
        }
        let id = self.allocate_id();
        self.brands.insert(
            name.to_string(),
            StoredBrand {
                id,
                slug: slug.to_string(),
            },
        );
        Ok(id)
    }

    async fn upsert_product(&mut self, product: &NewProduct) -> Result<i64, Self::Error> {
        if let Some(existing) = self.products.get_mut(&product.external_id) {
            existing.product = product.clone();
            existing.writes += 1;
            return Ok(existing.id);
        }

        let id = self.allocate_id();
        self.products.insert(
            product.external_id.clone(),
            StoredProduct {
                id,
                product: product.clone(),
                writes: 1,
            },
        );
        Ok(id)
    }
}
