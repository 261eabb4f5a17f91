//! Drives one feed import: categories in two passes, then one product upsert
//! per offer.
//!
//! Failures are isolated per record. A category, brand or offer that cannot
//! be written is logged with its external id, counted in the run report, and
//! skipped; nothing already written is rolled back.

use std::collections::HashMap;

use rand::Rng;
use rust_decimal::Decimal;

use beautyfeed_core::{
    AttributeValue, Catalog, NewCategory, NewProduct, RawCategory, RawOffer, StockFlag,
    STORE_CURRENCY,
};
use beautyfeed_feed::{normalize_attributes, suffixed_slug, COUNTRY_ATTRIBUTE};

use crate::{BrandCache, CatalogStore, RecordError};

/// Depth recorded for every category that has a parent.
const CHILD_LEVEL: i16 = 1;

/// Offers between two progress lines in the log.
const PROGRESS_EVERY: usize = 500;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CategoryReport {
    /// Categories written in the first pass.
    pub upserted: usize,
    /// Parent links written in the second pass.
    pub linked: usize,
    /// Upserts or links the store rejected.
    pub failed: usize,
    /// Categories whose parent is itself a child. They are linked and
    /// recorded at level 1 like any other child.
    pub deep_nesting: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProductReport {
    pub imported: usize,
    pub failed: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub categories: CategoryReport,
    pub products: ProductReport,
    /// Distinct brands resolved during the run.
    pub brands: usize,
}

/// Import coordinator for a single run.
///
/// Owns the store, the run's [`BrandCache`], and the index from feed
/// category ids to store ids built by [`Importer::import_categories`].
pub struct Importer<S> {
    store: S,
    brands: BrandCache,
    categories: HashMap<String, i64>,
}

impl<S: CatalogStore> Importer<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            brands: BrandCache::new(),
            categories: HashMap::new(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    #[must_use]
    pub fn brand_cache(&self) -> &BrandCache {
        &self.brands
    }

    /// Store id for a feed category id, once the category has been imported.
    #[must_use]
    pub fn category_id(&self, external_id: &str) -> Option<i64> {
        self.categories.get(external_id).copied()
    }

    /// Imports categories followed by offers.
    pub async fn run(&mut self, catalog: &Catalog) -> ImportSummary {
        tracing::info!(
            categories = catalog.categories.len(),
            offers = catalog.offers.len(),
            "starting catalog import"
        );

        let categories = self.import_categories(&catalog.categories).await;
        let products = self.import_products(&catalog.offers).await;

        ImportSummary {
            categories,
            products,
            brands: self.brands.len(),
        }
    }

    /// Writes every category, then links children to parents.
    ///
    /// The first pass upserts each category as a root so that the second pass
    /// can resolve parents regardless of the order the feed lists them in.
    /// A parent id that is absent from the feed, or whose upsert failed,
    /// leaves the child as a root.
    pub async fn import_categories(&mut self, categories: &[RawCategory]) -> CategoryReport {
        let mut report = CategoryReport::default();

        for category in categories {
            let new_category = NewCategory {
                external_id: category.external_id.clone(),
                name: category.name.trim().to_string(),
                slug: suffixed_slug(&category.name, &category.external_id),
            };
            match self.store.upsert_category(&new_category).await {
                Ok(id) => {
                    self.categories.insert(category.external_id.clone(), id);
                    report.upserted += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        external_id = %category.external_id,
                        error = %e,
                        "category upsert failed; skipping"
                    );
                    report.failed += 1;
                }
            }
        }

        let parent_of: HashMap<&str, &str> = categories
            .iter()
            .filter_map(|c| {
                c.parent_external_id
                    .as_deref()
                    .map(|p| (c.external_id.as_str(), p))
            })
            .collect();

        for category in categories {
            let Some(parent_external_id) = category.parent_external_id.as_deref() else {
                continue;
            };
            let Some(id) = self.category_id(&category.external_id) else {
                continue;
            };
            if parent_external_id == category.external_id {
                tracing::warn!(
                    external_id = %category.external_id,
                    "category names itself as parent; leaving as root"
                );
                continue;
            }
            let Some(parent_id) = self.category_id(parent_external_id) else {
                tracing::debug!(
                    external_id = %category.external_id,
                    parent_external_id,
                    "parent category not imported; leaving as root"
                );
                continue;
            };

            let parent_is_child = parent_of
                .get(parent_external_id)
                .is_some_and(|gp| *gp != parent_external_id && self.categories.contains_key(*gp));
            if parent_is_child {
                tracing::warn!(
                    external_id = %category.external_id,
                    parent_external_id,
                    "category nested deeper than two levels; recording as level 1"
                );
                report.deep_nesting += 1;
            }

            match self
                .store
                .link_category_parent(id, parent_id, CHILD_LEVEL)
                .await
            {
                Ok(()) => report.linked += 1,
                Err(e) => {
                    tracing::warn!(
                        external_id = %category.external_id,
                        parent_external_id,
                        error = %e,
                        "linking category to parent failed"
                    );
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            upserted = report.upserted,
            linked = report.linked,
            failed = report.failed,
            deep_nesting = report.deep_nesting,
            "categories imported"
        );
        report
    }

    /// Resolves a vendor name to a brand id, creating the brand on first
    /// sighting.
    ///
    /// Returns `None` for a blank name, or when the store fails; the offer is
    /// then imported without a brand.
    pub async fn ensure_brand(&mut self, name: &str) -> Option<i64> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        if let Some(id) = self.brands.get(name) {
            tracing::debug!(brand = %name, brand_id = id, "brand cache hit");
            return Some(id);
        }

        let id = match self.store.find_brand_by_name(name).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                let suffix = rand::rng().random_range(100_000..1_000_000_u32);
                let slug = suffixed_slug(name, &suffix.to_string());
                match self.store.insert_brand(name, &slug).await {
                    Ok(id) => {
                        tracing::info!(brand = %name, slug = %slug, "created brand");
                        id
                    }
                    Err(e) => {
                        tracing::warn!(
                            brand = %name,
                            error = %e,
                            "brand insert failed; continuing without brand"
                        );
                        return None;
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    brand = %name,
                    error = %e,
                    "brand lookup failed; continuing without brand"
                );
                return None;
            }
        };

        self.brands.insert(name, id);
        Some(id)
    }

    /// Upserts one product per offer, skipping offers that fail.
    pub async fn import_products(&mut self, offers: &[RawOffer]) -> ProductReport {
        let mut report = ProductReport::default();

        for (index, offer) in offers.iter().enumerate() {
            match self.import_offer(offer).await {
                Ok(id) => {
                    tracing::debug!(external_id = %offer.external_id, product_id = id, "product upserted");
                    report.imported += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        external_id = %offer.external_id,
                        error = %e,
                        "skipping offer"
                    );
                    report.failed += 1;
                }
            }

            let processed = index + 1;
            if processed % PROGRESS_EVERY == 0 {
                tracing::info!(processed, total = offers.len(), "product import progress");
            }
        }

        tracing::info!(
            imported = report.imported,
            failed = report.failed,
            "products imported"
        );
        report
    }

    async fn import_offer(&mut self, offer: &RawOffer) -> Result<i64, RecordError> {
        let product = self.prepare_product(offer).await?;
        self.store
            .upsert_product(&product)
            .await
            .map_err(RecordError::store)
    }

    /// Builds the storable form of an offer.
    ///
    /// Validation runs before brand resolution, so an invalid offer never
    /// creates a brand.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingField`] when the offer has no id, no
    /// name or model, or no price, and [`RecordError::InvalidPrice`] when the
    /// price is not a non-negative decimal.
    pub async fn prepare_product(&mut self, offer: &RawOffer) -> Result<NewProduct, RecordError> {
        let external_id = offer.external_id.trim();
        if external_id.is_empty() {
            return Err(RecordError::MissingField("id"));
        }
        let name = non_blank(offer.name.as_deref())
            .or_else(|| non_blank(offer.model.as_deref()))
            .ok_or(RecordError::MissingField("name"))?;
        let raw_price =
            non_blank(offer.price.as_deref()).ok_or(RecordError::MissingField("price"))?;
        let price = parse_price(raw_price)?;

        let old_price = match non_blank(offer.old_price.as_deref()) {
            Some(raw) => match parse_price(raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(external_id, error = %e, "ignoring unparsable old price");
                    None
                }
            },
            None => None,
        };

        let in_stock = offer.available.as_ref().is_some_and(StockFlag::is_in_stock);

        let brand_id = match offer.vendor.as_deref() {
            Some(vendor) => self.ensure_brand(vendor).await,
            None => None,
        };

        let category_id = match non_blank(offer.category_external_id.as_deref()) {
            Some(category) => {
                let id = self.category_id(category);
                if id.is_none() {
                    tracing::debug!(external_id, category, "offer category not imported");
                }
                id
            }
            None => None,
        };

        let mut attributes = normalize_attributes(&offer.params, offer.vendor.as_deref());
        if let Some(country) = non_blank(offer.country_of_origin.as_deref()) {
            if !attributes.contains_key(COUNTRY_ATTRIBUTE) {
                attributes.set(COUNTRY_ATTRIBUTE, AttributeValue::Single(country.to_string()));
            }
        }

        let images = offer
            .pictures
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        Ok(NewProduct {
            external_id: external_id.to_string(),
            name: name.to_string(),
            slug: suffixed_slug(name, external_id),
            description: non_blank(offer.description.as_deref()).map(str::to_string),
            price,
            old_price,
            currency: STORE_CURRENCY.to_string(),
            in_stock,
            brand_id,
            category_id,
            images,
            attributes,
            vendor_code: non_blank(offer.vendor_code.as_deref()).map(str::to_string),
        })
    }
}

/// Parses a feed price. Whitespace (including thousands separators) is
/// ignored and `,` is accepted as the decimal separator.
///
/// # Errors
///
/// Returns [`RecordError::InvalidPrice`] for text that is not a decimal
/// number, or for a negative amount.
pub fn parse_price(raw: &str) -> Result<Decimal, RecordError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let price = cleaned
        .parse::<Decimal>()
        .map_err(|e| RecordError::InvalidPrice {
            value: raw.to_string(),
            reason: e.to_string(),
        })?;

    if price < Decimal::ZERO {
        return Err(RecordError::InvalidPrice {
            value: raw.to_string(),
            reason: "price must not be negative".to_string(),
        });
    }
    Ok(price)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "importer_test.rs"]
mod tests;
