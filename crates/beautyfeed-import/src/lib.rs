//! Upsert coordination for parsed feed catalogs.
//!
//! [`Importer`] turns a [`beautyfeed_core::Catalog`] into store writes through
//! a [`CatalogStore`]. [`PgCatalogStore`] writes to Postgres via
//! `beautyfeed-db`; [`MemoryStore`] keeps everything in process.

pub mod brand_cache;
pub mod error;
pub mod importer;
pub mod memory;
pub mod store;

pub use brand_cache::BrandCache;
pub use error::RecordError;
pub use importer::{parse_price, CategoryReport, ImportSummary, Importer, ProductReport};
pub use memory::{MemoryStore, MemoryStoreError, StoredBrand, StoredCategory, StoredProduct};
pub use store::{CatalogStore, PgCatalogStore};
