use rust_decimal::Decimal;

use crate::catalog::CanonicalAttributes;

/// Currency every imported price is recorded in.
pub const STORE_CURRENCY: &str = "UAH";

/// A category row as written in the first import pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub external_id: String,
    pub name: String,
    /// `generate_slug(name)` suffixed with the external id.
    pub slug: String,
}

/// An offer resolved and normalized for storage: references are store ids,
/// price is parsed, attributes are canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Feed offer id; the upsert conflict key.
    pub external_id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    /// Pre-discount price, if the feed carried one.
    pub old_price: Option<Decimal>,
    /// Always [`STORE_CURRENCY`] for feed imports.
    pub currency: String,
    pub in_stock: bool,
    pub brand_id: Option<i64>,
    pub category_id: Option<i64>,
    pub images: Vec<String>,
    pub attributes: CanonicalAttributes,
    pub vendor_code: Option<String>,
}
