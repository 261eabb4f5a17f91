//! YML catalog adapter.
//!
//! Contract: [`parse_catalog`] returns every category and every offer of a
//! `yml_catalog > shop > {categories, offers}` document as a [`Catalog`].
//! All knowledge of how the dialect nests things lives here; the importer
//! only ever sees `RawCategory` and `RawOffer`.

use beautyfeed_core::{Catalog, ParamValue, RawCategory, RawOffer, RawParam, RawParams, StockFlag};

use crate::error::FeedParseError;
use crate::parse::{parse_document, XmlElement};

/// Container/item tag pairs that hold offers, in order of preference.
/// `offers > offer` is standard YML; `products > product` shows up in
/// exports from some storefront platforms.
const OFFER_CONTAINERS: &[(&str, &str)] = &[("offers", "offer"), ("products", "product")];

/// Parses a YML feed document into a [`Catalog`].
///
/// # Errors
///
/// Returns [`FeedParseError`] if the document is not well-formed XML after
/// ampersand sanitization.
pub fn parse_catalog(xml: &str) -> Result<Catalog, FeedParseError> {
    let root = parse_document(xml)?;
    Ok(catalog_from_document(&root))
}

/// Extracts categories and offers from an already-parsed document.
///
/// The `shop` element may be the document root or a child of it. Missing
/// sections yield empty collections.
#[must_use]
pub fn catalog_from_document(root: &XmlElement) -> Catalog {
    let shop = if root.name == "shop" {
        root
    } else {
        root.child("shop").unwrap_or(root)
    };

    let categories = shop
        .child("categories")
        .map(|section| {
            section
                .children_named("category")
                .filter_map(category_from_element)
                .collect()
        })
        .unwrap_or_default();

    let offers = OFFER_CONTAINERS
        .iter()
        .find_map(|(container, item)| {
            shop.child(container).map(|section| {
                section
                    .children_named(item)
                    .filter_map(offer_from_element)
                    .collect()
            })
        })
        .unwrap_or_default();

    Catalog { categories, offers }
}

fn category_from_element(el: &XmlElement) -> Option<RawCategory> {
    let Some(external_id) = el.attr("id") else {
        tracing::warn!(name = %el.text, "skipping category without id attribute");
        return None;
    };
    Some(RawCategory {
        external_id: external_id.to_string(),
        name: el.text.clone(),
        parent_external_id: el.attr("parentId").map(str::to_string),
    })
}

fn offer_from_element(el: &XmlElement) -> Option<RawOffer> {
    let Some(external_id) = el.attr("id").or_else(|| el.child_text("id")) else {
        tracing::warn!(
            name = el.child_text("name").unwrap_or_default(),
            "skipping offer without id"
        );
        return None;
    };

    let text = |name: &str| el.child_text(name).map(str::to_string);

    let available = el
        .attr("available")
        .or_else(|| el.child_text("available"))
        .map(|v| StockFlag::Text(v.to_string()));

    let pictures = el
        .children_named("picture")
        .map(|p| p.text.clone())
        .filter(|url| !url.is_empty())
        .collect();

    let params = el
        .children_named("param")
        .filter_map(|p| {
            let name = p.attr("name")?;
            Some(RawParam {
                name: name.to_string(),
                value: ParamValue::Text(p.text.clone()),
                unit: p.attr("unit").map(str::to_string),
            })
        })
        .collect();

    Some(RawOffer {
        external_id: external_id.to_string(),
        name: text("name"),
        model: text("model"),
        vendor: text("vendor"),
        description: text("description"),
        price: text("price"),
        old_price: text("oldprice"),
        currency_id: text("currencyId"),
        available,
        vendor_code: text("vendorCode"),
        country_of_origin: text("country_of_origin"),
        pictures,
        category_external_id: text("categoryId"),
        params: RawParams::Pairs(params),
    })
}

#[cfg(test)]
#[path = "yml_test.rs"]
mod tests;
