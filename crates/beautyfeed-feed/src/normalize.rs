//! Normalization of raw offer parameters into [`CanonicalAttributes`].
//!
//! Key and value spellings are resolved through [`crate::dictionary`]; this
//! module handles shape: blank dropping, `|`-delimited multi-values, repeated
//! names, and the synthesized brand attribute.

use beautyfeed_core::{AttributeValue, CanonicalAttributes, ParamValue, RawParams};

use crate::dictionary::{translate_key, translate_value};

/// Attribute that mirrors the offer's vendor so storefront filters can treat
/// the brand like any other characteristic.
pub const BRAND_ATTRIBUTE: &str = "Brand";

/// Canonical name of the country-of-origin characteristic.
pub const COUNTRY_ATTRIBUTE: &str = "Країна виробник";

const MULTI_VALUE_DELIMITER: char = '|';

/// Normalizes a product's raw parameters into canonical attributes.
///
/// Blank values are dropped; repeated canonical keys accumulate into one
/// flat list. When `vendor` is non-blank it is written to
/// [`BRAND_ATTRIBUTE`], overriding whatever the parameters supplied.
#[must_use]
pub fn normalize_attributes(params: &RawParams, vendor: Option<&str>) -> CanonicalAttributes {
    let mut attributes = CanonicalAttributes::new();

    for entry in params.entries() {
        if entry.value.is_blank() {
            continue;
        }
        let key = canonical_key(entry.name);
        if key.is_empty() {
            continue;
        }
        if let Some(value) = canonical_value(entry.value, entry.unit) {
            attributes.merge(key, value);
        }
    }

    if let Some(vendor) = vendor.map(str::trim).filter(|v| !v.is_empty()) {
        attributes.set(BRAND_ATTRIBUTE, AttributeValue::Single(vendor.to_string()));
    }

    attributes
}

/// Canonical attribute name for a raw parameter name; unmapped names pass
/// through trimmed.
#[must_use]
pub fn canonical_key(raw: &str) -> String {
    let trimmed = raw.trim();
    translate_key(trimmed).unwrap_or(trimmed).to_string()
}

fn canonical_value(value: &ParamValue, unit: Option<&str>) -> Option<AttributeValue> {
    match value {
        ParamValue::Null => None,
        ParamValue::Text(text) if text.contains(MULTI_VALUE_DELIMITER) => {
            let mut segments = Vec::new();
            push_segments(text, unit, &mut segments);
            non_empty_list(segments)
        }
        ParamValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            let translated = translate_segment(trimmed);
            Some(AttributeValue::Single(with_unit(translated, unit)))
        }
        ParamValue::List(items) => {
            let mut segments = Vec::new();
            collect_list(items, unit, &mut segments);
            non_empty_list(segments)
        }
    }
}

fn collect_list(items: &[ParamValue], unit: Option<&str>, out: &mut Vec<String>) {
    for item in items {
        match item {
            ParamValue::Null => {}
            ParamValue::Text(text) => push_segments(text, unit, out),
            ParamValue::List(nested) => collect_list(nested, unit, out),
        }
    }
}

fn push_segments(text: &str, unit: Option<&str>, out: &mut Vec<String>) {
    out.extend(
        text.split(MULTI_VALUE_DELIMITER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| with_unit(translate_segment(s), unit)),
    );
}

fn non_empty_list(segments: Vec<String>) -> Option<AttributeValue> {
    if segments.is_empty() {
        None
    } else {
        Some(AttributeValue::Multiple(segments))
    }
}

fn translate_segment(segment: &str) -> &str {
    translate_value(segment).unwrap_or(segment)
}

/// Appends the parameter's unit (`"50"` + `"мл"` → `"50 мл"`) unless the
/// value already ends with it.
fn with_unit(value: &str, unit: Option<&str>) -> String {
    match unit.map(str::trim).filter(|u| !u.is_empty()) {
        Some(unit) if !value.ends_with(unit) => format!("{value} {unit}"),
        _ => value.to_string(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
