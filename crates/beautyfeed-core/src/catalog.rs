//! Feed-side record types shared by the parser, the attribute normalizer and
//! the import coordinator.
//!
//! Everything here is "raw": values are kept as the feed spelled them and
//! only interpreted at the stage that owns the interpretation (price parsing
//! in the importer, attribute translation in the normalizer).

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The result of parsing a feed document: every category and every offer,
/// in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub categories: Vec<RawCategory>,
    pub offers: Vec<RawOffer>,
}

/// A `<category>` element from the feed.
///
/// `parent_external_id` may reference a category that is absent from the
/// feed; such references resolve to "no parent" at import time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCategory {
    pub external_id: String,
    pub name: String,
    pub parent_external_id: Option<String>,
}

/// Availability marker as it appears in the source.
///
/// XML feeds only ever produce `Text`; `Bool` covers JSON-shaped sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StockFlag {
    Bool(bool),
    Text(String),
}

impl StockFlag {
    /// Only the literal `"true"` or boolean `true` count as in stock.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        match self {
            StockFlag::Bool(b) => *b,
            StockFlag::Text(s) => s == "true",
        }
    }
}

/// An `<offer>` element from the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOffer {
    pub external_id: String,
    pub name: Option<String>,
    /// Secondary title used when `name` is missing.
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub description: Option<String>,
    /// Price exactly as written in the feed, e.g. `"349.00"` or `"349,00"`.
    pub price: Option<String>,
    pub old_price: Option<String>,
    pub currency_id: Option<String>,
    pub available: Option<StockFlag>,
    pub vendor_code: Option<String>,
    pub country_of_origin: Option<String>,
    pub pictures: Vec<String>,
    pub category_external_id: Option<String>,
    pub params: RawParams,
}

// ---------------------------------------------------------------------------
// Raw parameters
// ---------------------------------------------------------------------------

/// A parameter value before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Null,
    Text(String),
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Converts an arbitrary JSON value, unwrapping `{text|#text|value|_: …}`
    /// wrappers to their inner scalar.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Text(b.to_string()),
            Value::Number(n) => ParamValue::Text(n.to_string()),
            Value::String(s) => ParamValue::Text(s.clone()),
            Value::Array(items) => ParamValue::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => TEXT_KEYS
                .iter()
                .find_map(|k| map.get(*k))
                .map_or(ParamValue::Null, Self::from_json),
        }
    }

    /// `true` when the value carries no non-whitespace text anywhere.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            ParamValue::Null => true,
            ParamValue::Text(s) => s.trim().is_empty(),
            ParamValue::List(items) => items.iter().all(ParamValue::is_blank),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

/// Keys under which JSON-shaped sources nest an element's text.
const TEXT_KEYS: &[&str] = &["#text", "text", "value", "_"];
const NAME_KEYS: &[&str] = &["name", "@_name", "@name"];
const UNIT_KEYS: &[&str] = &["unit", "@_unit", "@unit"];

/// A single `<param name="…" unit="…">value</param>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParam {
    pub name: String,
    pub value: ParamValue,
    pub unit: Option<String>,
}

impl RawParam {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            unit: None,
        }
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

/// The two shapes a product's parameter collection arrives in.
///
/// `Pairs` allows repeated names (legal in YML); `Keyed` is the object form
/// some feed dialects and JSON exports produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawParams {
    Pairs(Vec<RawParam>),
    Keyed(Vec<(String, ParamValue)>),
}

impl Default for RawParams {
    fn default() -> Self {
        RawParams::Pairs(Vec::new())
    }
}

/// A borrowed view of one parameter, independent of the collection shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamEntry<'a> {
    pub name: &'a str,
    pub value: &'a ParamValue,
    pub unit: Option<&'a str>,
}

impl RawParams {
    /// Resolves a JSON-shaped parameter collection.
    ///
    /// Accepts an array of `{name, value}` objects, a single such object, or
    /// a keyed object mapping names to values. An object is read as a single
    /// pair only when it has both a name and a value key and nothing besides
    /// name, value and unit keys; otherwise every key is a parameter. Anything
    /// else yields an empty collection. Array elements without a name are
    /// skipped.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => {
                RawParams::Pairs(items.iter().filter_map(param_from_json).collect())
            }
            Value::Object(map) if is_single_pair(map) => {
                RawParams::Pairs(param_from_json(value).into_iter().collect())
            }
            Value::Object(map) => RawParams::Keyed(
                map.iter()
                    .map(|(k, v)| (k.clone(), ParamValue::from_json(v)))
                    .collect(),
            ),
            _ => RawParams::default(),
        }
    }

    /// Flattens either shape into one uniform sequence, in source order.
    #[must_use]
    pub fn entries(&self) -> Vec<ParamEntry<'_>> {
        match self {
            RawParams::Pairs(pairs) => pairs
                .iter()
                .map(|p| ParamEntry {
                    name: &p.name,
                    value: &p.value,
                    unit: p.unit.as_deref(),
                })
                .collect(),
            RawParams::Keyed(pairs) => pairs
                .iter()
                .map(|(name, value)| ParamEntry {
                    name,
                    value,
                    unit: None,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            RawParams::Pairs(p) => p.len(),
            RawParams::Keyed(p) => p.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_single_pair(map: &serde_json::Map<String, Value>) -> bool {
    let has = |keys: &[&str]| keys.iter().any(|k| map.contains_key(*k));
    has(NAME_KEYS)
        && has(TEXT_KEYS)
        && map.keys().all(|k| {
            let k = k.as_str();
            NAME_KEYS.contains(&k) || TEXT_KEYS.contains(&k) || UNIT_KEYS.contains(&k)
        })
}

fn param_from_json(value: &Value) -> Option<RawParam> {
    let map = value.as_object()?;
    let name = NAME_KEYS
        .iter()
        .find_map(|k| map.get(*k))
        .and_then(Value::as_str)?
        .to_string();
    let unit = UNIT_KEYS
        .iter()
        .find_map(|k| map.get(*k))
        .and_then(Value::as_str)
        .map(str::to_string);
    Some(RawParam {
        name,
        value: ParamValue::from_json(value),
        unit,
    })
}

// ---------------------------------------------------------------------------
// Canonical attributes
// ---------------------------------------------------------------------------

/// A normalized attribute value: one string, or a flat list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Single(String),
    Multiple(Vec<String>),
}

impl AttributeValue {
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            AttributeValue::Single(s) => Some(s),
            AttributeValue::Multiple(_) => None,
        }
    }

    #[must_use]
    pub fn into_list(self) -> Vec<String> {
        match self {
            AttributeValue::Single(s) => vec![s],
            AttributeValue::Multiple(v) => v,
        }
    }
}

/// Canonical attribute name → value, as stored in `products.attributes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalAttributes(BTreeMap<String, AttributeValue>);

impl CanonicalAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Sets `key`, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.0.insert(key.into(), value);
    }

    /// Adds `value` under `key`. An existing value is coalesced with the new
    /// one into a single flat list.
    pub fn merge(&mut self, key: impl Into<String>, value: AttributeValue) {
        match self.0.entry(key.into()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
            }
            btree_map::Entry::Occupied(mut slot) => {
                let existing = std::mem::replace(slot.get_mut(), AttributeValue::Multiple(Vec::new()));
                let mut list = existing.into_list();
                list.extend(value.into_list());
                *slot.get_mut() = AttributeValue::Multiple(list);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.0.iter()
    }

    /// JSON object form for the `attributes` column.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| {
                    let json = match v {
                        AttributeValue::Single(s) => Value::String(s.clone()),
                        AttributeValue::Multiple(list) => {
                            Value::Array(list.iter().cloned().map(Value::String).collect())
                        }
                    };
                    (k.clone(), json)
                })
                .collect(),
        )
    }
}
