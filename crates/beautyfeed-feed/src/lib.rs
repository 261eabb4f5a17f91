pub mod dictionary;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod slug;
pub mod yml;

pub use error::FeedParseError;
pub use normalize::{normalize_attributes, BRAND_ATTRIBUTE, COUNTRY_ATTRIBUTE};
pub use parse::{parse_document, sanitize_ampersands, XmlElement};
pub use slug::{generate_slug, suffixed_slug};
pub use yml::{catalog_from_document, parse_catalog};
