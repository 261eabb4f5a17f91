pub mod app_config;
pub mod catalog;
pub mod config;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use catalog::{
    AttributeValue, CanonicalAttributes, Catalog, ParamEntry, ParamValue, RawCategory, RawOffer,
    RawParam, RawParams, StockFlag,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{NewCategory, NewProduct, STORE_CURRENCY};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
