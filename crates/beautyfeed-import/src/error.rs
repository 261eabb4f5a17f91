use thiserror::Error;

/// Why a single category, brand or offer could not be written.
///
/// Record errors never abort a run: the importer logs them with the record's
/// external id, counts them, and moves on.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid price {value:?}: {reason}")]
    InvalidPrice { value: String, reason: String },

    #[error("store write failed: {0}")]
    Store(String),
}

impl RecordError {
    pub(crate) fn store(err: impl std::fmt::Display) -> Self {
        Self::Store(err.to_string())
    }
}
