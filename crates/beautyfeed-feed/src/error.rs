use thiserror::Error;

/// The feed document could not be read as XML, even after ampersand
/// sanitization. Always fatal for an import run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedParseError {
    #[error("malformed XML at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("unexpected end of document: <{element}> is never closed")]
    Unclosed { element: String },

    #[error("document has no root element")]
    NoRootElement,
}

impl FeedParseError {
    /// Builds a syntax error from a parser diagnostic, keeping only its
    /// first line.
    pub(crate) fn syntax(position: u64, diagnostic: impl std::fmt::Display) -> Self {
        let rendered = diagnostic.to_string();
        let message = rendered.lines().next().unwrap_or_default().trim().to_string();
        FeedParseError::Syntax { position, message }
    }
}
