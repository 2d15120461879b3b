use thiserror::Error;

/// A single record's field could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unparseable timestamp: {0:?}")]
    Timestamp(String),

    #[error("unparseable duration: {0}")]
    Duration(String),

    #[error("negative duration: {0}s")]
    NegativeDuration(i64),
}

/// A source reader could not produce its collection.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{origin} source unavailable: {reason}")]
    Unavailable { origin: &'static str, reason: String },
}

impl SourceError {
    pub fn unavailable(origin: &'static str, reason: impl ToString) -> Self {
        SourceError::Unavailable { origin, reason: reason.to_string() }
    }

    pub fn origin(&self) -> &'static str {
        match self {
            SourceError::Unavailable { origin, .. } => origin,
        }
    }
}
