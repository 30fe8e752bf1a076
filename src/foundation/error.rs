use std::path::PathBuf;

/// Convenience result type used across spritereel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// A table row violated a token-count or value constraint.
    #[error("malformed record at row {row}: {reason}")]
    MalformedRecord {
        /// Zero-based row within the table the record came from.
        row: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// A spritesheet or table file required by a unit does not exist.
    #[error("missing asset: {}", .0.display())]
    MissingAsset(PathBuf),

    /// An image or animation has no non-transparent pixel to crop to.
    #[error("degenerate bounds: {0}")]
    DegenerateBounds(String),

    /// The external video encoder failed or could not be started.
    #[error("encoder failure: {0}")]
    EncoderFailure(String),

    /// An animation name outside the known set was requested.
    #[error("unknown animation '{0}'")]
    UnknownAnimation(String),

    /// Invalid configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::MalformedRecord`] value.
    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            row,
            reason: reason.into(),
        }
    }

    /// Build a [`ReelError::DegenerateBounds`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateBounds(msg.into())
    }

    /// Build a [`ReelError::EncoderFailure`] value.
    pub fn encoder(msg: impl Into<String>) -> Self {
        Self::EncoderFailure(msg.into())
    }

    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
