//! Error types for word list loading and the quiz session state machine.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or parsing a word list.
///
/// These never end a game: the loader recovers by substituting the built-in
/// fallback pool (see [`crate::words::load_or_fallback`]).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DataSourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed csv word list: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed json word list: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("unsupported word list format: .{0}")]
    UnsupportedFormat(String),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("sheet '{0}' not found in workbook")]
    MissingSheet(String),
    #[error("no usable entries in {}", .0.display())]
    NoEntries(PathBuf),
}

/// Which controller operation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Submit,
    Advance,
}

/// Errors reported synchronously by the session controller.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    /// The operation is illegal in the current state. Always a wiring bug in
    /// the host, never a gameplay outcome.
    #[error("cannot {operation}: {reason}")]
    InvalidState {
        operation: Operation,
        reason: &'static str,
    },
    /// The pool is empty even after fallback substitution.
    #[error("word pool is empty; a session cannot start")]
    EmptyPool,
}

impl GameError {
    pub(crate) fn invalid(operation: Operation, reason: &'static str) -> Self {
        Self::InvalidState { operation, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_message_names_operation() {
        let err = GameError::invalid(Operation::Advance, "round not submitted");
        assert_eq!(err.to_string(), "cannot advance: round not submitted");
    }

    #[test]
    fn data_source_io_message_includes_path() {
        let err = DataSourceError::Io {
            path: PathBuf::from("/tmp/words.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/tmp/words.csv"));
    }
}
