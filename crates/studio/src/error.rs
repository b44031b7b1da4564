//! Engine error taxonomy

use std::fmt;

use thiserror::Error;

/// Which history stack an operation needed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryDirection::Undo => write!(f, "undo"),
            HistoryDirection::Redo => write!(f, "redo"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudioError {
    /// Unknown view key. The view set is fixed, so this is a caller bug.
    #[error("view not found: {0}")]
    ViewNotFound(String),
    /// Undo/redo requested with an empty stack
    #[error("nothing to {0}")]
    HistoryEmpty(HistoryDirection),
    /// A loaded registry that breaks the fixed view set or id uniqueness
    #[error("invalid scene: {0}")]
    InvalidScene(String),
}

impl StudioError {
    /// Informational errors are shown to the user as a notice, not a failure
    pub fn is_informational(&self) -> bool {
        matches!(self, StudioError::HistoryEmpty(_))
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
