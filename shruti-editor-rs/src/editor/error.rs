use core::fmt;

use crate::storage::StorageError;

/// Errors that can occur when driving the editor with raw indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditorError {
    /// Page index is out of bounds (must be < NUM_PAGES).
    InvalidPageIndex,
    /// Group index is out of bounds (must be < NUM_GROUPS).
    InvalidGroupIndex,
    /// The patch storage rejected a load or save.
    Storage(StorageError),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EditorError::InvalidPageIndex => write!(f, "page index out of range"),
            EditorError::InvalidGroupIndex => write!(f, "group index out of range"),
            EditorError::Storage(e) => write!(f, "storage error: {}", e),
        }
    }
}

impl From<StorageError> for EditorError {
    fn from(e: StorageError) -> Self {
        EditorError::Storage(e)
    }
}
