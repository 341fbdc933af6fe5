//! Parameter store error types

use core::fmt;

use crate::parameters::blob::BlobError;
use crate::platform::StorageError;

/// Errors from parameter persistence operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    /// The storage backend reported a failure
    Storage(StorageError),
    /// The persisted record failed integrity validation
    Blob(BlobError),
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::Storage(e) => write!(f, "storage backend: {}", e),
            ParamError::Blob(e) => write!(f, "invalid parameter record: {}", e),
        }
    }
}

impl From<StorageError> for ParamError {
    fn from(err: StorageError) -> Self {
        ParamError::Storage(err)
    }
}

impl From<BlobError> for ParamError {
    fn from(err: BlobError) -> Self {
        ParamError::Blob(err)
    }
}
