//! File system errors

use super::SyncError;

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
