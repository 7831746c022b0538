//! Error types for workspace filesystem operations.
//!
//! The `Display` strings are user-facing: the shell prints them verbatim and
//! the agent bridge prefixes them with `Error: `.

use thiserror::Error;

/// Result type for store operations.
pub type VfsResult<T> = Result<T, VfsError>;

/// Coarse classification of a [`VfsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The path does not resolve, or resolves to the wrong kind of node.
    NotFound,
    /// A create, move or copy destination is already taken.
    AlreadyExists,
    /// The request is structurally impossible.
    InvalidOperation,
}

/// Failure of a single store operation. The tree is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VfsError {
    #[error("No such file or directory: {0}")]
    NotFound(String),
    #[error("Is a directory: {0}")]
    IsDirectory(String),
    #[error("Not a directory: {0}")]
    NotADirectory(String),
    #[error("Parent directory does not exist: {0}")]
    ParentNotFound(String),
    #[error("File exists: {0}")]
    AlreadyExists(String),
    #[error("Source not found: {0}")]
    SourceNotFound(String),
    #[error("Destination exists: {0}")]
    DestinationExists(String),
    #[error("Cannot find destination parent for: {0}")]
    DestinationParentNotFound(String),
    #[error("Cannot move or copy '{src}' into itself: {dst}")]
    IntoItself { src: String, dst: String },
    #[error("Cannot remove root directory")]
    RootNotRemovable,
    #[error("Invalid name: '{0}'")]
    InvalidName(String),
}

impl VfsError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            VfsError::NotFound(_)
            | VfsError::IsDirectory(_)
            | VfsError::NotADirectory(_)
            | VfsError::ParentNotFound(_)
            | VfsError::SourceNotFound(_)
            | VfsError::DestinationParentNotFound(_) => ErrorKind::NotFound,
            VfsError::AlreadyExists(_) | VfsError::DestinationExists(_) => ErrorKind::AlreadyExists,
            VfsError::IntoItself { .. } | VfsError::RootNotRemovable | VfsError::InvalidName(_) => {
                ErrorKind::InvalidOperation
            }
        }
    }
}
