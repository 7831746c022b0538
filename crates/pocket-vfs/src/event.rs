//! Change notifications emitted after each committed mutation.

use serde::Serialize;

/// What a committed mutation did. Paths are canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum VfsEvent {
    /// A file was created or overwritten.
    Written { path: String },
    /// An empty file or directory was created.
    Created { path: String },
    /// A subtree was removed.
    Deleted { path: String },
    /// A subtree was relocated.
    Moved { from: String, to: String },
    /// A subtree was duplicated.
    Copied { from: String, to: String },
    /// The whole tree was swapped out.
    Replaced,
}

impl VfsEvent {
    /// The path the event is primarily about, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            VfsEvent::Written { path } | VfsEvent::Created { path } | VfsEvent::Deleted { path } => Some(path),
            VfsEvent::Moved { to, .. } | VfsEvent::Copied { to, .. } => Some(to),
            VfsEvent::Replaced => None,
        }
    }
}
