//! The open-file tracker.
//!
//! Keeps the editor's selected path valid while the tree changes underneath
//! it: deletes clear it, moves carry it along, and bulk replacement picks a
//! README if there is one.

use crate::event::VfsEvent;
use crate::node::Tree;
use crate::paths;

/// Which file, if any, the editor has open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActiveFile {
    #[default]
    Closed,
    Open(String),
}

impl ActiveFile {
    pub fn path(&self) -> Option<&str> {
        match self {
            ActiveFile::Closed => None,
            ActiveFile::Open(p) => Some(p),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ActiveFile::Open(_))
    }

    pub fn select(&mut self, path: impl Into<String>) {
        *self = ActiveFile::Open(path.into());
    }

    pub fn close(&mut self) {
        *self = ActiveFile::Closed;
    }

    /// Update the selection after a committed mutation.
    ///
    /// `tree` is the tree as of the commit; it is only consulted for
    /// [`VfsEvent::Replaced`].
    pub fn apply(&mut self, event: &VfsEvent, tree: &Tree) {
        match event {
            VfsEvent::Deleted { path } => {
                if self.path().is_some_and(|p| paths::is_within(p, path)) {
                    self.close();
                }
            }
            VfsEvent::Moved { from, to } => {
                if let Some(rebased) = self.path().and_then(|p| paths::rebase(p, from, to)) {
                    *self = ActiveFile::Open(rebased);
                }
            }
            VfsEvent::Replaced => *self = Self::readme_of(tree),
            VfsEvent::Copied { .. } | VfsEvent::Written { .. } | VfsEvent::Created { .. } => {}
        }
    }

    /// First root-level file whose name starts with `readme`, ignoring case.
    pub(crate) fn readme_of(tree: &Tree) -> Self {
        tree.root_dir()
            .iter()
            .find(|(name, node)| node.is_file() && name.to_lowercase().starts_with("readme"))
            .map(|(name, _)| ActiveFile::Open(paths::join(paths::ROOT, name)))
            .unwrap_or_default()
    }
}
