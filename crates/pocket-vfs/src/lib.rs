//! In-memory workspace filesystem for pocket.
//!
//! One tree of text files and directories, shared by the editor, the shell
//! and the agent bridge. Mutations are copy-on-write over `Arc`-linked nodes:
//! each commit installs a new root that shares every untouched subtree with
//! the previous one, so snapshots are cheap and never change.

pub mod entry;
pub mod error;
pub mod event;
pub mod node;
pub mod paths;
pub mod selection;
pub mod shared;
pub mod store;
pub mod tree;

pub use entry::{DirEntry, EntryType};
pub use error::{ErrorKind, VfsError, VfsResult};
pub use event::VfsEvent;
pub use node::{Directory, File, Node, Tree, WELCOME_README};
pub use selection::ActiveFile;
pub use shared::Vfs;
pub use store::VfsStore;
