//! Cloneable handle to one shared [`VfsStore`].
//!
//! The editor, the shell and the agent bridge each hold a [`Vfs`]. Every
//! call takes the lock for its whole duration, so calls from different
//! holders are applied one after another and each sees its predecessor's
//! result.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::broadcast;

use crate::entry::DirEntry;
use crate::error::VfsResult;
use crate::event::VfsEvent;
use crate::node::{Node, Tree};
use crate::selection::ActiveFile;
use crate::store::VfsStore;

#[derive(Debug, Clone, Default)]
pub struct Vfs {
    inner: Arc<RwLock<VfsStore>>,
}

impl Vfs {
    /// A handle over a freshly seeded store.
    pub fn new() -> Self {
        Self::from_store(VfsStore::new())
    }

    pub fn with_tree(tree: Tree) -> Self {
        Self::from_store(VfsStore::with_tree(tree))
    }

    pub fn from_store(store: VfsStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    // A commit is a single assignment, so a poisoned lock still guards a
    // consistent store.
    fn read_store(&self) -> RwLockReadGuard<'_, VfsStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, VfsStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The committed tree. Later mutations never show through it.
    pub fn snapshot(&self) -> Tree {
        self.read_store().tree().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<VfsEvent> {
        self.read_store().subscribe()
    }

    pub fn active_file(&self) -> ActiveFile {
        self.read_store().active_file().clone()
    }

    pub fn select(&self, path: &str) -> VfsResult<()> {
        self.write_store().select(path)
    }

    pub fn close(&self) {
        self.write_store().close()
    }

    pub fn find(&self, path: &str) -> Option<Arc<Node>> {
        self.read_store().find(path)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.read_store().exists(path)
    }

    pub fn read(&self, path: &str) -> VfsResult<String> {
        self.read_store().read(path)
    }

    pub fn list(&self, path: &str) -> VfsResult<Vec<DirEntry>> {
        self.read_store().list(path)
    }

    pub fn structure(&self, path: &str) -> VfsResult<String> {
        self.read_store().structure(path)
    }

    pub fn write(&self, path: &str, content: impl Into<String>) -> VfsResult<()> {
        self.write_store().write(path, content)
    }

    pub fn create_file(&self, path: &str) -> VfsResult<()> {
        self.write_store().create_file(path)
    }

    pub fn create_directory(&self, path: &str) -> VfsResult<()> {
        self.write_store().create_directory(path)
    }

    pub fn create_node(&self, path: &str, node: Arc<Node>) -> VfsResult<()> {
        self.write_store().create_node(path, node)
    }

    pub fn delete(&self, path: &str) -> VfsResult<()> {
        self.write_store().delete(path)
    }

    pub fn move_node(&self, src: &str, dst: &str) -> VfsResult<String> {
        self.write_store().move_node(src, dst)
    }

    pub fn copy_node(&self, src: &str, dst: &str) -> VfsResult<String> {
        self.write_store().copy_node(src, dst)
    }

    pub fn rename(&self, path: &str, new_name: &str) -> VfsResult<String> {
        self.write_store().rename(path, new_name)
    }

    pub fn replace_all(&self, tree: Tree) {
        self.write_store().replace_all(tree)
    }

    /// Run `f` against the store under one write lock, so a read-modify-write
    /// sequence cannot interleave with other holders.
    pub fn transaction<T>(&self, f: impl FnOnce(&mut VfsStore) -> T) -> T {
        f(&mut self.write_store())
    }
}
