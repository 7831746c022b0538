//! The mutation engine.
//!
//! [`VfsStore`] owns the current tree and the open-file tracker. Each
//! operation builds a candidate tree from the committed one, and only when
//! every check has passed swaps it in. A failed operation returns before the
//! swap, so the committed tree is never half-updated.
//!
//! After each commit the store derives a [`VfsEvent`], feeds it to the
//! tracker and broadcasts it to subscribers.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::entry::DirEntry;
use crate::error::{VfsError, VfsResult};
use crate::event::VfsEvent;
use crate::node::{Directory, Node, Tree};
use crate::paths;
use crate::selection::ActiveFile;
use crate::tree::{deep_copy, find_node, find_parent_and_name, set_child};

const EVENT_CAPACITY: usize = 64;

/// Single owner of the workspace tree.
#[derive(Debug)]
pub struct VfsStore {
    tree: Tree,
    active: ActiveFile,
    events: broadcast::Sender<VfsEvent>,
}

impl Default for VfsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VfsStore {
    /// A store holding the seeded workspace with `/README.md` open.
    pub fn new() -> Self {
        let tree = Tree::seeded();
        let active = ActiveFile::readme_of(&tree);
        Self {
            active,
            ..Self::with_tree(tree)
        }
    }

    pub fn with_tree(tree: Tree) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            tree,
            active: ActiveFile::Closed,
            events,
        }
    }

    /// The committed tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn active_file(&self) -> &ActiveFile {
        &self.active
    }

    /// Receive an event for every commit made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<VfsEvent> {
        self.events.subscribe()
    }

    // --- reads ---

    pub fn find(&self, path: &str) -> Option<Arc<Node>> {
        find_node(&self.tree, &paths::normalize(path)).cloned()
    }

    pub fn exists(&self, path: &str) -> bool {
        find_node(&self.tree, &paths::normalize(path)).is_some()
    }

    /// Read a file's content.
    pub fn read(&self, path: &str) -> VfsResult<String> {
        let path = paths::normalize(path);
        match find_node(&self.tree, &path).map(AsRef::as_ref) {
            Some(Node::File(f)) => Ok(f.content.clone()),
            Some(Node::Directory(_)) => Err(VfsError::IsDirectory(path)),
            None => Err(VfsError::NotFound(path)),
        }
    }

    /// List a directory's children in name order.
    pub fn list(&self, path: &str) -> VfsResult<Vec<DirEntry>> {
        let path = paths::normalize(path);
        match find_node(&self.tree, &path).map(AsRef::as_ref) {
            Some(Node::Directory(d)) => Ok(d.entries()),
            Some(Node::File(_)) => Err(VfsError::NotADirectory(path)),
            None => Err(VfsError::NotFound(path)),
        }
    }

    /// Indented outline of the subtree at `path`, one `- name` per line.
    /// A directory's children follow it, two spaces deeper.
    pub fn structure(&self, path: &str) -> VfsResult<String> {
        let path = paths::normalize(path);
        let node = find_node(&self.tree, &path).ok_or_else(|| VfsError::NotFound(path.clone()))?;
        let dir = node.as_dir().ok_or(VfsError::NotADirectory(path))?;
        let mut out = Vec::new();
        outline(dir, 0, &mut out);
        Ok(out.join("\n"))
    }

    // --- mutations ---

    /// Set a file's content, creating the file if its parent exists.
    ///
    /// Never creates intermediate directories.
    pub fn write(&mut self, path: &str, content: impl Into<String>) -> VfsResult<()> {
        let path = paths::normalize(path);
        if path == paths::ROOT {
            return Err(VfsError::IsDirectory(path));
        }
        let (parent, name) = find_parent_and_name(&self.tree, &path)
            .ok_or_else(|| VfsError::ParentNotFound(path.clone()))?;
        if parent.get(name).is_some_and(|n| n.is_dir()) {
            return Err(VfsError::IsDirectory(path));
        }
        let node = Arc::new(Node::file(content));
        let next = self.rewrite(&path, Some(node))?;
        self.commit(next, VfsEvent::Written { path });
        Ok(())
    }

    /// Create an empty file. Fails if anything already exists at `path`.
    pub fn create_file(&mut self, path: &str) -> VfsResult<()> {
        self.create_node(path, Arc::new(Node::empty_file()))
    }

    /// Create an empty directory. Fails if anything already exists at `path`.
    pub fn create_directory(&mut self, path: &str) -> VfsResult<()> {
        self.create_node(path, Arc::new(Node::directory()))
    }

    /// Graft `node` (a file or a whole subtree) at `path` in one commit.
    /// Fails if anything already exists there.
    pub fn create_node(&mut self, path: &str, node: Arc<Node>) -> VfsResult<()> {
        let path = paths::normalize(path);
        if path == paths::ROOT {
            return Err(VfsError::AlreadyExists(path));
        }
        let (parent, name) = find_parent_and_name(&self.tree, &path)
            .ok_or_else(|| VfsError::ParentNotFound(path.clone()))?;
        if parent.contains(name) {
            return Err(VfsError::AlreadyExists(path));
        }
        let next = self.rewrite(&path, Some(node))?;
        self.commit(next, VfsEvent::Created { path });
        Ok(())
    }

    /// Remove a file or a whole subtree.
    pub fn delete(&mut self, path: &str) -> VfsResult<()> {
        let path = paths::normalize(path);
        if path == paths::ROOT {
            return Err(VfsError::RootNotRemovable);
        }
        if find_node(&self.tree, &path).is_none() {
            return Err(VfsError::NotFound(path));
        }
        let next = self.rewrite(&path, None)?;
        self.commit(next, VfsEvent::Deleted { path });
        Ok(())
    }

    /// Relocate `src`. Returns the final destination path.
    ///
    /// When `dst` is an existing directory the node lands inside it under its
    /// own name, as `mv` does.
    pub fn move_node(&mut self, src: &str, dst: &str) -> VfsResult<String> {
        let (src, node, to) = self.plan_transfer(src, dst)?;
        let without = self.rewrite(&src, None)?;
        let next = rewrite_in(&without, &to, Some(node))?;
        self.commit(next, VfsEvent::Moved { from: src, to: to.clone() });
        Ok(to)
    }

    /// Duplicate `src` with the destination rules of [`move_node`](Self::move_node).
    /// Returns the final destination path.
    pub fn copy_node(&mut self, src: &str, dst: &str) -> VfsResult<String> {
        let (src, node, to) = self.plan_transfer(src, dst)?;
        let next = self.rewrite(&to, Some(Arc::new(deep_copy(&node))))?;
        self.commit(next, VfsEvent::Copied { from: src, to: to.clone() });
        Ok(to)
    }

    /// Rename the last segment of `path`. Returns the new path.
    pub fn rename(&mut self, path: &str, new_name: &str) -> VfsResult<String> {
        if !paths::is_valid_name(new_name) {
            return Err(VfsError::InvalidName(new_name.to_string()));
        }
        let path = paths::normalize(path);
        let (Some(parent), Some(old_name)) = (paths::parent(&path), paths::file_name(&path)) else {
            return Err(VfsError::SourceNotFound(path));
        };
        if old_name == new_name {
            if find_node(&self.tree, &path).is_none() {
                return Err(VfsError::SourceNotFound(path));
            }
            return Ok(path);
        }
        self.move_node(&path, &paths::join(&parent, new_name))
    }

    /// Swap in a whole new tree and reset the selection to its README.
    pub fn replace_all(&mut self, tree: Tree) {
        tracing::info!(entries = tree.root_dir().len(), "replacing workspace tree");
        self.commit(tree, VfsEvent::Replaced);
    }

    // --- selection ---

    /// Open a file in the editor.
    pub fn select(&mut self, path: &str) -> VfsResult<()> {
        let path = paths::normalize(path);
        match find_node(&self.tree, &path).map(AsRef::as_ref) {
            Some(Node::File(_)) => {
                self.active.select(path);
                Ok(())
            }
            Some(Node::Directory(_)) => Err(VfsError::IsDirectory(path)),
            None => Err(VfsError::NotFound(path)),
        }
    }

    pub fn close(&mut self) {
        self.active.close();
    }

    // --- internals ---

    /// Validate a move or copy and resolve its final destination.
    fn plan_transfer(&self, src: &str, dst: &str) -> VfsResult<(String, Arc<Node>, String)> {
        let src = paths::normalize(src);
        let dst = paths::normalize(dst);
        if src == paths::ROOT {
            return Err(VfsError::SourceNotFound(src));
        }
        let node = find_node(&self.tree, &src)
            .cloned()
            .ok_or_else(|| VfsError::SourceNotFound(src.clone()))?;

        let to = match (find_node(&self.tree, &dst), paths::file_name(&src)) {
            (Some(d), Some(name)) if d.is_dir() => paths::join(&dst, name),
            _ => dst,
        };
        if find_node(&self.tree, &to).is_some() {
            return Err(VfsError::DestinationExists(to));
        }
        if paths::is_within(&to, &src) {
            return Err(VfsError::IntoItself { src, dst: to });
        }
        if find_parent_and_name(&self.tree, &to).is_none() {
            return Err(VfsError::DestinationParentNotFound(to));
        }
        Ok((src, node, to))
    }

    fn rewrite(&self, path: &str, node: Option<Arc<Node>>) -> VfsResult<Tree> {
        rewrite_in(&self.tree, path, node)
    }

    fn commit(&mut self, tree: Tree, event: VfsEvent) {
        tracing::debug!(?event, "commit");
        self.tree = tree;
        self.active.apply(&event, &self.tree);
        // No receivers is fine.
        let _ = self.events.send(event);
    }
}

fn rewrite_in(tree: &Tree, path: &str, node: Option<Arc<Node>>) -> VfsResult<Tree> {
    let (Some(parent), Some(name)) = (paths::parent(path), paths::file_name(path)) else {
        return Err(VfsError::IsDirectory(path.to_string()));
    };
    set_child(tree, &parent, name, node).ok_or_else(|| VfsError::ParentNotFound(path.to_string()))
}

fn outline(dir: &Directory, depth: usize, out: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for (name, node) in dir.iter() {
        out.push(format!("{indent}- {name}"));
        if let Node::Directory(d) = node.as_ref() {
            outline(d, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn store() -> VfsStore {
        VfsStore::with_tree(
            Tree::from_files([
                ("/README.md", "# hi"),
                ("/src/main.rs", "fn main() {}"),
                ("/src/lib/mod.rs", "pub mod x;"),
                ("/dst/keep.txt", "k"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn new_store_is_seeded() {
        let s = VfsStore::new();
        assert!(s.read("/README.md").unwrap().contains("Pocket Coder"));
        assert_eq!(s.active_file(), &ActiveFile::Open("/README.md".into()));
    }

    #[test]
    fn read_errors() {
        let s = store();
        assert_eq!(s.read("/src"), Err(VfsError::IsDirectory("/src".into())));
        assert_eq!(s.read("/nope"), Err(VfsError::NotFound("/nope".into())));
    }

    #[test]
    fn write_upserts_but_never_creates_dirs() {
        let mut s = store();
        s.write("/src/new.rs", "x").unwrap();
        assert_eq!(s.read("/src/new.rs").unwrap(), "x");
        s.write("/src/new.rs", "y").unwrap();
        assert_eq!(s.read("/src/new.rs").unwrap(), "y");

        let err = s.write("/a/b/c.txt", "z").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!s.exists("/a"));
    }

    #[test]
    fn write_refuses_directories_and_root() {
        let mut s = store();
        assert_eq!(s.write("/src", "x"), Err(VfsError::IsDirectory("/src".into())));
        assert_eq!(s.write("/", "x"), Err(VfsError::IsDirectory("/".into())));
    }

    #[test]
    fn create_conflicts() {
        let mut s = store();
        s.create_file("/src/a.rs").unwrap();
        assert_eq!(s.read("/src/a.rs").unwrap(), "");
        assert_eq!(
            s.create_file("/src/a.rs"),
            Err(VfsError::AlreadyExists("/src/a.rs".into()))
        );
        assert_eq!(
            s.create_directory("/src"),
            Err(VfsError::AlreadyExists("/src".into()))
        );
        assert_eq!(
            s.create_directory("/x/y"),
            Err(VfsError::ParentNotFound("/x/y".into()))
        );
    }

    #[test]
    fn create_node_grafts_subtree_in_one_commit() {
        let mut s = store();
        let mut rx = s.subscribe();
        let sub = Tree::from_files([("src/app.js", "x"), ("index.html", "<p>")]).unwrap();
        s.create_node("/dst/site", sub.root().clone()).unwrap();
        assert_eq!(s.read("/dst/site/src/app.js").unwrap(), "x");
        assert_eq!(s.read("/dst/site/index.html").unwrap(), "<p>");
        assert_eq!(rx.try_recv().unwrap(), VfsEvent::Created { path: "/dst/site".into() });
        assert!(rx.try_recv().is_err());

        assert_eq!(
            s.create_node("/dst/site", sub.root().clone()),
            Err(VfsError::AlreadyExists("/dst/site".into()))
        );
    }

    #[test]
    fn delete_subtree_and_root() {
        let mut s = store();
        s.delete("/src").unwrap();
        assert!(!s.exists("/src/lib/mod.rs"));
        assert_eq!(s.delete("/src"), Err(VfsError::NotFound("/src".into())));
        assert_eq!(s.delete("/"), Err(VfsError::RootNotRemovable));
    }

    #[test]
    fn move_into_existing_directory() {
        let mut s = store();
        let to = s.move_node("/src/main.rs", "/dst").unwrap();
        assert_eq!(to, "/dst/main.rs");
        assert_eq!(s.read("/dst/main.rs").unwrap(), "fn main() {}");
        assert!(!s.exists("/src/main.rs"));
    }

    #[test]
    fn move_into_root() {
        let mut s = store();
        assert_eq!(s.move_node("/src/main.rs", "/").unwrap(), "/main.rs");
    }

    #[test]
    fn move_failures_leave_tree() {
        let mut s = store();
        let before = s.tree().clone();
        assert_eq!(
            s.move_node("/missing", "/x"),
            Err(VfsError::SourceNotFound("/missing".into()))
        );
        assert_eq!(
            s.move_node("/dst/keep.txt", "/README.md"),
            Err(VfsError::DestinationExists("/README.md".into()))
        );
        assert_eq!(
            s.move_node("/README.md", "/no/where.md"),
            Err(VfsError::DestinationParentNotFound("/no/where.md".into()))
        );
        assert_eq!(
            s.move_node("/src", "/src/lib"),
            Err(VfsError::IntoItself {
                src: "/src".into(),
                dst: "/src/lib/src".into()
            })
        );
        assert_eq!(s.move_node("/", "/dst"), Err(VfsError::SourceNotFound("/".into())));
        assert_eq!(s.tree(), &before);
        assert!(Arc::ptr_eq(s.tree().root(), before.root()));
    }

    #[test]
    fn move_rebases_selection() {
        let mut s = store();
        s.select("/src/lib/mod.rs").unwrap();
        s.move_node("/src", "/code").unwrap();
        assert_eq!(s.active_file().path(), Some("/code/lib/mod.rs"));
    }

    #[test]
    fn copy_is_independent() {
        let mut s = store();
        let to = s.copy_node("/src", "/dst").unwrap();
        assert_eq!(to, "/dst/src");
        s.write("/dst/src/main.rs", "changed").unwrap();
        assert_eq!(s.read("/src/main.rs").unwrap(), "fn main() {}");
    }

    #[test]
    fn copy_into_itself_is_refused() {
        let mut s = store();
        assert_eq!(s.copy_node("/src", "/src").unwrap_err().kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn rename_cases() {
        let mut s = store();
        assert_eq!(s.rename("/src/main.rs", "app.rs").unwrap(), "/src/app.rs");
        assert_eq!(s.rename("/src/app.rs", "app.rs").unwrap(), "/src/app.rs");
        assert_eq!(s.rename("/src/app.rs", "a/b"), Err(VfsError::InvalidName("a/b".into())));
        assert_eq!(s.rename("/src/app.rs", ".."), Err(VfsError::InvalidName("..".into())));
        assert_eq!(
            s.rename("/src/app.rs", "mod.rs"),
            Ok("/src/mod.rs".into())
        );
        assert_eq!(
            s.rename("/src/mod.rs", "lib"),
            Err(VfsError::DestinationExists("/src/lib/mod.rs".into()))
        );
    }

    #[test]
    fn delete_clears_selection() {
        let mut s = store();
        s.select("/src/main.rs").unwrap();
        s.delete("/src").unwrap();
        assert_eq!(s.active_file(), &ActiveFile::Closed);
    }

    #[test]
    fn select_refuses_directories() {
        let mut s = store();
        assert_eq!(s.select("/src"), Err(VfsError::IsDirectory("/src".into())));
        assert_eq!(s.select("/nope"), Err(VfsError::NotFound("/nope".into())));
    }

    #[test]
    fn replace_all_selects_readme() {
        let mut s = store();
        s.replace_all(Tree::from_files([("/readme.txt", "r"), ("/z.rs", "")]).unwrap());
        assert_eq!(s.active_file().path(), Some("/readme.txt"));
        s.replace_all(Tree::new());
        assert_eq!(s.active_file(), &ActiveFile::Closed);
    }

    #[test]
    fn structure_outline() {
        let s = store();
        assert_eq!(
            s.structure("/").unwrap(),
            "- README.md\n- dst\n  - keep.txt\n- src\n  - lib\n    - mod.rs\n  - main.rs"
        );
    }

    #[test]
    fn subscribers_see_commits() {
        let mut s = store();
        let mut rx = s.subscribe();
        s.create_directory("/new").unwrap();
        let _ = s.delete("/missing");
        s.move_node("/new", "/old").unwrap();
        assert_eq!(rx.try_recv().unwrap(), VfsEvent::Created { path: "/new".into() });
        assert_eq!(
            rx.try_recv().unwrap(),
            VfsEvent::Moved {
                from: "/new".into(),
                to: "/old".into()
            }
        );
        assert!(rx.try_recv().is_err());
    }
}
