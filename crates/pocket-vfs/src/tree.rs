//! Lookup and rewrite primitives over a [`Tree`].
//!
//! Lookups borrow from the tree. Rewrites never touch the input: they return
//! a new tree in which only the directories on the path from the root to the
//! edited directory are fresh allocations. Every other subtree is shared.

use std::sync::Arc;

use crate::node::{Directory, Node, Tree};
use crate::paths;

/// Find the node at a canonical path.
///
/// `/` (or an empty path) names the root. Returns `None` when a segment is
/// missing or an intermediate segment is a file.
pub fn find_node<'a>(tree: &'a Tree, path: &str) -> Option<&'a Arc<Node>> {
    let mut current = tree.root();
    for seg in paths::segments(path) {
        current = current.as_dir()?.get(seg)?;
    }
    Some(current)
}

/// Find the directory that would hold `path`, plus the final segment.
///
/// Returns `None` for the root or when the parent is missing or is a file.
/// The final segment itself need not exist.
pub fn find_parent_and_name<'a, 'p>(tree: &'a Tree, path: &'p str) -> Option<(&'a Directory, &'p str)> {
    let name = paths::file_name(path)?;
    let parent = paths::parent(path)?;
    let dir = find_node(tree, &parent)?.as_dir()?;
    Some((dir, name))
}

/// Recursively copy a subtree into fresh allocations.
pub fn deep_copy(node: &Node) -> Node {
    match node {
        Node::File(f) => Node::File(f.clone()),
        Node::Directory(d) => {
            let mut copy = Directory::new();
            for (name, child) in d.iter() {
                copy.insert_unchecked(name, Arc::new(deep_copy(child)));
            }
            Node::Directory(copy)
        }
    }
}

/// Return a new tree in which `parent_path/name` is set to `child`, or
/// removed when `child` is `None`.
///
/// Returns `None` when `parent_path` does not name a directory or `name` is
/// not a valid segment.
pub fn set_child(tree: &Tree, parent_path: &str, name: &str, child: Option<Arc<Node>>) -> Option<Tree> {
    let segs = paths::segments(parent_path);
    let root = rewrite(tree.root(), &segs, name, child)?;
    Some(Tree::from_root(root))
}

fn rewrite(node: &Arc<Node>, segs: &[&str], name: &str, child: Option<Arc<Node>>) -> Option<Arc<Node>> {
    let dir = node.as_dir()?;
    let mut next = dir.clone();
    match segs.split_first() {
        None => match child {
            Some(c) => {
                next.insert(name, c).ok()?;
            }
            None => {
                next.remove(name);
            }
        },
        Some((first, rest)) => {
            let rewritten = rewrite(dir.get(first)?, rest, name, child)?;
            next.insert(first, rewritten).ok()?;
        }
    }
    Some(Arc::new(Node::Directory(next)))
}
