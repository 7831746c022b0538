//! Tree data model.
//!
//! A [`Node`] is either a file holding text or a directory mapping single
//! path segments to child nodes. Children are held behind `Arc`, so a new
//! tree produced by a mutation shares every subtree it did not touch with
//! the tree it was derived from. Nodes are never mutated once they are
//! reachable from a committed [`Tree`].
//!
//! The serialized form is the one the web frontend stores:
//!
//! ```json
//! { "type": "directory",
//!   "children": { "README.md": { "type": "file", "content": "# Hi" } } }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

use crate::entry::{DirEntry, EntryType};
use crate::error::{VfsError, VfsResult};
use crate::paths;

/// Content of the README every fresh workspace starts with.
pub const WELCOME_README: &str = "# Welcome to Pocket Coder!\n\nThis is a blank workspace.\n\nStart by telling the AI what you want to build in the chat view.";

/// A leaf holding text content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub content: String,
}

/// An internal node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    children: BTreeMap<String, Arc<Node>>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a direct child.
    pub fn get(&self, name: &str) -> Option<&Arc<Node>> {
        self.children.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Children in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Node>)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Insert or replace a child, returning the previous one.
    ///
    /// Fails if `name` is not a single path segment.
    pub fn insert(&mut self, name: &str, node: impl Into<Arc<Node>>) -> VfsResult<Option<Arc<Node>>> {
        if !paths::is_valid_name(name) {
            return Err(VfsError::InvalidName(name.to_string()));
        }
        Ok(self.children.insert(name.to_string(), node.into()))
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: &str, node: impl Into<Arc<Node>>) -> VfsResult<Self> {
        self.insert(name, node)?;
        Ok(self)
    }

    /// Insert without checking `name`. Deserialized trees are not validated,
    /// so copying one must carry its names over exactly.
    pub(crate) fn insert_unchecked(&mut self, name: &str, node: Arc<Node>) {
        self.children.insert(name.to_string(), node);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Arc<Node>> {
        self.children.remove(name)
    }

    /// Listing entries for the direct children.
    pub fn entries(&self) -> Vec<DirEntry> {
        self.iter()
            .map(|(name, node)| match node.as_ref() {
                Node::File(_) => DirEntry::file(name),
                Node::Directory(_) => DirEntry::directory(name),
            })
            .collect()
    }
}

/// A file or a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    File(File),
    Directory(Directory),
}

impl Node {
    pub fn file(content: impl Into<String>) -> Self {
        Node::File(File {
            content: content.into(),
        })
    }

    pub fn empty_file() -> Self {
        Node::File(File::default())
    }

    pub fn directory() -> Self {
        Node::Directory(Directory::new())
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Node::File(_))
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Node::File(f) => Some(f),
            Node::Directory(_) => None,
        }
    }

    pub fn as_dir(&self) -> Option<&Directory> {
        match self {
            Node::Directory(d) => Some(d),
            Node::File(_) => None,
        }
    }

    pub fn entry_type(&self) -> EntryType {
        match self {
            Node::File(_) => EntryType::File,
            Node::Directory(_) => EntryType::Directory,
        }
    }
}

impl From<Directory> for Node {
    fn from(dir: Directory) -> Self {
        Node::Directory(dir)
    }
}

impl From<File> for Node {
    fn from(file: File) -> Self {
        Node::File(file)
    }
}

/// A whole workspace tree. The root is always a directory.
///
/// Cloning is an `Arc` clone: a clone is a read-only snapshot that later
/// mutations of the store never affect.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Node")]
pub struct Tree {
    root: Arc<Node>,
}

impl Tree {
    /// An empty tree.
    pub fn new() -> Self {
        Self {
            root: Arc::new(Node::directory()),
        }
    }

    /// The tree a fresh workspace starts with: a single `/README.md`.
    pub fn seeded() -> Self {
        let mut root = Directory::new();
        root.children
            .insert("README.md".to_string(), Arc::new(Node::file(WELCOME_README)));
        Self::from_dir(root)
    }

    pub fn from_dir(root: Directory) -> Self {
        Self {
            root: Arc::new(Node::Directory(root)),
        }
    }

    /// Build a tree from `(path, content)` pairs, creating intermediate
    /// directories as needed. Later entries overwrite earlier files.
    pub fn from_files<I, P, C>(files: I) -> VfsResult<Self>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<String>,
    {
        let mut root = Arc::new(Node::directory());
        for (path, content) in files {
            let path = paths::normalize(path.as_ref());
            let segs = paths::segments(&path);
            let Some((leaf, dirs)) = segs.split_last() else {
                return Err(VfsError::IsDirectory(path));
            };

            let mut current = &mut root;
            for (depth, seg) in dirs.iter().enumerate() {
                let Node::Directory(dir) = Arc::make_mut(current) else {
                    return Err(VfsError::NotADirectory(format!("/{}", segs[..depth].join("/"))));
                };
                current = dir
                    .children
                    .entry((*seg).to_string())
                    .or_insert_with(|| Arc::new(Node::directory()));
            }
            let Node::Directory(dir) = Arc::make_mut(current) else {
                return Err(VfsError::NotADirectory(paths::parent(&path).unwrap_or_default()));
            };
            if dir.get(leaf).is_some_and(|n| n.is_dir()) {
                return Err(VfsError::IsDirectory(path));
            }
            dir.children
                .insert((*leaf).to_string(), Arc::new(Node::file(content)));
        }
        Ok(Self { root })
    }

    /// The root node (always a [`Node::Directory`]).
    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    /// The root directory.
    pub fn root_dir(&self) -> &Directory {
        match self.root.as_ref() {
            Node::Directory(d) => d,
            // Constructors only ever build directory roots.
            Node::File(_) => unreachable!("tree root is always a directory"),
        }
    }

    /// Wrap a node already known to be a directory.
    pub(crate) fn from_root(root: Arc<Node>) -> Self {
        debug_assert!(root.is_dir());
        Self { root }
    }

    /// Serialize to the JSON snapshot form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a JSON snapshot.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Node> for Tree {
    type Error = VfsError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        match node {
            Node::Directory(_) => Ok(Self {
                root: Arc::new(node),
            }),
            Node::File(_) => Err(VfsError::NotADirectory(paths::ROOT.to_string())),
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_tree_has_readme() {
        let tree = Tree::seeded();
        let readme = tree.root_dir().get("README.md").expect("readme");
        assert!(readme.as_file().unwrap().content.starts_with("# Welcome"));
    }

    #[test]
    fn json_shape_matches_frontend() {
        let tree = Tree::from_files([("/a/b.txt", "hi")]).unwrap();
        let json: serde_json::Value = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "directory",
                "children": {
                    "a": {
                        "type": "directory",
                        "children": { "b.txt": { "type": "file", "content": "hi" } }
                    }
                }
            })
        );
        let back = Tree::from_json(&json.to_string()).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn file_root_is_rejected() {
        let err = Tree::from_json(r#"{"type":"file","content":"x"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn from_files_builds_intermediate_dirs() {
        let tree = Tree::from_files([
            ("src/main.rs", "fn main() {}"),
            ("src/lib/mod.rs", ""),
            ("README.md", "# r"),
        ])
        .unwrap();
        let src = tree.root_dir().get("src").unwrap().as_dir().unwrap();
        assert_eq!(src.names().collect::<Vec<_>>(), vec!["lib", "main.rs"]);
    }

    #[test]
    fn from_files_rejects_file_as_directory() {
        let err = Tree::from_files([("a", "x"), ("a/b", "y")]).unwrap_err();
        assert_eq!(err, VfsError::NotADirectory("/a".into()));
    }

    #[test]
    fn insert_rejects_bad_names() {
        let mut dir = Directory::new();
        assert!(dir.insert("a/b", Node::empty_file()).is_err());
        assert!(dir.insert("..", Node::empty_file()).is_err());
        assert!(dir.insert("ok", Node::empty_file()).unwrap().is_none());
    }

    #[test]
    fn entries_carry_name_and_kind() {
        let tree = Tree::from_files([("src/main.rs", "fn main() {}"), ("a.txt", "a")]).unwrap();
        assert_eq!(
            tree.root_dir().entries(),
            vec![DirEntry::file("a.txt"), DirEntry::directory("src")]
        );
        assert!(tree.root_dir().entries()[1].is_dir());
    }
}
