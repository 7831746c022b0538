//! Directory listing entries.

use serde::Serialize;

/// Kind of node behind a listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Directory,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::File => "file",
            EntryType::Directory => "directory",
        }
    }
}

/// One child of a directory, as seen by `ls` and `list_files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    /// Name of the entry (not full path).
    pub name: String,
    pub kind: EntryType,
}

impl DirEntry {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryType::Directory,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryType::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryType::Directory
    }
}
