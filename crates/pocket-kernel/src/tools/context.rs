//! Execution context for builtins.

use pocket_vfs::{Vfs, paths};

use super::traits::ToolSchema;

/// Execution context passed to builtins.
///
/// Holds the workspace handle and the per-shell state a command may read or
/// change.
#[derive(Debug, Clone)]
pub struct ExecContext {
    /// The shared workspace.
    pub vfs: Vfs,
    /// Current working directory, always canonical.
    pub cwd: String,
    /// Render directory names in `ls` with ANSI color.
    pub color: bool,
    /// Tool schemas for the help command.
    pub tool_schemas: Vec<ToolSchema>,
    /// Set by `clear`; the host takes it and wipes its display.
    pub clear_requested: bool,
}

impl ExecContext {
    /// A context rooted at `/`.
    pub fn new(vfs: Vfs) -> Self {
        Self {
            vfs,
            cwd: paths::ROOT.to_string(),
            color: false,
            tool_schemas: Vec::new(),
            clear_requested: false,
        }
    }

    /// Resolve a path relative to cwd.
    pub fn resolve_path(&self, path: &str) -> String {
        paths::resolve(&self.cwd, path)
    }

    /// Change the current working directory.
    pub fn set_cwd(&mut self, path: impl Into<String>) {
        self.cwd = path.into();
    }

    /// Set the available tool schemas (for help command).
    pub fn set_tool_schemas(&mut self, schemas: Vec<ToolSchema>) {
        self.tool_schemas = schemas;
    }
}
