//! Agent tool failures.

use pocket_vfs::VfsError;
use thiserror::Error;

/// Why an agent tool call failed. The executor prefixes the message with
/// `Error: ` before handing it to the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Missing required argument '{field}' for tool '{tool}'")]
    MissingArgument { tool: String, field: String },
    #[error("Unknown tool '{name}'. Available tools: {available}")]
    UnknownTool { name: String, available: String },
    #[error("Directory not found at '{0}'")]
    DirectoryNotFound(String),
    #[error("File not found at '{0}'")]
    FileNotFound(String),
    #[error("Path not found: {0}")]
    PathNotFound(String),
    #[error("Failed to write to {path}: {reason}")]
    WriteFailed { path: String, reason: VfsError },
    #[error("Failed to create directory {path}: {reason}")]
    CreateDirectoryFailed { path: String, reason: VfsError },
    #[error("Search text not found in {0}")]
    SearchTextNotFound(String),
    #[error("Unknown project type '{0}'. Supported types: react, python, node, html")]
    UnknownProjectType(String),
    #[error("Failed to create project directory {0}")]
    ProjectDirectoryFailed(String),
    #[error("Terminal is not available.")]
    TerminalUnavailable,
    #[error(transparent)]
    Vfs(#[from] VfsError),
}
