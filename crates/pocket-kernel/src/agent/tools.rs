//! The agent tool catalog.
//!
//! Each tool wraps one or two workspace calls and turns the outcome into a
//! sentence for the model. Paths from the model are resolved against `/`,
//! while messages echo the path exactly as the model wrote it.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use pocket_vfs::{Node, Vfs, paths};

use super::error::ToolError;
use super::scaffold::CreateProjectScaffold;
use crate::shell::CommandRunner;
use crate::tools::{ParamSchema, ToolArgs, ToolSchema};

// === Tool name constants ===

pub const LIST_FILES: &str = "list_files";
pub const READ_FILE: &str = "read_file";
pub const WRITE_FILE: &str = "write_file";
pub const MODIFY_FILE: &str = "modify_file";
pub const CREATE_DIRECTORY: &str = "create_directory";
pub const DELETE: &str = "delete_file_or_directory";
pub const COPY: &str = "copy_file_or_directory";
pub const MOVE: &str = "move_file_or_directory";
pub const DETECT_PROJECT_TYPE: &str = "detect_project_type";
pub const CREATE_PROJECT_SCAFFOLD: &str = "create_project_scaffold";
pub const SEARCH_IN_FILES: &str = "search_in_files";
pub const EXECUTE_TERMINAL_COMMAND: &str = "execute_terminal_command";
pub const GET_FILE_INFO: &str = "get_file_info";

/// What a tool call can reach.
#[derive(Clone)]
pub struct AgentEnv {
    pub vfs: Vfs,
    /// Shell access for `execute_terminal_command`, if the host has one.
    pub runner: Option<Arc<dyn CommandRunner>>,
}

impl AgentEnv {
    pub fn new(vfs: Vfs) -> Self {
        Self { vfs, runner: None }
    }
}

impl std::fmt::Debug for AgentEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentEnv")
            .field("vfs", &self.vfs)
            .field("runner", &self.runner.is_some())
            .finish()
    }
}

/// A tool the model can call.
#[async_trait]
pub trait AgentTool: Send + Sync {
    fn schema(&self) -> ToolSchema;

    async fn call(&self, args: &ToolArgs, env: &AgentEnv) -> Result<String, ToolError>;
}

/// Every catalog tool, in the order they are offered to the model.
pub fn catalog() -> Vec<Arc<dyn AgentTool>> {
    vec![
        Arc::new(ListFiles),
        Arc::new(ReadFile),
        Arc::new(WriteFile),
        Arc::new(ModifyFile),
        Arc::new(CreateDirectory),
        Arc::new(DeletePath),
        Arc::new(CopyPath),
        Arc::new(MovePath),
        Arc::new(DetectProjectType),
        Arc::new(CreateProjectScaffold),
        Arc::new(SearchInFiles),
        Arc::new(ExecuteTerminalCommand),
        Arc::new(GetFileInfo),
    ]
}

// === Helpers ===

pub(super) fn require<'a>(args: &'a ToolArgs, tool: &str, field: &str) -> Result<&'a str, ToolError> {
    args.get_named(field).ok_or_else(|| ToolError::MissingArgument {
        tool: tool.to_string(),
        field: field.to_string(),
    })
}

pub(super) fn resolve(raw: &str) -> String {
    paths::resolve(paths::ROOT, raw)
}

fn path_param(name: &str, description: &str) -> ParamSchema {
    ParamSchema::required(name, "string", description)
}

// === Tool implementations ===

pub struct ListFiles;

#[async_trait]
impl AgentTool for ListFiles {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            LIST_FILES,
            "List all files and directories within a specified directory. Use '.' for the root directory.",
        )
        .param(path_param("directory_path", "The path to the directory to inspect."))
    }

    async fn call(&self, args: &ToolArgs, env: &AgentEnv) -> Result<String, ToolError> {
        let raw = require(args, LIST_FILES, "directory_path")?;
        let entries = env
            .vfs
            .list(&resolve(raw))
            .map_err(|_| ToolError::DirectoryNotFound(raw.to_string()))?;
        Ok(entries.into_iter().map(|e| e.name).collect::<Vec<_>>().join("\n"))
    }
}

pub struct ReadFile;

#[async_trait]
impl AgentTool for ReadFile {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            READ_FILE,
            "Read the full contents of a single file. Returns error message if file doesn't exist.",
        )
        .param(path_param("file_path", "The path to the file to be read."))
    }

    async fn call(&self, args: &ToolArgs, env: &AgentEnv) -> Result<String, ToolError> {
        let raw = require(args, READ_FILE, "file_path")?;
        env.vfs
            .read(&resolve(raw))
            .map_err(|_| ToolError::FileNotFound(raw.to_string()))
    }
}

pub struct WriteFile;

#[async_trait]
impl AgentTool for WriteFile {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            WRITE_FILE,
            "Write content to a file. Creates the file if it doesn't exist, overwrites it if it does. The parent directory must exist. Opens the file in the editor.",
        )
        .param(path_param("file_path", "The path of the file to be written to."))
        .param(ParamSchema::required("content", "string", "The new content to write to the file."))
    }

    async fn call(&self, args: &ToolArgs, env: &AgentEnv) -> Result<String, ToolError> {
        let raw = require(args, WRITE_FILE, "file_path")?;
        let content = require(args, WRITE_FILE, "content")?;
        let path = resolve(raw);
        env.vfs
            .transaction(|store| {
                store.write(&path, content)?;
                store.select(&path)
            })
            .map_err(|reason| ToolError::WriteFailed {
                path: raw.to_string(),
                reason,
            })?;
        Ok(format!("Successfully wrote to {raw}"))
    }
}

pub struct ModifyFile;

#[async_trait]
impl AgentTool for ModifyFile {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            MODIFY_FILE,
            "Replace the first exact occurrence of a text snippet in a file. Useful for targeted edits without rewriting the whole file.",
        )
        .param(path_param("file_path", "The path to the file to modify."))
        .param(ParamSchema::required("search_text", "string", "The text to find and replace (exact match)."))
        .param(ParamSchema::required("replacement_text", "string", "The text to replace it with."))
    }

    async fn call(&self, args: &ToolArgs, env: &AgentEnv) -> Result<String, ToolError> {
        let raw = require(args, MODIFY_FILE, "file_path")?;
        let search = require(args, MODIFY_FILE, "search_text")?;
        let replacement = require(args, MODIFY_FILE, "replacement_text")?;
        let path = resolve(raw);

        env.vfs.transaction(|store| {
            let current = store
                .read(&path)
                .map_err(|_| ToolError::FileNotFound(raw.to_string()))?;
            if !current.contains(search) {
                return Err(ToolError::SearchTextNotFound(raw.to_string()));
            }
            store.write(&path, current.replacen(search, replacement, 1))?;
            store.select(&path)?;
            Ok(())
        })?;
        Ok(format!("Successfully modified {raw}"))
    }
}

pub struct CreateDirectory;

#[async_trait]
impl AgentTool for CreateDirectory {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            CREATE_DIRECTORY,
            "Create a new, empty directory at the specified path. The parent directory must exist.",
        )
        .param(path_param("directory_path", "The path for the new directory."))
    }

    async fn call(&self, args: &ToolArgs, env: &AgentEnv) -> Result<String, ToolError> {
        let raw = require(args, CREATE_DIRECTORY, "directory_path")?;
        env.vfs
            .create_directory(&resolve(raw))
            .map_err(|reason| ToolError::CreateDirectoryFailed {
                path: raw.to_string(),
                reason,
            })?;
        Ok(format!("Successfully created directory {raw}"))
    }
}

pub struct DeletePath;

#[async_trait]
impl AgentTool for DeletePath {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            DELETE,
            "Delete a file or directory. Use with caution - operation cannot be undone.",
        )
        .param(path_param("path", "The path to the file or directory to delete."))
    }

    async fn call(&self, args: &ToolArgs, env: &AgentEnv) -> Result<String, ToolError> {
        let raw = require(args, DELETE, "path")?;
        env.vfs.delete(&resolve(raw))?;
        Ok(format!("Successfully deleted {raw}"))
    }
}

pub struct CopyPath;

#[async_trait]
impl AgentTool for CopyPath {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            COPY,
            "Copy a file or directory to another location. Useful for duplicating or backing up files.",
        )
        .param(path_param("source_path", "The path to the source file or directory."))
        .param(path_param("destination_path", "The path where to copy the file or directory."))
    }

    async fn call(&self, args: &ToolArgs, env: &AgentEnv) -> Result<String, ToolError> {
        let src = require(args, COPY, "source_path")?;
        let dst = require(args, COPY, "destination_path")?;
        env.vfs.copy_node(&resolve(src), &resolve(dst))?;
        Ok(format!("Successfully copied {src} to {dst}"))
    }
}

pub struct MovePath;

#[async_trait]
impl AgentTool for MovePath {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            MOVE,
            "Move/rename a file or directory. Can be used for both moving to different location and renaming.",
        )
        .param(path_param("source_path", "The current path of the file or directory."))
        .param(path_param("destination_path", "The new path for the file or directory."))
    }

    async fn call(&self, args: &ToolArgs, env: &AgentEnv) -> Result<String, ToolError> {
        let src = require(args, MOVE, "source_path")?;
        let dst = require(args, MOVE, "destination_path")?;
        env.vfs.move_node(&resolve(src), &resolve(dst))?;
        Ok(format!("Successfully moved {src} to {dst}"))
    }
}

pub struct DetectProjectType;

impl DetectProjectType {
    fn classify(env: &AgentEnv, dir: &str, names: &[String]) -> (&'static str, Vec<&'static str>) {
        let has = |n: &str| names.iter().any(|f| f == n);
        let has_ext = |ext: &str| names.iter().any(|f| f.ends_with(ext));

        if has("package.json") {
            let Ok(text) = env.vfs.read(&paths::join(dir, "package.json")) else {
                return ("unknown", Vec::new());
            };
            return match serde_json::from_str::<Value>(&text) {
                Ok(manifest) if depends_on(&manifest, "react") => (
                    "React",
                    vec!["This is a React project. You can use npm/yarn commands for package management."],
                ),
                Ok(manifest) if depends_on(&manifest, "express") => {
                    ("Node.js/Express", vec!["This is a Node.js Express project."])
                }
                Ok(_) => ("Node.js", vec!["This is a Node.js project."]),
                Err(_) => ("unknown", vec!["Found package.json but couldn't parse it."]),
            };
        }
        if has("requirements.txt") || has("pyproject.toml") || has_ext(".py") {
            return (
                "Python",
                vec!["This is a Python project. You can use pip for package management."],
            );
        }
        if has("index.html") && (has_ext(".css") || has_ext(".js")) {
            return ("HTML/CSS/JavaScript", vec!["This is a web project with HTML/CSS/JavaScript."]);
        }
        if has("Cargo.toml") {
            return ("Rust", vec!["This is a Rust project."]);
        }
        if has("go.mod") {
            return ("Go", vec!["This is a Go project."]);
        }
        ("unknown", Vec::new())
    }
}

fn depends_on(manifest: &Value, package: &str) -> bool {
    ["dependencies", "devDependencies"]
        .iter()
        .any(|section| manifest.get(section).and_then(|deps| deps.get(package)).is_some())
}

#[async_trait]
impl AgentTool for DetectProjectType {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            DETECT_PROJECT_TYPE,
            "Analyze the project structure to detect the project type and suggest appropriate development setup.",
        )
        .param(path_param("root_directory", "The root directory to analyze (usually '.')."))
    }

    async fn call(&self, args: &ToolArgs, env: &AgentEnv) -> Result<String, ToolError> {
        let raw = require(args, DETECT_PROJECT_TYPE, "root_directory")?;
        let dir = resolve(raw);
        let names: Vec<String> = env
            .vfs
            .list(&dir)
            .map_err(|_| ToolError::DirectoryNotFound(raw.to_string()))?
            .into_iter()
            .map(|e| e.name)
            .collect();
        let (project_type, suggestions) = Self::classify(env, &dir, &names);
        Ok(format!(
            "Project Type: {project_type}\n\nFiles found: {}\n\nSuggestions:\n{}",
            names.join(", "),
            suggestions.join("\n")
        ))
    }
}

pub struct SearchInFiles;

impl SearchInFiles {
    fn walk(node: &Node, path: &str, pattern: &str, extensions: &[String], hits: &mut Vec<String>) {
        let Node::Directory(dir) = node else {
            return;
        };
        for (name, child) in dir.iter() {
            let child_path = paths::join(path, name);
            match child.as_ref() {
                Node::Directory(_) => Self::walk(child, &child_path, pattern, extensions, hits),
                Node::File(file) => {
                    if !extensions.is_empty() {
                        let ext = name.rsplit('.').next().unwrap_or(name).to_lowercase();
                        if !extensions.contains(&ext) {
                            continue;
                        }
                    }
                    let shown = child_path.trim_start_matches('/');
                    for (index, line) in file.content.split('\n').enumerate() {
                        if line.contains(pattern) {
                            hits.push(format!("{shown}:{}: {}", index + 1, line.trim()));
                        }
                    }
                }
            }
        }
    }
}

#[async_trait]
impl AgentTool for SearchInFiles {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            SEARCH_IN_FILES,
            "Search for text patterns across multiple files in the project. Useful for finding code references or patterns.",
        )
        .param(ParamSchema::required("search_pattern", "string", "The text pattern to search for."))
        .param(path_param("directory", "Directory to search in (use '.' for root)."))
        .param(ParamSchema::optional(
            "file_extensions",
            "string",
            "Comma-separated file extensions to search (e.g., 'js,ts,jsx,tsx'). Leave empty for all files.",
        ))
    }

    async fn call(&self, args: &ToolArgs, env: &AgentEnv) -> Result<String, ToolError> {
        let pattern = require(args, SEARCH_IN_FILES, "search_pattern")?;
        let raw = require(args, SEARCH_IN_FILES, "directory")?;
        let extensions: Vec<String> = args
            .get_named("file_extensions")
            .unwrap_or_default()
            .split(',')
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        let dir = resolve(raw);
        let root = env
            .vfs
            .find(&dir)
            .filter(|n| n.is_dir())
            .ok_or_else(|| ToolError::DirectoryNotFound(raw.to_string()))?;

        let mut hits = Vec::new();
        Self::walk(&root, &dir, pattern, &extensions, &mut hits);
        if hits.is_empty() {
            Ok(format!("No matches found for \"{pattern}\""))
        } else {
            Ok(hits.join("\n"))
        }
    }
}

pub struct ExecuteTerminalCommand;

#[async_trait]
impl AgentTool for ExecuteTerminalCommand {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            EXECUTE_TERMINAL_COMMAND,
            "Execute a command in the workspace shell (ls, cd, pwd, cat, touch, mkdir, rm, mv, cp, echo).",
        )
        .param(ParamSchema::required("command", "string", "The command to execute (e.g., 'ls src', 'cat file.txt')."))
    }

    async fn call(&self, args: &ToolArgs, env: &AgentEnv) -> Result<String, ToolError> {
        let command = require(args, EXECUTE_TERMINAL_COMMAND, "command")?;
        let runner = env.runner.as_ref().ok_or(ToolError::TerminalUnavailable)?;
        let output = runner.run(command).await;
        Ok(format!("Command executed. Output:\n{output}"))
    }
}

pub struct GetFileInfo;

#[async_trait]
impl AgentTool for GetFileInfo {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            GET_FILE_INFO,
            "Get information about a file or directory (type, size, line count, number of entries).",
        )
        .param(path_param("path", "Path to the file or directory to inspect."))
    }

    async fn call(&self, args: &ToolArgs, env: &AgentEnv) -> Result<String, ToolError> {
        let raw = require(args, GET_FILE_INFO, "path")?;
        let node = env
            .vfs
            .find(&resolve(raw))
            .ok_or_else(|| ToolError::PathNotFound(raw.to_string()))?;
        Ok(match node.as_ref() {
            Node::File(file) => {
                let lines = if file.content.is_empty() {
                    0
                } else {
                    file.content.split('\n').count()
                };
                format!(
                    "File: {raw}\nType: file\nSize: {} bytes\nLines: {lines}",
                    file.content.len()
                )
            }
            Node::Directory(dir) => format!("Directory: {raw}\nType: directory\nContains: {} items", dir.len()),
        })
    }
}
