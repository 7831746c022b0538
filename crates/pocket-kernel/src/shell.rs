//! The `jsh` command interpreter.
//!
//! A line is split on runs of whitespace into a command name and operands.
//! There is no quoting, globbing, piping or redirection: the first word
//! selects a builtin and the rest are passed through untouched.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};

use pocket_vfs::Vfs;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ToolArgs, ToolRegistry, ToolSchema, register_builtins};

/// Exit code for an unknown command, as in POSIX shells.
const NOT_FOUND_CODE: i64 = 127;

/// Message the agent sees when a command printed nothing.
pub const EMPTY_OUTPUT_MESSAGE: &str = "Command executed successfully.";

/// Shell settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellConfig {
    /// Color directory names in `ls` output.
    pub color: bool,
}

impl ShellConfig {
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Command history with a browse cursor.
///
/// The cursor ranges over `-1..=len`. Both ends stand for a blank line:
/// stepping past the oldest entry yields `""`, as does stepping past the
/// newest. Recording a command parks the cursor at `len`.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    cursor: isize,
}

impl Default for History {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            cursor: -1,
        }
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = self.entries.len() as isize;
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Step toward older entries. Returns the line to show, or `None` if the
    /// cursor did not move.
    pub fn older(&mut self) -> Option<&str> {
        self.step((self.cursor - 1).max(-1))
    }

    /// Step toward newer entries. Returns the line to show, or `None` if the
    /// cursor did not move.
    pub fn newer(&mut self) -> Option<&str> {
        self.step((self.cursor + 1).min(self.entries.len() as isize))
    }

    fn step(&mut self, to: isize) -> Option<&str> {
        if to == self.cursor {
            return None;
        }
        self.cursor = to;
        let line = usize::try_from(to)
            .ok()
            .and_then(|i| self.entries.get(i))
            .map_or("", String::as_str);
        Some(line)
    }
}

/// An interactive shell over a shared workspace.
#[derive(Debug)]
pub struct Shell {
    ctx: ExecContext,
    tools: Arc<ToolRegistry>,
    history: History,
}

impl Shell {
    /// A shell at `/` with default settings.
    pub fn new(vfs: Vfs) -> Self {
        Self::with_config(vfs, ShellConfig::default())
    }

    pub fn with_config(vfs: Vfs, config: ShellConfig) -> Self {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry);
        let tools = Arc::new(registry);

        let mut ctx = ExecContext::new(vfs);
        ctx.color = config.color;
        ctx.set_tool_schemas(tools.schemas());

        Self {
            ctx,
            tools,
            history: History::new(),
        }
    }

    pub fn cwd(&self) -> &str {
        &self.ctx.cwd
    }

    pub fn vfs(&self) -> &Vfs {
        &self.ctx.vfs
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tool_schemas(&self) -> Vec<ToolSchema> {
        self.tools.schemas()
    }

    /// True once after `clear` ran; resets the request.
    pub fn take_clear_request(&mut self) -> bool {
        std::mem::take(&mut self.ctx.clear_requested)
    }

    /// Execute one command line.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn execute(&mut self, line: &str) -> ExecResult {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return ExecResult::success("");
        };
        self.history.push(line.trim());

        let Some(tool) = self.tools.get(name) else {
            return ExecResult::failure(NOT_FOUND_CODE, format!("jsh: command not found: {name}"));
        };
        let result = tool.execute(ToolArgs::from_words(words), &mut self.ctx).await;
        if !result.ok() {
            tracing::debug!(command = name, code = result.code, err = %result.err, "command failed");
        }
        result
    }

    /// Execute one command line and return what a terminal would print.
    pub async fn run(&mut self, line: &str) -> String {
        self.execute(line).await.into_text()
    }
}

/// Something that can run a shell command and report its output.
///
/// The agent bridge receives one of these instead of reaching for a
/// terminal directly.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str) -> String;
}

/// A [`Shell`] that several holders can drive.
#[derive(Debug, Clone)]
pub struct SharedShell {
    inner: Arc<Mutex<Shell>>,
}

impl SharedShell {
    pub fn new(shell: Shell) -> Self {
        Self {
            inner: Arc::new(Mutex::new(shell)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, Shell> {
        self.inner.lock().await
    }
}

#[async_trait]
impl CommandRunner for SharedShell {
    async fn run(&self, command: &str) -> String {
        let output = self.inner.lock().await.run(command).await;
        if output.is_empty() {
            EMPTY_OUTPUT_MESSAGE.to_string()
        } else {
            output
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocket_vfs::Tree;
    use rstest::rstest;

    fn shell() -> Shell {
        Shell::new(Vfs::new())
    }

    #[tokio::test]
    async fn test_empty_line_is_silent() {
        let mut sh = shell();
        let result = sh.execute("   ").await;
        assert!(result.ok());
        assert_eq!(result.out, "");
        assert!(sh.history().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let mut sh = shell();
        let result = sh.execute("vim x").await;
        assert_eq!(result.code, 127);
        assert_eq!(result.err, "jsh: command not found: vim");
        assert_eq!(sh.history().entries(), ["vim x"]);
    }

    #[rstest]
    #[case::ls("ls nope", "ls: cannot access 'nope': No such file or directory")]
    #[case::cd("cd nope", "cd: no such file or directory: nope")]
    #[case::cat_missing("cat", "cat: missing operand")]
    #[case::cat_dir("cat /", "cat: /: Is a directory")]
    #[case::touch("touch", "touch: missing file operand")]
    #[case::mkdir("mkdir", "mkdir: missing operand")]
    #[case::mkdir_exists("mkdir README.md", "mkdir: cannot create directory 'README.md': File exists")]
    #[case::rm("rm", "rm: missing operand")]
    #[case::mv("mv a", "mv: missing destination file operand")]
    #[case::cp("cp", "cp: missing destination file operand")]
    #[tokio::test]
    async fn test_error_strings(#[case] line: &str, #[case] expected: &str) {
        let mut sh = shell();
        assert_eq!(sh.run(line).await, expected);
    }

    #[tokio::test]
    async fn test_whitespace_runs_split_words() {
        let mut sh = shell();
        assert_eq!(sh.run("echo   a \t b").await, "a b");
    }

    #[tokio::test]
    async fn test_cd_changes_prompt_cwd() {
        let mut sh = Shell::new(Vfs::with_tree(Tree::from_files([("/src/a", "")]).unwrap()));
        sh.run("cd src").await;
        assert_eq!(sh.cwd(), "/src");
        assert_eq!(sh.run("pwd").await, "/src");
    }

    #[tokio::test]
    async fn test_clear_request_is_taken_once() {
        let mut sh = shell();
        sh.run("clear").await;
        assert!(sh.take_clear_request());
        assert!(!sh.take_clear_request());
    }

    #[tokio::test]
    async fn test_shared_shell_reports_silent_success() {
        let shared = SharedShell::new(shell());
        assert_eq!(CommandRunner::run(&shared, "mkdir x").await, EMPTY_OUTPUT_MESSAGE);
        assert_eq!(CommandRunner::run(&shared, "ls").await, "README.md\nx/");
        assert_eq!(shared.lock().await.history().len(), 2);
    }

    #[test]
    fn test_history_browsing() {
        let mut h = History::new();
        assert_eq!(h.older(), None);
        h.push("one");
        h.push("two");
        assert_eq!(h.older(), Some("two"));
        assert_eq!(h.older(), Some("one"));
        assert_eq!(h.older(), Some(""));
        assert_eq!(h.older(), None);
        assert_eq!(h.newer(), Some("one"));
        assert_eq!(h.newer(), Some("two"));
        assert_eq!(h.newer(), Some(""));
        assert_eq!(h.newer(), None);
    }
}
