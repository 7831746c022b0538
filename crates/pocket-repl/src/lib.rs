//! pocket REPL: an interactive terminal over one in-memory workspace.
//!
//! Lines starting with `/` are meta-commands; everything else goes to the
//! `jsh` shell. The agent tool catalog is reachable through `/tool`, sharing
//! the same workspace and shell as the prompt.

pub mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tokio::runtime::Runtime;

use pocket_kernel::{ExecResult, SharedShell, Shell, ShellConfig, ToolExecutor};
use pocket_vfs::{ActiveFile, Tree, Vfs};

pub use config::ReplConfig;

/// Error text used to ask the caller to leave the loop.
pub const EXIT_SIGNAL: &str = "__REPL_EXIT__";

/// Written to the terminal when `clear` runs.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Result from meta-command handling.
#[derive(Debug)]
enum MetaResult {
    /// Continue with optional output
    Continue(Option<String>),
    /// Exit the REPL (caller should save history and exit)
    Exit,
}

/// REPL state: one workspace, one shell, one agent bridge.
pub struct Repl {
    vfs: Vfs,
    shell: SharedShell,
    agent: ToolExecutor,
    runtime: Runtime,
    prompt: String,
}

impl Repl {
    /// A REPL over the welcome workspace with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&ReplConfig::default())
    }

    pub fn with_config(config: &ReplConfig) -> Result<Self> {
        let vfs = Vfs::new();
        if let Some(seed) = &config.seed {
            vfs.replace_all(load_tree(seed)?);
        }

        let shell = SharedShell::new(Shell::with_config(
            vfs.clone(),
            ShellConfig::default().with_color(config.color),
        ));
        let agent = ToolExecutor::new(vfs.clone()).with_runner(Arc::new(shell.clone()));
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;

        Ok(Self {
            vfs,
            shell,
            agent,
            runtime,
            prompt: config.prompt.clone(),
        })
    }

    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    /// Prompt text for the next line, e.g. `pocket-coder:/src$ `.
    pub fn prompt(&self) -> String {
        let cwd = self.runtime.block_on(async { self.shell.lock().await.cwd().to_string() });
        format!("{}:{}$ ", self.prompt, cwd)
    }

    /// Run one shell command and return its full result.
    pub fn execute(&mut self, line: &str) -> ExecResult {
        self.runtime.block_on(async { self.shell.lock().await.execute(line).await })
    }

    /// Process a single line of input.
    ///
    /// Returns `Ok(None)` when there is nothing to print. An error whose text
    /// is [`EXIT_SIGNAL`] asks the caller to leave.
    pub fn process_line(&mut self, line: &str) -> Result<Option<String>> {
        let trimmed = line.trim();

        if trimmed.starts_with('/') {
            return match self.handle_meta_command(trimmed) {
                MetaResult::Continue(output) => Ok(output),
                MetaResult::Exit => Err(anyhow::anyhow!(EXIT_SIGNAL)),
            };
        }

        if trimmed.is_empty() {
            return Ok(None);
        }

        let (text, cleared) = self.runtime.block_on(async {
            let mut shell = self.shell.lock().await;
            let text = shell.run(trimmed).await;
            (text, shell.take_clear_request())
        });

        if cleared {
            return Ok(Some(CLEAR_SCREEN.to_string()));
        }
        Ok((!text.is_empty()).then_some(text))
    }

    /// Handle a meta-command (starts with /).
    fn handle_meta_command(&mut self, cmd: &str) -> MetaResult {
        let (command, rest) = match cmd.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (cmd, ""),
        };

        match command {
            "/quit" | "/q" | "/exit" => MetaResult::Exit,
            "/help" | "/h" | "/?" => MetaResult::Continue(Some(HELP_TEXT.to_string())),
            "/tree" => {
                let path = if rest.is_empty() { "/" } else { rest };
                MetaResult::Continue(Some(match self.vfs.structure(path) {
                    Ok(outline) if outline.is_empty() => "(empty)".to_string(),
                    Ok(outline) => outline,
                    Err(e) => format!("Error: {e}"),
                }))
            }
            "/open" => MetaResult::Continue(Some(self.open(rest))),
            "/close" => {
                self.vfs.close();
                MetaResult::Continue(None)
            }
            "/tools" => MetaResult::Continue(Some(format!(
                "Available tools: {}",
                self.agent.names().join(", ")
            ))),
            "/tool" => MetaResult::Continue(Some(self.call_tool(rest))),
            "/snapshot" => MetaResult::Continue(Some(match self.vfs.snapshot().to_json() {
                Ok(json) => json,
                Err(e) => format!("Error: {e}"),
            })),
            "/history" => {
                let entries = self
                    .runtime
                    .block_on(async { self.shell.lock().await.history().entries().to_vec() });
                let lines: Vec<String> = entries
                    .iter()
                    .enumerate()
                    .map(|(i, line)| format!("{:>4}  {line}", i + 1))
                    .collect();
                MetaResult::Continue((!lines.is_empty()).then(|| lines.join("\n")))
            }
            _ => MetaResult::Continue(Some(format!(
                "Unknown command: {command}\nType /help for available commands."
            ))),
        }
    }

    /// `/open` with no path shows the open file; with a path, opens it.
    fn open(&mut self, path: &str) -> String {
        if !path.is_empty() {
            let cwd = self.runtime.block_on(async { self.shell.lock().await.cwd().to_string() });
            let resolved = pocket_vfs::paths::resolve(&cwd, path);
            if let Err(e) = self.vfs.select(&resolved) {
                return format!("Error: {e}");
            }
        }
        match self.vfs.active_file() {
            ActiveFile::Closed => "(no file open)".to_string(),
            ActiveFile::Open(path) => match self.vfs.read(&path) {
                Ok(content) => format!("--- {path}\n{content}"),
                Err(e) => format!("Error: {e}"),
            },
        }
    }

    /// `/tool <name> [json args]`
    fn call_tool(&mut self, rest: &str) -> String {
        let (name, raw_args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };
        if name.is_empty() {
            return "Usage: /tool <name> [json args]".to_string();
        }
        let args = if raw_args.is_empty() {
            serde_json::Value::Object(Default::default())
        } else {
            match serde_json::from_str(raw_args) {
                Ok(value) => value,
                Err(e) => return format!("Error: invalid JSON arguments: {e}"),
            }
        };
        self.runtime.block_on(self.agent.invoke_json(name, &args))
    }
}

/// Read a JSON tree snapshot from disk.
pub fn load_tree(path: &Path) -> Result<Tree> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read workspace from {}", path.display()))?;
    Tree::from_json(&json).with_context(|| format!("Failed to parse workspace from {}", path.display()))
}

const HELP_TEXT: &str = r#"pocket — in-memory workspace terminal

Meta Commands:
  /help, /?            Show this help
  /quit, /q            Exit the REPL
  /tree [path]         Show the workspace outline
  /open [path]         Open a file, or show the open one
  /close               Close the open file
  /history             Show command history
  /tools               List agent tools
  /tool <name> [json]  Call an agent tool, e.g. /tool read_file {"file_path": "README.md"}
  /snapshot            Print the workspace as JSON

Shell Commands:
  ls [path]            List directory
  cd [path]            Change directory
  pwd                  Print working directory
  cat <path>           Print file contents
  touch <path>         Create an empty file
  mkdir <path>         Create a directory
  rm <path>            Remove a file or directory
  mv <src> <dst>       Move or rename
  cp <src> <dst>       Copy
  echo [args...]       Print arguments
  clear                Clear the screen
  help [command]       Show command help
"#;

/// Save REPL history to disk.
fn save_history(rl: &mut Editor<(), DefaultHistory>, history_path: &Option<PathBuf>) {
    if let Some(path) = history_path {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create history directory: {}", e);
            }
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }
}

/// Run the interactive REPL.
pub fn run(config: &ReplConfig) -> Result<()> {
    println!("pocket v{}", env!("CARGO_PKG_VERSION"));
    println!("Type /help for commands, /quit to exit.");

    let mut rl: Editor<(), DefaultHistory> = Editor::new().context("Failed to create editor")?;

    let history_path = config.history_path();
    if let Some(ref path) = history_path {
        if let Err(e) = rl.load_history(path) {
            let is_not_found =
                matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound);
            if !is_not_found {
                tracing::warn!("Failed to load history: {}", e);
            }
        }
    }

    let mut repl = Repl::with_config(config)?;
    println!();

    loop {
        match rl.readline(&repl.prompt()) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = rl.add_history_entry(line.as_str()) {
                        tracing::warn!("Failed to add history entry: {}", e);
                    }
                }

                match repl.process_line(&line) {
                    Ok(Some(output)) if output == CLEAR_SCREEN => print!("{output}"),
                    Ok(Some(output)) => println!("{output}"),
                    Ok(None) => {}
                    Err(e) if e.to_string() == EXIT_SIGNAL => break,
                    Err(e) => eprintln!("Error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    save_history(&mut rl, &history_path);

    Ok(())
}
