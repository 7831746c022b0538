//! pocket-kernel: the command surfaces over a pocket workspace.
//!
//! Two front ends drive the shared [`pocket_vfs::Vfs`]:
//!
//! - [`Shell`]: the `jsh` command interpreter with its builtins.
//! - [`agent::ToolExecutor`]: the function-calling catalog for a model.
//!
//! The agent reaches the shell only through a [`CommandRunner`].

pub mod agent;
mod result;
mod shell;
pub mod tools;

pub use agent::{ToolCall, ToolError, ToolExecutor};
pub use result::ExecResult;
pub use shell::{CommandRunner, EMPTY_OUTPUT_MESSAGE, History, SharedShell, Shell, ShellConfig};
