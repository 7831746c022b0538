//! Agent tool bridge.
//!
//! Exposes the workspace to a language model as a fixed catalog of
//! function-calling tools. Every call goes through the same [`Vfs`] the
//! editor and shell use.
//!
//! [`Vfs`]: pocket_vfs::Vfs

mod error;
mod executor;
mod scaffold;
pub mod tools;

pub use error::ToolError;
pub use executor::{ToolCall, ToolExecutor};
pub use scaffold::ProjectTemplate;
pub use tools::{AgentEnv, AgentTool, catalog};
