//! Shell builtins.
//!
//! Every command the shell understands is a [`Tool`] registered in a
//! [`ToolRegistry`]. Builtins resolve their path operands against the
//! context's cwd and call straight into the shared workspace.
//!
//! ```text
//! ToolRegistry
//! └── Builtins (ls, cd, pwd, cat, touch, mkdir, rm, mv, cp, echo, clear, help)
//! ```

mod builtin;
mod context;
mod registry;
mod traits;

pub use builtin::{COMMAND_NAMES, register_builtins};
pub use context::ExecContext;
pub use registry::ToolRegistry;
pub use traits::{ParamSchema, Tool, ToolArgs, ToolSchema};
