//! mkdir — Create a directory.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Mkdir tool: create one directory. Parents must already exist.
pub struct Mkdir;

#[async_trait]
impl Tool for Mkdir {
    fn name(&self) -> &str {
        "mkdir"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("mkdir", "Create a directory")
            .param(ParamSchema::required("path", "string", "Directory path to create"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(arg) = args.get("path", 0) else {
            return ExecResult::failure(1, "mkdir: missing operand");
        };
        let resolved = ctx.resolve_path(arg);
        if ctx.vfs.exists(&resolved) {
            return ExecResult::failure(1, format!("mkdir: cannot create directory '{arg}': File exists"));
        }
        match ctx.vfs.create_directory(&resolved) {
            Ok(()) => ExecResult::success(""),
            Err(_) => ExecResult::failure(1, format!("mkdir: failed to create directory '{arg}'")),
        }
    }
}
