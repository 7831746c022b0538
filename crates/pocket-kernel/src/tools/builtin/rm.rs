//! rm — Remove a file or directory tree.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Rm tool: always recursive, no prompts.
pub struct Rm;

#[async_trait]
impl Tool for Rm {
    fn name(&self) -> &str {
        "rm"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("rm", "Remove a file or directory (recursively)")
            .param(ParamSchema::required("path", "string", "Path to remove"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(arg) = args.get("path", 0) else {
            return ExecResult::failure(1, "rm: missing operand");
        };
        match ctx.vfs.delete(&ctx.resolve_path(arg)) {
            Ok(()) => ExecResult::success(""),
            Err(e) => ExecResult::failure(1, e.to_string()),
        }
    }
}
