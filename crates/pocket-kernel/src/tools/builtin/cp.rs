//! cp — Copy a file or directory tree.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

pub struct Cp;

#[async_trait]
impl Tool for Cp {
    fn name(&self) -> &str {
        "cp"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cp", "Copy a file or directory (recursively)")
            .param(ParamSchema::required("source", "string", "Path to copy"))
            .param(ParamSchema::required("dest", "string", "Destination path or directory"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let (Some(src), Some(dst)) = (args.get("source", 0), args.get("dest", 1)) else {
            return ExecResult::failure(1, "cp: missing destination file operand");
        };
        match ctx.vfs.copy_node(&ctx.resolve_path(src), &ctx.resolve_path(dst)) {
            Ok(_) => ExecResult::success(""),
            Err(e) => ExecResult::failure(1, e.to_string()),
        }
    }
}
