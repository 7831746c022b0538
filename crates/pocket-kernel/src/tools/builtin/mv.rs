//! mv — Move or rename.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

pub struct Mv;

#[async_trait]
impl Tool for Mv {
    fn name(&self) -> &str {
        "mv"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("mv", "Move or rename a file or directory")
            .param(ParamSchema::required("source", "string", "Path to move"))
            .param(ParamSchema::required("dest", "string", "Destination path or directory"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let (Some(src), Some(dst)) = (args.get("source", 0), args.get("dest", 1)) else {
            return ExecResult::failure(1, "mv: missing destination file operand");
        };
        match ctx.vfs.move_node(&ctx.resolve_path(src), &ctx.resolve_path(dst)) {
            Ok(_) => ExecResult::success(""),
            Err(e) => ExecResult::failure(1, e.to_string()),
        }
    }
}
