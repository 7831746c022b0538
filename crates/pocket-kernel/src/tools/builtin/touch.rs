//! touch — Create an empty file.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Touch tool: create an empty file unless something is already there.
pub struct Touch;

#[async_trait]
impl Tool for Touch {
    fn name(&self) -> &str {
        "touch"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("touch", "Create an empty file if it does not exist")
            .param(ParamSchema::required("path", "string", "File to create"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(arg) = args.get("path", 0) else {
            return ExecResult::failure(1, "touch: missing file operand");
        };
        let resolved = ctx.resolve_path(arg);
        if ctx.vfs.exists(&resolved) {
            return ExecResult::success("");
        }
        match ctx.vfs.create_file(&resolved) {
            Ok(()) => ExecResult::success(""),
            Err(_) => ExecResult::failure(1, format!("touch: cannot create file '{arg}'")),
        }
    }
}
