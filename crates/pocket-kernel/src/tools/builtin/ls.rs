//! ls — List directory contents.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

const DIR_COLOR: &str = "\x1b[1;34m";
const RESET: &str = "\x1b[0m";

/// Ls tool: one entry per line, directories suffixed with `/`.
pub struct Ls;

#[async_trait]
impl Tool for Ls {
    fn name(&self) -> &str {
        "ls"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("ls", "List directory contents")
            .param(ParamSchema::optional("path", "string", "Directory to list (default: .)"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let arg = args.get("path", 0).unwrap_or(".");
        let resolved = ctx.resolve_path(arg);

        let entries = match ctx.vfs.list(&resolved) {
            Ok(entries) => entries,
            Err(_) => {
                return ExecResult::failure(1, format!("ls: cannot access '{arg}': No such file or directory"));
            }
        };

        let lines: Vec<String> = entries
            .iter()
            .map(|e| match (e.is_dir(), ctx.color) {
                (true, true) => format!("{DIR_COLOR}{}/{RESET}", e.name),
                (true, false) => format!("{}/", e.name),
                (false, _) => e.name.clone(),
            })
            .collect();
        ExecResult::success(lines.join("\n"))
    }
}
