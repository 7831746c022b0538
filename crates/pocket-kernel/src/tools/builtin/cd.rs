//! cd — Change working directory.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Cd tool: change current working directory.
pub struct Cd;

#[async_trait]
impl Tool for Cd {
    fn name(&self) -> &str {
        "cd"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cd", "Change current working directory")
            .param(ParamSchema::optional("path", "string", "Directory to change to"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        // Bare `cd` stays put.
        let Some(arg) = args.get("path", 0) else {
            return ExecResult::success("");
        };
        let resolved = ctx.resolve_path(arg);

        match ctx.vfs.find(&resolved) {
            Some(node) if node.is_dir() => {
                ctx.set_cwd(resolved);
                ExecResult::success("")
            }
            _ => ExecResult::failure(1, format!("cd: no such file or directory: {arg}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::make_ctx;

    fn ctx() -> ExecContext {
        make_ctx(&[("/subdir/inner/f", ""), ("/file.txt", "data")])
    }

    #[tokio::test]
    async fn test_cd_subdir_and_back() {
        let mut ctx = ctx();
        assert!(Cd.execute(ToolArgs::from_words(["subdir/inner"]), &mut ctx).await.ok());
        assert_eq!(ctx.cwd, "/subdir/inner");
        assert!(Cd.execute(ToolArgs::from_words([".."]), &mut ctx).await.ok());
        assert_eq!(ctx.cwd, "/subdir");
        assert!(Cd.execute(ToolArgs::from_words(["/"]), &mut ctx).await.ok());
        assert_eq!(ctx.cwd, "/");
    }

    #[tokio::test]
    async fn test_cd_no_arg_is_noop() {
        let mut ctx = ctx();
        ctx.set_cwd("/subdir");
        let result = Cd.execute(ToolArgs::new(), &mut ctx).await;
        assert!(result.ok());
        assert_eq!(ctx.cwd, "/subdir");
    }

    #[tokio::test]
    async fn test_cd_file_fails() {
        let mut ctx = ctx();
        let result = Cd.execute(ToolArgs::from_words(["file.txt"]), &mut ctx).await;
        assert_eq!(result.err, "cd: no such file or directory: file.txt");
        assert_eq!(ctx.cwd, "/");
    }

    #[tokio::test]
    async fn test_cd_nonexistent() {
        let mut ctx = ctx();
        let result = Cd.execute(ToolArgs::from_words(["nope"]), &mut ctx).await;
        assert!(!result.ok());
        assert_eq!(result.err, "cd: no such file or directory: nope");
    }
}
