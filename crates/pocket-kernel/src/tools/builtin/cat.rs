//! cat — Print a file.

use async_trait::async_trait;

use pocket_vfs::VfsError;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Cat tool: print one file's content.
pub struct Cat;

#[async_trait]
impl Tool for Cat {
    fn name(&self) -> &str {
        "cat"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cat", "Print file contents")
            .param(ParamSchema::required("path", "string", "File to print"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(arg) = args.get("path", 0) else {
            return ExecResult::failure(1, "cat: missing operand");
        };
        match ctx.vfs.read(&ctx.resolve_path(arg)) {
            Ok(content) => ExecResult::success(content),
            Err(VfsError::IsDirectory(_)) => ExecResult::failure(1, format!("cat: {arg}: Is a directory")),
            Err(_) => ExecResult::failure(1, format!("cat: {arg}: No such file or directory")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::make_ctx;
    use rstest::rstest;

    #[tokio::test]
    async fn test_cat_file() {
        let mut ctx = make_ctx(&[("/src/a.txt", "line1\nline2")]);
        ctx.set_cwd("/src");
        let result = Cat.execute(ToolArgs::from_words(["a.txt"]), &mut ctx).await;
        assert!(result.ok());
        assert_eq!(result.out, "line1\nline2");
    }

    #[rstest]
    #[case::missing_operand(&[], "cat: missing operand")]
    #[case::directory(&["src"], "cat: src: Is a directory")]
    #[case::not_found(&["nope.txt"], "cat: nope.txt: No such file or directory")]
    #[tokio::test]
    async fn test_cat_errors(#[case] words: &[&str], #[case] expected: &str) {
        let mut ctx = make_ctx(&[("/src/a.txt", "")]);
        let result = Cat.execute(ToolArgs::from_words(words.iter().copied()), &mut ctx).await;
        assert!(!result.ok());
        assert_eq!(result.err, expected);
    }
}
