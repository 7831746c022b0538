//! clear — Ask the host to clear its display.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

pub struct Clear;

#[async_trait]
impl Tool for Clear {
    fn name(&self) -> &str {
        "clear"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("clear", "Clear the terminal screen")
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        ctx.clear_requested = true;
        ExecResult::success("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::make_ctx;

    #[tokio::test]
    async fn test_clear_sets_flag_only() {
        let mut ctx = make_ctx(&[("/a", "")]);
        let before = ctx.vfs.snapshot();
        let result = Clear.execute(ToolArgs::new(), &mut ctx).await;
        assert!(result.ok());
        assert!(result.out.is_empty());
        assert!(ctx.clear_requested);
        assert_eq!(ctx.vfs.snapshot(), before);
    }
}
