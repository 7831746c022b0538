//! echo — Print arguments.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

pub struct Echo;

#[async_trait]
impl Tool for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("echo", "Print arguments separated by single spaces")
            .param(ParamSchema::optional("args", "string", "Words to print"))
    }

    async fn execute(&self, args: ToolArgs, _ctx: &mut ExecContext) -> ExecResult {
        ExecResult::success(args.positional.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::make_ctx;

    #[tokio::test]
    async fn test_echo_joins_words() {
        let mut ctx = make_ctx(&[]);
        let result = Echo.execute(ToolArgs::from_words(["hello", "world"]), &mut ctx).await;
        assert_eq!(result.out, "hello world");
        assert_eq!(Echo.execute(ToolArgs::new(), &mut ctx).await.out, "");
    }
}
