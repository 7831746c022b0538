//! help — Show the command summary, or one command's usage.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

use super::COMMAND_NAMES;

const BANNER: &str = "jsh: A basic shell for Pocket Coder";

pub struct Help;

#[async_trait]
impl Tool for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("help", "List available commands")
            .param(ParamSchema::optional("command", "string", "Show usage for one command"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(topic) = args.get("command", 0) else {
            return ExecResult::success(format!("{BANNER}\nCommands: {}", COMMAND_NAMES.join(", ")));
        };
        match ctx.tool_schemas.iter().find(|s| s.name == topic) {
            Some(schema) => ExecResult::success(usage(schema)),
            None => ExecResult::failure(1, format!("help: no help for '{topic}'")),
        }
    }
}

fn usage(schema: &ToolSchema) -> String {
    let operands: Vec<String> = schema
        .params
        .iter()
        .map(|p| if p.required { format!("<{}>", p.name) } else { format!("[{}]", p.name) })
        .collect();
    let mut line = schema.name.clone();
    if !operands.is_empty() {
        line.push(' ');
        line.push_str(&operands.join(" "));
    }
    format!("{line}\n  {}", schema.description)
}
