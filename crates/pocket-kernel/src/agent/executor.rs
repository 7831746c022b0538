//! Dispatch of model function calls onto the tool catalog.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use pocket_vfs::Vfs;

use super::error::ToolError;
use super::tools::{AgentEnv, AgentTool, catalog};
use crate::shell::CommandRunner;
use crate::tools::{ToolArgs, ToolSchema};

/// One function call as the model emits it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

/// Runs agent tool calls against a shared workspace.
///
/// Results are always strings. A failed call renders as `Error: <reason>`
/// so the model can read it and try again.
#[derive(Clone)]
pub struct ToolExecutor {
    env: AgentEnv,
    tools: Vec<Arc<dyn AgentTool>>,
}

impl ToolExecutor {
    pub fn new(vfs: Vfs) -> Self {
        Self {
            env: AgentEnv::new(vfs),
            tools: catalog(),
        }
    }

    /// Give `execute_terminal_command` a shell to run in.
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.env.runner = Some(runner);
        self
    }

    pub fn vfs(&self) -> &Vfs {
        &self.env.vfs
    }

    /// Tool names in catalog order.
    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.schema().name).collect()
    }

    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    /// Declarations for an LLM function-calling request.
    pub fn function_declarations(&self) -> Vec<Value> {
        self.tools.iter().map(|t| t.schema().to_function_declaration()).collect()
    }

    fn lookup(&self, name: &str) -> Result<&Arc<dyn AgentTool>, ToolError> {
        self.tools
            .iter()
            .find(|t| t.schema().name == name)
            .ok_or_else(|| ToolError::UnknownTool {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Run one call and render its outcome for the model.
    #[tracing::instrument(level = "debug", skip(self, args))]
    pub async fn invoke(&self, name: &str, args: &ToolArgs) -> String {
        let outcome = match self.lookup(name) {
            Ok(tool) => tool.call(args, &self.env).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "agent tool failed");
                format!("Error: {e}")
            }
        }
    }

    /// Run one call whose arguments arrive as a JSON object. Anything that is
    /// not an object counts as no arguments.
    pub async fn invoke_json(&self, name: &str, args: &Value) -> String {
        let args = ToolArgs::from_json(args).unwrap_or_default();
        self.invoke(name, &args).await
    }

    /// Run calls in order. Each call sees the workspace as the previous one
    /// left it.
    pub async fn invoke_batch(&self, calls: &[ToolCall]) -> Vec<String> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            results.push(self.invoke_json(&call.name, &call.args).await);
        }
        results
    }
}

impl std::fmt::Debug for ToolExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolExecutor")
            .field("env", &self.env)
            .field("tools", &self.names())
            .finish()
    }
}
