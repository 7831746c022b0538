//! Core tool traits and types.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::result::ExecResult;

use super::context::ExecContext;

/// Schema for a tool parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSchema {
    /// Parameter name.
    pub name: String,
    /// JSON type name (string, integer, boolean).
    pub param_type: String,
    /// Whether this parameter is required.
    pub required: bool,
    /// Description for help text and the model.
    pub description: String,
}

impl ParamSchema {
    /// Create a required parameter.
    pub fn required(name: impl Into<String>, param_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            required: true,
            description: description.into(),
        }
    }

    /// Create an optional parameter.
    pub fn optional(name: impl Into<String>, param_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            required: false,
            description: description.into(),
        }
    }
}

/// Schema describing a tool's interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSchema {
    /// Tool name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Parameter definitions.
    pub params: Vec<ParamSchema>,
}

impl ToolSchema {
    /// Create a new tool schema.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter to the schema.
    pub fn param(mut self, param: ParamSchema) -> Self {
        self.params.push(param);
        self
    }

    /// Names of the required parameters, in declaration order.
    pub fn required_params(&self) -> impl Iterator<Item = &str> {
        self.params.iter().filter(|p| p.required).map(|p| p.name.as_str())
    }

    /// Render as a function declaration for an LLM function-calling API.
    pub fn to_function_declaration(&self) -> Value {
        let mut properties = Map::new();
        for p in &self.params {
            properties.insert(
                p.name.clone(),
                json!({ "type": p.param_type, "description": p.description }),
            );
        }
        json!({
            "name": self.name,
            "description": self.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": self.required_params().collect::<Vec<_>>(),
            },
        })
    }
}

/// Arguments handed to a tool.
///
/// The shell fills `positional` from the whitespace-split command line. The
/// agent bridge fills `named` from the function-call argument object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolArgs {
    /// Positional arguments in order.
    pub positional: Vec<String>,
    /// Named arguments by key.
    pub named: BTreeMap<String, String>,
}

impl ToolArgs {
    /// Create empty args.
    pub fn new() -> Self {
        Self::default()
    }

    /// Args from positional words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            positional: words.into_iter().map(Into::into).collect(),
            named: BTreeMap::new(),
        }
    }

    /// Args from `(key, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            positional: Vec::new(),
            named: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Args from a JSON argument object.
    ///
    /// Strings are taken as-is; other scalars use their JSON text. Nulls are
    /// dropped. Returns `None` if `value` is not an object.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let named = obj
            .iter()
            .filter_map(|(k, v)| {
                let s = match v {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((k.clone(), s))
            })
            .collect();
        Some(Self {
            positional: Vec::new(),
            named,
        })
    }

    /// Get a positional argument by index.
    pub fn get_positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    /// Get a named argument by key.
    pub fn get_named(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    /// Get a named argument or positional fallback.
    pub fn get(&self, name: &str, positional_index: usize) -> Option<&str> {
        self.get_named(name).or_else(|| self.get_positional(positional_index))
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A shell builtin.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's name (used for lookup).
    fn name(&self) -> &str;

    /// Get the tool's schema.
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given arguments and context.
    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_declaration_shape() {
        let schema = ToolSchema::new("read_file", "Read a file")
            .param(ParamSchema::required("file_path", "string", "Path"))
            .param(ParamSchema::optional("encoding", "string", "Ignored"));
        assert_eq!(
            schema.to_function_declaration(),
            json!({
                "name": "read_file",
                "description": "Read a file",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "file_path": { "type": "string", "description": "Path" },
                        "encoding": { "type": "string", "description": "Ignored" },
                    },
                    "required": ["file_path"],
                },
            })
        );
    }

    #[test]
    fn args_from_json() {
        let args = ToolArgs::from_json(&json!({"a": "x", "n": 3, "b": true, "z": null})).unwrap();
        assert_eq!(args.get_named("a"), Some("x"));
        assert_eq!(args.get_named("n"), Some("3"));
        assert_eq!(args.get_named("b"), Some("true"));
        assert_eq!(args.get_named("z"), None);
        assert!(ToolArgs::from_json(&json!([1, 2])).is_none());
    }

    #[test]
    fn named_wins_over_positional() {
        let mut args = ToolArgs::from_words(["pos"]);
        assert_eq!(args.get("path", 0), Some("pos"));
        args.named.insert("path".into(), "named".into());
        assert_eq!(args.get("path", 0), Some("named"));
        assert_eq!(args.get("other", 1), None);
    }
}
