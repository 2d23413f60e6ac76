//! Tool catalogue: an `echo` tool plus one `execute_<id>` tool per language.

use polyglot_exec::{ExecutionResult, Registry, Runner};
use serde::{Deserialize, Serialize};

use crate::ServerError;

pub const ECHO: &str = "echo";
const EXECUTE_PREFIX: &str = "execute_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct EchoArgs {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ExecuteArgs {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    Text { text: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolResponse {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
}

impl ToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }
}

impl From<ExecutionResult> for ToolResponse {
    fn from(result: ExecutionResult) -> Self {
        Self {
            is_error: !result.is_success(),
            content: vec![ToolContent::Text { text: result.text }],
        }
    }
}

/// A resolved tool name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Echo,
    Execute(&'static str),
}

impl Tool {
    pub fn resolve(registry: &Registry, name: &str) -> Option<Self> {
        if name == ECHO {
            return Some(Tool::Echo);
        }
        let id = name.strip_prefix(EXECUTE_PREFIX)?;
        registry
            .specs()
            .iter()
            .find(|spec| spec.id == id)
            .map(|spec| Tool::Execute(spec.id))
    }

    pub async fn call(
        self,
        runner: &Runner,
        args: serde_json::Value,
    ) -> Result<ToolResponse, ServerError> {
        match self {
            Tool::Echo => {
                let args: EchoArgs = serde_json::from_value(args)
                    .map_err(|e| ServerError::InvalidArguments(e.to_string()))?;
                Ok(ToolResponse::text(format!("Echo: {}", args.message)))
            }
            Tool::Execute(language) => {
                let args: ExecuteArgs = serde_json::from_value(args)
                    .map_err(|e| ServerError::InvalidArguments(e.to_string()))?;
                Ok(runner.execute(language, &args.code).await.into())
            }
        }
    }
}

pub fn catalogue(registry: &Registry) -> Vec<ToolInfo> {
    let mut tools = vec![ToolInfo {
        name: ECHO.to_string(),
        title: "Echo Tool".to_string(),
        description: "Echo back the input message".to_string(),
    }];
    tools.extend(registry.specs().iter().map(|spec| ToolInfo {
        name: format!("{}{}", EXECUTE_PREFIX, spec.id),
        title: format!("Execute {} code", spec.display_name),
        description: spec.description(),
    }));
    tools
}
