//! Tools the reasoning engine can invoke, plus their registry.
//!
//! Each tool implements the small [`Tool`] interface and returns its
//! citations explicitly in [`ToolOutput`]; the [`ToolManager`] keeps the
//! citations of the most recent execution for the caller to read after a
//! query completes.

mod outline;
mod search;

pub use outline::CourseOutlineTool;
pub use search::CourseSearchTool;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::llm::ToolSchema;
use crate::models::Source;

/// Text payload plus the citations backing it.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub text: String,
    pub sources: Vec<Source>,
}

impl ToolOutput {
    /// Output with no citations (error payloads, empty results).
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }
}

/// A capability the reasoning engine may invoke by name.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name offered to the engine.
    fn name(&self) -> &str;

    /// Natural-language description for the engine.
    fn description(&self) -> &str;

    /// JSON schema of the tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute with the engine-provided arguments.
    ///
    /// "No results" conditions are ordinary displayable output, not
    /// errors; `Err` is reserved for infrastructure failures.
    async fn execute(&self, args: &Value) -> anyhow::Result<ToolOutput>;
}

/// Executes a named tool with JSON arguments. The seam the orchestration
/// loop depends on.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, name: &str, args: &Value) -> anyhow::Result<String>;
}

/// Registry and dispatcher for the available tools.
///
/// Holds the source citations produced by the most recent successful
/// execution. Citation state is overwritten per execution, so concurrent
/// queries against one manager must be serialized by the caller.
pub struct ToolManager {
    tools: Vec<Arc<dyn Tool>>,
    by_name: HashMap<String, usize>,
    last_sources: RwLock<Vec<Source>>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            by_name: HashMap::new(),
            last_sources: RwLock::new(Vec::new()),
        }
    }

    /// Register a tool under its declared name. The last registration for
    /// a given name wins.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        match self.by_name.get(&name) {
            Some(&index) => self.tools[index] = tool,
            None => {
                self.by_name.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Schemas of all registered tools, in registration order.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .iter()
            .map(|tool| ToolSchema {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.parameters_schema(),
            })
            .collect()
    }

    /// Citations recorded by the most recent successful execution.
    pub async fn last_sources(&self) -> Vec<Source> {
        self.last_sources.read().await.clone()
    }

    /// Clear recorded citations. Called after each top-level query so
    /// citations never leak between independent questions.
    pub async fn reset_sources(&self) {
        self.last_sources.write().await.clear();
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutor for ToolManager {
    async fn execute(&self, name: &str, args: &Value) -> anyhow::Result<String> {
        let Some(&index) = self.by_name.get(name) else {
            // Unknown names are a displayable payload, not a failure.
            return Ok(format!("Tool '{}' not found", name));
        };

        let output = self.tools[index].execute(args).await?;
        *self.last_sources.write().await = output.sources;
        Ok(output.text)
    }
}
