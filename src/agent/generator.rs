//! Core answer-generation loop.

use std::sync::Arc;

use crate::llm::{
    ContentBlock, LlmClient, LlmResponse, Message, ToolResultBlock, ToolSchema,
};
use crate::tools::ToolExecutor;

use super::prompt::build_system_content;

/// Returned when a response carries no text block to extract.
const NO_TEXT_FALLBACK: &str = "No text response generated";

/// Drives the reasoning engine through bounded rounds of tool use and
/// produces the final answer text.
pub struct AnswerGenerator {
    llm: Arc<dyn LlmClient>,
    max_tool_rounds: usize,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn LlmClient>, max_tool_rounds: usize) -> Self {
        Self {
            llm,
            max_tool_rounds,
        }
    }

    /// Answer a query with up to `max_tool_rounds` rounds of tool use.
    ///
    /// Tools are offered to the engine only when both schemas and an
    /// executor are supplied; otherwise the call resolves in one round.
    /// Engine failures propagate, except during the final forced call
    /// after the round limit, which is converted into an error string so
    /// the caller always receives displayable text.
    pub async fn generate(
        &self,
        query: &str,
        history: Option<&str>,
        tools: Option<&[ToolSchema]>,
        executor: Option<&dyn ToolExecutor>,
    ) -> anyhow::Result<String> {
        let system_content = build_system_content(history);

        // Tools are only offered when they can actually be executed.
        let offered = match (tools, executor) {
            (Some(tools), Some(_)) if !tools.is_empty() => Some(tools),
            _ => None,
        };

        let mut messages = vec![Message::user(query)];
        let mut round = 0;

        while round < self.max_tool_rounds {
            round += 1;
            tracing::debug!("Tool round {}", round);

            let response = self.llm.complete(&messages, &system_content, offered).await?;
            messages.push(Message::assistant(response.content.clone()));

            let executor = match executor {
                Some(executor) if response.requests_tools() => executor,
                _ => return Ok(extract_text(&response)),
            };

            let results = execute_tool_requests(&response, executor).await;
            if results.is_empty() {
                // The engine claimed tool use but produced no invocations;
                // fall back to whatever text the current response carries.
                return Ok(extract_text(&response));
            }

            messages.push(Message::tool_results(results));
        }

        // Round limit reached: one final call without tools forces a
        // textual answer instead of a dangling tool request.
        match self.llm.complete(&messages, &system_content, None).await {
            Ok(response) => Ok(extract_text(&response)),
            Err(e) => Ok(format!("Error in final response generation: {}", e)),
        }
    }
}

/// Execute every tool invocation in a response sequentially.
///
/// A failing invocation becomes an error-text result for that invocation
/// only; sibling invocations still run and contribute their results.
async fn execute_tool_requests(
    response: &LlmResponse,
    executor: &dyn ToolExecutor,
) -> Vec<ToolResultBlock> {
    let mut results = Vec::new();

    for block in &response.content {
        let ContentBlock::ToolUse { id, name, input } = block else {
            continue;
        };

        let content = match executor.execute(name, input).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Tool '{}' failed: {}", name, e);
                format!("Tool execution failed: {}", e)
            }
        };

        results.push(ToolResultBlock {
            tool_use_id: id.clone(),
            content,
        });
    }

    results
}

fn extract_text(response: &LlmResponse) -> String {
    response
        .first_text()
        .map(str::to_string)
        .unwrap_or_else(|| NO_TEXT_FALLBACK.to_string())
}
