//! Scripted [`LlmClient`] for exercising the orchestration loop in tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{ContentBlock, LlmClient, LlmError, LlmResponse, Message, StopReason, ToolSchema};

/// What one scripted call records about the request it received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub message_count: usize,
    pub system: String,
    pub tools_offered: bool,
}

/// Replays a fixed sequence of responses, recording every request.
pub struct ScriptedClient {
    script: Mutex<Vec<Result<LlmResponse, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    pub fn new(responses: Vec<Result<LlmResponse, LlmError>>) -> Self {
        let mut script = responses;
        script.reverse();
        Self {
            script: Mutex::new(script),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(
        &self,
        messages: &[Message],
        system: &str,
        tools: Option<&[ToolSchema]>,
    ) -> Result<LlmResponse, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            message_count: messages.len(),
            system: system.to_string(),
            tools_offered: tools.is_some(),
        });
        self.script
            .lock()
            .unwrap()
            .pop()
            .expect("scripted client ran out of responses")
    }
}

/// A response that stops naturally with the given text.
pub fn text_response(text: &str) -> LlmResponse {
    LlmResponse {
        content: vec![ContentBlock::Text {
            text: text.to_string(),
        }],
        stop_reason: StopReason::EndTurn,
    }
}

/// A response requesting a single tool invocation.
pub fn tool_use_response(id: &str, name: &str, input: Value) -> LlmResponse {
    LlmResponse {
        content: vec![ContentBlock::ToolUse {
            id: id.to_string(),
            name: name.to_string(),
            input,
        }],
        stop_reason: StopReason::ToolUse,
    }
}

/// A transport-level failure.
pub fn api_error(message: &str) -> LlmError {
    LlmError::Api {
        status: 500,
        message: message.to_string(),
    }
}
