use std::sync::{Mutex, PoisonError};

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ChatError, Result};
use crate::session::memory::{ConversationBuffer, Turn};
use crate::session::ChatContext;

/// Shown when the proxy cannot be reached or answers with garbage.
pub const APOLOGY: &str = "Sorry, I had a problem responding. Please try again.";
/// Used when the proxy answers but carries no reply text.
pub const FALLBACK_REPLY: &str = "I'm not sure, but I'll help you find out!";

/// Body POSTed to the proxy.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssistantRequest {
    pub model: String,
    pub input: String,
    pub instructions: String,
}

/// What we keep from a successful proxy response.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    pub id: Option<String>,
    pub text: String,
}

impl AssistantReply {
    /// Pull `output[0].content[0].text` and `id` out of a response body.
    pub fn from_body(body: &Value) -> Self {
        let text = body["output"][0]["content"][0]["text"]
            .as_str()
            .filter(|t| !t.is_empty())
            .unwrap_or(FALLBACK_REPLY)
            .to_string();
        let id = body["id"].as_str().map(ToString::to_string);
        Self { id, text }
    }
}

/// Blocking client for the language-model proxy.
pub struct AssistantClient {
    http: Client,
    endpoint: String,
    model: String,
    last_response_id: Mutex<Option<String>>,
}

impl AssistantClient {
    pub fn new(endpoint: &str, model: &str) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            last_response_id: Mutex::new(None),
        }
    }

    /// Id of the last response the proxy gave us, if any.
    pub fn last_response_id(&self) -> Option<String> {
        self.last_response_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Record the user turn and build the request from the trimmed window.
    pub fn prepare(
        &self,
        user_text: &str,
        instructions: &str,
        buffer: &mut ConversationBuffer,
    ) -> AssistantRequest {
        buffer.append(Turn::user(user_text));
        AssistantRequest {
            model: self.model.clone(),
            input: buffer.to_context_string(),
            instructions: instructions.to_string(),
        }
    }

    /// POST the request. Any transport, status or JSON problem is an error.
    pub fn dispatch(&self, request: &AssistantRequest) -> Result<AssistantReply> {
        let resp = self.http.post(&self.endpoint).json(request).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChatError::Status(status));
        }

        let raw = resp.text()?;
        let body: Value = serde_json::from_str(&raw)?;
        Ok(AssistantReply::from_body(&body))
    }

    /// Remember the response id and append the assistant turn.
    pub fn record(&self, reply: AssistantReply, buffer: &mut ConversationBuffer) -> String {
        if let Some(id) = reply.id {
            *self
                .last_response_id
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(id);
        }
        buffer.append(Turn::assistant(reply.text.clone()));
        reply.text
    }

    /// Turn a dispatch result into the text shown to the shopper.
    /// Only a successful response adds an assistant turn.
    pub fn finish(&self, result: Result<AssistantReply>, buffer: &mut ConversationBuffer) -> String {
        match result {
            Ok(reply) => self.record(reply, buffer),
            Err(err) => {
                warn!(%err, "assistant request failed");
                APOLOGY.to_string()
            }
        }
    }

    /// Full round trip against a buffer the caller owns.
    pub fn send(
        &self,
        user_text: &str,
        instructions: &str,
        buffer: &mut ConversationBuffer,
    ) -> String {
        let request = self.prepare(user_text, instructions, buffer);
        let result = self.dispatch(&request);
        self.finish(result, buffer)
    }
}

impl ChatContext {
    /// Round trip against the shared buffer. The lock is not held during the call.
    pub fn send(&self, user_text: &str) -> String {
        let instructions = self.instructions();
        let request = self
            .client
            .prepare(user_text, &instructions, &mut self.buffer());
        debug!(context_lines = request.input.lines().count(), "sending assistant request");

        let result = self.client.dispatch(&request);
        let text = self.client.finish(result, &mut self.buffer());
        debug!(
            turns = self.buffer().len(),
            response_id = ?self.client.last_response_id(),
            "assistant request finished"
        );
        text
    }
}
