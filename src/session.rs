pub mod memory;

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use crate::config::Config;
use crate::llm::AssistantClient;
use crate::persona::Persona;

use memory::ConversationBuffer;

/// State shared by the UI thread, request workers and the catalog loader.
pub struct ChatContext {
    pub config: Config,
    pub client: AssistantClient,
    pub buffer: Mutex<ConversationBuffer>,
    pub persona: RwLock<Persona>,
}

impl ChatContext {
    pub fn new(config: Config) -> Self {
        let client = AssistantClient::new(&config.endpoint, &config.model);
        Self {
            config,
            client,
            buffer: Mutex::new(ConversationBuffer::new()),
            persona: RwLock::new(Persona::default()),
        }
    }

    /// Lock the conversation buffer. A panicked worker does not poison the chat.
    pub fn buffer(&self) -> MutexGuard<'_, ConversationBuffer> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the instructions as they are right now.
    pub fn instructions(&self) -> String {
        self.persona
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .instructions()
    }
}
