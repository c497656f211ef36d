// lib/src/chat.rs
//! Patient/doctor conversations and the simulated partner reply.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, error, info};
use models::errors::{MedibookResult, StorageError, ValidationError};
use models::medical::{ChatMessage, ChatSender};
use tokio::task::JoinHandle;

use crate::config::ChatConfig;
use crate::storage_engine::keys::chat_key;
use crate::storage_engine::storage_utils::{read_json, write_json};
use crate::storage_engine::StorageEngine;

/// One message list per contact, stored under `chat:<contact>`.
///
/// Clones share one write lock, so a reply task and the user appending to the
/// same conversation cannot drop each other's messages.
#[derive(Debug, Clone)]
pub struct ChatStore {
    engine: Arc<dyn StorageEngine>,
    write_lock: Arc<Mutex<()>>,
}

impl ChatStore {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        ChatStore { engine, write_lock: Arc::new(Mutex::new(())) }
    }

    fn lock(&self) -> MedibookResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| StorageError::Backend("chat store lock poisoned".to_string()).into())
    }

    pub fn messages(&self, contact: &str) -> MedibookResult<Vec<ChatMessage>> {
        Ok(read_json(self.engine.as_ref(), &chat_key(contact))?.unwrap_or_default())
    }

    pub fn send(&self, contact: &str, sender: ChatSender, body: &str) -> MedibookResult<ChatMessage> {
        let body = body.trim();
        if body.is_empty() {
            return Err(ValidationError::MissingField("message".to_string()).into());
        }
        let _guard = self.lock()?;
        let mut messages = self.messages(contact)?;
        let message = ChatMessage::new(sender, body);
        messages.push(message.clone());
        write_json(self.engine.as_ref(), &chat_key(contact), &messages)?;
        debug!("Stored chat message {} for {}", message.id, contact);
        Ok(message)
    }

    pub fn clear(&self, contact: &str) -> MedibookResult<()> {
        let _guard = self.lock()?;
        self.engine.remove_item(&chat_key(contact))?;
        Ok(())
    }
}

/// A reply timer that is aborted when cancelled or dropped.
#[derive(Debug)]
pub struct PendingReply {
    handle: Option<JoinHandle<()>>,
}

impl PendingReply {
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Waits until the reply has been stored.
    pub async fn wait(mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    error!("Chat reply task failed: {}", e);
                }
            }
        }
    }
}

impl Drop for PendingReply {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Answers a message on behalf of the other party after a fixed delay.
#[derive(Debug, Clone)]
pub struct ReplyScheduler {
    store: ChatStore,
    delay: Duration,
    auto_reply: String,
}

impl ReplyScheduler {
    pub fn new(store: ChatStore, delay: Duration, auto_reply: impl Into<String>) -> Self {
        ReplyScheduler { store, delay, auto_reply: auto_reply.into() }
    }

    pub fn from_config(store: ChatStore, config: &ChatConfig) -> Self {
        Self::new(store, config.reply_delay(), config.auto_reply.clone())
    }

    /// Must be called inside a tokio runtime.
    pub fn schedule_reply(&self, contact: &str, from: ChatSender) -> PendingReply {
        let store = self.store.clone();
        let delay = self.delay;
        let body = self.auto_reply.clone();
        let contact = contact.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match store.send(&contact, from, &body) {
                Ok(message) => info!("Simulated reply {} delivered to {}", message.id, contact),
                Err(e) => error!("Failed to store simulated reply for {}: {}", contact, e),
            }
        });
        PendingReply { handle: Some(handle) }
    }
}
