//! Mock implementations of the backend traits for testing.
//!
//! Both mocks replay a fixed reply for every call and record what they were
//! asked to do, so tests can assert on the exact payloads that would have
//! gone over the wire.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

use crate::{
    traits::{ContentBackend, PublishBackend},
    types::{GenerationPayload, PublishPayload},
    Error, Result,
};

/// Scripted backend reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with this body.
    Respond(Value),
    /// Fail as a backend error with this message.
    Fail(String),
    /// Fail as if the outbound call timed out.
    TimedOut,
}

impl MockReply {
    fn into_result(self) -> Result<Value> {
        match self {
            Self::Respond(body) => Ok(body),
            Self::Fail(message) => Err(Error::backend(message)),
            Self::TimedOut => Err(Error::timeout("request exceeded 30s")),
        }
    }
}

// =============================================================================
// Mock Content Backend
// =============================================================================

/// Content backend that always returns the same reply.
pub struct MockContentBackend {
    reply: MockReply,
    calls: Mutex<Vec<(String, GenerationPayload)>>,
}

impl MockContentBackend {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always respond with `body`.
    pub fn responding(body: Value) -> Self {
        Self::new(MockReply::Respond(body))
    }

    /// Always fail with `message`.
    pub fn failing(message: &str) -> Self {
        Self::new(MockReply::Fail(message.to_string()))
    }

    /// Recorded `(endpoint, payload)` pairs.
    pub fn calls(&self) -> Vec<(String, GenerationPayload)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentBackend for MockContentBackend {
    async fn generate(&self, endpoint: &str, payload: &GenerationPayload) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), payload.clone()));
        self.reply.clone().into_result()
    }
}

// =============================================================================
// Mock Publish Backend
// =============================================================================

/// Publishing webhook that always returns the same reply.
pub struct MockPublishBackend {
    reply: MockReply,
    calls: Mutex<Vec<PublishPayload>>,
}

impl MockPublishBackend {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn responding(body: Value) -> Self {
        Self::new(MockReply::Respond(body))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(MockReply::Fail(message.to_string()))
    }

    pub fn calls(&self) -> Vec<PublishPayload> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PublishBackend for MockPublishBackend {
    async fn publish(&self, payload: &PublishPayload) -> Result<Value> {
        self.calls.lock().unwrap().push(payload.clone());
        self.reply.clone().into_result()
    }
}
