//! Scripted transport for tests.

use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One scripted outcome for [`MockTransport`].
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this response
    Response(HttpResponse),
    /// Fail at the transport level
    Error(TransportError),
    /// Panic inside `send`
    Panic(String),
}

impl MockReply {
    /// A response with a JSON body.
    #[must_use]
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::Response(HttpResponse {
            status,
            content_type: Some("application/json".to_string()),
            body: body.to_string(),
        })
    }

    /// A response with a plain body and content type.
    pub fn text(status: u16, content_type: &str, body: impl Into<String>) -> Self {
        Self::Response(HttpResponse {
            status,
            content_type: Some(content_type.to_string()),
            body: body.into(),
        })
    }
}

/// Transport that replays queued replies and records every request.
///
/// Sending with an empty queue is a transport error, so an unexpected
/// extra call shows up as a failed lookup instead of a hang.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Empty transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply.
    pub fn push(&self, reply: MockReply) {
        lock(&self.replies).push_back(reply);
    }

    /// Queue a JSON response.
    pub fn reply_json(&self, status: u16, body: &serde_json::Value) {
        self.push(MockReply::json(status, body));
    }

    /// Queue a plain-text response.
    pub fn reply_text(&self, status: u16, content_type: &str, body: impl Into<String>) {
        self.push(MockReply::text(status, content_type, body));
    }

    /// Queue a transport failure.
    pub fn fail(&self, error: TransportError) {
        self.push(MockReply::Error(error));
    }

    /// Number of requests sent so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Every request sent so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Replies not yet consumed.
    #[must_use]
    pub fn remaining_replies(&self) -> usize {
        lock(&self.replies).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(request);
        let reply = lock(&self.replies).pop_front();

        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Error(error)) => Err(error),
            Some(MockReply::Panic(message)) => panic!("{message}"),
            None => Err(TransportError::Other(
                "mock transport has no reply queued".to_string(),
            )),
        }
    }
}
