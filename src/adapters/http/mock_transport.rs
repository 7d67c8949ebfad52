//! Mock gateway transport for testing.
//!
//! Supports:
//! - Scripted replies, per URL or as a fallback queue
//! - Error injection
//! - Call tracking

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{GatewayTransport, TransportError};

/// In-memory transport that replays scripted replies.
///
/// # Example
///
/// ```ignore
/// let mock = MockGatewayTransport::new();
/// mock.push_reply(b"<xml><return_code>FAIL</return_code></xml>".to_vec());
///
/// let reply = mock.post_bytes(url, body).await?;
/// assert_eq!(mock.call_count(), 1);
/// ```
#[derive(Default, Clone)]
pub struct MockGatewayTransport {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Replies consumed in order when no URL-specific reply is queued.
    replies: VecDeque<Vec<u8>>,

    /// Replies keyed by URL.
    url_replies: HashMap<String, VecDeque<Vec<u8>>>,

    /// Error to return on the next call.
    next_error: Option<TransportError>,

    call_log: Vec<RecordedPost>,
}

/// A POST seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPost {
    pub url: String,
    pub body: Vec<u8>,
}

impl RecordedPost {
    /// Body as UTF-8 text.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl MockGatewayTransport {
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Queues a reply for the next call to any URL.
    pub fn push_reply(&self, reply: impl Into<Vec<u8>>) {
        self.inner.lock().unwrap().replies.push_back(reply.into());
    }

    /// Queues a reply for the next call to `url`.
    pub fn push_reply_for(&self, url: &str, reply: impl Into<Vec<u8>>) {
        self.inner
            .lock()
            .unwrap()
            .url_replies
            .entry(url.to_string())
            .or_default()
            .push_back(reply.into());
    }

    /// Fails the next call with `error`.
    pub fn set_error(&self, error: TransportError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<RecordedPost> {
        self.inner.lock().unwrap().call_log.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().call_log.len()
    }

    pub fn last_call(&self) -> Option<RecordedPost> {
        self.inner.lock().unwrap().call_log.last().cloned()
    }
}

#[async_trait]
impl GatewayTransport for MockGatewayTransport {
    async fn post_bytes(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let mut state = self.inner.lock().unwrap();
        state.call_log.push(RecordedPost {
            url: url.to_string(),
            body,
        });

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        if let Some(reply) = state.url_replies.get_mut(url).and_then(VecDeque::pop_front) {
            return Ok(reply);
        }

        state.replies.pop_front().ok_or_else(|| {
            TransportError::invalid_response(format!("No scripted reply for {}", url))
        })
    }
}
