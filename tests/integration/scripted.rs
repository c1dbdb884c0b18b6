//! In-memory transport that replays scripted replies per request path.
//!
//! Paired with tokio's paused clock it makes retry and polling timing exact.

use async_trait::async_trait;
use bytes::Bytes;
use deepl_client::transport::{RequestSpec, Transport, TransportError, TransportResponse};
use deepl_client::Translator;
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, String),
    Timeout,
    /// Status plus a body that fails after delivering the given bytes.
    BrokenBody(u16, String),
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Reply::Status(status, body.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct Seen {
    pub path: String,
    pub at: Instant,
    pub params: Vec<(String, String)>,
}

/// The last reply queued for a path is repeated once the others are used up.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    seen: Mutex<Vec<Seen>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, path: &str, replies: Vec<Reply>) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), replies.into());
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.seen().iter().filter(|s| s.path == path).count()
    }

    pub fn translator(self: &Arc<Self>, max_retries: u32) -> Translator {
        Translator::with_transport(self.clone(), max_retries, Duration::from_secs(10))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        request: &RequestSpec,
        _timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        self.seen.lock().unwrap().push(Seen {
            path: request.path().to_string(),
            at: Instant::now(),
            params: request.param_list().to_vec(),
        });
        let reply = {
            let mut routes = self.routes.lock().unwrap();
            let queue = routes
                .get_mut(request.path())
                .unwrap_or_else(|| panic!("no script for {}", request.path()));
            if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap()
            }
        };
        match reply {
            Reply::Status(status, body) => Ok(TransportResponse::from_bytes(status, body)),
            Reply::Timeout => Err(TransportError::Timeout("scripted timeout".into())),
            Reply::BrokenBody(status, partial) => {
                let chunks = vec![
                    Ok(Bytes::from(partial)),
                    Err(TransportError::Timeout("body stalled".into())),
                ];
                Ok(TransportResponse::new(status, stream::iter(chunks).boxed()))
            }
        }
    }
}
