//! Shared test helpers: a scripted in-memory transport and envelope builders.

use crate::error::NetworkError;
use crate::executor::{HttpReply, Transport};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

/// One scripted answer of a [`ScriptedTransport`]
#[derive(Clone, Debug)]
pub(crate) enum FakeReply {
    /// Answer with this status and body
    Reply(HttpReply),
    /// Never answer; lets the executor's per-attempt timeout fire
    Hang,
}

impl FakeReply {
    pub(crate) fn json(status: u16, body: serde_json::Value) -> Self {
        FakeReply::Reply(HttpReply {
            status,
            body: body.to_string(),
        })
    }

    pub(crate) fn text(status: u16, body: &str) -> Self {
        FakeReply::Reply(HttpReply {
            status,
            body: body.to_string(),
        })
    }

    pub(crate) fn status(status: u16) -> Self {
        FakeReply::text(status, "")
    }
}

/// Transport that answers from a script and records every payload it receives.
/// The last scripted reply repeats once the script runs out.
pub(crate) struct ScriptedTransport {
    script: Vec<FakeReply>,
    payloads: Mutex<Vec<serde_json::Value>>,
}

impl ScriptedTransport {
    pub(crate) fn new(script: Vec<FakeReply>) -> Arc<Self> {
        assert!(!script.is_empty(), "script needs at least one reply");
        Arc::new(Self {
            script,
            payloads: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }

    pub(crate) fn payloads(&self) -> Vec<serde_json::Value> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(&self, payload: &serde_json::Value) -> Result<HttpReply, NetworkError> {
        let index = {
            let mut payloads = self.payloads.lock().unwrap();
            payloads.push(payload.clone());
            payloads.len() - 1
        };
        let reply = self.script[index.min(self.script.len() - 1)].clone();

        match reply {
            FakeReply::Reply(reply) => Ok(reply),
            FakeReply::Hang => std::future::pending().await,
        }
    }
}

/// Upstream envelope whose first candidate carries `text`
pub(crate) fn envelope_with_text(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP"
        }]
    })
}
