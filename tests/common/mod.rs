//! Shared test doubles

use async_trait::async_trait;
use chatmeter::request::RequestPayload;
use chatmeter::transport::{ChatTransport, TransportError};
use chatmeter::{ChatClient, ChatResponse, ClientConfig, Error};
use std::sync::{Arc, Mutex};

/// Scripted reply of the fake API.
#[derive(Clone)]
pub enum Reply {
    Respond(ChatResponse),
    Fail(String),
}

/// In-process transport that records every payload and answers with a fixed reply.
pub struct ScriptedTransport {
    reply: Reply,
    sent: Mutex<Vec<RequestPayload>>,
}

impl ScriptedTransport {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn responding(resp: ChatResponse) -> Arc<Self> {
        Self::new(Reply::Respond(resp))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::new(Reply::Fail(message.to_string()))
    }

    pub fn sent(&self) -> Vec<RequestPayload> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> RequestPayload {
        self.sent().pop().expect("no request was sent")
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn send(&self, payload: &RequestPayload) -> chatmeter::Result<ChatResponse> {
        self.sent.lock().unwrap().push(payload.clone());
        match &self.reply {
            Reply::Respond(resp) => Ok(resp.clone()),
            Reply::Fail(msg) => Err(Error::Transport(TransportError::Other(msg.clone()))),
        }
    }
}

/// gpt-4o client ($0.005 / $0.015 per 1k tokens) over the given transport.
pub fn client_with(transport: Arc<ScriptedTransport>) -> ChatClient {
    ChatClient::builder(ClientConfig::new("gpt-4o"))
        .transport(transport)
        .build()
        .expect("client builds")
}
