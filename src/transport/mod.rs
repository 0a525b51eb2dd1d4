//! The hosted-API seam.
//!
//! [`ChatTransport`] is the only thing the client needs from the outside world:
//! send one assembled request, get one response back. [`HttpTransport`] talks to an
//! OpenAI-compatible `/chat/completions` endpoint; tests substitute their own.

mod http;

pub use http::HttpTransport;

use crate::request::RequestPayload;
use crate::types::ChatResponse;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, payload: &RequestPayload) -> Result<ChatResponse>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
