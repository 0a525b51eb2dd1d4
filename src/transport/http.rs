use crate::request::RequestPayload;
use crate::structured::parse_structured;
use crate::transport::{ChatTransport, TransportError};
use crate::types::ChatResponse;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH)
    }

    /// Best-effort extraction of `error.message` from an API error body.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.trim().to_string())
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, payload: &RequestPayload) -> Result<ChatResponse> {
        let mut req = self.client.post(self.endpoint()).json(payload);

        // a missing key is left for the API to reject
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        if !status.is_success() {
            return Err(Error::Remote {
                status: status.as_u16(),
                message: Self::error_message(&String::from_utf8_lossy(&body)),
            });
        }

        let mut parsed: ChatResponse = serde_json::from_slice(&body)?;

        if let Some(format) = payload.response_format() {
            for choice in parsed.choices.iter_mut() {
                let message = &mut choice.message;
                if message.parsed.is_some() || message.refusal.is_some() {
                    continue;
                }
                if let Some(content) = message.content.as_deref() {
                    message.parsed = parse_structured(content, format);
                }
            }
        }

        Ok(parsed)
    }
}
