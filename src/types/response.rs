//! Chat completion response types.

use serde::{Deserialize, Serialize};

/// Response returned by a [`ChatTransport`](crate::transport::ChatTransport).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatResponse {
    /// Response with a single plain-text choice.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice::new(ResponseMessage::text(text))],
            ..Default::default()
        }
    }

    pub fn first_choice(&self) -> Option<&Choice> {
        self.choices.first()
    }

    /// Text content of the first choice, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.first_choice()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl Choice {
    pub fn new(message: ResponseMessage) -> Self {
        Self {
            index: 0,
            message,
            finish_reason: Some("stop".to_string()),
        }
    }
}

/// Assistant message of a choice.
///
/// `parsed` is filled by the transport when the request carried a response format
/// and the content passed validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal: Option<String>,
}

impl ResponseMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn refusal(reason: impl Into<String>) -> Self {
        Self {
            content: None,
            parsed: None,
            refusal: Some(reason.into()),
        }
    }

    pub fn with_parsed(mut self, parsed: serde_json::Value) -> Self {
        self.parsed = Some(parsed);
        self
    }
}

/// Token usage reported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}
