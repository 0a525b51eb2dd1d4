//! Request assembly: the system + user message pair and the outgoing payload.

use crate::structured::ResponseFormat;
use crate::types::message::guess_media_type;
use crate::types::{ContentPart, Message, MessageContent, MessageRole};
use crate::{Error, Result};
use serde::Serialize;
use std::path::Path;

/// Outgoing chat request. Built once per call and never modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestPayload {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
}

impl RequestPayload {
    pub fn new(
        model: impl Into<String>,
        messages: Vec<Message>,
        response_format: Option<ResponseFormat>,
        max_completion_tokens: Option<u32>,
    ) -> Self {
        Self {
            model: model.into(),
            messages,
            response_format,
            // zero means "no limit", matching an omitted field
            max_completion_tokens: max_completion_tokens.filter(|n| *n > 0),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn response_format(&self) -> Option<&ResponseFormat> {
        self.response_format.as_ref()
    }

    pub fn max_completion_tokens(&self) -> Option<u32> {
        self.max_completion_tokens
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Read an image file and wrap it as a base64 data-URI content part.
pub fn encode_image(path: &Path) -> Result<ContentPart> {
    let bytes = std::fs::read(path).map_err(|source| Error::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ContentPart::image_bytes(&bytes, guess_media_type(path)))
}

/// System message followed by the user message.
///
/// With an image, the user message becomes `[text, image]`. If the image cannot be
/// read the failure is logged and the user message stays plain text.
pub fn build_messages(system: &str, user: &str, image: Option<&Path>) -> Vec<Message> {
    let user_content = match image.map(encode_image) {
        None => MessageContent::text(user),
        Some(Ok(image_part)) => {
            MessageContent::parts(vec![ContentPart::text(user), image_part])
        }
        Some(Err(e)) => {
            tracing::warn!("Error encoding image, sending text only: {}", e);
            MessageContent::text(user)
        }
    };

    vec![
        Message::system(system),
        Message::with_content(MessageRole::User, user_content),
    ]
}

pub fn build_request(
    model: &str,
    system: &str,
    user: &str,
    image: Option<&Path>,
    response_format: Option<ResponseFormat>,
    max_completion_tokens: Option<u32>,
) -> RequestPayload {
    RequestPayload::new(
        model,
        build_messages(system, user, image),
        response_format,
        max_completion_tokens,
    )
}
