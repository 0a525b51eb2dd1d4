use crate::client::core::ChatClient;
use crate::client::outcome::{unwrap_response, ChatOutcome};
use crate::request::build_request;
use crate::structured::ResponseFormat;
use crate::tokens::CallCost;
use std::path::PathBuf;
use tracing::Instrument;
use uuid::Uuid;

/// Builder for a single chat call.
pub struct ChatRequest<'a> {
    client: &'a ChatClient,
    system: String,
    user: String,
    image: Option<PathBuf>,
    response_format: Option<ResponseFormat>,
    max_completion_tokens: Option<u32>,
}

impl<'a> ChatRequest<'a> {
    pub(crate) fn new(client: &'a ChatClient, system: String, user: String) -> Self {
        Self {
            client,
            system,
            user,
            image: None,
            response_format: None,
            max_completion_tokens: client.default_max_completion_tokens,
        }
    }

    /// Attach an image file, sent inline as a base64 data URI.
    pub fn image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }

    /// Request structured output.
    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    pub fn max_completion_tokens(mut self, max: u32) -> Self {
        self.max_completion_tokens = Some(max);
        self
    }

    /// Send without a completion limit.
    pub fn no_completion_limit(mut self) -> Self {
        self.max_completion_tokens = None;
        self
    }

    /// Execute the call and return the unwrapped outcome.
    ///
    /// Never fails: image and API errors are logged and degrade the outcome, and the
    /// call is charged to the client's totals either way.
    pub async fn send(self) -> ChatOutcome {
        self.send_with_cost().await.0
    }

    /// Execute the call and also return what it added to the running totals.
    pub async fn send_with_cost(self) -> (ChatOutcome, CallCost) {
        let client = self.client;
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("chat", %request_id, model = %client.model);

        async move {
            let payload = build_request(
                &client.model,
                &self.system,
                &self.user,
                self.image.as_deref(),
                self.response_format,
                self.max_completion_tokens,
            );

            let response = match client.transport.send(&payload).await {
                Ok(resp) => Some(resp),
                Err(e) => {
                    tracing::warn!("Error calling chat API: {}", e);
                    None
                }
            };

            let outcome = unwrap_response(response.clone());
            // charged on what was actually sent, whatever the outcome
            let cost = client
                .accountant
                .record_call(payload.messages(), response.as_ref());

            (outcome, cost)
        }
        .instrument(span)
        .await
    }
}
