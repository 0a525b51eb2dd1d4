use crate::client::builder::ChatClientBuilder;
use crate::client::chat::ChatRequest;
use crate::config::ClientConfig;
use crate::tokens::{CostAccountant, CostTotals};
use crate::transport::ChatTransport;
use crate::Result;
use std::sync::Arc;

/// Chat client that charges every call it makes to its running cost totals.
///
/// The client is `Send + Sync`; share it behind an `Arc` to issue calls from
/// several tasks. Totals are updated atomically per call.
pub struct ChatClient {
    pub(crate) model: String,
    pub(crate) transport: Arc<dyn ChatTransport>,
    pub(crate) accountant: CostAccountant,
    pub(crate) default_max_completion_tokens: Option<u32>,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("model", &self.model)
            .field("accountant", &self.accountant)
            .field(
                "default_max_completion_tokens",
                &self.default_max_completion_tokens,
            )
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    /// Create a client over HTTP from explicit configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        ChatClientBuilder::new(config).build()
    }

    pub fn builder(config: ClientConfig) -> ChatClientBuilder {
        ChatClientBuilder::new(config)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Start a chat request with a system and a user message.
    pub fn chat(&self, system: impl Into<String>, user: impl Into<String>) -> ChatRequest<'_> {
        ChatRequest::new(self, system.into(), user.into())
    }

    pub fn accountant(&self) -> &CostAccountant {
        &self.accountant
    }

    /// Running totals since the client was built.
    pub fn totals(&self) -> CostTotals {
        self.accountant.totals()
    }

    pub fn report(&self) -> String {
        self.accountant.report()
    }

    pub fn print_total_costs(&self) {
        println!("{}", self.report());
    }
}
