use crate::client::core::ChatClient;
use crate::config::ClientConfig;
use crate::tokens::{CostAccountant, PricingTable, TokenCounter};
use crate::transport::{ChatTransport, HttpTransport};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;

/// Builder for creating clients with custom configuration.
pub struct ChatClientBuilder {
    config: ClientConfig,
    pricing: Option<PricingTable>,
    transport: Option<Arc<dyn ChatTransport>>,
    counter: Option<Arc<dyn TokenCounter>>,
}

impl ChatClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            pricing: None,
            transport: None,
            counter: None,
        }
    }

    /// Replace the pricing table entirely (built-in entries and `pricing_file` are ignored).
    pub fn pricing_table(mut self, table: PricingTable) -> Self {
        self.pricing = Some(table);
        self
    }

    /// Use a custom transport instead of HTTP (primarily for testing).
    pub fn transport(mut self, transport: Arc<dyn ChatTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Override the model-family token estimator.
    pub fn token_counter(mut self, counter: Arc<dyn TokenCounter>) -> Self {
        self.counter = Some(counter);
        self
    }

    fn resolve_pricing(&mut self) -> Result<PricingTable> {
        if let Some(table) = self.pricing.take() {
            return Ok(table);
        }
        let builtin = PricingTable::builtin();
        match &self.config.pricing_file {
            Some(path) => Ok(builtin.merge(PricingTable::from_path(path)?)),
            None => Ok(builtin),
        }
    }

    fn http_transport(config: &ClientConfig) -> Result<Arc<dyn ChatTransport>> {
        if config.timeout.is_zero() {
            return Err(Error::configuration_with_context(
                "timeout must be greater than zero",
                ErrorContext::new()
                    .with_field_path("config.timeout")
                    .with_source("client_builder"),
            ));
        }
        url::Url::parse(&config.base_url).map_err(|e| {
            Error::configuration_with_context(
                "invalid base url",
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_details(format!("{}: {}", config.base_url, e))
                    .with_source("client_builder"),
            )
        })?;
        Ok(Arc::new(HttpTransport::new(
            &config.base_url,
            config.api_key.clone(),
            config.timeout,
        )?))
    }

    /// Build the client. Fails only on configuration problems, such as a model with
    /// no pricing entry.
    pub fn build(mut self) -> Result<ChatClient> {
        let pricing = self.resolve_pricing()?;
        let mut accountant = CostAccountant::new(&self.config.model, &pricing)?;
        if let Some(counter) = self.counter.take() {
            accountant = accountant.with_counter(counter);
        }

        let transport = match self.transport.take() {
            Some(t) => t,
            None => Self::http_transport(&self.config)?,
        };

        tracing::info!(
            model = %self.config.model,
            pricing_entry = %accountant.model(),
            "chat client ready"
        );

        Ok(ChatClient {
            model: self.config.model,
            transport,
            accountant,
            default_max_completion_tokens: self.config.default_max_completion_tokens,
        })
    }
}

impl Default for ChatClientBuilder {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}
