//! Running cost totals for one client.

use crate::tokens::{counter_for_model, ModelPricing, PricingTable, TokenCounter};
use crate::types::{ChatResponse, Message};
use crate::Result;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Cost attributed to a single recorded call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CallCost {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub has_image: bool,
    pub prompt_cost: f64,
    pub completion_cost: f64,
}

impl CallCost {
    pub fn total(&self) -> f64 {
        self.prompt_cost + self.completion_cost
    }
}

/// Snapshot of the running totals. `combined_total` is always
/// `prompt_total + completion_total`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostTotals {
    pub prompt_total: f64,
    pub completion_total: f64,
    pub combined_total: f64,
}

impl CostTotals {
    fn from_parts(prompt_total: f64, completion_total: f64) -> Self {
        Self {
            prompt_total,
            completion_total,
            combined_total: prompt_total + completion_total,
        }
    }
}

impl fmt::Display for CostTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total prompt cost: ${:.6}", self.prompt_total)?;
        writeln!(f, "Total completion cost: ${:.6}", self.completion_total)?;
        write!(f, "Overall total cost: ${:.6}", self.combined_total)
    }
}

#[derive(Debug, Default)]
struct Running {
    prompt: f64,
    completion: f64,
}

/// Estimates per-call cost from text and keeps the client's running totals.
///
/// Both totals live behind one lock, so concurrent `record_call`s never lose an update
/// and a `totals()` snapshot never observes half of a call.
pub struct CostAccountant {
    pricing: ModelPricing,
    counter: Arc<dyn TokenCounter>,
    running: Mutex<Running>,
}

impl fmt::Debug for CostAccountant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CostAccountant")
            .field("pricing", &self.pricing)
            .field("totals", &self.totals())
            .finish_non_exhaustive()
    }
}

impl CostAccountant {
    /// Accountant for `model`, failing with `UnknownModel` if the table has no entry
    /// and with `Configuration` if the entry's rates are negative or non-finite.
    pub fn new(model: &str, table: &PricingTable) -> Result<Self> {
        let pricing = table.lookup(model)?;
        pricing.check()?;
        Ok(Self {
            counter: counter_for_model(model),
            pricing,
            running: Mutex::new(Running::default()),
        })
    }

    pub fn with_pricing(pricing: ModelPricing) -> Result<Self> {
        pricing.check()?;
        Ok(Self {
            counter: counter_for_model(&pricing.model),
            pricing,
            running: Mutex::new(Running::default()),
        })
    }

    pub fn with_counter(mut self, counter: Arc<dyn TokenCounter>) -> Self {
        self.counter = counter;
        self
    }

    pub fn model(&self) -> &str {
        &self.pricing.model
    }

    pub fn pricing(&self) -> &ModelPricing {
        &self.pricing
    }

    pub fn estimate_prompt_cost(&self, prompt: &str, has_image: bool) -> f64 {
        let base = self.pricing.prompt_cost(self.counter.count(prompt));
        if has_image {
            base + self.pricing.image_surcharge()
        } else {
            base
        }
    }

    pub fn estimate_completion_cost(&self, completion: Option<&str>) -> f64 {
        match completion {
            Some(text) if !text.is_empty() => {
                self.pricing.completion_cost(self.counter.count(text))
            }
            _ => 0.0,
        }
    }

    /// Charge one call to the running totals.
    ///
    /// The prompt side is always charged; the completion side only when `response`
    /// has at least one choice, using the first choice's text.
    pub fn record_call(&self, messages: &[Message], response: Option<&ChatResponse>) -> CallCost {
        let prompt: String = messages.iter().map(Message::text).collect();
        let has_image = messages.iter().any(Message::contains_image);
        let completion = response
            .and_then(|r| r.first_choice())
            .and_then(|c| c.message.content.as_deref());

        let cost = CallCost {
            prompt_tokens: self.counter.count(&prompt),
            completion_tokens: completion.map(|t| self.counter.count(t)).unwrap_or(0),
            has_image,
            prompt_cost: self.estimate_prompt_cost(&prompt, has_image),
            completion_cost: self.estimate_completion_cost(completion),
        };

        {
            let mut running = self.running.lock().unwrap_or_else(|e| e.into_inner());
            running.prompt += cost.prompt_cost;
            running.completion += cost.completion_cost;
        }

        tracing::debug!(
            model = %self.pricing.model,
            prompt_tokens = cost.prompt_tokens,
            completion_tokens = cost.completion_tokens,
            has_image,
            "recorded call cost {:.6} + {:.6}",
            cost.prompt_cost,
            cost.completion_cost
        );
        cost
    }

    pub fn totals(&self) -> CostTotals {
        let running = self.running.lock().unwrap_or_else(|e| e.into_inner());
        CostTotals::from_parts(running.prompt, running.completion)
    }

    pub fn report(&self) -> String {
        self.totals().to_string()
    }
}
