//! Model pricing and the per-model pricing table.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Tokens billed for one attached image (low-detail tile).
pub const DEFAULT_IMAGE_TOKENS: u32 = 85;

fn default_image_tokens() -> u32 {
    DEFAULT_IMAGE_TOKENS
}

fn default_currency() -> String {
    "USD".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    #[serde(default)]
    pub model: String,
    pub input_cost_per_1k: f64,
    pub output_cost_per_1k: f64,
    /// Image surcharge, billed at the input rate once per call carrying an image.
    #[serde(default = "default_image_tokens")]
    pub image_tokens: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl ModelPricing {
    pub fn new(model: &str, input: f64, output: f64) -> Self {
        Self {
            model: model.into(),
            input_cost_per_1k: input,
            output_cost_per_1k: output,
            image_tokens: DEFAULT_IMAGE_TOKENS,
            currency: "USD".into(),
        }
    }

    pub fn with_image_tokens(mut self, tokens: u32) -> Self {
        self.image_tokens = tokens;
        self
    }

    pub fn prompt_cost(&self, tokens: usize) -> f64 {
        (tokens as f64 / 1000.0) * self.input_cost_per_1k
    }

    pub fn completion_cost(&self, tokens: usize) -> f64 {
        (tokens as f64 / 1000.0) * self.output_cost_per_1k
    }

    pub fn image_surcharge(&self) -> f64 {
        self.prompt_cost(self.image_tokens as usize)
    }

    /// Rejects negative or non-finite rates.
    pub fn check(&self) -> Result<()> {
        let rates = [
            ("input_cost_per_1k", self.input_cost_per_1k),
            ("output_cost_per_1k", self.output_cost_per_1k),
        ];
        for (field, rate) in rates {
            if !rate.is_finite() || rate < 0.0 {
                return Err(Error::configuration_with_context(
                    "pricing rates must be finite and non-negative",
                    ErrorContext::new()
                        .with_field_path(format!("models.{}.{}", self.model, field))
                        .with_details(rate.to_string())
                        .with_source("pricing_table"),
                ));
            }
        }
        Ok(())
    }

    pub fn gpt_4o() -> Self {
        Self::new("gpt-4o", 0.005, 0.015)
    }
    pub fn gpt_4o_2024_08_06() -> Self {
        Self::new("gpt-4o-2024-08-06", 0.0025, 0.01)
    }
    pub fn gpt_4o_mini() -> Self {
        Self::new("gpt-4o-mini", 0.00015, 0.0006)
    }
    pub fn gpt_4_turbo() -> Self {
        Self::new("gpt-4-turbo", 0.01, 0.03)
    }
    pub fn claude_35_sonnet() -> Self {
        Self::new("claude-3-5-sonnet", 0.003, 0.015)
    }
    pub fn claude_3_haiku() -> Self {
        Self::new("claude-3-haiku", 0.00025, 0.00125)
    }
}

#[derive(Debug, Deserialize)]
struct PricingFile {
    #[serde(default)]
    models: HashMap<String, ModelPricing>,
}

/// Pricing entries keyed by model id.
#[derive(Debug, Clone, Default)]
pub struct PricingTable {
    models: HashMap<String, ModelPricing>,
}

impl PricingTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for p in [
            ModelPricing::gpt_4o(),
            ModelPricing::gpt_4o_2024_08_06(),
            ModelPricing::gpt_4o_mini(),
            ModelPricing::gpt_4_turbo(),
            ModelPricing::claude_35_sonnet(),
            ModelPricing::claude_3_haiku(),
        ] {
            table.insert(p);
        }
        table
    }

    /// Parse a YAML pricing document:
    ///
    /// ```yaml
    /// models:
    ///   gpt-4o:
    ///     input_cost_per_1k: 0.005
    ///     output_cost_per_1k: 0.015
    ///     image_tokens: 85
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: PricingFile = serde_yaml::from_str(yaml)?;
        let mut table = Self::empty();
        for (id, mut pricing) in file.models {
            pricing.model = id;
            pricing.check()?;
            table.insert(pricing);
        }
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Entries of `other` replace entries with the same id.
    pub fn merge(mut self, other: PricingTable) -> Self {
        self.models.extend(other.models);
        self
    }

    pub fn insert(&mut self, pricing: ModelPricing) {
        self.models.insert(pricing.model.clone(), pricing);
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Exact id first, then the longest table key that prefixes `model` up to a `-`
    /// (so dated snapshots resolve to their family entry).
    pub fn lookup(&self, model: &str) -> Result<ModelPricing> {
        if let Some(p) = self.models.get(model) {
            return Ok(p.clone());
        }
        self.models
            .iter()
            .filter(|(key, _)| {
                model
                    .strip_prefix(key.as_str())
                    .is_some_and(|rest| rest.starts_with('-'))
            })
            .max_by_key(|(key, _)| key.len())
            .map(|(_, p)| p.clone())
            .ok_or_else(|| Error::UnknownModel {
                model: model.to_string(),
            })
    }
}
