//! Token estimation and cost accounting.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`TokenCounter`] | Trait for token counting implementations |
//! | [`CharacterEstimator`] | Length-based approximation (4 chars ≈ 1 token) |
//! | [`AnthropicEstimator`] | Anthropic-specific token estimation |
//! | [`ModelPricing`] | Per-model token rates and image surcharge |
//! | [`PricingTable`] | Built-in and YAML-loaded pricing entries |
//! | [`CostAccountant`] | Per-call estimates and running totals |
//!
//! ## Example
//!
//! ```rust
//! use chatmeter::tokens::{CostAccountant, PricingTable};
//! use chatmeter::types::{ChatResponse, Message};
//!
//! let accountant = CostAccountant::new("gpt-4o", &PricingTable::builtin())?;
//! let messages = vec![Message::system("Be brief."), Message::user("Hello!")];
//! accountant.record_call(&messages, Some(&ChatResponse::from_text("Hi.")));
//!
//! let totals = accountant.totals();
//! assert_eq!(totals.combined_total, totals.prompt_total + totals.completion_total);
//! println!("{}", totals);
//! # Ok::<(), chatmeter::Error>(())
//! ```

mod accountant;
mod counter;
mod pricing;

pub use accountant::{CallCost, CostAccountant, CostTotals};
pub use counter::{counter_for_model, AnthropicEstimator, CharacterEstimator, TokenCounter};
pub use pricing::{ModelPricing, PricingTable, DEFAULT_IMAGE_TOKENS};
