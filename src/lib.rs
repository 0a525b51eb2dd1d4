//! # chatmeter
//!
//! Chat-completion client that sends a system + user message pair (optionally with an
//! inline image) to an OpenAI-compatible API and keeps a running estimate of what the
//! calls cost.
//!
//! ## Overview
//!
//! Every call goes through the same steps:
//!
//! 1. **Assemble**: build the two-message request, embedding an image as a base64
//!    data URI when one is attached ([`request`])
//! 2. **Send**: hand the payload to a [`transport::ChatTransport`]
//! 3. **Unwrap**: classify the first choice as parsed, refused, or plain ([`ChatOutcome`])
//! 4. **Charge**: estimate prompt and completion cost from the text sent and received
//!    and add it to the client's running totals ([`tokens::CostAccountant`])
//!
//! Per-call failures (unreadable image, failed API call) are logged with `tracing`
//! and degrade the outcome; they never surface as errors. Only building a client can
//! fail, e.g. when the model has no pricing entry.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatmeter::{ChatClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> chatmeter::Result<()> {
//!     let client = ChatClient::new(ClientConfig::new("gpt-4o").api_key("sk-..."))?;
//!
//!     let outcome = client
//!         .chat("You describe photos.", "What is in this picture?")
//!         .image("cat.jpg")
//!         .send()
//!         .await;
//!
//!     println!("{:?}", outcome.text());
//!     client.print_total_costs();
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, per-call request builder, response unwrapping |
//! | [`config`] | Explicit client configuration |
//! | [`request`] | Message and payload assembly |
//! | [`structured`] | Response format and structured output validation |
//! | [`tokens`] | Token estimation, pricing, and cost accounting |
//! | [`transport`] | API transport trait and HTTP implementation |
//! | [`types`] | Message and response types |

pub mod client;
pub mod config;
pub mod request;
pub mod structured;
pub mod tokens;
pub mod transport;
pub mod types;

pub use client::{ChatClient, ChatClientBuilder, ChatOutcome, ChatRequest};
pub use config::ClientConfig;
pub use tokens::{CallCost, CostAccountant, CostTotals, ModelPricing, PricingTable};
pub use types::{ChatResponse, Message, MessageRole};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
