//! Chat client: assembles the request, calls the transport, unwraps the response,
//! and charges the call to the running cost totals.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod chat;
pub mod core;
pub mod outcome;

pub use builder::ChatClientBuilder;
pub use chat::ChatRequest;
pub use core::ChatClient;
pub use outcome::{unwrap_response, ChatOutcome};
