//! Core data types: chat messages and chat completion responses.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Chat message with role and content |
//! | [`MessageRole`] | Message role (system, user, assistant) |
//! | [`ContentPart`] | Text or image part of a multimodal message |
//! | [`ChatResponse`] | Response with zero or more choices |
//!
//! ```rust
//! use chatmeter::types::{ContentPart, Message, MessageContent, MessageRole};
//!
//! let system = Message::system("You are a helpful assistant");
//! let user = Message::with_content(
//!     MessageRole::User,
//!     MessageContent::parts(vec![
//!         ContentPart::text("What's in this picture?"),
//!         ContentPart::image_bytes(b"\xff\xd8\xff", "image/jpeg"),
//!     ]),
//! );
//! assert!(!system.contains_image());
//! assert!(user.contains_image());
//! ```

pub mod message;
pub mod response;

pub use message::{ContentPart, ImageUrl, Message, MessageContent, MessageRole};
pub use response::{ChatResponse, Choice, ResponseMessage, Usage};
