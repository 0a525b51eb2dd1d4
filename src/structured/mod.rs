//! Structured output: the `response_format` request parameter and the
//! parse/validate step that turns model text into a structured payload.
//!
//! - [`ResponseFormat`]: JSON-object or JSON-schema mode, serialized for the request
//! - [`parse_structured`]: extract JSON from model text and validate it against the schema
//!
//! # Examples
//!
//! ```
//! use chatmeter::structured::{parse_structured, ResponseFormat};
//! use serde_json::json;
//!
//! let format = ResponseFormat::from_schema(
//!     "user",
//!     json!({
//!         "type": "object",
//!         "properties": {"name": {"type": "string"}},
//!         "required": ["name"]
//!     }),
//! );
//!
//! let parsed = parse_structured(r#"{"name": "Alice"}"#, &format);
//! assert_eq!(parsed, Some(json!({"name": "Alice"})));
//! ```

pub mod format;
pub mod parse;

pub use format::{JsonSchemaSpec, ResponseFormat};
pub use parse::{extract_json, parse_structured, validate};
