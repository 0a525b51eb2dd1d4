//! `response_format` request parameter.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Structured output mode requested from the model.
///
/// Serializes to the OpenAI `response_format` parameter:
///
/// ```json
/// { "type": "json_schema", "json_schema": { "name": "response", "strict": true, "schema": { ... } } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Any valid JSON object
    JsonObject,
    /// JSON that must satisfy a caller-supplied schema
    JsonSchema { json_schema: JsonSchemaSpec },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchemaSpec {
    pub name: String,
    pub schema: serde_json::Value,
    #[serde(default)]
    pub strict: bool,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        ResponseFormat::JsonObject
    }

    /// Schema mode from a raw JSON schema.
    ///
    /// ```
    /// use chatmeter::structured::ResponseFormat;
    /// use serde_json::json;
    ///
    /// let format = ResponseFormat::from_schema(
    ///     "person",
    ///     json!({"type": "object", "properties": {"name": {"type": "string"}}}),
    /// );
    /// assert_eq!(format.name(), Some("person"));
    /// ```
    pub fn from_schema(name: impl Into<String>, schema: serde_json::Value) -> Self {
        ResponseFormat::JsonSchema {
            json_schema: JsonSchemaSpec {
                name: name.into(),
                schema,
                strict: true,
            },
        }
    }

    /// Schema mode with the schema derived from a Rust type.
    pub fn for_type<T: schemars::JsonSchema>(name: impl Into<String>) -> Self {
        let schema = schemars::schema_for!(T);
        let schema = serde_json::to_value(&schema).unwrap_or_else(|_| json!({}));
        Self::from_schema(name, schema)
    }

    pub fn non_strict(mut self) -> Self {
        if let ResponseFormat::JsonSchema { json_schema } = &mut self {
            json_schema.strict = false;
        }
        self
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ResponseFormat::JsonObject => None,
            ResponseFormat::JsonSchema { json_schema } => Some(&json_schema.name),
        }
    }

    pub fn schema(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseFormat::JsonObject => None,
            ResponseFormat::JsonSchema { json_schema } => Some(&json_schema.schema),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(schemars::JsonSchema)]
    #[allow(dead_code)]
    struct Caption {
        title: String,
        tags: Vec<String>,
    }

    #[test]
    fn json_object_wire_shape() {
        let v = serde_json::to_value(ResponseFormat::json_object()).unwrap();
        assert_eq!(v, json!({"type": "json_object"}));
    }

    #[test]
    fn json_schema_wire_shape() {
        let format = ResponseFormat::from_schema("answer", json!({"type": "object"}));
        let v = serde_json::to_value(&format).unwrap();
        assert_eq!(v["type"], "json_schema");
        assert_eq!(v["json_schema"]["name"], "answer");
        assert_eq!(v["json_schema"]["strict"], true);
        assert_eq!(v["json_schema"]["schema"]["type"], "object");

        let relaxed = serde_json::to_value(format.non_strict()).unwrap();
        assert_eq!(relaxed["json_schema"]["strict"], false);
    }

    #[test]
    fn schema_derived_from_type() {
        let format = ResponseFormat::for_type::<Caption>("caption");
        let schema = format.schema().unwrap();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["title"]["type"], "string");
        assert_eq!(schema["properties"]["tags"]["type"], "array");
    }
}
