//! Extraction and validation of structured content from model text.

use crate::structured::ResponseFormat;
use once_cell::sync::Lazy;
use regex::Regex;

static FENCED_JSON: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"```json\s*([\s\S]*?)\s*```",
        r"```\s*([\s\S]*?)\s*```",
        r"\{[\s\S]*\}",
        r"\[[\s\S]*\]",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Parse JSON from model output, tolerating markdown code fences and surrounding prose.
pub fn extract_json(text: &str) -> Option<serde_json::Value> {
    let text = text.trim();
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(text) {
        return Some(parsed);
    }

    for re in FENCED_JSON.iter() {
        if let Some(captures) = re.captures(text) {
            let candidate = match captures.get(1) {
                Some(inner) => inner.as_str(),
                None => captures.get(0).map(|c| c.as_str()).unwrap_or(text),
            };
            if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(candidate.trim()) {
                return Some(parsed);
            }
        }
    }

    None
}

/// Validate `value` against a JSON schema, returning every violation.
pub fn validate(schema: &serde_json::Value, value: &serde_json::Value) -> Result<(), Vec<String>> {
    let compiled = jsonschema::JSONSchema::compile(schema)
        .map_err(|e| vec![format!("invalid schema: {}", e)])?;
    compiled.validate(value).map_err(|errors| {
        errors
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect()
    })
}

/// Parsed payload for `content` under `format`, or `None` if it does not parse or validate.
pub fn parse_structured(content: &str, format: &ResponseFormat) -> Option<serde_json::Value> {
    let Some(value) = extract_json(content) else {
        tracing::warn!(
            "Structured output requested but content is not JSON ({} chars)",
            content.len()
        );
        return None;
    };

    match format {
        ResponseFormat::JsonObject if value.is_object() => Some(value),
        ResponseFormat::JsonObject => {
            tracing::warn!("JSON object requested but content parsed to a non-object value");
            None
        }
        ResponseFormat::JsonSchema { json_schema } => {
            match validate(&json_schema.schema, &value) {
                Ok(()) => Some(value),
                Err(errors) => {
                    tracing::warn!(
                        schema = %json_schema.name,
                        "Structured output failed schema validation: {}",
                        errors.join("; ")
                    );
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person_format() -> ResponseFormat {
        ResponseFormat::from_schema(
            "person",
            json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "age": {"type": "integer"}
                },
                "required": ["name"]
            }),
        )
    }

    #[test]
    fn extracts_from_code_fence() {
        let text = "Sure:\n```json\n{\"name\": \"Ada\"}\n```";
        assert_eq!(extract_json(text), Some(json!({"name": "Ada"})));
    }

    #[test]
    fn extracts_embedded_object() {
        let text = "The answer is {\"ok\": true} as requested.";
        assert_eq!(extract_json(text), Some(json!({"ok": true})));
        assert_eq!(extract_json("no json here"), None);
    }

    #[test]
    fn schema_mode_accepts_valid_payload() {
        let parsed = parse_structured(r#"{"name": "Ada", "age": 36}"#, &person_format());
        assert_eq!(parsed, Some(json!({"name": "Ada", "age": 36})));
    }

    #[test]
    fn schema_mode_rejects_invalid_payload() {
        assert_eq!(parse_structured(r#"{"age": "old"}"#, &person_format()), None);
        let errors = validate(
            person_format().schema().unwrap(),
            &json!({"name": 5}),
        )
        .unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn json_object_mode_skips_schema() {
        let parsed = parse_structured(r#"{"anything": [1, 2]}"#, &ResponseFormat::json_object());
        assert_eq!(parsed, Some(json!({"anything": [1, 2]})));
        assert_eq!(parse_structured("plain words", &ResponseFormat::json_object()), None);
    }

    #[test]
    fn json_object_mode_requires_an_object() {
        let format = ResponseFormat::json_object();
        assert_eq!(parse_structured("42", &format), None);
        assert_eq!(parse_structured("\"just a string\"", &format), None);
        assert_eq!(parse_structured("The items are [1, 2]", &format), None);
        assert_eq!(
            parse_structured("```json\n{\"items\": [1, 2]}\n```", &format),
            Some(json!({"items": [1, 2]}))
        );
    }
}
