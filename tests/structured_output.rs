//! Integration tests for structured output

mod common;

use chatmeter::structured::{parse_structured, ResponseFormat};
use chatmeter::types::{Choice, ResponseMessage};
use chatmeter::ChatResponse;
use common::{client_with, ScriptedTransport};
use serde::Deserialize;

#[derive(Debug, PartialEq, Deserialize, schemars::JsonSchema)]
struct PhotoCaption {
    title: String,
    objects: Vec<String>,
}

#[test]
fn derived_schema_validates_model_output() {
    let format = ResponseFormat::for_type::<PhotoCaption>("photo_caption");

    let good = "```json\n{\"title\": \"Kitchen\", \"objects\": [\"kettle\", \"mug\"]}\n```";
    assert!(parse_structured(good, &format).is_some());

    let missing_field = r#"{"title": "Kitchen"}"#;
    assert!(parse_structured(missing_field, &format).is_none());
}

#[tokio::test]
async fn parsed_outcome_deserializes_into_type() {
    let content = r#"{"title": "Kitchen", "objects": ["kettle"]}"#;
    let parsed = parse_structured(content, &ResponseFormat::for_type::<PhotoCaption>("photo_caption"));
    let resp = ChatResponse {
        choices: vec![Choice::new(
            ResponseMessage::text(content).with_parsed(parsed.expect("valid payload")),
        )],
        ..Default::default()
    };
    let client = client_with(ScriptedTransport::responding(resp));

    let outcome = client
        .chat("You caption photos.", "Caption this kitchen.")
        .response_format(ResponseFormat::for_type::<PhotoCaption>("photo_caption"))
        .send()
        .await;

    let caption: PhotoCaption = outcome.parsed_as().expect("parsed").expect("deserializes");
    assert_eq!(
        caption,
        PhotoCaption {
            title: "Kitchen".into(),
            objects: vec!["kettle".into()],
        }
    );
}
