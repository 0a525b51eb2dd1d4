//! HTTP transport against a mock OpenAI-compatible server.

use chatmeter::structured::ResponseFormat;
use chatmeter::transport::{ChatTransport, HttpTransport};
use chatmeter::request::build_request;
use chatmeter::{ChatClient, ChatOutcome, ClientConfig, Error};
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

fn completion_body(message: serde_json::Value) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o",
        "choices": [{"index": 0, "message": message, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
    })
    .to_string()
}

fn client_for(server: &mockito::ServerGuard) -> ChatClient {
    ChatClient::new(
        ClientConfig::new("gpt-4o")
            .api_key("sk-test")
            .base_url(format!("{}/v1", server.url()))
            .timeout(Duration::from_secs(5)),
    )
    .expect("client builds")
}

#[tokio::test]
async fn posts_payload_with_bearer_auth() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hello"}
            ],
            "max_completion_tokens": 300
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(json!({"role": "assistant", "content": "Hi!"})))
        .create_async()
        .await;

    let client = client_for(&server);
    let outcome = client.chat("be brief", "hello").send().await;

    mock.assert_async().await;
    assert_eq!(outcome.text(), Some("Hi!"));
    assert!(client.totals().completion_total > 0.0);
}

#[tokio::test]
async fn api_error_degrades_and_charges_prompt() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let outcome = client.chat("be brief", "hello").send().await;

    assert_eq!(outcome, ChatOutcome::Plain(None));
    assert!(client.totals().prompt_total > 0.0);
    assert_eq!(client.totals().completion_total, 0.0);
}

#[tokio::test]
async fn remote_error_carries_status_and_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body(r#"{"error": {"message": "Rate limit reached"}}"#)
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url(), None, Duration::from_secs(5)).unwrap();
    let payload = build_request("gpt-4o", "s", "u", None, None, None);
    let err = transport.send(&payload).await.unwrap_err();

    assert!(err.is_api_call_error());
    match err {
        Error::Remote { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Rate limit reached");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn schema_response_is_parsed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "response_format": {"type": "json_schema", "json_schema": {"name": "caption"}}
        })))
        .with_status(200)
        .with_body(completion_body(json!({
            "role": "assistant",
            "content": "{\"title\": \"Harbor at dusk\"}"
        })))
        .create_async()
        .await;

    let format = ResponseFormat::from_schema(
        "caption",
        json!({
            "type": "object",
            "properties": {"title": {"type": "string"}},
            "required": ["title"]
        }),
    );
    let client = client_for(&server);
    let outcome = client
        .chat("caption photos", "caption this")
        .response_format(format)
        .send()
        .await;

    assert_eq!(outcome, ChatOutcome::Parsed(json!({"title": "Harbor at dusk"})));
}

#[tokio::test]
async fn schema_violation_falls_back_to_plain() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion_body(json!({
            "role": "assistant",
            "content": "{\"title\": 42}"
        })))
        .create_async()
        .await;

    let format = ResponseFormat::from_schema(
        "caption",
        json!({"type": "object", "properties": {"title": {"type": "string"}}}),
    );
    let client = client_for(&server);
    let outcome = client.chat("s", "u").response_format(format).send().await;

    assert_eq!(outcome.text(), Some("{\"title\": 42}"));
}

#[tokio::test]
async fn refusal_field_is_decoded() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion_body(json!({
            "role": "assistant",
            "content": null,
            "refusal": "I'm sorry, I can't assist with that."
        })))
        .create_async()
        .await;

    let client = client_for(&server);
    let outcome = client
        .chat("s", "u")
        .response_format(ResponseFormat::json_object())
        .send()
        .await;

    assert_eq!(outcome.refusal(), Some("I'm sorry, I can't assist with that."));
    assert_eq!(client.totals().completion_total, 0.0);
}

#[tokio::test]
async fn malformed_body_is_serialization_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url(), None, Duration::from_secs(5)).unwrap();
    let payload = build_request("gpt-4o", "s", "u", None, None, Some(10));
    let err = transport.send(&payload).await.unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}
