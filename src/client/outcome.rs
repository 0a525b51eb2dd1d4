use crate::types::ChatResponse;
use serde::de::DeserializeOwned;

/// What a chat call hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    /// First choice carried a structured payload that passed validation.
    Parsed(serde_json::Value),
    /// The model declined; holds the refusal text.
    Refused(String),
    /// Anything else, including a failed call (`None`) or a response without choices.
    Plain(Option<ChatResponse>),
}

impl ChatOutcome {
    pub fn is_refusal(&self) -> bool {
        matches!(self, ChatOutcome::Refused(_))
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ChatOutcome::Parsed(_))
    }

    /// `true` when the API call itself failed and no response exists.
    pub fn is_empty(&self) -> bool {
        matches!(self, ChatOutcome::Plain(None))
    }

    /// Text of the first choice for plain outcomes.
    pub fn text(&self) -> Option<&str> {
        match self {
            ChatOutcome::Plain(Some(resp)) => resp.first_text(),
            _ => None,
        }
    }

    pub fn parsed(&self) -> Option<&serde_json::Value> {
        match self {
            ChatOutcome::Parsed(v) => Some(v),
            _ => None,
        }
    }

    /// Deserialize a parsed payload into `T`.
    pub fn parsed_as<T: DeserializeOwned>(&self) -> Option<serde_json::Result<T>> {
        self.parsed().map(|v| T::deserialize(v))
    }

    pub fn refusal(&self) -> Option<&str> {
        match self {
            ChatOutcome::Refused(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn into_response(self) -> Option<ChatResponse> {
        match self {
            ChatOutcome::Plain(resp) => resp,
            _ => None,
        }
    }
}

/// Classify a raw response by its first choice.
pub fn unwrap_response(response: Option<ChatResponse>) -> ChatOutcome {
    let first = response
        .as_ref()
        .and_then(|r| r.first_choice())
        .map(|c| &c.message);

    if let Some(message) = first {
        if let Some(parsed) = message.parsed.as_ref().filter(|v| !v.is_null()) {
            return ChatOutcome::Parsed(parsed.clone());
        }
        if let Some(refusal) = message.refusal.as_ref().filter(|r| !r.is_empty()) {
            tracing::warn!("Model refused to process the request: {}", refusal);
            return ChatOutcome::Refused(refusal.clone());
        }
    }

    ChatOutcome::Plain(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Choice, ResponseMessage};
    use serde_json::json;

    fn single(message: ResponseMessage) -> ChatResponse {
        ChatResponse {
            choices: vec![Choice::new(message)],
            ..Default::default()
        }
    }

    #[test]
    fn absent_and_empty_responses_are_plain() {
        assert_eq!(unwrap_response(None), ChatOutcome::Plain(None));
        assert!(unwrap_response(None).is_empty());

        let empty = ChatResponse::default();
        assert_eq!(
            unwrap_response(Some(empty.clone())),
            ChatOutcome::Plain(Some(empty))
        );
    }

    #[test]
    fn parsed_wins_over_refusal() {
        let mut message = ResponseMessage::text("{}").with_parsed(json!({"a": 1}));
        message.refusal = Some("no".into());
        let outcome = unwrap_response(Some(single(message)));
        assert_eq!(outcome, ChatOutcome::Parsed(json!({"a": 1})));
    }

    #[test]
    fn refusal_is_surfaced() {
        let outcome = unwrap_response(Some(single(ResponseMessage::refusal("I can't help"))));
        assert!(outcome.is_refusal());
        assert_eq!(outcome.refusal(), Some("I can't help"));
        assert_eq!(outcome.text(), None);
    }

    #[test]
    fn empty_refusal_and_null_parsed_fall_through() {
        let mut message = ResponseMessage::text("hello").with_parsed(serde_json::Value::Null);
        message.refusal = Some(String::new());
        let resp = single(message);
        let outcome = unwrap_response(Some(resp.clone()));
        assert_eq!(outcome.text(), Some("hello"));
        assert_eq!(outcome.into_response(), Some(resp));
    }

    #[test]
    fn only_first_choice_counts() {
        let resp = ChatResponse {
            choices: vec![
                Choice::new(ResponseMessage::text("first")),
                Choice::new(ResponseMessage::refusal("second refuses")),
            ],
            ..Default::default()
        };
        assert_eq!(unwrap_response(Some(resp)).text(), Some("first"));
    }

    #[test]
    fn parsed_as_typed_value() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Point {
            x: i32,
            y: i32,
        }
        let outcome = ChatOutcome::Parsed(json!({"x": 1, "y": 2}));
        assert_eq!(outcome.parsed_as::<Point>().unwrap().unwrap(), Point { x: 1, y: 2 });
        assert!(ChatOutcome::Plain(None).parsed_as::<Point>().is_none());
    }
}
