//! Outbound webhook response.

use {
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

use crate::{
    context::Context,
    error::{Error, Result},
    message::Message,
};

/// Response returned to the platform after a successful webhook call.
///
/// Built fresh per response and encoded once. `P` is the type carried by
/// raw `payload` rich messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment<P = Value> {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fulfillment_text: String,
    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub fulfillment_messages: Vec<Message<P>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Contexts to set or overwrite.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_contexts: Vec<Context>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followup_event_input: Option<Value>,
}

impl<P> Default for Fulfillment<P> {
    fn default() -> Self {
        Self {
            fulfillment_text: String::new(),
            fulfillment_messages: Vec::new(),
            source: String::new(),
            payload: None,
            output_contexts: Vec::new(),
            followup_event_input: None,
        }
    }
}

impl<P> Fulfillment<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: Message<P>) -> Self {
        self.fulfillment_messages.push(message);
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.output_contexts.push(context);
        self
    }

    #[must_use]
    pub fn with_contexts(mut self, contexts: impl IntoIterator<Item = Context>) -> Self {
        self.output_contexts.extend(contexts);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Attach an arbitrary platform payload.
    pub fn with_payload<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self> {
        self.payload = Some(
            serde_json::to_value(payload)
                .map_err(|source| Error::encode("fulfillment payload", source))?,
        );
        Ok(self)
    }

    /// Trigger a follow-up event instead of answering directly.
    pub fn with_followup_event<T: Serialize + ?Sized>(mut self, event: &T) -> Result<Self> {
        self.followup_event_input = Some(
            serde_json::to_value(event)
                .map_err(|source| Error::encode("followup event", source))?,
        );
        Ok(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use {
        super::*,
        crate::{
            payload::RawPayload,
            platform::Platform,
            rich::{RichMessage, SimpleResponses, Suggestions},
        },
        serde_json::json,
        std::collections::HashMap,
    };

    #[test]
    fn empty_fulfillment_encodes_to_empty_object() {
        let fulfillment: Fulfillment = Fulfillment::new();
        assert_eq!(serde_json::to_string(&fulfillment).unwrap(), "{}");
    }

    #[test]
    fn google_simple_response() {
        let output = "Hello World !";
        let fulfillment: Fulfillment = Fulfillment::new()
            .with_message(Message::for_google(SimpleResponses::single(output, output)));
        assert_eq!(
            serde_json::to_value(&fulfillment).unwrap(),
            json!({
                "fulfillmentMessages": [{
                    "platform": "ACTIONS_ON_GOOGLE",
                    "simpleResponses": {
                        "simpleResponses": [{"textToSpeech": output, "displayText": output}],
                    },
                }],
            })
        );
    }

    #[test]
    fn full_envelope() {
        let fulfillment: Fulfillment = Fulfillment::text("ok")
            .with_source("weather-bot")
            .with_message(Message::default())
            .with_message(Message::for_platform(
                Platform::Slack,
                Suggestions::from_titles(["again"]),
            ))
            .with_context(Context::new(
                "s/contexts/weather",
                2,
                RawPayload::from_bytes(r#"{"city":"Lyon"}"#),
            ))
            .with_payload(&json!({"google": {"expectUserResponse": true}}))
            .unwrap()
            .with_followup_event(&json!({"name": "retry", "languageCode": "en"}))
            .unwrap();

        assert_eq!(
            serde_json::to_value(&fulfillment).unwrap(),
            json!({
                "fulfillmentText": "ok",
                "fulfillmentMessages": [
                    {},
                    {"platform": "SLACK", "suggestions": {"suggestions": [{"title": "again"}]}},
                ],
                "source": "weather-bot",
                "payload": {"google": {"expectUserResponse": true}},
                "outputContexts": [
                    {"name": "s/contexts/weather", "lifespanCount": 2, "parameters": {"city": "Lyon"}},
                ],
                "followupEventInput": {"name": "retry", "languageCode": "en"},
            })
        );
    }

    #[test]
    fn unrepresentable_payload_is_an_encode_error() {
        let mut keyed_by_tuple = HashMap::new();
        keyed_by_tuple.insert((1, 2), "pair");
        let err = Fulfillment::<Value>::new()
            .with_payload(&keyed_by_tuple)
            .unwrap_err();
        assert!(err.is_encode());
    }

    #[test]
    fn decodes_what_it_encodes() {
        let fulfillment: Fulfillment = Fulfillment::text("hi")
            .with_message(Message::for_google(RichMessage::payload(json!({"x": [1, 2]}))))
            .with_message(Message::platform_only(Platform::Line));
        let bytes = serde_json::to_vec(&fulfillment).unwrap();
        let decoded: Fulfillment = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, fulfillment);
    }
}
