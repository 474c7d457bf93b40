//! Inbound webhook request.

use {
    serde::{Deserialize, Serialize, de::DeserializeOwned},
    tracing::trace,
};

use crate::{
    context::Context,
    error::{Error, Result},
    payload::RawPayload,
};

/// Top-level payload posted to the webhook for one detected intent.
///
/// Decoded once per call and read-only afterwards. The session id is the
/// namespace for any context built in response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Request {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub session: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub response_id: String,
    pub query_result: QueryResult,
    #[serde(skip_serializing_if = "RawPayload::is_empty")]
    pub original_detect_intent_request: RawPayload,
}

/// What the platform understood from the user's query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryResult {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub query_text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub action: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language_code: String,
    #[serde(skip_serializing_if = "is_false")]
    pub all_required_params_present: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub intent_detection_confidence: f64,
    #[serde(skip_serializing_if = "RawPayload::is_empty")]
    pub parameters: RawPayload,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output_contexts: Vec<Context>,
    pub intent: Intent,
}

/// The matched intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Intent {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

impl Request {
    pub fn action(&self) -> &str {
        &self.query_result.action
    }

    /// Decode the query parameters into `T`.
    ///
    /// `{}` succeeds whenever `T` tolerates missing fields; an absent or empty
    /// parameters blob is a decode error.
    pub fn extract_parameters<T: DeserializeOwned>(&self) -> Result<T> {
        self.query_result.parameters.decode_as("query parameters")
    }

    /// First output context whose name ends with `suffix`.
    ///
    /// Names are matched by suffix because the platform prefixes them with
    /// the session path.
    pub fn find_context(&self, suffix: &str) -> Option<&Context> {
        self.query_result
            .output_contexts
            .iter()
            .find(|ctx| ctx.name_ends_with(suffix))
    }

    /// Decode the parameters of the first context matching `suffix`.
    ///
    /// Returns [`Error::ContextNotFound`] when nothing matches, and a decode
    /// error when the match's parameters don't fit `T`.
    pub fn extract_context<T: DeserializeOwned>(&self, suffix: &str) -> Result<T> {
        let Some(ctx) = self.find_context(suffix) else {
            trace!(
                suffix,
                count = self.query_result.output_contexts.len(),
                "no matching context"
            );
            return Err(Error::ContextNotFound {
                suffix: suffix.to_string(),
            });
        };
        trace!(suffix, name = %ctx.name, "matched context");
        ctx.decode_parameters()
    }

    /// Build a context scoped to this request's session. The request itself
    /// is untouched; attach the result to the outgoing fulfillment.
    pub fn build_context<T: Serialize + ?Sized>(
        &self,
        short_name: &str,
        lifespan_count: u32,
        params: &T,
    ) -> Result<Context> {
        let parameters = RawPayload::from_value(params)?;
        Ok(Context::in_session(
            &self.session,
            short_name,
            lifespan_count,
            parameters,
        ))
    }

    /// Copies of the inbound contexts, for carrying them over unchanged.
    pub fn forward_contexts(&self) -> Vec<Context> {
        self.query_result.output_contexts.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use {
        super::*,
        crate::location::Location,
        rstest::rstest,
        serde::{Serializer, ser::Error as _},
        serde_json::{Value, json},
    };

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Out {
        #[serde(rename = "in")]
        input: String,
        #[serde(rename = "out")]
        output: String,
    }

    impl Out {
        fn new(input: &str, output: &str) -> Self {
            Self {
                input: input.into(),
                output: output.into(),
            }
        }
    }

    fn with_parameters(parameters: &str) -> Request {
        Request {
            query_result: QueryResult {
                parameters: RawPayload::from_bytes(parameters),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn with_contexts(contexts: Vec<Context>) -> Request {
        Request {
            query_result: QueryResult {
                output_contexts: contexts,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn ctx(name: &str, parameters: &str) -> Context {
        Context::new(name, 1, RawPayload::from_bytes(parameters))
    }

    #[rstest]
    #[case(r#"{"in": "in", "out": "out"}"#, Out::new("in", "out"))]
    #[case(r#"{"hello": "world"}"#, Out::default())]
    #[case("{}", Out::default())]
    #[case(r#"{"in": "helloworld", "out": "helloworld"}"#, Out::new("helloworld", "helloworld"))]
    fn extract_parameters(#[case] parameters: &str, #[case] expected: Out) {
        let request = with_parameters(parameters);
        assert_eq!(request.extract_parameters::<Out>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("{\"in\": ")]
    #[case(r#"{"in": 3}"#)]
    fn extract_parameters_decode_errors(#[case] parameters: &str) {
        let err = with_parameters(parameters)
            .extract_parameters::<Out>()
            .unwrap_err();
        assert!(err.is_decode(), "{err}");
        assert!(!err.is_not_found());
    }

    #[test]
    fn extract_parameters_with_location() {
        #[derive(Deserialize)]
        struct Params {
            from: Location,
            to: Location,
        }

        let request =
            with_parameters(r#"{"from": "Paris", "to": {"admin-area": "Bretagne", "subadmin-area": "Rennes"}}"#);
        let params: Params = request.extract_parameters().unwrap();
        assert_eq!(params.from.simple(), "Paris");
        assert_eq!(params.to.region(), "Bretagne");
        assert_eq!(params.to.department(), "Rennes");
    }

    #[test]
    fn extract_context_finds_match() {
        let request = with_contexts(vec![ctx("hello-ctx", r#"{"in": "in", "out": "out"}"#)]);
        let out: Out = request.extract_context("hello-ctx").unwrap();
        assert_eq!(out, Out::new("in", "out"));
    }

    #[test]
    fn extract_context_not_found() {
        let request = with_contexts(vec![ctx("hello-ctx", r#"{"in": "in", "out": "out"}"#)]);
        let err = request.extract_context::<Out>("random-ctx").unwrap_err();
        assert!(err.is_not_found());
        assert!(!err.is_decode());
        assert_eq!(err.to_string(), "context not found: random-ctx");
    }

    #[rstest]
    #[case(vec![
        ctx("random-ctx", r#"{"in": "rand", "out": "rand"}"#),
        ctx("hello-ctx", r#"{"in": "in", "out": "out"}"#),
    ])]
    #[case(vec![
        ctx("hello-ctx", r#"{"in": "in", "out": "out"}"#),
        ctx("random-ctx", r#"{"in": "rand", "out": "rand"}"#),
    ])]
    fn extract_context_among_several(#[case] contexts: Vec<Context>) {
        let request = with_contexts(contexts);
        let out: Out = request.extract_context("hello-ctx").unwrap();
        assert_eq!(out, Out::new("in", "out"));
    }

    #[test]
    fn extract_context_matches_session_qualified_names() {
        let request = with_contexts(vec![ctx(
            "projects/p/agent/sessions/abc/contexts/order",
            r#"{"in": "pizza"}"#,
        )]);
        let out: Out = request.extract_context("order").unwrap();
        assert_eq!(out.input, "pizza");
    }

    #[test]
    fn extract_context_first_match_wins() {
        let request = with_contexts(vec![
            ctx("s/contexts/order", r#"{"in": "first"}"#),
            ctx("s/contexts/order", r#"{"in": "second"}"#),
        ]);
        let out: Out = request.extract_context("order").unwrap();
        assert_eq!(out.input, "first");
    }

    #[test]
    fn extract_context_decode_error_is_not_not_found() {
        let request = with_contexts(vec![ctx("hello-ctx", "[1, 2")]);
        let err = request.extract_context::<Out>("hello-ctx").unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn build_context() {
        let request = Request {
            session: "session".into(),
            ..Default::default()
        };
        let ctx = request
            .build_context("hello-ctx", 3, &Out::new("hello", "world"))
            .unwrap();
        assert_eq!(ctx.name, "session/contexts/hello-ctx");
        assert_eq!(ctx.lifespan_count, 3);
        let parameters: Value = serde_json::from_slice(ctx.parameters.as_bytes()).unwrap();
        assert_eq!(parameters, json!({"in": "hello", "out": "world"}));
        assert!(request.query_result.output_contexts.is_empty());
    }

    #[test]
    fn build_context_with_unserializable_params() {
        struct Channel;

        impl Serialize for Channel {
            fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
                Err(S::Error::custom("channels cannot be encoded"))
            }
        }

        let request = Request {
            session: "session".into(),
            ..Default::default()
        };
        let err = request.build_context("hello-ctx", 3, &Channel).unwrap_err();
        assert!(err.is_encode());
    }

    #[test]
    fn forward_contexts_copies_inbound() {
        let request = with_contexts(vec![ctx("a", "{}"), ctx("b", "{}")]);
        let forwarded = request.forward_contexts();
        assert_eq!(forwarded, request.query_result.output_contexts);
    }
}
