use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{error::Result, payload::RawPayload};

/// Separator between the session path and a context's short name.
pub const CONTEXTS_SEGMENT: &str = "/contexts/";

/// Named, lifespan-bounded parameter bag carried between conversation turns.
///
/// Inbound names are fully qualified (`<session>/contexts/<short-name>`).
/// A lifespan of `0` asks the platform to drop the context, so it is always
/// written out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub lifespan_count: u32,
    #[serde(default, skip_serializing_if = "RawPayload::is_empty")]
    pub parameters: RawPayload,
}

/// Ordered sequence of contexts as found on the wire.
pub type Contexts = Vec<Context>;

impl Context {
    pub fn new(name: impl Into<String>, lifespan_count: u32, parameters: RawPayload) -> Self {
        Self {
            name: name.into(),
            lifespan_count,
            parameters,
        }
    }

    /// Build a context named `<session>/contexts/<short_name>`.
    pub fn in_session(
        session: &str,
        short_name: &str,
        lifespan_count: u32,
        parameters: RawPayload,
    ) -> Self {
        Self::new(
            format!("{session}{CONTEXTS_SEGMENT}{short_name}"),
            lifespan_count,
            parameters,
        )
    }

    /// Name without the session prefix.
    pub fn short_name(&self) -> &str {
        self.name
            .rsplit_once(CONTEXTS_SEGMENT)
            .map_or(self.name.as_str(), |(_, short)| short)
    }

    pub fn name_ends_with(&self, suffix: &str) -> bool {
        self.name.ends_with(suffix)
    }

    pub fn decode_parameters<T: DeserializeOwned>(&self) -> Result<T> {
        self.parameters.decode_as("context parameters")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn session_scoped_name() {
        let ctx = Context::in_session("projects/p/agent/sessions/42", "order", 5, RawPayload::default());
        assert_eq!(ctx.name, "projects/p/agent/sessions/42/contexts/order");
        assert_eq!(ctx.short_name(), "order");
        assert!(ctx.name_ends_with("order"));
    }

    #[test]
    fn short_name_of_unqualified_context() {
        let ctx = Context::new("hello-ctx", 1, RawPayload::default());
        assert_eq!(ctx.short_name(), "hello-ctx");
    }

    #[test]
    fn wire_shape() {
        let ctx = Context::new("s/contexts/a", 0, RawPayload::from_bytes(r#"{"k":"v"}"#));
        assert_eq!(
            serde_json::to_value(&ctx).unwrap(),
            json!({"name": "s/contexts/a", "lifespanCount": 0, "parameters": {"k": "v"}})
        );

        let decoded: Context = serde_json::from_str(r#"{"name": "s/contexts/b"}"#).unwrap();
        assert_eq!(decoded.lifespan_count, 0);
        assert!(decoded.parameters.is_empty());
        assert_eq!(
            serde_json::to_value(&decoded).unwrap(),
            json!({"name": "s/contexts/b", "lifespanCount": 0})
        );
    }
}
