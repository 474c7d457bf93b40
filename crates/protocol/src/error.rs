use dialogflow_common::FromMessage;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or structurally incompatible JSON.
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// No context name ends with the requested suffix.
    #[error("context not found: {suffix}")]
    ContextNotFound { suffix: String },
    /// A value is not representable as JSON.
    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },
    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    pub(crate) fn decode(what: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { what, source }
    }

    pub(crate) fn encode(what: &'static str, source: serde_json::Error) -> Self {
        Self::Encode { what, source }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ContextNotFound { .. })
    }

    pub fn is_encode(&self) -> bool {
        matches!(self, Self::Encode { .. })
    }
}

impl FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message { message }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

dialogflow_common::impl_context!(Error);
