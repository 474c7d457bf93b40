//! Top-level decode/encode entry points.
//!
//! The transport hands raw request bytes to [`decode`] and writes whatever
//! [`encode`] returns; nothing here touches sockets or headers.

use {
    serde::{Deserialize, Serialize},
    tracing::debug,
};

use crate::{
    error::{Error, Result},
    fulfillment::Fulfillment,
    request::Request,
};

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 524_288; // 512 KB

// ── Config ───────────────────────────────────────────────────────────────────

/// Codec settings supplied by the embedding application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Inbound bodies above this size are rejected before parsing. `0`
    /// disables the check.
    pub max_payload_bytes: usize,
    /// Emit indented JSON.
    pub pretty: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            pretty: false,
        }
    }
}

// ── Codec ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn decode_request(&self, body: &[u8]) -> Result<Request> {
        let max = self.config.max_payload_bytes;
        if max > 0 && body.len() > max {
            return Err(Error::PayloadTooLarge {
                size: body.len(),
                max,
            });
        }
        let request: Request =
            serde_json::from_slice(body).map_err(|source| Error::decode("webhook request", source))?;
        debug!(
            session = %request.session,
            action = %request.query_result.action,
            bytes = body.len(),
            "decoded webhook request"
        );
        Ok(request)
    }

    pub fn encode_fulfillment<P: Serialize>(&self, fulfillment: &Fulfillment<P>) -> Result<Vec<u8>> {
        let encoded = if self.config.pretty {
            serde_json::to_vec_pretty(fulfillment)
        } else {
            serde_json::to_vec(fulfillment)
        };
        let body = encoded.map_err(|source| Error::encode("fulfillment", source))?;
        debug!(
            messages = fulfillment.fulfillment_messages.len(),
            contexts = fulfillment.output_contexts.len(),
            bytes = body.len(),
            "encoded fulfillment"
        );
        Ok(body)
    }
}

/// Decode a webhook request with the default [`CodecConfig`].
pub fn decode(body: &[u8]) -> Result<Request> {
    Codec::default().decode_request(body)
}

/// Encode a fulfillment with the default [`CodecConfig`].
pub fn encode<P: Serialize>(fulfillment: &Fulfillment<P>) -> Result<Vec<u8>> {
    Codec::default().encode_fulfillment(fulfillment)
}
