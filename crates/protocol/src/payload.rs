//! Deferred JSON blobs.
//!
//! Parameters arrive in a shape only the handler knows, so they are kept as
//! raw bytes until the caller asks for a concrete type.

use std::fmt;

use {
    serde::{Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned},
    serde_json::value::RawValue,
};

use crate::error::{Error, Result};

/// Undecoded JSON value, stored as the exact bytes seen on the wire.
///
/// An empty payload stands for "absent": it is skipped when encoding and
/// fails to decode like any other empty input.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawPayload(Vec<u8>);

impl RawPayload {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Serialize `value` into a new payload.
    pub fn from_value<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_vec(value)
            .map(Self)
            .map_err(|source| Error::encode("payload", source))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode the payload into `T`.
    ///
    /// Fields missing from the payload are only tolerated if `T` allows it
    /// (e.g. `#[serde(default)]`); unknown fields are ignored unless `T`
    /// denies them.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        self.decode_as("payload")
    }

    pub(crate) fn decode_as<T: DeserializeOwned>(&self, what: &'static str) -> Result<T> {
        serde_json::from_slice(&self.0).map_err(|source| Error::decode(what, source))
    }
}

impl fmt::Debug for RawPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPayload")
            .field(&String::from_utf8_lossy(&self.0))
            .finish()
    }
}

impl Serialize for RawPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let raw: &RawValue = serde_json::from_slice(&self.0).map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Self(raw.get().as_bytes().to_vec()))
    }
}
