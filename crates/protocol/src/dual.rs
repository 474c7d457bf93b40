//! Object-or-scalar decoding.
//!
//! The upstream platform sometimes short-circuits a structured value to a
//! bare scalar (a location becomes `"Paris"` instead of an object). Fields
//! like that decode through [`ObjectOrScalar`], which tries the object shape
//! first and falls back to the scalar. Only a JSON object is ever offered to
//! the object shape; serde's derived structs would otherwise also accept an
//! array and fill fields by position.

use {
    serde::{Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned},
    serde_json::value::RawValue,
};

use crate::error::{Error, Result};

/// Either the full object `T` or the scalar `S` it was collapsed to.
///
/// Exactly one shape is populated; a failed object attempt never leaks into
/// the scalar result.
///
/// Deserializing buffers the value as a [`RawValue`], so it only works under
/// `serde_json`'s own deserializer. Inside a `#[serde(flatten)]` struct or an
/// untagged enum serde replays content through its own buffer, and decoding
/// fails with an opaque type error. Take such fields as
/// [`serde_json::Value`] and run them through [`ObjectOrScalar::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectOrScalar<T, S = String> {
    Object(T),
    Scalar(S),
}

impl<T, S> ObjectOrScalar<T, S> {
    pub fn as_object(&self) -> Option<&T> {
        match self {
            Self::Object(object) => Some(object),
            Self::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&S> {
        match self {
            Self::Object(_) => None,
            Self::Scalar(scalar) => Some(scalar),
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }
}

impl<T, S> ObjectOrScalar<T, S>
where
    T: DeserializeOwned,
    S: DeserializeOwned,
{
    /// Decode from raw JSON bytes. When both shapes fail, the scalar error is
    /// the one reported.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::attempt(
            opens_object(bytes),
            || serde_json::from_slice(bytes),
            || serde_json::from_slice(bytes),
        )
        .map_err(|source| Error::decode("object-or-scalar value", source))
    }

    /// Run the decode attempts in order; the first success wins. The object
    /// attempt is skipped unless the input is a JSON object.
    fn attempt(
        is_object: bool,
        object: impl FnOnce() -> serde_json::Result<T>,
        scalar: impl FnOnce() -> serde_json::Result<S>,
    ) -> serde_json::Result<Self> {
        if is_object && let Ok(value) = object() {
            return Ok(Self::Object(value));
        }
        scalar().map(Self::Scalar)
    }
}

fn opens_object(json: &[u8]) -> bool {
    json.trim_ascii_start().first() == Some(&b'{')
}

impl<T, S> Default for ObjectOrScalar<T, S>
where
    T: Default,
{
    fn default() -> Self {
        Self::Object(T::default())
    }
}

impl<T, S> Serialize for ObjectOrScalar<T, S>
where
    T: Serialize,
    S: Serialize,
{
    fn serialize<Ser: Serializer>(
        &self,
        serializer: Ser,
    ) -> std::result::Result<Ser::Ok, Ser::Error> {
        match self {
            Self::Object(object) => object.serialize(serializer),
            Self::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

impl<'de, T, S> Deserialize<'de> for ObjectOrScalar<T, S>
where
    T: DeserializeOwned,
    S: DeserializeOwned,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let json = raw.get();
        Self::attempt(
            opens_object(json.as_bytes()),
            || serde_json::from_str(json),
            || serde_json::from_str(json),
        )
        .map_err(serde::de::Error::custom)
    }
}
