//! Fulfillment message envelope.
//!
//! A [`Message`] pairs an optional platform with at most one rich message and
//! encodes both into a single flat object:
//!
//! ```json
//! {"platform": "ACTIONS_ON_GOOGLE", "simpleResponses": {"simpleResponses": [...]}}
//! ```
//!
//! Either half may be missing; an empty message encodes to `{}`.

use std::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::{
    error::{Error, Result},
    platform::Platform,
    rich::RichMessage,
};

const PLATFORM_KEY: &str = "platform";

#[derive(Debug, Clone, PartialEq)]
pub struct Message<P = serde_json::Value> {
    pub platform: Option<Platform>,
    pub rich_message: Option<RichMessage<P>>,
}

impl<P> Message<P> {
    /// Message with no target platform.
    pub fn new(rich_message: impl Into<RichMessage<P>>) -> Self {
        Self {
            platform: None,
            rich_message: Some(rich_message.into()),
        }
    }

    pub fn for_platform(platform: Platform, rich_message: impl Into<RichMessage<P>>) -> Self {
        Self {
            platform: Some(platform),
            rich_message: Some(rich_message.into()),
        }
    }

    /// Shorthand for [`Platform::ActionsOnGoogle`].
    pub fn for_google(rich_message: impl Into<RichMessage<P>>) -> Self {
        Self::for_platform(Platform::ActionsOnGoogle, rich_message)
    }

    pub fn platform_only(platform: Platform) -> Self {
        Self {
            platform: Some(platform),
            rich_message: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.platform.is_none() && self.rich_message.is_none()
    }

    /// Discriminator key of the carried rich message, if any.
    pub fn key(&self) -> Option<&'static str> {
        self.rich_message.as_ref().map(RichMessage::key)
    }
}

impl<P: Serialize> Message<P> {
    /// Encode this message on its own. Fails without output if the rich
    /// message cannot be serialized.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|source| Error::encode("message", source))
    }
}

impl<P> Default for Message<P> {
    fn default() -> Self {
        Self {
            platform: None,
            rich_message: None,
        }
    }
}

impl<P: Serialize> Serialize for Message<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = usize::from(self.platform.is_some()) + usize::from(self.rich_message.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(platform) = self.platform {
            map.serialize_entry(PLATFORM_KEY, &platform)?;
        }
        if let Some(rich_message) = self.rich_message.as_ref() {
            map.serialize_entry(rich_message.key(), rich_message)?;
        }
        map.end()
    }
}

impl<'de, P: Deserialize<'de>> Deserialize<'de> for Message<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(MessageVisitor(PhantomData))
    }
}

struct MessageVisitor<P>(PhantomData<P>);

impl<'de, P: Deserialize<'de>> Visitor<'de> for MessageVisitor<P> {
    type Value = Message<P>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a fulfillment message object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut message = Message::default();
        while let Some(key) = map.next_key::<String>()? {
            if key == PLATFORM_KEY {
                if message.platform.is_some() {
                    return Err(de::Error::duplicate_field(PLATFORM_KEY));
                }
                message.platform = Some(map.next_value()?);
                continue;
            }
            if let Some(existing) = message.rich_message.as_ref() {
                return Err(de::Error::custom(format!(
                    "message carries more than one rich message (`{}` and `{key}`)",
                    existing.key()
                )));
            }
            message.rich_message = Some(RichMessage::next_keyed_value(&key, &mut map)?);
        }
        Ok(message)
    }
}
