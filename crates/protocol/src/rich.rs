//! Rich message variants.
//!
//! Each variant is nested in a fulfillment message under a fixed
//! discriminator key. The keys are part of the platform's wire contract.

use serde::{
    Deserialize, Serialize, Serializer,
    de::{self, MapAccess},
};

// ── Discriminator keys ───────────────────────────────────────────────────────

pub mod keys {
    pub const TEXT: &str = "text";
    pub const IMAGE: &str = "image";
    pub const BASIC_CARD: &str = "basicCard";
    pub const CARD: &str = "card";
    pub const SIMPLE_RESPONSES: &str = "simpleResponses";
    pub const QUICK_REPLIES: &str = "quickReplies";
    pub const PAYLOAD: &str = "payload";
    pub const SUGGESTIONS: &str = "suggestions";
    pub const LINK_OUT_SUGGESTION: &str = "linkOutSuggestion";
    pub const LIST_SELECT: &str = "listSelect";
    pub const CAROUSEL_SELECT: &str = "carouselSelect";

    pub const ALL: &[&str] = &[
        TEXT,
        IMAGE,
        BASIC_CARD,
        CARD,
        SIMPLE_RESPONSES,
        QUICK_REPLIES,
        PAYLOAD,
        SUGGESTIONS,
        LINK_OUT_SUGGESTION,
        LIST_SELECT,
        CAROUSEL_SELECT,
    ];
}

// ── RichMessage ──────────────────────────────────────────────────────────────

/// One rich message. `P` is the type carried by the raw `payload` variant.
///
/// Serializing a `RichMessage` yields only the variant's own body; the
/// enclosing [`Message`](crate::message::Message) nests it under
/// [`RichMessage::key`]. The payload variant serializes its value directly,
/// without an extra level.
#[derive(Debug, Clone, PartialEq)]
pub enum RichMessage<P = serde_json::Value> {
    Text(Text),
    Image(Image),
    BasicCard(BasicCard),
    Card(Card),
    SimpleResponses(SimpleResponses),
    QuickReplies(QuickReplies),
    Payload(P),
    Suggestions(Suggestions),
    LinkOutSuggestion(LinkOutSuggestion),
    ListSelect(ListSelect),
    CarouselSelect(CarouselSelect),
}

impl<P> RichMessage<P> {
    pub fn payload(payload: P) -> Self {
        Self::Payload(payload)
    }

    /// Discriminator key this variant is nested under.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Text(_) => keys::TEXT,
            Self::Image(_) => keys::IMAGE,
            Self::BasicCard(_) => keys::BASIC_CARD,
            Self::Card(_) => keys::CARD,
            Self::SimpleResponses(_) => keys::SIMPLE_RESPONSES,
            Self::QuickReplies(_) => keys::QUICK_REPLIES,
            Self::Payload(_) => keys::PAYLOAD,
            Self::Suggestions(_) => keys::SUGGESTIONS,
            Self::LinkOutSuggestion(_) => keys::LINK_OUT_SUGGESTION,
            Self::ListSelect(_) => keys::LIST_SELECT,
            Self::CarouselSelect(_) => keys::CAROUSEL_SELECT,
        }
    }

    /// Decode the value of the current map entry as the variant named by `key`.
    pub(crate) fn next_keyed_value<'de, A>(key: &str, map: &mut A) -> Result<Self, A::Error>
    where
        A: MapAccess<'de>,
        P: Deserialize<'de>,
    {
        Ok(match key {
            keys::TEXT => Self::Text(map.next_value()?),
            keys::IMAGE => Self::Image(map.next_value()?),
            keys::BASIC_CARD => Self::BasicCard(map.next_value()?),
            keys::CARD => Self::Card(map.next_value()?),
            keys::SIMPLE_RESPONSES => Self::SimpleResponses(map.next_value()?),
            keys::QUICK_REPLIES => Self::QuickReplies(map.next_value()?),
            keys::PAYLOAD => Self::Payload(map.next_value()?),
            keys::SUGGESTIONS => Self::Suggestions(map.next_value()?),
            keys::LINK_OUT_SUGGESTION => Self::LinkOutSuggestion(map.next_value()?),
            keys::LIST_SELECT => Self::ListSelect(map.next_value()?),
            keys::CAROUSEL_SELECT => Self::CarouselSelect(map.next_value()?),
            other => return Err(de::Error::unknown_field(other, keys::ALL)),
        })
    }
}

impl<P: Serialize> Serialize for RichMessage<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(inner) => inner.serialize(serializer),
            Self::Image(inner) => inner.serialize(serializer),
            Self::BasicCard(inner) => inner.serialize(serializer),
            Self::Card(inner) => inner.serialize(serializer),
            Self::SimpleResponses(inner) => inner.serialize(serializer),
            Self::QuickReplies(inner) => inner.serialize(serializer),
            Self::Payload(inner) => inner.serialize(serializer),
            Self::Suggestions(inner) => inner.serialize(serializer),
            Self::LinkOutSuggestion(inner) => inner.serialize(serializer),
            Self::ListSelect(inner) => inner.serialize(serializer),
            Self::CarouselSelect(inner) => inner.serialize(serializer),
        }
    }
}

macro_rules! impl_from_record {
    ($($record:ident),* $(,)?) => {
        $(
            impl<P> From<$record> for RichMessage<P> {
                fn from(record: $record) -> Self {
                    Self::$record(record)
                }
            }
        )*
    };
}

impl_from_record!(
    Text,
    Image,
    BasicCard,
    Card,
    SimpleResponses,
    QuickReplies,
    Suggestions,
    LinkOutSuggestion,
    ListSelect,
    CarouselSelect,
);

// ── Records ──────────────────────────────────────────────────────────────────

/// Plain text responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
}

impl Text {
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            text: lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

impl Image {
    pub fn new(image_uri: impl Into<String>) -> Self {
        Self {
            image_uri: Some(image_uri.into()),
        }
    }
}

/// Card whose buttons open a URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Required unless `image` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<CardButton>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardButton {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_uri_action: Option<OpenUriAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenUriAction {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uri: String,
}

/// Card whose buttons post text back to the agent. The image is inlined as
/// `imageUri` rather than nested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Text sent back to the agent, or a URI to open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postback: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponses {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub simple_responses: Vec<SimpleResponse>,
}

impl SimpleResponses {
    /// One response shown as `display` and spoken as `speech`.
    pub fn single(display: impl Into<String>, speech: impl Into<String>) -> Self {
        Self {
            simple_responses: vec![SimpleResponse {
                text_to_speech: Some(speech.into()),
                display_text: Some(display.into()),
                ssml: None,
            }],
        }
    }
}

/// Spoken and displayed response. One of `text_to_speech` or `ssml` must be
/// set, not both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_to_speech: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssml: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReplies {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        rename = "quickReplies",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub replies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

impl Suggestions {
    pub fn from_titles(titles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            suggestions: titles
                .into_iter()
                .map(|title| Suggestion {
                    title: title.into(),
                })
                .collect(),
        }
    }
}

/// Suggestion chip; `title` is the text shown on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
}

/// Chip that sends the user out of the conversation to an app or site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkOutSuggestion {
    #[serde(
        default,
        rename = "suggestionName",
        alias = "destinationName",
        skip_serializing_if = "String::is_empty"
    )]
    pub destination_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSelect {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselSelect {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
}

/// Entry of a list or carousel. `info` is always sent, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub info: SelectItemInfo,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

/// `key` is sent back to the agent when the item is picked; `synonyms` also
/// trigger it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectItemInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
}
