//! Typed serialization layer for conversational-agent fulfillment webhooks.
//!
//! Inbound: [`decode`] turns the request body into a [`Request`], whose
//! accessors pull typed parameters and contexts out of the deferred JSON
//! blobs. Outbound: a [`Fulfillment`] built from [`Message`]s is turned into
//! the response body by [`encode`].

pub mod codec;
pub mod context;
pub mod dual;
pub mod error;
pub mod fulfillment;
pub mod location;
pub mod message;
pub mod payload;
pub mod platform;
pub mod request;
pub mod rich;

pub use {
    codec::{Codec, CodecConfig, decode, encode},
    context::{Context, Contexts},
    dual::ObjectOrScalar,
    error::{Error, Result},
    fulfillment::Fulfillment,
    location::{Location, LocationFields},
    message::Message,
    payload::RawPayload,
    platform::Platform,
    request::{Intent, QueryResult, Request},
    rich::{
        BasicCard, Button, Card, CardButton, CarouselSelect, Image, Item, LinkOutSuggestion,
        ListSelect, OpenUriAction, QuickReplies, RichMessage, SelectItemInfo, SimpleResponse,
        SimpleResponses, Suggestion, Suggestions, Text,
    },
};
