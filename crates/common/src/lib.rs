//! Error plumbing shared by the dialogflow webhook crates.

pub mod error;

pub use error::FromMessage;
