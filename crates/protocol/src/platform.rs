use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Context as _, Error};

/// Messaging surface a fulfillment message is targeted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    #[serde(rename = "PLATFORM_UNSPECIFIED")]
    Unspecified,
    Facebook,
    Slack,
    Telegram,
    Kik,
    Skype,
    Line,
    Viber,
    ActionsOnGoogle,
}

impl Platform {
    pub const ALL: &'static [Platform] = &[
        Self::Unspecified,
        Self::Facebook,
        Self::Slack,
        Self::Telegram,
        Self::Kik,
        Self::Skype,
        Self::Line,
        Self::Viber,
        Self::ActionsOnGoogle,
    ];

    /// Literal value used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "PLATFORM_UNSPECIFIED",
            Self::Facebook => "FACEBOOK",
            Self::Slack => "SLACK",
            Self::Telegram => "TELEGRAM",
            Self::Kik => "KIK",
            Self::Skype => "SKYPE",
            Self::Line => "LINE",
            Self::Viber => "VIBER",
            Self::ActionsOnGoogle => "ACTIONS_ON_GOOGLE",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|platform| platform.as_str() == s)
            .with_context(|| format!("unknown platform: {s}"))
    }
}
