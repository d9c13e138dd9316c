//! Shared data types for the site configuration.
//! Implemented as newtypes to enforce invariants.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Rejected raw value, reported when a newtype refuses to deserialize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidValue {
    kind: &'static str,
    value: String,
}

impl fmt::Display for InvalidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} is not a valid {}", self.value, self.kind)
    }
}

impl std::error::Error for InvalidValue {}

/// An absolute URL: one that carries its own scheme.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AbsoluteUrl(Url);

impl AbsoluteUrl {
    /// `Url::parse` has no base to resolve against, so anything relative
    /// fails here.
    pub fn parse(s: &str) -> Option<Self> {
        Url::parse(s.trim()).ok().map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl TryFrom<String> for AbsoluteUrl {
    type Error = InvalidValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(InvalidValue {
            kind: "absolute URL",
            value,
        })
    }
}

impl From<AbsoluteUrl> for String {
    fn from(url: AbsoluteUrl) -> Self {
        url.0.into()
    }
}

impl fmt::Display for AbsoluteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structurally well-formed BCP-47 language tag, e.g. `en-EN`.
///
/// Only the shape is checked (subtag lengths and character classes), not
/// membership in the IANA registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn parse(raw: &str) -> Option<Self> {
        let mut subtags = raw.split('-');
        let primary = subtags.next()?;

        let primary_ok = match primary.len() {
            // Private use only: `x-whatever`.
            1 => primary.eq_ignore_ascii_case("x"),
            2..=3 | 5..=8 => primary.chars().all(|c| c.is_ascii_alphabetic()),
            _ => false,
        };
        if !primary_ok {
            return None;
        }

        // A singleton must be followed by at least one more subtag. After
        // `x` everything is private use, where one-character subtags are fine.
        let mut private_use = primary.len() == 1;
        let mut dangling_singleton = primary.len() == 1;
        for sub in subtags {
            if sub.is_empty() || sub.len() > 8 || !sub.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return None;
            }
            if private_use {
                dangling_singleton = false;
                continue;
            }
            dangling_singleton = sub.len() == 1;
            private_use = sub.eq_ignore_ascii_case("x");
        }
        if dangling_singleton {
            return None;
        }

        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (`en` for `en-EN`).
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = InvalidValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(InvalidValue {
            kind: "BCP-47 language tag",
            value,
        })
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Social platforms the site knows an icon for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SocialPlatform {
    Github,
    Facebook,
    Instagram,
    LinkedIn,
    Mail,
    Twitter,
    Twitch,
    YouTube,
    WhatsApp,
    Snapchat,
    Pinterest,
    TikTok,
    CodePen,
    Discord,
    GitLab,
    Reddit,
    Skype,
    Steam,
    Telegram,
    Mastodon,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 20] = [
        Self::Github,
        Self::Facebook,
        Self::Instagram,
        Self::LinkedIn,
        Self::Mail,
        Self::Twitter,
        Self::Twitch,
        Self::YouTube,
        Self::WhatsApp,
        Self::Snapchat,
        Self::Pinterest,
        Self::TikTok,
        Self::CodePen,
        Self::Discord,
        Self::GitLab,
        Self::Reddit,
        Self::Skype,
        Self::Steam,
        Self::Telegram,
        Self::Mastodon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Github => "Github",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::LinkedIn => "LinkedIn",
            Self::Mail => "Mail",
            Self::Twitter => "Twitter",
            Self::Twitch => "Twitch",
            Self::YouTube => "YouTube",
            Self::WhatsApp => "WhatsApp",
            Self::Snapchat => "Snapchat",
            Self::Pinterest => "Pinterest",
            Self::TikTok => "TikTok",
            Self::CodePen => "CodePen",
            Self::Discord => "Discord",
            Self::GitLab => "GitLab",
            Self::Reddit => "Reddit",
            Self::Skype => "Skype",
            Self::Steam => "Steam",
            Self::Telegram => "Telegram",
            Self::Mastodon => "Mastodon",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serde adapter for a `Duration` stored as whole milliseconds.
pub mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, ser::Error};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        let ms = u64::try_from(d.as_millis())
            .map_err(|_| S::Error::custom("duration does not fit in u64 milliseconds"))?;
        s.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
