use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a playable audio asset in the host catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TrackId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// What a menu option points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackRef {
    /// A specific asset
    #[serde(rename = "file")]
    Concrete(TrackId),
    /// Pick uniformly among the list's concrete tracks on every query
    Random,
    /// Play no override; the host falls back to its own music
    Off,
}

impl TrackRef {
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self::Concrete(TrackId::new(name))
    }

    #[must_use]
    pub const fn is_special(&self) -> bool {
        matches!(self, Self::Random | Self::Off)
    }

    #[must_use]
    pub const fn as_concrete(&self) -> Option<&TrackId> {
        match self {
            Self::Concrete(track) => Some(track),
            Self::Random | Self::Off => None,
        }
    }
}
