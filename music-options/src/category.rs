//! Music categories exposed in the options menu.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four configurable music contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Battles against wild creatures without their own music
    WildBattle,
    /// Standard trainer battles without their own music
    TrainerBattle,
    /// Background music while riding the bicycle
    Bicycle,
    /// Background music while surfing
    Surf,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Self; 4] = [
        Self::WildBattle,
        Self::TrainerBattle,
        Self::Bicycle,
        Self::Surf,
    ];

    /// Stable snake_case key used in data files and reports.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::WildBattle => "wild_battle",
            Self::TrainerBattle => "trainer_battle",
            Self::Bicycle => "bicycle",
            Self::Surf => "surf",
        }
    }

    /// Key under which the host menu registers this category.
    #[must_use]
    pub const fn menu_key(self) -> &'static str {
        match self {
            Self::WildBattle => "wild_battle_bgm",
            Self::TrainerBattle => "trainer_battle_bgm",
            Self::Bicycle => "bicycle_bgm",
            Self::Surf => "surf_bgm",
        }
    }

    /// Continuous categories drive ongoing background music rather than
    /// a one-off track at battle start.
    #[must_use]
    pub const fn is_continuous(self) -> bool {
        matches!(self, Self::Bicycle | Self::Surf)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a category key is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown music category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.key() == normalized)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
