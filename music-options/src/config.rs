//! Immutable music-option configuration, built once at startup.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::Category;
use crate::menu::OptionWidget;
use crate::options::{OptionEntry, OptionList, OptionsError};

const DEFAULT_MUSIC_OPTIONS_DATA: &str = include_str!("../data/music_options.json");

/// Errors raised when a configuration breaks its invariants.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{category} options invalid: {source}")]
    Options {
        category: Category,
        #[source]
        source: OptionsError,
    },
    #[error("{category} menu name is empty")]
    EmptyName { category: Category },
    #[error("menu order {order} used by both {first} and {second}")]
    DuplicateOrder {
        order: u32,
        first: Category,
        second: Category,
    },
    #[error("music options data could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for a single category.
///
/// Serializes to the same shape [`MusicConfig::from_json`] reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryConfig {
    /// A disabled category always plays the per-map default and is left out
    /// of the menu.
    pub enabled: bool,
    pub name: String,
    pub order: u32,
    pub description: String,
    /// Overrides the global display mode for this entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<OptionWidget>,
    pub options: OptionList,
}

/// Configuration for all four categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MusicConfig {
    /// Show every label at once instead of one at a time.
    pub show_all_labels: bool,
    pub wild_battle: CategoryConfig,
    pub trainer_battle: CategoryConfig,
    pub bicycle: CategoryConfig,
    pub surf: CategoryConfig,
}

/// Document shape as authored; option tables are checked per category
/// afterwards so failures can name the category.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMusicConfig {
    #[serde(default)]
    show_all_labels: bool,
    wild_battle: RawCategoryConfig,
    trainer_battle: RawCategoryConfig,
    bicycle: RawCategoryConfig,
    surf: RawCategoryConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCategoryConfig {
    #[serde(default = "default_enabled")]
    enabled: bool,
    name: String,
    order: u32,
    #[serde(default)]
    description: String,
    #[serde(default)]
    widget: Option<OptionWidget>,
    options: Vec<OptionEntry>,
}

impl RawCategoryConfig {
    fn build(self, category: Category) -> Result<CategoryConfig, ConfigError> {
        let options = OptionList::new(self.options)
            .map_err(|source| ConfigError::Options { category, source })?;
        Ok(CategoryConfig {
            enabled: self.enabled,
            name: self.name,
            order: self.order,
            description: self.description,
            widget: self.widget,
            options,
        })
    }
}

impl RawMusicConfig {
    fn build(self) -> Result<MusicConfig, ConfigError> {
        Ok(MusicConfig {
            show_all_labels: self.show_all_labels,
            wild_battle: self.wild_battle.build(Category::WildBattle)?,
            trainer_battle: self.trainer_battle.build(Category::TrainerBattle)?,
            bicycle: self.bicycle.build(Category::Bicycle)?,
            surf: self.surf.build(Category::Surf)?,
        })
    }
}

impl MusicConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the JSON is malformed or has unknown
    /// fields, [`ConfigError::Options`] naming the category if an option
    /// table is invalid, or a menu metadata error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawMusicConfig = serde_json::from_str(json)?;
        let config = raw.build()?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_MUSIC_OPTIONS_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_config() -> Self {
        Self::load_from_static()
    }

    /// Check menu metadata across categories.
    ///
    /// # Errors
    ///
    /// Returns an error if an enabled category has an empty name or two
    /// enabled categories share a menu order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: Vec<(u32, Category)> = Vec::new();
        for category in Category::ALL {
            let cfg = self.category(category);
            if !cfg.enabled {
                continue;
            }
            if cfg.name.trim().is_empty() {
                return Err(ConfigError::EmptyName { category });
            }
            if let Some(&(_, first)) = seen.iter().find(|(order, _)| *order == cfg.order) {
                return Err(ConfigError::DuplicateOrder {
                    order: cfg.order,
                    first,
                    second: category,
                });
            }
            seen.push((cfg.order, category));
        }
        Ok(())
    }

    #[must_use]
    pub const fn category(&self, category: Category) -> &CategoryConfig {
        match category {
            Category::WildBattle => &self.wild_battle,
            Category::TrainerBattle => &self.trainer_battle,
            Category::Bicycle => &self.bicycle,
            Category::Surf => &self.surf,
        }
    }

    pub fn category_mut(&mut self, category: Category) -> &mut CategoryConfig {
        match category {
            Category::WildBattle => &mut self.wild_battle,
            Category::TrainerBattle => &mut self.trainer_battle,
            Category::Bicycle => &mut self.bicycle,
            Category::Surf => &mut self.surf,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self, category: Category) -> bool {
        self.category(category).enabled
    }

    /// Widget used for the category's menu entry.
    #[must_use]
    pub fn widget_for(&self, category: Category) -> OptionWidget {
        self.category(category).widget.unwrap_or(if self.show_all_labels {
            OptionWidget::AllLabels
        } else {
            OptionWidget::SingleLabel
        })
    }

    /// Replace a category's option table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Options`] if the new table is invalid; the
    /// existing table is kept in that case.
    pub fn set_options(
        &mut self,
        category: Category,
        entries: Vec<OptionEntry>,
    ) -> Result<(), ConfigError> {
        let options =
            OptionList::new(entries).map_err(|source| ConfigError::Options { category, source })?;
        self.category_mut(category).options = options;
        Ok(())
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            show_all_labels: false,
            wild_battle: default_category(
                "Wild Music",
                150,
                "Music playing in wild battles.",
                None,
                [("Standard", "Battle wild"), ("Roaming", "Battle roaming")],
            ),
            trainer_battle: default_category(
                "Trainer Music",
                151,
                "Music playing in standard trainer battles.",
                None,
                [
                    ("Standard", "Battle trainer"),
                    ("Gym Leader", "Battle Gym Leader"),
                ],
            ),
            bicycle: default_category(
                "Bicycle Music",
                152,
                "Music playing while in bicycle.",
                Some(OptionWidget::SingleLabel),
                [("Standard", "Bicycle"), ("Route", "Route 1")],
            ),
            surf: default_category(
                "Surf Music",
                153,
                "Music playing while surfing.",
                Some(OptionWidget::SingleLabel),
                [("Standard", "Surfing"), ("Route", "Route 2")],
            ),
        }
    }
}

fn default_category(
    name: &str,
    order: u32,
    description: &str,
    widget: Option<OptionWidget>,
    tracks: [(&str, &str); 2],
) -> CategoryConfig {
    CategoryConfig {
        enabled: true,
        name: name.to_string(),
        order,
        description: description.to_string(),
        widget,
        options: OptionList::with_random_and_off(tracks)
            .expect("built-in option tables have playable tracks"),
    }
}

const fn default_enabled() -> bool {
    true
}
