//! Player's stored music choices.
use serde::{Deserialize, Serialize};

use crate::PreferenceStore;
use crate::category::Category;

/// Stored menu index per category. `None` means the player never touched the
/// entry, which selects the first option.
///
/// Hosts can embed this record in their own save data; values are kept as
/// written so that a later, longer option table can still honour them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicPreferences {
    #[serde(default)]
    pub wild_battle: Option<i32>,
    #[serde(default)]
    pub trainer_battle: Option<i32>,
    #[serde(default)]
    pub bicycle: Option<i32>,
    #[serde(default)]
    pub surf: Option<i32>,
}

impl MusicPreferences {
    #[must_use]
    pub const fn get(&self, category: Category) -> Option<i32> {
        match category {
            Category::WildBattle => self.wild_battle,
            Category::TrainerBattle => self.trainer_battle,
            Category::Bicycle => self.bicycle,
            Category::Surf => self.surf,
        }
    }

    pub fn set(&mut self, category: Category, index: i32) {
        let slot = match category {
            Category::WildBattle => &mut self.wild_battle,
            Category::TrainerBattle => &mut self.trainer_battle,
            Category::Bicycle => &mut self.bicycle,
            Category::Surf => &mut self.surf,
        };
        *slot = Some(index);
    }
}

impl PreferenceStore for MusicPreferences {
    fn music_preference(&self, category: Category) -> Option<i32> {
        self.get(category)
    }

    fn set_music_preference(&mut self, category: Category, index: i32) {
        self.set(category, index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_are_per_category() {
        let mut prefs = MusicPreferences::default();
        prefs.set(Category::Surf, 2);
        assert_eq!(prefs.get(Category::Surf), Some(2));
        assert_eq!(prefs.get(Category::Bicycle), None);
        prefs.set_music_preference(Category::WildBattle, 3);
        assert_eq!(prefs.music_preference(Category::WildBattle), Some(3));
    }

    #[test]
    fn missing_fields_deserialize_as_unset() {
        let prefs: MusicPreferences = serde_json::from_str(r#"{"bicycle":1}"#).unwrap();
        assert_eq!(prefs.bicycle, Some(1));
        assert_eq!(prefs.surf, None);
        assert_eq!(prefs.wild_battle, None);
    }
}
