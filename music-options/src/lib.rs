//! Music Options
//!
//! Player-selectable music for wild battles, trainer battles, cycling and
//! surfing. The host engine keeps ownership of menus, audio, map metadata and
//! save data; this crate resolves which track to play and describes the menu
//! entries, talking to the host only through the traits below.

pub mod category;
pub mod config;
pub mod menu;
pub mod options;
pub mod preferences;
pub mod refresh;
pub mod resolver;
pub mod track;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;

// Re-export commonly used types
pub use category::{Category, UnknownCategory};
pub use config::{CategoryConfig, ConfigError, MusicConfig};
pub use menu::{MenuEntry, OptionWidget};
pub use options::{OptionEntry, OptionList, OptionsError};
pub use preferences::MusicPreferences;
pub use refresh::{RefreshOutcome, refresh_on_change};
pub use resolver::resolve;
pub use track::{TrackId, TrackRef};

/// Read/write access to the player's stored music choices.
pub trait PreferenceStore {
    /// Stored menu index, or `None` if the player never chose one.
    fn music_preference(&self, category: Category) -> Option<i32>;

    fn set_music_preference(&mut self, category: Category, index: i32);
}

/// Per-map music the host would play without any override.
pub trait MapMetadata {
    fn default_track(&self, category: Category) -> Option<TrackId>;
}

/// Current movement state of the player.
pub trait GameplayState {
    fn is_cycling(&self) -> bool;

    fn is_surfing(&self) -> bool;

    /// Whether the activity behind a continuous category is running.
    fn mode_active(&self, category: Category) -> bool {
        match category {
            Category::Bicycle => self.is_cycling(),
            Category::Surf => self.is_surfing(),
            Category::WildBattle | Category::TrainerBattle => false,
        }
    }
}

/// Host background-music playback.
pub trait AudioSink {
    /// Switch the background music to `track` immediately.
    fn play_track(&mut self, track: &TrackId);

    /// Go back to the host's own map or location music.
    fn resume_ambient(&mut self);
}

/// Host options-menu registry.
pub trait OptionsMenu {
    fn add_entry(&mut self, entry: MenuEntry);
}

/// Resolves music choices against a validated configuration.
///
/// Holds its random source in a `RefCell`, so it is meant to live on the
/// host's main thread.
#[derive(Debug)]
pub struct MusicOptions<R = ChaCha20Rng> {
    config: MusicConfig,
    rng: RefCell<R>,
}

impl MusicOptions<ChaCha20Rng> {
    /// Build from a configuration, seeding Random picks from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: MusicConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, ChaCha20Rng::from_entropy())
    }

    /// Build with a fixed seed for reproducible Random picks.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_seed(config: MusicConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> MusicOptions<R> {
    /// Build with a caller-provided random source.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_rng(config: MusicConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: RefCell::new(rng),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &MusicConfig {
        &self.config
    }

    /// Track to play for `category` right now. Never cached: Random picks
    /// again on every call.
    #[must_use]
    pub fn track_for<P, M>(&self, category: Category, prefs: &P, map: &M) -> Option<TrackId>
    where
        P: PreferenceStore + ?Sized,
        M: MapMetadata + ?Sized,
    {
        let cfg = self.config.category(category);
        // Host callbacks run before the rng is borrowed so they may query us.
        let per_map_default = map.default_track(category);
        let preference = prefs.music_preference(category);
        let mut rng = self.rng.borrow_mut();
        resolve(
            cfg.enabled,
            per_map_default,
            preference,
            &cfg.options,
            &mut *rng,
        )
    }

    #[must_use]
    pub fn wild_battle_track<P, M>(&self, prefs: &P, map: &M) -> Option<TrackId>
    where
        P: PreferenceStore + ?Sized,
        M: MapMetadata + ?Sized,
    {
        self.track_for(Category::WildBattle, prefs, map)
    }

    #[must_use]
    pub fn trainer_battle_track<P, M>(&self, prefs: &P, map: &M) -> Option<TrackId>
    where
        P: PreferenceStore + ?Sized,
        M: MapMetadata + ?Sized,
    {
        self.track_for(Category::TrainerBattle, prefs, map)
    }

    #[must_use]
    pub fn bicycle_track<P, M>(&self, prefs: &P, map: &M) -> Option<TrackId>
    where
        P: PreferenceStore + ?Sized,
        M: MapMetadata + ?Sized,
    {
        self.track_for(Category::Bicycle, prefs, map)
    }

    #[must_use]
    pub fn surf_track<P, M>(&self, prefs: &P, map: &M) -> Option<TrackId>
    where
        P: PreferenceStore + ?Sized,
        M: MapMetadata + ?Sized,
    {
        self.track_for(Category::Surf, prefs, map)
    }

    /// Store a new menu index and, for bicycle and surf, switch the music
    /// at once if the player is currently cycling or surfing.
    pub fn set_preference<P, M, G, A>(
        &self,
        category: Category,
        index: i32,
        prefs: &mut P,
        map: &M,
        gameplay: &G,
        audio: &mut A,
    ) -> RefreshOutcome
    where
        P: PreferenceStore + ?Sized,
        M: MapMetadata + ?Sized,
        G: GameplayState + ?Sized,
        A: AudioSink + ?Sized,
    {
        let old = prefs.music_preference(category);
        let mode_active = self.config.is_enabled(category) && gameplay.mode_active(category);
        prefs.set_music_preference(category, index);
        let prefs = &*prefs;
        refresh_on_change(category, old, index, mode_active, audio, || {
            self.track_for(category, prefs, map)
        })
    }

    pub fn set_bicycle_preference<P, M, G, A>(
        &self,
        index: i32,
        prefs: &mut P,
        map: &M,
        gameplay: &G,
        audio: &mut A,
    ) -> RefreshOutcome
    where
        P: PreferenceStore + ?Sized,
        M: MapMetadata + ?Sized,
        G: GameplayState + ?Sized,
        A: AudioSink + ?Sized,
    {
        self.set_preference(Category::Bicycle, index, prefs, map, gameplay, audio)
    }

    pub fn set_surf_preference<P, M, G, A>(
        &self,
        index: i32,
        prefs: &mut P,
        map: &M,
        gameplay: &G,
        audio: &mut A,
    ) -> RefreshOutcome
    where
        P: PreferenceStore + ?Sized,
        M: MapMetadata + ?Sized,
        G: GameplayState + ?Sized,
        A: AudioSink + ?Sized,
    {
        self.set_preference(Category::Surf, index, prefs, map, gameplay, audio)
    }

    /// Menu getter: the index the options screen should show as selected.
    #[must_use]
    pub fn menu_value<P>(&self, category: Category, prefs: &P) -> usize
    where
        P: PreferenceStore + ?Sized,
    {
        self.config
            .category(category)
            .options
            .effective_index(prefs.music_preference(category))
    }

    /// Entries for every enabled category, in menu order.
    #[must_use]
    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        let mut entries: Vec<MenuEntry> = Category::ALL
            .into_iter()
            .filter(|&category| self.config.is_enabled(category))
            .map(|category| {
                let cfg = self.config.category(category);
                MenuEntry::new(
                    category,
                    &cfg.name,
                    cfg.order,
                    &cfg.description,
                    self.config.widget_for(category),
                    &cfg.options,
                )
            })
            .collect();
        entries.sort_by_key(|entry| entry.order);
        entries
    }

    /// Hand every enabled entry to the host menu; returns how many were added.
    pub fn register_menu<O>(&self, menu: &mut O) -> usize
    where
        O: OptionsMenu + ?Sized,
    {
        let entries = self.menu_entries();
        let count = entries.len();
        for entry in entries {
            log::debug!("registering options entry {} at {}", entry.key, entry.order);
            menu.add_entry(entry);
        }
        count
    }
}
