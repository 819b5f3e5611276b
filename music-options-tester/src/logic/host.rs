use std::collections::HashMap;

use music_options::{
    AudioSink, Category, GameplayState, MapMetadata, MenuEntry, MusicOptions, MusicPreferences,
    OptionsMenu, RefreshOutcome, TrackId,
};

/// One call the engine made on the audio sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    Play(TrackId),
    ResumeAmbient,
}

impl std::fmt::Display for AudioEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Play(track) => write!(f, "play({track})"),
            Self::ResumeAmbient => f.write_str("resume_ambient"),
        }
    }
}

#[derive(Debug, Default)]
pub struct MapMusic {
    tracks: HashMap<Category, TrackId>,
}

impl MapMusic {
    pub fn set(&mut self, category: Category, track: impl Into<TrackId>) {
        self.tracks.insert(category, track.into());
    }
}

impl MapMetadata for MapMusic {
    fn default_track(&self, category: Category) -> Option<TrackId> {
        self.tracks.get(&category).cloned()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Movement {
    pub cycling: bool,
    pub surfing: bool,
}

impl Movement {
    /// Put the player into the activity behind `category`, or back on foot.
    pub const fn enter(&mut self, category: Category, active: bool) {
        match category {
            Category::Bicycle => self.cycling = active,
            Category::Surf => self.surfing = active,
            Category::WildBattle | Category::TrainerBattle => {}
        }
    }
}

impl GameplayState for Movement {
    fn is_cycling(&self) -> bool {
        self.cycling
    }

    fn is_surfing(&self) -> bool {
        self.surfing
    }
}

#[derive(Debug, Default)]
pub struct AudioLog {
    pub events: Vec<AudioEvent>,
}

impl AudioSink for AudioLog {
    fn play_track(&mut self, track: &TrackId) {
        self.events.push(AudioEvent::Play(track.clone()));
    }

    fn resume_ambient(&mut self) {
        self.events.push(AudioEvent::ResumeAmbient);
    }
}

#[derive(Debug, Default)]
pub struct MenuLog {
    pub entries: Vec<MenuEntry>,
}

impl OptionsMenu for MenuLog {
    fn add_entry(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }
}

/// In-memory stand-in for the game engine.
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub prefs: MusicPreferences,
    pub map: MapMusic,
    pub movement: Movement,
    pub audio: AudioLog,
    pub menu: MenuLog,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_preference(
        &mut self,
        engine: &MusicOptions,
        category: Category,
        index: i32,
    ) -> RefreshOutcome {
        engine.set_preference(
            category,
            index,
            &mut self.prefs,
            &self.map,
            &self.movement,
            &mut self.audio,
        )
    }

    pub fn track_for(&self, engine: &MusicOptions, category: Category) -> Option<TrackId> {
        engine.track_for(category, &self.prefs, &self.map)
    }

    /// Audio calls recorded since the last drain.
    pub fn drain_audio(&mut self) -> Vec<AudioEvent> {
        std::mem::take(&mut self.audio.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use music_options::MusicConfig;

    #[test]
    fn host_records_refresh_calls() {
        let engine = MusicOptions::with_seed(MusicConfig::default_config(), 9).unwrap();
        let mut host = MemoryHost::new();
        host.movement.enter(Category::Surf, true);

        host.set_preference(&engine, Category::Surf, 1);
        assert_eq!(
            host.drain_audio(),
            vec![AudioEvent::Play(TrackId::from("Route 2"))]
        );
        assert!(host.drain_audio().is_empty());
    }

    #[test]
    fn map_music_backs_disabled_categories() {
        let mut config = MusicConfig::default_config();
        config.wild_battle.enabled = false;
        let engine = MusicOptions::with_seed(config, 9).unwrap();
        let mut host = MemoryHost::new();
        host.map.set(Category::WildBattle, "Forest battle");
        host.prefs.wild_battle = Some(1);

        assert_eq!(
            host.track_for(&engine, Category::WildBattle),
            Some(TrackId::from("Forest battle"))
        );
    }

    #[test]
    fn audio_events_render_compactly() {
        assert_eq!(
            AudioEvent::Play(TrackId::from("Surfing")).to_string(),
            "play(Surfing)"
        );
        assert_eq!(AudioEvent::ResumeAmbient.to_string(), "resume_ambient");
    }
}
