use std::cell::RefCell;
use std::collections::HashMap;

use music_options::{
    AudioSink, Category, GameplayState, MapMetadata, MenuEntry, MusicConfig, MusicOptions,
    MusicPreferences, OptionWidget, OptionsMenu, RefreshOutcome, TrackId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum AudioCall {
    Play(TrackId),
    Ambient,
}

#[derive(Default)]
struct Host {
    map_music: HashMap<Category, TrackId>,
    cycling: bool,
    surfing: bool,
    calls: RefCell<Vec<AudioCall>>,
    menu: Vec<MenuEntry>,
}

impl MapMetadata for Host {
    fn default_track(&self, category: Category) -> Option<TrackId> {
        self.map_music.get(&category).cloned()
    }
}

impl GameplayState for Host {
    fn is_cycling(&self) -> bool {
        self.cycling
    }

    fn is_surfing(&self) -> bool {
        self.surfing
    }
}

struct Speaker<'a>(&'a RefCell<Vec<AudioCall>>);

impl AudioSink for Speaker<'_> {
    fn play_track(&mut self, track: &TrackId) {
        self.0.borrow_mut().push(AudioCall::Play(track.clone()));
    }

    fn resume_ambient(&mut self) {
        self.0.borrow_mut().push(AudioCall::Ambient);
    }
}

impl OptionsMenu for Host {
    fn add_entry(&mut self, entry: MenuEntry) {
        self.menu.push(entry);
    }
}

fn options(seed: u64) -> MusicOptions {
    MusicOptions::with_seed(MusicConfig::default_config(), seed).unwrap()
}

#[test]
fn bicycle_refresh_matches_resolver_for_new_index() {
    let engine = options(42);
    let host = Host {
        cycling: true,
        ..Host::default()
    };
    let mut prefs = MusicPreferences::default();
    let mut speaker = Speaker(&host.calls);

    let outcome = engine.set_bicycle_preference(1, &mut prefs, &host, &host, &mut speaker);
    assert_eq!(
        host.calls.borrow().as_slice(),
        &[AudioCall::Play(TrackId::from("Route 1"))]
    );
    assert_eq!(
        outcome,
        RefreshOutcome::Played(engine.bicycle_track(&prefs, &host).unwrap())
    );
}

#[test]
fn bicycle_change_while_walking_makes_no_audio_calls() {
    let engine = options(42);
    let host = Host::default();
    let mut prefs = MusicPreferences::default();
    let mut speaker = Speaker(&host.calls);
    for index in 0..4 {
        engine.set_bicycle_preference(index, &mut prefs, &host, &host, &mut speaker);
    }
    assert!(host.calls.borrow().is_empty());
    assert_eq!(prefs.bicycle, Some(3));
}

#[test]
fn surf_random_while_surfing_plays_one_surf_track() {
    let engine = options(7);
    let host = Host {
        surfing: true,
        ..Host::default()
    };
    let mut prefs = MusicPreferences {
        surf: Some(0),
        ..MusicPreferences::default()
    };
    let mut speaker = Speaker(&host.calls);

    engine.set_surf_preference(2, &mut prefs, &host, &host, &mut speaker);
    let calls = host.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert!(matches!(
        &calls[0],
        AudioCall::Play(track) if track.as_str() == "Surfing" || track.as_str() == "Route 2"
    ));
}

#[test]
fn surf_off_while_surfing_falls_back_to_map_music() {
    let engine = options(7);
    let host = Host {
        surfing: true,
        ..Host::default()
    };
    let mut prefs = MusicPreferences::default();
    let mut speaker = Speaker(&host.calls);

    let outcome = engine.set_surf_preference(3, &mut prefs, &host, &host, &mut speaker);
    assert_eq!(outcome, RefreshOutcome::Ambient);
    assert_eq!(host.calls.borrow().as_slice(), &[AudioCall::Ambient]);
}

#[test]
fn reselecting_same_value_does_not_restart_music() {
    let engine = options(7);
    let host = Host {
        cycling: true,
        ..Host::default()
    };
    let mut prefs = MusicPreferences::default();
    let mut speaker = Speaker(&host.calls);

    engine.set_bicycle_preference(1, &mut prefs, &host, &host, &mut speaker);
    engine.set_bicycle_preference(1, &mut prefs, &host, &host, &mut speaker);
    assert_eq!(host.calls.borrow().len(), 1);
}

#[test]
fn disabled_bicycle_keeps_map_music_and_skips_refresh() {
    let mut config = MusicConfig::default();
    config.bicycle.enabled = false;
    let engine = MusicOptions::with_seed(config, 3).unwrap();
    let mut host = Host {
        cycling: true,
        ..Host::default()
    };
    host.map_music
        .insert(Category::Bicycle, TrackId::from("Cycling Road"));
    let mut prefs = MusicPreferences::default();
    let mut speaker = Speaker(&host.calls);

    let outcome = engine.set_bicycle_preference(2, &mut prefs, &host, &host, &mut speaker);
    assert_eq!(outcome, RefreshOutcome::Skipped);
    assert_eq!(
        engine.bicycle_track(&prefs, &host),
        Some(TrackId::from("Cycling Road"))
    );
    assert!(host.calls.borrow().is_empty());
}

#[test]
fn menu_registration_mirrors_configured_widgets() {
    let mut config = MusicConfig::default();
    config.show_all_labels = true;
    let engine = MusicOptions::with_seed(config, 1).unwrap();
    let mut host = Host::default();

    assert_eq!(engine.register_menu(&mut host), 4);
    let summary: Vec<(&str, u32, OptionWidget)> = host
        .menu
        .iter()
        .map(|e| (e.name.as_str(), e.order, e.widget))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Wild Music", 150, OptionWidget::AllLabels),
            ("Trainer Music", 151, OptionWidget::AllLabels),
            ("Bicycle Music", 152, OptionWidget::SingleLabel),
            ("Surf Music", 153, OptionWidget::SingleLabel),
        ]
    );
    assert_eq!(
        host.menu[0].labels,
        vec!["Standard", "Roaming", "Random", "Off"]
    );
}

#[test]
fn preferences_survive_a_save_round_trip() {
    let engine = options(5);
    let host = Host::default();
    let prefs = MusicPreferences {
        trainer_battle: Some(1),
        ..MusicPreferences::default()
    };
    let saved = serde_json::to_string(&prefs).unwrap();
    let restored: MusicPreferences = serde_json::from_str(&saved).unwrap();
    assert_eq!(
        engine.trainer_battle_track(&restored, &host),
        Some(TrackId::from("Battle Gym Leader"))
    );
}
