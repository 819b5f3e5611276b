use music_options::{Category, MusicOptions, RefreshOutcome};
use serde::{Deserialize, Serialize};

use super::host::MemoryHost;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshStep {
    pub description: String,
    pub index: i32,
    pub mode_active: bool,
    pub expected_calls: usize,
    pub audio_calls: Vec<String>,
    pub outcome: String,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshReport {
    pub category: Category,
    pub enabled: bool,
    pub steps: Vec<RefreshStep>,
    pub passed: bool,
}

/// Scripted mid-activity change for one category:
/// change while on foot, change again while active, then re-select the
/// same value. Only the middle step may touch the audio sink.
pub fn run_refresh_scenario(engine: &MusicOptions, category: Category) -> RefreshReport {
    let enabled = engine.config().is_enabled(category);
    let len = engine.config().category(category).options.len();
    let first = i32::try_from(1 % len.max(1)).unwrap_or(0);
    let second = 0;

    let mut host = MemoryHost::new();
    let mut steps = Vec::with_capacity(3);

    steps.push(run_step(
        engine,
        &mut host,
        category,
        "change while inactive",
        first,
        false,
        0,
    ));

    let expected = usize::from(category.is_continuous() && enabled && first != second);
    steps.push(run_step(
        engine,
        &mut host,
        category,
        "change while active",
        second,
        true,
        expected,
    ));

    steps.push(run_step(
        engine,
        &mut host,
        category,
        "re-select same value",
        second,
        true,
        0,
    ));

    let passed = steps.iter().all(|step| step.passed);
    RefreshReport {
        category,
        enabled,
        steps,
        passed,
    }
}

fn run_step(
    engine: &MusicOptions,
    host: &mut MemoryHost,
    category: Category,
    description: &str,
    index: i32,
    mode_active: bool,
    expected_calls: usize,
) -> RefreshStep {
    host.movement.enter(category, mode_active);
    let outcome = host.set_preference(engine, category, index);
    let audio_calls: Vec<String> = host
        .drain_audio()
        .iter()
        .map(ToString::to_string)
        .collect();
    log::debug!("{category} {description}: {outcome:?} {audio_calls:?}");

    RefreshStep {
        description: description.to_string(),
        index,
        mode_active,
        expected_calls,
        passed: audio_calls.len() == expected_calls,
        audio_calls,
        outcome: describe_outcome(&outcome),
    }
}

fn describe_outcome(outcome: &RefreshOutcome) -> String {
    match outcome {
        RefreshOutcome::Skipped => "skipped".to_string(),
        RefreshOutcome::Played(track) => format!("played {track}"),
        RefreshOutcome::Ambient => "resumed map music".to_string(),
    }
}
