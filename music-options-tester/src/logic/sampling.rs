use std::collections::BTreeMap;

use music_options::{Category, MusicOptions, TrackId, TrackRef};
use serde::{Deserialize, Serialize};

use super::host::MemoryHost;

/// Key used in the counts table when the resolver returned no track.
pub const NO_TRACK_KEY: &str = "<no track>";

/// Inputs shared by every category sampled in one run.
#[derive(Debug, Clone)]
pub struct SamplePlan {
    /// Stored menu index
    pub choice: i32,
    pub trials: usize,
    /// Allowed distance of each Random share from uniform
    pub tolerance: f64,
    /// Per-map default the host reports for every category
    pub map_track: Option<TrackId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleReport {
    pub category: Category,
    pub choice: i32,
    pub effective_index: usize,
    pub label: String,
    pub enabled: bool,
    pub trials: usize,
    pub counts: BTreeMap<String, usize>,
    pub passed: bool,
    pub failures: Vec<String>,
}

impl SampleReport {
    /// Share of `trials` that resolved to `key`.
    pub fn share(&self, key: &str) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let share = *self.counts.get(key).unwrap_or(&0) as f64 / self.trials as f64;
        share
    }
}

/// Resolve `category` `trials` times with `choice` stored as the preference
/// and check the outcome against what the chosen option promises.
pub fn run_sampling(engine: &MusicOptions, category: Category, plan: &SamplePlan) -> SampleReport {
    let cfg = engine.config().category(category);
    let choice = plan.choice;
    let trials = plan.trials;
    let mut host = MemoryHost::new();
    host.prefs.set(category, choice);
    if let Some(track) = &plan.map_track {
        host.map.set(category, track.clone());
    }

    let effective_index = cfg.options.effective_index(Some(choice));
    let entry = cfg.options.entry_at(Some(choice));

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for _ in 0..trials {
        let key = host
            .track_for(engine, category)
            .map_or_else(|| NO_TRACK_KEY.to_string(), |track| track.to_string());
        *counts.entry(key).or_default() += 1;
    }

    let mut report = SampleReport {
        category,
        choice,
        effective_index,
        label: entry.label.clone(),
        enabled: cfg.enabled,
        trials,
        counts,
        passed: true,
        failures: Vec::new(),
    };

    let map_key = plan
        .map_track
        .as_ref()
        .map_or(NO_TRACK_KEY, TrackId::as_str);
    let failures = if !cfg.enabled {
        check_single_outcome(&report, map_key)
    } else {
        match &entry.track {
            TrackRef::Concrete(track) => check_single_outcome(&report, track.as_str()),
            TrackRef::Off => check_single_outcome(&report, NO_TRACK_KEY),
            TrackRef::Random => {
                let pool: Vec<String> = cfg
                    .options
                    .valid_tracks()
                    .into_iter()
                    .map(ToString::to_string)
                    .collect();
                check_uniform(&report, &pool, plan.tolerance)
            }
        }
    };

    report.passed = failures.is_empty();
    report.failures = failures;
    report
}

fn check_single_outcome(report: &SampleReport, expected: &str) -> Vec<String> {
    report
        .counts
        .iter()
        .filter(|(key, _)| key.as_str() != expected)
        .map(|(key, count)| format!("expected only {expected}, got {key} {count} times"))
        .collect()
}

fn check_uniform(report: &SampleReport, pool: &[String], tolerance: f64) -> Vec<String> {
    let mut failures = Vec::new();
    if pool.is_empty() {
        failures.push("random pool is empty".to_string());
        return failures;
    }

    for key in report.counts.keys() {
        if !pool.contains(key) {
            failures.push(format!("{key} is not a concrete track of this category"));
        }
    }

    if report.trials == 0 {
        return failures;
    }

    #[allow(clippy::cast_precision_loss)]
    let expected = 1.0 / pool.len() as f64;
    for track in pool {
        if !report.counts.contains_key(track) {
            failures.push(format!("{track} was never drawn"));
            continue;
        }
        let share = report.share(track);
        if (share - expected).abs() > tolerance {
            failures.push(format!(
                "{track} share {share:.3} outside {expected:.3} ± {tolerance:.3}"
            ));
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use music_options::MusicConfig;

    fn engine(seed: u64) -> MusicOptions {
        MusicOptions::with_seed(MusicConfig::default_config(), seed).unwrap()
    }

    fn plan(choice: i32, trials: usize, tolerance: f64) -> SamplePlan {
        SamplePlan {
            choice,
            trials,
            tolerance,
            map_track: None,
        }
    }

    #[test]
    fn random_choice_is_uniform_over_concrete_tracks() {
        let report = run_sampling(&engine(1337), Category::WildBattle, &plan(2, 1000, 0.1));
        assert!(report.passed, "{:?}", report.failures);
        assert_eq!(report.label, "Random");
        assert_eq!(report.counts.len(), 2);
        assert_eq!(report.counts.values().sum::<usize>(), 1000);
    }

    #[test]
    fn off_choice_never_plays() {
        let report = run_sampling(&engine(1), Category::Surf, &plan(3, 50, 0.1));
        assert!(report.passed);
        assert_eq!(report.counts.get(NO_TRACK_KEY), Some(&50));
    }

    #[test]
    fn off_choice_ignores_map_track() {
        let plan = SamplePlan {
            map_track: Some(TrackId::from("Route 5")),
            ..plan(3, 10, 0.1)
        };
        let report = run_sampling(&engine(1), Category::WildBattle, &plan);
        assert!(report.passed);
        assert_eq!(report.counts.get(NO_TRACK_KEY), Some(&10));
    }

    #[test]
    fn stale_choice_reports_first_option() {
        let report = run_sampling(&engine(1), Category::TrainerBattle, &plan(42, 10, 0.1));
        assert_eq!(report.effective_index, 0);
        assert_eq!(report.label, "Standard");
        assert_eq!(report.counts.get("Battle trainer"), Some(&10));
        assert!(report.passed);
    }

    #[test]
    fn impossible_tolerance_fails_the_check() {
        let report = run_sampling(&engine(5), Category::Bicycle, &plan(2, 7, 0.0));
        assert!(!report.passed);
        assert!(!report.failures.is_empty());
    }

    #[test]
    fn disabled_category_expects_map_default() {
        let mut config = MusicConfig::default_config();
        config.bicycle.enabled = false;
        let engine = MusicOptions::with_seed(config, 2).unwrap();
        let plan = SamplePlan {
            map_track: Some(TrackId::from("Cycling Road")),
            ..plan(0, 20, 0.1)
        };
        let report = run_sampling(&engine, Category::Bicycle, &plan);
        assert!(!report.enabled);
        assert!(report.passed, "{:?}", report.failures);
        assert_eq!(report.counts.get("Cycling Road"), Some(&20));
    }
}
