pub mod host;
pub mod refresh;
pub mod reports;
pub mod sampling;

use music_options::MenuEntry;
use serde::Serialize;

pub use refresh::{RefreshReport, run_refresh_scenario};
pub use sampling::{SamplePlan, SampleReport, run_sampling};

/// Everything one tester run produced.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", content = "results", rename_all = "snake_case")]
pub enum RunReport {
    Sample(Vec<SampleReport>),
    Refresh(Vec<RefreshReport>),
    Menu(Vec<MenuEntry>),
}

impl RunReport {
    pub fn passed(&self) -> bool {
        match self {
            Self::Sample(results) => results.iter().all(|r| r.passed),
            Self::Refresh(results) => results.iter().all(|r| r.passed),
            Self::Menu(_) => true,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Sample(results) => results.len(),
            Self::Refresh(results) => results.len(),
            Self::Menu(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
