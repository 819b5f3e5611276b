//! Ordered option tables shown for each category.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::track::{TrackId, TrackRef};

/// A single menu choice: display label plus what it plays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionEntry {
    pub label: String,
    pub track: TrackRef,
}

impl OptionEntry {
    #[must_use]
    pub fn new(label: impl Into<String>, track: TrackRef) -> Self {
        Self {
            label: label.into(),
            track,
        }
    }
}

/// Violations of the option table shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("option list is empty")]
    Empty,
    #[error("option list has more than one Random entry")]
    DuplicateRandom,
    #[error("option list has more than one Off entry")]
    DuplicateOff,
    #[error("option list has no playable track for Random to draw from")]
    NoPlayableTracks,
}

/// Non-empty, validated list of options in menu display order.
///
/// Holds at most one `Random` and one `Off` entry and at least one concrete
/// track, so a Random pick always has something to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OptionEntry>", into = "Vec<OptionEntry>")]
pub struct OptionList {
    entries: Vec<OptionEntry>,
}

impl OptionList {
    /// Validate and wrap an option table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty, repeats a special entry, or
    /// has no concrete track.
    pub fn new(entries: Vec<OptionEntry>) -> Result<Self, OptionsError> {
        if entries.is_empty() {
            return Err(OptionsError::Empty);
        }
        let count = |wanted: &TrackRef| entries.iter().filter(|e| &e.track == wanted).count();
        if count(&TrackRef::Random) > 1 {
            return Err(OptionsError::DuplicateRandom);
        }
        if count(&TrackRef::Off) > 1 {
            return Err(OptionsError::DuplicateOff);
        }
        if entries.iter().all(|e| e.track.is_special()) {
            return Err(OptionsError::NoPlayableTracks);
        }
        Ok(Self { entries })
    }

    /// Concrete tracks followed by the conventional Random and Off entries.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::NoPlayableTracks`] when `tracks` is empty.
    pub fn with_random_and_off<L, T>(
        tracks: impl IntoIterator<Item = (L, T)>,
    ) -> Result<Self, OptionsError>
    where
        L: Into<String>,
        T: Into<TrackId>,
    {
        let mut entries: Vec<OptionEntry> = tracks
            .into_iter()
            .map(|(label, track)| OptionEntry::new(label, TrackRef::Concrete(track.into())))
            .collect();
        if entries.is_empty() {
            return Err(OptionsError::NoPlayableTracks);
        }
        entries.push(OptionEntry::new("Random", TrackRef::Random));
        entries.push(OptionEntry::new("Off", TrackRef::Off));
        Self::new(entries)
    }

    #[must_use]
    pub fn entries(&self) -> &[OptionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    /// Tracks eligible for a Random pick, in display order.
    #[must_use]
    pub fn valid_tracks(&self) -> Vec<&TrackId> {
        self.entries
            .iter()
            .filter_map(|e| e.track.as_concrete())
            .collect()
    }

    /// Index a stored preference maps to: absent, negative or stale values
    /// fall back to the first entry.
    #[must_use]
    pub fn effective_index(&self, preference: Option<i32>) -> usize {
        clamp_preference(preference, self.entries.len())
    }

    /// True when a stored value no longer points at an entry.
    #[must_use]
    pub fn is_stale(&self, preference: Option<i32>) -> bool {
        let index = self.effective_index(preference);
        preference.is_some_and(|value| usize::try_from(value).ok() != Some(index))
    }

    #[must_use]
    pub fn entry_at(&self, preference: Option<i32>) -> &OptionEntry {
        &self.entries[self.effective_index(preference)]
    }

    /// Position of the Random entry, if the list has one.
    #[must_use]
    pub fn random_index(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.track == TrackRef::Random)
    }

    /// Position of the Off entry, if the list has one.
    #[must_use]
    pub fn off_index(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.track == TrackRef::Off)
    }
}

/// Map a stored preference onto a table of `len` choices. Absent, negative
/// and out-of-range values select the first choice.
#[must_use]
pub fn clamp_preference(preference: Option<i32>, len: usize) -> usize {
    preference
        .and_then(|value| usize::try_from(value).ok())
        .filter(|&idx| idx < len)
        .unwrap_or(0)
}

impl TryFrom<Vec<OptionEntry>> for OptionList {
    type Error = OptionsError;

    fn try_from(entries: Vec<OptionEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<OptionList> for Vec<OptionEntry> {
    fn from(list: OptionList) -> Self {
        list.entries
    }
}
