//! Immediate audio switch when a continuous category changes mid-activity.
use log::info;

use crate::AudioSink;
use crate::category::Category;
use crate::track::TrackId;

/// What the refresh trigger did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Nothing changed, the activity is not running, or the category is
    /// resolved lazily at the next battle.
    Skipped,
    /// The host was told to switch to this track.
    Played(TrackId),
    /// The resolved choice was Off; the host fell back to its map music.
    Ambient,
}

/// Switch playback right away if `category` is a continuous one, its stored
/// preference actually changed, and the matching activity is running.
///
/// `resolve_new` is invoked at most once, after the new value has been
/// stored, and the sink receives exactly one call when a refresh happens.
pub fn refresh_on_change<A, F>(
    category: Category,
    old: Option<i32>,
    new: i32,
    mode_active: bool,
    audio: &mut A,
    resolve_new: F,
) -> RefreshOutcome
where
    A: AudioSink + ?Sized,
    F: FnOnce() -> Option<TrackId>,
{
    if !category.is_continuous() || old == Some(new) || !mode_active {
        return RefreshOutcome::Skipped;
    }

    match resolve_new() {
        Some(track) => {
            info!("{category} music changed mid-activity, playing {track}");
            audio.play_track(&track);
            RefreshOutcome::Played(track)
        }
        None => {
            info!("{category} music turned off mid-activity, resuming map music");
            audio.resume_ambient();
            RefreshOutcome::Ambient
        }
    }
}
