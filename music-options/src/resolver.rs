use log::{debug, error};
use rand::Rng;

use crate::options::OptionList;
use crate::track::{TrackId, TrackRef};

/// Pick the track to play for one category.
///
/// A disabled category returns `per_map_default` untouched without looking at
/// the preference or drawing randomness. Otherwise the stored preference
/// (absent or stale values meaning the first entry) selects an option: `Off`
/// yields `None`, `Random` draws uniformly from the list's concrete tracks on
/// every call, and a concrete entry yields its track.
#[must_use]
pub fn resolve<R>(
    enabled: bool,
    per_map_default: Option<TrackId>,
    preference: Option<i32>,
    options: &OptionList,
    rng: &mut R,
) -> Option<TrackId>
where
    R: Rng + ?Sized,
{
    if !enabled {
        return per_map_default;
    }

    if options.is_stale(preference) {
        debug!("stale music preference {preference:?} reset to index 0");
    }

    match &options.entry_at(preference).track {
        TrackRef::Off => None,
        TrackRef::Concrete(track) => Some(track.clone()),
        TrackRef::Random => pick_random(options, rng),
    }
}

fn pick_random<R>(options: &OptionList, rng: &mut R) -> Option<TrackId>
where
    R: Rng + ?Sized,
{
    let pool = options.valid_tracks();
    if pool.is_empty() {
        error!("random music requested from a list without playable tracks");
        return None;
    }
    let roll = rng.gen_range(0..pool.len());
    let picked = pool[roll].clone();
    debug!("random music pick {picked} ({roll} of {})", pool.len());
    Some(picked)
}
