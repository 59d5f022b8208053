//! Next-track selection after a turn.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::TurnParameters;
use crate::error::{Result, TurnError};

/// Policy for choosing the next guidance track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowSkipMode {
    /// Move to the adjacent track
    #[default]
    Normal,
    /// Skip a fixed number of tracks each turn
    Alternative,
    /// Scan forward to the first track not already worked
    IgnoreWorkedTracks,
}

/// Choose the next guidance track index.
///
/// `worked` is the set of already-covered track indices, consulted only in
/// [`RowSkipMode::IgnoreWorkedTracks`]; without it that mode behaves like
/// [`RowSkipMode::Normal`]. Returns `Ok(None)` when no track remains ahead
/// of the current one, which is a normal end-of-field outcome and not an
/// error.
///
/// Out-of-range inputs (`total == 0`, `current >= total`) are rejected as
/// configuration errors rather than clamped.
pub fn find_next_track(
    current: usize,
    total: usize,
    worked: Option<&HashSet<usize>>,
    mode: RowSkipMode,
    tracks_to_skip: usize,
) -> Result<Option<usize>> {
    if total == 0 {
        return Err(TurnError::NoTracks);
    }
    if current >= total {
        return Err(TurnError::TrackIndexOutOfRange {
            index: current,
            total,
        });
    }

    let next = match mode {
        RowSkipMode::Normal => current + 1,
        RowSkipMode::Alternative => current + tracks_to_skip + 1,
        RowSkipMode::IgnoreWorkedTracks => match worked {
            None => current + 1,
            Some(worked) => {
                let mut candidate = current + 1;
                while candidate < total && worked.contains(&candidate) {
                    candidate += 1;
                }
                candidate
            }
        },
    };

    Ok(if next < total { Some(next) } else { None })
}

/// [`find_next_track`] with the policy taken from the turn parameters.
pub fn next_track_for(
    params: &TurnParameters,
    current: usize,
    total: usize,
    worked: Option<&HashSet<usize>>,
) -> Result<Option<usize>> {
    find_next_track(
        current,
        total,
        worked,
        params.row_skip_mode,
        params.row_skip_width,
    )
}
