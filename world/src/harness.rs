//! Golden-trace replay suites for whole games.

use crate::level::{Level, LoadError, ReplayError};
use crate::Game;

/// One golden-trace case: a named level text and its recording.
#[derive(Clone, Copy, Debug)]
pub struct ReplayCase<'a> {
    /// Name reported in replay failures.
    pub name: &'a str,
    /// The level text to load.
    pub level: &'a str,
    /// The recording the simulation must reproduce.
    pub recording: &'a str,
}

/// Replays every case and collects the divergences.
///
/// A level that fails to load aborts the suite: that is a broken test
/// fixture, not a simulation regression. Replay mismatches are collected
/// and the suite moves on to the next case, so one report covers every
/// diverging level.
pub fn replay_suite<G: Game>(cases: &[ReplayCase<'_>]) -> Result<Vec<ReplayError>, LoadError> {
    let mut level = Level::<G>::new();
    let mut failures = Vec::new();
    for case in cases {
        level.load(case.name, case.level)?;
        if let Err(error) = level.replay(case.recording) {
            failures.push(error);
        }
    }
    Ok(failures)
}
