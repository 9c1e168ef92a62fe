//! Suspension points inside a turn.
//!
//! The engine calls `Pacer::pause` at each beat. Interactive front ends sleep,
//! tests and the simulator skip the wait or record the sequence.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Beat {
    /// "X used Y!" is on screen, effect not yet applied
    MoveAnnounced,
    /// First action done, second about to start
    BetweenActions,
    Fainted,
    Experience,
}

impl Beat {
    pub fn delay(self) -> Duration {
        let ms = match self {
            Beat::MoveAnnounced => MOVE_ANNOUNCE_DELAY_MS,
            Beat::BetweenActions => BETWEEN_ACTIONS_DELAY_MS,
            Beat::Fainted => FAINT_DELAY_MS,
            Beat::Experience => EXPERIENCE_DELAY_MS,
        };
        Duration::from_millis(ms)
    }
}

pub trait Pacer {
    fn pause(&mut self, beat: Beat);
}

/// Blocks the thread for each beat's delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&mut self, beat: Beat) {
        thread::sleep(beat.delay());
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&mut self, _beat: Beat) {}
}

/// Zero-delay pacer that remembers every beat it saw.
#[derive(Debug, Clone, Default)]
pub struct RecordingPacer {
    pub beats: Vec<Beat>,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, beat: Beat) {
        self.beats.push(beat);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beat_delays() {
        assert_eq!(Beat::MoveAnnounced.delay(), Duration::from_millis(800));
        assert_eq!(Beat::BetweenActions.delay(), Duration::from_millis(1000));
        assert_eq!(Beat::Fainted.delay(), Duration::from_millis(1000));
        assert_eq!(Beat::Experience.delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_recording_pacer_keeps_order() {
        let mut pacer = RecordingPacer::default();
        pacer.pause(Beat::MoveAnnounced);
        pacer.pause(Beat::BetweenActions);
        assert_eq!(pacer.beats, vec![Beat::MoveAnnounced, Beat::BetweenActions]);
    }
}
