#![allow(dead_code)]
//! Timeline Controller: the state machine over the ordered event sequence.
//!
//! Single process-wide `PlaybackState`, mutated only here. The controller
//! decides indices and phases; spawning/clearing visuals is the engine's job.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlaybackPhase {
    Idle,
    Autoplaying,
    ManualScrub,
}

/// Current index into the event sequence plus playback phase.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub current_index: usize,
    pub phase: PlaybackPhase,
}

#[derive(Clone, Debug)]
pub struct TimelineController {
    state: PlaybackState,
    last_index: usize,
}

impl TimelineController {
    /// Initial state: Idle at the last index, since the default display is
    /// the terminal "current state" frame.
    pub fn new(last_index: usize) -> Self {
        Self {
            state: PlaybackState {
                current_index: last_index,
                phase: PlaybackPhase::Idle,
            },
            last_index,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.state.phase
    }

    pub fn last_index(&self) -> usize {
        self.last_index
    }

    /// Enter manual scrub at `index`. The caller must have force-cleared the
    /// previous index's in-flight work before invoking the new handler.
    pub fn begin_scrub(&mut self, index: usize) -> Result<(), CoreError> {
        if index > self.last_index {
            return Err(CoreError::IndexOutOfRange {
                index,
                last: self.last_index,
            });
        }
        self.state = PlaybackState {
            current_index: index,
            phase: PlaybackPhase::ManualScrub,
        };
        Ok(())
    }

    /// Enter autoplay at index 0.
    pub fn begin_autoplay(&mut self) {
        self.state = PlaybackState {
            current_index: 0,
            phase: PlaybackPhase::Autoplaying,
        };
    }

    /// Autoplay continuation: advance to the next index, or finish. Reaching
    /// completion at the terminal index ends autoplay without wrapping.
    pub fn advance(&mut self) -> Option<usize> {
        debug_assert_eq!(self.state.phase, PlaybackPhase::Autoplaying);
        if self.state.current_index < self.last_index {
            self.state.current_index += 1;
            Some(self.state.current_index)
        } else {
            self.state.phase = PlaybackPhase::Idle;
            None
        }
    }

    /// A fire-and-forget (scrub) choreography finished; settle back to Idle.
    pub fn settle_idle(&mut self) {
        self.state.phase = PlaybackPhase::Idle;
    }
}
