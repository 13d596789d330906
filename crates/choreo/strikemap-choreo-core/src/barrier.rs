#![allow(dead_code)]
//! Join barrier: a completion gate over a known count of independent tasks.
//!
//! Contract: the gate opens exactly once, on the call where `completed`
//! reaches `expected`; never early, never twice, and safe under re-entrant
//! completion. A barrier armed with `expected = 0` opens on the first poll,
//! which is how zero-animation choreographies act as synchronous steps.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JoinBarrier {
    expected: u32,
    completed: u32,
    fired: bool,
}

impl JoinBarrier {
    pub fn new(expected: u32) -> Self {
        Self {
            expected,
            completed: 0,
            fired: false,
        }
    }

    pub fn expected(&self) -> u32 {
        self.expected
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }

    /// Record one sub-animation completion. Returns `true` exactly once:
    /// on the call that brings `completed` up to `expected`.
    pub fn complete(&mut self) -> bool {
        if self.fired {
            log::debug!("join barrier completion after fire ignored");
            return false;
        }
        if self.completed < self.expected {
            self.completed += 1;
        }
        self.try_fire()
    }

    /// Open the gate if all completions have arrived. Returns `true` only on
    /// the transition; callers may poll freely.
    pub fn try_fire(&mut self) -> bool {
        if !self.fired && self.completed >= self.expected {
            self.fired = true;
            true
        } else {
            false
        }
    }
}
