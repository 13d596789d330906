#![allow(dead_code)]
//! Input contracts for the choreography engine.
//!
//! Hosts translate UI interactions (scrub control, base-map selector) into
//! commands and pass them into `Engine::update()` each display frame.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// Commands applied, in order, before the frame is stepped.
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl Inputs {
    pub fn jump_to(index: usize) -> Self {
        Self {
            commands: vec![Command::JumpTo { index }],
        }
    }

    pub fn play_all() -> Self {
        Self {
            commands: vec![Command::PlayAll],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Manual scrub to an index: force-clear the previous index's in-flight
    /// work, then run the target handler fire-and-forget.
    JumpTo { index: usize },
    /// Autoplay the whole sequence from index 0, each step gated by its
    /// event's join barrier.
    PlayAll,
    /// The base-map selector changed. The map collaborator will follow up
    /// with a `StyleReloaded` camera event once the style lands.
    SetStyle { key: String },
}
