#![allow(dead_code)]
//! Output contracts from the choreography engine.
//!
//! Visual mutations go straight through the `Renderer` capability; `Outputs`
//! carries only the discrete semantic signals of the tick for the host UI
//! (label updates, autoplay button state, sprite filter swaps).

use serde::{Deserialize, Serialize};

use crate::choreographer::EventKind;
use crate::geo::GeoPoint;
use crate::renderer::OverlayColor;

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    TimelineJumped {
        index: usize,
    },
    AutoplayStarted,
    ChoreographyStarted {
        index: usize,
        kind: EventKind,
    },
    ImpactMarked {
        position: GeoPoint,
        color: OverlayColor,
    },
    ChoreographyCompleted {
        index: usize,
    },
    AutoplayFinished,
    /// Base-map style changed; dark styles want inverted projectile sprites.
    StyleChanged {
        key: String,
        invert_sprites: bool,
    },
    /// A dataset row was dropped during loading (malformed coordinate).
    /// Emitted once per dropped row, on the first tick after the load.
    RecordSkipped {
        index: usize,
    },
}

/// Outputs returned by `Engine::update()`, cleared at the start of each tick.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
