//! Shared fixtures and mock host capabilities for choreography tests.
//!
//! The JSON fixture under `fixtures/` mirrors the shape of the cleaned
//! tabular source (coordinate literals still in `"34.3142°N"` form, one
//! intentionally malformed row for skip-path coverage). The mocks here are
//! deliberately dumb recorders: tests assert on what the engine asked the
//! host to do, not on pixels.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;

use strikemap_choreo_core::{
    CameraProjector, GeoPoint, RawRecord, Renderer, ScreenPoint, SpriteKind, VisualId,
};

static RAW_RECORDS: Lazy<Vec<RawRecord>> = Lazy::new(|| {
    serde_json::from_str(records_json()).expect("records fixture should parse")
});

/// The records fixture as raw JSON text.
pub fn records_json() -> &'static str {
    include_str!("../../../../fixtures/records.json")
}

/// The records fixture parsed into raw rows (coordinates still literal).
pub fn raw_records() -> &'static [RawRecord] {
    &RAW_RECORDS
}

/// Parse an arbitrary JSON snippet into raw rows, for tests that hand-craft
/// smaller batches.
pub fn rows_from_json(raw: &str) -> Result<Vec<RawRecord>> {
    serde_json::from_str(raw).context("failed to parse raw record rows")
}

/// A linear geo→screen projector: `x = (lng + 180) * scale`,
/// `y = (90 - lat) * scale` (screen y grows downward). Enough structure for
/// heading math to be meaningful without a real map.
#[derive(Copy, Clone, Debug)]
pub struct FixedCamera {
    pub scale: f64,
}

impl Default for FixedCamera {
    fn default() -> Self {
        Self { scale: 10.0 }
    }
}

impl CameraProjector for FixedCamera {
    fn project(&self, p: GeoPoint) -> ScreenPoint {
        ScreenPoint {
            x: (p.lng + 180.0) * self.scale,
            y: (90.0 - p.lat) * self.scale,
        }
    }
}

/// Everything known about one live visual in the mock renderer.
#[derive(Clone, Debug)]
pub struct MockVisual {
    pub kind: SpriteKind,
    pub at: ScreenPoint,
    pub heading_deg: f64,
    pub moves: usize,
}

/// Recording renderer: keeps live visuals and lifetime counters so tests can
/// assert create/move/destroy traffic precisely.
#[derive(Default)]
pub struct MockRenderer {
    next: u32,
    live: BTreeMap<VisualId, MockVisual>,
    pub created: usize,
    pub destroyed: usize,
    pub moved: usize,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live(&self) -> impl Iterator<Item = (&VisualId, &MockVisual)> {
        self.live.iter()
    }

    pub fn get(&self, id: VisualId) -> Option<&MockVisual> {
        self.live.get(&id)
    }

    /// Count live visuals matching a predicate on their sprite kind.
    pub fn count_kind(&self, pred: impl Fn(&SpriteKind) -> bool) -> usize {
        self.live.values().filter(|v| pred(&v.kind)).count()
    }

    pub fn projectiles_live(&self) -> usize {
        self.count_kind(|k| matches!(k, SpriteKind::Projectile { .. }))
    }

    pub fn circles_live(&self) -> usize {
        self.count_kind(|k| matches!(k, SpriteKind::Circle { .. }))
    }

    pub fn markers_live(&self) -> usize {
        self.count_kind(|k| matches!(k, SpriteKind::Marker { .. }))
    }
}

impl Renderer for MockRenderer {
    fn create(&mut self, kind: SpriteKind, at: ScreenPoint) -> VisualId {
        let id = VisualId(self.next);
        self.next += 1;
        self.created += 1;
        self.live.insert(
            id,
            MockVisual {
                kind,
                at,
                heading_deg: 0.0,
                moves: 0,
            },
        );
        id
    }

    fn update_transform(&mut self, id: VisualId, at: ScreenPoint, heading_deg: f64) {
        self.moved += 1;
        if let Some(v) = self.live.get_mut(&id) {
            v.at = at;
            v.heading_deg = heading_deg;
            v.moves += 1;
        }
    }

    fn destroy(&mut self, id: VisualId) {
        // Tolerates unknown ids, as the capability contract requires.
        if self.live.remove(&id).is_some() {
            self.destroyed += 1;
        }
    }
}
