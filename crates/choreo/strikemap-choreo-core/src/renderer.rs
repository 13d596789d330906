#![allow(dead_code)]
//! Thin rendering capability: create/move/destroy screen-space sprites.
//!
//! Keeping this surface minimal is what makes the whole choreography core
//! headless-testable; all curve and scheduling math lives on the core side.

use serde::{Deserialize, Serialize};

use crate::dataset::Side;
use crate::geo::ScreenPoint;

/// Opaque handle to a host-side visual element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct VisualId(pub u32);

/// Circle/pin tint palette used by overlays and impact markers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum OverlayColor {
    Blue,
    Red,
    Gold,
}

/// What a visual element looks like. The host maps these onto its own
/// sprite/DOM/canvas representation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpriteKind {
    /// A moving projectile glyph; heading is applied per frame.
    Projectile { size_px: f64 },
    /// A ring decoration (impact site, region marker).
    Circle { color: OverlayColor, size_px: f64 },
    /// A dataset pin, tinted by side classification.
    Marker { side: Side, size_px: f64 },
}

pub trait Renderer {
    /// Create a visual element at an initial screen position.
    fn create(&mut self, kind: SpriteKind, at: ScreenPoint) -> VisualId;
    /// Reposition (and for projectiles re-orient) an element. Degrees,
    /// screen convention (y-down), 0 = pointing right before sprite offset.
    fn update_transform(&mut self, id: VisualId, at: ScreenPoint, heading_deg: f64);
    /// Remove an element. Must tolerate ids it no longer knows about.
    fn destroy(&mut self, id: VisualId);
}
