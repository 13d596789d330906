#![allow(dead_code)]
//! Camera/projection capability consumed from the map collaborator.
//!
//! The core never owns the camera; it receives a `CameraProjector` by
//! reference on every tick and on every camera notification, mirroring how
//! hosts hand resolvers into the engine rather than the engine holding them.

use serde::{Deserialize, Serialize};

use crate::geo::{GeoPoint, ScreenPoint};

/// Converts a geographic coordinate into the current screen coordinate.
/// Implemented by the map widget adapter; pure from the core's perspective.
pub trait CameraProjector {
    fn project(&self, point: GeoPoint) -> ScreenPoint;
}

/// Notifications the map collaborator fires on its own event cycle.
/// `CameraChange` covers pan, zoom, and resize; a style reload may discard
/// host-side layer state, so the core rebuilds its markers on `StyleReloaded`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CameraEvent {
    Load,
    StyleReloaded { style_key: String },
    CameraChange,
}
