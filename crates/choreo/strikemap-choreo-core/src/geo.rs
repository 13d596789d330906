#![allow(dead_code)]
//! Geographic and screen-space value types.
//!
//! Coordinates are plain lng/lat degree pairs; projection into screen space is
//! a host capability (see `camera.rs`), never computed here.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Longitude/latitude pair in degrees. Immutable value type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Component-wise linear interpolation toward `other`.
    /// Used for partial-path endpoints (e.g. the 55% crossfire points).
    #[inline]
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lng: self.lng + (other.lng - self.lng) * t,
            lat: self.lat + (other.lat - self.lat) * t,
        }
    }
}

/// A projected position in screen pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Parse a coordinate literal of the form `"34.3142°N"` / `"47.0650°E"`.
/// South and west hemispheres yield negative values.
pub fn parse_coordinate(raw: &str) -> Result<f64, CoreError> {
    let malformed = || CoreError::MalformedCoordinate {
        raw: raw.to_string(),
    };
    let trimmed = raw.trim();
    let (digits, hemi) = trimmed.split_once('°').ok_or_else(malformed)?;
    let value: f64 = digits.parse().map_err(|_| malformed())?;
    if !value.is_finite() || value < 0.0 {
        return Err(malformed());
    }
    match hemi {
        "N" | "E" => Ok(value),
        "S" | "W" => Ok(-value),
        _ => Err(malformed()),
    }
}
