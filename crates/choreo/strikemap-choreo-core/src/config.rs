#![allow(dead_code)]
//! Core configuration for strikemap-choreo-core.

use serde::{Deserialize, Serialize};

/// Timing and sprite-convention knobs for the choreography engine.
/// Defaults reproduce the historical presentation; hosts may override any of
/// them without touching the dispatch table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Delay between successive launches within one volley (ms).
    pub stagger_ms: f64,
    /// Flight time of a projectile arc (ms).
    pub flight_duration_ms: f64,
    /// Pause between impact-marker placement and choreography completion (ms).
    pub settle_delay_ms: f64,
    /// Lifetime of a self-expiring overlay (ms).
    pub transient_overlay_ms: f64,
    /// Sprite-orientation correction added to the tangent heading (degrees).
    /// +90 suits a sprite whose rest orientation points "up"; this is a
    /// per-sprite constant, not a universal law.
    pub heading_offset_deg: f64,
    /// Fraction of the full path a partial (intercepted) arc travels.
    pub partial_fraction: f64,
    /// Diameter of ring overlays (px).
    pub circle_size_px: f64,
    /// Diameter of dataset marker pins (px).
    pub marker_size_px: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stagger_ms: 400.0,
            flight_duration_ms: 1800.0,
            settle_delay_ms: 300.0,
            transient_overlay_ms: 3000.0,
            heading_offset_deg: 90.0,
            partial_fraction: 0.55,
            circle_size_px: 48.0,
            marker_size_px: 40.0,
        }
    }
}
