#![allow(dead_code)]
//! Curve Engine: pure quadratic-Bezier position and tangent-heading math.
//!
//! Model:
//! - The path from `start` to `end` arcs through a control point derived as
//!   the midpoint of `start` and `curve_target`, pushed by a fixed bias so the
//!   trajectory bows instead of running straight.
//! - `curve_target` may differ from `end` when the arc is a partial segment of
//!   a longer logical path; it keeps the control point (and the terminal
//!   heading sample) aimed at the full destination.
//! - Headings are computed in screen space: sample the curve at `t` and a
//!   little ahead, project both, and take `atan2` of the pixel delta.

use serde::{Deserialize, Serialize};

use crate::camera::CameraProjector;
use crate::geo::GeoPoint;

/// Degrees added to the control-point midpoint on both axes.
const CURVE_BIAS: f64 = 2.0;

/// Forward-sample step used for tangent estimation.
const HEADING_SAMPLE_DELTA: f64 = 0.01;

/// One projectile arc: geometry plus presentation size and flight time.
/// Created when a handler fires, destroyed when its task finishes or is
/// force-cancelled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArcSpec {
    pub start: GeoPoint,
    pub end: GeoPoint,
    /// Heading/control-point reference; equals `end` for full arcs.
    pub curve_target: GeoPoint,
    pub size_px: f64,
    pub duration_ms: f64,
}

impl ArcSpec {
    /// A full arc whose curve target is its own endpoint.
    pub fn full(start: GeoPoint, end: GeoPoint, size_px: f64, duration_ms: f64) -> Self {
        Self {
            start,
            end,
            curve_target: end,
            size_px,
            duration_ms,
        }
    }
}

#[inline]
fn control_point(spec: &ArcSpec) -> GeoPoint {
    GeoPoint {
        lng: (spec.start.lng + spec.curve_target.lng) / 2.0 + CURVE_BIAS,
        lat: (spec.start.lat + spec.curve_target.lat) / 2.0 + CURVE_BIAS,
    }
}

#[inline]
fn quadratic(p0: f64, p1: f64, p2: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * p0 + 2.0 * u * t * p1 + t * t * p2
}

/// Position on the arc at normalized progress `t ∈ [0, 1]`.
/// Exact at the endpoints: `point_at(spec, 0) == spec.start` and
/// `point_at(spec, 1) == spec.end`.
pub fn point_at(spec: &ArcSpec, t: f64) -> GeoPoint {
    let t = t.clamp(0.0, 1.0);
    let c = control_point(spec);
    GeoPoint {
        lng: quadratic(spec.start.lng, c.lng, spec.end.lng, t),
        lat: quadratic(spec.start.lat, c.lat, spec.end.lat, t),
    }
}

/// Tangent heading at `t`, in degrees, in screen space (y-down), with the
/// sprite-orientation offset applied. Near the end of the arc the forward
/// sample would overshoot `t = 1`, so `curve_target` substitutes as the
/// look-ahead point; for partial arcs this keeps the glyph aimed along the
/// full logical path through its final frames.
pub fn heading_at(
    spec: &ArcSpec,
    t: f64,
    camera: &dyn CameraProjector,
    offset_deg: f64,
) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let here = point_at(spec, t);
    let ahead = if t + HEADING_SAMPLE_DELTA <= 1.0 {
        point_at(spec, t + HEADING_SAMPLE_DELTA)
    } else {
        spec.curve_target
    };
    let p0 = camera.project(here);
    let p1 = camera.project(ahead);
    (p1.y - p0.y).atan2(p1.x - p0.x).to_degrees() + offset_deg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::ScreenPoint;

    struct PlateCarree;
    impl CameraProjector for PlateCarree {
        fn project(&self, p: GeoPoint) -> ScreenPoint {
            ScreenPoint {
                x: p.lng * 10.0,
                y: -p.lat * 10.0,
            }
        }
    }

    fn spec() -> ArcSpec {
        ArcSpec::full(
            GeoPoint::new(47.0650, 34.3142),
            GeoPoint::new(42.4411, 33.7866),
            60.0,
            1800.0,
        )
    }

    #[test]
    fn endpoints_are_exact() {
        let s = spec();
        assert_eq!(point_at(&s, 0.0), s.start);
        assert_eq!(point_at(&s, 1.0), s.end);
    }

    #[test]
    fn curve_is_continuous() {
        let s = spec();
        let mut prev = point_at(&s, 0.0);
        let steps = 1000;
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let p = point_at(&s, t);
            let d = ((p.lng - prev.lng).powi(2) + (p.lat - prev.lat).powi(2)).sqrt();
            assert!(d < 0.05, "discontinuity at t={t}: step {d}");
            prev = p;
        }
    }

    #[test]
    fn arc_bows_away_from_chord() {
        let s = spec();
        let mid = point_at(&s, 0.5);
        let chord_mid = s.start.lerp(s.end, 0.5);
        assert!(mid.lat > chord_mid.lat);
        assert!(mid.lng > chord_mid.lng);
    }

    #[test]
    fn heading_eastward_with_up_sprite_offset() {
        // Flat west->east path at the equator: tangent points right in screen
        // space, so the heading is ~0 before offset and ~90 after.
        let s = ArcSpec {
            start: GeoPoint::new(0.0, 0.0),
            end: GeoPoint::new(10.0, 0.0),
            curve_target: GeoPoint::new(10.0, 0.0),
            size_px: 60.0,
            duration_ms: 1000.0,
        };
        let h = heading_at(&s, 0.5, &PlateCarree, 90.0);
        // Mid-arc on a biased curve is not exactly flat; stay loose.
        assert!((h - 90.0).abs() < 45.0, "heading {h}");
    }

    #[test]
    fn terminal_heading_uses_curve_target() {
        // Partial arc that stops halfway: the final heading must aim at the
        // full logical endpoint, not collapse to a degenerate sample.
        let start = GeoPoint::new(43.7631, 16.9403);
        let full_end = GeoPoint::new(34.9482, 29.5581);
        let s = ArcSpec {
            start,
            end: start.lerp(full_end, 0.55),
            curve_target: full_end,
            size_px: 70.0,
            duration_ms: 1800.0,
        };
        let h = heading_at(&s, 1.0, &PlateCarree, 0.0);
        assert!(h.is_finite());
        // Aimed north-west in geo terms: screen dx negative, dy negative.
        let here = PlateCarree.project(point_at(&s, 1.0));
        let tgt = PlateCarree.project(full_end);
        assert!(tgt.x < here.x && tgt.y < here.y);
    }
}
