#![allow(dead_code)]
//! Event choreography dispatch: each timeline event maps to a static launch
//! plan: the arcs to fire, the impact markers to place once the join barrier
//! opens, any region overlay group, and the settle delay before the event
//! counts as finished.
//!
//! Dispatch is an exhaustive match on `EventKind`; there is no stringly-typed
//! fallback. The terminal `Current` variant is the synchronous step that only
//! installs the persistent region group.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::curve::ArcSpec;
use crate::geo::GeoPoint;
use crate::renderer::OverlayColor;

/// The closed set of choreographed timeline events.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    Strike20200108,
    BaghdadTanf,
    SaadaEilatCrossfire,
    RedSeaStrike,
    Current,
}

// Launch and impact sites.
const KERMANSHAH: GeoPoint = GeoPoint::new(47.0650, 34.3142);
const ASAD_BASE: GeoPoint = GeoPoint::new(42.4411, 33.7866);
const ERBIL_AIRPORT: GeoPoint = GeoPoint::new(43.9632, 36.2381);
const BAGHDAD_SOUTH: GeoPoint = GeoPoint::new(44.3661, 32.9122);
const TANF_BASE: GeoPoint = GeoPoint::new(38.6150, 33.4406);
const SAADA: GeoPoint = GeoPoint::new(43.7631, 16.9403);
const EILAT: GeoPoint = GeoPoint::new(34.9482, 29.5581);

/// Three-circle Red Sea region group.
const RED_SEA_POSITIONS: [GeoPoint; 3] = [
    GeoPoint::new(38.5, 20.5),
    GeoPoint::new(40.0, 19.5),
    GeoPoint::new(41.5, 21.0),
];

pub const RED_SEA_GROUP: &str = "red-sea";

const VOLLEY_COUNT: usize = 10;
const VOLLEY_SIZE_PX: f64 = 60.0;
const SINGLE_SIZE_PX: f64 = 80.0;
const CROSSFIRE_SIZE_PX: f64 = 70.0;

/// One scheduled sub-animation: an arc departing `offset_ms` after the
/// choreography starts. Staggered launches toward a shared destination are
/// independent entries that each contribute one unit to the barrier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    pub offset_ms: f64,
    pub spec: ArcSpec,
}

/// An impact marker placed after every sub-animation has completed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    pub position: GeoPoint,
    pub color: OverlayColor,
}

/// A region overlay group shown when the choreography starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayPlan {
    pub positions: Vec<GeoPoint>,
    pub color: OverlayColor,
    pub persistent: bool,
}

/// Everything one event spawns, known statically per kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChoreoPlan {
    pub launches: Vec<Launch>,
    pub impacts: Vec<Impact>,
    pub overlay: Option<OverlayPlan>,
    pub settle_ms: f64,
}

impl ChoreoPlan {
    /// Barrier size: every launch contributes exactly one unit.
    pub fn expected(&self) -> u32 {
        self.launches.len() as u32
    }
}

/// Build the launch plan for an event kind.
pub fn plan(kind: EventKind, cfg: &Config) -> ChoreoPlan {
    match kind {
        EventKind::Strike20200108 => {
            let mut launches = Vec::with_capacity(VOLLEY_COUNT + 2);
            for i in 0..VOLLEY_COUNT {
                launches.push(Launch {
                    offset_ms: i as f64 * cfg.stagger_ms,
                    spec: ArcSpec::full(
                        KERMANSHAH,
                        ASAD_BASE,
                        VOLLEY_SIZE_PX,
                        cfg.flight_duration_ms,
                    ),
                });
            }
            // The two Erbil arcs depart after the full Asad volley.
            for i in 0..2 {
                launches.push(Launch {
                    offset_ms: (VOLLEY_COUNT + i) as f64 * cfg.stagger_ms,
                    spec: ArcSpec::full(
                        KERMANSHAH,
                        ERBIL_AIRPORT,
                        VOLLEY_SIZE_PX,
                        cfg.flight_duration_ms,
                    ),
                });
            }
            ChoreoPlan {
                launches,
                impacts: vec![
                    Impact {
                        position: ASAD_BASE,
                        color: OverlayColor::Blue,
                    },
                    Impact {
                        position: ERBIL_AIRPORT,
                        color: OverlayColor::Blue,
                    },
                ],
                overlay: None,
                settle_ms: cfg.settle_delay_ms,
            }
        }
        EventKind::BaghdadTanf => ChoreoPlan {
            launches: vec![Launch {
                offset_ms: 0.0,
                spec: ArcSpec::full(
                    BAGHDAD_SOUTH,
                    TANF_BASE,
                    SINGLE_SIZE_PX,
                    cfg.flight_duration_ms,
                ),
            }],
            impacts: vec![Impact {
                position: TANF_BASE,
                color: OverlayColor::Red,
            }],
            overlay: None,
            settle_ms: cfg.settle_delay_ms,
        },
        EventKind::SaadaEilatCrossfire => {
            let toward_eilat = SAADA.lerp(EILAT, cfg.partial_fraction);
            let toward_saada = EILAT.lerp(SAADA, cfg.partial_fraction);
            ChoreoPlan {
                launches: vec![
                    Launch {
                        offset_ms: 0.0,
                        spec: ArcSpec {
                            start: SAADA,
                            end: toward_eilat,
                            curve_target: EILAT,
                            size_px: CROSSFIRE_SIZE_PX,
                            duration_ms: cfg.flight_duration_ms,
                        },
                    },
                    Launch {
                        offset_ms: 0.0,
                        spec: ArcSpec {
                            start: EILAT,
                            end: toward_saada,
                            curve_target: SAADA,
                            size_px: CROSSFIRE_SIZE_PX,
                            duration_ms: cfg.flight_duration_ms,
                        },
                    },
                ],
                impacts: vec![
                    Impact {
                        position: toward_eilat,
                        color: OverlayColor::Blue,
                    },
                    Impact {
                        position: toward_saada,
                        color: OverlayColor::Red,
                    },
                ],
                overlay: None,
                settle_ms: cfg.settle_delay_ms,
            }
        }
        EventKind::RedSeaStrike => ChoreoPlan {
            launches: Vec::new(),
            impacts: Vec::new(),
            overlay: Some(OverlayPlan {
                positions: RED_SEA_POSITIONS.to_vec(),
                color: OverlayColor::Blue,
                persistent: false,
            }),
            settle_ms: 0.0,
        },
        EventKind::Current => ChoreoPlan {
            launches: Vec::new(),
            impacts: Vec::new(),
            overlay: Some(OverlayPlan {
                positions: RED_SEA_POSITIONS.to_vec(),
                color: OverlayColor::Blue,
                persistent: true,
            }),
            settle_ms: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volley_counts_and_stagger_schedule() {
        let cfg = Config::default();
        let p = plan(EventKind::Strike20200108, &cfg);
        assert_eq!(p.expected(), 12);
        for (i, l) in p.launches.iter().enumerate() {
            assert_eq!(l.offset_ms, i as f64 * cfg.stagger_ms);
        }
        assert_eq!(p.launches[9].spec.end, ASAD_BASE);
        assert_eq!(p.launches[10].spec.end, ERBIL_AIRPORT);
        assert_eq!(p.impacts.len(), 2);
    }

    #[test]
    fn crossfire_partials_at_55_percent() {
        let cfg = Config::default();
        let p = plan(EventKind::SaadaEilatCrossfire, &cfg);
        assert_eq!(p.expected(), 2);
        let expected = GeoPoint::new(
            43.7631 + (34.9482 - 43.7631) * 0.55,
            16.9403 + (29.5581 - 16.9403) * 0.55,
        );
        assert_eq!(p.launches[0].spec.end, expected);
        assert_eq!(p.launches[0].spec.curve_target, EILAT);
        assert_eq!(p.impacts[0].position, expected);
    }

    #[test]
    fn region_kinds_are_synchronous_steps() {
        let cfg = Config::default();
        for kind in [EventKind::RedSeaStrike, EventKind::Current] {
            let p = plan(kind, &cfg);
            assert_eq!(p.expected(), 0);
            assert_eq!(p.settle_ms, 0.0);
            let overlay = p.overlay.expect("region overlay");
            assert_eq!(overlay.positions.len(), 3);
            assert_eq!(overlay.persistent, kind == EventKind::Current);
        }
    }
}
