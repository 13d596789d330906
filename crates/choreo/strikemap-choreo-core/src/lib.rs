//! Headless choreography core for a strike-timeline map.
//!
//! The crate owns everything that is not pixels: the ordered event timeline,
//! per-event launch plans, quadratic-arc flight math, join barriers, overlay
//! lifecycles, and autoplay. Hosts supply two capabilities per tick, a
//! `CameraProjector` (geo to screen) and a `Renderer` (create/move/destroy
//! visuals), and read discrete `CoreEvent`s back out of `Outputs`.
//!
//! Typical host loop:
//!
//! ```ignore
//! let mut engine = Engine::new(Config::default());
//! engine.load_timeline(dataset::historical_timeline());
//! engine.load_records(&rows);
//! // each display frame:
//! let out = engine.update(now_ms, inputs, &camera, &mut renderer);
//! for ev in &out.events { /* update labels, buttons, sprite filters */ }
//! ```

pub mod barrier;
pub mod camera;
pub mod choreographer;
pub mod config;
pub mod curve;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod geo;
pub mod inputs;
pub mod outputs;
pub mod overlay;
pub mod renderer;
pub mod task;
pub mod timeline;

pub use barrier::JoinBarrier;
pub use camera::{CameraEvent, CameraProjector};
pub use choreographer::{ChoreoPlan, EventKind, RED_SEA_GROUP};
pub use config::Config;
pub use curve::{heading_at, point_at, ArcSpec};
pub use dataset::{
    historical_timeline, parse_records, AttackRecord, EventFrame, ParsedRecords, RawRecord, Side,
    SideConfig,
};
pub use engine::Engine;
pub use error::CoreError;
pub use geo::{parse_coordinate, GeoPoint, ScreenPoint};
pub use inputs::{Command, Inputs};
pub use outputs::{CoreEvent, Outputs};
pub use overlay::{Lifetime, OverlayId, OverlayRegistry};
pub use renderer::{OverlayColor, Renderer, SpriteKind, VisualId};
pub use task::{AnimationTask, PendingLaunch, TaskId};
pub use timeline::{PlaybackPhase, PlaybackState, TimelineController};
