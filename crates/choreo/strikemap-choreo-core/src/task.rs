#![allow(dead_code)]
//! Animation tasks: one time-driven visual element per projectile arc.
//!
//! Tasks are stepped once per display frame by the engine's cooperative
//! scheduler; between frames the whole state lives in the task struct. Speed
//! follows wall-clock frame timestamps, so refresh rate never changes flight
//! time. Progress is anchored to the first observed frame: it is always 0 on
//! that frame regardless of scheduling jitter before it.

use serde::{Deserialize, Serialize};

use crate::camera::CameraProjector;
use crate::curve::{heading_at, point_at, ArcSpec};
use crate::renderer::{Renderer, VisualId};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u32);

/// A launch waiting out its stagger delay. Spawned (visual created, task
/// registered) on the first tick at or past `launch_at_ms`.
#[derive(Clone, Debug)]
pub struct PendingLaunch {
    pub launch_at_ms: f64,
    pub spec: ArcSpec,
    /// Choreography run generation the launch belongs to.
    pub run: u64,
}

/// A running arc animation. Owned exclusively by the engine; never shared.
#[derive(Clone, Debug)]
pub struct AnimationTask {
    pub id: TaskId,
    pub spec: ArcSpec,
    pub visual: VisualId,
    pub start_ts: Option<f64>,
    pub progress: f64,
    /// Run generation captured at spawn; a completion whose generation no
    /// longer matches the engine's current run is stale and must not touch
    /// any barrier.
    pub run: u64,
}

impl AnimationTask {
    pub fn new(id: TaskId, spec: ArcSpec, visual: VisualId, run: u64) -> Self {
        Self {
            id,
            spec,
            visual,
            start_ts: None,
            progress: 0.0,
            run,
        }
    }

    /// Advance one frame: update progress from the wall clock and apply the
    /// current position/heading to the visual. Returns `true` when the task
    /// has reached progress 1.0 and should be retired.
    pub fn step(
        &mut self,
        now_ms: f64,
        camera: &dyn CameraProjector,
        renderer: &mut dyn Renderer,
        heading_offset_deg: f64,
    ) -> bool {
        let t = match self.start_ts {
            None => {
                self.start_ts = Some(now_ms);
                0.0
            }
            Some(start) if self.spec.duration_ms > 0.0 => {
                ((now_ms - start) / self.spec.duration_ms).min(1.0)
            }
            Some(_) => 1.0,
        };
        self.progress = t;
        let position = point_at(&self.spec, t);
        let heading = heading_at(&self.spec, t, camera, heading_offset_deg);
        renderer.update_transform(self.visual, camera.project(position), heading);
        t >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{GeoPoint, ScreenPoint};
    use crate::renderer::SpriteKind;

    struct Identity;
    impl CameraProjector for Identity {
        fn project(&self, p: GeoPoint) -> ScreenPoint {
            ScreenPoint { x: p.lng, y: p.lat }
        }
    }

    struct NullRenderer;
    impl Renderer for NullRenderer {
        fn create(&mut self, _: SpriteKind, _: ScreenPoint) -> VisualId {
            VisualId(0)
        }
        fn update_transform(&mut self, _: VisualId, _: ScreenPoint, _: f64) {}
        fn destroy(&mut self, _: VisualId) {}
    }

    fn task(duration_ms: f64) -> AnimationTask {
        let spec = ArcSpec::full(
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(10.0, 10.0),
            60.0,
            duration_ms,
        );
        AnimationTask::new(TaskId(0), spec, VisualId(0), 0)
    }

    #[test]
    fn first_frame_anchors_progress_zero() {
        let mut t = task(1000.0);
        // Large initial timestamp: still frame zero.
        assert!(!t.step(5_000.0, &Identity, &mut NullRenderer, 90.0));
        assert_eq!(t.progress, 0.0);
        assert!(!t.step(5_500.0, &Identity, &mut NullRenderer, 90.0));
        assert_eq!(t.progress, 0.5);
        assert!(t.step(6_000.0, &Identity, &mut NullRenderer, 90.0));
        assert_eq!(t.progress, 1.0);
    }

    #[test]
    fn progress_clamps_past_duration() {
        let mut t = task(1000.0);
        t.step(0.0, &Identity, &mut NullRenderer, 90.0);
        assert!(t.step(10_000.0, &Identity, &mut NullRenderer, 90.0));
        assert_eq!(t.progress, 1.0);
    }

    #[test]
    fn zero_duration_completes_on_second_frame() {
        let mut t = task(0.0);
        assert!(!t.step(100.0, &Identity, &mut NullRenderer, 90.0));
        assert!(t.step(116.0, &Identity, &mut NullRenderer, 90.0));
    }
}
