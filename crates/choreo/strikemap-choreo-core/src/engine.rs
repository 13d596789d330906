#![allow(dead_code)]
//! Engine: data ownership and the public tick API.
//!
//! Single cooperative scheduler: hosts call `update(now_ms, inputs, camera,
//! renderer)` once per display frame. Everything advances inside that call:
//! stagger launches, task stepping, join barriers, settle delays, overlay
//! expiry, and the autoplay continuation. Camera notifications are handled
//! synchronously in `notify_camera`, on the map collaborator's own cycle.
//!
//! Cancellation discipline: every choreography run carries a generation
//! number. A force-clear (manual scrub) destroys visuals, empties the stagger
//! queue, drops the active barrier, and bumps the generation, so completions
//! from a superseded run can never reach a newer barrier.

use crate::barrier::JoinBarrier;
use crate::camera::{CameraEvent, CameraProjector};
use crate::choreographer::{self, Impact, RED_SEA_GROUP};
use crate::config::Config;
use crate::dataset::{
    parse_records, AttackRecord, EventFrame, RawRecord, Side, SideConfig, IRAN_BASE_MARKER,
    US_BASE_MARKER,
};
use crate::error::CoreError;
use crate::inputs::{Command, Inputs};
use crate::outputs::{CoreEvent, Outputs};
use crate::overlay::{Lifetime, OverlayRegistry};
use crate::renderer::{Renderer, SpriteKind};
use crate::task::{AnimationTask, PendingLaunch, TaskId};
use crate::timeline::{PlaybackState, TimelineController};

const SIDE_BASE_GROUP: &str = "side-bases";
const ATTACK_MARKER_GROUP: &str = "attack-markers";
const BASE_MARKER_SIZE_PX: f64 = 50.0;

/// Style keys whose basemap is dark enough to want inverted sprites.
const DARK_STYLE_KEY: &str = "darkmatter";

/// One in-flight choreography: its barrier, pending impact placements, and
/// the settle window between barrier fire and completion.
#[derive(Debug)]
struct ActiveChoreo {
    index: usize,
    run: u64,
    barrier: JoinBarrier,
    impacts: Vec<Impact>,
    settle_ms: f64,
    settle_until: Option<f64>,
    autoplay: bool,
}

/// Engine (core). Owns all choreography state; camera and renderer are host
/// capabilities passed in per call, never stored.
pub struct Engine {
    cfg: Config,
    sides: SideConfig,

    // Owned data
    frames: Vec<EventFrame>,
    records: Vec<AttackRecord>,

    // Systems
    timeline: TimelineController,
    overlays: OverlayRegistry,
    tasks: Vec<AnimationTask>,
    pending: Vec<PendingLaunch>,
    active: Option<ActiveChoreo>,

    /// Current choreography run generation.
    run: u64,
    next_task: u32,
    style_key: String,
    /// Indices of rows dropped by the last `load_records`, flushed as
    /// `RecordSkipped` events on the next tick.
    pending_skips: Vec<usize>,

    // Per-tick outputs
    outputs: Outputs,
}

impl Engine {
    /// Create a new engine with the given config and default side lookup.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            sides: SideConfig::default(),
            frames: Vec::new(),
            records: Vec::new(),
            timeline: TimelineController::new(0),
            overlays: OverlayRegistry::new(),
            tasks: Vec::new(),
            pending: Vec::new(),
            active: None,
            run: 0,
            next_task: 0,
            style_key: "satellite".to_string(),
            pending_skips: Vec::new(),
            outputs: Outputs::default(),
        }
    }

    pub fn with_side_config(mut self, sides: SideConfig) -> Self {
        self.sides = sides;
        self
    }

    /// Load the ordered event sequence. Read-only afterwards; the timeline
    /// starts Idle at the terminal frame.
    pub fn load_timeline(&mut self, frames: Vec<EventFrame>) {
        let last = frames.len().saturating_sub(1);
        self.frames = frames;
        self.timeline = TimelineController::new(last);
    }

    /// Consume the cleaned dataset rows; malformed coordinates are skipped
    /// with a warning and reported as `RecordSkipped` events on the next
    /// tick. Markers materialize on the next `Load`/`StyleReloaded`
    /// notification.
    pub fn load_records(&mut self, rows: &[RawRecord]) {
        let parsed = parse_records(rows, &self.sides);
        self.records = parsed.records;
        self.pending_skips = parsed.skipped;
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.timeline.state()
    }

    pub fn frames(&self) -> &[EventFrame] {
        &self.frames
    }

    pub fn records(&self) -> &[AttackRecord] {
        &self.records
    }

    pub fn overlays(&self) -> &OverlayRegistry {
        &self.overlays
    }

    /// Running animation tasks (spawned, not yet complete).
    pub fn tasks_in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Launches still waiting out their stagger delay.
    pub fn pending_launches(&self) -> usize {
        self.pending.len()
    }

    pub fn style_key(&self) -> &str {
        &self.style_key
    }

    /// Step the simulation to wall-clock `now_ms` with the given inputs.
    pub fn update(
        &mut self,
        now_ms: f64,
        inputs: Inputs,
        camera: &dyn CameraProjector,
        renderer: &mut dyn Renderer,
    ) -> &Outputs {
        self.outputs.clear();

        // 0) Surface any rows dropped by the last dataset load.
        for index in self.pending_skips.drain(..) {
            self.outputs.push_event(CoreEvent::RecordSkipped { index });
        }

        // 1) Commands (scrub/autoplay/style); clears happen synchronously
        //    here, before any new spawn.
        for cmd in inputs.commands {
            self.apply_command(cmd, now_ms, camera, renderer);
        }

        // 2) Launch arcs whose stagger delay has elapsed, in schedule order.
        self.spawn_due_launches(now_ms, camera, renderer);

        // 3) Advance running tasks; route completions into the barrier.
        self.step_tasks(now_ms, camera, renderer);

        // 4) Close out a settled choreography (and chain autoplay).
        self.finish_settled(now_ms, camera, renderer);

        // 5) Expire transient overlays.
        self.overlays.expire(now_ms, renderer);

        &self.outputs
    }

    /// Synchronous camera notification handling. `CameraChange` repositions
    /// overlays immediately; `Load` and `StyleReloaded` also rebuild the
    /// dataset markers, since a style swap discards host layer state.
    pub fn notify_camera(
        &mut self,
        event: CameraEvent,
        camera: &dyn CameraProjector,
        renderer: &mut dyn Renderer,
    ) {
        match event {
            CameraEvent::CameraChange => self.overlays.reposition_all(camera, renderer),
            CameraEvent::Load => {
                self.rebuild_markers(camera, renderer);
            }
            CameraEvent::StyleReloaded { style_key } => {
                self.style_key = style_key;
                self.rebuild_markers(camera, renderer);
                self.overlays.reposition_all(camera, renderer);
            }
        }
    }

    fn apply_command(
        &mut self,
        cmd: Command,
        now_ms: f64,
        camera: &dyn CameraProjector,
        renderer: &mut dyn Renderer,
    ) {
        match cmd {
            Command::JumpTo { index } => {
                if self.frames.is_empty() {
                    log::warn!("jump ignored: no timeline loaded");
                    return;
                }
                if index > self.timeline.last_index() {
                    log::warn!(
                        "{}",
                        CoreError::IndexOutOfRange {
                            index,
                            last: self.timeline.last_index(),
                        }
                    );
                    return;
                }
                // Force-clear the previous index's in-flight work (and any
                // superseded autoplay continuation) before spawning anew.
                self.force_clear(renderer);
                if self.timeline.begin_scrub(index).is_ok() {
                    self.outputs.push_event(CoreEvent::TimelineJumped { index });
                    self.start_choreography(index, false, now_ms, camera, renderer);
                }
            }
            Command::PlayAll => {
                if self.frames.is_empty() {
                    log::warn!("autoplay ignored: no timeline loaded");
                    return;
                }
                self.force_clear(renderer);
                self.timeline.begin_autoplay();
                self.outputs.push_event(CoreEvent::AutoplayStarted);
                self.start_choreography(0, true, now_ms, camera, renderer);
            }
            Command::SetStyle { key } => {
                self.style_key = key.clone();
                self.outputs.push_event(CoreEvent::StyleChanged {
                    invert_sprites: key == DARK_STYLE_KEY,
                    key,
                });
            }
        }
    }

    /// Synchronously remove every visual element of the current run: running
    /// tasks, queued launches, and overlays owned by the outgoing index.
    /// Bumping the run generation invalidates the old barrier for good.
    fn force_clear(&mut self, renderer: &mut dyn Renderer) {
        for task in self.tasks.drain(..) {
            renderer.destroy(task.visual);
        }
        self.pending.clear();
        let prev = self.timeline.current_index();
        self.overlays.force_clear_owner(prev, renderer);
        if let Some(active) = self.active.take() {
            if active.index != prev {
                self.overlays.force_clear_owner(active.index, renderer);
            }
            log::debug!("force-cleared choreography for index {}", active.index);
        }
        self.run = self.run.wrapping_add(1);
    }

    fn start_choreography(
        &mut self,
        index: usize,
        autoplay: bool,
        now_ms: f64,
        camera: &dyn CameraProjector,
        renderer: &mut dyn Renderer,
    ) {
        let kind = match self.frames.get(index) {
            Some(frame) => frame.kind,
            None => return,
        };
        let plan = choreographer::plan(kind, &self.cfg);
        self.outputs
            .push_event(CoreEvent::ChoreographyStarted { index, kind });

        if let Some(overlay) = &plan.overlay {
            let items = overlay
                .positions
                .iter()
                .map(|p| {
                    (
                        *p,
                        SpriteKind::Circle {
                            color: overlay.color,
                            size_px: self.cfg.circle_size_px,
                        },
                    )
                })
                .collect();
            let lifetime = if overlay.persistent {
                Lifetime::Persistent
            } else {
                Lifetime::Transient {
                    expires_at_ms: now_ms + self.cfg.transient_overlay_ms,
                }
            };
            self.overlays.install_group(
                RED_SEA_GROUP,
                Some(index),
                items,
                lifetime,
                camera,
                renderer,
            );
        }

        for launch in &plan.launches {
            self.pending.push(PendingLaunch {
                launch_at_ms: now_ms + launch.offset_ms,
                spec: launch.spec.clone(),
                run: self.run,
            });
        }

        let mut barrier = JoinBarrier::new(plan.expected());
        let fired = barrier.try_fire();
        let settle_ms = plan.settle_ms;
        self.active = Some(ActiveChoreo {
            index,
            run: self.run,
            barrier,
            impacts: plan.impacts,
            settle_ms,
            settle_until: if fired {
                Some(now_ms + settle_ms)
            } else {
                None
            },
            autoplay,
        });
        if fired {
            self.place_impacts(index, now_ms, camera, renderer);
        }
    }

    fn spawn_due_launches(
        &mut self,
        now_ms: f64,
        camera: &dyn CameraProjector,
        renderer: &mut dyn Renderer,
    ) {
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].launch_at_ms > now_ms {
                i += 1;
                continue;
            }
            let launch = self.pending.remove(i);
            if launch.run != self.run {
                // Defensive: force_clear empties the queue, so a stale entry
                // here indicates a bug upstream. Drop it silently.
                log::debug!("dropping stale pending launch");
                continue;
            }
            let visual = renderer.create(
                SpriteKind::Projectile {
                    size_px: launch.spec.size_px,
                },
                camera.project(launch.spec.start),
            );
            let id = TaskId(self.next_task);
            self.next_task = self.next_task.wrapping_add(1);
            self.tasks
                .push(AnimationTask::new(id, launch.spec, visual, launch.run));
        }
    }

    fn step_tasks(
        &mut self,
        now_ms: f64,
        camera: &dyn CameraProjector,
        renderer: &mut dyn Renderer,
    ) {
        let mut finished: Vec<usize> = Vec::new();
        for (i, task) in self.tasks.iter_mut().enumerate() {
            if task.step(now_ms, camera, renderer, self.cfg.heading_offset_deg) {
                finished.push(i);
            }
        }
        for i in finished.into_iter().rev() {
            let task = self.tasks.remove(i);
            renderer.destroy(task.visual);
            self.on_task_complete(task.run, now_ms, camera, renderer);
        }
    }

    fn on_task_complete(
        &mut self,
        task_run: u64,
        now_ms: f64,
        camera: &dyn CameraProjector,
        renderer: &mut dyn Renderer,
    ) {
        if task_run != self.run {
            log::debug!("stale task completion ignored");
            return;
        }
        let (fired, index) = match &mut self.active {
            Some(active) if active.run == task_run => {
                let fired = active.barrier.complete();
                if fired {
                    active.settle_until = Some(now_ms + active.settle_ms);
                }
                (fired, active.index)
            }
            _ => {
                log::debug!("task completion with no owning choreography");
                return;
            }
        };
        if fired {
            self.place_impacts(index, now_ms, camera, renderer);
        }
    }

    /// Post-completion overlay placement: one transient impact ring per
    /// destination, exactly once per choreography.
    fn place_impacts(
        &mut self,
        index: usize,
        now_ms: f64,
        camera: &dyn CameraProjector,
        renderer: &mut dyn Renderer,
    ) {
        let impacts = match &mut self.active {
            Some(active) => std::mem::take(&mut active.impacts),
            None => return,
        };
        for impact in impacts {
            self.overlays.show_transient(
                Some(index),
                impact.position,
                impact.color,
                self.cfg.circle_size_px,
                self.cfg.transient_overlay_ms,
                now_ms,
                camera,
                renderer,
            );
            self.outputs.push_event(CoreEvent::ImpactMarked {
                position: impact.position,
                color: impact.color,
            });
        }
    }

    fn finish_settled(
        &mut self,
        now_ms: f64,
        camera: &dyn CameraProjector,
        renderer: &mut dyn Renderer,
    ) {
        let done = matches!(
            &self.active,
            Some(active)
                if active.barrier.is_fired()
                    && active.settle_until.is_some_and(|until| now_ms >= until)
        );
        if !done {
            return;
        }
        let active = match self.active.take() {
            Some(active) => active,
            None => return,
        };
        self.outputs.push_event(CoreEvent::ChoreographyCompleted {
            index: active.index,
        });
        if active.autoplay {
            if active.run != self.run {
                // Superseded continuation; never advances the timeline.
                log::debug!("dropping stale autoplay continuation");
                return;
            }
            match self.timeline.advance() {
                Some(next) => self.start_choreography(next, true, now_ms, camera, renderer),
                None => self.outputs.push_event(CoreEvent::AutoplayFinished),
            }
        } else {
            self.timeline.settle_idle();
        }
    }

    /// (Re)create the side-base and dataset marker groups. Idempotent; called
    /// on map load and after every style reload.
    fn rebuild_markers(&mut self, camera: &dyn CameraProjector, renderer: &mut dyn Renderer) {
        self.overlays.install_group(
            SIDE_BASE_GROUP,
            None,
            vec![
                (
                    US_BASE_MARKER,
                    SpriteKind::Marker {
                        side: Side::UsAligned,
                        size_px: BASE_MARKER_SIZE_PX,
                    },
                ),
                (
                    IRAN_BASE_MARKER,
                    SpriteKind::Marker {
                        side: Side::IranAligned,
                        size_px: BASE_MARKER_SIZE_PX,
                    },
                ),
            ],
            Lifetime::Persistent,
            camera,
            renderer,
        );
        let items: Vec<_> = self
            .records
            .iter()
            .map(|r| {
                (
                    r.position,
                    SpriteKind::Marker {
                        side: r.side,
                        size_px: self.cfg.marker_size_px,
                    },
                )
            })
            .collect();
        self.overlays.install_group(
            ATTACK_MARKER_GROUP,
            None,
            items,
            Lifetime::Persistent,
            camera,
            renderer,
        );
    }
}
