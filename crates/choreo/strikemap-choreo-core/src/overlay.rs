#![allow(dead_code)]
//! Overlay Registry: camera-tracked screen-space decorations.
//!
//! Every overlay is subscribed to camera-change notifications while it lives;
//! removal unsubscribes exactly once whether it happens via timeout,
//! group teardown, or a scrub's force-clear. Repositioning never mutates the
//! subscription list, so camera callbacks are reentrant-safe.

use std::collections::HashMap;

use crate::camera::CameraProjector;
use crate::geo::GeoPoint;
use crate::renderer::{OverlayColor, Renderer, SpriteKind, VisualId};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct OverlayId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Lifetime {
    /// Self-removes once the wall clock passes `expires_at_ms`.
    Transient { expires_at_ms: f64 },
    /// Survives until an explicit group teardown or owner force-clear.
    Persistent,
}

#[derive(Clone, Debug)]
struct Overlay {
    id: OverlayId,
    visual: VisualId,
    position: GeoPoint,
    kind: SpriteKind,
    lifetime: Lifetime,
    /// Timeline index whose handler spawned this overlay, if any. Dataset
    /// markers carry no owner and survive scrubs.
    owner: Option<usize>,
    group: Option<String>,
    subscribed: bool,
}

/// Owns all live decorations and their camera subscriptions.
#[derive(Default)]
pub struct OverlayRegistry {
    items: Vec<Overlay>,
    /// Logical group name -> overlay ids. At most one live set per name.
    groups: HashMap<String, Vec<OverlayId>>,
    next_id: u32,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn insert(
        &mut self,
        position: GeoPoint,
        kind: SpriteKind,
        lifetime: Lifetime,
        owner: Option<usize>,
        group: Option<String>,
        camera: &dyn CameraProjector,
        renderer: &mut dyn Renderer,
    ) -> OverlayId {
        let id = self.alloc();
        let visual = renderer.create(kind.clone(), camera.project(position));
        self.items.push(Overlay {
            id,
            visual,
            position,
            kind,
            lifetime,
            owner,
            group,
            subscribed: true,
        });
        id
    }

    /// Show a decoration that self-removes after `duration_ms`.
    pub fn show_transient(
        &mut self,
        owner: Option<usize>,
        position: GeoPoint,
        color: OverlayColor,
        size_px: f64,
        duration_ms: f64,
        now_ms: f64,
        camera: &dyn CameraProjector,
        renderer: &mut dyn Renderer,
    ) -> OverlayId {
        self.insert(
            position,
            SpriteKind::Circle { color, size_px },
            Lifetime::Transient {
                expires_at_ms: now_ms + duration_ms,
            },
            owner,
            None,
            camera,
            renderer,
        )
    }

    /// Install a persistent circle group under a logical name. Any previous
    /// instance of the same group is torn down first: an idempotent replace,
    /// never a duplicate. The name itself is the teardown handle.
    pub fn show_persistent_group(
        &mut self,
        name: &str,
        owner: Option<usize>,
        positions: &[GeoPoint],
        color: OverlayColor,
        size_px: f64,
        camera: &dyn CameraProjector,
        renderer: &mut dyn Renderer,
    ) {
        let items = positions
            .iter()
            .map(|p| (*p, SpriteKind::Circle { color, size_px }))
            .collect();
        self.install_group(name, owner, items, Lifetime::Persistent, camera, renderer);
    }

    /// Generic group install (circles, marker pins) with a shared lifetime.
    /// Replaces any previous instance of the name.
    pub fn install_group(
        &mut self,
        name: &str,
        owner: Option<usize>,
        items: Vec<(GeoPoint, SpriteKind)>,
        lifetime: Lifetime,
        camera: &dyn CameraProjector,
        renderer: &mut dyn Renderer,
    ) {
        self.teardown_group(name, renderer);
        let ids: Vec<OverlayId> = items
            .into_iter()
            .map(|(position, kind)| {
                self.insert(
                    position,
                    kind,
                    lifetime,
                    owner,
                    Some(name.to_string()),
                    camera,
                    renderer,
                )
            })
            .collect();
        self.groups.insert(name.to_string(), ids);
    }

    /// Tear down a named group. A no-op for unknown names, so calling a
    /// teardown handle twice is safe.
    pub fn teardown_group(&mut self, name: &str, renderer: &mut dyn Renderer) {
        if let Some(ids) = self.groups.remove(name) {
            self.remove_ids(&ids, renderer);
        }
    }

    /// Remove transient overlays whose lifetime has elapsed.
    pub fn expire(&mut self, now_ms: f64, renderer: &mut dyn Renderer) {
        let due: Vec<OverlayId> = self
            .items
            .iter()
            .filter(|o| matches!(o.lifetime, Lifetime::Transient { expires_at_ms } if now_ms >= expires_at_ms))
            .map(|o| o.id)
            .collect();
        self.remove_ids(&due, renderer);
    }

    /// Remove every overlay spawned by the given timeline index's handler,
    /// including persistent groups it owns. Synchronous; used by scrubs.
    pub fn force_clear_owner(&mut self, owner: usize, renderer: &mut dyn Renderer) {
        let ids: Vec<OverlayId> = self
            .items
            .iter()
            .filter(|o| o.owner == Some(owner))
            .map(|o| o.id)
            .collect();
        self.remove_ids(&ids, renderer);
    }

    /// Reposition every subscribed overlay against the current camera.
    /// Read-only over the subscription list: safe to call from inside the
    /// map collaborator's event cycle.
    pub fn reposition_all(&self, camera: &dyn CameraProjector, renderer: &mut dyn Renderer) {
        for o in self.items.iter().filter(|o| o.subscribed) {
            renderer.update_transform(o.visual, camera.project(o.position), 0.0);
        }
    }

    fn remove_ids(&mut self, ids: &[OverlayId], renderer: &mut dyn Renderer) {
        for overlay in self.items.iter_mut().filter(|o| ids.contains(&o.id)) {
            // Unsubscribe exactly once; a second removal path finding the
            // flag already cleared is a no-op, not an error.
            if overlay.subscribed {
                overlay.subscribed = false;
                renderer.destroy(overlay.visual);
            }
        }
        self.items.retain(|o| !ids.contains(&o.id));
        self.groups.retain(|_, members| {
            members.retain(|m| !ids.contains(m));
            !members.is_empty()
        });
    }

    pub fn live_count(&self) -> usize {
        self.items.len()
    }

    pub fn subscribed_count(&self) -> usize {
        self.items.iter().filter(|o| o.subscribed).count()
    }

    pub fn group_len(&self, name: &str) -> usize {
        self.groups.get(name).map_or(0, Vec::len)
    }
}
