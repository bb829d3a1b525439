// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer storage and per-frame evaluation.
//!
//! Evaluation is a full recompute: every live layer's position, scale, and
//! composed transform are derived from one [`LayerFrame`] snapshot. There
//! is no dirty tracking; the scene is small and every layer depends on the
//! same frame-wide inputs, so incremental recomputation would save nothing.
//!
//! [`LayerChanges`] uses raw slot indices (`u32`) rather than [`LayerId`]
//! handles so that presenters can index directly into the registry's SoA
//! arrays via the `*_at()` accessors without paying for generation checks
//! on every access.

use alloc::vec::Vec;

use crate::motion::MotionState;
use crate::transform::Transform3d;
use crate::viewport::ViewportClass;

use super::id::LayerId;
use super::spec::LayerSpec;

/// The frame-wide inputs every layer observes in one evaluation.
///
/// Built once per tick by the engine; a layer added mid-frame between two
/// ticks still sees the same snapshot as its neighbors on its first frame.
#[derive(Clone, Copy, Debug)]
pub struct LayerFrame {
    /// Current viewport class; selects the per-layer parameter set.
    pub class: ViewportClass,
    /// Camera-projected world width that sizes full-bleed layers.
    pub world_width: f64,
    /// Secondary motion state sampled at the start of the tick.
    pub motion: MotionState,
}

/// The per-evaluation change report.
///
/// `updated` lists every live slot (full recompute); `added` and `removed`
/// carry lifecycle transitions since the previous evaluation so presenters
/// can create and drop native objects incrementally.
#[derive(Clone, Debug, Default)]
pub struct LayerChanges {
    /// Slots whose transform was recomputed this frame, in slot order.
    pub updated: Vec<u32>,
    /// Slots inserted since the last evaluation.
    pub added: Vec<u32>,
    /// Slots removed since the last evaluation.
    pub removed: Vec<u32>,
}

impl LayerChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.updated.clear();
        self.added.clear();
        self.removed.clear();
    }
}

/// Struct-of-arrays storage for all layers.
///
/// Layers are addressed by [`LayerId`] handles. Internally each layer
/// occupies a slot in parallel arrays; removed layers are recycled via a
/// free list, and generation counters invalidate old handles. An empty
/// registry is a valid scene: evaluation reports nothing and presenters
/// render nothing.
#[derive(Debug, Default)]
pub struct LayerRegistry {
    // -- Immutable spec (set at insert) --
    spec: Vec<LayerSpec>,

    // -- Computed state (written by evaluate) --
    position: Vec<[f64; 3]>,
    scale: Vec<[f64; 3]>,
    transform: Vec<Transform3d>,

    // -- Allocation --
    generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,

    // -- Lifecycle tracking --
    pending_added: Vec<u32>,
    pending_removed: Vec<u32>,
}

impl LayerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a validated layer and returns its handle.
    ///
    /// Computed state starts at the origin with identity transform until
    /// the first evaluation.
    pub fn insert(&mut self, spec: LayerSpec) -> LayerId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.spec[idx as usize] = spec;
            self.position[idx as usize] = [0.0; 3];
            self.scale[idx as usize] = [1.0; 3];
            self.transform[idx as usize] = Transform3d::IDENTITY;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.spec.push(spec);
            self.position.push([0.0; 3]);
            self.scale.push([1.0; 3]);
            self.transform.push(Transform3d::IDENTITY);
            self.generation.push(0);
            idx
        };

        self.pending_added.push(idx);

        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Removes a layer, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove(&mut self, id: LayerId) {
        self.validate(id);
        let idx = id.idx;

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.pending_removed.push(idx);
    }

    /// Returns whether the given handle refers to a live layer.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Number of live layers.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Whether the scene currently holds no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }

    /// Returns the spec of a layer.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn spec(&self, id: LayerId) -> &LayerSpec {
        self.validate(id);
        &self.spec[id.idx as usize]
    }

    /// Returns the computed position of a layer.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has run.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn position(&self, id: LayerId) -> [f64; 3] {
        self.validate(id);
        self.position[id.idx as usize]
    }

    /// Returns the computed scale of a layer.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has run.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn scale(&self, id: LayerId) -> [f64; 3] {
        self.validate(id);
        self.scale[id.idx as usize]
    }

    /// Returns the composed transform of a layer.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has run.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn transform(&self, id: LayerId) -> Transform3d {
        self.validate(id);
        self.transform[id.idx as usize]
    }

    // -- Raw-index accessors for presenters --
    //
    // These accept raw slot indices (as found in `LayerChanges`) rather
    // than `LayerId` handles, skipping generation validation. Only use
    // with indices that came from `LayerChanges`.

    /// Returns the spec at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn spec_at(&self, idx: u32) -> &LayerSpec {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        &self.spec[idx as usize]
    }

    /// Returns the composed transform at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn transform_at(&self, idx: u32) -> Transform3d {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.transform[idx as usize]
    }

    /// Returns the computed position at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn position_at(&self, idx: u32) -> [f64; 3] {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.position[idx as usize]
    }

    /// Returns the computed scale at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn scale_at(&self, idx: u32) -> [f64; 3] {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.scale[idx as usize]
    }

    /// Evaluates all live layers against one frame snapshot, returning the
    /// change report.
    pub fn evaluate(&mut self, frame: &LayerFrame) -> LayerChanges {
        let mut changes = LayerChanges::default();
        self.evaluate_into(frame, &mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided
    /// buffer to avoid allocation.
    pub fn evaluate_into(&mut self, frame: &LayerFrame, changes: &mut LayerChanges) {
        changes.clear();

        for idx in 0..self.len {
            if self.free_list.contains(&idx) {
                continue;
            }
            let spec = &self.spec[idx as usize];

            // Atomic parameter swap: the whole set follows the class, no
            // interpolation across the breakpoint.
            let (class_offset_x, scale_multiplier) = match frame.class {
                ViewportClass::Desktop => (0.0, 1.0),
                ViewportClass::Mobile => (spec.mobile().offset_x, spec.mobile().scaling),
            };

            let x = class_offset_x + frame.motion.offset_x(spec.depth());
            let y = spec.pos_y();
            let z = spec.depth();

            let sx = frame.world_width * spec.scale_factor() * scale_multiplier;
            let sy = sx * spec.aspect();

            let transform = Transform3d::from_translation_scale(x, y, z, sx, sy, 1.0);
            debug_assert!(
                transform.is_finite(),
                "layer {idx} produced a non-finite transform"
            );

            self.position[idx as usize] = [x, y, z];
            self.scale[idx as usize] = [sx, sy, 1.0];
            self.transform[idx as usize] = transform;
            changes.updated.push(idx);
        }

        // Move lifecycle lists; `changes` was cleared above, so the swap
        // leaves the pending buffers empty.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    /// Panics if the handle is stale.
    fn validate(&self, id: LayerId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale LayerId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{ImageRef, MobileParams};
    use crate::motion::{InputMode, MotionConfig, MotionSample};

    fn spec(depth: f64, mobile: MobileParams) -> LayerSpec {
        LayerSpec::new(ImageRef(7), depth, 1.2, 0.5, -0.25, mobile).unwrap()
    }

    fn still_motion() -> MotionState {
        MotionState::new(InputMode::Pointer, MotionConfig::default())
    }

    fn frame(class: ViewportClass, world_width: f64) -> LayerFrame {
        LayerFrame {
            class,
            world_width,
            motion: still_motion(),
        }
    }

    #[test]
    fn insert_and_remove() {
        let mut reg = LayerRegistry::new();
        let id = reg.insert(spec(0.5, MobileParams::default()));
        assert!(reg.is_alive(id));
        assert_eq!(reg.live_count(), 1);
        reg.remove(id);
        assert!(!reg.is_alive(id));
        assert!(reg.is_empty());
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut reg = LayerRegistry::new();
        let id1 = reg.insert(spec(0.5, MobileParams::default()));
        reg.remove(id1);
        let id2 = reg.insert(spec(0.8, MobileParams::default()));
        // Same slot, different generation.
        assert_eq!(id1.index(), id2.index());
        assert_ne!(id1.generation(), id2.generation());
        assert!(!reg.is_alive(id1));
        assert!(reg.is_alive(id2));
    }

    #[test]
    #[should_panic(expected = "stale LayerId")]
    fn stale_handle_panics_on_spec() {
        let mut reg = LayerRegistry::new();
        let id = reg.insert(spec(0.5, MobileParams::default()));
        reg.remove(id);
        let _ = reg.spec(id);
    }

    #[test]
    fn empty_registry_evaluates_to_nothing() {
        let mut reg = LayerRegistry::new();
        let changes = reg.evaluate(&frame(ViewportClass::Desktop, 4.0));
        assert!(changes.updated.is_empty());
        assert!(changes.added.is_empty());
        assert!(changes.removed.is_empty());
    }

    #[test]
    fn lifecycle_reported_once() {
        let mut reg = LayerRegistry::new();
        let id = reg.insert(spec(0.5, MobileParams::default()));

        let changes = reg.evaluate(&frame(ViewportClass::Desktop, 4.0));
        assert!(changes.added.contains(&id.index()));

        let changes = reg.evaluate(&frame(ViewportClass::Desktop, 4.0));
        assert!(changes.added.is_empty(), "added must not repeat");

        reg.remove(id);
        let changes = reg.evaluate(&frame(ViewportClass::Desktop, 4.0));
        assert!(changes.removed.contains(&id.index()));
        assert!(changes.updated.is_empty());
    }

    #[test]
    fn desktop_ignores_mobile_overrides() {
        let mobile = MobileParams {
            offset_x: 0.45,
            scaling: 3.0,
        };
        let mut reg = LayerRegistry::new();
        let id = reg.insert(spec(0.5, mobile));

        let _ = reg.evaluate(&frame(ViewportClass::Desktop, 4.0));
        let pos = reg.position(id);
        let scale = reg.scale(id);
        assert_eq!(pos[0], 0.0, "desktop forces offset to zero");
        assert!((scale[0] - 4.0 * 1.2).abs() < 1e-12, "desktop multiplier is one");
    }

    #[test]
    fn breakpoint_swap_is_atomic() {
        let mobile = MobileParams {
            offset_x: 0.45,
            scaling: 3.0,
        };
        let mut reg = LayerRegistry::new();
        let id = reg.insert(spec(0.5, mobile));

        let _ = reg.evaluate(&frame(ViewportClass::Desktop, 4.0));
        let desktop_scale = reg.scale(id);

        let _ = reg.evaluate(&frame(ViewportClass::Mobile, 4.0));
        let mobile_pos = reg.position(id);
        let mobile_scale = reg.scale(id);

        // Both parameters flip together at the same frame.
        assert_eq!(mobile_pos[0], 0.45);
        assert!((mobile_scale[0] - desktop_scale[0] * 3.0).abs() < 1e-12);
    }

    #[test]
    fn scale_carries_image_aspect() {
        let mut reg = LayerRegistry::new();
        let id = reg.insert(spec(0.5, MobileParams::default()));
        let _ = reg.evaluate(&frame(ViewportClass::Desktop, 4.0));
        let scale = reg.scale(id);
        assert!((scale[1] - scale[0] * 0.5).abs() < 1e-12);
        assert_eq!(scale[2], 1.0);
    }

    #[test]
    fn motion_offset_lands_in_x() {
        let mut motion = still_motion();
        motion.feed(MotionSample::Pointer { x: 1.0, y: 0.0 });

        let mut reg = LayerRegistry::new();
        let id = reg.insert(spec(0.5, MobileParams::default()));
        let _ = reg.evaluate(&LayerFrame {
            class: ViewportClass::Desktop,
            world_width: 4.0,
            motion,
        });
        let pos = reg.position(id);
        assert!((pos[0] - 0.001 / 0.51).abs() < 1e-12);
        assert_eq!(pos[1], -0.25);
        assert_eq!(pos[2], 0.5);
    }

    #[test]
    fn transform_matches_position_and_scale() {
        let mut reg = LayerRegistry::new();
        let id = reg.insert(spec(0.5, MobileParams::default()));
        let _ = reg.evaluate(&frame(ViewportClass::Desktop, 4.0));

        let pos = reg.position(id);
        let scale = reg.scale(id);
        let t = reg.transform(id);
        assert_eq!(t.col(3), [pos[0], pos[1], pos[2], 1.0]);
        assert_eq!(t.col(0)[0], scale[0]);
        assert_eq!(t.col(1)[1], scale[1]);
    }

    #[test]
    fn evaluate_into_reuses_buffer() {
        let mut reg = LayerRegistry::new();
        let a = reg.insert(spec(0.5, MobileParams::default()));
        let _b = reg.insert(spec(0.8, MobileParams::default()));

        let mut changes = LayerChanges::default();
        reg.evaluate_into(&frame(ViewportClass::Desktop, 4.0), &mut changes);
        assert_eq!(changes.added.len(), 2);
        assert_eq!(changes.updated.len(), 2);

        reg.remove(a);
        reg.evaluate_into(&frame(ViewportClass::Desktop, 4.0), &mut changes);
        assert!(changes.added.is_empty(), "added should be cleared");
        assert_eq!(changes.removed, [a.index()]);
        assert_eq!(changes.updated.len(), 1);
    }
}
