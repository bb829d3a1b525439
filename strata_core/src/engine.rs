// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine: one scroll signal fanned out to channels and layers.
//!
//! [`Engine`] owns the scroll track, the smoothed channels, the motion
//! multiplexer, and the layer registry, and advances them together in
//! [`tick_into`](Engine::tick_into). Input setters only record raw values;
//! the tick is the sole writer of smoothed state and layer runtime state,
//! and every layer in a frame observes the same snapshot of channel values
//! and motion offset.
//!
//! The engine is either `Idle` or `Tracking`. While `Idle`, ticks and
//! input setters are no-ops rather than errors, so a late scroll event
//! after teardown is harmless by construction.

use alloc::vec::Vec;

use crate::layer::{LayerChanges, LayerFrame, LayerId, LayerRegistry, LayerSpec};
use crate::motion::{InputMode, MotionConfig, MotionSample, MotionState};
use crate::progress::{CoverTrack, ScrollTrack, TrackGeometry};
use crate::smooth::Smoothed;
use crate::time::HostTime;
use crate::trace::{
    BreakpointEvent, ChannelSampleEvent, FrameTickEvent, LifecycleEvent, MotionModeEvent, Tracer,
};
use crate::viewport::{Camera, Viewport, ViewportClass};

/// Tuning parameters for an engine instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Per-frame smoothing factor for every channel, in `(0, 1)`.
    pub smoothing: f64,
    /// Secondary motion sensitivities.
    pub motion: MotionConfig,
    /// Camera used to project layer sizes into world units.
    pub camera: Camera,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.1,
            motion: MotionConfig::default(),
            camera: Camera::default(),
        }
    }
}

/// A handle to a smoothed channel.
///
/// Channels are append-only, so a plain index suffices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelId(usize);

/// Whether the engine is advancing frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EngineState {
    Idle,
    Tracking,
}

/// The per-frame output snapshot consumed by presenters.
///
/// Reused across frames via [`Engine::tick_into`] to avoid per-frame
/// allocation once the vectors have grown to their working size.
#[derive(Clone, Debug, Default)]
pub struct FrameUpdate {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Raw progress the channels were retargeted to this frame.
    pub progress: f64,
    /// Smoothed channel values after this frame's step, in channel order.
    pub channels: Vec<f64>,
    /// Cover background position percentage.
    pub cover_bg_y: f64,
    /// Layer lifecycle and update report.
    pub layers: LayerChanges,
}

impl FrameUpdate {
    /// Clears per-frame contents, keeping allocations.
    pub fn clear(&mut self) {
        self.frame_index = 0;
        self.progress = 0.0;
        self.channels.clear();
        self.cover_bg_y = 0.0;
        self.layers.clear();
    }
}

/// Scroll-synchronized parallax engine.
#[derive(Debug)]
pub struct Engine {
    state: EngineState,
    config: EngineConfig,
    scroll: ScrollTrack,
    cover: CoverTrack,
    viewport: Viewport,
    last_class: Option<ViewportClass>,
    motion: MotionState,
    channels: Vec<Smoothed>,
    layers: LayerRegistry,
    frame_index: u64,
}

impl Engine {
    /// Creates an idle engine.
    ///
    /// The secondary motion mode is resolved here, once, from
    /// `orientation_available`; it never changes for the lifetime of the
    /// engine.
    #[must_use]
    pub fn new(
        config: EngineConfig,
        geometry: TrackGeometry,
        viewport: Viewport,
        orientation_available: bool,
    ) -> Self {
        let mode = InputMode::detect(orientation_available);
        Self {
            state: EngineState::Idle,
            config,
            scroll: ScrollTrack::new(geometry),
            cover: CoverTrack::new(viewport.height_px),
            viewport,
            last_class: None,
            motion: MotionState::new(mode, config.motion),
            channels: Vec::new(),
            layers: LayerRegistry::new(),
            frame_index: 0,
        }
    }

    // -- Lifecycle --

    /// Begins tracking. Emits the resolved motion mode and a lifecycle
    /// event.
    pub fn start(&mut self, tracer: &mut Tracer<'_>) {
        if self.state == EngineState::Tracking {
            return;
        }
        self.state = EngineState::Tracking;
        tracer.motion_mode(&MotionModeEvent {
            mode: self.motion.mode(),
            enabled: self.motion.is_enabled(),
        });
        tracer.lifecycle(&LifecycleEvent {
            frame_index: self.frame_index,
            tracking: true,
        });
    }

    /// Stops tracking. Later ticks and input setters become no-ops.
    pub fn stop(&mut self, tracer: &mut Tracer<'_>) {
        if self.state == EngineState::Idle {
            return;
        }
        self.state = EngineState::Idle;
        tracer.lifecycle(&LifecycleEvent {
            frame_index: self.frame_index,
            tracking: false,
        });
    }

    /// Whether the engine is currently advancing frames.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.state == EngineState::Tracking
    }

    // -- Structure (valid in any state) --

    /// Adds a smoothed channel mapping progress over `[from, to]`.
    ///
    /// The channel starts resting at `from` and uses the engine's
    /// smoothing factor.
    pub fn add_channel(&mut self, from: f64, to: f64) -> ChannelId {
        let id = ChannelId(self.channels.len());
        self.channels.push(Smoothed::new(from, to, self.config.smoothing));
        id
    }

    /// Current value of a channel.
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this engine.
    #[must_use]
    pub fn channel_value(&self, id: ChannelId) -> f64 {
        self.channels[id.0].value()
    }

    /// Inserts a validated layer into the scene.
    pub fn insert_layer(&mut self, spec: LayerSpec) -> LayerId {
        self.layers.insert(spec)
    }

    /// Removes a layer from the scene.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_layer(&mut self, id: LayerId) {
        self.layers.remove(id);
    }

    /// Read access to the layer registry, for presenters.
    #[must_use]
    pub fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    /// Fails the motion source closed after a denied capability.
    ///
    /// Works in any state; a permission denial must stick even if it
    /// arrives while the engine is idle.
    pub fn disable_motion(&mut self, tracer: &mut Tracer<'_>) {
        self.motion.disable();
        tracer.motion_mode(&MotionModeEvent {
            mode: self.motion.mode(),
            enabled: false,
        });
    }

    // -- Input setters (no-ops while idle) --

    /// Updates the scroll track geometry.
    pub fn set_track_geometry(&mut self, geometry: TrackGeometry) {
        if self.state == EngineState::Idle {
            return;
        }
        self.scroll.set_geometry(geometry);
    }

    /// Records the latest scroll position.
    pub fn set_scroll_pos(&mut self, scroll_pos: f64) {
        if self.state == EngineState::Idle {
            return;
        }
        self.scroll.set_scroll_pos(scroll_pos);
    }

    /// Records the latest viewport dimensions.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.state == EngineState::Idle {
            return;
        }
        self.viewport = viewport;
        self.cover.set_viewport_height(viewport.height_px);
    }

    /// Records the cover element's bounding-rect top.
    pub fn note_cover_rect_top(&mut self, rect_top: f64) {
        if self.state == EngineState::Idle {
            return;
        }
        self.cover.note_rect_top(rect_top);
    }

    /// Records a secondary motion sample.
    pub fn feed_motion(&mut self, sample: MotionSample) {
        if self.state == EngineState::Idle {
            return;
        }
        self.motion.feed(sample);
    }

    // -- The frame tick --

    /// Advances one frame, writing the output snapshot into `update`.
    ///
    /// Returns `false` without touching anything while idle. Otherwise:
    /// reads progress once, retargets and steps every channel against it,
    /// samples the cover track, and evaluates all layers against one
    /// frame-wide snapshot of viewport class, projected world width, and
    /// motion state.
    pub fn tick_into(
        &mut self,
        now: HostTime,
        tracer: &mut Tracer<'_>,
        update: &mut FrameUpdate,
    ) -> bool {
        if self.state == EngineState::Idle {
            return false;
        }

        let frame_index = self.frame_index;
        let progress = self.scroll.progress();

        update.clear();
        update.frame_index = frame_index;
        update.progress = progress;

        for (i, channel) in self.channels.iter_mut().enumerate() {
            channel.retarget(progress);
            let value = channel.step();
            update.channels.push(value);
            tracer.channel_sample(&ChannelSampleEvent {
                frame_index,
                channel: i,
                target: channel.target(),
                value,
            });
        }

        update.cover_bg_y = self.cover.background_position();

        let class = self.viewport.class();
        if let Some(prev) = self.last_class
            && prev != class
        {
            tracer.breakpoint(&BreakpointEvent {
                frame_index,
                from: prev,
                to: class,
            });
        }
        self.last_class = Some(class);

        let frame = LayerFrame {
            class,
            world_width: self.config.camera.world_width(&self.viewport),
            motion: self.motion,
        };
        self.layers.evaluate_into(&frame, &mut update.layers);

        tracer.frame_tick(&FrameTickEvent {
            frame_index,
            now,
            progress,
            layer_count: self.layers.live_count(),
        });

        self.frame_index += 1;
        true
    }
}
