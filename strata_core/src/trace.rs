// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the frame loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! engine instrumentation calls at each stage. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::motion::InputMode;
use crate::time::HostTime;
use crate::viewport::ViewportClass;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once per frame, after all smoothed channels stepped.
#[derive(Clone, Copy, Debug)]
pub struct FrameTickEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Host time when the tick was generated.
    pub now: HostTime,
    /// Raw progress the channels were retargeted to.
    pub progress: f64,
    /// Number of live layers evaluated.
    pub layer_count: usize,
}

/// Emitted per smoothed channel per frame.
#[derive(Clone, Copy, Debug)]
pub struct ChannelSampleEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Channel slot (insertion order).
    pub channel: usize,
    /// The target the channel is approaching.
    pub target: f64,
    /// The value after this frame's step.
    pub value: f64,
}

/// Emitted when the viewport class flips across the breakpoint.
#[derive(Clone, Copy, Debug)]
pub struct BreakpointEvent {
    /// Frame counter at which the new class took effect.
    pub frame_index: u64,
    /// Class before the flip.
    pub from: ViewportClass,
    /// Class after the flip.
    pub to: ViewportClass,
}

/// Emitted once when the secondary motion mode is resolved or disabled.
#[derive(Clone, Copy, Debug)]
pub struct MotionModeEvent {
    /// The resolved mode.
    pub mode: InputMode,
    /// False after a denied capability disabled the source.
    pub enabled: bool,
}

/// Emitted when the engine transitions between Idle and Tracking.
#[derive(Clone, Copy, Debug)]
pub struct LifecycleEvent {
    /// Frame counter at the transition (0 before the first tick).
    pub frame_index: u64,
    /// True on `start()`, false on `stop()`.
    pub tracking: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called once per frame tick.
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        _ = e;
    }

    /// Called per smoothed channel per frame.
    fn on_channel_sample(&mut self, e: &ChannelSampleEvent) {
        _ = e;
    }

    /// Called when the viewport class flips.
    fn on_breakpoint(&mut self, e: &BreakpointEvent) {
        _ = e;
    }

    /// Called when the motion mode is resolved or disabled.
    fn on_motion_mode(&mut self, e: &MotionModeEvent) {
        _ = e;
    }

    /// Called on `start()` and `stop()`.
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FrameTickEvent`].
    #[inline]
    pub fn frame_tick(&mut self, e: &FrameTickEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_tick(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ChannelSampleEvent`].
    #[inline]
    pub fn channel_sample(&mut self, e: &ChannelSampleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_channel_sample(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`BreakpointEvent`].
    #[inline]
    pub fn breakpoint(&mut self, e: &BreakpointEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_breakpoint(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MotionModeEvent`].
    #[inline]
    pub fn motion_mode(&mut self, e: &MotionModeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_motion_mode(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LifecycleEvent`].
    #[inline]
    pub fn lifecycle(&mut self, e: &LifecycleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_lifecycle(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
