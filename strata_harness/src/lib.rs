// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic scripted driving and settle metrics for demos and tests.
//!
//! [`ScriptedDriver`] advances an [`Engine`] on a synthetic fixed-interval
//! clock, replaying input events at chosen frames, so scenario tests run
//! identically everywhere with no browser in the loop. [`SettleTracker`]
//! watches channel residuals and reports when (and whether) the smoothing
//! settled. [`CountingPresenter`] counts `apply` calls, which is how
//! teardown tests prove that nothing renders after `stop()`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use strata_core::backend::Presenter;
use strata_core::engine::{Engine, FrameUpdate};
use strata_core::layer::LayerRegistry;
use strata_core::motion::MotionSample;
use strata_core::progress::TrackGeometry;
use strata_core::time::{Duration, HostTime};
use strata_core::trace::Tracer;
use strata_core::viewport::Viewport;

/// One scripted input, applied before the frame it is scheduled for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScriptEvent {
    /// New scroll position in pixels.
    Scroll(f64),
    /// New track geometry.
    Geometry(TrackGeometry),
    /// New viewport dimensions.
    Viewport(Viewport),
    /// A pointer or orientation sample.
    Motion(MotionSample),
    /// New cover bounding-rect top.
    CoverRectTop(f64),
    /// Transition to Tracking.
    Start,
    /// Transition to Idle.
    Stop,
    /// Fail the motion source closed.
    DisableMotion,
}

/// Drives an [`Engine`] on a synthetic clock.
///
/// Frames are spaced `frame_interval` apart starting at time zero; the
/// driver owns the engine and the current time, nothing else.
#[derive(Debug)]
pub struct ScriptedDriver {
    engine: Engine,
    now: HostTime,
    frame_interval: Duration,
}

impl ScriptedDriver {
    /// 60 Hz frame spacing in microsecond ticks.
    pub const INTERVAL_60HZ: Duration = Duration(16_667);

    /// Creates a driver at time zero with the given frame spacing.
    #[must_use]
    pub fn new(engine: Engine, frame_interval: Duration) -> Self {
        Self {
            engine,
            now: HostTime(0),
            frame_interval,
        }
    }

    /// The driven engine.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Mutable access for scene setup between frames.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// The synthetic current time.
    #[must_use]
    pub fn now(&self) -> HostTime {
        self.now
    }

    /// Applies one scripted input to the engine.
    pub fn apply(&mut self, event: ScriptEvent, tracer: &mut Tracer<'_>) {
        match event {
            ScriptEvent::Scroll(pos) => self.engine.set_scroll_pos(pos),
            ScriptEvent::Geometry(g) => self.engine.set_track_geometry(g),
            ScriptEvent::Viewport(v) => self.engine.set_viewport(v),
            ScriptEvent::Motion(s) => self.engine.feed_motion(s),
            ScriptEvent::CoverRectTop(top) => self.engine.note_cover_rect_top(top),
            ScriptEvent::Start => self.engine.start(tracer),
            ScriptEvent::Stop => self.engine.stop(tracer),
            ScriptEvent::DisableMotion => self.engine.disable_motion(tracer),
        }
    }

    /// Advances the clock one interval and ticks the engine.
    ///
    /// Returns whether a frame was produced (false while idle).
    pub fn step(&mut self, tracer: &mut Tracer<'_>, update: &mut FrameUpdate) -> bool {
        self.now = self
            .now
            .checked_add(self.frame_interval)
            .unwrap_or(self.now);
        self.engine.tick_into(self.now, tracer, update)
    }

    /// Steps `frames` times, returning how many frames were produced.
    pub fn run(&mut self, frames: u64, tracer: &mut Tracer<'_>, update: &mut FrameUpdate) -> u64 {
        let mut produced = 0;
        for _ in 0..frames {
            if self.step(tracer, update) {
                produced += 1;
            }
        }
        produced
    }
}

/// Aggregated report returned by [`SettleTracker::observe`].
#[derive(Clone, Copy, Debug)]
pub struct SettleReport {
    /// Whether the latest residual is inside the tolerance.
    pub settled: bool,
    /// Frame at which the residual first entered tolerance (and stayed
    /// until now), if any.
    pub settled_at: Option<u64>,
    /// Latest absolute residual.
    pub residual: f64,
    /// Total frames observed.
    pub total_frames: u64,
}

/// Rolling settle tracker with fixed-size residual history.
///
/// Feed it one absolute channel residual per frame; it remembers the
/// first frame after which the residual never left the tolerance band.
#[derive(Debug)]
pub struct SettleTracker<const N: usize> {
    residuals: [f64; N],
    cursor: usize,
    total_frames: u64,
    settled_at: Option<u64>,
    tolerance: f64,
}

impl<const N: usize> SettleTracker<N> {
    /// Creates a tracker that considers residuals below `tolerance`
    /// settled.
    #[must_use]
    pub const fn new(tolerance: f64) -> Self {
        Self {
            residuals: [0.0; N],
            cursor: 0,
            total_frames: 0,
            settled_at: None,
            tolerance,
        }
    }

    /// Observes one frame's absolute residual and returns an updated
    /// report.
    #[must_use]
    pub fn observe(&mut self, residual: f64) -> SettleReport {
        let residual = residual.abs();
        self.total_frames = self.total_frames.saturating_add(1);
        self.residuals[self.cursor % N] = residual;
        self.cursor = (self.cursor + 1) % N;

        if residual < self.tolerance {
            if self.settled_at.is_none() {
                self.settled_at = Some(self.total_frames);
            }
        } else {
            // Leaving the band resets the settle point.
            self.settled_at = None;
        }

        SettleReport {
            settled: self.settled_at.is_some(),
            settled_at: self.settled_at,
            residual,
            total_frames: self.total_frames,
        }
    }

    /// Returns ring-buffer residuals oldest→newest.
    #[must_use]
    pub fn residuals(&self) -> [f64; N] {
        let mut out = [0.0; N];
        let mut i = 0;
        while i < N {
            let idx = (self.cursor + i) % N;
            out[i] = self.residuals[idx];
            i += 1;
        }
        out
    }

    /// Returns an ASCII sparkline over `residuals()`.
    #[must_use]
    pub fn sparkline_ascii(&self, min: f64, max: f64) -> String {
        const LEVELS: &[u8] = b" .:-=+*#%@";
        let mut out = String::with_capacity(N);
        let mut i = 0;
        while i < N {
            let idx = (self.cursor + i) % N;
            let v = self.residuals[idx].clamp(min, max);
            let t = (v - min) / (max - min);
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "index is clamped to ASCII level count"
            )]
            let level = (t * (LEVELS.len() as f64 - 1.0) + 0.5) as usize;
            out.push(LEVELS[level] as char);
            i += 1;
        }
        out
    }
}

/// A [`Presenter`] that only counts.
///
/// Teardown tests assert the count stops moving after `stop()`.
#[derive(Debug, Default)]
pub struct CountingPresenter {
    applies: u64,
    last_frame_index: Option<u64>,
    last_channels: Vec<f64>,
}

impl CountingPresenter {
    /// Creates a presenter with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `apply` calls so far.
    #[must_use]
    pub fn applies(&self) -> u64 {
        self.applies
    }

    /// Frame index of the most recent apply.
    #[must_use]
    pub fn last_frame_index(&self) -> Option<u64> {
        self.last_frame_index
    }

    /// Channel values of the most recent apply.
    #[must_use]
    pub fn last_channels(&self) -> &[f64] {
        &self.last_channels
    }
}

impl Presenter for CountingPresenter {
    fn apply(&mut self, _layers: &LayerRegistry, update: &FrameUpdate) {
        self.applies += 1;
        self.last_frame_index = Some(update.frame_index);
        self.last_channels.clear();
        self.last_channels.extend_from_slice(&update.channels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::engine::EngineConfig;

    fn driver() -> ScriptedDriver {
        let geometry = TrackGeometry {
            start: 0.0,
            extent: 5000.0,
            viewport_extent: 1000.0,
        };
        let engine = Engine::new(
            EngineConfig::default(),
            geometry,
            Viewport::new(1920.0, 1080.0),
            false,
        );
        ScriptedDriver::new(engine, ScriptedDriver::INTERVAL_60HZ)
    }

    #[test]
    fn driver_clock_is_deterministic() {
        let mut d = driver();
        let mut update = FrameUpdate::default();
        let mut tracer = Tracer::none();

        d.apply(ScriptEvent::Start, &mut tracer);
        assert_eq!(d.run(3, &mut tracer, &mut update), 3);
        assert_eq!(d.now(), HostTime(3 * 16_667));
        assert_eq!(update.frame_index, 2);
    }

    #[test]
    fn idle_frames_produce_nothing() {
        let mut d = driver();
        let mut update = FrameUpdate::default();
        let mut tracer = Tracer::none();

        assert_eq!(d.run(5, &mut tracer, &mut update), 0);
        d.apply(ScriptEvent::Start, &mut tracer);
        assert_eq!(d.run(5, &mut tracer, &mut update), 5);
    }

    #[test]
    fn counting_presenter_stops_with_the_engine() {
        let mut d = driver();
        let ch = d.engine_mut().add_channel(0.0, -200.0);
        let mut update = FrameUpdate::default();
        let mut tracer = Tracer::none();
        let mut presenter = CountingPresenter::new();

        d.apply(ScriptEvent::Start, &mut tracer);
        d.apply(ScriptEvent::Scroll(2000.0), &mut tracer);
        for _ in 0..10 {
            if d.step(&mut tracer, &mut update) {
                presenter.apply(d.engine().layers(), &update);
            }
        }
        assert_eq!(presenter.applies(), 10);

        d.apply(ScriptEvent::Stop, &mut tracer);
        let settled_value = d.engine().channel_value(ch);
        for _ in 0..10 {
            if d.step(&mut tracer, &mut update) {
                presenter.apply(d.engine().layers(), &update);
            }
        }
        // No applies and no channel movement after stop.
        assert_eq!(presenter.applies(), 10);
        assert_eq!(d.engine().channel_value(ch), settled_value);
    }

    #[test]
    fn settle_tracker_finds_the_settle_frame() {
        let mut t = SettleTracker::<8>::new(0.5);
        let residuals = [10.0, 5.0, 2.0, 1.0, 0.4, 0.2, 0.1];
        let mut report = None;
        for r in residuals {
            report = Some(t.observe(r));
        }
        let report = report.unwrap();
        assert!(report.settled);
        assert_eq!(report.settled_at, Some(5));
    }

    #[test]
    fn settle_tracker_resets_on_excursion() {
        let mut t = SettleTracker::<8>::new(0.5);
        let _ = t.observe(0.1);
        let _ = t.observe(0.2);
        // A retarget kicks the residual back out of the band.
        let r = t.observe(30.0);
        assert!(!r.settled);
        let r = t.observe(0.1);
        assert_eq!(r.settled_at, Some(4));
    }

    #[test]
    fn sparkline_spans_levels() {
        let mut t = SettleTracker::<4>::new(0.5);
        for r in [0.0, 3.0, 7.0, 10.0] {
            let _ = t.observe(r);
        }
        let line = t.sparkline_ascii(0.0, 10.0);
        assert_eq!(line.len(), 4);
        assert!(line.starts_with(' '));
        assert!(line.ends_with('@'));
    }
}
