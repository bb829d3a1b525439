// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted run of the seven-layer shoreline scene.
//!
//! Drives the engine through a scroll ramp, a desktop-to-mobile breakpoint
//! flip, and a pointer nudge, while a [`PrintSink`] logs engine events and a
//! [`SettleTracker`](strata_harness::SettleTracker) watches the track channel
//! converge. Prints per-layer transforms and an ASCII residual sparkline at
//! the end.

use strata_core::engine::{Engine, EngineConfig, FrameUpdate};
use strata_core::layer::{ImageRef, LayerId, LayerSpec, MobileParams};
use strata_core::motion::MotionSample;
use strata_core::progress::TrackGeometry;
use strata_core::trace::{
    BreakpointEvent, ChannelSampleEvent, FrameTickEvent, LifecycleEvent, MotionModeEvent,
    TraceSink, Tracer,
};
use strata_core::viewport::Viewport;

use strata_harness::{ScriptEvent, ScriptedDriver, SettleTracker};

const TOTAL_FRAMES: u64 = 360;
/// Frames over which the scripted scroll ramps from top to bottom.
const RAMP_FRAMES: u64 = 180;
/// Frame at which the viewport flips from desktop to mobile.
const FLIP_FRAME: u64 = 240;
/// Frame at which a pointer sample nudges the secondary motion input.
const POINTER_FRAME: u64 = 260;

/// Track channel endpoint: the scene strip slides 200vw to the left.
const TRACK_TO: f64 = -200.0;
/// Splash channel endpoint, in percent.
const SPLASH_TO: f64 = 50.0;

const DESKTOP: Viewport = Viewport {
    width_px: 1440.0,
    height_px: 900.0,
};
const MOBILE: Viewport = Viewport {
    width_px: 390.0,
    height_px: 844.0,
};

/// Source images are 1456x816, so every layer shares one height/width ratio.
const IMAGE_ASPECT: f64 = 816.0 / 1456.0;

fn main() {
    // -- sink + tracer -----------------------------------------------------
    let mut sink = PrintSink::default();

    // -- engine ------------------------------------------------------------
    let geometry = TrackGeometry {
        start: 0.0,
        extent: 6000.0,
        viewport_extent: DESKTOP.height_px,
    };
    let mut engine = Engine::new(EngineConfig::default(), geometry, DESKTOP, false);

    let track = engine.add_channel(0.0, TRACK_TO);
    let splash = engine.add_channel(0.0, SPLASH_TO);

    let layers = shoreline_layers(&mut engine);

    // -- scripted loop -----------------------------------------------------
    let mut driver = ScriptedDriver::new(engine, ScriptedDriver::INTERVAL_60HZ);
    let mut update = FrameUpdate::default();
    let mut tracker = SettleTracker::<64>::new(0.5);

    {
        let mut tracer = Tracer::new(&mut sink);
        driver.apply(ScriptEvent::Start, &mut tracer);

        let scrollable = geometry.extent - geometry.viewport_extent;
        let mut last_report = None;

        for frame in 0..TOTAL_FRAMES {
            if frame < RAMP_FRAMES {
                let scroll = scrollable * (frame + 1) as f64 / RAMP_FRAMES as f64;
                driver.apply(ScriptEvent::Scroll(scroll), &mut tracer);
                // The cover section scrolls out of view over the same ramp.
                let rect_top = DESKTOP.height_px * (1.0 - 2.0 * scroll / scrollable);
                driver.apply(ScriptEvent::CoverRectTop(rect_top), &mut tracer);
            }
            if frame == FLIP_FRAME {
                driver.apply(ScriptEvent::Viewport(MOBILE), &mut tracer);
                driver.apply(
                    ScriptEvent::Geometry(TrackGeometry {
                        viewport_extent: MOBILE.height_px,
                        ..geometry
                    }),
                    &mut tracer,
                );
            }
            if frame == POINTER_FRAME {
                driver.apply(
                    ScriptEvent::Motion(MotionSample::Pointer { x: 0.6, y: -0.2 }),
                    &mut tracer,
                );
            }

            assert!(driver.step(&mut tracer, &mut update), "engine is tracking");

            // Residual on the track channel: distance from the value the
            // smoothing is chasing this frame.
            let target = TRACK_TO * update.progress;
            last_report = Some(tracker.observe(target - update.channels[0]));
        }

        driver.apply(ScriptEvent::Stop, &mut tracer);

        // -- report --------------------------------------------------------
        let engine = driver.engine();
        println!();
        println!(
            "after {TOTAL_FRAMES} frames: progress {:.4}, track {:.3}vw (target {TRACK_TO}), splash {:.3}% (target {SPLASH_TO})",
            update.progress,
            engine.channel_value(track),
            engine.channel_value(splash),
        );
        println!("cover background-position-y: {:.2}%", update.cover_bg_y);

        for (name, id) in &layers {
            let pos = engine.layers().position(*id);
            let scale = engine.layers().scale(*id);
            println!(
                "  {name:<10} pos [{:+.4}, {:+.4}, {:.3}]  scale [{:.3}, {:.3}]",
                pos[0], pos[1], pos[2], scale[0], scale[1],
            );
        }

        let report = last_report.expect("loop ran at least one frame");
        println!(
            "track residual settled: {} (first in-band frame: {:?}, residual {:.4})",
            report.settled, report.settled_at, report.residual,
        );
        println!("residual, last 64 frames: [{}]", tracker.sparkline_ascii(0.0, 2.0));
    }

    println!(
        "events: {} ticks, {} channel samples, {} breakpoint flips",
        sink.ticks, sink.samples, sink.breakpoints,
    );
}

/// Builds the seven shoreline layers, back to front, and returns their
/// handles with display names.
fn shoreline_layers(engine: &mut Engine) -> Vec<(&'static str, LayerId)> {
    let flat = MobileParams::default();
    // The fog sheet needs to oversize on narrow screens to keep its edges
    // off-viewport while the pointer parallax shifts it.
    let fog = MobileParams {
        offset_x: 0.0,
        scaling: 3.0,
    };

    let specs = [
        ("sky", 0.99, 1.0, 0.0, flat),
        ("horizon", 0.95, 1.0, 0.0, flat),
        ("cliffs", 0.9, 1.0, 0.0, flat),
        ("shore", 0.85, 1.0, 0.0, flat),
        ("fog", 0.825, 1.0, 0.1, fog),
        ("foreground", 0.8, 1.0, 0.0, flat),
        ("moon", 0.0, 0.08, 1.2, flat),
    ];

    specs
        .iter()
        .enumerate()
        .map(|(i, &(name, depth, scale_factor, pos_y, mobile))| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "seven layers fit in u32"
            )]
            let image = ImageRef(i as u32);
            let spec = LayerSpec::new(image, depth, scale_factor, IMAGE_ASPECT, pos_y, mobile)
                .expect("shoreline layer parameters are in range");
            (name, engine.insert_layer(spec))
        })
        .collect()
}

/// Prints engine events as they happen, with frame ticks sampled down to one
/// line per second.
#[derive(Debug, Default)]
struct PrintSink {
    ticks: u64,
    samples: u64,
    breakpoints: u64,
}

impl TraceSink for PrintSink {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        self.ticks += 1;
        if e.frame_index % 60 == 0 {
            println!(
                "frame {:>3}  t={:>9}us  progress {:.4}  layers {}",
                e.frame_index, e.now.0, e.progress, e.layer_count,
            );
        }
    }

    fn on_channel_sample(&mut self, e: &ChannelSampleEvent) {
        self.samples += 1;
        if e.frame_index % 60 == 0 {
            println!(
                "  channel {}  target {:>9.3}  value {:>9.3}",
                e.channel, e.target, e.value,
            );
        }
    }

    fn on_breakpoint(&mut self, e: &BreakpointEvent) {
        self.breakpoints += 1;
        println!(
            "frame {:>3}  breakpoint {:?} -> {:?}",
            e.frame_index, e.from, e.to,
        );
    }

    fn on_motion_mode(&mut self, e: &MotionModeEvent) {
        println!("motion mode {:?} (enabled: {})", e.mode, e.enabled);
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        let verb = if e.tracking { "start" } else { "stop" };
        println!("frame {:>3}  {verb}", e.frame_index);
    }
}
