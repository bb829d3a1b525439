// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-synchronized multi-layer parallax engine.
//!
//! `strata_core` turns one continuous scroll signal into a coherent set of
//! per-frame outputs: a smoothed horizontal gallery offset, per-layer 3-D
//! transforms at different apparent depths blended with pointer or
//! device-orientation motion, and viewport-breakpoint parameter swaps. It
//! is `no_std` compatible (with `alloc`) and leaves all platform I/O to
//! backend crates.
//!
//! # Architecture
//!
//! The crate is organized around a frame loop that fans one progress value
//! out to every consumer:
//!
//! ```text
//!   Backend (tick source, input events)
//!       │ raw inputs (scroll pos, viewport, pointer/tilt)
//!       ▼
//!   Engine::tick_into()
//!       │
//!       ├──► ScrollTrack ──► progress ──► Smoothed channels
//!       ├──► CoverTrack ──► background position
//!       └──► LayerRegistry::evaluate() ──► per-layer Transform3d
//!                                               │
//!   FrameUpdate ──► Presenter::apply() ◄────────┘
//! ```
//!
//! **[`progress`]** — Scroll geometry to normalized progress, plus the
//! cover background-position track.
//!
//! **[`smooth`]** — Exponential-approach smoothing; N independent channels
//! step against one progress snapshot per frame.
//!
//! **[`motion`]** — Pointer/orientation multiplexer with the
//! depth-dependent sensitivity curve; fails closed on denied capability.
//!
//! **[`layer`]** — Flat struct-of-arrays layer registry with generational
//! handles and validated immutable specs.
//!
//! **[`viewport`]** — Desktop/mobile breakpoint classification and the
//! perspective camera that sizes layers in world units.
//!
//! **[`engine`]** — The Idle/Tracking state machine that owns everything
//! above and advances it one frame at a time.
//!
//! **[`tick`]** — Frame-callback arena with generational handles, for
//! backends that fan one platform tick out to several subscribers.
//!
//! **[`backend`]** — The [`Presenter`](backend::Presenter) trait that
//! platform backends implement to apply frame updates to native targets.
//!
//! **[`transform`]** — Column-major 4×4 transform for layer positioning.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types
//! for engine instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod engine;
pub mod layer;
pub mod motion;
pub mod progress;
pub mod smooth;
pub mod tick;
pub mod time;
pub mod trace;
pub mod transform;
pub mod viewport;
