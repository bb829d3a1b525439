// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Strata splits platform-specific work into *backend* crates. Each
//! backend provides the following pieces:
//!
//! - **Tick source** — Drives [`Engine::tick_into`] via a platform
//!   mechanism (e.g. `requestAnimationFrame`). This is backend-specific
//!   and not abstracted by a trait because the setup and lifecycle differ
//!   fundamentally across platforms.
//!
//! - **Time** — A `now() -> HostTime` free function that reads the
//!   platform's monotonic clock.
//!
//! - **Input bindings** — Scroll, resize, pointer, and orientation event
//!   handlers that call the engine's input setters, with deterministic
//!   teardown (no handler may fire after the bindings are dropped).
//!
//! - **Presenter** — Implements the [`Presenter`] trait to apply each
//!   frame's output to a platform-native target (e.g. DOM elements).
//!
//! # Crate boundaries
//!
//! `strata_core` owns the data model, the engine, and this contract
//! module. Backend crates depend on `strata_core` and provide platform
//! glue. Application code depends on both and wires them together in a
//! frame loop.
//!
//! [`Engine::tick_into`]: crate::engine::Engine::tick_into

use crate::engine::FrameUpdate;
use crate::layer::LayerRegistry;

/// Applies one evaluated frame to a platform-native presentation target.
///
/// Both DOM-based presenters and test doubles implement this trait,
/// enabling generic frame loops. `apply` is fire-and-forget: it reads the
/// snapshot in `update` (plus per-layer state from `layers` via the
/// raw-index accessors) and writes to its target, never back into the
/// engine.
///
/// # Frame loop pseudocode
///
/// A typical frame callback wires the pieces together like this:
///
/// ```rust,ignore
/// fn on_frame(now: HostTime) {
///     if engine.tick_into(now, &mut tracer, &mut update) {
///         presenter.apply(engine.layers(), &update);
///     }
/// }
/// ```
pub trait Presenter {
    /// Applies the given [`FrameUpdate`] to the backing presentation
    /// target, reading per-layer state from `layers` as needed.
    fn apply(&mut self, layers: &LayerRegistry, update: &FrameUpdate);
}
