// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for strata.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`EventBinding`]: input event bindings with deterministic teardown
//! - [`DomScenePresenter`]: track and scene DOM element management

#![no_std]

extern crate alloc;

mod events;
mod presenter;
mod raf;

pub use events::{EventBinding, normalize_pointer, orientation_sample};
pub use presenter::DomScenePresenter;
pub use raf::RafLoop;
pub use strata_core::backend::Presenter;

use wasm_bindgen::prelude::*;

use strata_core::time::HostTime;

#[wasm_bindgen(
    inline_js = "export function orientation_event_supported() { return typeof window !== 'undefined' && 'ondeviceorientation' in window; }"
)]
extern "C" {
    fn orientation_event_supported() -> bool;
}

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks.
#[must_use]
pub fn now() -> HostTime {
    let ms = raf::performance_now();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "performance.now() returns small positive f64; µs fits in u64"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}

/// Probes whether the browser delivers device orientation events.
///
/// Feed the result to
/// [`InputMode::detect`](strata_core::motion::InputMode::detect) at
/// engine construction. A later permission denial is handled separately
/// via [`Engine::disable_motion`](strata_core::engine::Engine::disable_motion).
#[must_use]
pub fn orientation_available() -> bool {
    orientation_event_supported()
}
