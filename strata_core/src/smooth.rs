// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame exponential smoothing onto an output range.
//!
//! [`Smoothed`] maps a normalized progress input onto `[from, to]` and
//! trails the instantaneous mapping with an exponential approach:
//!
//! ```text
//! target = from + progress * (to - from)
//! value += (target - value) * k        // once per frame tick
//! ```
//!
//! `k ∈ (0, 1)` is a fixed per-tick fraction; smaller values mean more
//! inertia. [`step`](Smoothed::step) must run on every frame regardless of
//! whether the input changed, so motion keeps settling after the scroll
//! stops. With `k < 1` the value never overshoots: it is a convex
//! combination of its previous value and the target, both of which lie
//! within the output range.

/// A smoothed scalar with a fixed output range and per-tick factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothed {
    from: f64,
    to: f64,
    factor: f64,
    target: f64,
    value: f64,
}

impl Smoothed {
    /// Creates a smoothed value over `[from, to]` with per-tick factor
    /// `factor`, clamped into `(0, 1)`.
    ///
    /// The value starts at the mapping of progress 0 (i.e. `from`), so the
    /// first frame shows the resting position rather than lurching in
    /// from an unrelated origin.
    #[must_use]
    pub fn new(from: f64, to: f64, factor: f64) -> Self {
        Self {
            from,
            to,
            factor: factor.clamp(f64::EPSILON, 1.0 - f64::EPSILON),
            target: from,
            value: from,
        }
    }

    /// Output range start.
    #[must_use]
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Output range end.
    #[must_use]
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Sets the target from a normalized progress input.
    ///
    /// Progress is clamped to `[0, 1]` so the target (and therefore the
    /// value) can never leave the output range.
    pub fn retarget(&mut self, progress: f64) {
        let p = progress.clamp(0.0, 1.0);
        self.target = self.from + p * (self.to - self.from);
    }

    /// Advances the value one tick toward the current target.
    ///
    /// Returns the new value. A degenerate range (`from == to`) holds the
    /// constant exactly.
    pub fn step(&mut self) -> f64 {
        if self.from == self.to {
            self.value = self.from;
            return self.value;
        }
        self.value += (self.target - self.value) * self.factor;
        self.value
    }

    /// The current (possibly still settling) value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The instantaneous mapping the value is approaching.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Absolute distance still to travel.
    #[must_use]
    pub fn residual(&self) -> f64 {
        (self.target - self.value).abs()
    }
}
