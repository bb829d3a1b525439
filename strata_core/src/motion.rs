// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Secondary motion input: pointer or device orientation.
//!
//! One [`InputMode`] is resolved at initialization from platform
//! capability and never changes afterwards; per-frame code dispatches on
//! the resolved mode instead of re-probing the platform.
//!
//! Both modes feed the same depth-dependent sensitivity curve:
//!
//! ```text
//! offset_x(depth) = raw * base / (1.01 - depth)
//! ```
//!
//! so a layer with depth near 1 (foreground) moves more per unit input
//! than a layer with depth near 0 (background) — the standard parallax
//! depth cue. The `1.01` bias keeps the divisor away from zero for every
//! valid depth (`depth < 1.0` is enforced at layer construction).
//!
//! A denied orientation permission fails closed: [`MotionState::disable`]
//! pins the offset to zero and later samples are ignored. Nothing in this
//! module can error at runtime.

use kurbo::Vec2;

/// Which secondary motion source is active.
///
/// Resolved once at mount from capability detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Normalized pointer position drives the offset.
    Pointer,
    /// Device orientation (tilt) drives the offset.
    Orientation,
}

impl InputMode {
    /// Selects the mode from platform capability: orientation when the
    /// platform delivers orientation events, pointer otherwise.
    #[must_use]
    pub fn detect(orientation_available: bool) -> Self {
        if orientation_available {
            Self::Orientation
        } else {
            Self::Pointer
        }
    }
}

/// One raw motion observation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionSample {
    /// Pointer position normalized to `[-1, 1] × [-1, 1]`.
    Pointer {
        /// Horizontal position, -1 at the left edge, 1 at the right.
        x: f64,
        /// Vertical position, -1 at the bottom edge, 1 at the top.
        y: f64,
    },
    /// Device orientation in degrees.
    Orientation {
        /// Rotation about the screen normal.
        alpha: f64,
        /// Front-to-back tilt.
        beta: f64,
        /// Left-to-right tilt; the axis that drives horizontal parallax.
        gamma: f64,
    },
}

/// Sensitivity constants for the motion curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    /// Base multiplier in pointer mode (applied to normalized x).
    pub pointer_base: f64,
    /// Base multiplier in orientation mode (applied to gamma degrees).
    pub tilt_base: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        // Tuned by feel; degrees carry far more numeric range than
        // normalized pointer coordinates, hence the spread.
        Self {
            pointer_base: 0.001,
            tilt_base: 0.000_015,
        }
    }
}

/// The multiplexer: latest raw input, resolved mode, and the curve.
///
/// Input handlers call [`feed`](Self::feed); the frame tick reads
/// [`offset_x`](Self::offset_x) per layer. Samples whose variant does not
/// match the resolved mode are dropped, so a stray pointer event on a
/// tilt-driven device cannot perturb the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    mode: InputMode,
    config: MotionConfig,
    raw: Vec2,
    enabled: bool,
}

impl MotionState {
    /// Creates a multiplexer in the given mode with zero offset.
    #[must_use]
    pub fn new(mode: InputMode, config: MotionConfig) -> Self {
        Self {
            mode,
            config,
            raw: Vec2::ZERO,
            enabled: true,
        }
    }

    /// The resolved input mode.
    #[must_use]
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Records a raw sample if it matches the resolved mode.
    pub fn feed(&mut self, sample: MotionSample) {
        if !self.enabled {
            return;
        }
        match (self.mode, sample) {
            (InputMode::Pointer, MotionSample::Pointer { x, y }) => {
                self.raw = Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
            }
            (InputMode::Orientation, MotionSample::Orientation { gamma, beta, .. }) => {
                self.raw = Vec2::new(gamma, beta);
            }
            _ => {}
        }
    }

    /// Fails closed after a denied permission: offset drops to zero and
    /// stays there; further samples are ignored.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.raw = Vec2::ZERO;
    }

    /// Whether the multiplexer still accepts samples.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The current normalized signed sample, as `{x, y}`.
    #[must_use]
    pub fn sample(&self) -> Vec2 {
        self.raw
    }

    /// Horizontal offset contribution for a layer at `depth`.
    ///
    /// Strictly increasing in `depth` for a fixed non-zero input; at
    /// `depth = 0` the curve bottoms out at `base / 1.01`.
    #[must_use]
    pub fn offset_x(&self, depth: f64) -> f64 {
        let base = match self.mode {
            InputMode::Pointer => self.config.pointer_base,
            InputMode::Orientation => self.config.tilt_base,
        };
        self.raw.x * (base / (1.01 - depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_prefers_orientation_when_available() {
        assert_eq!(InputMode::detect(true), InputMode::Orientation);
        assert_eq!(InputMode::detect(false), InputMode::Pointer);
    }

    #[test]
    fn offset_grows_strictly_with_depth() {
        let mut m = MotionState::new(InputMode::Pointer, MotionConfig::default());
        m.feed(MotionSample::Pointer { x: 1.0, y: 0.0 });

        let depths = [0.0, 0.2, 0.5, 0.8, 0.95, 0.99];
        let mut prev = -1.0;
        for &z in &depths {
            let mag = m.offset_x(z).abs();
            assert!(
                mag > prev,
                "offset magnitude must grow with depth (z={z}: {mag} vs {prev})"
            );
            prev = mag;
        }
    }

    #[test]
    fn zero_depth_uses_minimum_multiplier() {
        let mut m = MotionState::new(InputMode::Pointer, MotionConfig::default());
        m.feed(MotionSample::Pointer { x: 1.0, y: 0.0 });
        assert!((m.offset_x(0.0) - 0.001 / 1.01).abs() < 1e-15);
    }

    #[test]
    fn orientation_mode_uses_gamma() {
        let mut m = MotionState::new(InputMode::Orientation, MotionConfig::default());
        m.feed(MotionSample::Orientation {
            alpha: 90.0,
            beta: 45.0,
            gamma: 10.0,
        });
        // base / (1.01 - 0.5) = 0.000015 / 0.51
        let expected = 10.0 * (0.000_015 / 0.51);
        assert!((m.offset_x(0.5) - expected).abs() < 1e-12);
    }

    #[test]
    fn mismatched_sample_variant_is_dropped() {
        let mut m = MotionState::new(InputMode::Orientation, MotionConfig::default());
        m.feed(MotionSample::Pointer { x: 1.0, y: 1.0 });
        assert_eq!(m.sample(), Vec2::ZERO);
        assert_eq!(m.offset_x(0.9), 0.0);
    }

    #[test]
    fn pointer_sample_is_clamped_to_unit_square() {
        let mut m = MotionState::new(InputMode::Pointer, MotionConfig::default());
        m.feed(MotionSample::Pointer { x: 3.0, y: -9.0 });
        assert_eq!(m.sample(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn disabled_state_holds_zero_forever() {
        let mut m = MotionState::new(InputMode::Orientation, MotionConfig::default());
        m.feed(MotionSample::Orientation {
            alpha: 0.0,
            beta: 0.0,
            gamma: 30.0,
        });
        assert!(m.offset_x(0.9) != 0.0);

        m.disable();
        assert_eq!(m.offset_x(0.9), 0.0);

        // Late event after denial: still zero.
        m.feed(MotionSample::Orientation {
            alpha: 0.0,
            beta: 0.0,
            gamma: 45.0,
        });
        assert_eq!(m.offset_x(0.9), 0.0);
        assert!(!m.is_enabled());
    }

    #[test]
    fn divisor_stays_clear_of_zero_for_valid_depths() {
        let mut m = MotionState::new(InputMode::Pointer, MotionConfig::default());
        m.feed(MotionSample::Pointer { x: 1.0, y: 0.0 });
        // Largest depth a validated layer can carry.
        let offset = m.offset_x(0.999_999);
        assert!(offset.is_finite());
    }
}
