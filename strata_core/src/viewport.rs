// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport classification and camera projection.
//!
//! The engine reacts to viewport changes lazily: resize handlers store the
//! latest dimensions and the next frame tick reads the derived
//! [`ViewportClass`] when it evaluates layer parameters. No recomputation
//! happens at resize time, so a burst of resize events costs nothing
//! beyond the final stored value.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Pixel width at and above which a viewport classifies as desktop.
pub const DESKTOP_MIN_WIDTH_PX: f64 = 768.0;

/// The two layout regimes the engine distinguishes.
///
/// Layers carry per-class parameter overrides; everything else in the
/// pipeline is class-agnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    /// Wide viewport: mobile offsets are forced to zero and mobile
    /// scaling to one.
    Desktop,
    /// Narrow viewport: per-layer mobile overrides apply.
    Mobile,
}

impl ViewportClass {
    /// Classifies a viewport width in pixels against the single fixed
    /// breakpoint.
    #[must_use]
    pub fn classify(width_px: f64) -> Self {
        if width_px >= DESKTOP_MIN_WIDTH_PX {
            Self::Desktop
        } else {
            Self::Mobile
        }
    }
}

/// Latest known viewport dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width_px: f64,
    /// Height in pixels.
    pub height_px: f64,
}

impl Viewport {
    /// Creates a viewport from pixel dimensions.
    #[must_use]
    pub const fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    /// The layout regime for this viewport.
    #[must_use]
    pub fn class(&self) -> ViewportClass {
        ViewportClass::classify(self.width_px)
    }

    /// Width over height; zero height yields zero rather than infinity.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        if self.height_px > 0.0 {
            self.width_px / self.height_px
        } else {
            0.0
        }
    }
}

/// Perspective camera used to size layers in world units.
///
/// Layers sit on planes facing the camera; the visible world rectangle at
/// the camera's distance determines how large a full-bleed layer must be.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    /// Distance from the camera to the layer plane.
    pub distance: f64,
}

impl Default for Camera {
    fn default() -> Self {
        // A long lens far from the plane keeps perspective distortion
        // gentle across the layer stack.
        Self {
            fov_deg: 25.0,
            distance: 10.0,
        }
    }
}

impl Camera {
    /// Height of the visible world rectangle at the layer plane.
    ///
    /// `2 * distance * tan(fov / 2)` from the standard frustum geometry.
    #[must_use]
    pub fn world_height(&self) -> f64 {
        2.0 * self.distance * (self.fov_deg.to_radians() / 2.0).tan()
    }

    /// Width of the visible world rectangle for the given viewport.
    #[must_use]
    pub fn world_width(&self, viewport: &Viewport) -> f64 {
        self.world_height() * viewport.aspect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_matches_breakpoint() {
        assert_eq!(ViewportClass::classify(320.0), ViewportClass::Mobile);
        assert_eq!(ViewportClass::classify(767.9), ViewportClass::Mobile);
        assert_eq!(ViewportClass::classify(768.0), ViewportClass::Desktop);
        assert_eq!(ViewportClass::classify(1920.0), ViewportClass::Desktop);
    }

    #[test]
    fn classify_is_idempotent_over_repeated_reads() {
        let v = Viewport::new(1024.0, 768.0);
        let first = v.class();
        for _ in 0..3 {
            assert_eq!(v.class(), first, "class must be a pure function of width");
        }
    }

    #[test]
    fn default_camera_world_height() {
        let cam = Camera::default();
        // 2 * 10 * tan(12.5 deg) = 4.4338...
        let h = cam.world_height();
        assert!((h - 4.433_89).abs() < 1e-4, "got {h}");
    }

    #[test]
    fn world_width_follows_aspect() {
        let cam = Camera::default();
        let v = Viewport::new(1456.0, 816.0);
        let w = cam.world_width(&v);
        let h = cam.world_height();
        assert!((w / h - 1456.0 / 816.0).abs() < 1e-12);
    }

    #[test]
    fn zero_height_viewport_degrades_to_zero_width() {
        let cam = Camera::default();
        let v = Viewport::new(1456.0, 0.0);
        assert_eq!(cam.world_width(&v), 0.0);
    }
}
