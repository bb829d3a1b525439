// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated per-layer parameters.
//!
//! A [`LayerSpec`] is immutable after construction, and construction is the
//! only place a layer can be rejected. Everything the per-frame math
//! divides by or scales with is checked here, so the frame tick never has
//! to handle a malformed layer.

use core::fmt;

/// An opaque reference to externally managed image content.
///
/// The engine never touches pixel data; backends resolve an `ImageRef` to
/// whatever their target uses (a texture, a DOM element, a URL slot).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageRef(pub u32);

impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageRef({})", self.0)
    }
}

/// Parameter overrides that apply only in the mobile viewport class.
///
/// Desktop ignores these entirely (offset 0, scaling 1); the swap between
/// the two sets is atomic at the frame the breakpoint is crossed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MobileParams {
    /// Horizontal offset added to the layer's x position.
    pub offset_x: f64,
    /// Multiplier applied to the layer's scale.
    pub scaling: f64,
}

impl Default for MobileParams {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            scaling: 1.0,
        }
    }
}

/// A rejected layer parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpecError {
    /// `depth` was not in `[0, 1)`.
    ///
    /// The sensitivity curve divides by `1.01 - depth`; depths at or above
    /// one are rejected here rather than guarded per frame.
    DepthOutOfRange(f64),
    /// `scale_factor` was not finite and positive.
    ScaleFactorOutOfRange(f64),
    /// `aspect` was not finite and positive.
    AspectOutOfRange(f64),
    /// `pos_y` was not finite.
    PosYNotFinite(f64),
    /// A mobile override was not finite, or `scaling` was not positive.
    MobileParamsOutOfRange(MobileParams),
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthOutOfRange(d) => write!(f, "layer depth {d} outside [0, 1)"),
            Self::ScaleFactorOutOfRange(s) => {
                write!(f, "layer scale factor {s} not finite and positive")
            }
            Self::AspectOutOfRange(a) => write!(f, "layer aspect {a} not finite and positive"),
            Self::PosYNotFinite(y) => write!(f, "layer y position {y} not finite"),
            Self::MobileParamsOutOfRange(m) => {
                write!(
                    f,
                    "mobile params (offset_x {}, scaling {}) out of range",
                    m.offset_x, m.scaling
                )
            }
        }
    }
}

impl core::error::Error for SpecError {}

/// The validated, immutable description of one parallax layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerSpec {
    image: ImageRef,
    depth: f64,
    scale_factor: f64,
    aspect: f64,
    pos_y: f64,
    mobile: MobileParams,
}

impl LayerSpec {
    /// Validates and constructs a layer description.
    ///
    /// `depth` is the apparent depth in `[0, 1)` (1 would be the viewer's
    /// eye). `scale_factor` sizes the layer relative to the camera-projected
    /// world width. `aspect` is the image's height over width. `pos_y` is
    /// the vertical world position, identical in both viewport classes.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] for any non-finite parameter, a depth outside
    /// `[0, 1)`, or a non-positive `scale_factor`, `aspect`, or
    /// `mobile.scaling`.
    pub fn new(
        image: ImageRef,
        depth: f64,
        scale_factor: f64,
        aspect: f64,
        pos_y: f64,
        mobile: MobileParams,
    ) -> Result<Self, SpecError> {
        if !depth.is_finite() || !(0.0..1.0).contains(&depth) {
            return Err(SpecError::DepthOutOfRange(depth));
        }
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(SpecError::ScaleFactorOutOfRange(scale_factor));
        }
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(SpecError::AspectOutOfRange(aspect));
        }
        if !pos_y.is_finite() {
            return Err(SpecError::PosYNotFinite(pos_y));
        }
        if !mobile.offset_x.is_finite() || !mobile.scaling.is_finite() || mobile.scaling <= 0.0 {
            return Err(SpecError::MobileParamsOutOfRange(mobile));
        }
        Ok(Self {
            image,
            depth,
            scale_factor,
            aspect,
            pos_y,
            mobile,
        })
    }

    /// The image this layer presents.
    #[must_use]
    pub const fn image(&self) -> ImageRef {
        self.image
    }

    /// Apparent depth in `[0, 1)`.
    #[must_use]
    pub const fn depth(&self) -> f64 {
        self.depth
    }

    /// Scale relative to the projected world width.
    #[must_use]
    pub const fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Image height over width.
    #[must_use]
    pub const fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Vertical world position.
    #[must_use]
    pub const fn pos_y(&self) -> f64 {
        self.pos_y
    }

    /// Mobile-class overrides.
    #[must_use]
    pub const fn mobile(&self) -> MobileParams {
        self.mobile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_spec(depth: f64) -> Result<LayerSpec, SpecError> {
        LayerSpec::new(
            ImageRef(0),
            depth,
            1.2,
            816.0 / 1456.0,
            0.0,
            MobileParams::default(),
        )
    }

    #[test]
    fn accepts_valid_depths() {
        assert!(base_spec(0.0).is_ok());
        assert!(base_spec(0.99).is_ok());
    }

    #[test]
    fn rejects_depth_at_or_above_one() {
        assert_eq!(base_spec(1.0), Err(SpecError::DepthOutOfRange(1.0)));
        assert_eq!(base_spec(1.5), Err(SpecError::DepthOutOfRange(1.5)));
    }

    #[test]
    fn rejects_negative_and_non_finite_depth() {
        assert_eq!(base_spec(-0.1), Err(SpecError::DepthOutOfRange(-0.1)));
        assert!(matches!(
            base_spec(f64::NAN),
            Err(SpecError::DepthOutOfRange(_))
        ));
        assert!(matches!(
            base_spec(f64::INFINITY),
            Err(SpecError::DepthOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_bad_scale_and_aspect() {
        let err = LayerSpec::new(
            ImageRef(0),
            0.5,
            0.0,
            0.5,
            0.0,
            MobileParams::default(),
        );
        assert_eq!(err, Err(SpecError::ScaleFactorOutOfRange(0.0)));

        let err = LayerSpec::new(
            ImageRef(0),
            0.5,
            1.0,
            -2.0,
            0.0,
            MobileParams::default(),
        );
        assert_eq!(err, Err(SpecError::AspectOutOfRange(-2.0)));
    }

    #[test]
    fn rejects_bad_mobile_params() {
        let mobile = MobileParams {
            offset_x: 0.3,
            scaling: 0.0,
        };
        let err = LayerSpec::new(ImageRef(0), 0.5, 1.0, 0.5, 0.0, mobile);
        assert_eq!(err, Err(SpecError::MobileParamsOutOfRange(mobile)));
    }

    #[test]
    fn error_messages_name_the_offending_value() {
        extern crate alloc;
        use alloc::string::ToString;

        let e = base_spec(1.25).unwrap_err();
        assert_eq!(e.to_string(), "layer depth 1.25 outside [0, 1)");
    }
}
