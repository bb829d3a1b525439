// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input event bindings with deterministic teardown.
//!
//! [`EventBinding`] ties one JS event listener to a Rust closure and
//! removes the listener in `Drop`. Holding the bindings in a struct and
//! dropping that struct is the whole teardown story: after the drop, no
//! handler can fire and no closure leaks.
//!
//! The free helpers translate raw browser event payloads into
//! [`MotionSample`] values; they are pure so the conversion math stays
//! testable off-browser.

use alloc::boxed::Box;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use strata_core::motion::MotionSample;
use strata_core::viewport::Viewport;

/// One live event listener, removed on drop.
pub struct EventBinding {
    target: web_sys::EventTarget,
    name: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventBinding {
    /// Registers `callback` for `name` events on `target`.
    ///
    /// The listener stays active until the returned binding is dropped.
    pub fn new(
        target: &web_sys::EventTarget,
        name: &'static str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> Self {
        let closure =
            Closure::wrap(Box::new(callback) as Box<dyn FnMut(web_sys::Event)>);
        // Registration can only fail for invalid listener objects, which a
        // freshly wrapped closure never is.
        let _ = target
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            name,
            closure,
        }
    }

    /// The event name this binding listens for.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.name, self.closure.as_ref().unchecked_ref());
    }
}

impl core::fmt::Debug for EventBinding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBinding")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Converts client pixel coordinates into a normalized pointer sample.
///
/// Maps the viewport to `[-1, 1]²` with x growing rightwards and y growing
/// upwards, the convention the motion multiplexer expects.
#[must_use]
pub fn normalize_pointer(client_x: f64, client_y: f64, viewport: &Viewport) -> MotionSample {
    let (x, y) = if viewport.width_px > 0.0 && viewport.height_px > 0.0 {
        (
            (client_x / viewport.width_px) * 2.0 - 1.0,
            -((client_y / viewport.height_px) * 2.0 - 1.0),
        )
    } else {
        (0.0, 0.0)
    };
    MotionSample::Pointer { x, y }
}

/// Converts a device orientation payload into a motion sample.
///
/// Browsers report each angle as nullable; missing angles read as zero so
/// a partial payload still produces a usable sample.
#[must_use]
pub fn orientation_sample(
    alpha: Option<f64>,
    beta: Option<f64>,
    gamma: Option<f64>,
) -> MotionSample {
    MotionSample::Orientation {
        alpha: alpha.unwrap_or(0.0),
        beta: beta.unwrap_or(0.0),
        gamma: gamma.unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_center_maps_to_origin() {
        let v = Viewport::new(1000.0, 800.0);
        let sample = normalize_pointer(500.0, 400.0, &v);
        assert_eq!(sample, MotionSample::Pointer { x: 0.0, y: 0.0 });
    }

    #[test]
    fn pointer_corners_map_to_unit_square() {
        let v = Viewport::new(1000.0, 800.0);
        assert_eq!(
            normalize_pointer(0.0, 0.0, &v),
            MotionSample::Pointer { x: -1.0, y: 1.0 }
        );
        assert_eq!(
            normalize_pointer(1000.0, 800.0, &v),
            MotionSample::Pointer { x: 1.0, y: -1.0 }
        );
    }

    #[test]
    fn degenerate_viewport_yields_zero_sample() {
        let v = Viewport::new(0.0, 0.0);
        assert_eq!(
            normalize_pointer(123.0, 456.0, &v),
            MotionSample::Pointer { x: 0.0, y: 0.0 }
        );
    }

    #[test]
    fn missing_orientation_angles_read_as_zero() {
        assert_eq!(
            orientation_sample(None, Some(10.0), None),
            MotionSample::Orientation {
                alpha: 0.0,
                beta: 10.0,
                gamma: 0.0
            }
        );
    }
}
