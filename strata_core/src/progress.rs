// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll progress sources.
//!
//! [`ScrollTrack`] turns a tracked region's geometry plus the current
//! scroll position into a normalized `progress ∈ [0, 1]`: 0 when the
//! region's start edge meets the viewport's reference edge, 1 when its end
//! edge meets the opposite edge. Geometry and scroll position are written
//! by input handlers; `progress` is derived and read at frame-tick time.
//!
//! [`CoverTrack`] is the read side of the background-position effect: a
//! scroll handler samples an element's bounding-rect top, and the frame
//! tick later reads it back as a percentage. Reads and writes of the DOM
//! therefore never interleave in one synchronous pass.

/// Pixel geometry of a tracked scrollable region.
///
/// `start` is the region's offset from the document origin along the
/// scroll axis, `extent` its length, and `viewport_extent` the viewport
/// length along the same axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackGeometry {
    /// Document offset of the region's start edge, in pixels.
    pub start: f64,
    /// Length of the region along the scroll axis, in pixels.
    pub extent: f64,
    /// Viewport length along the scroll axis, in pixels.
    pub viewport_extent: f64,
}

impl TrackGeometry {
    /// Scrollable distance of the region: how far the scroll position can
    /// travel while the region is pinned. Zero when the region does not
    /// exceed the viewport (degenerate geometry).
    #[must_use]
    pub fn scrollable(&self) -> f64 {
        (self.extent - self.viewport_extent).max(0.0)
    }
}

/// Normalized scroll progress over a tracked region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTrack {
    geometry: TrackGeometry,
    scroll_pos: f64,
}

impl ScrollTrack {
    /// Creates a track at scroll position 0.
    #[must_use]
    pub fn new(geometry: TrackGeometry) -> Self {
        Self {
            geometry,
            scroll_pos: 0.0,
        }
    }

    /// Updates the tracked region's geometry (resize, content change).
    pub fn set_geometry(&mut self, geometry: TrackGeometry) {
        self.geometry = geometry;
    }

    /// Updates the current scroll position along the tracked axis.
    pub fn set_scroll_pos(&mut self, scroll_pos: f64) {
        self.scroll_pos = scroll_pos;
    }

    /// Returns the current geometry.
    #[must_use]
    pub fn geometry(&self) -> TrackGeometry {
        self.geometry
    }

    /// Current normalized progress through the track.
    ///
    /// Clamped to `[0, 1]`; a region with zero scrollable extent reports 0
    /// rather than dividing by zero.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let scrollable = self.geometry.scrollable();
        if scrollable <= 0.0 {
            return 0.0;
        }
        ((self.scroll_pos - self.geometry.start) / scrollable).clamp(0.0, 1.0)
    }
}

/// Scroll-sampled background-position source for a cover element.
///
/// `note_rect_top` runs in the scroll handler (the only place the DOM is
/// read); [`background_position`](Self::background_position) is consumed
/// by the frame-tick writer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverTrack {
    rect_top: f64,
    viewport_height: f64,
}

impl CoverTrack {
    /// Creates a cover track for a viewport of the given height, starting
    /// at the centered 50% position.
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self {
            rect_top: viewport_height / 2.0,
            viewport_height,
        }
    }

    /// Records the element's bounding-rect top, in viewport pixels.
    pub fn note_rect_top(&mut self, rect_top: f64) {
        self.rect_top = rect_top;
    }

    /// Updates the viewport height (resize).
    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
    }

    /// Background vertical position as a percentage.
    ///
    /// A degenerate (zero or negative) viewport height yields the centered
    /// 50% default instead of a non-finite value.
    #[must_use]
    pub fn background_position(&self) -> f64 {
        if self.viewport_height <= 0.0 {
            return 50.0;
        }
        (self.rect_top / self.viewport_height) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(start: f64, extent: f64, viewport: f64) -> ScrollTrack {
        ScrollTrack::new(TrackGeometry {
            start,
            extent,
            viewport_extent: viewport,
        })
    }

    #[test]
    fn progress_spans_the_scrollable_range() {
        // A 3-viewport-tall region pinned for 2 viewports of travel.
        let mut t = track(0.0, 3000.0, 1000.0);
        assert_eq!(t.progress(), 0.0);

        t.set_scroll_pos(1000.0);
        assert!((t.progress() - 0.5).abs() < 1e-12);

        t.set_scroll_pos(2000.0);
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn progress_clamps_outside_the_track() {
        let mut t = track(500.0, 3000.0, 1000.0);
        t.set_scroll_pos(0.0);
        assert_eq!(t.progress(), 0.0, "before the track start");
        t.set_scroll_pos(10_000.0);
        assert_eq!(t.progress(), 1.0, "past the track end");
    }

    #[test]
    fn degenerate_extent_clamps_to_zero() {
        // Region shorter than the viewport: no scrollable travel at all.
        let mut t = track(0.0, 800.0, 1000.0);
        t.set_scroll_pos(400.0);
        assert_eq!(t.progress(), 0.0);
        assert!(t.progress().is_finite());
    }

    #[test]
    fn exact_viewport_extent_clamps_to_zero() {
        let t = track(0.0, 1000.0, 1000.0);
        assert_eq!(t.geometry().scrollable(), 0.0);
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn geometry_update_recomputes_progress() {
        let mut t = track(0.0, 3000.0, 1000.0);
        t.set_scroll_pos(1000.0);
        assert!((t.progress() - 0.5).abs() < 1e-12);

        // Viewport grows: the same scroll position is now further along.
        t.set_geometry(TrackGeometry {
            start: 0.0,
            extent: 3000.0,
            viewport_extent: 1500.0,
        });
        assert!((t.progress() - 1000.0 / 1500.0).abs() < 1e-12);
    }

    #[test]
    fn cover_position_is_percent_of_viewport() {
        let mut c = CoverTrack::new(1000.0);
        assert!((c.background_position() - 50.0).abs() < 1e-12);

        c.note_rect_top(250.0);
        assert!((c.background_position() - 25.0).abs() < 1e-12);

        // Above the viewport: negative percentage is fine.
        c.note_rect_top(-100.0);
        assert!((c.background_position() + 10.0).abs() < 1e-12);
    }

    #[test]
    fn cover_degenerate_viewport_defaults_to_center() {
        let mut c = CoverTrack::new(0.0);
        c.note_rect_top(300.0);
        assert_eq!(c.background_position(), 50.0);
    }
}
