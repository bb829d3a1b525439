// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Track and scene DOM element management.
//!
//! Applies each [`FrameUpdate`] to two DOM targets: the smoothed gallery
//! channel becomes a CSS `translateX(<vw>)` on the track container, and
//! every layer becomes a `matrix3d()` transform on its own `<div>` inside
//! the scene container. `apply` only writes styles; all DOM reads (rects,
//! sizes) happen in the input handlers, never here.
//!
//! [`FrameUpdate`]: strata_core::engine::FrameUpdate

use alloc::format;
use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use web_sys::HtmlElement;

use strata_core::backend::Presenter;
use strata_core::engine::FrameUpdate;
use strata_core::layer::LayerRegistry;
use strata_core::transform::Transform3d;

/// Maps engine frames to live DOM elements.
///
/// The presenter owns a `track` element (receives the gallery translate)
/// and a `scene` element to which per-layer `<div>` children are added
/// and removed following the frame's lifecycle lists.
pub struct DomScenePresenter {
    track: HtmlElement,
    scene: HtmlElement,
    /// Which smoothed channel drives the track translate.
    track_channel: usize,
    elements: Vec<Option<HtmlElement>>,
}

impl core::fmt::Debug for DomScenePresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomScenePresenter")
            .field("track_channel", &self.track_channel)
            .field("elements_len", &self.elements.len())
            .finish_non_exhaustive()
    }
}

impl DomScenePresenter {
    /// Creates a presenter that writes to `track` and manages child
    /// elements of `scene`, reading the track offset from channel
    /// `track_channel`.
    #[must_use]
    pub fn new(track: HtmlElement, scene: HtmlElement, track_channel: usize) -> Self {
        Self {
            track,
            scene,
            track_channel,
            elements: Vec::new(),
        }
    }

    /// Returns the DOM element for the given slot index, if it exists.
    #[must_use]
    pub fn get_element(&self, idx: u32) -> Option<&HtmlElement> {
        self.elements
            .get(idx as usize)
            .and_then(|slot| slot.as_ref())
    }

    /// Takes an element out of the slot, leaving `None`.
    fn take_element(&mut self, idx: u32) -> Option<HtmlElement> {
        self.elements.get_mut(idx as usize)?.take()
    }

    /// Stores an element at the given slot index, growing the vec if needed.
    fn put_element(&mut self, idx: u32, el: HtmlElement) {
        let slot = idx as usize;
        if self.elements.len() <= slot {
            self.elements.resize_with(slot + 1, || None);
        }
        self.elements[slot] = Some(el);
    }
}

impl Presenter for DomScenePresenter {
    fn apply(&mut self, layers: &LayerRegistry, update: &FrameUpdate) {
        // 1. Track offset in viewport-width units.
        if let Some(offset_vw) = update.channels.get(self.track_channel) {
            let _ = self
                .track
                .style()
                .set_property("transform", &format!("translateX({offset_vw}vw)"));
        }

        // 2. Removals
        for &idx in &update.layers.removed {
            if let Some(el) = self.take_element(idx) {
                el.remove();
            }
        }

        // 3. Additions
        for &idx in &update.layers.added {
            let doc = self.scene.owner_document().expect("no owner document");
            let el: HtmlElement = doc
                .create_element("div")
                .expect("create_element failed")
                .unchecked_into();
            let s = el.style();
            let _ = s.set_property("position", "absolute");
            let _ = s.set_property("left", "0");
            let _ = s.set_property("top", "0");
            let _ = s.set_property("transform-origin", "0 0");
            // Apps resolve the image slot to real content via this marker.
            let _ = el.set_attribute("data-image", &format!("{}", layers.spec_at(idx).image().0));
            let _ = self.scene.append_child(&el);
            self.put_element(idx, el);
        }

        // 4. Transforms
        for &idx in &update.layers.updated {
            if let Some(el) = self.get_element(idx) {
                let xf = layers.transform_at(idx);
                apply_css_transform(el, &xf);
            }
        }
    }
}

/// Applies a layer transform as a CSS `matrix3d()` value.
fn apply_css_transform(el: &HtmlElement, xf: &Transform3d) {
    let m = xf.to_cols_array();
    let css = format!(
        "matrix3d({},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{})",
        m[0],
        m[1],
        m[2],
        m[3],
        m[4],
        m[5],
        m[6],
        m[7],
        m[8],
        m[9],
        m[10],
        m[11],
        m[12],
        m[13],
        m[14],
        m[15],
    );
    let _ = el.style().set_property("transform", &css);
}
