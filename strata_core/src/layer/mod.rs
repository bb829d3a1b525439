// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer data model.
//!
//! A *layer* is one image plane in the parallax stack. Each layer has:
//!
//! - An identity ([`LayerId`]) — a generational handle that becomes stale
//!   when the layer is removed, preventing use-after-free bugs at the API
//!   level.
//! - A validated, immutable [`LayerSpec`]: image reference, apparent depth
//!   in `[0, 1)`, scale factor, image aspect, vertical position, and
//!   mobile-class overrides.
//! - **Computed state** produced by [`evaluate`](LayerRegistry::evaluate):
//!   per-frame position, scale, and composed [`Transform3d`], recomputed
//!   from scratch every tick and never persisted across frames.
//!
//! The stack is flat (no parent links); painter's order is simply
//! descending depth, which backends derive from the specs. Layers live in
//! struct-of-arrays storage addressed by slot index, with a free list for
//! recycling and generation counters to invalidate old handles.
//!
//! [`Transform3d`]: crate::transform::Transform3d

mod id;
mod registry;
mod spec;

pub use id::LayerId;
pub use registry::{LayerChanges, LayerFrame, LayerRegistry};
pub use spec::{ImageRef, LayerSpec, MobileParams, SpecError};
