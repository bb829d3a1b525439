// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame ticks and the per-frame callback registry.
//!
//! [`FrameTick`] is one display-refresh opportunity, produced by a backend
//! tick source (e.g. `requestAnimationFrame`) or by a scripted driver.
//!
//! [`TickRegistry`] is an explicit subscribe/unsubscribe arena of per-frame
//! callbacks. Each [`dispatch`](TickRegistry::dispatch) invokes the live
//! callbacks in slot order, so update order is deterministic. Handles are
//! generational: once a slot is unsubscribed, its old handle is stale and
//! an unsubscribe with it is a no-op, and the callback can never fire
//! again — teardown is a plain removal, with no lifecycle hook involved.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::time::HostTime;

/// A frame opportunity delivered by a tick source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time when the tick was generated.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}

/// A handle to a subscribed frame callback.
///
/// Contains both a slot index and a generation counter so that stale
/// handles are detected after a slot is recycled.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle {
    idx: u32,
    generation: u32,
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TickHandle({}@gen{})", self.idx, self.generation)
    }
}

type TickCallback = Box<dyn FnMut(FrameTick)>;

/// An arena of per-frame update callbacks with stable slot indices.
#[derive(Default)]
pub struct TickRegistry {
    slots: Vec<Option<TickCallback>>,
    generation: Vec<u32>,
    free_list: Vec<u32>,
}

impl fmt::Debug for TickRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickRegistry")
            .field("slots", &self.slots.len())
            .field("live", &self.len())
            .finish()
    }
}

impl TickRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a callback, returning its handle.
    ///
    /// Freed slots are recycled, so long-lived registries do not grow with
    /// subscriber churn.
    pub fn subscribe(&mut self, callback: impl FnMut(FrameTick) + 'static) -> TickHandle {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx as usize] = Some(Box::new(callback));
            idx
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "slot counts stay far below u32::MAX"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Some(Box::new(callback)));
            self.generation.push(0);
            idx
        };
        TickHandle {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Unsubscribes a callback.
    ///
    /// Stale handles (already unsubscribed, or from a recycled slot) are
    /// ignored, so double-unsubscribe during teardown is harmless.
    pub fn unsubscribe(&mut self, handle: TickHandle) {
        let slot = handle.idx as usize;
        if slot >= self.slots.len() || self.generation[slot] != handle.generation {
            return;
        }
        if self.slots[slot].take().is_some() {
            // Bump generation so the old handle immediately goes stale.
            self.generation[slot] += 1;
            self.free_list.push(handle.idx);
        }
    }

    /// Returns whether the given handle refers to a live subscription.
    #[must_use]
    pub fn is_subscribed(&self, handle: TickHandle) -> bool {
        let slot = handle.idx as usize;
        slot < self.slots.len()
            && self.generation[slot] == handle.generation
            && self.slots[slot].is_some()
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns whether the registry has no live subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invokes every live callback with `tick`, in slot order.
    pub fn dispatch(&mut self, tick: FrameTick) {
        for slot in &mut self.slots {
            if let Some(callback) = slot {
                callback(tick);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;

    use super::*;

    fn tick(frame_index: u64) -> FrameTick {
        FrameTick {
            now: HostTime(frame_index * 16_667),
            frame_index,
        }
    }

    #[test]
    fn subscribe_and_dispatch() {
        let mut reg = TickRegistry::new();
        let count = Rc::new(Cell::new(0_u32));

        let c = Rc::clone(&count);
        let _h = reg.subscribe(move |_| c.set(c.get() + 1));

        reg.dispatch(tick(0));
        reg.dispatch(tick(1));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn dispatch_order_is_slot_order() {
        let mut reg = TickRegistry::new();
        let log = Rc::new(core::cell::RefCell::new(alloc::vec::Vec::new()));

        for i in 0..3_u32 {
            let log = Rc::clone(&log);
            let _h = reg.subscribe(move |_| log.borrow_mut().push(i));
        }

        reg.dispatch(tick(0));
        assert_eq!(*log.borrow(), alloc::vec![0, 1, 2]);
    }

    #[test]
    fn unsubscribed_callback_never_fires() {
        let mut reg = TickRegistry::new();
        let count = Rc::new(Cell::new(0_u32));

        let c = Rc::clone(&count);
        let h = reg.subscribe(move |_| c.set(c.get() + 1));

        reg.dispatch(tick(0));
        reg.unsubscribe(h);
        reg.dispatch(tick(1));
        reg.dispatch(tick(2));

        assert_eq!(count.get(), 1, "no tick after unsubscribe may fire");
        assert!(!reg.is_subscribed(h));
    }

    #[test]
    fn stale_handle_does_not_remove_recycled_slot() {
        let mut reg = TickRegistry::new();
        let count = Rc::new(Cell::new(0_u32));

        let h1 = reg.subscribe(|_| {});
        reg.unsubscribe(h1);

        // Recycles the same slot with a new generation.
        let c = Rc::clone(&count);
        let h2 = reg.subscribe(move |_| c.set(c.get() + 1));
        assert!(!reg.is_subscribed(h1));
        assert!(reg.is_subscribed(h2));

        // The stale handle must not tear down the new subscriber.
        reg.unsubscribe(h1);
        reg.dispatch(tick(0));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn double_unsubscribe_is_harmless() {
        let mut reg = TickRegistry::new();
        let h = reg.subscribe(|_| {});
        reg.unsubscribe(h);
        reg.unsubscribe(h);
        assert!(reg.is_empty());
    }
}
