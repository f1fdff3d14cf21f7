//! Shared hit-counter storage.
//!
//! A fixed-capacity array-style map from small integer keys to 64-bit
//! counters, shared between concurrent handler invocations and an external
//! reader. Storage is allocated once at construction; lookup, insert, and
//! increment are lock-free and allocation-free so they are safe to call
//! from the restricted handler path.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// One counter slot. `present` publishes the slot to readers after the
/// initial value has been stored.
struct Slot {
    present: AtomicBool,
    value: AtomicU64,
}

/// Fixed-capacity keyed counter storage.
///
/// Cells are created lazily by [`insert_if_absent`](Self::insert_if_absent)
/// and never deleted; once created, a cell lives until the table itself is
/// dropped.
pub struct CounterTable {
    slots: Box<[Slot]>,
}

/// Handle to one storage cell inside a [`CounterTable`].
#[derive(Clone, Copy)]
pub struct CounterCell<'a> {
    value: &'a AtomicU64,
}

impl CounterTable {
    /// Create a table with `max_entries` slots, all absent.
    pub fn new(max_entries: u32) -> Self {
        let mut slots = Vec::with_capacity(max_entries as usize);
        for _ in 0..max_entries {
            slots.push(Slot {
                present: AtomicBool::new(false),
                value: AtomicU64::new(0),
            });
        }
        debug!("created counter table with {} slots", max_entries);
        Self {
            slots: slots.into_boxed_slice(),
        }
    }

    /// Number of slots. Valid keys are `0..capacity()`.
    pub fn capacity(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Get a handle to the cell for `key`, if one has been created.
    ///
    /// Returns `None` for absent or out-of-range keys. Does not allocate,
    /// block, or loop.
    pub fn lookup(&self, key: u32) -> Option<CounterCell<'_>> {
        let slot = self.slots.get(key as usize)?;
        if slot.present.load(Ordering::Acquire) {
            Some(CounterCell { value: &slot.value })
        } else {
            None
        }
    }

    /// Create the cell for `key` holding `initial` and publish it to
    /// concurrent lookups.
    ///
    /// Callers are expected to have observed the key as absent. The store
    /// is unconditional (update-any semantics), so lookup-then-insert is
    /// not one atomic transaction: two contexts racing on the same absent
    /// key both write `initial` and the cell ends up holding `initial`,
    /// not `2 * initial`. Last writer wins.
    ///
    /// Returns `None` for out-of-range keys; no error is surfaced.
    pub fn insert_if_absent(&self, key: u32, initial: u64) -> Option<CounterCell<'_>> {
        let slot = self.slots.get(key as usize)?;
        slot.value.store(initial, Ordering::Relaxed);
        // Release pairs with the Acquire in lookup(): a context that sees
        // the cell as present also sees the initial value.
        slot.present.store(true, Ordering::Release);
        Some(CounterCell { value: &slot.value })
    }

    /// Snapshot read of the counter for `key` (external-reader side).
    ///
    /// May run at any time concurrently with handler-side writes; the
    /// result is eventually consistent.
    pub fn read(&self, key: u32) -> Option<u64> {
        self.lookup(key).map(|cell| cell.get())
    }
}

impl CounterCell<'_> {
    /// Atomically add `delta` to the cell, returning the previous value.
    ///
    /// A single fetch-and-add: N concurrent calls on the same cell always
    /// net exactly +N.
    pub fn add(&self, delta: u64) -> u64 {
        self.value.fetch_add(delta, Ordering::Relaxed)
    }

    /// Current value of the cell.
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}
