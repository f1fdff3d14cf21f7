//! Diagnostic trace pipe.
//!
//! Append-only, best-effort sink of static diagnostic lines, the model
//! analog of the kernel trace pipe. The writer side is wait-free and
//! allocation-free so the probe handler may call it; the reader side may
//! allocate and is serialized with a spin lock the writers never touch.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use spin::Mutex;

/// One line slot. `committed` publishes the line after it has been written.
struct LineSlot {
    committed: AtomicBool,
    line: UnsafeCell<&'static str>,
}

// Each slot index is claimed by exactly one writer via the head counter, so
// the UnsafeCell is written at most once; `committed` publishes that write.
unsafe impl Sync for LineSlot {}

/// Bounded append-only line sink.
///
/// Slots are written once and never recycled: after `capacity` lines have
/// been emitted over the pipe's lifetime, further emits are dropped. There
/// is no backpressure and no error path on the writer side.
pub struct TracePipe {
    slots: Box<[LineSlot]>,
    /// Next write index; may run past the slot count, in which case the
    /// emit is counted as dropped.
    head: AtomicUsize,
    /// Lines dropped because the pipe was full.
    dropped: AtomicU64,
    /// Reader cursor, serializing concurrent drains.
    read_pos: Mutex<usize>,
}

impl TracePipe {
    /// Create a pipe holding at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            slots.push(LineSlot {
                committed: AtomicBool::new(false),
                line: UnsafeCell::new(""),
            });
        }
        Self {
            slots: slots.into_boxed_slice(),
            head: AtomicUsize::new(0),
            dropped: AtomicU64::new(0),
            read_pos: Mutex::new(0),
        }
    }

    /// Append one line, best effort.
    ///
    /// Wait-free and allocation-free. When the pipe is full the line is
    /// silently dropped; no error reaches the caller.
    pub fn emit(&self, line: &'static str) {
        let idx = self.head.fetch_add(1, Ordering::Relaxed);
        let Some(slot) = self.slots.get(idx) else {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return;
        };
        // idx was claimed exclusively by the fetch_add above.
        unsafe { *slot.line.get() = line };
        slot.committed.store(true, Ordering::Release);
    }

    /// Consume all committed lines in emission order (reader side).
    ///
    /// Stops at the first slot that has been claimed but not yet
    /// published, so a drain racing an in-flight emit never reorders
    /// lines. May allocate; not for use from the handler path.
    pub fn drain(&self) -> Vec<&'static str> {
        let mut pos = self.read_pos.lock();
        let mut lines = Vec::new();
        while let Some(slot) = self.slots.get(*pos) {
            if !slot.committed.load(Ordering::Acquire) {
                break;
            }
            // The Acquire above orders this read after the slot write.
            lines.push(unsafe { *slot.line.get() });
            *pos += 1;
        }
        if !lines.is_empty() {
            debug!("drained {} trace lines", lines.len());
        }
        lines
    }

    /// Number of lines dropped because the pipe was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Maximum number of lines the pipe can hold.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
