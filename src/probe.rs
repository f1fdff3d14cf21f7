//! Probe handler orchestration.
//!
//! [`ProbeProgram`] bundles the counter table and trace pipe a probe
//! handler operates on. [`handle`](ProbeProgram::handle) is the entry the
//! host runtime invokes once per occurrence of the attached kernel event,
//! possibly from many execution contexts at once. Which event the program
//! is attached to is the loader's business, not this crate's.

use alloc::vec::Vec;

use crate::config::ProbeConfig;
use crate::counter::CounterTable;
use crate::trace::TracePipe;

/// Counter key used by the reachable handler path.
pub const HIT_KEY: u32 = 0;

/// Value stored when the counter cell is first created.
pub const INITIAL_HITS: u64 = 1;

/// A loaded probe program: the handler entry plus the storage it is wired
/// to. Shared by reference across all execution contexts that fire it.
pub struct ProbeProgram {
    table: CounterTable,
    pipe: TracePipe,
}

impl ProbeProgram {
    /// Create a program with default capacities.
    pub fn new() -> Self {
        Self::with_config(&ProbeConfig::default())
    }

    /// Create a program with the given capacities.
    pub fn with_config(config: &ProbeConfig) -> Self {
        debug!(
            "loading probe program: {} counter slots, {} trace lines",
            config.max_entries, config.trace_capacity
        );
        Self {
            table: CounterTable::new(config.max_entries),
            pipe: TracePipe::new(config.trace_capacity),
        }
    }

    /// Handler entry point, one call per kernel event occurrence.
    ///
    /// Safe to invoke from any number of execution contexts at once. The
    /// whole path is allocation-free, lock-free, and bounded, and it
    /// always reports success: a kernel probe is not permitted to fail
    /// visibly.
    ///
    /// The first context to observe the counter absent creates it with
    /// [`INITIAL_HITS`] and returns without emitting; every later call
    /// increments the counter by one and emits one hello line. Two
    /// contexts racing on the very first event may both take the creation
    /// path, leaving the counter at 1 rather than 2 (see
    /// [`CounterTable::insert_if_absent`]).
    pub fn handle(&self) -> u32 {
        let Some(cell) = self.table.lookup(HIT_KEY) else {
            let _ = self.table.insert_if_absent(HIT_KEY, INITIAL_HITS);
            return 0;
        };
        cell.add(1);
        self.say_hello();
        0
    }

    /// Emit the single hello diagnostic line.
    pub fn say_hello(&self) -> u64 {
        self.pipe.emit("Hello, World!\n");
        0
    }

    /// Emit the four foo diagnostic lines, in order.
    ///
    /// Callable on its own; nothing reachable from
    /// [`handle`](Self::handle) invokes it.
    pub fn say_foo(&self) -> u64 {
        self.pipe.emit("Hello, Foo!\n");
        self.pipe.emit("Hello, Foo1!\n");
        self.pipe.emit("Hello, Foo2!\n");
        self.pipe.emit("Hello, Foo3!\n");
        0
    }

    /// Current hit count for [`HIT_KEY`], if the cell exists
    /// (external-reader side).
    pub fn hits(&self) -> Option<u64> {
        self.table.read(HIT_KEY)
    }

    /// Drain the diagnostic channel (external-reader side).
    pub fn drain_trace(&self) -> Vec<&'static str> {
        self.pipe.drain()
    }

    /// Diagnostic lines dropped because the channel was full.
    pub fn trace_dropped(&self) -> u64 {
        self.pipe.dropped()
    }

    /// The counter table, for direct reader-side access.
    pub fn table(&self) -> &CounterTable {
        &self.table
    }
}

impl Default for ProbeProgram {
    fn default() -> Self {
        Self::new()
    }
}
