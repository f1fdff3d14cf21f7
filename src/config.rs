//! Construction-time configuration.

/// Default number of counter slots (the reachable handler path only ever
/// touches key 0).
pub const DEFAULT_MAX_ENTRIES: u32 = 1;

/// Default trace pipe capacity, in lines.
pub const DEFAULT_TRACE_CAPACITY: usize = 1024;

/// Capacities for a [`ProbeProgram`](crate::ProbeProgram).
///
/// Everything here is fixed at construction; no storage is resized after
/// the program is loaded.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Number of counter slots. Keys are array-style: `0..max_entries`.
    pub max_entries: u32,
    /// Maximum number of diagnostic lines the trace pipe can hold.
    pub trace_capacity: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            trace_capacity: DEFAULT_TRACE_CAPACITY,
        }
    }
}
