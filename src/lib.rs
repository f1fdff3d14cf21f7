//! Kernel probe hit-counter model.
//!
//! This crate models the kernel-resident side of a hit-counting probe in
//! host-testable Rust: a probe handler invoked concurrently on multiple
//! execution contexts, a fixed-capacity counter table shared with an
//! external reader, and an append-only trace pipe for diagnostic lines.
//!
//! The handler path obeys the platform constraints of a kernel probe:
//! no allocation, no locks, no unbounded loops, and it never surfaces
//! failure to the host runtime. All allocation happens once at
//! construction (load) time.
//!
//! Attaching the handler to a concrete kernel event, and the process that
//! reads the counter and drains the trace pipe, belong to an external
//! loader and reader. This crate exposes the operations they would use
//! ([`ProbeProgram::hits`], [`ProbeProgram::drain_trace`]) but not the
//! attach/detach machinery itself.
//!
//! # Quick Start
//!
//! ```
//! use hitprobe::ProbeProgram;
//!
//! let prog = ProbeProgram::new();
//!
//! // First event creates the counter; later events increment it and
//! // emit a diagnostic line.
//! prog.handle();
//! prog.handle();
//!
//! assert_eq!(prog.hits(), Some(2));
//! assert_eq!(prog.drain_trace(), ["Hello, World!\n"]);
//! ```

#![no_std]

extern crate alloc;

#[macro_use]
extern crate log;

pub mod config;
pub mod counter;
pub mod probe;
pub mod trace;

pub use config::ProbeConfig;
pub use counter::{CounterCell, CounterTable};
pub use probe::{HIT_KEY, INITIAL_HITS, ProbeProgram};
pub use trace::TracePipe;
