//! # CsimLib
//!
//! CsimLib simulates a set-associative cache with least recently used replacement over a valgrind
//! style memory trace, counting hits, misses and evictions
//!
//! The cache is described by three parameters: `s` set index bits, `E` lines per set and `b` block
//! offset bits. Each simulation owns all of its state, so several can run in one process

/// Splits addresses into tag and set index
pub mod address;

/// Contains the cache itself, and the outcome of an access
pub mod cache;

/// The logical clock used for LRU ordering
pub mod clock;

/// Contains the validated cache parameters and the JSON configuration format
pub mod config;

pub mod error;

/// Opening trace files
pub mod io;

/// Hit, miss and eviction counters
pub mod stats;

/// Contains the simulator which drives a cache from a trace
pub mod simulator;

/// Trace records and the reader which parses them
pub mod trace;

#[cfg(test)]
mod test;

/// Contains utilities for running tests and benchmarks.
pub mod util;
