use std::fmt;
use serde::{Deserialize, Serialize};
use crate::cache::Outcome;

/// Running totals for a simulation. Outcomes can only be added, never removed
#[derive(Debug, Default, Clone)]
pub struct StatsCollector {
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies one access. An eviction always counts as a miss as well
    #[inline]
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::MissNoEviction => self.misses += 1,
            Outcome::MissWithEviction => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }
}

/// The result of a cache simulation. Can be serialised as JSON
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Summary {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl Summary {
    /// Total number of cache accesses, `hits + misses`
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }
}

/// The one line summary format, `hits:<h> misses:<m> evictions:<e>`
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hits:{} misses:{} evictions:{}", self.hits, self.misses, self.evictions)
    }
}
