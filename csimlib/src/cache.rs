use std::fmt;
use crate::address::AddressDecoder;
use crate::clock::RecencyClock;
use crate::config::CacheParams;
use crate::error::SimError;

/// The result of a single cache access
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Outcome {
    Hit,
    /// A miss which filled a line that had never been used
    MissNoEviction,
    /// A miss which replaced a valid line
    MissWithEviction,
}

/// Formatted the way the verbose trace reports it
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Hit => f.write_str("hit"),
            Outcome::MissNoEviction => f.write_str("miss"),
            Outcome::MissWithEviction => f.write_str("miss eviction"),
        }
    }
}

/// One storage slot. `last_used` is 0 until the line is first filled
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct CacheLine {
    pub valid: bool,
    pub tag: u64,
    pub last_used: u64,
}

/// A set-associative cache with least recently used replacement
///
/// All `S * E` lines live in one flat vector, set `n` occupying `n * E..(n + 1) * E`. The line
/// order within a set only matters as the scan order, which is also the tie-break order when
/// choosing a victim
///
/// The cache owns its recency clock, so independent caches never share logical time
pub struct Cache {
    decoder: AddressDecoder,
    lines: Vec<CacheLine>,
    lines_per_set: usize,
    clock: RecencyClock,
}

impl Cache {
    /// Creates an empty cache, every line invalid
    ///
    /// Fails with a configuration error if the lines can't be allocated
    pub fn new(params: &CacheParams) -> Result<Self, SimError> {
        let num_lines = params.num_lines();
        let mut lines = Vec::new();
        lines.try_reserve_exact(num_lines).map_err(|e| {
            SimError::configuration("s", format!("couldn't allocate {num_lines} cache lines: {e}"))
        })?;
        lines.resize(num_lines, CacheLine::default());
        Ok(Self {
            decoder: AddressDecoder::from_params(params),
            lines,
            lines_per_set: params.lines_per_set(),
            clock: RecencyClock::new(),
        })
    }

    /// Looks up the line holding `address`, filling it on a miss
    ///
    /// Every line inspected during the scan advances the clock by one, whether or not it matches,
    /// and a touched line is stamped with the clock value at that point. On a miss the victim is
    /// the line with the oldest stamp; never filled lines sit at 0 so they're always taken first,
    /// and ties go to the lowest index
    ///
    /// # Arguments
    ///
    /// * `address`: The address being accessed. The size of the access is not considered, an
    /// access straddling two lines only touches the first
    ///
    /// returns: Outcome
    pub fn access(&mut self, address: u64) -> Outcome {
        let (tag, set) = self.decoder.decode(address);
        let lower_bound = set as usize * self.lines_per_set;
        let lines = &mut self.lines[lower_bound..lower_bound + self.lines_per_set];
        let mut victim = 0;
        for index in 0..lines.len() {
            let now = self.clock.tick();
            let line = &mut lines[index];
            if line.valid && line.tag == tag {
                line.last_used = now;
                return Outcome::Hit;
            }
            if lines[index].last_used < lines[victim].last_used {
                victim = index;
            }
        }
        let line = &mut lines[victim];
        let outcome = if line.valid {
            Outcome::MissWithEviction
        } else {
            line.valid = true;
            Outcome::MissNoEviction
        };
        line.tag = tag;
        line.last_used = self.clock.now();
        outcome
    }

    /// The lines of one set, in scan order
    pub fn set(&self, set: usize) -> &[CacheLine] {
        let lower_bound = set * self.lines_per_set;
        &self.lines[lower_bound..lower_bound + self.lines_per_set]
    }

    pub fn num_sets(&self) -> usize {
        self.lines.len() / self.lines_per_set
    }

    pub fn lines_per_set(&self) -> usize {
        self.lines_per_set
    }

    /// The logical time of the most recent line inspection
    pub fn time(&self) -> u64 {
        self.clock.now()
    }

    /// Gets the number of lines which have never been filled. Useful for analysing cache
    /// performance or debugging
    pub fn get_uninitialised_line_count(&self) -> usize {
        self.lines.iter().filter(|line| !line.valid).count()
    }
}
