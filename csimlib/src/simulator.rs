use std::io::{BufRead, Write};
use std::time::{Duration, Instant};
use crate::cache::{Cache, Outcome};
use crate::config::CacheParams;
use crate::error::SimError;
use crate::stats::{StatsCollector, Summary};
use crate::trace::{TraceReader, TraceRecord};

/// The simulator feeds trace records to a cache and collects the results.
///
/// Each simulator owns its cache, clock and counters, so any number of them can run side by side.
/// It supports calling simulate multiple times; the cache stays warm between calls, and the
/// results and time taken accumulate
///
/// Once a run fails the simulator is aborted: the totals are no longer reported, and further runs
/// are refused
pub struct Simulator {
    cache: Cache,
    stats: StatsCollector,
    simulation_time: Duration,
    aborted: bool,
}

impl Simulator {
    /// Creates a new simulator with an empty cache
    ///
    /// # Arguments
    ///
    /// * `params`: The validated cache geometry
    ///
    /// returns: Result<Simulator, SimError>
    pub fn new(params: &CacheParams) -> Result<Self, SimError> {
        let cache = Cache::new(params)?;
        log::debug!(
            "Created a cache of {} sets x {} lines, {} byte blocks",
            params.num_sets(),
            params.lines_per_set(),
            1u128 << params.block_bits()
        );
        Ok(Self {
            cache,
            stats: StatsCollector::new(),
            simulation_time: Duration::new(0, 0),
            aborted: false,
        })
    }

    /// Performs every cache access a record implies, in order, tallying each outcome
    ///
    /// `on_access` sees each outcome as it happens. A modify is simply two accesses to the same
    /// address; the second one always hits as the first has just made the line resident
    pub fn step(&mut self, record: &TraceRecord, mut on_access: impl FnMut(Outcome)) {
        for _ in 0..record.operation.access_count() {
            let outcome = self.cache.access(record.address);
            self.stats.record(outcome);
            on_access(outcome);
        }
    }

    /// Simulates the cache over a trace, returning the totals so far
    ///
    /// The first malformed record aborts the run with an error
    ///
    /// # Arguments
    ///
    /// * `reader`: The trace, one record per line
    ///
    /// returns: Result<Summary, SimError>
    pub fn simulate<R: BufRead>(&mut self, reader: R) -> Result<Summary, SimError> {
        self.run(reader, None)
    }

    /// As [`Simulator::simulate`], additionally writing each record and the outcome of each of its
    /// accesses to `out`, e.g. `M 20,1 miss hit`
    pub fn simulate_verbose<R, W>(&mut self, reader: R, mut out: W) -> Result<Summary, SimError>
    where
        R: BufRead,
        W: Write,
    {
        let summary = self.run(reader, Some(&mut out as &mut dyn Write))?;
        out.flush().map_err(|e| self.abort(SimError::Io(e)))?;
        Ok(summary)
    }

    fn run<R: BufRead>(&mut self, reader: R, verbose: Option<&mut dyn Write>) -> Result<Summary, SimError> {
        if self.aborted {
            return Err(SimError::Aborted);
        }
        let start = Instant::now();
        let result = self.fold(reader, verbose);
        let elapsed = start.elapsed();
        self.simulation_time += elapsed;
        let records = result.map_err(|e| self.abort(e))?;
        let summary = self.stats.summary();
        log::debug!("Simulated {records} records in {}s: {summary}", elapsed.as_nanos() as f64 / 1e9);
        Ok(summary)
    }

    fn abort(&mut self, error: SimError) -> SimError {
        self.aborted = true;
        error
    }

    /// Feeds every record to the cache, returning how many there were
    fn fold<R>(&mut self, reader: R, mut verbose: Option<&mut dyn Write>) -> Result<u64, SimError>
    where
        R: BufRead,
    {
        let mut records: u64 = 0;
        for record in TraceReader::new(reader) {
            let record = record?;
            records += 1;
            match verbose.as_deref_mut() {
                Some(out) => {
                    let mut result = write!(out, "{record}");
                    self.step(&record, |outcome| {
                        if result.is_ok() {
                            result = write!(out, " {outcome}");
                        }
                    });
                    result?;
                    writeln!(out)?;
                }
                None => self.step(&record, |_| {}),
            }
        }
        Ok(records)
    }

    /// The totals so far, or `None` if a run has failed, as partial totals of a bad trace are
    /// meaningless
    pub fn summary(&self) -> Option<Summary> {
        (!self.aborted).then(|| self.stats.summary())
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Gets the wall-clock execution time for processing
    pub fn get_execution_time(&self) -> &Duration {
        &self.simulation_time
    }

    /// Gets the number of cache lines which were never filled
    pub fn get_uninitialised_line_count(&self) -> usize {
        self.cache.get_uninitialised_line_count()
    }
}
