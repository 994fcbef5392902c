use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use serde::Deserialize;
use crate::error::SimError;

/// The validated geometry of a cache: `2^s` sets of `E` lines, each line holding a `2^b` byte
/// block
///
/// Only constructible through [`CacheParams::new`], so holding one means the parameters are in
/// range
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CacheParams {
    set_bits: u32,
    lines_per_set: usize,
    block_bits: u32,
}

impl CacheParams {
    /// Validates raw parameters, as they'd arrive from the command line or a config file
    ///
    /// # Arguments
    ///
    /// * `set_bits`: Number of set index bits, `s >= 0`
    /// * `lines_per_set`: Associativity, `E >= 1`
    /// * `block_bits`: Number of block offset bits, `b >= 0`
    ///
    /// returns: Result<CacheParams, SimError>
    ///
    /// # Examples
    ///
    /// ```
    /// use csimlib::config::CacheParams;
    /// let params = CacheParams::new(4, 2, 4).unwrap();
    /// assert_eq!(params.num_sets(), 16);
    /// assert_eq!(params.num_lines(), 32);
    /// assert!(CacheParams::new(4, 0, 4).is_err());
    /// ```
    pub fn new(set_bits: i64, lines_per_set: i64, block_bits: i64) -> Result<Self, SimError> {
        if set_bits < 0 {
            let reason = format!("{set_bits} set index bits, must be at least 0");
            return Err(SimError::configuration("s", reason));
        }
        if lines_per_set < 1 {
            let reason = format!("{lines_per_set} lines per set, must be at least 1");
            return Err(SimError::configuration("E", reason));
        }
        if block_bits < 0 {
            let reason = format!("{block_bits} block offset bits, must be at least 0");
            return Err(SimError::configuration("b", reason));
        }
        if set_bits.saturating_add(block_bits) > u64::BITS as i64 {
            return Err(SimError::configuration("s", format!(
                "{set_bits} set index bits and {block_bits} block offset bits don't fit in a {}-bit address",
                u64::BITS
            )));
        }
        let lines_per_set = usize::try_from(lines_per_set).map_err(|_| {
            SimError::configuration("E", format!("{lines_per_set} lines per set is too large"))
        })?;
        let num_sets = 1usize
            .checked_shl(set_bits as u32)
            .ok_or_else(|| SimError::configuration("s", format!("2^{set_bits} sets is too large")))?;
        num_sets.checked_mul(lines_per_set).ok_or_else(|| {
            SimError::configuration("E", format!("2^{set_bits} sets of {lines_per_set} lines is too large"))
        })?;
        Ok(Self {
            set_bits: set_bits as u32,
            lines_per_set,
            block_bits: block_bits as u32,
        })
    }

    pub fn set_bits(&self) -> u32 {
        self.set_bits
    }

    pub fn lines_per_set(&self) -> usize {
        self.lines_per_set
    }

    pub fn block_bits(&self) -> u32 {
        self.block_bits
    }

    /// `S = 2^s`
    pub fn num_sets(&self) -> usize {
        1 << self.set_bits
    }

    /// `S * E`, checked against overflow on construction
    pub fn num_lines(&self) -> usize {
        self.num_sets() * self.lines_per_set
    }
}

/// A cache configuration as read from JSON. Every field is optional so the command line can fill
/// in or override individual parameters
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default, alias = "s")]
    pub set_bits: Option<i64>,
    #[serde(default, alias = "E")]
    pub lines_per_set: Option<i64>,
    #[serde(default, alias = "b")]
    pub block_bits: Option<i64>,
}

impl CacheConfig {
    /// Reads a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            let reason = format!("couldn't open the config file at path {}: {e}", path.display());
            SimError::configuration("c", reason)
        })?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SimError::configuration("c", format!("couldn't parse the config file: {e}")))
    }

    /// Takes each parameter from `overrides` where present, falling back to this configuration
    pub fn merge(&self, overrides: &CacheConfig) -> CacheConfig {
        CacheConfig {
            set_bits: overrides.set_bits.or(self.set_bits),
            lines_per_set: overrides.lines_per_set.or(self.lines_per_set),
            block_bits: overrides.block_bits.or(self.block_bits),
        }
    }

    /// Validates the configuration. A parameter missing here is a configuration error
    pub fn to_params(&self) -> Result<CacheParams, SimError> {
        let set_bits = self.set_bits.ok_or_else(|| SimError::configuration("s", "missing"))?;
        let lines_per_set = self.lines_per_set.ok_or_else(|| SimError::configuration("E", "missing"))?;
        let block_bits = self.block_bits.ok_or_else(|| SimError::configuration("b", "missing"))?;
        CacheParams::new(set_bits, lines_per_set, block_bits)
    }
}
