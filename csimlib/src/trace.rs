use std::fmt;
use std::io::BufRead;
use std::str::FromStr;
use lazy_static::lazy_static;
use regex::Regex;
use crate::error::SimError;

lazy_static! {
    // Leading whitespace is optional, valgrind only indents data accesses
    static ref RECORD_PATTERN: Regex =
        Regex::new(r"^\s*(?P<op>\S)\s+(?P<address>[0-9a-fA-F]+),(?P<size>[0-9a-fA-F]+)\s*$")
            .expect("record pattern is valid");
}

/// The kind of memory operation a trace record describes
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operation {
    /// Instruction fetch. Traces are of the data cache only, so these are ignored
    Instruction,
    Load,
    Store,
    /// A load followed by a store to the same address
    Modify,
}

impl Operation {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Operation::Instruction),
            'L' => Some(Operation::Load),
            'S' => Some(Operation::Store),
            'M' => Some(Operation::Modify),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Operation::Instruction => 'I',
            Operation::Load => 'L',
            Operation::Store => 'S',
            Operation::Modify => 'M',
        }
    }

    /// How many cache accesses this operation performs
    ///
    /// # Examples
    ///
    /// ```
    /// use csimlib::trace::Operation;
    /// assert_eq!(Operation::Instruction.access_count(), 0);
    /// assert_eq!(Operation::Load.access_count(), 1);
    /// assert_eq!(Operation::Store.access_count(), 1);
    /// assert_eq!(Operation::Modify.access_count(), 2);
    /// ```
    #[inline]
    pub fn access_count(self) -> usize {
        match self {
            Operation::Instruction => 0,
            Operation::Load | Operation::Store => 1,
            Operation::Modify => 2,
        }
    }
}

/// One line of a trace. `size` is kept so it can be echoed back, but the simulation never splits
/// an access by it
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TraceRecord {
    pub operation: Operation,
    pub address: u64,
    pub size: u64,
}

/// Why a single line couldn't be parsed. [`TraceReader`] attaches the line number
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseRecordError(pub String);

impl fmt::Display for ParseRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseRecordError {}

/// Parses `<op> <hex-address>,<hex-size>`, e.g. ` L 7ff000398,8`
///
/// # Examples
///
/// ```
/// use csimlib::trace::{Operation, TraceRecord};
/// let record: TraceRecord = " M 7ff0005c8,8".parse().unwrap();
/// assert_eq!(record.operation, Operation::Modify);
/// assert_eq!(record.address, 0x7ff0005c8);
/// assert_eq!(record.size, 8);
/// ```
impl FromStr for TraceRecord {
    type Err = ParseRecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let captures = RECORD_PATTERN.captures(line).ok_or_else(|| {
            ParseRecordError(format!("expected `<op> <hex-address>,<hex-size>`, found `{}`", line.trim_end()))
        })?;
        let op = captures["op"].chars().next().unwrap_or_default();
        let operation = Operation::from_char(op)
            .ok_or_else(|| ParseRecordError(format!("Operation not recognized: {op}")))?;
        let address = u64::from_str_radix(&captures["address"], 16)
            .map_err(|e| ParseRecordError(format!("bad address `{}`: {e}", &captures["address"])))?;
        let size = u64::from_str_radix(&captures["size"], 16)
            .map_err(|e| ParseRecordError(format!("bad size `{}`: {e}", &captures["size"])))?;
        Ok(Self {
            operation,
            address,
            size,
        })
    }
}

/// Formatted as `<op> <hex-address>,<hex-size>`, without the leading space valgrind uses
impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{:x}", self.operation.as_char(), self.address, self.size)
    }
}

/// Lazily reads trace records from a line oriented source
///
/// Blank lines are skipped. Iteration stops after the first error, as a trace with a bad record
/// can't produce meaningful statistics
pub struct TraceReader<R: BufRead> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
    failed: bool,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line_number: 0,
            failed: false,
        }
    }

    fn malformed(&mut self, reason: String) -> SimError {
        self.failed = true;
        SimError::MalformedRecord {
            line: self.line_number,
            reason,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    self.failed = true;
                    return Some(Err(SimError::Io(e)));
                }
            }
            self.line_number += 1;
            let line = match std::str::from_utf8(&self.buffer) {
                Ok(line) => line,
                Err(e) => {
                    let reason = format!("not valid UTF-8: {e}");
                    return Some(Err(self.malformed(reason)));
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let record = line.parse::<TraceRecord>();
            return Some(record.map_err(|e| self.malformed(e.0)));
        }
    }
}
