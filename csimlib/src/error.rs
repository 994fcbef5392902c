use std::io;
use thiserror::Error;

/// Every way a simulation run can fail. All of them are fatal for the run; there is no partial
/// result once one of these has been returned
#[derive(Debug, Error)]
pub enum SimError {
    /// A simulation parameter is out of its domain. Reported before any simulation work begins
    #[error("Invalid -{parameter} argument: {reason}")]
    Configuration {
        parameter: &'static str,
        reason: String,
    },

    /// The trace source couldn't be opened for reading
    #[error("Couldn't open the trace file at path {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A trace line doesn't match `<op> <hex-address>,<hex-size>`, or uses an unknown operation
    #[error("Malformed trace record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Reading the trace or writing the verbose output failed part way through
    #[error("I/O error during simulation: {0}")]
    Io(#[from] io::Error),

    /// An earlier run on this simulator failed, so its state is no longer meaningful
    #[error("The simulation was aborted by an earlier error")]
    Aborted,
}

impl SimError {
    pub(crate) fn configuration(parameter: &'static str, reason: impl Into<String>) -> Self {
        SimError::Configuration {
            parameter,
            reason: reason.into(),
        }
    }
}
