use alloc::string::String;

use displaydoc::Display;

#[derive(Clone, Debug, PartialEq, Display)]
pub enum Error {
    /// Invalid network, the sink identifier is empty
    EmptySink,
    /// Invalid edge, endpoint identifiers must be non-empty
    EmptyNodeId,
    /// Invalid edge `{from}` -> `{to}`, expected a finite non-negative lower bound
    InvalidLowerBound { from: String, to: String },
    /// Invalid edge `{from}` -> `{to}`, expected a finite upper bound
    InvalidUpperBound { from: String, to: String },
    /// Invalid supply for source `{0}`, expected a finite non-negative value
    InvalidSupply(String),
    /// Invalid throughput cap for node `{0}`, expected a finite non-negative value
    InvalidCap(String),
    /// Max flow algorithm specific error: {0}
    AlgoSpecific(String),
}

impl core::error::Error for Error {}
