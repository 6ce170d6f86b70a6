use alloc::string::String;
use core::fmt::{Display, Formatter};

/// A node of a transformed graph.
///
/// Capped interior nodes are split into an `In` half receiving every original inbound edge and an
/// `Out` half emitting every original outbound edge. The remaining variants are the auxiliary
/// terminals added by the two max-flow phases.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub enum Node {
    Plain(String),
    In(String),
    Out(String),
    SuperSource,
    SuperSink,
    AggregatedSource,
}

impl Node {
    /// The original node identifier, with split-node halves mapped back to their node.
    pub fn original(&self) -> Option<&str> {
        match self {
            Node::Plain(id) | Node::In(id) | Node::Out(id) => Some(id),
            Node::SuperSource | Node::SuperSink | Node::AggregatedSource => None,
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Node::Plain(id) => write!(f, "{id}"),
            Node::In(id) => write!(f, "{id}__in"),
            Node::Out(id) => write!(f, "{id}__out"),
            Node::SuperSource => write!(f, "__SUPER_SRC__"),
            Node::SuperSink => write!(f, "__SUPER_SNK__"),
            Node::AggregatedSource => write!(f, "__SRC_AGG__"),
        }
    }
}
