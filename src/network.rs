use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A bounded edge of the input network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEdge")]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub lo: f64,
    pub hi: f64,
}

impl Edge {
    pub fn new(from: String, to: String, lo: f64, hi: f64) -> Result<Self, Error> {
        if from.is_empty() || to.is_empty() {
            Err(Error::EmptyNodeId)
        } else if !lo.is_finite() || lo < 0.0 {
            Err(Error::InvalidLowerBound { from, to })
        } else if !hi.is_finite() {
            Err(Error::InvalidUpperBound { from, to })
        } else {
            // `hi < lo` is accepted here, the solver reports it as infeasible
            Ok(Self { from, to, lo, hi })
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawEdge {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub lo: f64,
    #[serde(default)]
    pub hi: f64,
}

impl TryFrom<RawEdge> for Edge {
    type Error = Error;

    fn try_from(e: RawEdge) -> Result<Self, Self::Error> {
        Self::new(e.from, e.to, e.lo, e.hi)
    }
}

/// A validated flow network: bounded edges, fixed source supplies, one sink and
/// optional per-node throughput caps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct Network {
    edges: Vec<Edge>,
    sources: BTreeMap<String, f64>,
    sink: String,
    node_caps: BTreeMap<String, f64>,
}

impl Network {
    pub fn new(
        edges: Vec<Edge>,
        sources: BTreeMap<String, f64>,
        sink: String,
        node_caps: BTreeMap<String, f64>,
    ) -> Result<Self, Error> {
        if sink.is_empty() {
            return Err(Error::EmptySink);
        }
        if let Some((source, _)) = sources
            .iter()
            .find(|(_, supply)| !supply.is_finite() || **supply < 0.0)
        {
            return Err(Error::InvalidSupply(source.clone()));
        }
        if let Some((node, _)) = node_caps
            .iter()
            .find(|(_, cap)| !cap.is_finite() || **cap < 0.0)
        {
            return Err(Error::InvalidCap(node.clone()));
        }

        Ok(Self {
            edges,
            sources,
            sink,
            node_caps,
        })
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn sources(&self) -> &BTreeMap<String, f64> {
        &self.sources
    }

    pub fn sink(&self) -> &str {
        &self.sink
    }

    pub fn node_caps(&self) -> &BTreeMap<String, f64> {
        &self.node_caps
    }

    pub fn total_supply(&self) -> f64 {
        self.sources.values().copied().sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawNetwork {
    #[serde(default)]
    pub edges: Vec<RawEdge>,
    #[serde(default)]
    pub sources: BTreeMap<String, f64>,
    pub sink: String,
    #[serde(default)]
    pub node_caps: BTreeMap<String, f64>,
}

impl TryFrom<RawNetwork> for Network {
    type Error = Error;

    fn try_from(n: RawNetwork) -> Result<Self, Self::Error> {
        let edges = n
            .edges
            .into_iter()
            .map(Edge::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(edges, n.sources, n.sink, n.node_caps)
    }
}
