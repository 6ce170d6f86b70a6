use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// The response to a solve: either a maximum flow or a proof that the lower bounds are
/// unsatisfiable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Report {
    Ok(Solution),
    Infeasible(Certificate),
}

impl Report {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Report::Ok(solution) => Some(solution),
            Report::Infeasible(_) => None,
        }
    }

    pub fn certificate(&self) -> Option<&Certificate> {
        match self {
            Report::Ok(_) => None,
            Report::Infeasible(certificate) => Some(certificate),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Total flow delivered to the sink.
    pub max_flow_per_min: f64,
    /// One entry per input edge, in input order.
    pub flows: Vec<EdgeFlow>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeFlow {
    pub from: String,
    pub to: String,
    pub flow: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    /// Original nodes on the source side of the minimum cut, sorted.
    pub cut_reachable: Vec<String>,
    pub deficit: Deficit,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deficit {
    /// Required lower-bound flow that provably cannot be routed.
    pub demand_balance: f64,
    /// Capped nodes whose cap is saturated on the source side of the cut, sorted.
    pub tight_nodes: Vec<String>,
    /// Saturated edges crossing the cut.
    pub tight_edges: Vec<TightEdge>,
    /// Edges whose upper bound is below their lower bound.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inverted_edges: Vec<TightEdge>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TightEdge {
    pub from: String,
    pub to: String,
    pub flow_needed: f64,
}
