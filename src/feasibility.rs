use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::Graph;

use crate::algo::{Flow, MaxFlow};
use crate::amount::{le_tol, positive_part, scaled_tolerance};
use crate::config::SolverConfig;
use crate::error::Error;
use crate::node::Node;
use crate::transform::TransformedNetwork;

/// A lower-bound satisfying flow `f0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Baseline {
    /// Flow per original edge, `lo + f'` where `f'` is the flow found on the transformed edge.
    pub edges: Vec<f64>,
    /// Flow through the internal edge of every split node.
    pub internal: BTreeMap<String, f64>,
}

/// The auxiliary super-source/super-sink max-flow solve, kept around for certificate building.
#[derive(Clone, Debug)]
pub struct FeasibilityRun {
    /// The transformed graph (capacities clamped at zero) plus the demand edges.
    pub graph: Graph<Node, f64>,
    pub super_source: NodeIndex,
    pub super_sink: NodeIndex,
    pub flow: Flow<EdgeIndex, f64>,
    /// Sum of positive demands, i.e. the capacity leaving the super-source.
    pub total_demand: f64,
    /// Indices of original edges with `hi < lo`.
    pub inverted: Vec<usize>,
}

impl FeasibilityRun {
    /// Required lower-bound flow that was not routed.
    pub fn shortfall(&self) -> f64 {
        positive_part(self.total_demand - self.flow.value)
    }
}

#[derive(Clone, Debug)]
pub enum Feasibility {
    Feasible(Baseline),
    Infeasible(FeasibilityRun),
}

/// Tests whether every lower bound can be met at once and, if so, realises one such flow.
///
/// A circulation meeting all bounds exists iff the max flow from the super-source (feeding every
/// node with positive demand) to the super-sink (draining every node with negative demand)
/// saturates all super-source edges. Inverted edges make the instance infeasible regardless.
pub fn check_feasibility<Algo>(
    algo: &mut Algo,
    transformed: &TransformedNetwork,
    config: &SolverConfig,
) -> Result<Feasibility, Error>
where
    Algo: MaxFlow<f64>,
{
    let tolerance = config.tolerance;

    let mut graph = transformed
        .graph
        .map(|_, node| node.clone(), |_, capacity| positive_part(*capacity));
    let super_source = graph.add_node(Node::SuperSource);
    let super_sink = graph.add_node(Node::SuperSink);

    let mut total_demand = 0.0;
    for (&node, &demand) in &transformed.demands {
        if demand > tolerance {
            graph.add_edge(super_source, node, demand);
            total_demand += demand;
        } else if demand < -tolerance {
            graph.add_edge(node, super_sink, -demand);
        }
    }

    let flow = algo
        .max_flow(&graph, super_source, super_sink, tolerance)
        .map_err(|e| Error::AlgoSpecific(format!("{e:?}")))?;

    let inverted: Vec<_> = transformed
        .edges
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_inverted(tolerance))
        .map(|(i, _)| i)
        .collect();

    log::info!(
        "lower bounds: total demand = {total_demand}, routed = {}, inverted edges = {}",
        flow.value,
        inverted.len()
    );

    let slack = scaled_tolerance(tolerance, total_demand);
    if !le_tol(total_demand, flow.value, slack) || !inverted.is_empty() {
        return Ok(Feasibility::Infeasible(FeasibilityRun {
            graph,
            super_source,
            super_sink,
            flow,
            total_demand,
            inverted,
        }));
    }

    let edges = transformed
        .edges
        .iter()
        .map(|e| e.lo + flow.on(&e.edge))
        .collect();
    let internal = transformed
        .splits
        .iter()
        .map(|(name, split)| (name.clone(), flow.on(&split.internal)))
        .collect();

    Ok(Feasibility::Feasible(Baseline { edges, internal }))
}
