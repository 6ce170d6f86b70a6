use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use itertools::Itertools;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::{Bfs, EdgeRef};
use petgraph::Graph;

use crate::config::SolverConfig;
use crate::feasibility::FeasibilityRun;
use crate::report::{Certificate, Deficit, TightEdge};
use crate::transform::TransformedNetwork;

/// Nodes reachable from the super-source through arcs of positive residual capacity: the source
/// side of a minimum cut of the feasibility solve.
pub fn reachable_set(run: &FeasibilityRun, config: &SolverConfig) -> BTreeSet<NodeIndex> {
    let tolerance = config.tolerance;

    let mut residual = Graph::<(), ()>::with_capacity(run.graph.node_count(), 0);
    for _ in run.graph.node_indices() {
        residual.add_node(());
    }
    for e in run.graph.edge_references() {
        let flow = run.flow.on(&e.id());
        if *e.weight() - flow > tolerance {
            residual.add_edge(e.source(), e.target(), ());
        }
        if flow > tolerance {
            residual.add_edge(e.target(), e.source(), ());
        }
    }

    let mut reachable = BTreeSet::new();
    let mut bfs = Bfs::new(&residual, run.super_source);
    while let Some(n) = bfs.next(&residual) {
        reachable.insert(n);
    }
    reachable
}

/// Explains why the lower bounds cannot all be met.
pub fn build_certificate(
    run: &FeasibilityRun,
    transformed: &TransformedNetwork,
    config: &SolverConfig,
) -> Certificate {
    let reachable = reachable_set(run, config);
    let saturated =
        |edge: EdgeIndex| run.graph[edge] - run.flow.on(&edge) <= config.saturation_tolerance;

    let cut_reachable: Vec<String> = reachable
        .iter()
        .filter_map(|n| run.graph[*n].original())
        .map(ToString::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    // a node cap is the bottleneck when its internal edge is full on the source side
    let tight_nodes = transformed
        .splits
        .iter()
        .filter(|(_, split)| {
            split.cap > 0.0 && saturated(split.internal) && reachable.contains(&split.input)
        })
        .map(|(name, _)| name.clone())
        .collect();

    let tight_edges = transformed
        .edges
        .iter()
        .filter(|e| {
            reachable.contains(&e.tail) && !reachable.contains(&e.head) && saturated(e.edge)
        })
        .map(|e| TightEdge {
            from: e.from.clone(),
            to: e.to.clone(),
            flow_needed: 0.0,
        })
        .collect();

    let inverted_edges = run
        .inverted
        .iter()
        .map(|&i| {
            let e = &transformed.edges[i];
            TightEdge {
                from: e.from.clone(),
                to: e.to.clone(),
                flow_needed: e.lo - e.hi,
            }
        })
        .collect();

    log::debug!(
        "min cut source side ({} transformed nodes): {}",
        reachable.len(),
        cut_reachable.iter().join(", ")
    );

    Certificate {
        cut_reachable,
        deficit: Deficit {
            demand_balance: run.shortfall(),
            tight_nodes,
            tight_edges,
            inverted_edges,
        },
    }
}
