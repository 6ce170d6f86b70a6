use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::algo::MaxFlow;
use crate::amount::{le_tol, positive_part, residual};
use crate::config::SolverConfig;
use crate::error::Error;
use crate::feasibility::Baseline;
use crate::network::Network;
use crate::node::Node;
use crate::transform::TransformedNetwork;

/// The final flow: baseline plus whatever supply could be pushed on top of it.
#[derive(Clone, Debug, PartialEq)]
pub struct Routing {
    /// Final flow per original edge, in input order.
    pub edges: Vec<f64>,
    /// Final throughput of every split node.
    pub internal: BTreeMap<String, f64>,
    /// Net baseline flow entering the sink.
    pub baseline_into_sink: f64,
    /// Value of the supply-phase max flow.
    pub added: f64,
}

impl Routing {
    pub fn total(&self) -> f64 {
        self.baseline_into_sink + self.added
    }
}

/// Routes source supply to the sink over the capacity left by `baseline`.
///
/// Every original edge gets a forward arc of capacity `hi - f0` and a backward arc of capacity
/// `f0 - lo`, and every split node gets `cap - f0` forward and `f0` backward on its internal
/// edge. Flow stays within bounds and node caps, and baseline circulation the feasibility solve
/// happened to pick can be rerouted, so the total does not depend on which circulation was found.
pub fn route_supply<Algo>(
    algo: &mut Algo,
    network: &Network,
    transformed: &TransformedNetwork,
    baseline: &Baseline,
    config: &SolverConfig,
) -> Result<Routing, Error>
where
    Algo: MaxFlow<f64>,
{
    let tolerance = config.tolerance;
    let mut graph = transformed.graph.map(|_, node| node.clone(), |_, _| 0.0);

    let mut backward = Vec::with_capacity(transformed.edges.len());
    for (e, &f0) in transformed.edges.iter().zip(&baseline.edges) {
        if !le_tol(f0, e.hi, tolerance) {
            log::warn!(
                "baseline flow {f0} exceeds upper bound {} on {} -> {}",
                e.hi,
                e.from,
                e.to
            );
        }
        graph[e.edge] = residual(e.hi, f0);
        backward.push(graph.add_edge(e.head, e.tail, residual(f0, e.lo)));
    }
    let mut internal_backward = BTreeMap::new();
    for (name, split) in &transformed.splits {
        let used = baseline.internal.get(name).copied().unwrap_or(0.0);
        if !le_tol(used, split.cap, tolerance) {
            log::warn!("baseline throughput {used} exceeds cap {} of {name}", split.cap);
        }
        graph[split.internal] = residual(split.cap, used);
        internal_backward.insert(
            name.as_str(),
            graph.add_edge(split.output, split.input, positive_part(used)),
        );
    }

    let aggregated = graph.add_node(Node::AggregatedSource);
    for (source, &supply) in network.sources() {
        if let Some(handles) = transformed.handles(source) {
            graph.add_edge(aggregated, handles.output, supply);
        }
    }
    let sink = transformed.sink().input;

    let flow = algo
        .max_flow(&graph, aggregated, sink, tolerance)
        .map_err(|e| Error::AlgoSpecific(format!("{e:?}")))?;

    let edges: Vec<f64> = transformed
        .edges
        .iter()
        .zip(&baseline.edges)
        .zip(&backward)
        .map(|((e, f0), back)| f0 + flow.on(&e.edge) - flow.on(back))
        .collect();
    let internal = transformed
        .splits
        .iter()
        .map(|(name, split)| {
            let used = baseline.internal.get(name).copied().unwrap_or(0.0);
            let back = internal_backward
                .get(name.as_str())
                .map_or(0.0, |back| flow.on(back));
            (name.clone(), used + flow.on(&split.internal) - back)
        })
        .collect();
    let baseline_into_sink = transformed
        .edges
        .iter()
        .zip(&baseline.edges)
        .map(|(e, f0)| match (e.head == sink, e.tail == sink) {
            (true, false) => *f0,
            (false, true) => -f0,
            _ => 0.0,
        })
        .sum();

    for (e, f) in transformed.edges.iter().zip(&edges) {
        log::trace!("{} --> {}: {f}", e.from, e.to);
    }
    log::info!(
        "supply routing: baseline into sink = {baseline_into_sink}, added = {}",
        flow.value
    );

    Ok(Routing {
        edges,
        internal,
        baseline_into_sink,
        added: flow.value,
    })
}
