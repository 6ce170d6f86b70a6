//! Node splitting and lower-bound elimination.
//!
//! Every capped interior node `n` becomes `n__in -> n__out` with the cap as capacity, every
//! original edge `(u, v, lo, hi)` becomes an edge from `u`'s output half to `v`'s input half with
//! capacity `hi - lo`, and the forced `lo` is recorded as a demand imbalance at both ends.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::Graph;

use crate::amount::positive_part;
use crate::config::SolverConfig;
use crate::network::Network;
use crate::node::Node;

/// Where an original node lives in the transformed graph. Both halves coincide for unsplit nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Handles {
    pub input: NodeIndex,
    pub output: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SplitNode {
    pub input: NodeIndex,
    pub output: NodeIndex,
    /// The `in -> out` edge carrying the node's whole throughput.
    pub internal: EdgeIndex,
    pub cap: f64,
}

/// An original edge together with its image in the transformed graph.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub lo: f64,
    pub hi: f64,
    pub tail: NodeIndex,
    pub head: NodeIndex,
    pub edge: EdgeIndex,
}

impl EdgeRecord {
    /// `hi < lo` beyond tolerance: no flow can satisfy this edge.
    pub fn is_inverted(&self, tolerance: f64) -> bool {
        self.hi < self.lo - tolerance
    }
}

#[derive(Clone, Debug)]
pub struct TransformedNetwork {
    /// Lower-bound free graph, edge weights are capacities. Inverted edges keep their negative
    /// `hi - lo` capacity.
    pub graph: Graph<Node, f64>,
    /// Net lower-bound imbalance per transformed node (`+lo` at heads, `-lo` at tails).
    pub demands: BTreeMap<NodeIndex, f64>,
    /// One record per original edge, in input order.
    pub edges: Vec<EdgeRecord>,
    pub splits: BTreeMap<String, SplitNode>,
    handles: BTreeMap<String, Handles>,
    sink: Handles,
}

impl TransformedNetwork {
    pub fn build(network: &Network, config: &SolverConfig) -> Self {
        let sink = network.sink();
        let sources = network.sources();

        // every node mentioned anywhere, sorted for a deterministic layout
        let names: BTreeSet<&str> = network
            .edges()
            .iter()
            .flat_map(|e| [e.from.as_str(), e.to.as_str()])
            .chain(sources.keys().map(String::as_str))
            .chain([sink])
            .collect();

        let mut graph = Graph::new();
        let mut handles = BTreeMap::new();
        let mut splits = BTreeMap::new();

        for name in names {
            // sources and the sink are never split
            let cap = network
                .node_caps()
                .get(name)
                .filter(|_| name != sink && !sources.contains_key(name));

            let node_handles = match cap {
                Some(&cap) => {
                    let input = graph.add_node(Node::In(name.to_string()));
                    let output = graph.add_node(Node::Out(name.to_string()));
                    let internal = graph.add_edge(input, output, cap);
                    splits.insert(
                        name.to_string(),
                        SplitNode {
                            input,
                            output,
                            internal,
                            cap,
                        },
                    );
                    Handles { input, output }
                }
                None => {
                    let id = graph.add_node(Node::Plain(name.to_string()));
                    Handles {
                        input: id,
                        output: id,
                    }
                }
            };
            handles.insert(name.to_string(), node_handles);
        }

        let sink = handles[sink];

        let mut demands = BTreeMap::new();
        let edges = network
            .edges()
            .iter()
            .map(|e| {
                let tail = handles[&e.from].output;
                let head = handles[&e.to].input;

                let capacity = if e.hi < e.lo - config.tolerance {
                    // keep it negative so the edge cannot silently pass as zero-capacity
                    e.hi - e.lo
                } else {
                    positive_part(e.hi - e.lo)
                };
                let edge = graph.add_edge(tail, head, capacity);

                *demands.entry(tail).or_insert(0.0) -= e.lo;
                *demands.entry(head).or_insert(0.0) += e.lo;

                EdgeRecord {
                    from: e.from.clone(),
                    to: e.to.clone(),
                    lo: e.lo,
                    hi: e.hi,
                    tail,
                    head,
                    edge,
                }
            })
            .collect();

        log::debug!(
            "transformed network: {} nodes, {} edges, {} split nodes",
            graph.node_count(),
            graph.edge_count(),
            splits.len()
        );

        Self {
            graph,
            demands,
            edges,
            splits,
            handles,
            sink,
        }
    }

    pub fn handles(&self, node: &str) -> Option<Handles> {
        self.handles.get(node).copied()
    }

    /// The sink is never split, so both halves are the same node.
    pub fn sink(&self) -> Handles {
        self.sink
    }
}
