pub mod edmonds_karp;
pub mod push_relabel;

use alloc::collections::BTreeMap;
use core::fmt::Debug;

use petgraph::visit::{EdgeRef, IntoEdgeReferences, IntoNodeIdentifiers};

use crate::amount::{positive_part, Amount};

pub use edmonds_karp::EdmondsKarp;
pub use push_relabel::PushRelabel;

pub type NodePair<NodeId> = (NodeId, NodeId);

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MaxFlowError {
    /// The source or the sink is not a node of the graph.
    UnknownTerminal,
}

/// The result of a max-flow computation.
#[derive(Debug, Clone, PartialEq)]
pub struct Flow<EdgeId, A> {
    /// Net flow into the sink.
    pub value: A,
    /// Flow per graph edge, only strictly positive flows are present.
    pub edges: BTreeMap<EdgeId, A>,
}

impl<EdgeId: Ord, A: Amount> Flow<EdgeId, A> {
    pub fn empty() -> Self {
        Self {
            value: A::zero(),
            edges: BTreeMap::new(),
        }
    }

    pub fn on(&self, edge: &EdgeId) -> A {
        self.edges.get(edge).copied().unwrap_or_else(A::zero)
    }
}

/// The max flow algorithm.
///
/// Edge weights are capacities, negative weights are treated the same as zero weights. The
/// returned flow is within `[0, capacity]` on every edge, conserved at every node other than
/// `source` and `sink`, and of maximum value.
pub trait MaxFlow<A> {
    type Error: Debug;

    fn max_flow<G>(
        &mut self,
        graph: G,
        source: G::NodeId,
        sink: G::NodeId,
        tolerance: A,
    ) -> Result<Flow<G::EdgeId, A>, Self::Error>
    where
        G: IntoEdgeReferences<EdgeWeight = A> + IntoNodeIdentifiers,
        G::NodeId: Ord,
        G::EdgeId: Ord;
}

/// Capacities of the arcs between ordered node pairs, with parallel edges merged and negative
/// capacities clamped to zero. Every arc has its reversal present (with zero capacity if the
/// graph has no such edge). Self-loops are left out since they never carry useful flow.
pub(crate) fn pair_capacities<G, A>(g: G) -> BTreeMap<NodePair<G::NodeId>, A>
where
    G: IntoEdgeReferences<EdgeWeight = A>,
    G::NodeId: Ord,
    A: Amount,
{
    let mut pairs = BTreeMap::new();
    for e in g.edge_references() {
        let (u, v) = (e.source(), e.target());
        if u == v {
            continue;
        }
        *pairs.entry((u, v)).or_insert_with(A::zero) += positive_part(*e.weight());
        pairs.entry((v, u)).or_insert_with(A::zero);
    }
    pairs
}

/// Splits the net flow of every node pair over the parallel graph edges realising it, filling
/// edges in graph order.
pub(crate) fn distribute<G, A>(
    g: G,
    pair_flow: &BTreeMap<NodePair<G::NodeId>, A>,
) -> BTreeMap<G::EdgeId, A>
where
    G: IntoEdgeReferences<EdgeWeight = A>,
    G::NodeId: Ord,
    G::EdgeId: Ord,
    A: Amount,
{
    let mut remaining: BTreeMap<_, _> = pair_flow
        .iter()
        .filter(|(_, flow)| **flow > A::zero())
        .map(|(pair, flow)| (*pair, *flow))
        .collect();

    let mut edges = BTreeMap::new();
    for e in g.edge_references() {
        if let Some(left) = remaining.get_mut(&(e.source(), e.target())) {
            let flow = left.min(positive_part(*e.weight()));
            if flow > A::zero() {
                *left -= flow;
                edges.insert(e.id(), flow);
            }
        }
    }
    edges
}
