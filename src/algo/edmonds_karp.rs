use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::vec::Vec;

use petgraph::visit::{IntoEdgeReferences, IntoNodeIdentifiers};

use crate::algo::{distribute, pair_capacities, Flow, MaxFlow, MaxFlowError, NodePair};
use crate::amount::{scaled_tolerance, Amount};

/// Shortest augmenting paths, found by breadth-first search.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdmondsKarp;

impl<A: Amount> MaxFlow<A> for EdmondsKarp {
    type Error = MaxFlowError;

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
        G::EdgeId: Ord,
    {
        edmonds_karp_max_flow(graph, source, sink, tolerance)
    }
}

struct Residual<N, A> {
    capacities: BTreeMap<NodePair<N>, A>,
    // skew-symmetric: flow[(u, v)] == -flow[(v, u)]
    flow: BTreeMap<NodePair<N>, A>,
    adjacency: BTreeMap<N, Vec<N>>,
}

impl<N: Copy + Ord, A: Amount> Residual<N, A> {
    fn new(capacities: BTreeMap<NodePair<N>, A>) -> Self {
        let adjacency = capacities
            .keys()
            .fold(BTreeMap::<_, Vec<_>>::new(), |mut acc, (u, v)| {
                acc.entry(*u).or_default().push(*v);
                acc
            });
        let flow = capacities.keys().map(|pair| (*pair, A::zero())).collect();
        Self {
            capacities,
            flow,
            adjacency,
        }
    }

    fn residual(&self, u: N, v: N) -> A {
        self.capacities[&(u, v)] - self.flow[&(u, v)]
    }

    /// Parent pointers of a BFS tree over arcs with residual above `tolerance`.
    fn bfs(&self, source: N, target: N, tolerance: A) -> BTreeMap<N, N> {
        let mut parent = BTreeMap::new();
        let mut seen = BTreeSet::from([source]);
        let mut queue = VecDeque::from([source]);

        while let Some(u) = queue.pop_front() {
            if u == target {
                break;
            }
            for &v in self.adjacency.get(&u).into_iter().flatten() {
                if !seen.contains(&v) && self.residual(u, v) > tolerance {
                    seen.insert(v);
                    parent.insert(v, u);
                    queue.push_back(v);
                }
            }
        }
        parent
    }

    fn augment(&mut self, parent: &BTreeMap<N, N>, target: N) -> A {
        let mut bottleneck = A::infinity();
        let mut v = target;
        while let Some(&u) = parent.get(&v) {
            bottleneck = bottleneck.min(self.residual(u, v));
            v = u;
        }

        let mut v = target;
        while let Some(&u) = parent.get(&v) {
            *self.flow.entry((u, v)).or_insert_with(A::zero) += bottleneck;
            *self.flow.entry((v, u)).or_insert_with(A::zero) -= bottleneck;
            v = u;
        }
        bottleneck
    }
}

/// Computes a max flow from `source` to `target` in the weighted graph `g` with the Edmonds-Karp
/// algorithm. Semantics match [`push_relabel_max_flow`](super::push_relabel::push_relabel_max_flow).
pub fn edmonds_karp_max_flow<G, A>(
    g: G,
    source: G::NodeId,
    target: G::NodeId,
    tolerance: A,
) -> Result<Flow<G::EdgeId, A>, MaxFlowError>
where
    G: IntoEdgeReferences<EdgeWeight = A> + IntoNodeIdentifiers,
    G::NodeId: Ord,
    G::EdgeId: Ord,
    A: Amount,
{
    let nodes: BTreeSet<_> = g.node_identifiers().collect();
    if !nodes.contains(&source) || !nodes.contains(&target) {
        return Err(MaxFlowError::UnknownTerminal);
    }
    if source == target {
        return Ok(Flow::empty());
    }

    let mut residual = Residual::new(pair_capacities(g));
    let largest = residual.capacities.values().copied().fold(A::zero(), A::max);
    let tolerance = scaled_tolerance(tolerance, largest);
    let mut value = A::zero();
    loop {
        let parent = residual.bfs(source, target, tolerance);
        if !parent.contains_key(&target) {
            break;
        }
        value += residual.augment(&parent, target);
    }

    let pair_flow: BTreeMap<_, _> = residual
        .flow
        .into_iter()
        .filter(|(_, flow)| *flow > A::zero())
        .collect();

    Ok(Flow {
        value,
        edges: distribute(g, &pair_flow),
    })
}

#[cfg(test)]
mod tests {
    use petgraph::Graph;

    use super::*;
    use crate::amount::approx_eq;

    #[test]
    fn augments_through_reverse_arcs() {
        // s -> a -> t and s -> b -> t plus the cross edge a -> b; shortest paths only need the
        // two disjoint routes
        let mut g = Graph::<(), f64>::new();
        let s = g.add_node(());
        let a = g.add_node(());
        let b = g.add_node(());
        let t = g.add_node(());
        g.add_edge(s, a, 1.0);
        g.add_edge(s, b, 1.0);
        g.add_edge(a, b, 1.0);
        g.add_edge(a, t, 1.0);
        let bt = g.add_edge(b, t, 1.0);

        let flow = edmonds_karp_max_flow(&g, s, t, 1e-9).unwrap();
        assert!(approx_eq(flow.value, 2.0, 1e-9));
        assert!(approx_eq(flow.on(&bt), 1.0, 1e-9));
    }

    #[test]
    fn disconnected_sink_gets_nothing() {
        let mut g = Graph::<(), f64>::new();
        let s = g.add_node(());
        let t = g.add_node(());
        let flow = edmonds_karp_max_flow(&g, s, t, 1e-9).unwrap();
        assert_eq!(flow, Flow::empty());
    }
}
