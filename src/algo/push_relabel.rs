use alloc::collections::{BTreeMap, VecDeque};

use petgraph::graph::NodeIndex;
use petgraph::visit::{IntoEdgeReferences, IntoNodeIdentifiers};
use petgraph::Graph;

use crate::algo::{distribute, pair_capacities, Flow, MaxFlow, MaxFlowError};
use crate::amount::{scaled_tolerance, Amount};

/// FIFO push-relabel.
#[derive(Clone, Copy, Debug, Default)]
pub struct PushRelabel;

impl<A: Amount> MaxFlow<A> for PushRelabel {
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
        push_relabel_max_flow(graph, source, sink, tolerance)
    }
}

struct Node<N, A> {
    orig_id: N,
    excess: A,
    label: usize,
}

impl<N, A: Amount> Node<N, A> {
    fn new(orig_id: N) -> Node<N, A> {
        Node {
            orig_id,
            excess: A::zero(),
            label: 0,
        }
    }
}

struct Edge<A> {
    capacity: A,
    flow: A,
}

impl<A: Amount> Edge<A> {
    fn new(capacity: A) -> Edge<A> {
        Edge {
            capacity,
            flow: A::zero(),
        }
    }
}

struct State<N, A> {
    graph: PRGraph<N, A>,
    // We need random access to the edges, so it is faster to store them in a
    // map rather than in `graph`.
    edges: BTreeMap<(NodeId, NodeId), Edge<A>>,
    source: NodeId,
    target: NodeId,
    active_queue: VecDeque<NodeId>,
    max_label: usize,
    tolerance: A,
}

type PRGraph<N, A> = Graph<Node<N, A>, ()>;
type NodeId = NodeIndex<u32>;

impl<N: Copy + Ord, A: Amount> State<N, A> {
    fn push(&mut self, u: NodeId, v: NodeId) {
        debug_assert!(self.graph[u].label == self.graph[v].label + 1);

        let amount = self.graph[u].excess.min(self.residual(u, v));
        self.add_excess(u, -amount);
        self.add_excess(v, amount);
        if let Some(e) = self.edges.get_mut(&(u, v)) {
            e.flow += amount;
        }
        if let Some(e) = self.edges.get_mut(&(v, u)) {
            e.flow -= amount;
        }
    }

    fn residual(&self, u: NodeId, v: NodeId) -> A {
        let e = &self.edges[&(u, v)];
        e.capacity - e.flow
    }

    fn has_capacity(&self, u: NodeId, v: NodeId) -> bool {
        self.residual(u, v) > A::zero()
    }

    fn can_push(&self, u: NodeId, v: NodeId) -> bool {
        self.has_capacity(u, v) && self.graph[u].label == self.graph[v].label + 1
    }

    fn add_excess(&mut self, u: NodeId, amount: A) {
        // The terminals never hold excess: the target gobbles everything up and the source is
        // where returned flow ends.
        if u == self.target || u == self.source {
            return;
        }

        let tolerance = self.tolerance;
        let node = &mut self.graph[u];
        let was_active = node.excess > tolerance;
        node.excess += amount;
        if !was_active && node.excess > tolerance {
            // We weren't active before, but we are now.
            self.active_queue.push_back(u);
        }
    }

    // Keep pushing excess flow to neighbors until we can't any more. Excess below the tolerance
    // is left behind as rounding dust.
    fn discharge(&mut self, u: NodeId) {
        let mut nbrs = self.graph.neighbors(u).detach();
        while self.graph[u].excess > self.tolerance {
            if let Some(v) = nbrs.next_node(&self.graph) {
                if self.can_push(u, v) {
                    self.push(u, v);
                }
            } else if self.relabel(u) {
                nbrs = self.graph.neighbors(u).detach();
            } else {
                log::debug!(
                    "push-relabel: leaving {:?} of excess stranded by rounding",
                    self.graph[u].excess
                );
                break;
            }
        }
    }

    // Returns false when `u` cannot be relabelled. In exact arithmetic a node with excess always
    // has a residual path back to the source, so this only happens once rounding has eaten the
    // arcs carrying its excess.
    fn relabel(&mut self, u: NodeId) -> bool {
        let min_nbr_label = self
            .graph
            .neighbors(u)
            .filter(|v| self.has_capacity(u, *v))
            .map(|v| self.graph[v].label)
            .min();
        match min_nbr_label {
            Some(label) if label < self.max_label => {
                self.graph[u].label = label + 1;
                true
            }
            _ => false,
        }
    }

    fn new<G>(
        g: G,
        source: G::NodeId,
        target: G::NodeId,
        tolerance: A,
    ) -> Result<State<G::NodeId, A>, MaxFlowError>
    where
        G: IntoEdgeReferences<EdgeWeight = A, NodeId = N> + IntoNodeIdentifiers,
    {
        // Map from nodes of `g` to nodes in `pr_graph`.
        let mut node_map = BTreeMap::new();
        let mut pr_graph = PRGraph::new();
        let mut edges = BTreeMap::new();

        for n in g.node_identifiers() {
            let pr_id = pr_graph.add_node(Node::new(n));
            node_map.insert(n, pr_id);
        }
        // The algorithm requires that every edge has its reversal present, `pair_capacities`
        // already takes care of that.
        for ((u, v), capacity) in pair_capacities(g) {
            let u = node_map[&u];
            let v = node_map[&v];
            pr_graph.add_edge(u, v, ());
            edges.insert((u, v), Edge::new(capacity));
        }

        let pr_source = *node_map
            .get(&source)
            .ok_or(MaxFlowError::UnknownTerminal)?;
        let pr_target = *node_map
            .get(&target)
            .ok_or(MaxFlowError::UnknownTerminal)?;
        let node_count = pr_graph.node_count();
        pr_graph[pr_source].label = node_count;

        let largest = edges
            .values()
            .map(|e: &Edge<A>| e.capacity)
            .fold(A::zero(), A::max);

        let mut state = State {
            edges,
            graph: pr_graph,
            source: pr_source,
            target: pr_target,
            active_queue: VecDeque::new(),
            max_label: 2 * node_count,
            tolerance: scaled_tolerance(tolerance, largest),
        };

        // Saturate every arc leaving the source.
        let mut nbrs = state.graph.neighbors(pr_source).detach();
        while let Some(v) = nbrs.next_node(&state.graph) {
            let cap = state.edges[&(pr_source, v)].capacity;
            if cap <= A::zero() {
                continue;
            }
            if let Some(e) = state.edges.get_mut(&(pr_source, v)) {
                e.flow = cap;
            }
            if let Some(e) = state.edges.get_mut(&(v, pr_source)) {
                e.flow = -cap;
            }
            state.add_excess(v, cap);
        }

        Ok(state)
    }

    fn run(&mut self) {
        while let Some(u) = self.active_queue.pop_front() {
            self.discharge(u);
        }
    }
}

/// Computes a max flow from `source` to `target` in the weighted graph `g` using the push-relabel
/// algorithm.
///
/// The edge weights in `g` are interpreted as edge capacities, negative weights are treated the
/// same as zero weights. `tolerance` is widened to the rounding error of the largest capacity, and
/// excess below it may be left at inner nodes instead of being returned to the source.
///
/// Returns the flow value together with a map from edges of `g` to their flow. The map only
/// contains edges with a strictly positive flow.
pub fn push_relabel_max_flow<G, A>(
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
    if source == target {
        return Ok(Flow::empty());
    }

    let mut state = State::new(g, source, target, tolerance)?;
    state.run();

    let graph = &state.graph;
    let pair_flow = state
        .edges
        .iter()
        .filter(|(_, data)| data.flow > A::zero())
        .map(|((u, v), data)| ((graph[*u].orig_id, graph[*v].orig_id), data.flow))
        .collect::<BTreeMap<_, _>>();
    let value = state
        .edges
        .iter()
        .filter(|((_, v), _)| *v == state.target)
        .map(|(_, data)| data.flow)
        .sum();

    Ok(Flow {
        value,
        edges: distribute(g, &pair_flow),
    })
}
