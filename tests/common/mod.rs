#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use bounded_flow::{Certificate, Network, Report, Solution};
use serde_json::Value;

pub const TOL: f64 = 1e-6;

pub fn network(value: Value) -> Network {
    serde_json::from_value(value).expect("valid network")
}

pub fn solution(report: &Report) -> &Solution {
    report
        .solution()
        .unwrap_or_else(|| panic!("expected ok, got {report:?}"))
}

pub fn certificate(report: &Report) -> &Certificate {
    report
        .certificate()
        .unwrap_or_else(|| panic!("expected infeasible, got {report:?}"))
}

/// Flow per `(from, to)`, parallel edges summed.
pub fn flow_map(solution: &Solution) -> BTreeMap<(String, String), f64> {
    solution
        .flows
        .iter()
        .fold(BTreeMap::new(), |mut acc, f| {
            *acc.entry((f.from.clone(), f.to.clone())).or_default() += f.flow;
            acc
        })
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= TOL,
        "expected {expected}, got {actual}"
    );
}

/// Checks a solution against the network it claims to solve: bounds, conservation, node caps,
/// supplies and the reported total.
pub fn assert_valid_solution(network: &Network, solution: &Solution) {
    assert_eq!(solution.flows.len(), network.edges().len());

    let mut inflow = BTreeMap::<&str, f64>::new();
    let mut outflow = BTreeMap::<&str, f64>::new();
    for (edge, flow) in network.edges().iter().zip(&solution.flows) {
        assert_eq!((&edge.from, &edge.to), (&flow.from, &flow.to));
        assert!(
            flow.flow >= edge.lo - TOL && flow.flow <= edge.hi + TOL,
            "{} -> {} carries {} outside [{}, {}]",
            edge.from,
            edge.to,
            flow.flow,
            edge.lo,
            edge.hi
        );
        *outflow.entry(&edge.from).or_default() += flow.flow;
        *inflow.entry(&edge.to).or_default() += flow.flow;
    }

    let nodes: BTreeSet<&str> = inflow.keys().chain(outflow.keys()).copied().collect();
    for node in nodes {
        let net_out = outflow.get(node).copied().unwrap_or(0.0) - inflow.get(node).copied().unwrap_or(0.0);
        if node == network.sink() {
            continue;
        }
        match network.sources().get(node) {
            // a source injects at most its supply
            Some(&supply) => assert!(
                net_out >= -TOL && net_out <= supply + TOL,
                "source {node} sends {net_out} with supply {supply}"
            ),
            None => assert!(net_out.abs() <= TOL, "{node} not conserved: {net_out}"),
        }
    }

    for (node, &cap) in network.node_caps() {
        if node == network.sink() || network.sources().contains_key(node) {
            continue;
        }
        let throughput = inflow
            .get(node.as_str())
            .copied()
            .unwrap_or(0.0)
            .max(outflow.get(node.as_str()).copied().unwrap_or(0.0));
        assert!(throughput <= cap + TOL, "{node} carries {throughput} over cap {cap}");
    }

    let sink_in = inflow.get(network.sink()).copied().unwrap_or(0.0);
    let sink_out = outflow.get(network.sink()).copied().unwrap_or(0.0);
    assert_close(solution.max_flow_per_min, sink_in);
    assert!(sink_out <= TOL, "unexpected flow leaving the sink");
    assert!(solution.max_flow_per_min <= network.total_supply() + TOL);
}

/// Name-level certificate checks: a tight edge leaves the reported source side.
pub fn assert_edges_cross_cut(certificate: &Certificate) {
    let reachable: BTreeSet<&str> = certificate.cut_reachable.iter().map(String::as_str).collect();
    let mut sorted = certificate.cut_reachable.clone();
    sorted.sort();
    assert_eq!(sorted, certificate.cut_reachable);

    for edge in &certificate.deficit.tight_edges {
        assert!(reachable.contains(edge.from.as_str()), "{edge:?} starts outside the cut");
        assert!(!reachable.contains(edge.to.as_str()), "{edge:?} ends inside the cut");
    }
}

/// Small deterministic generator for layered test networks.
pub struct XorShift(pub u64);

impl XorShift {
    pub fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    pub fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

/// Sources `s*` feed a layer of mids `n*` that feed the sink, with random cross edges and caps.
/// All lower bounds are zero so every instance is feasible.
pub fn random_network(seed: u64, mids: usize) -> Network {
    let mut rng = XorShift(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1);
    let mut edges = Vec::new();
    let mut sources = serde_json::Map::new();
    let mut caps = serde_json::Map::new();

    for s in 1..=3 {
        let source = format!("s{s}");
        sources.insert(source.clone(), Value::from(100 * (1 + rng.below(10))));
        for _ in 0..2 {
            let mid = format!("n{}", rng.below(mids as u64));
            edges.push(serde_json::json!({"from": source, "to": mid, "hi": 50 * (1 + rng.below(10))}));
        }
    }
    for m in 0..mids {
        let mid = format!("n{m}");
        edges.push(serde_json::json!({"from": mid, "to": "sink", "hi": 50 * (1 + rng.below(10))}));
        let other = rng.below(mids as u64) as usize;
        if other != m {
            edges.push(serde_json::json!({"from": mid, "to": format!("n{other}"), "hi": 100 * (1 + rng.below(5))}));
        }
        if rng.below(3) == 0 {
            caps.insert(mid, Value::from(100 * (1 + rng.below(5))));
        }
    }

    network(serde_json::json!({
        "edges": edges,
        "sources": sources,
        "sink": "sink",
        "node_caps": caps,
    }))
}

fn amount(rng: &mut XorShift, scale: f64) -> f64 {
    (1 + rng.below(10_000)) as f64 / 100.0 * scale
}

/// Like [`random_network`] but with fractional amounts multiplied by `scale`, and about a third
/// of the inner edges carrying a lower bound. Each bounded edge gets a return edge so the bound
/// can circulate, but caps may still make an instance infeasible.
pub fn random_bounded_network(seed: u64, nodes: u64, scale: f64) -> Network {
    let mut rng = XorShift(seed.wrapping_mul(0xD1B5_4A32_D192_ED03) | 1);
    let mut edges = Vec::new();
    let mut sources = serde_json::Map::new();
    let mut caps = serde_json::Map::new();

    for s in 1..=2 {
        let source = format!("s{s}");
        sources.insert(source.clone(), Value::from(3.0 * amount(&mut rng, scale)));
        for _ in 0..2 {
            let to = format!("n{}", rng.below(nodes));
            edges.push(serde_json::json!({"from": source, "to": to, "hi": amount(&mut rng, scale)}));
        }
    }
    for i in 0..nodes {
        edges.push(serde_json::json!({"from": format!("n{i}"), "to": "sink", "hi": amount(&mut rng, scale)}));
        if rng.below(3) == 0 {
            caps.insert(format!("n{i}"), Value::from(2.0 * amount(&mut rng, scale)));
        }
    }
    for _ in 0..2 * nodes {
        let (i, j) = (rng.below(nodes), rng.below(nodes));
        if i == j {
            continue;
        }
        let (from, to) = (format!("n{i}"), format!("n{j}"));
        let hi = amount(&mut rng, scale);
        if rng.below(3) == 0 {
            let lo = hi * rng.below(60) as f64 / 100.0;
            let back = lo + amount(&mut rng, scale);
            edges.push(serde_json::json!({"from": from, "to": to, "lo": lo, "hi": hi}));
            edges.push(serde_json::json!({"from": to, "to": from, "hi": back}));
        } else {
            edges.push(serde_json::json!({"from": from, "to": to, "hi": hi}));
        }
    }

    network(serde_json::json!({
        "edges": edges,
        "sources": sources,
        "sink": "sink",
        "node_caps": caps,
    }))
}
