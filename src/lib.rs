#![no_std]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod algo;
pub mod amount;
pub mod certificate;
pub mod config;
pub mod error;
pub mod feasibility;
pub mod network;
pub mod node;
pub mod report;
pub mod router;
pub mod solver;
pub mod transform;

pub use crate::algo::{EdmondsKarp, Flow, MaxFlow, MaxFlowError, PushRelabel};
pub use crate::config::SolverConfig;
pub use crate::error::Error;
pub use crate::network::{Edge, Network, RawEdge, RawNetwork};
pub use crate::node::Node;
pub use crate::report::{Certificate, Deficit, EdgeFlow, Report, Solution, TightEdge};
pub use crate::solver::BoundedFlowSolver;

/// Solves `network` with the default push-relabel oracle and default tolerances.
pub fn solve(network: &Network) -> Result<Report, Error> {
    BoundedFlowSolver::<PushRelabel>::default().solve(network)
}
