use alloc::vec::Vec;

use crate::algo::{MaxFlow, PushRelabel};
use crate::certificate::build_certificate;
use crate::config::SolverConfig;
use crate::error::Error;
use crate::feasibility::{check_feasibility, Feasibility};
use crate::network::Network;
use crate::report::{EdgeFlow, Report, Solution};
use crate::router::route_supply;
use crate::transform::TransformedNetwork;

/// Maximum flow under lower bounds, node caps and fixed supplies.
///
/// Runs in two phases over the same transformed network: first a feasibility solve realising a
/// baseline flow that meets every lower bound, then a supply solve pushing as much source supply
/// as possible on top of it. When the first phase fails, a min-cut certificate is returned instead.
#[derive(Clone, Debug)]
pub struct BoundedFlowSolver<Algo> {
    algo: Algo,
    config: SolverConfig,
}

impl<Algo> BoundedFlowSolver<Algo> {
    pub fn new(algo: Algo, config: SolverConfig) -> Self {
        Self { algo, config }
    }
}

impl Default for BoundedFlowSolver<PushRelabel> {
    fn default() -> Self {
        Self::new(PushRelabel, SolverConfig::default())
    }
}

impl<Algo> BoundedFlowSolver<Algo>
where
    Algo: MaxFlow<f64>,
{
    pub fn solve(&mut self, network: &Network) -> Result<Report, Error> {
        let transformed = TransformedNetwork::build(network, &self.config);

        let baseline = match check_feasibility(&mut self.algo, &transformed, &self.config)? {
            Feasibility::Feasible(baseline) => baseline,
            Feasibility::Infeasible(run) => {
                let certificate = build_certificate(&run, &transformed, &self.config);
                log::info!("----------------------------------");
                log::info!("         Status = infeasible");
                log::info!(" Demand balance = {}", certificate.deficit.demand_balance);
                log::info!("    Tight nodes = {:?}", certificate.deficit.tight_nodes);
                log::info!("    Tight edges = {}", certificate.deficit.tight_edges.len());
                return Ok(Report::Infeasible(certificate));
            }
        };

        let routing = route_supply(
            &mut self.algo,
            network,
            &transformed,
            &baseline,
            &self.config,
        )?;

        let flows: Vec<_> = transformed
            .edges
            .iter()
            .zip(&routing.edges)
            .map(|(e, flow)| EdgeFlow {
                from: e.from.clone(),
                to: e.to.clone(),
                flow: *flow,
            })
            .collect();

        log::info!("----------------------------------");
        log::info!("         Status = ok");
        log::info!("   Total supply = {}", network.total_supply());
        log::info!("       Max flow = {}", routing.total());

        Ok(Report::Ok(Solution {
            max_flow_per_min: routing.total(),
            flows,
        }))
    }
}
