//! Simulation passes: connectivity, flux, scoring, cost
//!
//! The first three passes are order-dependent (clusters feed scoring,
//! flux feeds scoring) and are recomputed together; cost aggregation is
//! independent and keyed only by the block population.

pub mod cluster;
pub mod cost;
pub mod flux;
pub mod scoring;

pub use cluster::{ClusterId, ClusterMap};
pub use cost::aggregate_costs;
pub use flux::{FluxMap, FuelFlux, ProportionalReach, ReachModel};
pub use scoring::{ReactorStats, ValidityIssue};

use crate::grid::model::ReactorGrid;
use crate::rules::tables::RuleSet;

/// All derived simulation state for one grid revision
#[derive(Debug, Clone)]
pub struct Derived {
    pub clusters: ClusterMap,
    pub flux: FluxMap,
    pub stats: ReactorStats,
}

/// Run the full pipeline in order: connectivity, flux trace, scoring
pub fn recompute(grid: &ReactorGrid, rules: &RuleSet, reach: &dyn ReachModel) -> Derived {
    let clusters = cluster::analyze(grid);
    let flux = flux::trace(grid, rules, reach);
    let stats = scoring::score(grid, rules, &clusters, &flux);
    tracing::debug!(
        power = stats.effective_power,
        heat = stats.total_heat,
        cooling = stats.total_cooling,
        valid = stats.valid,
        "scoring pass complete"
    );
    Derived {
        clusters,
        flux,
        stats,
    }
}
