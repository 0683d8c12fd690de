//! Neutron flux tracing
//!
//! Every fuel cell casts six independent axis-aligned rays. Each ray
//! carries its own multiplier state, so the six directions compose
//! multiplicatively in any evaluation order. Ray results also build the
//! priming graph: a fuel cell runs only if it is self-priming, sees a
//! neutron source, or receives flux from a cell that runs.

use ahash::{AHashMap, AHashSet};

use crate::core::types::{Direction, Position};
use crate::grid::block::BlockKind;
use crate::grid::model::ReactorGrid;
use crate::rules::tables::RuleSet;

/// Strategy for how a moderator's flux factor consumes ray reach.
///
/// The exact game formula is not pinned down by the reference material;
/// keeping it behind this trait lets the scheme be swapped without
/// touching the tracer.
pub trait ReachModel {
    /// Reach-budget cost of traversing one moderator cell
    fn step_cost(&self, flux_factor: u32) -> f64;
}

/// Default strategy: cost inversely proportional to flux factor,
/// normalized so a reference moderator costs exactly one budget unit.
/// Higher flux factors let rays travel proportionally further.
#[derive(Debug, Clone, Copy)]
pub struct ProportionalReach {
    pub reference_flux: f64,
}

impl Default for ProportionalReach {
    fn default() -> Self {
        // graphite-normalized
        Self { reference_flux: 10.0 }
    }
}

impl ReachModel for ProportionalReach {
    fn step_cost(&self, flux_factor: u32) -> f64 {
        self.reference_flux / f64::from(flux_factor.max(1))
    }
}

/// Traced flux state for one fuel cell
#[derive(Debug, Clone, PartialEq)]
pub struct FuelFlux {
    /// Product of the six per-direction efficiency contributions
    pub efficiency_multiplier: f64,
    /// Product of the six per-direction heat contributions
    pub heat_multiplier: f64,
    /// Other fuel cells this cell's rays reached
    pub linked: Vec<Position>,
    /// A ray from this cell crossed a neutron source
    pub source_seen: bool,
    /// Efficiency of the best source crossed, applied to power output when
    /// the cell is source-primed; 1.0 for self-priming and chain-primed cells
    pub source_efficiency: f64,
    /// Flux arrived from a source or a running neighbor
    pub flux_received: bool,
    /// The cell sustains criticality and contributes power/heat
    pub primed: bool,
}

/// Flux results for every fuel cell in the grid
#[derive(Debug, Clone, Default)]
pub struct FluxMap {
    cells: AHashMap<Position, FuelFlux>,
}

impl FluxMap {
    pub fn get(&self, pos: Position) -> Option<&FuelFlux> {
        self.cells.get(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Position, &FuelFlux)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

struct RayResult {
    efficiency: f64,
    heat: f64,
    linked: Option<Position>,
    source_efficiency: Option<f64>,
}

/// Trace all fuel cells and resolve the priming fixpoint
pub fn trace(grid: &ReactorGrid, rules: &RuleSet, reach: &dyn ReachModel) -> FluxMap {
    let mut fuel_positions: Vec<Position> = grid
        .blocks_of_kind(BlockKind::FuelCell)
        .map(|b| b.position)
        .collect();
    fuel_positions.sort_unstable();

    let mut map = FluxMap::default();
    for pos in &fuel_positions {
        let mut flux = FuelFlux {
            efficiency_multiplier: 1.0,
            heat_multiplier: 1.0,
            linked: Vec::new(),
            source_seen: false,
            source_efficiency: 1.0,
            flux_received: false,
            primed: false,
        };
        let mut best_source: Option<f64> = None;
        for dir in Direction::ALL {
            let ray = trace_ray(grid, rules, reach, *pos, dir);
            flux.efficiency_multiplier *= ray.efficiency;
            flux.heat_multiplier *= ray.heat;
            if let Some(eff) = ray.source_efficiency {
                best_source = Some(best_source.map_or(eff, |b: f64| b.max(eff)));
            }
            if let Some(other) = ray.linked {
                flux.linked.push(other);
            }
        }
        if let Some(eff) = best_source {
            flux.source_seen = true;
            flux.source_efficiency = eff;
        }
        map.cells.insert(*pos, flux);
    }

    resolve_priming(grid, rules, &mut map);
    tracing::debug!(fuel_cells = map.len(), "flux pass complete");
    map
}

/// Walk one direction from `origin` until the reach budget runs out or a
/// terminating block is hit. Each ray owns all of its state.
fn trace_ray(
    grid: &ReactorGrid,
    rules: &RuleSet,
    reach: &dyn ReachModel,
    origin: Position,
    dir: Direction,
) -> RayResult {
    let mut result = RayResult {
        efficiency: 1.0,
        heat: 1.0,
        linked: None,
        source_efficiency: None,
    };
    let mut budget = f64::from(rules.fission.neutron_reach);
    let mut pos = origin;

    loop {
        pos = pos.step(dir);
        if grid.is_casing(pos) {
            return result;
        }

        let block = match grid.block_at(pos) {
            None => {
                // empty cell: one budget unit, no contribution
                if budget < 1.0 {
                    return result;
                }
                budget -= 1.0;
                continue;
            }
            Some(b) => b,
        };

        match block.kind {
            BlockKind::Moderator => {
                let Some(values) = rules.moderators.get(&block.archetype) else {
                    return result;
                };
                let cost = reach.step_cost(values.flux_factor);
                if cost > budget {
                    return result;
                }
                budget -= cost;
                result.efficiency *= values.efficiency_factor;
                result.heat *= values.efficiency_factor;
            }
            BlockKind::Reflector => {
                if let Some(values) = rules.reflectors.get(&block.archetype) {
                    let bonus =
                        1.0 + values.reflectivity_multiplier * values.efficiency_multiplier;
                    result.efficiency *= bonus;
                    result.heat *= bonus;
                }
                return result;
            }
            BlockKind::NeutronShield => {
                if let Some(values) = rules.neutron_shields.get(&block.archetype) {
                    result.efficiency *= values.efficiency_factor;
                    result.heat *= 1.0 + f64::from(values.heat_per_flux) / 100.0;
                }
                return result;
            }
            BlockKind::FuelCell => {
                result.linked = Some(pos);
                return result;
            }
            BlockKind::NeutronSource => {
                // sources seed flux but do not block the ray
                if budget < 1.0 {
                    return result;
                }
                budget -= 1.0;
                if let Some(values) = rules.neutron_sources.get(&block.archetype) {
                    let eff = result.source_efficiency.unwrap_or(0.0);
                    result.source_efficiency = Some(eff.max(values.efficiency));
                }
            }
            // sinks, conductors, irradiators, interior casing absorb the ray
            _ => return result,
        }
    }
}

/// Propagate priming through the flux-link graph: start from self-priming
/// cells and cells that saw a source, then spread along traced links until
/// the set stops growing.
fn resolve_priming(grid: &ReactorGrid, rules: &RuleSet, map: &mut FluxMap) {
    let mut edges: AHashMap<Position, Vec<Position>> = AHashMap::new();
    for (pos, flux) in &map.cells {
        for other in &flux.linked {
            edges.entry(*pos).or_default().push(*other);
            edges.entry(*other).or_default().push(*pos);
        }
    }

    let mut primed: AHashSet<Position> = AHashSet::new();
    let mut received: AHashSet<Position> = AHashSet::new();
    let mut self_primed: AHashSet<Position> = AHashSet::new();
    let mut worklist: Vec<Position> = Vec::new();

    for (pos, flux) in &map.cells {
        let self_priming = grid
            .block_at(*pos)
            .and_then(|b| rules.fuels.get(&b.archetype))
            .map(|f| f.self_priming)
            .unwrap_or(false);
        if self_priming {
            self_primed.insert(*pos);
        }
        if flux.source_seen {
            received.insert(*pos);
        }
        if self_priming || flux.source_seen {
            primed.insert(*pos);
            worklist.push(*pos);
        }
    }

    while let Some(pos) = worklist.pop() {
        let Some(neighbors) = edges.get(&pos) else {
            continue;
        };
        for other in neighbors {
            received.insert(*other);
            if primed.insert(*other) {
                worklist.push(*other);
            }
        }
    }

    for (pos, flux) in map.cells.iter_mut() {
        flux.primed = primed.contains(pos);
        flux.flux_received = received.contains(pos);
        // a self-sustaining cell needs no source, so none penalizes it
        if self_primed.contains(pos) {
            flux.source_efficiency = 1.0;
        }
    }
}
