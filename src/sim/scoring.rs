//! Scoring: per-cell output, dissipation, penalties, validity
//!
//! Combines rule-set base values with flux-tracer multipliers and cluster
//! activity into the aggregate statistics the editor displays. Scoring
//! never fails: invalid structures degrade to `valid = false` with
//! best-effort partial numbers so the caller can show why.

use crate::core::types::Axis;
use crate::grid::block::BlockKind;
use crate::grid::model::ReactorGrid;
use crate::rules::tables::{FissionValues, RuleSet};
use crate::sim::cluster::ClusterMap;
use crate::sim::flux::FluxMap;

/// Why a structure is unusable
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidityIssue {
    SpanTooSmall { axis: Axis, span: u32, min: u32 },
    SpanTooLarge { axis: Axis, span: u32, max: u32 },
    NoActiveFuel,
}

/// Aggregate statistics for one reactor layout
#[derive(Debug, Clone, PartialEq)]
pub struct ReactorStats {
    /// Power before penalties
    pub total_power: f64,
    /// Power after sparsity and cooling penalties
    pub effective_power: f64,
    pub total_heat: f64,
    /// Passive dissipation from active, requirement-satisfied sinks
    pub total_cooling: f64,
    pub sparsity_multiplier: f64,
    pub cooling_multiplier: f64,
    /// Occupied cells / bounding-box volume
    pub density: f64,
    pub fuel_cells: usize,
    pub active_fuel_cells: usize,
    pub valid: bool,
    pub issues: Vec<ValidityIssue>,
}

/// Score the grid given completed connectivity and flux passes
pub fn score(
    grid: &ReactorGrid,
    rules: &RuleSet,
    clusters: &ClusterMap,
    flux: &FluxMap,
) -> ReactorStats {
    let fission = &rules.fission;

    let mut total_power = 0.0;
    let mut total_heat = 0.0;
    let mut fuel_cells = 0;
    let mut active_fuel_cells = 0;

    for block in grid.blocks_of_kind(BlockKind::FuelCell) {
        fuel_cells += 1;
        let Some(values) = rules.fuels.get(&block.archetype) else {
            continue;
        };
        let Some(cell_flux) = flux.get(block.position) else {
            continue;
        };
        if !cell_flux.primed {
            continue;
        }
        active_fuel_cells += 1;
        let criticality = f64::from(values.criticality_factor);
        total_power += fission.power
            * values.base_efficiency
            * cell_flux.efficiency_multiplier
            * cell_flux.source_efficiency
            * criticality;
        total_heat += fission.heat_generation
            * values.base_heat
            * cell_flux.heat_multiplier
            * criticality;
    }

    let mut total_cooling = 0.0;
    for block in grid.blocks_of_kind(BlockKind::HeatSink) {
        if !clusters.is_active_at(block.position) {
            continue;
        }
        let Some(values) = rules.heat_sinks.get(&block.archetype) else {
            continue;
        };
        let satisfied = rules
            .sink_rule(&block.archetype)
            .map(|rule| rule.satisfied(grid, block.position))
            .unwrap_or(false);
        if satisfied {
            total_cooling += values.heat_passive;
        }
    }

    let density = occupied_density(grid);
    let sparsity = sparsity_multiplier(density, fission);
    let cooling = cooling_multiplier(total_heat, total_cooling, fission.cooling_penalty_leniency);
    let effective_power = total_power * sparsity * cooling;

    let mut issues = span_issues(grid, fission);
    if active_fuel_cells == 0 {
        issues.push(ValidityIssue::NoActiveFuel);
    }

    ReactorStats {
        total_power,
        effective_power,
        total_heat,
        total_cooling,
        sparsity_multiplier: sparsity,
        cooling_multiplier: cooling,
        density,
        fuel_cells,
        active_fuel_cells,
        valid: issues.is_empty(),
        issues,
    }
}

/// Occupied cells over the volume of their bounding box (1.0 when empty,
/// so an empty grid draws no sparsity penalty on its zero power)
fn occupied_density(grid: &ReactorGrid) -> f64 {
    match grid.occupied_bounds() {
        None => 1.0,
        Some((min, max)) => {
            let volume = (f64::from(max.x - min.x + 1))
                * (f64::from(max.y - min.y + 1))
                * (f64::from(max.z - min.z + 1));
            grid.len() as f64 / volume
        }
    }
}

/// Sparsity penalty: 1 at or above the density threshold, falling linearly
/// to the configured maximum multiplier at zero density
pub fn sparsity_multiplier(density: f64, fission: &FissionValues) -> f64 {
    let threshold = fission.sparsity_penalty_threshold;
    let max_mult = fission.max_sparsity_penalty_multiplier;
    if threshold <= 0.0 || density >= threshold {
        return 1.0;
    }
    max_mult + (1.0 - max_mult) * (density / threshold)
}

/// Cooling penalty: unity when dissipation covers generation, otherwise
/// damped by the leniency allowance
pub fn cooling_multiplier(heat: f64, cooling: f64, leniency: f64) -> f64 {
    if heat <= cooling || heat <= 0.0 {
        return 1.0;
    }
    ((cooling + leniency) / heat).min(1.0)
}

fn span_issues(grid: &ReactorGrid, fission: &FissionValues) -> Vec<ValidityIssue> {
    let mut issues = Vec::new();
    let Some((min, max)) = grid.occupied_bounds() else {
        return issues;
    };
    let spans = [
        (Axis::X, (max.x - min.x + 1) as u32),
        (Axis::Y, (max.y - min.y + 1) as u32),
        (Axis::Z, (max.z - min.z + 1) as u32),
    ];
    for (axis, span) in spans {
        if span < fission.min_size {
            issues.push(ValidityIssue::SpanTooSmall {
                axis,
                span,
                min: fission.min_size,
            });
        } else if span > fission.max_size {
            issues.push(ValidityIssue::SpanTooLarge {
                axis,
                span,
                max: fission.max_size,
            });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Dims, Position};
    use crate::rules::defaults::default_rules;
    use crate::sim::cluster;
    use crate::sim::flux::{self, ProportionalReach};

    fn score_grid(grid: &ReactorGrid) -> ReactorStats {
        let rules = default_rules();
        let clusters = cluster::analyze(grid);
        let flux = flux::trace(grid, &rules, &ProportionalReach::default());
        score(grid, &rules, &clusters, &flux)
    }

    #[test]
    fn test_sparsity_multiplier_boundaries() {
        let rules = default_rules();
        let fission = &rules.fission;
        assert!((sparsity_multiplier(0.75, fission) - 1.0).abs() < 1e-12);
        assert!((sparsity_multiplier(0.9, fission) - 1.0).abs() < 1e-12);
        assert!((sparsity_multiplier(0.0, fission) - 0.5).abs() < 1e-12);
        // halfway to the threshold: 0.5 + 0.5 * 0.5
        assert!((sparsity_multiplier(0.375, fission) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_cooling_multiplier_boundaries() {
        assert!((cooling_multiplier(100.0, 100.0, 10.0) - 1.0).abs() < 1e-12);
        assert!((cooling_multiplier(0.0, 0.0, 10.0) - 1.0).abs() < 1e-12);
        // 20 heat surplus over 100 cooling with leniency 10: (100+10)/120
        let m = cooling_multiplier(120.0, 100.0, 10.0);
        assert!((m - 110.0 / 120.0).abs() < 1e-12);
        // leniency can never push the multiplier above 1
        assert!((cooling_multiplier(105.0, 100.0, 10.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_cell_reference_output() {
        let rules = default_rules();
        let mut grid = ReactorGrid::new(Dims::new(3, 3, 3));
        grid.place(&rules, Position::new(1, 1, 1), "[OX]LECf-249").unwrap();

        let stats = score_grid(&grid);
        assert_eq!(stats.fuel_cells, 1);
        assert_eq!(stats.active_fuel_cells, 1);
        // power = Fission.Power * 1.75 * 1.0 * 60
        assert!((stats.total_power - 1.0 * 1.75 * 60.0).abs() < 1e-9);
        // heat = Fission.HeatGeneration * 540 * 1.0 * 60
        assert!((stats.total_heat - 1.0 * 540.0 * 60.0).abs() < 1e-9);
        assert!(stats.valid);
    }

    #[test]
    fn test_source_efficiency_scales_power() {
        let rules = default_rules();
        let mut low = ReactorGrid::new(Dims::new(3, 3, 3));
        low.place(&rules, Position::new(1, 1, 1), "[OX]TBU").unwrap();
        low.place(&rules, Position::new(0, 1, 1), "Ra-Be").unwrap();

        let mut high = ReactorGrid::new(Dims::new(3, 3, 3));
        high.place(&rules, Position::new(1, 1, 1), "[OX]TBU").unwrap();
        high.place(&rules, Position::new(0, 1, 1), "Cf-252").unwrap();

        let low_stats = score_grid(&low);
        let high_stats = score_grid(&high);
        // TBU: 1.25 efficiency, 234 criticality; Ra-Be primes at 0.9
        assert!((high_stats.total_power - 1.25 * 234.0).abs() < 1e-9);
        assert!((low_stats.total_power - 0.9 * 1.25 * 234.0).abs() < 1e-9);
        // heat generation does not depend on the source
        assert!((low_stats.total_heat - high_stats.total_heat).abs() < 1e-9);
    }

    #[test]
    fn test_unprimed_fuel_contributes_nothing() {
        let rules = default_rules();
        let mut grid = ReactorGrid::new(Dims::new(3, 3, 3));
        grid.place(&rules, Position::new(1, 1, 1), "[OX]TBU").unwrap();

        let stats = score_grid(&grid);
        assert_eq!(stats.fuel_cells, 1);
        assert_eq!(stats.active_fuel_cells, 0);
        assert_eq!(stats.total_power, 0.0);
        assert_eq!(stats.total_heat, 0.0);
        assert!(!stats.valid);
        assert!(stats.issues.contains(&ValidityIssue::NoActiveFuel));
    }

    #[test]
    fn test_inactive_cluster_sink_excluded_from_cooling() {
        let rules = default_rules();
        let mut grid = ReactorGrid::new(Dims::new(7, 7, 7));
        let fuel = Position::new(3, 3, 3);
        grid.place(&rules, fuel, "[OX]LECf-249").unwrap();
        // Water sink next to the fuel cell, isolated from casing
        grid.place(&rules, Position::new(3, 4, 3), "Water").unwrap();

        let stats = score_grid(&grid);
        assert_eq!(stats.total_cooling, 0.0);
    }

    #[test]
    fn test_active_satisfied_sink_counts() {
        let rules = default_rules();
        let mut grid = ReactorGrid::new(Dims::new(3, 3, 3));
        let fuel = Position::new(1, 1, 1);
        grid.place(&rules, fuel, "[OX]LECf-249").unwrap();
        // Water requires one adjacent fuel cell; (0,1,1) touches casing
        grid.place(&rules, Position::new(0, 1, 1), "Water").unwrap();

        let stats = score_grid(&grid);
        assert!((stats.total_cooling - 55.0).abs() < 1e-12);
    }

    #[test]
    fn test_active_unsatisfied_sink_excluded() {
        let rules = default_rules();
        let mut grid = ReactorGrid::new(Dims::new(3, 3, 3));
        // Water sink touching casing but with no fuel cell neighbor
        grid.place(&rules, Position::new(0, 1, 1), "Water").unwrap();
        grid.place(&rules, Position::new(2, 1, 1), "[OX]LECf-249").unwrap();

        let stats = score_grid(&grid);
        assert_eq!(stats.total_cooling, 0.0);
    }

    #[test]
    fn test_span_too_large_flags_invalid() {
        let rules = default_rules();
        let mut fission = rules.fission;
        fission.max_size = 2;
        let mut grid = ReactorGrid::new(Dims::new(5, 3, 3));
        grid.place(&rules, Position::new(0, 1, 1), "[OX]LECf-249").unwrap();
        grid.place(&rules, Position::new(4, 1, 1), "[OX]LECf-249").unwrap();

        let issues = span_issues(&grid, &fission);
        assert!(issues
            .iter()
            .any(|i| matches!(i, ValidityIssue::SpanTooLarge { axis: Axis::X, span: 5, .. })));
    }

    #[test]
    fn test_cooling_penalty_applies_to_effective_power() {
        let rules = default_rules();
        let mut grid = ReactorGrid::new(Dims::new(3, 3, 3));
        grid.place(&rules, Position::new(1, 1, 1), "[OX]LECf-249").unwrap();

        let stats = score_grid(&grid);
        // no cooling at all: multiplier = leniency / heat
        let expected = (10.0 / stats.total_heat).min(1.0);
        assert!((stats.cooling_multiplier - expected).abs() < 1e-12);
        assert!(
            (stats.effective_power
                - stats.total_power * stats.sparsity_multiplier * stats.cooling_multiplier)
                .abs()
                < 1e-9
        );
    }
}
