//! Property-based tests for the simulation passes.
//!
//! Covers: direction symmetry of the flux tracer, monotonicity of the
//! sparsity and cooling penalties, and linearity of cost aggregation.

use proptest::prelude::*;

use fission_planner::core::types::{Dims, Direction, Position};
use fission_planner::grid::model::ReactorGrid;
use fission_planner::rules::default_rules;
use fission_planner::sim::flux::{self, ProportionalReach};
use fission_planner::sim::scoring::{cooling_multiplier, sparsity_multiplier};
use fission_planner::sim::aggregate_costs;

/// Archetypes a flux ray can meet one step from the cell. Index 0 leaves
/// the neighbor empty.
const NEIGHBOR_CHOICES: [Option<&str>; 5] = [
    None,
    Some("Graphite"),
    Some("Beryllium"),
    Some("Beryllium-Carbon"),
    Some("Boron-Silver"),
];

fn trace_with_neighbors(assignment: &[usize; 6]) -> (f64, f64) {
    let rules = default_rules();
    let mut grid = ReactorGrid::new(Dims::new(5, 5, 5));
    let center = Position::new(2, 2, 2);
    grid.place(&rules, center, "[OX]LECf-249").unwrap();

    for (slot, choice) in assignment.iter().enumerate() {
        if let Some(archetype) = NEIGHBOR_CHOICES[*choice] {
            let pos = center.step(Direction::ALL[slot]);
            grid.place(&rules, pos, archetype).unwrap();
        }
    }

    let map = flux::trace(&grid, &rules, &ProportionalReach::default());
    let cell = map.get(center).unwrap();
    (cell.efficiency_multiplier, cell.heat_multiplier)
}

proptest! {
    /// The six rays compose multiplicatively, so rearranging the same
    /// neighbor blocks across directions never changes the result.
    #[test]
    fn flux_multipliers_ignore_direction_assignment(
        choices in prop::array::uniform6(0usize..NEIGHBOR_CHOICES.len()),
        perm in Just(vec![0usize, 1, 2, 3, 4, 5]).prop_shuffle(),
    ) {
        let mut permuted = [0usize; 6];
        for (slot, source) in perm.iter().enumerate() {
            permuted[slot] = choices[*source];
        }

        let (eff_a, heat_a) = trace_with_neighbors(&choices);
        let (eff_b, heat_b) = trace_with_neighbors(&permuted);
        prop_assert!((eff_a - eff_b).abs() < 1e-12,
            "efficiency {} vs {} under permutation {:?}", eff_a, eff_b, perm);
        prop_assert!((heat_a - heat_b).abs() < 1e-12,
            "heat {} vs {} under permutation {:?}", heat_a, heat_b, perm);
    }
}

proptest! {
    /// Denser layouts are never penalized harder than sparser ones, and
    /// the penalty vanishes at or above the threshold.
    #[test]
    fn sparsity_penalty_monotonic_in_density(
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let fission = default_rules().fission;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let m_lo = sparsity_multiplier(lo, &fission);
        let m_hi = sparsity_multiplier(hi, &fission);
        prop_assert!(m_lo <= m_hi + 1e-12, "{} > {}", m_lo, m_hi);
        prop_assert!(m_hi <= 1.0 + 1e-12);
        prop_assert!(m_lo >= fission.max_sparsity_penalty_multiplier - 1e-12);
        if hi >= fission.sparsity_penalty_threshold {
            prop_assert!((m_hi - 1.0).abs() < 1e-12);
        }
    }

    /// More dissipation (or more leniency) never lowers the cooling
    /// multiplier, and the multiplier never exceeds unity.
    #[test]
    fn cooling_penalty_monotonic_in_dissipation(
        heat in 1.0f64..100_000.0,
        c1 in 0.0f64..100_000.0,
        c2 in 0.0f64..100_000.0,
        leniency in 0.0f64..1_000.0,
    ) {
        let (lo, hi) = if c1 <= c2 { (c1, c2) } else { (c2, c1) };
        let m_lo = cooling_multiplier(heat, lo, leniency);
        let m_hi = cooling_multiplier(heat, hi, leniency);
        prop_assert!(m_lo <= m_hi + 1e-12, "{} > {}", m_lo, m_hi);
        prop_assert!(m_hi <= 1.0 + 1e-12);

        let m_more_lenient = cooling_multiplier(heat, lo, leniency + 5.0);
        prop_assert!(m_lo <= m_more_lenient + 1e-12);
    }
}

proptest! {
    /// Doubling the block population doubles every cost above the fixed
    /// casing-shell baseline.
    #[test]
    fn costs_scale_linearly_with_count(n in 1usize..=5) {
        let rules = default_rules();
        let dims = Dims::new(10, 1, 1);
        let baseline = aggregate_costs(&ReactorGrid::new(dims), &rules);

        let populate = |count: usize| {
            let mut grid = ReactorGrid::new(dims);
            for x in 0..count {
                grid.place(&rules, Position::new(x as i32, 0, 0), "Water").unwrap();
            }
            aggregate_costs(&grid, &rules)
        };

        let single = populate(n);
        let doubled = populate(2 * n);
        for (resource, total) in &single {
            let base = baseline.get(resource).copied().unwrap_or(0);
            let twice = doubled.get(resource).copied().unwrap_or(0);
            prop_assert_eq!(twice - base, 2 * (total - base),
                "resource {} not linear", resource);
        }
    }
}
