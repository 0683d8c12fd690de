//! Crafting-resource cost aggregation
//!
//! Pure function of the block population: sums per-unit cost vectors from
//! the rule set's crafting tables. Independent of connectivity and flux
//! state, so it can run at any point relative to the other passes.

use ahash::AHashMap;

use crate::grid::block::BlockKind;
use crate::grid::model::ReactorGrid;
use crate::rules::tables::RuleSet;

/// Total resource costs for the structure, keyed by resource name.
///
/// Includes the implicit casing shell around the interior plus any casing
/// blocks placed inside it.
pub fn aggregate_costs(grid: &ReactorGrid, rules: &RuleSet) -> AHashMap<String, u64> {
    let mut totals: AHashMap<String, u64> = AHashMap::new();

    let mut sink_counts: AHashMap<&str, u64> = AHashMap::new();
    let mut moderator_counts: AHashMap<&str, u64> = AHashMap::new();
    let mut fuel_cells: u64 = 0;
    let mut placed_casings: u64 = 0;

    for block in grid.blocks() {
        match block.kind {
            BlockKind::HeatSink => {
                *sink_counts.entry(block.archetype.as_str()).or_default() += 1;
            }
            BlockKind::Moderator => {
                *moderator_counts.entry(block.archetype.as_str()).or_default() += 1;
            }
            BlockKind::FuelCell => fuel_cells += 1,
            BlockKind::Casing => placed_casings += 1,
            _ => {}
        }
    }

    let costs = &rules.resource_costs;
    for (archetype, count) in sink_counts {
        if let Some(unit) = costs.heat_sink_costs.get(archetype) {
            add_scaled(&mut totals, unit, count);
        }
    }
    for (archetype, count) in moderator_counts {
        if let Some(unit) = costs.moderator_costs.get(archetype) {
            add_scaled(&mut totals, unit, count);
        }
    }
    if fuel_cells > 0 {
        add_scaled(&mut totals, &costs.fuel_cell_costs, fuel_cells);
    }

    let casings = grid.dims().shell_count() + placed_casings;
    add_scaled(&mut totals, &costs.casing_costs, casings);

    totals
}

fn add_scaled(totals: &mut AHashMap<String, u64>, unit: &AHashMap<String, u32>, count: u64) {
    for (resource, quantity) in unit {
        *totals.entry(resource.clone()).or_default() += u64::from(*quantity) * count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Dims, Position};
    use crate::rules::defaults::default_rules;

    #[test]
    fn test_empty_grid_costs_only_the_shell() {
        let rules = default_rules();
        let grid = ReactorGrid::new(Dims::new(1, 1, 1));
        let totals = aggregate_costs(&grid, &rules);

        // 26 shell casings at 1 Tough Alloy + 4 Basic Plating each
        assert_eq!(totals["Tough Alloy"], 26);
        assert_eq!(totals["Basic Plating"], 104);
    }

    #[test]
    fn test_fuel_and_sink_costs_sum() {
        let rules = default_rules();
        let mut grid = ReactorGrid::new(Dims::new(3, 3, 3));
        grid.place(&rules, Position::new(0, 0, 0), "[OX]TBU").unwrap();
        grid.place(&rules, Position::new(1, 0, 0), "[OX]LEU-235").unwrap();
        grid.place(&rules, Position::new(2, 0, 0), "Water").unwrap();

        let totals = aggregate_costs(&grid, &rules);
        // 2 fuel cells: 4 Glass each
        assert_eq!(totals["Glass"], 8);
        // shell (5*5*5 - 27 = 98) + 2 fuel cells at 4 Tough Alloy
        assert_eq!(totals["Tough Alloy"], 98 + 8);
        assert_eq!(totals["Empty HeatSink"], 1);
        assert_eq!(totals["Water Bucket"], 1);
    }

    #[test]
    fn test_moderator_costs() {
        let rules = default_rules();
        let mut grid = ReactorGrid::new(Dims::new(3, 3, 3));
        grid.place(&rules, Position::new(0, 0, 0), "Graphite").unwrap();
        grid.place(&rules, Position::new(1, 0, 0), "Graphite").unwrap();

        let totals = aggregate_costs(&grid, &rules);
        assert_eq!(totals["Graphite Ingot"], 18);
    }

    #[test]
    fn test_placed_casing_adds_to_shell() {
        let rules = default_rules();
        let mut grid = ReactorGrid::new(Dims::new(2, 2, 2));
        let shell = grid.dims().shell_count();
        grid.place(&rules, Position::new(0, 0, 0), "Casing").unwrap();

        let totals = aggregate_costs(&grid, &rules);
        assert_eq!(totals["Tough Alloy"], shell + 1);
    }

    #[test]
    fn test_costs_ignore_connectivity() {
        // isolated sink with no casing path still costs its materials
        let rules = default_rules();
        let mut grid = ReactorGrid::new(Dims::new(7, 7, 7));
        grid.place(&rules, Position::new(3, 3, 3), "Water").unwrap();

        let totals = aggregate_costs(&grid, &rules);
        assert_eq!(totals["Water Bucket"], 1);
    }
}
