//! Planner facade: the interface the grid editor talks to
//!
//! Owns the grid, the active rule set, and a cache of derived state that
//! is rebuilt lazily after any mutation. Single-writer: callers mutate
//! synchronously and read statistics back between edits.

use ahash::AHashMap;
use std::sync::Arc;

use crate::core::error::{PlannerError, Result};
use crate::core::types::{BlockId, Dims, Position};
use crate::grid::block::Block;
use crate::grid::model::ReactorGrid;
use crate::rules::defaults::default_rules;
use crate::rules::tables::RuleSet;
use crate::sim::cluster::ClusterId;
use crate::sim::flux::{ProportionalReach, ReachModel};
use crate::sim::scoring::ReactorStats;
use crate::sim::{self, Derived};

/// Per-block derived state for tooltips and visualization
#[derive(Debug, Clone)]
pub struct BlockView<'a> {
    pub block: &'a Block,
    pub cluster_id: Option<ClusterId>,
    pub cluster_active: bool,
    pub efficiency_multiplier: Option<f64>,
    pub heat_multiplier: Option<f64>,
    pub primed: Option<bool>,
}

pub struct ReactorPlanner {
    rules: Arc<RuleSet>,
    grid: ReactorGrid,
    reach: Box<dyn ReachModel>,
    /// Derived state tagged with the grid revision it was computed from
    cached: Option<(u64, Derived)>,
}

impl ReactorPlanner {
    /// Planner over the built-in default rule set
    pub fn new(dims: Dims) -> Self {
        Self::with_rules(dims, default_rules())
    }

    pub fn with_rules(dims: Dims, rules: Arc<RuleSet>) -> Self {
        Self {
            rules,
            grid: ReactorGrid::new(dims),
            reach: Box::new(ProportionalReach::default()),
            cached: None,
        }
    }

    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }

    pub fn grid(&self) -> &ReactorGrid {
        &self.grid
    }

    /// Swap the moderator reach strategy (invalidates derived state)
    pub fn set_reach_model(&mut self, reach: Box<dyn ReachModel>) {
        self.reach = reach;
        self.cached = None;
    }

    pub fn place(&mut self, pos: Position, archetype: &str) -> Result<BlockId> {
        self.grid.place(&self.rules, pos, archetype)
    }

    pub fn remove(&mut self, pos: Position) -> Option<Block> {
        self.grid.remove(pos)
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Aggregate statistics, recomputing if the grid changed
    pub fn stats(&mut self) -> &ReactorStats {
        &self.ensure_current().stats
    }

    /// Derived state for the block at `pos`, if occupied
    pub fn block_view(&mut self, pos: Position) -> Option<BlockView<'_>> {
        self.ensure_current();
        // cache is current for this revision after ensure_current
        let derived = self.cached.as_ref().map(|(_, d)| d)?;
        let block = self.grid.block_at(pos)?;
        let cluster_id = derived.clusters.cluster_of(pos);
        let flux = derived.flux.get(pos);
        Some(BlockView {
            block,
            cluster_id,
            cluster_active: cluster_id.is_some_and(|id| derived.clusters.is_active(id)),
            efficiency_multiplier: flux.map(|f| f.efficiency_multiplier),
            heat_multiplier: flux.map(|f| f.heat_multiplier),
            primed: flux.map(|f| f.primed),
        })
    }

    /// Total crafting-resource costs for the current population
    pub fn resource_costs(&self) -> AHashMap<String, u64> {
        sim::aggregate_costs(&self.grid, &self.rules)
    }

    /// Adopt a new rule set atomically.
    ///
    /// Rejects the swap (keeping the current table) if any placed block's
    /// archetype is unknown to the new rules or resolves to a different
    /// kind, so the grid can never go inconsistent mid-session.
    pub fn reload_rules(&mut self, rules: Arc<RuleSet>) -> Result<()> {
        for block in self.grid.blocks() {
            match rules.kind_of(&block.archetype) {
                Some(kind) if kind == block.kind => {}
                Some(_) => {
                    return Err(PlannerError::RuleSetIncompatible(format!(
                        "archetype '{}' changed kind in the new rule set",
                        block.archetype
                    )));
                }
                None => {
                    return Err(PlannerError::RuleSetIncompatible(format!(
                        "placed archetype '{}' is missing from the new rule set",
                        block.archetype
                    )));
                }
            }
        }
        self.rules = rules;
        self.cached = None;
        Ok(())
    }

    fn ensure_current(&mut self) -> &Derived {
        let revision = self.grid.revision();
        let stale = !matches!(&self.cached, Some((rev, _)) if *rev == revision);
        if stale {
            let derived = sim::recompute(&self.grid, &self.rules, self.reach.as_ref());
            self.cached = Some((revision, derived));
        }
        match &self.cached {
            Some((_, derived)) => derived,
            None => unreachable!("cache populated for revision {revision}"),
        }
    }
}
