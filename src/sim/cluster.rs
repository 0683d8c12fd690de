//! Heat-conduction connectivity analysis
//!
//! Partitions heat sinks and conductors into 6-connected clusters and
//! flags each cluster active iff some member touches casing. Recomputed
//! wholesale on every structural change; structures are edited at human
//! speed, so correctness wins over incremental updates.

use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

use crate::core::types::Position;
use crate::grid::model::ReactorGrid;

pub type ClusterId = u32;

/// Cluster assignment and activity, keyed by position
#[derive(Debug, Clone, Default)]
pub struct ClusterMap {
    id_of: AHashMap<Position, ClusterId>,
    active: Vec<bool>,
}

impl ClusterMap {
    pub fn cluster_of(&self, pos: Position) -> Option<ClusterId> {
        self.id_of.get(&pos).copied()
    }

    pub fn is_active(&self, id: ClusterId) -> bool {
        self.active.get(id as usize).copied().unwrap_or(false)
    }

    /// Whether the conduction block at `pos` belongs to an active cluster
    pub fn is_active_at(&self, pos: Position) -> bool {
        self.cluster_of(pos).is_some_and(|id| self.is_active(id))
    }

    /// Number of clusters
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Flood-fill all conduction-capable blocks into clusters.
///
/// Cluster ids follow discovery order over lexicographically sorted seed
/// positions, so identical grids always produce identical assignments.
pub fn analyze(grid: &ReactorGrid) -> ClusterMap {
    let mut seeds: Vec<Position> = grid
        .blocks()
        .filter(|b| b.kind.conducts_heat())
        .map(|b| b.position)
        .collect();
    seeds.sort_unstable();

    let conductive: AHashSet<Position> = seeds.iter().copied().collect();
    let mut map = ClusterMap::default();
    let mut queue = VecDeque::new();

    for seed in seeds {
        if map.id_of.contains_key(&seed) {
            continue;
        }
        let id = map.active.len() as ClusterId;
        let mut touches_casing = false;

        map.id_of.insert(seed, id);
        queue.push_back(seed);
        while let Some(pos) = queue.pop_front() {
            for neighbor in pos.neighbors6() {
                if grid.is_casing(neighbor) {
                    touches_casing = true;
                } else if conductive.contains(&neighbor) && !map.id_of.contains_key(&neighbor) {
                    map.id_of.insert(neighbor, id);
                    queue.push_back(neighbor);
                }
            }
        }
        map.active.push(touches_casing);
    }

    tracing::debug!(
        clusters = map.len(),
        blocks = map.id_of.len(),
        "connectivity pass complete"
    );
    map
}
