//! Sparse 3D grid of placed blocks
//!
//! The grid owns every block instance and exposes placement, removal, and
//! neighbor queries. Derived simulation state lives elsewhere; the grid
//! only tracks a revision counter so downstream caches know when they are
//! stale.

use ahash::AHashMap;

use crate::core::error::{PlannerError, Result};
use crate::core::types::{BlockId, Dims, Position};
use crate::grid::block::{Block, BlockKind};
use crate::rules::tables::RuleSet;

#[derive(Debug, Clone)]
pub struct ReactorGrid {
    dims: Dims,
    blocks: AHashMap<Position, Block>,
    next_id: u64,
    revision: u64,
}

impl ReactorGrid {
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            blocks: AHashMap::new(),
            next_id: 0,
            revision: 0,
        }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Monotonic counter bumped by every successful mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Place a block. Rejects unknown archetypes, occupied cells, and
    /// positions outside the interior; the grid is unchanged on any error.
    pub fn place(&mut self, rules: &RuleSet, pos: Position, archetype: &str) -> Result<BlockId> {
        if !self.dims.contains(pos) {
            return Err(PlannerError::OutOfBounds(pos));
        }
        let kind = rules
            .kind_of(archetype)
            .ok_or_else(|| PlannerError::UnknownArchetype(archetype.to_string()))?;
        if self.blocks.contains_key(&pos) {
            return Err(PlannerError::PositionOccupied(pos));
        }

        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.insert(
            pos,
            Block {
                id,
                kind,
                archetype: archetype.to_string(),
                position: pos,
            },
        );
        self.revision += 1;
        Ok(id)
    }

    /// Remove and return the block at `pos`, if any
    pub fn remove(&mut self, pos: Position) -> Option<Block> {
        let removed = self.blocks.remove(&pos);
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }

    /// Remove every block
    pub fn clear(&mut self) {
        if !self.blocks.is_empty() {
            self.blocks.clear();
            self.revision += 1;
        }
    }

    pub fn block_at(&self, pos: Position) -> Option<&Block> {
        self.blocks.get(&pos)
    }

    /// Occupied blocks among the six neighbors of `pos`
    pub fn neighbors6(&self, pos: Position) -> impl Iterator<Item = &Block> {
        pos.neighbors6()
            .into_iter()
            .filter_map(|n| self.blocks.get(&n))
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    pub fn blocks_of_kind(&self, kind: BlockKind) -> impl Iterator<Item = &Block> {
        self.blocks.values().filter(move |b| b.kind == kind)
    }

    /// True if `pos` is casing: outside the interior (the implicit shell)
    /// or an interior cell holding a placed Casing block
    pub fn is_casing(&self, pos: Position) -> bool {
        if !self.dims.contains(pos) {
            return true;
        }
        matches!(
            self.blocks.get(&pos),
            Some(Block {
                kind: BlockKind::Casing,
                ..
            })
        )
    }

    /// Axis-aligned bounding box of occupied cells, or None when empty
    pub fn occupied_bounds(&self) -> Option<(Position, Position)> {
        let mut iter = self.blocks.keys();
        let first = *iter.next()?;
        let mut min = first;
        let mut max = first;
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Some((min, max))
    }
}
