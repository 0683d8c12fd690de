//! Block definitions

use serde::{Deserialize, Serialize};

use crate::core::types::{BlockId, Position};

/// The closed set of block kinds a reactor interior can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    FuelCell,
    Moderator,
    Reflector,
    HeatSink,
    Conductor,
    NeutronSource,
    NeutronShield,
    Irradiator,
    Casing,
}

impl BlockKind {
    /// Whether this kind participates in heat-conduction clusters
    pub fn conducts_heat(&self) -> bool {
        matches!(self, BlockKind::HeatSink | BlockKind::Conductor)
    }
}

/// A placed block instance.
///
/// Blocks carry no derived state: cluster ids, casing-reach flags, and
/// flux accumulators live in side tables rebuilt by each recompute pass,
/// keeping the grid itself authoritative and trivially rebuildable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    pub archetype: String,
    pub position: Position,
}
