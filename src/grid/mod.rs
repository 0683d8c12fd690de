//! Sparse 3D lattice of placed blocks

pub mod block;
pub mod model;

pub use block::{Block, BlockKind};
pub use model::ReactorGrid;
