pub mod error;
pub mod types;

pub use error::{PlannerError, Result};
pub use types::{Axis, BlockId, Dims, Direction, Position};
