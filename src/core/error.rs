use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Unknown archetype: {0}")]
    UnknownArchetype(String),

    #[error("Position already occupied: {0:?}")]
    PositionOccupied(crate::core::types::Position),

    #[error("Position outside reactor interior: {0:?}")]
    OutOfBounds(crate::core::types::Position),

    #[error("Incompatible rule set: {0}")]
    RuleSetIncompatible(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
