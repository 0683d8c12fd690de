//! Fission Planner - reactor structure planning and scoring engine
//!
//! Models a game's multi-block fission reactors on a 3D integer lattice:
//! which block layouts are legal, how heat-conduction clusters form, how
//! neutron flux drives per-cell efficiency, and what the structure costs
//! to build. The grid editor and file persistence live elsewhere; they
//! drive this crate through [`planner::ReactorPlanner`].

pub mod core;
pub mod grid;
pub mod planner;
pub mod rules;
pub mod sim;

pub use planner::{BlockView, ReactorPlanner};
