//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for placed blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u64);

/// Integer lattice coordinate
///
/// Ordering is lexicographic (x, then y, then z), which gives every
/// whole-grid traversal a deterministic iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The adjacent position one step along `dir`
    pub fn step(&self, dir: Direction) -> Position {
        let (dx, dy, dz) = dir.delta();
        Position::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// All six axis-aligned neighbor positions
    pub fn neighbors6(&self) -> [Position; 6] {
        let mut out = [*self; 6];
        for (slot, dir) in out.iter_mut().zip(Direction::ALL) {
            *slot = self.step(dir);
        }
        out
    }
}

/// Grid axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// The six axis-aligned directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    pub fn delta(&self) -> (i32, i32, i32) {
        match self {
            Direction::PosX => (1, 0, 0),
            Direction::NegX => (-1, 0, 0),
            Direction::PosY => (0, 1, 0),
            Direction::NegY => (0, -1, 0),
            Direction::PosZ => (0, 0, 1),
            Direction::NegZ => (0, 0, -1),
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Direction::PosX | Direction::NegX => Axis::X,
            Direction::PosY | Direction::NegY => Axis::Y,
            Direction::PosZ | Direction::NegZ => Axis::Z,
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::PosX => Direction::NegX,
            Direction::NegX => Direction::PosX,
            Direction::PosY => Direction::NegY,
            Direction::NegY => Direction::PosY,
            Direction::PosZ => Direction::NegZ,
            Direction::NegZ => Direction::PosZ,
        }
    }
}

/// Declared interior dimensions of the reactor
///
/// Interior cells span `0..x`, `0..y`, `0..z`. Every lattice cell outside
/// that box is implicit casing: the structure is always fully enclosed by
/// a casing shell, matching how the in-game multiblock is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dims {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Dims {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && (pos.x as u32) < self.x
            && (pos.y as u32) < self.y
            && (pos.z as u32) < self.z
    }

    pub fn volume(&self) -> u64 {
        u64::from(self.x) * u64::from(self.y) * u64::from(self.z)
    }

    /// Number of casing blocks in the enclosing shell (faces, edges, corners)
    pub fn shell_count(&self) -> u64 {
        let outer = u64::from(self.x + 2) * u64::from(self.y + 2) * u64::from(self.z + 2);
        outer - self.volume()
    }
}
