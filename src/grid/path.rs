//! Path tiling - which mesh variant and rotation a path cell needs
//!
//! A path cell connects to each orthogonal neighbour that is also a path
//! cell. The connection set picks one of six shapes; the rotation is the
//! number of clockwise quarter turns from that shape's canonical
//! orientation.

use crate::core::error::CellError;
use crate::core::types::{CellId, GridPosition};
use crate::grid::cell::{CellType, GridCell};
use crate::grid::world::GridWorld;
use serde::Serialize;
use std::f32::consts::FRAC_PI_2;

/// Orthogonal lattice direction. North is -Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise order starting at north
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Lattice step `(dx, dz)`
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        self.rotated(2)
    }

    /// Direction after `quarter_turns` clockwise quarter turns
    pub fn rotated(&self, quarter_turns: u8) -> Direction {
        Self::ALL[(self.index() + quarter_turns as usize) % 4]
    }

    /// Neighbouring position, `None` when the step leaves the `i32` lattice
    pub fn step(&self, from: GridPosition) -> Option<GridPosition> {
        let (dx, dz) = self.offset();
        from.offset(dx, dz)
    }

    fn index(&self) -> usize {
        *self as usize
    }

    fn bit(&self) -> u8 {
        1 << self.index()
    }
}

/// Set of directions a path cell links toward
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PathConnections(u8);

impl PathConnections {
    pub const NONE: PathConnections = PathConnections(0);

    pub fn from_directions(directions: &[Direction]) -> Self {
        directions.iter().fold(Self::NONE, |acc, d| acc.with(*d))
    }

    pub fn with(self, direction: Direction) -> Self {
        Self(self.0 | direction.bit())
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }

    /// Rotate every connection clockwise by `quarter_turns`
    pub fn rotated(&self, quarter_turns: u8) -> Self {
        self.directions()
            .fold(Self::NONE, |acc, d| acc.with(d.rotated(quarter_turns)))
    }
}

/// Mesh variant for a path cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PathShape {
    /// No path neighbours
    Isolated,
    /// Dead end; canonical opening faces north
    End,
    /// Canonical run is north-south
    Straight,
    /// Canonical bend joins north and east
    Corner,
    /// Canonical junction opens north, east and west
    Tee,
    /// Four-way crossing
    Cross,
}

impl PathShape {
    fn canonical(&self) -> PathConnections {
        use Direction::*;
        match self {
            PathShape::Isolated => PathConnections::NONE,
            PathShape::End => PathConnections::from_directions(&[North]),
            PathShape::Straight => PathConnections::from_directions(&[North, South]),
            PathShape::Corner => PathConnections::from_directions(&[North, East]),
            PathShape::Tee => PathConnections::from_directions(&[North, East, West]),
            PathShape::Cross => PathConnections::from_directions(&[North, East, South, West]),
        }
    }
}

/// Shape plus orientation of one path cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PathTile {
    pub shape: PathShape,
    /// Clockwise quarter turns from the canonical orientation (0..4)
    pub quarter_turns: u8,
}

impl PathTile {
    /// Pick the tile matching a connection set
    pub fn from_connections(connections: PathConnections) -> Self {
        let shape = match connections.count() {
            0 => PathShape::Isolated,
            1 => PathShape::End,
            2 => {
                let straight = connections.contains(Direction::North)
                    == connections.contains(Direction::South);
                if straight {
                    PathShape::Straight
                } else {
                    PathShape::Corner
                }
            }
            3 => PathShape::Tee,
            _ => PathShape::Cross,
        };

        let canonical = shape.canonical();
        let quarter_turns = (0..4)
            .find(|&turns| canonical.rotated(turns) == connections)
            .unwrap_or(0);

        Self {
            shape,
            quarter_turns,
        }
    }

    /// Rotation about the vertical axis in radians, clockwise seen from above
    pub fn rotation_radians(&self) -> f32 {
        self.quarter_turns as f32 * FRAC_PI_2
    }
}

impl GridWorld {
    /// The four orthogonal neighbours of a lattice position, in `Direction::ALL` order
    pub fn neighbors(&self, position: GridPosition) -> [Option<&GridCell>; 4] {
        Direction::ALL.map(|d| d.step(position).and_then(|p| self.cell_at_position(p)))
    }

    /// Directions in which a cell touches a path cell
    pub fn path_connections(&self, cell_id: &str) -> Result<PathConnections, CellError> {
        let cell = self
            .cell(cell_id)
            .ok_or_else(|| CellError::NotFound(CellId::from(cell_id)))?;

        let neighbors = self.neighbors(cell.grid_position());
        Ok(Direction::ALL
            .iter()
            .zip(neighbors)
            .filter(|(_, n)| n.is_some_and(|c| c.cell_type() == CellType::Path))
            .fold(PathConnections::NONE, |acc, (d, _)| acc.with(*d)))
    }

    /// Tile for a path cell; `None` for unknown or non-path cells
    pub fn path_tile(&self, cell_id: &str) -> Option<PathTile> {
        let cell = self.cell(cell_id)?;
        if cell.cell_type() != CellType::Path {
            return None;
        }
        self.path_connections(cell_id)
            .ok()
            .map(PathTile::from_connections)
    }
}
