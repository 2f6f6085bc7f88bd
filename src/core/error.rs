use crate::core::types::{BuildingId, CellId, GridPosition, ObjectId};
use thiserror::Error;

/// Rejected grid operation.
///
/// Every variant is an expected, recoverable outcome: the operation did not
/// change the world and the caller decides how to present it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    #[error("Cell not found: {0}")]
    NotFound(CellId),

    #[error("Cell {cell} is already occupied by {building}")]
    AlreadyOccupied { cell: CellId, building: BuildingId },

    #[error("Cell {0} is not occupied")]
    NotOccupied(CellId),

    #[error("Cell {cell} is already at max level {max_level}")]
    AtMaxLevel { cell: CellId, max_level: u32 },

    #[error("Object {object} is not present in cell {cell}")]
    ObjectNotPresent { cell: CellId, object: ObjectId },
}

/// Malformed grid configuration. Fatal: no world is built.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Duplicate cell id: {0}")]
    DuplicateCellId(CellId),

    #[error("Cells {first} and {second} share grid position {position}")]
    DuplicatePosition {
        position: GridPosition,
        first: CellId,
        second: CellId,
    },

    #[error("Grid spacing must be finite and positive, got {0}")]
    InvalidSpacing(f32),

    #[error("Max level must be at least 1, got {0}")]
    InvalidMaxLevel(u32),

    #[error("Lattice offset {offset} does not map back from world space at spacing {spacing}")]
    OffsetOutOfRange { offset: GridPosition, spacing: f32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Crate-level error for callers that drive several subsystems at once
#[derive(Error, Debug)]
pub enum FactoryError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::catalog::CatalogError),

    #[error("Placement error: {0}")]
    Placement(#[from] crate::placement::PlacementError),

    #[error("Cell error: {0}")]
    Cell(#[from] CellError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FactoryError>;
