//! Grid cells: the unit of placeable world space

use crate::core::types::{BuildingId, CellId, GridPosition, ObjectId};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of ground a cell provides
///
/// Determines what the renderer draws and what may be placed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Path,
    Hive,
    Colony,
    Lab,
    Depot,
    Storage,
    Environment,
}

impl CellType {
    pub const ALL: [CellType; 7] = [
        CellType::Path,
        CellType::Hive,
        CellType::Colony,
        CellType::Lab,
        CellType::Depot,
        CellType::Storage,
        CellType::Environment,
    ];

    /// Lowercase tag used in ids and config files
    pub fn as_str(&self) -> &'static str {
        match self {
            CellType::Path => "path",
            CellType::Hive => "hive",
            CellType::Colony => "colony",
            CellType::Lab => "lab",
            CellType::Depot => "depot",
            CellType::Storage => "storage",
            CellType::Environment => "environment",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One addressable cell of the world.
///
/// Fields are read-only from outside the crate; every mutation goes through
/// [`GridWorld`](crate::grid::GridWorld) so that occupancy and level
/// invariants hold at all times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub(crate) id: CellId,
    pub(crate) grid_position: GridPosition,
    pub(crate) position: Vec3,
    #[serde(rename = "type")]
    pub(crate) cell_type: CellType,
    pub(crate) level: u32,
    pub(crate) building_id: Option<BuildingId>,
    pub(crate) object_ids: Vec<ObjectId>,
}

impl GridCell {
    pub(crate) fn new(
        id: CellId,
        grid_position: GridPosition,
        position: Vec3,
        cell_type: CellType,
    ) -> Self {
        Self {
            id,
            grid_position,
            position,
            cell_type,
            level: 1,
            building_id: None,
            object_ids: Vec::new(),
        }
    }

    pub fn id(&self) -> &CellId {
        &self.id
    }

    /// Lattice offset the cell was generated from
    pub fn grid_position(&self) -> GridPosition {
        self.grid_position
    }

    /// World position of the cell centre on the ground plane
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// True iff a building claims this cell
    pub fn is_occupied(&self) -> bool {
        self.building_id.is_some()
    }

    pub fn building_id(&self) -> Option<&BuildingId> {
        self.building_id.as_ref()
    }

    /// Resident transient objects, in arrival order
    pub fn object_ids(&self) -> &[ObjectId] {
        &self.object_ids
    }

    pub fn contains_object(&self, object: &str) -> bool {
        self.object_ids.iter().any(|o| o == object)
    }
}
