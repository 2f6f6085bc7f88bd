//! Building registry - which building sits where, and what type it is

use crate::catalog::{BuildingType, Catalog};
use crate::core::error::CellError;
use crate::core::types::{BuildingId, CellId};
use crate::grid::cell::{CellType, GridCell};
use crate::grid::world::GridWorld;
use serde::Serialize;
use thiserror::Error;

/// Rejected placement action. The world and registry are unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error(transparent)]
    Cell(#[from] CellError),

    #[error("Unknown building type: {0}")]
    UnknownBuildingType(String),

    #[error("Unknown building: {0}")]
    UnknownBuilding(BuildingId),

    #[error("{building_type} cannot be placed on {cell_type} cell {cell}")]
    CategoryMismatch {
        building_type: String,
        cell: CellId,
        cell_type: CellType,
    },

    #[error("{0} is not upgradeable")]
    NotUpgradeable(String),

    #[error("Building {building} is already at its max level {max_level}")]
    AtBuildingMaxLevel { building: BuildingId, max_level: u32 },

    #[error("Building {building} no longer occupies cell {cell}")]
    Stale { building: BuildingId, cell: CellId },

    #[error("{building_type} supports up to level {max_level}, cell {cell} is level {level}")]
    LevelTooHigh {
        building_type: String,
        cell: CellId,
        level: u32,
        max_level: u32,
    },
}

/// A building standing on a cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedBuilding {
    pub id: BuildingId,
    /// Catalog id of the building type
    pub building_type: String,
    pub cell: CellId,
}

/// Owns the building id -> type table.
///
/// The grid only stores opaque building ids; this registry resolves them.
/// Every method takes the world and catalog explicitly and validates before
/// mutating either. The world can also be changed directly, so a building is
/// only acted on while its cell still names it.
#[derive(Debug, Clone)]
pub struct BuildingRegistry {
    buildings: Vec<PlacedBuilding>,
    next_serial: u64,
}

impl Default for BuildingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildingRegistry {
    pub fn new() -> Self {
        Self {
            buildings: Vec::new(),
            next_serial: 1,
        }
    }

    pub fn get(&self, id: &str) -> Option<&PlacedBuilding> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedBuilding> {
        self.buildings.iter()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Put a new building of `type_id` on a free cell
    pub fn place(
        &mut self,
        world: &mut GridWorld,
        catalog: &Catalog<BuildingType>,
        type_id: &str,
        cell_id: &str,
    ) -> Result<BuildingId, PlacementError> {
        let building_type = lookup_type(catalog, type_id)?;
        let cell = lookup_cell(world, cell_id)?;
        check_fits(building_type, cell)?;

        let id = self.next_id(type_id);
        world.occupy_cell(cell_id, id.clone())?;
        self.next_serial += 1;

        tracing::debug!("Placed {} ({}) on {}", id, building_type.name, cell_id);
        self.buildings.push(PlacedBuilding {
            id: id.clone(),
            building_type: type_id.to_owned(),
            cell: CellId::from(cell_id),
        });
        Ok(id)
    }

    /// Raise the level of the cell a building stands on
    pub fn upgrade(
        &self,
        world: &mut GridWorld,
        catalog: &Catalog<BuildingType>,
        building: &str,
    ) -> Result<u32, PlacementError> {
        let placed = self.lookup(building)?;
        let building_type = lookup_type(catalog, &placed.building_type)?;
        if !building_type.upgradeable {
            return Err(PlacementError::NotUpgradeable(building_type.id.clone()));
        }

        let level = owned_cell(world, placed)?.level();
        if level >= building_type.max_level {
            return Err(PlacementError::AtBuildingMaxLevel {
                building: placed.id.clone(),
                max_level: building_type.max_level,
            });
        }

        let level = world.upgrade_cell(placed.cell.as_str())?;
        tracing::debug!("Upgraded {} to level {}", placed.id, level);
        Ok(level)
    }

    /// Swap a building for one of another type on the same cell.
    ///
    /// The cell keeps its level, so the new type must support it.
    pub fn replace(
        &mut self,
        world: &mut GridWorld,
        catalog: &Catalog<BuildingType>,
        building: &str,
        new_type: &str,
    ) -> Result<BuildingId, PlacementError> {
        let index = self.index_of(building)?;
        let cell = owned_cell(world, &self.buildings[index])?;
        let cell_id = cell.id().clone();
        let building_type = lookup_type(catalog, new_type)?;
        check_fits(building_type, cell)?;

        let id = self.next_id(new_type);
        world.vacate_cell(cell_id.as_str())?;
        world.occupy_cell(cell_id.as_str(), id.clone())?;
        self.next_serial += 1;

        let old = self.buildings.remove(index);
        tracing::debug!("Replaced {} with {} on {}", old.id, id, cell_id);
        self.buildings.push(PlacedBuilding {
            id: id.clone(),
            building_type: new_type.to_owned(),
            cell: cell_id,
        });
        Ok(id)
    }

    /// Tear a building down and free its cell
    pub fn remove(
        &mut self,
        world: &mut GridWorld,
        building: &str,
    ) -> Result<PlacedBuilding, PlacementError> {
        let index = self.index_of(building)?;
        owned_cell(world, &self.buildings[index])?;
        world.vacate_cell(self.buildings[index].cell.as_str())?;

        let removed = self.buildings.remove(index);
        tracing::debug!("Removed {} from {}", removed.id, removed.cell);
        Ok(removed)
    }

    fn next_id(&self, type_id: &str) -> BuildingId {
        BuildingId::new(format!("{}-{}", type_id, self.next_serial))
    }

    fn index_of(&self, building: &str) -> Result<usize, PlacementError> {
        self.buildings
            .iter()
            .position(|b| b.id == building)
            .ok_or_else(|| PlacementError::UnknownBuilding(BuildingId::from(building)))
    }

    fn lookup(&self, building: &str) -> Result<&PlacedBuilding, PlacementError> {
        self.index_of(building).map(|idx| &self.buildings[idx])
    }
}

fn lookup_type<'a>(
    catalog: &'a Catalog<BuildingType>,
    type_id: &str,
) -> Result<&'a BuildingType, PlacementError> {
    catalog
        .get(type_id)
        .ok_or_else(|| PlacementError::UnknownBuildingType(type_id.to_owned()))
}

fn lookup_cell<'a>(world: &'a GridWorld, cell_id: &str) -> Result<&'a GridCell, PlacementError> {
    world
        .cell(cell_id)
        .ok_or_else(|| CellError::NotFound(CellId::from(cell_id)).into())
}

/// Cell a registered building stands on, provided the cell still names it
fn owned_cell<'a>(
    world: &'a GridWorld,
    placed: &PlacedBuilding,
) -> Result<&'a GridCell, PlacementError> {
    let cell = lookup_cell(world, placed.cell.as_str())?;
    if cell.building_id() != Some(&placed.id) {
        return Err(PlacementError::Stale {
            building: placed.id.clone(),
            cell: placed.cell.clone(),
        });
    }
    Ok(cell)
}

/// Category and level checks shared by place and replace
fn check_fits(building_type: &BuildingType, cell: &GridCell) -> Result<(), PlacementError> {
    if !building_type.fits(cell.cell_type()) {
        return Err(PlacementError::CategoryMismatch {
            building_type: building_type.id.clone(),
            cell: cell.id().clone(),
            cell_type: cell.cell_type(),
        });
    }
    if cell.level() > building_type.max_level {
        return Err(PlacementError::LevelTooHigh {
            building_type: building_type.id.clone(),
            cell: cell.id().clone(),
            level: cell.level(),
            max_level: building_type.max_level,
        });
    }
    Ok(())
}
