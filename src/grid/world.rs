//! The grid world: single source of truth for what occupies which cell

use crate::core::config::GridConfig;
use crate::core::error::{CellError, ConfigError};
use crate::core::types::{BuildingId, CellId, GridPosition, ObjectId};
use crate::grid::cell::{CellType, GridCell};
use crate::grid::transform::GridTransform;
use ahash::AHashMap;
use glam::Vec3;

/// Owns every cell of one game session.
///
/// Cells live in an arena in construction order. Two indices point into it:
/// one by id, one by integer lattice position. Both are built once and never
/// change, because cells are never created or destroyed after construction.
#[derive(Debug, Clone)]
pub struct GridWorld {
    transform: GridTransform,
    max_level: u32,
    cells: Vec<GridCell>,
    by_id: AHashMap<CellId, usize>,
    by_position: AHashMap<GridPosition, usize>,
}

impl GridWorld {
    /// Build the world from a layout.
    ///
    /// Fails if the config is invalid or if two cells would share an id or a
    /// lattice position.
    pub fn new(config: &GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let transform = GridTransform::new(config.spacing, config.ground_y);
        let capacity = config.cell_count();
        let mut world = Self {
            transform,
            max_level: config.max_level,
            cells: Vec::with_capacity(capacity),
            by_id: AHashMap::with_capacity(capacity),
            by_position: AHashMap::with_capacity(capacity),
        };

        for group in &config.groups {
            for (index, &[x, z]) in group.offsets.iter().enumerate() {
                let id = CellId::new(format!("{}_{}", group.cell_type, index));
                let grid_position = GridPosition::new(x, z);

                if world.by_id.contains_key(&id) {
                    tracing::warn!("Grid config generates cell id {} twice", id);
                    return Err(ConfigError::DuplicateCellId(id));
                }
                if let Some(&existing) = world.by_position.get(&grid_position) {
                    let first = world.cells[existing].id.clone();
                    tracing::warn!(
                        "Grid config places {} and {} at {}",
                        first,
                        id,
                        grid_position
                    );
                    return Err(ConfigError::DuplicatePosition {
                        position: grid_position,
                        first,
                        second: id,
                    });
                }

                let slot = world.cells.len();
                let position = transform.grid_to_world(x, z);
                world.by_id.insert(id.clone(), slot);
                world.by_position.insert(grid_position, slot);
                world
                    .cells
                    .push(GridCell::new(id, grid_position, position, group.cell_type));
            }
        }

        tracing::info!(
            "Grid world built: {} cells, spacing {}, max level {}",
            world.cells.len(),
            config.spacing,
            config.max_level
        );
        Ok(world)
    }

    // === QUERIES ===

    /// Cell generated at the given lattice coordinate, if any
    pub fn cell_at(&self, grid_x: i32, grid_z: i32) -> Option<&GridCell> {
        self.cell_at_position(GridPosition::new(grid_x, grid_z))
    }

    pub fn cell_at_position(&self, position: GridPosition) -> Option<&GridCell> {
        self.by_position.get(&position).map(|&slot| &self.cells[slot])
    }

    /// Cell whose lattice point is nearest to a world point, if one exists there
    pub fn cell_at_world(&self, world_x: f32, world_z: f32) -> Option<&GridCell> {
        self.cell_at_position(self.world_to_grid(world_x, world_z))
    }

    pub fn cell(&self, id: &str) -> Option<&GridCell> {
        self.by_id.get(id).map(|&slot| &self.cells[slot])
    }

    /// Cells of one type in construction order
    pub fn cells_of_type(&self, cell_type: CellType) -> impl Iterator<Item = &GridCell> + '_ {
        self.cells.iter().filter(move |c| c.cell_type == cell_type)
    }

    /// Unclaimed cells of one type in construction order
    pub fn free_cells_of_type(&self, cell_type: CellType) -> impl Iterator<Item = &GridCell> + '_ {
        self.cells_of_type(cell_type).filter(|c| !c.is_occupied())
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = &GridCell> + '_ {
        self.cells.iter().filter(|c| c.is_occupied())
    }

    /// Cell claimed by the given building
    pub fn cell_of_building(&self, building: &str) -> Option<&GridCell> {
        self.cells
            .iter()
            .find(|c| c.building_id.as_ref().is_some_and(|b| b == building))
    }

    /// All cells in construction order
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn spacing(&self) -> f32 {
        self.transform.spacing()
    }

    pub fn transform(&self) -> &GridTransform {
        &self.transform
    }

    /// Smallest and largest lattice coordinates in use, `None` for an empty world
    pub fn bounds(&self) -> Option<(GridPosition, GridPosition)> {
        let first = self.cells.first()?.grid_position;
        Some(self.cells.iter().fold((first, first), |(min, max), c| {
            let p = c.grid_position;
            (
                GridPosition::new(min.x.min(p.x), min.z.min(p.z)),
                GridPosition::new(max.x.max(p.x), max.z.max(p.z)),
            )
        }))
    }

    // === COORDINATES ===

    pub fn world_to_grid(&self, world_x: f32, world_z: f32) -> GridPosition {
        self.transform.world_to_grid(world_x, world_z)
    }

    pub fn grid_to_world(&self, grid_x: i32, grid_z: i32) -> Vec3 {
        self.transform.grid_to_world(grid_x, grid_z)
    }

    // === MUTATIONS ===

    /// Claim a free cell for a building
    pub fn occupy_cell(
        &mut self,
        cell_id: &str,
        building: impl Into<BuildingId>,
    ) -> Result<(), CellError> {
        let cell = self.cell_mut(cell_id)?;
        if let Some(existing) = &cell.building_id {
            return Err(CellError::AlreadyOccupied {
                cell: cell.id.clone(),
                building: existing.clone(),
            });
        }

        let building = building.into();
        tracing::debug!("Cell {} occupied by {}", cell.id, building);
        cell.building_id = Some(building);
        Ok(())
    }

    /// Release a claimed cell, returning the building that held it
    pub fn vacate_cell(&mut self, cell_id: &str) -> Result<BuildingId, CellError> {
        let cell = self.cell_mut(cell_id)?;
        match cell.building_id.take() {
            Some(building) => {
                tracing::debug!("Cell {} vacated by {}", cell.id, building);
                Ok(building)
            }
            None => Err(CellError::NotOccupied(cell.id.clone())),
        }
    }

    /// Append an object to a cell; the same id may appear more than once
    pub fn add_object_to_cell(
        &mut self,
        cell_id: &str,
        object: impl Into<ObjectId>,
    ) -> Result<(), CellError> {
        let cell = self.cell_mut(cell_id)?;
        let object = object.into();
        tracing::debug!("Object {} entered cell {}", object, cell.id);
        cell.object_ids.push(object);
        Ok(())
    }

    /// Remove the first occurrence of an object from a cell
    pub fn remove_object_from_cell(
        &mut self,
        cell_id: &str,
        object: &str,
    ) -> Result<(), CellError> {
        let cell = self.cell_mut(cell_id)?;
        match cell.object_ids.iter().position(|o| o == object) {
            Some(index) => {
                cell.object_ids.remove(index);
                tracing::debug!("Object {} left cell {}", object, cell.id);
                Ok(())
            }
            None => Err(CellError::ObjectNotPresent {
                cell: cell.id.clone(),
                object: ObjectId::from(object),
            }),
        }
    }

    /// Move an object between cells.
    ///
    /// Both cells and the object's presence are checked first; on error
    /// neither cell changes.
    pub fn move_object(&mut self, object: &str, from: &str, to: &str) -> Result<(), CellError> {
        let from_slot = self.slot(from)?;
        let to_slot = self.slot(to)?;

        let source = &mut self.cells[from_slot];
        let index = source
            .object_ids
            .iter()
            .position(|o| o == object)
            .ok_or_else(|| CellError::ObjectNotPresent {
                cell: source.id.clone(),
                object: ObjectId::from(object),
            })?;
        let moved = source.object_ids.remove(index);

        tracing::debug!("Object {} moved from {} to {}", moved, from, to);
        self.cells[to_slot].object_ids.push(moved);
        Ok(())
    }

    /// Raise a cell's level by one, returning the new level
    pub fn upgrade_cell(&mut self, cell_id: &str) -> Result<u32, CellError> {
        let max_level = self.max_level;
        let cell = self.cell_mut(cell_id)?;
        if cell.level >= max_level {
            return Err(CellError::AtMaxLevel {
                cell: cell.id.clone(),
                max_level,
            });
        }

        cell.level += 1;
        tracing::debug!("Cell {} upgraded to level {}", cell.id, cell.level);
        Ok(cell.level)
    }

    fn slot(&self, cell_id: &str) -> Result<usize, CellError> {
        self.by_id
            .get(cell_id)
            .copied()
            .ok_or_else(|| CellError::NotFound(CellId::from(cell_id)))
    }

    fn cell_mut(&mut self, cell_id: &str) -> Result<&mut GridCell, CellError> {
        let slot = self.slot(cell_id)?;
        Ok(&mut self.cells[slot])
    }
}
