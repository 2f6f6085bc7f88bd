//! Grid configuration with documented constants
//!
//! The layout is a table of cell groups: each group tags a list of integer
//! lattice offsets with a cell type. Cells are generated from it exactly
//! once, when the world is built.

use crate::core::error::ConfigError;
use crate::core::types::GridPosition;
use crate::grid::cell::CellType;
use crate::grid::transform::GridTransform;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World units between neighbouring cell centres on the X and Z axes
pub const DEFAULT_GRID_SPACING: f32 = 4.0;

/// Highest upgrade tier a cell can reach
pub const DEFAULT_MAX_LEVEL: u32 = 10;

/// Y coordinate of the ground plane every cell sits on
pub const GROUND_LEVEL: f32 = 0.0;

/// Largest lattice offset magnitude a layout may use.
///
/// World positions are `f32`; up to 2^20 the product `offset * spacing`
/// still converts back to the same offset, and stepping to a neighbour
/// cannot overflow `i32`.
pub const MAX_GRID_OFFSET: i32 = 1 << 20;

fn default_spacing() -> f32 {
    DEFAULT_GRID_SPACING
}

fn default_ground_y() -> f32 {
    GROUND_LEVEL
}

fn default_max_level() -> u32 {
    DEFAULT_MAX_LEVEL
}

/// A named group of lattice offsets sharing one cell type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellGroup {
    #[serde(rename = "type")]
    pub cell_type: CellType,
    /// `[x, z]` lattice offsets; the index in this list becomes the id suffix
    pub offsets: Vec<[i32; 2]>,
}

impl CellGroup {
    pub fn new(cell_type: CellType, offsets: &[[i32; 2]]) -> Self {
        Self {
            cell_type,
            offsets: offsets.to_vec(),
        }
    }
}

/// Configuration for building a [`GridWorld`](crate::grid::GridWorld)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Size of one lattice step in world units
    #[serde(default = "default_spacing")]
    pub spacing: f32,

    /// Height of the ground plane
    #[serde(default = "default_ground_y")]
    pub ground_y: f32,

    /// Upgrade cap shared by every cell
    #[serde(default = "default_max_level")]
    pub max_level: u32,

    /// Cell groups in construction order
    #[serde(default, rename = "group")]
    pub groups: Vec<CellGroup>,
}

impl Default for GridConfig {
    /// The honey factory starter map
    fn default() -> Self {
        Self::empty()
            .with_group(CellType::Path, &[[0, 0], [1, 0], [2, 0], [3, 0], [4, 0]])
            .with_group(CellType::Hive, &[[-2, -2], [0, -2], [2, -2], [4, -2]])
            .with_group(CellType::Colony, &[[-4, -4], [-2, -4], [0, -4], [2, -4]])
            .with_group(CellType::Lab, &[[-4, 2], [-2, 2]])
            .with_group(CellType::Depot, &[[2, 2], [4, 2]])
            .with_group(CellType::Storage, &[[-4, 4], [-2, 4], [0, 4]])
            .with_group(CellType::Environment, &[[2, 4], [4, 4], [-4, -2], [4, -4]])
    }
}

impl GridConfig {
    /// Config with default constants and no cells
    pub fn empty() -> Self {
        Self {
            spacing: DEFAULT_GRID_SPACING,
            ground_y: GROUND_LEVEL,
            max_level: DEFAULT_MAX_LEVEL,
            groups: Vec::new(),
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_group(mut self, cell_type: CellType, offsets: &[[i32; 2]]) -> Self {
        self.groups.push(CellGroup::new(cell_type, offsets));
        self
    }

    /// Total number of cells this config generates
    pub fn cell_count(&self) -> usize {
        self.groups.iter().map(|g| g.offsets.len()).sum()
    }

    /// Validate scalar settings and every lattice offset.
    ///
    /// An offset must lie within [`MAX_GRID_OFFSET`] and survive the trip to
    /// world space and back at the configured spacing. Id and position
    /// uniqueness depend on the generated cells and are checked when the
    /// world is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(ConfigError::InvalidSpacing(self.spacing));
        }
        if self.max_level == 0 {
            return Err(ConfigError::InvalidMaxLevel(self.max_level));
        }

        let transform = GridTransform::new(self.spacing, self.ground_y);
        for &[x, z] in self.groups.iter().flat_map(|g| g.offsets.iter()) {
            let offset = GridPosition::new(x, z);
            let in_range = x.unsigned_abs() <= MAX_GRID_OFFSET as u32
                && z.unsigned_abs() <= MAX_GRID_OFFSET as u32;
            let world = transform.grid_to_world(x, z);
            let round_trips =
                world.is_finite() && transform.world_to_grid(world.x, world.z) == offset;
            if !in_range || !round_trips {
                return Err(ConfigError::OffsetOutOfRange {
                    offset,
                    spacing: self.spacing,
                });
            }
        }
        Ok(())
    }

    /// Load a layout from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a layout from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GridConfig = toml::from_str(content)?;
        if let Err(e) = config.validate() {
            tracing::warn!("Rejected grid config: {}", e);
            return Err(e);
        }
        Ok(config)
    }
}
