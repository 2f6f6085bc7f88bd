//! Building types that can be placed on grid cells

use crate::catalog::{validate_size, Catalog, CatalogEntry};
use crate::grid::cell::CellType;
use serde::{Deserialize, Serialize};

/// Growth of each dimension per level above 1
const SIZE_GROWTH_PER_LEVEL: f32 = 0.2;

/// Family a building belongs to; decides which cells accept it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingCategory {
    Hive,
    Lab,
    Depot,
    Storage,
    Colony,
}

impl BuildingCategory {
    /// The only cell type buildings of this category may occupy
    pub fn cell_type(&self) -> CellType {
        match self {
            BuildingCategory::Hive => CellType::Hive,
            BuildingCategory::Lab => CellType::Lab,
            BuildingCategory::Depot => CellType::Depot,
            BuildingCategory::Storage => CellType::Storage,
            BuildingCategory::Colony => CellType::Colony,
        }
    }
}

fn default_upgradeable() -> bool {
    true
}

/// Metadata for one kind of building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingType {
    pub id: String,
    pub name: String,
    pub category: BuildingCategory,
    /// Highest level this building supports, independent of the world cap
    pub max_level: u32,
    /// Footprint `[width, height, depth]` at level 1
    pub base_size: [f32; 3],
    pub base_color: String,
    #[serde(default = "default_upgradeable")]
    pub upgradeable: bool,
}

impl BuildingType {
    /// Rendered size at a level: +20% per level above 1
    pub fn size_at_level(&self, level: u32) -> [f32; 3] {
        let multiplier = 1.0 + level.saturating_sub(1) as f32 * SIZE_GROWTH_PER_LEVEL;
        self.base_size.map(|s| s * multiplier)
    }

    /// Whether this building can sit on a cell of the given type
    pub fn fits(&self, cell_type: CellType) -> bool {
        self.category.cell_type() == cell_type
    }
}

impl CatalogEntry for BuildingType {
    const TABLE: &'static str = "building";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        if self.max_level == 0 {
            return Err("max_level must be at least 1".into());
        }
        validate_size(&self.base_size)
    }

    fn defaults() -> Vec<Self> {
        vec![
            building(
                "basic_hive",
                "Basic Hive",
                BuildingCategory::Hive,
                5,
                [1.5, 1.5, 1.5],
                "#fbbf24",
            ),
            building(
                "royal_hive",
                "Royal Hive",
                BuildingCategory::Hive,
                3,
                [2.0, 2.5, 2.0],
                "#f59e0b",
            ),
            building(
                "research_lab",
                "Research Laboratory",
                BuildingCategory::Lab,
                8,
                [2.5, 2.0, 2.5],
                "#8b5cf6",
            ),
            building(
                "honey_extractor",
                "Honey Extractor",
                BuildingCategory::Storage,
                6,
                [2.0, 3.0, 2.0],
                "#06b6d4",
            ),
            building(
                "shipping_depot",
                "Shipping Depot",
                BuildingCategory::Depot,
                4,
                [3.0, 1.5, 3.0],
                "#ef4444",
            ),
            building(
                "bee_colony",
                "Bee Colony",
                BuildingCategory::Colony,
                7,
                [1.8, 1.2, 1.8],
                "#22c55e",
            ),
        ]
    }
}

fn building(
    id: &str,
    name: &str,
    category: BuildingCategory,
    max_level: u32,
    base_size: [f32; 3],
    base_color: &str,
) -> BuildingType {
    BuildingType {
        id: id.into(),
        name: name.into(),
        category,
        max_level,
        base_size,
        base_color: base_color.into(),
        upgradeable: true,
    }
}

impl Catalog<BuildingType> {
    /// Buildings of one category in catalog order
    pub fn by_category(
        &self,
        category: BuildingCategory,
    ) -> impl Iterator<Item = &BuildingType> + '_ {
        self.iter().filter(move |b| b.category == category)
    }
}
