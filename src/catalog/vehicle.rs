//! Vehicle types that travel along path cells

use crate::catalog::{validate_size, CatalogEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehiclePurpose {
    Delivery,
    Transport,
    Maintenance,
    Collection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleType {
    pub id: String,
    pub name: String,
    pub purpose: VehiclePurpose,
    /// World units per second
    pub speed: f32,
    pub capacity: u32,
    pub size: [f32; 3],
    pub color: String,
    pub max_level: u32,
}

impl VehicleType {
    /// Seconds needed to cover `distance` world units
    pub fn travel_time(&self, distance: f32) -> f32 {
        distance / self.speed
    }
}

impl CatalogEntry for VehicleType {
    const TABLE: &'static str = "vehicle";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err("speed must be positive".into());
        }
        if self.max_level == 0 {
            return Err("max_level must be at least 1".into());
        }
        validate_size(&self.size)
    }

    fn defaults() -> Vec<Self> {
        vec![
            vehicle(
                "honey_truck",
                "Honey Delivery Truck",
                VehiclePurpose::Delivery,
                2.0,
                100,
                [2.0, 1.0, 4.0],
                "#fbbf24",
                5,
            ),
            vehicle(
                "cargo_drone",
                "Cargo Drone",
                VehiclePurpose::Transport,
                4.0,
                50,
                [1.5, 0.5, 1.5],
                "#06b6d4",
                3,
            ),
            vehicle(
                "maintenance_bot",
                "Maintenance Robot",
                VehiclePurpose::Maintenance,
                1.0,
                20,
                [1.0, 1.0, 1.0],
                "#8b5cf6",
                4,
            ),
            vehicle(
                "honey_collector",
                "Honey Collector",
                VehiclePurpose::Collection,
                1.5,
                75,
                [1.5, 1.2, 2.0],
                "#f59e0b",
                6,
            ),
        ]
    }
}

#[allow(clippy::too_many_arguments)]
fn vehicle(
    id: &str,
    name: &str,
    purpose: VehiclePurpose,
    speed: f32,
    capacity: u32,
    size: [f32; 3],
    color: &str,
    max_level: u32,
) -> VehicleType {
    VehicleType {
        id: id.into(),
        name: name.into(),
        purpose,
        speed,
        capacity,
        size,
        color: color.into(),
        max_level,
    }
}
