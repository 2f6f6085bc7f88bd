//! Transient object types - bees, items, boxes and effects

use crate::catalog::{validate_size, CatalogEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectCategory {
    Bee,
    Wasp,
    Item,
    Box,
    Effect,
}

/// Metadata for one kind of cell-resident object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    pub id: String,
    pub name: String,
    pub category: ObjectCategory,
    pub size: [f32; 3],
    pub color: String,
    pub animated: bool,
    /// World units per second, for animated objects
    #[serde(default)]
    pub speed: Option<f32>,
    /// Seconds before the object despawns; `None` lives forever
    #[serde(default)]
    pub lifespan: Option<f32>,
}

impl ObjectType {
    pub fn is_transient(&self) -> bool {
        self.lifespan.is_some()
    }

    /// Whether an object spawned at `spawned_at` has expired by `now` (seconds)
    pub fn is_expired(&self, spawned_at: f32, now: f32) -> bool {
        self.lifespan.is_some_and(|life| now - spawned_at >= life)
    }
}

impl CatalogEntry for ObjectType {
    const TABLE: &'static str = "object";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        if self.speed.is_some_and(|s| !s.is_finite() || s <= 0.0) {
            return Err("speed must be positive".into());
        }
        if self.lifespan.is_some_and(|l| !l.is_finite() || l <= 0.0) {
            return Err("lifespan must be positive".into());
        }
        validate_size(&self.size)
    }

    fn defaults() -> Vec<Self> {
        vec![
            animated(
                "worker_bee",
                "Worker Bee",
                ObjectCategory::Bee,
                [0.2, 0.15, 0.3],
                "#fbbf24",
                3.0,
                60.0,
            ),
            animated("wasp", "Wasp", ObjectCategory::Wasp, [0.25, 0.2, 0.4], "#dc2626", 5.0, 30.0),
            still("honey_jar", "Honey Jar", ObjectCategory::Item, [0.3, 0.4, 0.3], "#fbbf24"),
            still(
                "pollen_ball",
                "Pollen Ball",
                ObjectCategory::Item,
                [0.15, 0.15, 0.15],
                "#facc15",
            ),
            still("shipping_box", "Shipping Box", ObjectCategory::Box, [0.8, 0.6, 0.8], "#a16207"),
            animated(
                "honey_flow",
                "Honey Flow Effect",
                ObjectCategory::Effect,
                [0.1, 0.5, 0.1],
                "#fbbf24",
                1.0,
                3.0,
            ),
            animated(
                "sparkle",
                "Sparkle Effect",
                ObjectCategory::Effect,
                [0.05, 0.05, 0.05],
                "#fde047",
                2.0,
                2.0,
            ),
        ]
    }
}

fn still(
    id: &str,
    name: &str,
    category: ObjectCategory,
    size: [f32; 3],
    color: &str,
) -> ObjectType {
    ObjectType {
        id: id.into(),
        name: name.into(),
        category,
        size,
        color: color.into(),
        animated: false,
        speed: None,
        lifespan: None,
    }
}

fn animated(
    id: &str,
    name: &str,
    category: ObjectCategory,
    size: [f32; 3],
    color: &str,
    speed: f32,
    lifespan: f32,
) -> ObjectType {
    ObjectType {
        animated: true,
        speed: Some(speed),
        lifespan: Some(lifespan),
        ..still(id, name, category, size, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogError};

    #[test]
    fn test_defaults() {
        let catalog = Catalog::<ObjectType>::with_defaults();
        let bee = catalog.get("worker_bee").unwrap();
        assert_eq!(bee.category, ObjectCategory::Bee);
        assert!(bee.animated);
        assert_eq!(bee.speed, Some(3.0));

        let jar = catalog.get("honey_jar").unwrap();
        assert!(!jar.animated);
        assert!(!jar.is_transient());
    }

    #[test]
    fn test_expiry() {
        let catalog = Catalog::<ObjectType>::with_defaults();
        let sparkle = catalog.get("sparkle").unwrap();
        assert!(!sparkle.is_expired(10.0, 11.5));
        assert!(sparkle.is_expired(10.0, 12.0));

        let jar = catalog.get("honey_jar").unwrap();
        assert!(!jar.is_expired(0.0, 1.0e6));
    }

    #[test]
    fn test_parse_toml_optional_fields() {
        let toml_str = r##"
            [[object]]
            id = "drone_bee"
            name = "Drone Bee"
            category = "bee"
            size = [0.25, 0.2, 0.35]
            color = "#ca8a04"
            animated = true
            speed = 2.5

            [[object]]
            id = "crate"
            name = "Crate"
            category = "box"
            size = [1.0, 1.0, 1.0]
            color = "#78350f"
            animated = false
        "##;

        let catalog = Catalog::<ObjectType>::parse_toml(toml_str).unwrap();
        let drone = catalog.get("drone_bee").unwrap();
        assert_eq!(drone.speed, Some(2.5));
        assert_eq!(drone.lifespan, None);
        assert_eq!(catalog.get("crate").unwrap().category, ObjectCategory::Box);
    }

    #[test]
    fn test_rejects_negative_lifespan() {
        let mut catalog = Catalog::<ObjectType>::new();
        let mut bee = Catalog::<ObjectType>::with_defaults()
            .get("worker_bee")
            .unwrap()
            .clone();
        bee.lifespan = Some(-1.0);
        assert!(matches!(
            catalog.insert(bee),
            Err(CatalogError::InvalidEntry { .. })
        ));
    }
}
