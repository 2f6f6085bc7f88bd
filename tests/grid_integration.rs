//! Integration tests for the grid world
//!
//! These tests drive the public API the way the renderer and UI handlers do:
//! - Coordinate lookups and world <-> grid conversion
//! - Occupancy transitions (free -> occupied -> free)
//! - Level upgrades against the configured cap
//! - Transient objects entering, leaving and moving between cells

use glam::Vec3;
use honey_factory::core::config::GridConfig;
use honey_factory::core::error::{CellError, ConfigError};
use honey_factory::core::types::{BuildingId, CellId, GridPosition};
use honey_factory::grid::{CellType, GridWorld, PathShape};

fn starter_world() -> GridWorld {
    GridWorld::new(&GridConfig::default()).expect("default layout is valid")
}

// ============================================================================
// Lookup & Coordinate Tests
// ============================================================================

#[test]
fn test_single_hive_scenario() {
    let config = GridConfig::empty().with_group(CellType::Hive, &[[0, 0]]);
    let mut world = GridWorld::new(&config).unwrap();

    let cell = world.cell_at(0, 0).expect("hive at origin");
    assert_eq!(cell.position(), Vec3::new(0.0, 0.0, 0.0));
    let id = cell.id().clone();

    assert_eq!(world.occupy_cell(id.as_str(), "hive-1"), Ok(()));
    assert_eq!(
        world.occupy_cell(id.as_str(), "hive-2"),
        Err(CellError::AlreadyOccupied {
            cell: id.clone(),
            building: BuildingId::from("hive-1"),
        })
    );
    assert_eq!(
        world.cell(id.as_str()).unwrap().building_id(),
        Some(&BuildingId::from("hive-1"))
    );
}

#[test]
fn test_unconfigured_position_is_not_found() {
    let world = starter_world();
    assert!(world.cell_at(5, 5).is_none());
}

#[test]
fn test_every_cell_round_trips_through_world_space() {
    let world = starter_world();
    for cell in world.cells() {
        let grid = cell.grid_position();
        let world_pos = world.grid_to_world(grid.x, grid.z);
        assert_eq!(world_pos, cell.position());
        assert_eq!(world.world_to_grid(world_pos.x, world_pos.z), grid);
        assert_eq!(world.cell_at(grid.x, grid.z).unwrap().id(), cell.id());
    }
}

#[test]
fn test_cells_by_type_in_construction_order() {
    let world = starter_world();
    let envs: Vec<GridPosition> = world
        .cells_of_type(CellType::Environment)
        .map(|c| c.grid_position())
        .collect();
    assert_eq!(
        envs,
        vec![
            GridPosition::new(2, 4),
            GridPosition::new(4, 4),
            GridPosition::new(-4, -2),
            GridPosition::new(4, -4),
        ]
    );

    let total: usize = CellType::ALL
        .iter()
        .map(|t| world.cells_of_type(*t).count())
        .sum();
    assert_eq!(total, world.len());
}

#[test]
fn test_custom_spacing_and_ground() {
    let toml_str = r#"
        spacing = 2.0
        ground_y = -0.5

        [[group]]
        type = "depot"
        offsets = [[3, -1]]
    "#;
    let config = GridConfig::parse_toml(toml_str).unwrap();
    let world = GridWorld::new(&config).unwrap();

    let depot = world.cell("depot_0").unwrap();
    assert_eq!(depot.position(), Vec3::new(6.0, -0.5, -2.0));
    assert_eq!(world.cell_at_world(6.7, -2.4).unwrap().id(), "depot_0");
}

#[test]
fn test_layout_collision_aborts_construction() {
    let config = GridConfig::default().with_group(CellType::Lab, &[[0, 0]]);
    // lab_0 already exists in the default layout
    assert!(matches!(
        GridWorld::new(&config),
        Err(ConfigError::DuplicateCellId(_))
    ));
}

#[test]
fn test_layout_beyond_float_precision_is_rejected() {
    let config = GridConfig::empty().with_group(CellType::Hive, &[[16_777_217, 0]]);
    match GridWorld::new(&config) {
        Err(ConfigError::OffsetOutOfRange { offset, .. }) => {
            assert_eq!(offset, GridPosition::new(16_777_217, 0));
        }
        other => panic!("expected offset rejection, got {:?}", other.map(|w| w.len())),
    }

    let config = GridConfig::empty().with_group(CellType::Path, &[[i32::MAX, 0]]);
    assert!(matches!(
        GridWorld::new(&config),
        Err(ConfigError::OffsetOutOfRange { .. })
    ));
}

// ============================================================================
// Occupancy & Level Tests
// ============================================================================

#[test]
fn test_occupancy_cycle() {
    let mut world = starter_world();

    world.occupy_cell("storage_1", "honey_extractor-1").unwrap();
    assert_eq!(world.occupied_cells().count(), 1);

    let released = world.vacate_cell("storage_1").unwrap();
    assert_eq!(released, "honey_extractor-1");
    assert_eq!(
        world.vacate_cell("storage_1"),
        Err(CellError::NotOccupied(CellId::from("storage_1")))
    );

    world.occupy_cell("storage_1", "honey_extractor-2").unwrap();
    assert_eq!(
        world.cell("storage_1").unwrap().building_id().unwrap(),
        "honey_extractor-2"
    );
}

#[test]
fn test_upgrade_to_default_cap() {
    let mut world = starter_world();
    let mut successes = 0;
    for _ in 0..world.max_level() + 5 {
        if world.upgrade_cell("colony_0").is_ok() {
            successes += 1;
        }
    }
    assert_eq!(successes, 9);
    assert_eq!(world.cell("colony_0").unwrap().level(), 10);
}

#[test]
fn test_level_survives_vacate() {
    let mut world = starter_world();
    world.occupy_cell("lab_0", "research_lab-1").unwrap();
    world.upgrade_cell("lab_0").unwrap();
    world.vacate_cell("lab_0").unwrap();
    assert_eq!(world.cell("lab_0").unwrap().level(), 2);
}

// ============================================================================
// Object Tests
// ============================================================================

#[test]
fn test_truck_drives_along_path_lane() {
    let mut world = starter_world();
    world.add_object_to_cell("path_0", "honey_truck-1").unwrap();
    world.add_object_to_cell("path_2", "sparkle-1").unwrap();

    for step in 0..4 {
        let from = format!("path_{}", step);
        let to = format!("path_{}", step + 1);
        world.move_object("honey_truck-1", &from, &to).unwrap();
    }

    assert!(world.cell("path_4").unwrap().contains_object("honey_truck-1"));
    for i in 0..4 {
        let cell = world.cell(&format!("path_{}", i)).unwrap();
        assert!(!cell.contains_object("honey_truck-1"));
    }
    assert!(world.cell("path_2").unwrap().contains_object("sparkle-1"));
}

#[test]
fn test_objects_do_not_affect_occupancy() {
    let mut world = starter_world();
    world.add_object_to_cell("hive_0", "worker_bee-1").unwrap();
    assert!(!world.cell("hive_0").unwrap().is_occupied());
    assert_eq!(world.occupy_cell("hive_0", "basic_hive-1"), Ok(()));
}

// ============================================================================
// Path Tiling Tests
// ============================================================================

#[test]
fn test_l_shaped_path_has_corner() {
    let config = GridConfig::empty().with_group(CellType::Path, &[[0, 0], [1, 0], [1, 1]]);
    let world = GridWorld::new(&config).unwrap();

    let corner = world.path_tile("path_1").unwrap();
    assert_eq!(corner.shape, PathShape::Corner);
    // West + South is the canonical North + East turned twice
    assert_eq!(corner.quarter_turns, 2);

    assert_eq!(world.path_tile("path_0").unwrap().shape, PathShape::End);
    assert_eq!(world.path_tile("path_2").unwrap().shape, PathShape::End);
}
