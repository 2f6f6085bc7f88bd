//! Placement layer - places, upgrades, replaces and removes catalog buildings

pub mod registry;

pub use registry::{BuildingRegistry, PlacedBuilding, PlacementError};
