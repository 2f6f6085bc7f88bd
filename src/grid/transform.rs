//! World <-> grid coordinate mapping

use crate::core::types::GridPosition;
use glam::Vec3;

/// Uniform scaling between lattice offsets and world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTransform {
    spacing: f32,
    ground_y: f32,
}

impl GridTransform {
    /// Spacing must be finite and positive; `GridConfig::validate` enforces it
    pub fn new(spacing: f32, ground_y: f32) -> Self {
        Self { spacing, ground_y }
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    /// Nearest lattice coordinate to a world point.
    ///
    /// Halves round toward positive infinity, so `-2.0` world units at
    /// spacing 4 maps to 0, not -1.
    #[inline]
    pub fn world_to_grid(&self, world_x: f32, world_z: f32) -> GridPosition {
        GridPosition::new(
            round_half_up(world_x / self.spacing),
            round_half_up(world_z / self.spacing),
        )
    }

    /// World position of a lattice coordinate on the ground plane
    #[inline]
    pub fn grid_to_world(&self, grid_x: i32, grid_z: i32) -> Vec3 {
        Vec3::new(
            grid_x as f32 * self.spacing,
            self.ground_y,
            grid_z as f32 * self.spacing,
        )
    }

    /// Snap an arbitrary world point to the nearest lattice point
    pub fn snap(&self, world: Vec3) -> Vec3 {
        let pos = self.world_to_grid(world.x, world.z);
        self.grid_to_world(pos.x, pos.z)
    }
}

#[inline]
fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform() -> GridTransform {
        GridTransform::new(4.0, 0.0)
    }

    #[test]
    fn test_grid_to_world_scales_x_and_z() {
        let t = transform();
        assert_eq!(t.grid_to_world(0, 0), Vec3::ZERO);
        assert_eq!(t.grid_to_world(2, -3), Vec3::new(8.0, 0.0, -12.0));
    }

    #[test]
    fn test_world_to_grid_rounds_to_nearest() {
        let t = transform();
        assert_eq!(t.world_to_grid(8.0, -12.0), GridPosition::new(2, -3));
        assert_eq!(t.world_to_grid(5.9, -1.9), GridPosition::new(1, 0));
        assert_eq!(t.world_to_grid(-6.1, 9.9), GridPosition::new(-2, 2));
    }

    #[test]
    fn test_world_to_grid_halves_round_up() {
        let t = transform();
        assert_eq!(t.world_to_grid(2.0, 6.0), GridPosition::new(1, 2));
        assert_eq!(t.world_to_grid(-2.0, -6.0), GridPosition::new(0, -1));
    }

    #[test]
    fn test_round_trip_on_lattice() {
        let t = transform();
        for x in -10..=10 {
            for z in -10..=10 {
                let world = t.grid_to_world(x, z);
                assert_eq!(t.world_to_grid(world.x, world.z), GridPosition::new(x, z));
            }
        }
    }

    #[test]
    fn test_ground_level_is_respected() {
        let t = GridTransform::new(2.0, -0.5);
        assert_eq!(t.grid_to_world(1, 1), Vec3::new(2.0, -0.5, 2.0));
        assert_eq!(t.snap(Vec3::new(2.9, 7.0, 1.2)), Vec3::new(2.0, -0.5, 2.0));
    }
}
