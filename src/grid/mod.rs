//! Grid world - cells, occupancy, and world <-> grid coordinate mapping

pub mod cell;
pub mod path;
pub mod transform;
pub mod world;

pub use cell::{CellType, GridCell};
pub use path::{Direction, PathConnections, PathShape, PathTile};
pub use transform::GridTransform;
pub use world::GridWorld;
