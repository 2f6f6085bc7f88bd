pub mod config;
pub mod error;
pub mod types;

pub use config::{CellGroup, GridConfig};
pub use error::{CellError, ConfigError, FactoryError, Result};
pub use types::{BuildingId, CellId, GridPosition, ObjectId};
