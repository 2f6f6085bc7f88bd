//! Honey Factory - grid world and placement model
//!
//! The world is a fixed set of typed cells on an integer lattice. Each cell
//! records which building claims it, its upgrade level, and the transient
//! objects passing through. The renderer reads it every frame; UI actions
//! and simulation ticks write to it through explicit, non-panicking
//! operations.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`core`] | Shared ids, error types, grid configuration |
//! | [`grid`] | `GridWorld`, cells, coordinate transform, path tiling |
//! | [`catalog`] | Read-only building, object and vehicle type registries |
//! | [`placement`] | Building registry driving occupancy and upgrades |

pub mod catalog;
pub mod core;
pub mod grid;
pub mod placement;
