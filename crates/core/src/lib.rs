//! Forest Fire Simulation Core Library
//!
//! Simulates wildfire propagation on a 2D tree lattice under a wind-speed
//! parameter and quantifies the resulting spatial structure by counting
//! connected clusters of same-state cells. Trees are planted with a density
//! probability, the left boundary column is ignited, and the fire spreads
//! stochastically until no cell is burning.
//!
//! The crate is the simulation engine only: grid storage, the per-cell
//! transition rule, the randomized step scheduler, and the cluster counter.
//! Experiment sweeps, CSV export, and rendering live in the driver crates.

// Core types and utilities
pub mod core_types;

// Error types
pub mod error;

// Grid storage and read-only structure queries
pub mod grid;

// Run lifecycle, step scheduler, and the spread rule
pub mod simulation;

// Re-export core types
pub use core_types::CellState;
pub use error::{Result, SimError};
pub use grid::{count_clusters, ForestGrid};
pub use simulation::{extinguish_probability, ignition_probability, ForestFire, StepResult};
