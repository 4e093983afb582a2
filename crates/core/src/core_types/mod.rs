//! Core data types

pub mod cell;

pub use cell::CellState;
