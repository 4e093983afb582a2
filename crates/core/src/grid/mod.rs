//! Grid storage and read-only structure queries

pub mod clusters;
pub mod forest_grid;

// Re-export main types
pub use clusters::count_clusters;
pub use forest_grid::ForestGrid;
