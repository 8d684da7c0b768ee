//! Spatial acceleration structures.

pub mod uniform_grid;

pub use uniform_grid::UniformGrid;
