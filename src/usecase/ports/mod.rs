pub mod grid_source;
pub mod repo;
