pub mod feature;
pub mod grid;
pub mod sheet;
