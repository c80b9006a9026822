pub mod grid;
pub mod mapping;
pub mod ramp;
pub mod trim;
