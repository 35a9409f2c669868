pub mod fields;
pub mod integrators;
pub mod math;
