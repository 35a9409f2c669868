/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 2D vector type for positions, velocities, and accelerations
pub type Vector = glam::DVec2;
