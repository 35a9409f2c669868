//! Cathode prelude module
//!
//! Re-exports the most commonly used types and traits to reduce import
//! boilerplate.

// External crate re-exports
pub use rand::Rng;

// Internal re-exports - Config
pub use crate::config::SimulationConfig;

// Internal re-exports - Resources
pub use crate::resources::SharedRng;

// Internal re-exports - Physics
pub use crate::physics::fields::{FieldProfile, PotentialField, SampledField};
pub use crate::physics::integrators::{AccelerationField, Integrator, IntegratorRegistry};
pub use crate::physics::math::{Scalar, Vector};

// Internal re-exports - Simulation
pub use crate::simulation::{
    DetectorHit, LogProgress, NullProgress, Particle, ParticleEnsemble, ProgressSink,
    TrajectorySample, TrajectorySink,
};
