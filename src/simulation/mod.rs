pub mod ensemble;
pub mod particle;
pub mod sinks;

pub use ensemble::{DetectorHit, ParticleEnsemble};
pub use particle::{Particle, TrajectorySample};
pub use sinks::{LogProgress, NullProgress, ProgressSink, TrajectorySink};
