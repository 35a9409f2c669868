//! Numerical integration methods for trajectory simulation

use crate::physics::math::{Scalar, Vector};

pub mod explicit_euler;
pub mod heun;
pub mod registry;
pub mod runge_kutta;
pub mod symplectic_euler;

pub use explicit_euler::ExplicitEuler;
pub use heun::Heun;
pub use registry::IntegratorRegistry;
pub use runge_kutta::{RungeKuttaFourthOrder, RungeKuttaSecondOrderMidpoint};
pub use symplectic_euler::SymplecticEuler;

/// Right-hand side of the equations of motion.
///
/// Implementations map a time and position to an acceleration. The field
/// must be stateless with respect to trajectory history: integrators call
/// it at arbitrary intermediate positions during multi-stage steps.
pub trait AccelerationField {
    /// Acceleration at time `t` and position `position`.
    fn at(&self, t: Scalar, position: Vector) -> Vector;
}

/// Base trait for all integrators
///
/// An integrator advances a single (position, velocity) state by one time
/// step, evaluating the supplied [`AccelerationField`] as many times as its
/// stage structure requires.
pub trait Integrator: Send + Sync {
    /// Create a boxed copy of this integrator
    fn clone_box(&self) -> Box<dyn Integrator>;

    /// Advance a single state by one time step
    ///
    /// # Arguments
    /// * `t` - Time at the start of the step
    /// * `position` - Mutable reference to position
    /// * `velocity` - Mutable reference to velocity
    /// * `field` - Acceleration field to evaluate
    /// * `dt` - Time step
    fn step(
        &self,
        t: Scalar,
        position: &mut Vector,
        velocity: &mut Vector,
        field: &dyn AccelerationField,
        dt: Scalar,
    );

    /// Get the order of convergence of this integrator
    fn convergence_order(&self) -> usize;

    /// Get the canonical name of this integrator
    fn name(&self) -> &'static str;

    /// Get alternative names accepted by the registry
    fn aliases(&self) -> Vec<&'static str> {
        Vec::new()
    }
}
