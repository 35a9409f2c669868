//! Explicit Euler integration method (forward Euler)
//!
//! Provided primarily as the simplest possible step strategy and as a
//! baseline for accuracy comparisons. It exhibits energy drift in
//! conservative systems and should not be the default for long runs.

use super::{AccelerationField, Integrator};
use crate::physics::math::{Scalar, Vector};

/// Explicit Euler integrator (forward Euler method)
///
/// The position-first update scheme:
///
/// ```text
/// Stage 1: Position update using CURRENT velocity
///   x(t+dt) = x(t) + v(t) * dt
///
/// Stage 2: Velocity update using ORIGINAL position
///   a(t) = f(t, x(t))
///   v(t+dt) = v(t) + a(t) * dt
/// ```
///
/// # Mathematical Properties
///
/// - **Order of accuracy**: O(dt) local truncation error
/// - **Field evaluations**: 1 per timestep
/// - **Symplectic**: No
#[derive(Debug, Clone, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(self.clone())
    }

    fn step(
        &self,
        t: Scalar,
        position: &mut Vector,
        velocity: &mut Vector,
        field: &dyn AccelerationField,
        dt: Scalar,
    ) {
        // Store the current velocity for the position update
        let current_velocity = *velocity;

        // Acceleration at the current position
        let acceleration = field.at(t, *position);

        // Update position first using CURRENT velocity: x(t+dt) = x(t) + v(t) * dt
        *position += current_velocity * dt;

        // Then update velocity: v(t+dt) = v(t) + a(t) * dt
        *velocity += acceleration * dt;
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "explicit_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["euler", "forward_euler"]
    }
}
