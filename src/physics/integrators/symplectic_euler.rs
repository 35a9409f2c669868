//! Symplectic Euler integration method
//!
//! The simplest symplectic integrator. Despite its first-order accuracy it
//! keeps energy errors bounded in conservative systems, which makes it a
//! reasonable cheap default when the potential is static.

use super::{AccelerationField, Integrator};
use crate::physics::math::{Scalar, Vector};

/// Symplectic Euler integrator (also known as semi-implicit Euler)
///
/// The key difference from explicit Euler is updating velocity before
/// position:
///
/// ```text
/// Stage 1: Velocity update using current position
///   a(t) = f(t, x(t))
///   v(t+dt) = v(t) + a(t) * dt
///
/// Stage 2: Position update using NEW velocity
///   x(t+dt) = x(t) + v(t+dt) * dt
/// ```
///
/// # Mathematical Properties
///
/// - **Order of accuracy**: O(dt) local truncation error
/// - **Field evaluations**: 1 per timestep
/// - **Symplectic**: Yes - bounded energy oscillation, no secular drift
#[derive(Debug, Clone, Default)]
pub struct SymplecticEuler;

impl Integrator for SymplecticEuler {
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
        // Velocity first: v(t+dt) = v(t) + a(t) * dt
        let acceleration = field.at(t, *position);
        *velocity += acceleration * dt;

        // Position second, with the NEW velocity
        *position += *velocity * dt;
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "symplectic_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["semi_implicit_euler"]
    }
}
