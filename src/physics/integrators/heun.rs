//! Heun's method (Improved Euler) integration
//!
//! A classical second-order predictor-corrector method that improves upon
//! basic Euler by averaging slopes at the beginning and predicted endpoint
//! of each timestep.

use super::{AccelerationField, Integrator};
use crate::physics::math::{Scalar, Vector};

/// Heun's method (Improved Euler method)
///
/// # Algorithm
///
/// ```text
/// Stage 1 (Predictor):
///   k1_x = v(t)
///   k1_v = f(t, x(t))
///
/// Stage 2 (Evaluate at predicted point):
///   x_pred = x(t) + k1_x * dt
///   v_pred = v(t) + k1_v * dt
///   k2_x = v_pred
///   k2_v = f(t + dt, x_pred)
///
/// Final update (Average):
///   x(t+dt) = x(t) + (k1_x + k2_x) * dt/2
///   v(t+dt) = v(t) + (k1_v + k2_v) * dt/2
/// ```
///
/// # Mathematical Properties
///
/// - **Order of accuracy**: O(dt²) local truncation error
/// - **Field evaluations**: 2 per timestep
/// - **Symplectic**: No
#[derive(Debug, Clone, Default)]
pub struct Heun;

impl Integrator for Heun {
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
        // Stage 1: slopes at the current state
        let k1_x = *velocity;
        let k1_v = field.at(t, *position);

        // Stage 2: slopes at the predicted endpoint
        let pos_pred = *position + k1_x * dt;
        let vel_pred = *velocity + k1_v * dt;
        let k2_x = vel_pred;
        let k2_v = field.at(t + dt, pos_pred);

        // Average the two slopes
        *position += (k1_x + k2_x) * (dt * 0.5);
        *velocity += (k1_v + k2_v) * (dt * 0.5);
    }

    fn convergence_order(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "heun"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["improved_euler"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heun_constant_acceleration() {
        struct ConstantField;
        impl AccelerationField for ConstantField {
            fn at(&self, _t: Scalar, _position: Vector) -> Vector {
                Vector::new(0.0, -9.81)
            }
        }

        let integrator = Heun;
        let mut position = Vector::ZERO;
        let mut velocity = Vector::new(1.0, 0.0);
        let dt = 0.01;

        integrator.step(0.0, &mut position, &mut velocity, &ConstantField, dt);

        // With constant acceleration Heun reproduces the exact kinematics:
        // x = v0*dt + a*dt^2/2
        let expected = Vector::new(0.01, -9.81 * 0.5 * dt * dt);
        assert!((position - expected).length() < 1e-12);
        assert!((velocity - Vector::new(1.0, -0.0981)).length() < 1e-12);
    }
}
