//! Runge-Kutta integration methods

use super::{AccelerationField, Integrator};
use crate::physics::math::{Scalar, Vector};

/// Second-order Runge-Kutta method (Midpoint method)
///
/// A 2-stage, 2nd order accurate integrator that evaluates the derivative
/// at the midpoint of the timestep.
///
/// Algorithm:
/// - k1 = f(t, y)
/// - k2 = f(t + dt/2, y + k1*dt/2)
/// - y_new = y + k2*dt
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKuttaSecondOrderMidpoint;

impl Integrator for RungeKuttaSecondOrderMidpoint {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(
        &self,
        t: Scalar,
        position: &mut Vector,
        velocity: &mut Vector,
        field: &dyn AccelerationField,
        dt: Scalar,
    ) {
        // Stage 1: Evaluate at current state
        let k1_x = *velocity;
        let k1_v = field.at(t, *position);

        // Stage 2: Evaluate at midpoint
        let pos_mid = *position + k1_x * (dt * 0.5);
        let vel_mid = *velocity + k1_v * (dt * 0.5);
        let k2_x = vel_mid;
        let k2_v = field.at(t + dt * 0.5, pos_mid);

        // Update using midpoint derivative
        *position += k2_x * dt;
        *velocity += k2_v * dt;
    }

    fn convergence_order(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "rk2"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["midpoint", "rk2_midpoint"]
    }
}

/// Fourth-order Runge-Kutta integrator (RK4)
///
/// A classic multi-stage integrator that provides fourth-order accuracy
/// by combining four intermediate evaluations of the derivative.
///
/// The RK4 algorithm:
/// 1. k1 = f(t, y)
/// 2. k2 = f(t + dt/2, y + k1*dt/2)
/// 3. k3 = f(t + dt/2, y + k2*dt/2)
/// 4. k4 = f(t + dt, y + k3*dt)
/// 5. y(t+dt) = y(t) + dt/6 * (k1 + 2*k2 + 2*k3 + k4)
#[derive(Debug, Clone, Default)]
pub struct RungeKuttaFourthOrder;

impl Integrator for RungeKuttaFourthOrder {
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
        let half_dt = dt * 0.5;

        // Stage 1: k1 at the current state
        let k1_x = *velocity;
        let k1_v = field.at(t, *position);

        // Stage 2: k2 at midpoint using k1
        let pos_k2 = *position + k1_x * half_dt;
        let vel_k2 = *velocity + k1_v * half_dt;
        let k2_x = vel_k2;
        let k2_v = field.at(t + half_dt, pos_k2);

        // Stage 3: k3 at midpoint using k2
        let pos_k3 = *position + k2_x * half_dt;
        let vel_k3 = *velocity + k2_v * half_dt;
        let k3_x = vel_k3;
        let k3_v = field.at(t + half_dt, pos_k3);

        // Stage 4: k4 at endpoint using k3
        let pos_k4 = *position + k3_x * dt;
        let vel_k4 = *velocity + k3_v * dt;
        let k4_x = vel_k4;
        let k4_v = field.at(t + dt, pos_k4);

        // Combine stages using RK4 weights: y_n+1 = y_n + dt/6 * (k1 + 2*k2 + 2*k3 + k4)
        *position += (k1_x + k2_x * 2.0 + k3_x * 2.0 + k4_x) * (dt / 6.0);
        *velocity += (k1_v + k2_v * 2.0 + k3_v * 2.0 + k4_v) * (dt / 6.0);
    }

    fn convergence_order(&self) -> usize {
        4
    }

    fn name(&self) -> &'static str {
        "rk4"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["runge_kutta_4"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantField;
    impl AccelerationField for ConstantField {
        fn at(&self, _t: Scalar, _position: Vector) -> Vector {
            Vector::new(0.0, -9.81)
        }
    }

    #[test]
    fn test_rk4_constant_acceleration() {
        let rk4 = RungeKuttaFourthOrder;
        let mut position = Vector::new(1.0, 0.0);
        let mut velocity = Vector::new(0.0, 1.0);
        let dt = 0.01;

        rk4.step(0.0, &mut position, &mut velocity, &ConstantField, dt);

        // With constant acceleration all k_v stages are equal, so the
        // velocity update collapses to v += a * dt
        assert!((velocity - Vector::new(0.0, 1.0 - 0.0981)).length() < 1e-12);

        // Position gets the exact quadratic term from the staged velocities
        let expected_pos = Vector::new(1.0, 0.01 - 9.81 * 0.5 * dt * dt);
        assert!(
            (position - expected_pos).length() < 1e-10,
            "position should match RK4 result, got {position:?}"
        );
    }

    #[test]
    fn test_rk2_midpoint_step() {
        let integrator = RungeKuttaSecondOrderMidpoint;
        let mut position = Vector::ZERO;
        let mut velocity = Vector::new(1.0, 0.0);
        let dt = 0.01;

        integrator.step(0.0, &mut position, &mut velocity, &ConstantField, dt);

        // Verify movement occurred in the expected directions
        assert!(position.x > 0.0);
        assert!(velocity.y < 0.0);
    }
}
