//! Single-electron trajectory state machine
//!
//! A [`Particle`] owns one trajectory: a pre-allocated sample buffer, the
//! parallel time buffer, and the terminal flags. Advancing it evaluates the
//! local field gradient by central finite differences, delegates the actual
//! state update to the configured [`Integrator`], and then applies the
//! detector-hit and domain-exit boundary tests. Batch (`solve`) and
//! incremental (`advance`) modes share the same transition, so both paths
//! agree on index conventions and flag semantics.

use crate::physics::fields::PotentialField;
use crate::physics::integrators::{AccelerationField, Integrator};
use crate::physics::math::{Scalar, Vector};
use crate::resources::SharedRng;
use rand::Rng;
use serde::Serialize;
use std::f64::consts::FRAC_PI_2;

/// Electron charge-to-mass ratio, converting the field gradient into an
/// acceleration in the field's unit convention.
pub const CHARGE_MASS_RATIO: Scalar = 1.76e11;

/// Kinetic scale of freshly emitted electrons (arbitrary units matching the
/// field convention).
pub const INITIAL_ENERGY: Scalar = 1e6;

/// Electrons enter at x = 0 with y sampled uniformly from this band.
const SOURCE_Y_MIN: Scalar = 0.6;
const SOURCE_Y_MAX: Scalar = 0.9;

/// Detector plate at the right boundary, spanning a restricted y band.
const DETECTOR_Y_MIN: Scalar = 0.1;
const DETECTOR_Y_MAX: Scalar = 0.4;

/// One trajectory entry: position and velocity in normalized domain units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub position: Vector,
    pub velocity: Vector,
}

/// Acceleration field derived from a potential by central finite differences.
///
/// Borrows the potential for the duration of one step, the same way each
/// integrator stage borrows it: the gradient is re-evaluated at every
/// requested position, with no trajectory state involved.
pub struct FieldAcceleration<'a> {
    field: &'a dyn PotentialField,
    physical_size: Vector,
    delta: Vector,
}

impl<'a> FieldAcceleration<'a> {
    pub fn new(field: &'a dyn PotentialField, physical_size: Vector) -> Self {
        let (nx, ny) = field.resolution();
        // Finite-difference step tied to the grid spacing, not to the
        // integration step size
        let delta = Vector::new(1.0 / nx as Scalar, 1.0 / ny as Scalar);
        Self {
            field,
            physical_size,
            delta,
        }
    }
}

impl AccelerationField for FieldAcceleration<'_> {
    fn at(&self, _t: Scalar, position: Vector) -> Vector {
        let Vector { x: dx, y: dy } = self.delta;

        let df_dx = (self.field.interpolate(position + Vector::new(dx, 0.0))
            - self.field.interpolate(position - Vector::new(dx, 0.0)))
            / (2.0 * dx);
        let df_dy = (self.field.interpolate(position + Vector::new(0.0, dy))
            - self.field.interpolate(position - Vector::new(0.0, dy)))
            / (2.0 * dy);

        // Normalized-domain gradient to physical gradient, then to
        // acceleration per axis
        Vector::new(df_dx, df_dy) / self.physical_size * CHARGE_MASS_RATIO
    }
}

/// One independently simulated electron.
///
/// The trajectory buffer is sized to `max_iterations` at construction and
/// never grows; entries at index `len()` and beyond are unwritten and must
/// not be read. Once a terminal flag is set no further samples are written.
pub struct Particle {
    samples: Vec<TrajectorySample>,
    times: Vec<Scalar>,
    /// Number of valid samples (always >= 1)
    len: usize,
    hit_detector: bool,
    out_of_domain: bool,
    physical_size: Vector,
    h: Scalar,
}

impl Particle {
    /// Create a particle with a randomly sampled initial condition.
    ///
    /// The emission angle is uniform in (-pi/2, pi/2) so every electron
    /// starts moving into the domain; speed is fixed by [`INITIAL_ENERGY`]
    /// and converted to normalized-domain units by the physical size.
    pub fn new(
        rng: &mut SharedRng,
        physical_size: Vector,
        h: Scalar,
        max_iterations: usize,
    ) -> Self {
        assert!(max_iterations > 0, "max_iterations must be positive");
        assert!(h > 0.0, "step size must be positive");

        let angle: Scalar = rng.random_range(-FRAC_PI_2..FRAC_PI_2);
        let velocity = Vector::new(angle.cos(), angle.sin()) * INITIAL_ENERGY / physical_size;
        let position = Vector::new(0.0, rng.random_range(SOURCE_Y_MIN..SOURCE_Y_MAX));

        let mut samples = vec![TrajectorySample::default(); max_iterations];
        samples[0] = TrajectorySample { position, velocity };
        let times = vec![0.0; max_iterations];

        Self {
            samples,
            times,
            len: 1,
            hit_detector: false,
            out_of_domain: false,
            physical_size,
            h,
        }
    }

    /// Valid prefix of the trajectory buffer.
    pub fn trajectory(&self) -> &[TrajectorySample] {
        &self.samples[..self.len]
    }

    /// Times matching [`Self::trajectory`], starting at 0.
    pub fn times(&self) -> &[Scalar] {
        &self.times[..self.len]
    }

    /// Number of valid samples written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn last_sample(&self) -> &TrajectorySample {
        &self.samples[self.len - 1]
    }

    pub fn final_time(&self) -> Scalar {
        self.times[self.len - 1]
    }

    pub fn hit_detector(&self) -> bool {
        self.hit_detector
    }

    pub fn out_of_domain(&self) -> bool {
        self.out_of_domain
    }

    /// A terminal particle takes no further steps.
    pub fn is_terminal(&self) -> bool {
        self.hit_detector || self.out_of_domain
    }

    /// Whether the iteration budget ran out before any boundary condition
    /// fired. Callers should treat such trajectories as inconclusive.
    pub fn exhausted(&self) -> bool {
        !self.is_terminal() && self.len == self.samples.len()
    }

    /// Advance exactly one step at iteration index `n` (reading sample `n`,
    /// writing sample `n + 1`).
    ///
    /// Terminal particles and out-of-range indices are skipped; the call
    /// still succeeds. Returns true if a sample was written.
    pub fn advance(
        &mut self,
        n: usize,
        field: &dyn PotentialField,
        integrator: &dyn Integrator,
    ) -> bool {
        if self.is_terminal() || n + 1 >= self.samples.len() || n >= self.len {
            return false;
        }
        self.step_once(n, field, integrator);
        true
    }

    /// Run to termination or until the iteration budget is exhausted.
    pub fn solve(&mut self, field: &dyn PotentialField, integrator: &dyn Integrator) {
        for n in 0..self.samples.len() - 1 {
            if self.is_terminal() {
                break;
            }
            self.step_once(n, field, integrator);
        }
    }

    /// The shared per-step transition: integrate, record, apply boundary
    /// tests. The detector test and the domain test are evaluated
    /// independently; a detector hit (x > 1) always also trips the domain
    /// test, so `hit_detector` implies `out_of_domain`.
    fn step_once(&mut self, n: usize, field: &dyn PotentialField, integrator: &dyn Integrator) {
        let acceleration = FieldAcceleration::new(field, self.physical_size);

        let TrajectorySample {
            mut position,
            mut velocity,
        } = self.samples[n];
        let t = self.times[n];

        integrator.step(t, &mut position, &mut velocity, &acceleration, self.h);

        self.samples[n + 1] = TrajectorySample { position, velocity };
        self.times[n + 1] = t + self.h;
        self.len = n + 2;

        if position.x > 1.0 && DETECTOR_Y_MIN < position.y && position.y < DETECTOR_Y_MAX {
            self.hit_detector = true;
        }

        if position.x < 0.0 || position.x > 1.0 || position.y < 0.0 || position.y > 1.0 {
            self.out_of_domain = true;
        }
    }
}
