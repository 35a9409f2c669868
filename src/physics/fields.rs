//! Static potential fields and their interpolation seam
//!
//! The simulation core treats the potential as an opaque collaborator: a
//! scalar field over the normalized unit square, sampled through
//! [`PotentialField::interpolate`]. Field generation itself (mesh solving,
//! boundary-value problems) lives outside this crate; what ships here is a
//! grid-backed [`SampledField`] with bilinear interpolation plus a few
//! analytic profiles to fill that grid for demos and tests.

use crate::physics::math::{Scalar, Vector};
use serde::{Deserialize, Serialize};

/// Read-only 2D scalar potential over the normalized unit square.
///
/// `interpolate` must be defined on the closed unit square plus a small
/// margin (one finite-difference step on each side), so that central
/// differences can be taken at boundary positions. Behavior further outside
/// that margin is unspecified.
pub trait PotentialField: Send + Sync {
    /// Interpolated potential at normalized coordinates.
    fn interpolate(&self, point: Vector) -> Scalar;

    /// Underlying grid resolution (width, height).
    ///
    /// The trajectory core derives its finite-difference step from this:
    /// `delta = (1/width, 1/height)`.
    fn resolution(&self) -> (usize, usize);
}

/// Potential sampled on a regular grid, interpolated bilinearly.
///
/// Node `(i, j)` sits at normalized coordinates `(i/(nx-1), j/(ny-1))`.
/// Queries outside the unit square clamp to the nearest edge value, which
/// covers the ±delta margin required by the trait.
pub struct SampledField {
    values: Vec<Scalar>,
    nx: usize,
    ny: usize,
}

impl SampledField {
    /// Build a field by sampling `f` at every grid node.
    ///
    /// Both dimensions must be at least 2.
    pub fn from_fn<F>(nx: usize, ny: usize, f: F) -> Self
    where
        F: Fn(Scalar, Scalar) -> Scalar,
    {
        assert!(nx >= 2 && ny >= 2, "grid must be at least 2x2");

        let mut values = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            let y = j as Scalar / (ny - 1) as Scalar;
            for i in 0..nx {
                let x = i as Scalar / (nx - 1) as Scalar;
                values.push(f(x, y));
            }
        }

        Self { values, nx, ny }
    }

    fn node(&self, i: usize, j: usize) -> Scalar {
        self.values[j * self.nx + i]
    }
}

impl PotentialField for SampledField {
    fn interpolate(&self, point: Vector) -> Scalar {
        // Clamp into the unit square; this extends the field constantly
        // past each edge, covering the finite-difference margin
        let x = point.x.clamp(0.0, 1.0) * (self.nx - 1) as Scalar;
        let y = point.y.clamp(0.0, 1.0) * (self.ny - 1) as Scalar;

        let i0 = (x.floor() as usize).min(self.nx - 2);
        let j0 = (y.floor() as usize).min(self.ny - 2);
        let tx = x - i0 as Scalar;
        let ty = y - j0 as Scalar;

        let f00 = self.node(i0, j0);
        let f10 = self.node(i0 + 1, j0);
        let f01 = self.node(i0, j0 + 1);
        let f11 = self.node(i0 + 1, j0 + 1);

        let bottom = f00 + (f10 - f00) * tx;
        let top = f01 + (f11 - f01) * tx;
        bottom + (top - bottom) * ty
    }

    fn resolution(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }
}

/// Analytic potential profiles available from configuration.
///
/// Each variant describes the potential in normalized coordinates; `build`
/// samples it onto a [`SampledField`] at the requested resolution.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldProfile {
    /// Spatially constant potential; zero acceleration everywhere.
    Constant { value: Scalar },
    /// Linear ramp along x: `f(x, y) = amplitude * x`. Pulls electrons
    /// toward the right edge for positive amplitude.
    Ramp { amplitude: Scalar },
    /// Ramp focused into a horizontal band: the potential rises toward a
    /// plate at the right edge, strongest at `center` and falling off as a
    /// Gaussian in y with scale `width`.
    Plate {
        strength: Scalar,
        center: Scalar,
        width: Scalar,
    },
}

impl FieldProfile {
    pub fn build(&self, nx: usize, ny: usize) -> SampledField {
        match *self {
            FieldProfile::Constant { value } => SampledField::from_fn(nx, ny, |_, _| value),
            FieldProfile::Ramp { amplitude } => SampledField::from_fn(nx, ny, |x, _| amplitude * x),
            FieldProfile::Plate {
                strength,
                center,
                width,
            } => SampledField::from_fn(nx, ny, |x, y| {
                let dy = (y - center) / width;
                strength * x * (-dy * dy).exp()
            }),
        }
    }
}

impl Default for FieldProfile {
    fn default() -> Self {
        FieldProfile::Plate {
            strength: 1.0,
            center: 0.25,
            width: 0.15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilinear_reproduces_linear_function() {
        // A bilinear interpolant is exact for functions linear in x and y
        let field = SampledField::from_fn(9, 7, |x, y| 2.0 * x - 3.0 * y + 0.5);

        for &(x, y) in &[(0.0, 0.0), (0.13, 0.77), (0.5, 0.5), (1.0, 1.0)] {
            let expected = 2.0 * x - 3.0 * y + 0.5;
            let got = field.interpolate(Vector::new(x, y));
            assert!(
                (got - expected).abs() < 1e-12,
                "at ({x}, {y}): expected {expected}, got {got}"
            );
        }
    }

    #[test]
    fn interpolation_clamps_outside_unit_square() {
        let field = SampledField::from_fn(5, 5, |x, _| x);

        // Queries inside the margin clamp to the nearest edge value
        assert!((field.interpolate(Vector::new(-0.1, 0.5)) - 0.0).abs() < 1e-12);
        assert!((field.interpolate(Vector::new(1.1, 0.5)) - 1.0).abs() < 1e-12);
        assert!((field.interpolate(Vector::new(0.5, -0.2)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn profile_resolution_matches_request() {
        let field = FieldProfile::default().build(32, 48);
        assert_eq!(field.resolution(), (32, 48));
    }

    #[test]
    fn constant_profile_is_flat() {
        let field = FieldProfile::Constant { value: 3.5 }.build(16, 16);
        for &(x, y) in &[(0.0, 0.0), (0.3, 0.9), (1.0, 0.2)] {
            assert!((field.interpolate(Vector::new(x, y)) - 3.5).abs() < 1e-12);
        }
    }
}
