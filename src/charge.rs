//! A single point magnetic charge.

extern crate nalgebra;
use crate::constant::MAGNETIC_CHARGE_CONSTANT;
use crate::error::{MagnetError, Result};
use crate::transform::{rotate_y, rotate_z, rotate_z_by, translate};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point magnetic charge, defined by a position and a signed magnitude.
///
/// The charge induces a field that falls off with the inverse square of the distance from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointCharge {
    /// Position of the charge, in units of m.
    pub position: Vector3<f64>,
    /// Signed magnitude of the charge. Opposite signs represent opposite poles.
    pub magnitude: f64,
}

impl PointCharge {
    pub fn new(position: Vector3<f64>, magnitude: f64) -> Self {
        PointCharge {
            position,
            magnitude,
        }
    }

    /// Calculates the field induced by this charge at `target`.
    ///
    /// The field is `d * m * k / |d|^3`, where `d` points from the charge to the target and
    /// `k = 1 / (4 pi mu_0)`. Fails with [MagnetError::FieldSingularity] if the target coincides
    /// with the charge.
    pub fn field_at(&self, target: &Vector3<f64>) -> Result<Vector3<f64>> {
        let delta = target - self.position;
        let r = delta.norm();
        if r == 0.0 {
            return Err(MagnetError::FieldSingularity {
                position: self.position,
            });
        }
        Ok(delta * (self.magnitude * MAGNETIC_CHARGE_CONSTANT / r.powi(3)))
    }

    /// Returns a new charge with the same magnitude, rotated by `theta` radians about the
    /// infinite line through `point` with direction `axis`.
    ///
    /// The axis is first brought onto the positive Z axis by a translation and up to two
    /// elementary rotations, the requested rotation is applied about Z, and the alignment
    /// steps are then undone in reverse order.
    pub fn rotate(
        &self,
        point: &Vector3<f64>,
        axis: &Vector3<f64>,
        theta: f64,
    ) -> Result<PointCharge> {
        let alignment = AxisAlignment::new(axis)?;
        Ok(self.rotate_aligned(&alignment, point, theta))
    }

    /// Rotates by `theta` about the line through `point` whose direction has already been
    /// aligned with Z.
    pub(crate) fn rotate_aligned(
        &self,
        alignment: &AxisAlignment,
        point: &Vector3<f64>,
        theta: f64,
    ) -> PointCharge {
        let mut c = translate(&self.position, &-point);
        c = alignment.apply(&c);
        c = rotate_z_by(&c, theta);
        c = alignment.undo(&c);
        c = translate(&c, point);

        PointCharge::new(c, self.magnitude)
    }
}

/// The change of basis that carries a rotation axis onto the positive Z axis.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AxisAlignment {
    /// Rotation about Z that brings the axis into the XZ plane, as `(cos, sin)`.
    ///
    /// `None` when the axis has no projection onto the XY plane (`x == 0 && y == 0`), in which
    /// case it already lies along Z and this step is skipped.
    z_alignment: Option<(f64, f64)>,
    /// Rotation about Y that brings the axis from the XZ plane onto positive Z, as `(cos, sin)`.
    y_alignment: (f64, f64),
}

impl AxisAlignment {
    pub(crate) fn new(axis: &Vector3<f64>) -> Result<Self> {
        if !axis.iter().all(|c| c.is_finite()) {
            return Err(MagnetError::InvalidAxis(format!(
                "direction ({}, {}, {}) is not finite",
                axis[0], axis[1], axis[2]
            )));
        }
        if axis.iter().all(|c| *c == 0.0) {
            return Err(MagnetError::InvalidAxis(
                "direction has zero length".to_string(),
            ));
        }

        let mut v = *axis;
        let z_alignment = if v.x != 0.0 || v.y != 0.0 {
            let d = v.x.hypot(v.y);
            if d == 0.0 {
                return Err(MagnetError::InvalidAxis(
                    "projection onto the XY plane has zero length".to_string(),
                ));
            }
            let (cos, sin) = (v.x / d, -v.y / d);
            v = rotate_z(&v, cos, sin);
            Some((cos, sin))
        } else {
            None
        };

        let d = v.x.hypot(v.z);
        if d == 0.0 {
            return Err(MagnetError::InvalidAxis(
                "projection onto the XZ plane has zero length".to_string(),
            ));
        }

        Ok(AxisAlignment {
            z_alignment,
            y_alignment: (v.z / d, -v.x / d),
        })
    }

    /// Maps a point from the world frame into the frame where the axis lies along +Z.
    fn apply(&self, c: &Vector3<f64>) -> Vector3<f64> {
        let c = match self.z_alignment {
            Some((cos, sin)) => rotate_z(c, cos, sin),
            None => *c,
        };
        let (cos, sin) = self.y_alignment;
        rotate_y(&c, cos, sin)
    }

    /// Inverse of [AxisAlignment::apply].
    fn undo(&self, c: &Vector3<f64>) -> Vector3<f64> {
        let (cos, sin) = self.y_alignment;
        let c = rotate_y(c, cos, -sin);
        match self.z_alignment {
            Some((cos, sin)) => rotate_z(&c, cos, -sin),
            None => c,
        }
    }
}

impl fmt::Display for PointCharge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at ({}, {}, {})",
            self.magnitude, self.position[0], self.position[1], self.position[2]
        )
    }
}
