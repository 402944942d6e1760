//! Coordinate transformations on points and vectors in 3-space.
//!
//! Every function is pure and returns a new vector. Rotations are counter-clockwise when viewed
//! from the positive side of the rotation axis looking toward the origin (right-hand rule).

extern crate nalgebra;
use nalgebra::{Matrix3, Vector3};

/// Creates a point or vector from its cartesian components.
pub fn coordinate(x: f64, y: f64, z: f64) -> Vector3<f64> {
    Vector3::new(x, y, z)
}

/// Translates a point `p` by a vector `v`.
pub fn translate(p: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    p + v
}

/// Scales a vector `v` by a constant `c`.
pub fn scale(v: &Vector3<f64>, c: f64) -> Vector3<f64> {
    v * c
}

/// Rotates a vector about the X axis, given the cosine and sine of the rotation angle.
pub fn rotate_x(v: &Vector3<f64>, cos: f64, sin: f64) -> Vector3<f64> {
    #[rustfmt::skip]
    let m = Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, cos, -sin,
        0.0, sin, cos,
    );
    m * v
}

/// Rotates a vector about the Y axis, given the cosine and sine of the rotation angle.
pub fn rotate_y(v: &Vector3<f64>, cos: f64, sin: f64) -> Vector3<f64> {
    #[rustfmt::skip]
    let m = Matrix3::new(
        cos, 0.0, sin,
        0.0, 1.0, 0.0,
        -sin, 0.0, cos,
    );
    m * v
}

/// Rotates a vector about the Z axis, given the cosine and sine of the rotation angle.
pub fn rotate_z(v: &Vector3<f64>, cos: f64, sin: f64) -> Vector3<f64> {
    #[rustfmt::skip]
    let m = Matrix3::new(
        cos, -sin, 0.0,
        sin, cos, 0.0,
        0.0, 0.0, 1.0,
    );
    m * v
}

/// Rotates a vector about the X axis by `theta` radians.
pub fn rotate_x_by(v: &Vector3<f64>, theta: f64) -> Vector3<f64> {
    rotate_x(v, theta.cos(), theta.sin())
}

/// Rotates a vector about the Y axis by `theta` radians.
pub fn rotate_y_by(v: &Vector3<f64>, theta: f64) -> Vector3<f64> {
    rotate_y(v, theta.cos(), theta.sin())
}

/// Rotates a vector about the Z axis by `theta` radians.
pub fn rotate_z_by(v: &Vector3<f64>, theta: f64) -> Vector3<f64> {
    rotate_z(v, theta.cos(), theta.sin())
}

/// Get the perpendicular distance between a point and an infinite line.
///
/// # Arguments
///
/// `pos`: position of the point
///
/// `line_point`: a point on the line
///
/// `dir`: non-zero vector pointing along the line.
pub fn distance_to_axis(
    pos: &Vector3<f64>,
    line_point: &Vector3<f64>,
    dir: &Vector3<f64>,
) -> f64 {
    let rela_cood = pos - line_point;
    (dir.cross(&rela_cood) / dir.norm()).norm()
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::constant::PI;
    use assert_approx_eq::assert_approx_eq;

    fn assert_vector_approx_eq(a: Vector3<f64>, b: Vector3<f64>) {
        for i in 0..3 {
            assert_approx_eq!(a[i], b[i], 1e-12);
        }
    }

    #[test]
    fn test_translate() {
        let p = coordinate(1.0, 2.0, 3.0);
        let v = coordinate(-1.0, -1.0, -3.0);
        assert_eq!(translate(&p, &v), coordinate(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_scale() {
        let v = coordinate(1.0, -3.0, 5.0);
        assert_eq!(scale(&v, 2.0), coordinate(2.0, -6.0, 10.0));
    }

    #[test]
    fn test_rotate_z() {
        let v = coordinate(2.0, 1.0, 5.0);
        assert_vector_approx_eq(
            rotate_z(&v, (PI / 2.0).cos(), (PI / 2.0).sin()),
            coordinate(-1.0, 2.0, 5.0),
        );
        assert_vector_approx_eq(
            rotate_z(&v, (-PI / 2.0).cos(), (-PI / 2.0).sin()),
            coordinate(1.0, -2.0, 5.0),
        );
        assert_vector_approx_eq(rotate_z_by(&v, PI / 2.0), coordinate(-1.0, 2.0, 5.0));
    }

    #[test]
    fn test_rotate_y() {
        let v = coordinate(2.0, 1.0, 5.0);
        assert_vector_approx_eq(
            rotate_y(&v, (PI / 2.0).cos(), (PI / 2.0).sin()),
            coordinate(5.0, 1.0, -2.0),
        );
        assert_vector_approx_eq(
            rotate_y(&v, (-PI / 2.0).cos(), (-PI / 2.0).sin()),
            coordinate(-5.0, 1.0, 2.0),
        );
        assert_vector_approx_eq(rotate_y_by(&v, PI / 2.0), coordinate(5.0, 1.0, -2.0));
    }

    #[test]
    fn test_rotate_x() {
        let v = coordinate(2.0, 1.0, 5.0);
        assert_vector_approx_eq(
            rotate_x(&v, (PI / 2.0).cos(), (PI / 2.0).sin()),
            coordinate(2.0, -5.0, 1.0),
        );
        assert_vector_approx_eq(
            rotate_x(&v, (-PI / 2.0).cos(), (-PI / 2.0).sin()),
            coordinate(2.0, 5.0, -1.0),
        );
        assert_vector_approx_eq(rotate_x_by(&v, PI / 2.0), coordinate(2.0, -5.0, 1.0));
    }

    /// An identity pair (cos, sin) = (1, 0) leaves vectors untouched.
    #[test]
    fn test_identity_rotations() {
        let v = coordinate(0.3, -1.7, 2.2);
        assert_eq!(rotate_x(&v, 1.0, 0.0), v);
        assert_eq!(rotate_y(&v, 1.0, 0.0), v);
        assert_eq!(rotate_z(&v, 1.0, 0.0), v);
    }

    #[test]
    fn test_distance_to_axis() {
        let pos = coordinate(1., 1., 1.);
        let centre = coordinate(0., 1., 1.);
        let dir = coordinate(1., 2., 2.);
        let distance = distance_to_axis(&pos, &centre, &dir);
        assert_approx_eq!(distance, (8.0_f64).sqrt() / 3.0, 1e-12);
    }
}
