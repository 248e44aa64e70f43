/// Vector and matrix operations used by every pipeline stage
///
/// All functions are pure and work in `f64`. Positions are `Point3`,
/// directions are `Vector3`; a position minus a position is a direction.
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::error::{Error, Result};

/// Lengths and `w` components at or below this are treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Direction from `b` to `a`.
pub fn subtract(a: &Point3<f64>, b: &Point3<f64>) -> Vector3<f64> {
    a - b
}

/// Scale `v` to unit length.
///
/// Fails with [`Error::DegenerateVector`] instead of producing NaN when the
/// length is at or below [`EPSILON`].
pub fn normalize(v: &Vector3<f64>) -> Result<Vector3<f64>> {
    let length = v.norm();
    if !(length > EPSILON) {
        return Err(Error::DegenerateVector { length });
    }
    Ok(v / length)
}

pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b)
}

/// Row-by-column product: `result[i][j] = Σ_k a[i][k] * b[k][j]`.
pub fn multiply_matrices(a: &Matrix4<f64>, b: &Matrix4<f64>) -> Matrix4<f64> {
    a * b
}

/// `result[i] = Σ_k v[k] * m[i][k]`.
pub fn multiply_matrix_vector(m: &Matrix4<f64>, v: &Vector4<f64>) -> Vector4<f64> {
    m * v
}

/// Homogeneous form of a position (`w = 1`).
pub fn homogenize(point: &Point3<f64>) -> Vector4<f64> {
    point.to_homogeneous()
}

/// Create a translation matrix
pub fn translation_matrix(offset: &Vector3<f64>) -> Matrix4<f64> {
    Matrix4::new_translation(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_unit_length() {
        for v in [
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::new(-200.0, -150.0, 400.0),
            Vector3::new(1e-6, 0.0, 0.0),
            Vector3::new(0.1, -0.2, 0.3),
        ] {
            let n = normalize(&v).unwrap();
            assert!((n.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_normalize_zero_vector_fails() {
        let result = normalize(&Vector3::zeros());
        assert!(matches!(result, Err(Error::DegenerateVector { .. })));
    }

    #[test]
    fn test_normalize_nan_fails() {
        let result = normalize(&Vector3::new(f64::NAN, 0.0, 0.0));
        assert!(matches!(result, Err(Error::DegenerateVector { .. })));
    }

    #[test]
    fn test_cross_and_dot() {
        let x = Vector3::x();
        let y = Vector3::y();
        assert_eq!(cross(&x, &y), Vector3::z());
        assert_eq!(cross(&y, &x), -Vector3::z());
        assert_eq!(dot(&x, &y), 0.0);
        assert_eq!(dot(&Vector3::new(1.0, 2.0, 3.0), &Vector3::new(4.0, 5.0, 6.0)), 32.0);
    }

    #[test]
    fn test_subtract_points() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(0.5, 4.0, -1.0);
        assert_eq!(subtract(&a, &b), Vector3::new(0.5, -2.0, 4.0));
    }

    #[test]
    fn test_multiply_matrices_row_by_column() {
        let a = Matrix4::new(
            1.0, 2.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        let b = Matrix4::new(
            1.0, 0.0, 0.0, 0.0, //
            3.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        let product = multiply_matrices(&a, &b);
        // row 0 of a times column 0 of b: 1*1 + 2*3
        assert_eq!(product[(0, 0)], 7.0);
        assert_eq!(product[(0, 1)], 2.0);
        assert_eq!(product[(1, 0)], 3.0);
    }

    #[test]
    fn test_multiply_matrices_associative() {
        let a = translation_matrix(&Vector3::new(1.0, -2.0, 3.0));
        let b = Matrix4::new(
            0.5, 0.1, 0.0, 2.0, //
            0.0, 1.5, 0.3, 0.0, //
            0.2, 0.0, 1.0, -1.0, //
            0.0, 0.0, -1.0, 0.0,
        );
        let c = Matrix4::new_rotation(Vector3::new(0.3, -0.7, 1.1));

        let left = multiply_matrices(&multiply_matrices(&a, &b), &c);
        let right = multiply_matrices(&a, &multiply_matrices(&b, &c));
        assert_relative_eq!(left, right, epsilon = 1e-9);
    }

    #[test]
    fn test_translation_moves_point() {
        let t = translation_matrix(&Vector3::new(10.0, 0.0, -5.0));
        let p = multiply_matrix_vector(&t, &homogenize(&Point3::new(1.0, 1.0, 1.0)));
        assert_eq!(p, Vector4::new(11.0, 1.0, -4.0, 1.0));
    }

    #[test]
    fn test_identity_matrix_vector() {
        let v = Vector4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(multiply_matrix_vector(&Matrix4::identity(), &v), v);
    }
}
