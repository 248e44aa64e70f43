/// World to camera space
use nalgebra::{Matrix4, Point3, Vector3};

use crate::camera::Camera;
use crate::error::Result;
use crate::math;

/// Orthonormal camera axes.
///
/// `n` points from the target back toward the eye, so the camera looks
/// down `-n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// Right
    pub u: Vector3<f64>,
    /// Up
    pub v: Vector3<f64>,
    /// Backward
    pub n: Vector3<f64>,
}

impl CameraBasis {
    /// Fails with `DegenerateVector` when the eye sits on the target or
    /// `up` is parallel to the view direction.
    pub fn new(position: &Point3<f64>, target: &Point3<f64>, up: &Vector3<f64>) -> Result<Self> {
        let n = math::normalize(&math::subtract(position, target))?;
        let u = math::normalize(&math::cross(up, &n))?;
        let v = math::cross(&n, &u);

        Ok(Self { u, v, n })
    }

    /// Rows u, v, n
    pub fn rotation_matrix(&self) -> Matrix4<f64> {
        let (u, v, n) = (&self.u, &self.v, &self.n);
        Matrix4::new(
            u.x, u.y, u.z, 0.0, //
            v.x, v.y, v.z, 0.0, //
            n.x, n.y, n.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

/// Build the view matrix for `camera`: translate the eye to the origin,
/// then rotate into the camera axes.
pub fn view_matrix(camera: &Camera) -> Result<Matrix4<f64>> {
    let position = camera.position();
    let basis = CameraBasis::new(&position, &camera.target(), &camera.up())?;

    let rotation = basis.rotation_matrix();
    let translation = math::translation_matrix(&-position.coords);

    Ok(math::multiply_matrices(&rotation, &translation))
}
