/// Camera space to clip space
use nalgebra::Matrix4;

use crate::camera::Camera;
use crate::error::{Error, Result};

/// Create a perspective projection matrix.
///
/// `fov_degrees` is the half-angle field of view. Camera space looks down
/// -Z, so the last row stores `w = -z`: a point at `z = -near` lands on
/// NDC -1 and one at `z = -far` on NDC +1.
pub fn perspective(fov_degrees: f64, aspect_ratio: f64, near: f64, far: f64) -> Result<Matrix4<f64>> {
    if !(near > 0.0 && far > near) {
        return Err(Error::InvalidCameraConfig(format!(
            "projection needs 0 < near < far, got near={} far={}",
            near, far
        )));
    }
    if !(aspect_ratio > 0.0) {
        return Err(Error::InvalidCameraConfig(format!(
            "aspect ratio must be positive, got {}",
            aspect_ratio
        )));
    }
    if !(fov_degrees > 0.0 && fov_degrees < 90.0) {
        return Err(Error::InvalidCameraConfig(format!(
            "half-angle field of view must be in (0, 90) degrees, got {}",
            fov_degrees
        )));
    }

    let fov = 1.0 / fov_degrees.to_radians().tan();
    let depth = far - near;

    Ok(Matrix4::new(
        aspect_ratio * fov, 0.0, 0.0, 0.0, //
        0.0, fov, 0.0, 0.0, //
        0.0, 0.0, -(far + near) / depth, -2.0 * far * near / depth, //
        0.0, 0.0, -1.0, 0.0,
    ))
}

/// Create the projection matrix for `camera`
pub fn projection_matrix(camera: &Camera) -> Result<Matrix4<f64>> {
    perspective(
        camera.fov_degrees(),
        camera.aspect_ratio(),
        camera.near(),
        camera.far(),
    )
}
