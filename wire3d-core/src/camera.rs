/// Camera model: where the eye is, what it looks at, and its lens
use nalgebra::{Point3, Rotation3, Unit, Vector3};

use crate::error::{Error, Result};
use crate::math::{self, EPSILON};

/// Default near plane distance
pub const DEFAULT_NEAR: f64 = 1.0;
/// Default far plane distance
pub const DEFAULT_FAR: f64 = 1000.0;
/// Default half-angle field of view, in degrees
pub const DEFAULT_FOV_DEGREES: f64 = 30.0;

/// Unvalidated camera parameters.
///
/// Convert into a [`Camera`] with `Camera::try_from`. The default is the
/// reference viewpoint over the sample cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub position: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Vector3<f64>,
    /// Half-angle field of view in degrees, in (0, 90).
    pub fov_degrees: f64,
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Point3::new(-200.0, -150.0, 400.0),
            target: Point3::origin(),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov_degrees: DEFAULT_FOV_DEGREES,
            aspect_ratio: 1.0,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

impl CameraConfig {
    /// Set the aspect ratio from viewport dimensions
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.aspect_ratio = width as f64 / height as f64;
        self
    }
}

/// Validated camera.
///
/// Every constructor and setter checks its input, so a `Camera` value can
/// always produce a view and projection matrix. Setters leave the camera
/// untouched on error.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    config: CameraConfig,
}

impl Camera {
    pub fn new(config: CameraConfig) -> Result<Self> {
        validate(&config)?;
        Ok(Self { config })
    }

    pub fn position(&self) -> Point3<f64> {
        self.config.position
    }

    pub fn target(&self) -> Point3<f64> {
        self.config.target
    }

    pub fn up(&self) -> Vector3<f64> {
        self.config.up
    }

    pub fn fov_degrees(&self) -> f64 {
        self.config.fov_degrees
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.config.aspect_ratio
    }

    pub fn near(&self) -> f64 {
        self.config.near
    }

    pub fn far(&self) -> f64 {
        self.config.far
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn set_position(&mut self, position: Point3<f64>) -> Result<()> {
        self.update(|c| c.position = position)
    }

    pub fn set_target(&mut self, target: Point3<f64>) -> Result<()> {
        self.update(|c| c.target = target)
    }

    pub fn set_up(&mut self, up: Vector3<f64>) -> Result<()> {
        self.update(|c| c.up = up)
    }

    pub fn set_fov_degrees(&mut self, fov_degrees: f64) -> Result<()> {
        self.update(|c| c.fov_degrees = fov_degrees)
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) -> Result<()> {
        self.update(|c| c.aspect_ratio = aspect_ratio)
    }

    pub fn set_clip_planes(&mut self, near: f64, far: f64) -> Result<()> {
        self.update(|c| {
            c.near = near;
            c.far = far;
        })
    }

    /// Rotate the eye around the target by `yaw` radians about the up axis
    /// and `pitch` radians about the camera's right axis, keeping the
    /// distance to the target.
    ///
    /// A pitch that would line the view up with the up vector is rejected.
    pub fn orbit(&mut self, yaw: f64, pitch: f64) -> Result<()> {
        let offset = math::subtract(&self.config.position, &self.config.target);
        let up = math::normalize(&self.config.up)?;
        let right = math::normalize(&math::cross(&up, &offset))?;

        let yaw = Rotation3::from_axis_angle(&Unit::new_unchecked(up), yaw);
        let pitch = Rotation3::from_axis_angle(&Unit::new_unchecked(yaw * right), pitch);
        let rotated = pitch * (yaw * offset);

        let target = self.config.target;
        self.set_position(target + rotated)
    }

    /// Move the eye toward (positive `amount`) or away from the target.
    pub fn dolly(&mut self, amount: f64) -> Result<()> {
        let offset = math::subtract(&self.config.position, &self.config.target);
        let direction = math::normalize(&offset)?;
        let target = self.config.target;
        self.set_position(target + offset - direction * amount)
    }

    fn update(&mut self, change: impl FnOnce(&mut CameraConfig)) -> Result<()> {
        let mut config = self.config;
        change(&mut config);
        validate(&config)?;
        self.config = config;
        Ok(())
    }
}

impl TryFrom<CameraConfig> for Camera {
    type Error = Error;

    fn try_from(config: CameraConfig) -> Result<Self> {
        Self::new(config)
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidCameraConfig(message.into())
}

fn validate(config: &CameraConfig) -> Result<()> {
    let finite_points = config.position.iter().chain(config.target.iter());
    if !finite_points.chain(config.up.iter()).all(|c| c.is_finite()) {
        return Err(invalid("position, target and up must be finite"));
    }
    if !(config.near.is_finite() && config.near > 0.0) {
        return Err(invalid(format!("near must be positive, got {}", config.near)));
    }
    if !(config.far.is_finite() && config.far > config.near) {
        return Err(invalid(format!(
            "far ({}) must be greater than near ({})",
            config.far, config.near
        )));
    }
    if !(config.aspect_ratio.is_finite() && config.aspect_ratio > 0.0) {
        return Err(invalid(format!(
            "aspect ratio must be positive, got {}",
            config.aspect_ratio
        )));
    }
    if !(config.fov_degrees > 0.0 && config.fov_degrees < 90.0) {
        return Err(invalid(format!(
            "half-angle field of view must be in (0, 90) degrees, got {}",
            config.fov_degrees
        )));
    }

    let view = math::subtract(&config.position, &config.target);
    if view.norm() <= EPSILON {
        return Err(invalid("position and target coincide"));
    }
    if config.up.norm() <= EPSILON {
        return Err(invalid("up vector has zero length"));
    }
    let n = math::normalize(&view)?;
    let up = math::normalize(&config.up)?;
    if math::cross(&up, &n).norm() <= EPSILON {
        return Err(invalid("up vector is parallel to the view direction"));
    }

    Ok(())
}
