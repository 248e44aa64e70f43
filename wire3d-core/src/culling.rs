/// Backface culling
///
/// A face is visible when its outward normal points back toward the eye:
/// `dot(normal, v0 - eye) < 0`. The test depends on the eye position only,
/// not on where the camera is looking, and must be re-run whenever the
/// camera or the mesh moves.
use nalgebra::{Point3, Vector3};

use crate::error::Result;
use crate::geometry::{Face, Mesh};
use crate::math;

/// Whether the pipeline runs the visibility filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CullMode {
    /// Keep only faces whose outward normal faces the eye
    #[default]
    Backface,
    /// Keep every face
    Disabled,
}

/// Per-frame visibility record for one mesh face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceVisibility {
    pub face_index: usize,
    pub normal: Vector3<f64>,
    /// `dot(normal, v0 - eye)`; negative when the face is visible.
    pub facing: f64,
    pub visible: bool,
}

impl FaceVisibility {
    pub fn classify(face_index: usize, face: &Face, eye: &Point3<f64>) -> Result<Self> {
        let normal = face.normal()?;
        let camera_to_face = math::subtract(&face.vertices[0], eye);
        let facing = math::dot(&normal, &camera_to_face);

        Ok(Self {
            face_index,
            normal,
            facing,
            visible: facing < 0.0,
        })
    }
}

/// Classify every face of `mesh` as seen from `eye`, in mesh order.
pub fn classify_faces(mesh: &Mesh, eye: &Point3<f64>) -> Result<Vec<FaceVisibility>> {
    mesh.faces()
        .enumerate()
        .map(|(index, face)| FaceVisibility::classify(index, &face, eye))
        .collect()
}

/// Indices of the faces visible from `eye`, preserving mesh order.
pub fn visible_faces(mesh: &Mesh, eye: &Point3<f64>) -> Result<Vec<usize>> {
    let records = classify_faces(mesh, eye)?;
    let visible: Vec<usize> = records
        .iter()
        .filter(|record| record.visible)
        .map(|record| record.face_index)
        .collect();

    log::debug!("visible faces: {} of {}", visible.len(), records.len());
    Ok(visible)
}
