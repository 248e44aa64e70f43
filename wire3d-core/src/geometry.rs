/// Geometry primitives for wireframe rendering
use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};
use crate::math;

/// A planar quad with its four world-space corners in winding order.
///
/// The winding defines the outward normal (right-hand rule over the first
/// three corners).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub vertices: [Point3<f64>; 4],
}

impl Face {
    pub fn new(vertices: [Point3<f64>; 4]) -> Self {
        Self { vertices }
    }

    /// Calculate the unit outward normal from the first three vertices
    pub fn normal(&self) -> Result<Vector3<f64>> {
        let [v0, v1, v2, _] = &self.vertices;

        let edge1 = math::subtract(v1, v0);
        let edge2 = math::subtract(v2, v0);

        math::normalize(&math::cross(&edge1, &edge2))
    }
}

/// Quads over a shared vertex pool
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point3<f64>>,
    faces: Vec<[usize; 4]>,
}

impl Mesh {
    /// Build a mesh, checking that every face index refers to the pool.
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<[usize; 4]>) -> Result<Self> {
        for (face_index, face) in faces.iter().enumerate() {
            if let Some(&bad) = face.iter().find(|&&i| i >= vertices.len()) {
                return Err(Error::InvalidMesh(format!(
                    "face {} refers to vertex {} but the pool has {} vertices",
                    face_index,
                    bad,
                    vertices.len()
                )));
            }
        }

        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Resolve face `index` against the vertex pool
    pub fn face(&self, index: usize) -> Option<Face> {
        self.faces
            .get(index)
            .map(|indices| Face::new(indices.map(|i| self.vertices[i])))
    }

    /// All faces, resolved, in mesh order
    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        self.faces
            .iter()
            .map(|indices| Face::new(indices.map(|i| self.vertices[i])))
    }

    /// Axis-aligned cuboid centered on the origin, 8 shared vertices and
    /// 6 outward-wound faces.
    ///
    /// Face order: +z, -z, -y, +y, -x, +x.
    pub fn cuboid(half_extents: Vector3<f64>) -> Self {
        let (x, y, z) = (half_extents.x, half_extents.y, half_extents.z);

        let vertices = vec![
            Point3::new(-x, -y, z),
            Point3::new(x, -y, z),
            Point3::new(x, y, z),
            Point3::new(-x, y, z),
            Point3::new(-x, -y, -z),
            Point3::new(x, -y, -z),
            Point3::new(x, y, -z),
            Point3::new(-x, y, -z),
        ];

        let faces = vec![
            [0, 1, 2, 3], // front
            [7, 6, 5, 4], // back
            [4, 5, 1, 0], // y = -half, "superior" in the sample data
            [3, 2, 6, 7], // y = +half
            [4, 0, 3, 7], // left
            [1, 5, 6, 2], // right
        ];

        Self { vertices, faces }
    }

    /// Create a cube mesh with the given edge length
    pub fn cube(size: f64) -> Self {
        let half = size / 2.0;
        Self::cuboid(Vector3::new(half, half, half))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_layout() {
        let cube = Mesh::cube(100.0);
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.face_count(), 6);
        assert_eq!(cube.vertices()[0], Point3::new(-50.0, -50.0, 50.0));
        assert_eq!(cube.vertices()[6], Point3::new(50.0, 50.0, -50.0));
    }

    #[test]
    fn test_cube_normals_point_outward() {
        let cube = Mesh::cube(100.0);
        let expected = [
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        ];

        for (face, normal) in cube.faces().zip(expected) {
            assert_relative_eq!(face.normal().unwrap(), normal, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normal_is_unit_length() {
        let face = Face::new([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 1.0),
            Point3::new(3.0, 7.0, 1.0),
            Point3::new(0.0, 7.0, 0.0),
        ]);
        assert!((face.normal().unwrap().norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_collinear_face_is_degenerate() {
        let face = Face::new([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        assert!(matches!(face.normal(), Err(Error::DegenerateVector { .. })));
    }

    #[test]
    fn test_mesh_rejects_out_of_range_index() {
        let result = Mesh::new(vec![Point3::origin(); 3], vec![[0, 1, 2, 3]]);
        assert!(matches!(result, Err(Error::InvalidMesh(_))));
    }

    #[test]
    fn test_face_lookup() {
        let cube = Mesh::cube(2.0);
        assert!(cube.face(6).is_none());
        let front = cube.face(0).unwrap();
        assert_eq!(front.vertices[2], Point3::new(1.0, 1.0, 1.0));
    }
}
