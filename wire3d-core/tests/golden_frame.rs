use nalgebra::{Point3, Vector3, Vector4};
use wire3d_core::{
    culling, math, projection, render_frame, view, Camera, CameraConfig, Mesh, Viewport,
};

fn reference_scene() -> (Mesh, Camera, Viewport) {
    let camera = Camera::new(CameraConfig {
        position: Point3::new(-200.0, -150.0, 400.0),
        target: Point3::origin(),
        up: Vector3::new(0.0, 1.0, 0.0),
        fov_degrees: 30.0,
        aspect_ratio: 1.0,
        near: 1.0,
        far: 1000.0,
    })
    .unwrap();

    (Mesh::cube(100.0), camera, Viewport::new(400, 400).unwrap())
}

#[test]
fn test_reference_frame_has_three_quads() {
    let (mesh, camera, viewport) = reference_scene();
    let polylines = render_frame(&mesh, &camera, &viewport).unwrap();

    assert_eq!(polylines.len(), 3);
    for polyline in &polylines {
        assert_eq!(polyline.points.len(), 4);
        assert_eq!(polyline.dropped_vertices, 0);
        for point in &polyline.points {
            assert!(point.x.is_finite() && point.y.is_finite());
            assert!((0.0..=400.0).contains(&point.x), "x out of range: {}", point.x);
            assert!((0.0..=400.0).contains(&point.y), "y out of range: {}", point.y);
        }
    }
}

#[test]
fn test_reference_frame_faces() {
    let (mesh, camera, viewport) = reference_scene();
    let polylines = render_frame(&mesh, &camera, &viewport).unwrap();

    let normals: Vec<_> = polylines
        .iter()
        .map(|p| mesh.face(p.face_index).unwrap().normal().unwrap())
        .collect();
    assert_eq!(
        normals,
        vec![
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
        ]
    );
}

#[test]
fn test_reference_frame_is_deterministic() {
    let (mesh, camera, viewport) = reference_scene();
    let first = render_frame(&mesh, &camera, &viewport).unwrap();
    let second = render_frame(&mesh, &camera, &viewport).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_front_face_corner_lands_on_expected_pixel() {
    let (mesh, camera, viewport) = reference_scene();
    let polylines = render_frame(&mesh, &camera, &viewport).unwrap();

    // (-50, -50, 50) is the first corner of the front face
    let corner = polylines[0].points[0];
    assert!((corner.x - 180.25).abs() < 0.01, "x = {}", corner.x);
    assert!((corner.y - 223.03).abs() < 0.01, "y = {}", corner.y);
}

#[test]
fn test_visibility_records_match_frame() {
    let (mesh, camera, _) = reference_scene();
    let records = culling::classify_faces(&mesh, &camera.position()).unwrap();

    assert_eq!(records.len(), 6);
    let visible: Vec<_> = records.iter().filter(|r| r.visible).map(|r| r.face_index).collect();
    assert_eq!(visible, vec![0, 2, 4]);
    assert!(records.iter().all(|r| r.visible == (r.facing < 0.0)));
}

#[test]
fn test_view_then_projection_bounds_depth() {
    let (_, camera, _) = reference_scene();
    let view = view::view_matrix(&camera).unwrap();
    let projection = projection::projection_matrix(&camera).unwrap();

    let eye = math::multiply_matrix_vector(&view, &math::homogenize(&camera.position()));
    assert!(eye.xyz().norm() < 1e-6);
    assert_eq!(eye.w, 1.0);

    for z in [-camera.near(), -camera.far()] {
        let clip = math::multiply_matrix_vector(&projection, &Vector4::new(0.0, 0.0, z, 1.0));
        let expected = if z == -camera.near() { -1.0 } else { 1.0 };
        assert!((clip.z / clip.w - expected).abs() < 1e-6);
    }
}

#[test]
fn test_camera_moves_change_visible_set() {
    let (mesh, mut camera, viewport) = reference_scene();
    camera.set_position(Point3::new(0.0, 0.0, 400.0)).unwrap();

    let polylines = render_frame(&mesh, &camera, &viewport).unwrap();
    assert_eq!(polylines.len(), 1);
    assert_eq!(polylines[0].face_index, 0);
}
