/// Per-frame pipeline: cull, transform, divide, map to pixels
use nalgebra::{Matrix4, Point2, Point3, Vector4};

use crate::camera::Camera;
use crate::clip::{self, ClipMode};
use crate::culling::{self, CullMode};
use crate::error::{Error, Result};
use crate::geometry::{Face, Mesh};
use crate::math::{self, EPSILON};
use crate::projection::projection_matrix;
use crate::view::view_matrix;

/// Pixel dimensions of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Window-to-viewport matrix for raster output. NDC x and y in [-1, 1]
    /// scale to [0, width] and [height, 0] (y flipped); depth goes from
    /// [-1, 1] to [0, 1].
    pub fn screen_matrix(&self) -> Matrix4<f64> {
        let half_width = self.width as f64 * 0.5;
        let half_height = self.height as f64 * 0.5;

        Matrix4::new(
            half_width, 0.0, 0.0, half_width, //
            0.0, -half_height, 0.0, half_height, //
            0.0, 0.0, 0.5, 0.5, //
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

/// Matrices for one frame. Built from the camera at the start of the
/// frame and dropped at its end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub view: Matrix4<f64>,
    pub projection: Matrix4<f64>,
    /// `projection * view`
    pub view_projection: Matrix4<f64>,
}

impl FrameContext {
    pub fn new(camera: &Camera) -> Result<Self> {
        let view = view_matrix(camera)?;
        let projection = projection_matrix(camera)?;
        let view_projection = math::multiply_matrices(&projection, &view);

        Ok(Self {
            view,
            projection,
            view_projection,
        })
    }
}

/// Screen-space outline of one face, to be stroked as a closed loop
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub face_index: usize,
    pub points: Vec<Point2<f64>>,
    /// Vertices left out because their clip-space w was near zero
    pub dropped_vertices: usize,
}

impl Polyline {
    /// True when vertices were dropped or too few remain to outline an area
    pub fn is_degenerate(&self) -> bool {
        self.dropped_vertices > 0 || self.points.len() < 3
    }

    /// Consecutive point pairs, including the closing edge. Two points
    /// give a single segment; fewer give nothing.
    pub fn edges(&self) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
        let count = self.points.len();
        let edge_count = if count > 2 { count } else { count.saturating_sub(1) };
        (0..edge_count).map(move |i| (self.points[i], self.points[(i + 1) % count]))
    }
}

/// Stage selection for [`Pipeline`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub cull: CullMode,
    pub clip: ClipMode,
}

/// Map normalized device coordinates to pixels (origin top-left, y down)
pub fn ndc_to_screen(ndc: &Point3<f64>, viewport: &Viewport) -> Point2<f64> {
    let screen = math::multiply_matrix_vector(&viewport.screen_matrix(), &math::homogenize(ndc));
    Point2::new(screen.x, screen.y)
}

/// Perspective-divide a clip-space vertex and map it to pixels
pub fn clip_to_screen(clip: &Vector4<f64>, viewport: &Viewport) -> Result<Point2<f64>> {
    if !(clip.w.abs() >= EPSILON) {
        return Err(Error::NearZeroW { w: clip.w });
    }

    let ndc = Point3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);
    Ok(ndc_to_screen(&ndc, viewport))
}

/// Project a world-space point through `view_projection` to pixels
pub fn project_point(
    view_projection: &Matrix4<f64>,
    point: &Point3<f64>,
    viewport: &Viewport,
) -> Result<Point2<f64>> {
    let clip = math::multiply_matrix_vector(view_projection, &math::homogenize(point));
    clip_to_screen(&clip, viewport)
}

/// Configurable frame pipeline.
///
/// Holds no state besides its options; `render` is a pure function of the
/// mesh, camera and viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Render one frame of `mesh` as seen by `camera`.
    ///
    /// Faces come out in mesh order. A vertex with near-zero clip-space w
    /// is dropped from its polyline rather than failing the frame.
    pub fn render(&self, mesh: &Mesh, camera: &Camera, viewport: &Viewport) -> Result<Vec<Polyline>> {
        let frame = FrameContext::new(camera)?;

        let face_indices = match self.options.cull {
            CullMode::Backface => culling::visible_faces(mesh, &camera.position())?,
            CullMode::Disabled => (0..mesh.face_count()).collect(),
        };

        let mut polylines = Vec::with_capacity(face_indices.len());
        for face_index in face_indices {
            let Some(face) = mesh.face(face_index) else {
                continue;
            };

            let clip_vertices = self.clip_space_vertices(&face, &frame, camera);
            if clip_vertices.is_empty() {
                log::debug!("face {} clipped away", face_index);
                continue;
            }

            polylines.push(outline(face_index, &clip_vertices, viewport));
        }

        log::debug!("frame: {} polylines", polylines.len());
        Ok(polylines)
    }

    fn clip_space_vertices(&self, face: &Face, frame: &FrameContext, camera: &Camera) -> Vec<Vector4<f64>> {
        let project_all = || -> Vec<Vector4<f64>> {
            face.vertices
                .iter()
                .map(|v| math::multiply_matrix_vector(&frame.view_projection, &math::homogenize(v)))
                .collect()
        };

        match self.options.clip {
            ClipMode::Disabled => return project_all(),
            ClipMode::Frustum => return clip::clip_homogeneous(&project_all()),
            ClipMode::Near | ClipMode::NearFar => {}
        }

        // The view matrix is affine, so w stays 1 in camera space
        let camera_space: Vec<Point3<f64>> = face
            .vertices
            .iter()
            .map(|v| {
                let p = math::multiply_matrix_vector(&frame.view, &math::homogenize(v));
                Point3::new(p.x, p.y, p.z)
            })
            .collect();

        clip::clip_polygon(&camera_space, self.options.clip, camera.near(), camera.far())
            .iter()
            .map(|p| math::multiply_matrix_vector(&frame.projection, &math::homogenize(p)))
            .collect()
    }
}

fn outline(face_index: usize, clip_vertices: &[Vector4<f64>], viewport: &Viewport) -> Polyline {
    let mut points = Vec::with_capacity(clip_vertices.len());
    let mut dropped_vertices = 0;

    for clip in clip_vertices {
        match clip_to_screen(clip, viewport) {
            Ok(point) => points.push(point),
            Err(err) => {
                log::warn!("face {}: dropping vertex: {}", face_index, err);
                dropped_vertices += 1;
            }
        }
    }

    Polyline {
        face_index,
        points,
        dropped_vertices,
    }
}

/// Render one frame with backface culling and no clipping
pub fn render_frame(mesh: &Mesh, camera: &Camera, viewport: &Viewport) -> Result<Vec<Polyline>> {
    Pipeline::default().render(mesh, camera, viewport)
}
