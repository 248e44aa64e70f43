/// Polygon clipping for the optional clip stage
///
/// Sutherland-Hodgman, one plane at a time. The depth modes clip in camera
/// space, which looks down -Z, so the visible slab is `-far <= z <= -near`.
/// `Frustum` clips in homogeneous clip space against `-w <= x, y, z <= w`,
/// with Cohen-Sutherland region codes for trivial accept and reject.
use nalgebra::{Point3, Vector4};

/// Which planes the pipeline clips faces against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClipMode {
    /// Project every vertex as is
    #[default]
    Disabled,
    /// Clip against the near plane only
    Near,
    /// Clip against both the near and the far plane
    NearFar,
    /// Clip against all six view volume planes in clip space
    Frustum,
}

/// A plane faces are clipped against. `distance` is signed and
/// non-negative on the inside.
trait ClipPlane: Copy {
    type Point: Copy;

    fn distance(self, point: &Self::Point) -> f64;

    /// Point at `t` along `a -> b`, placed exactly on the plane
    fn lerp(self, a: &Self::Point, b: &Self::Point, t: f64) -> Self::Point;
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DepthPlane {
    /// Inside when `z <= -distance`
    Near(f64),
    /// Inside when `z >= -distance`
    Far(f64),
}

impl DepthPlane {
    fn z(self) -> f64 {
        match self {
            DepthPlane::Near(distance) | DepthPlane::Far(distance) => -distance,
        }
    }
}

impl ClipPlane for DepthPlane {
    type Point = Point3<f64>;

    fn distance(self, point: &Point3<f64>) -> f64 {
        match self {
            DepthPlane::Near(_) => self.z() - point.z,
            DepthPlane::Far(_) => point.z - self.z(),
        }
    }

    fn lerp(self, a: &Point3<f64>, b: &Point3<f64>, t: f64) -> Point3<f64> {
        let mut point = a + (b - a) * t;
        point.z = self.z();
        point
    }
}

/// Boundary planes of the clip-space view volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

impl FrustumPlane {
    /// Region code order
    pub const ALL: [FrustumPlane; 6] = [
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Bottom,
        FrustumPlane::Top,
        FrustumPlane::Near,
        FrustumPlane::Far,
    ];

    /// Region code bit set for vertices outside this plane
    pub fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl ClipPlane for FrustumPlane {
    type Point = Vector4<f64>;

    fn distance(self, v: &Vector4<f64>) -> f64 {
        match self {
            FrustumPlane::Left => v.w + v.x,
            FrustumPlane::Right => v.w - v.x,
            FrustumPlane::Bottom => v.w + v.y,
            FrustumPlane::Top => v.w - v.y,
            FrustumPlane::Near => v.w + v.z,
            FrustumPlane::Far => v.w - v.z,
        }
    }

    fn lerp(self, a: &Vector4<f64>, b: &Vector4<f64>, t: f64) -> Vector4<f64> {
        let mut v = a + (b - a) * t;
        match self {
            FrustumPlane::Left => v.x = -v.w,
            FrustumPlane::Right => v.x = v.w,
            FrustumPlane::Bottom => v.y = -v.w,
            FrustumPlane::Top => v.y = v.w,
            FrustumPlane::Near => v.z = -v.w,
            FrustumPlane::Far => v.z = v.w,
        }
        v
    }
}

/// Cohen-Sutherland region code of a clip-space vertex: one
/// [`FrustumPlane::bit`] per plane it lies outside of, zero when inside.
pub fn region_code(vertex: &Vector4<f64>) -> u8 {
    FrustumPlane::ALL
        .iter()
        .filter(|plane| !(plane.distance(vertex) >= 0.0))
        .fold(0, |code, plane| code | plane.bit())
}

/// Clip a closed camera-space polygon against the depth planes `mode`
/// selects. `Frustum` is handled in clip space by [`clip_homogeneous`] and
/// passes through here unchanged.
///
/// Returns the clipped polygon in the original winding order, starting from
/// the same vertex when that vertex survives; empty when nothing is inside.
pub fn clip_polygon(polygon: &[Point3<f64>], mode: ClipMode, near: f64, far: f64) -> Vec<Point3<f64>> {
    let planes: &[DepthPlane] = match mode {
        ClipMode::Disabled | ClipMode::Frustum => return polygon.to_vec(),
        ClipMode::Near => &[DepthPlane::Near(near)],
        ClipMode::NearFar => &[DepthPlane::Near(near), DepthPlane::Far(far)],
    };

    let mut output = polygon.to_vec();
    for &plane in planes {
        if output.is_empty() {
            break;
        }
        output = clip_against(&output, plane);
    }
    output
}

/// Clip a closed clip-space polygon to the view volume.
///
/// A polygon whose vertices are all inside comes back unchanged; one whose
/// vertices all lie outside a common plane comes back empty. Otherwise only
/// the planes some vertex crosses are clipped against.
pub fn clip_homogeneous(polygon: &[Vector4<f64>]) -> Vec<Vector4<f64>> {
    let codes: Vec<u8> = polygon.iter().map(region_code).collect();
    let outside_any = codes.iter().fold(0, |acc, &code| acc | code);
    let outside_all = codes.iter().fold(u8::MAX, |acc, &code| acc & code);

    if outside_any == 0 {
        return polygon.to_vec();
    }
    if outside_all != 0 {
        return Vec::new();
    }

    let mut output = polygon.to_vec();
    for plane in FrustumPlane::ALL {
        if output.is_empty() {
            break;
        }
        if outside_any & plane.bit() != 0 {
            output = clip_against(&output, plane);
        }
    }
    output
}

fn clip_against<P: ClipPlane>(polygon: &[P::Point], plane: P) -> Vec<P::Point> {
    let mut output = Vec::with_capacity(polygon.len() + 1);

    for (i, current) in polygon.iter().enumerate() {
        let next = &polygon[(i + 1) % polygon.len()];

        let d_current = plane.distance(current);
        let d_next = plane.distance(next);
        let current_inside = d_current >= 0.0;
        if current_inside {
            output.push(*current);
        }
        // Only reached with one end on each side, so the distances differ
        if current_inside != (d_next >= 0.0) {
            let t = d_current / (d_current - d_next);
            output.push(plane.lerp(current, next, t));
        }
    }

    output
}
