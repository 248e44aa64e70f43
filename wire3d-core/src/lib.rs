/// wire3d core library - wireframe projection pipeline
///
/// This library provides the stateless core of the renderer: vector and
/// matrix math, the camera model, view and projection builders, backface
/// culling, optional depth or frustum clipping, and the per-frame pipeline that turns
/// a mesh into screen-space polylines.

pub mod camera;
pub mod clip;
pub mod culling;
pub mod error;
pub mod geometry;
pub mod math;
pub mod pipeline;
pub mod projection;
pub mod view;

// Re-export commonly used types
pub use camera::{Camera, CameraConfig};
pub use clip::ClipMode;
pub use culling::{CullMode, FaceVisibility};
pub use error::{Error, Result};
pub use geometry::{Face, Mesh};
pub use pipeline::{render_frame, FrameContext, Pipeline, PipelineOptions, Polyline, Viewport};
