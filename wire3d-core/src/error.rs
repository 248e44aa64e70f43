/// Error types for the wireframe pipeline

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building matrices or rendering a frame
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A vector too short to normalize (parallel up/view vectors,
    /// collinear face vertices).
    #[error("cannot normalize a vector of length {length:e}")]
    DegenerateVector { length: f64 },

    /// Camera parameters rejected before any frame is rendered.
    #[error("invalid camera configuration: {0}")]
    InvalidCameraConfig(String),

    /// Clip-space w too close to zero for the perspective divide.
    #[error("clip-space w is too close to zero ({w:e})")]
    NearZeroW { w: f64 },

    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },
}
