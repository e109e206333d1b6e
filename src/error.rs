use thiserror::Error;

/// Reasons a surface, light or ray can be rejected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("zero-length vector cannot be used as a direction")]
    ZeroVector,
    #[error("plane points are collinear")]
    CollinearPoints,
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("polygon vertex {0} duplicates the previous vertex")]
    DuplicateVertex(usize),
    #[error("polygon vertex {0} does not lie in the polygon plane")]
    NotPlanar(usize),
    #[error("polygon is not convex at vertex {0}")]
    NotConvex(usize),
    #[error("polygon edges meeting at vertex {0} are collinear")]
    CollinearEdges(usize),
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),
    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f64),
    #[error("soft shadow sampling needs a non-negative radius, got {0}")]
    NegativeSampleRadius(f64),
}
