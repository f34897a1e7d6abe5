//! Framing-Lite Geometry
//!
//! Boundary-loop assembly, boundary-segment matching and placement
//! heuristics for building automation, built on nalgebra points and
//! vectors. The host application supplies raw segments and reference
//! points; this crate turns them into validated loops, edge matches and
//! placement solutions.

pub mod boundary;
pub mod error;
pub mod loop_assembly;
pub mod placement;
pub mod segment;
pub mod tolerance;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use boundary::{
    segments_touching_edge, BoundaryIndex, BoundarySegment, EdgeId, EdgeMatch, SpaceBoundary,
    SpaceId,
};
pub use error::{Error, Result};
pub use loop_assembly::{sort_into_loop, sort_into_loop_with, validate_loop, Loop, SortStrategy};
pub use placement::{
    axis_aligned_orientation, farthest_endpoint, is_vertical, perpendicular_away_from,
    solve_placement, Placement,
};
pub use segment::Segment;
pub use tolerance::GEOMETRIC_TOLERANCE;
