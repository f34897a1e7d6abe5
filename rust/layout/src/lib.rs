//! Framing-Lite Layout
//!
//! Interval-based framing member layout on top of the framing-lite geometry
//! primitives: vertical studs trimmed against the host solid through an
//! injected intersection oracle, top/bottom plate lines, wall-face perimeter
//! members and door/window opening boundaries, aggregated into a
//! [`FramingPlan`] the host materializes as drawable elements.

pub mod config;
pub mod error;
pub mod layout;
pub mod opening;
pub mod oracle;
pub mod plan;

pub use config::FramingConfig;
pub use error::{Error, Result};
pub use layout::{
    face_normal, frame_wall, generate_plate_lines, lay_members, lay_members_clear_of_openings,
    trace_face_boundary, wall_outline,
};
pub use opening::{
    is_bottom_edge, trace_opening_boundary, Opening, OpeningExtent, OpeningKind,
};
pub use oracle::{FullExtentOracle, SolidIntersectionOracle};
pub use plan::{FramingPlan, Member, MemberRole};
