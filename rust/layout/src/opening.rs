// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opening descriptors and opening-boundary tracing
//!
//! Doors and windows interrupt the framing in different ways: a window gets
//! a full rough-opening boundary including the sill, a door has no
//! continuous sill member. Independently of classification, level edges
//! lying on the floor line never get a member at all.

use crate::config::FramingConfig;
use crate::plan::{Member, MemberRole};
use framing_lite_geometry::{Loop, Point3, Segment, Vector3, GEOMETRIC_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Classification of a wall opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpeningKind {
    Door,
    Window,
}

/// A wall opening as described by the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Opening {
    /// Rough width along the host curve.
    pub width: f64,
    /// Center of the opening on the host curve.
    pub center: Point3<f64>,
    /// Facing direction (out of the wall face).
    pub facing: Vector3<f64>,
    pub kind: OpeningKind,
}

impl Opening {
    pub fn new(width: f64, center: Point3<f64>, facing: Vector3<f64>, kind: OpeningKind) -> Self {
        Self {
            width,
            center,
            facing,
            kind,
        }
    }
}

/// Axis-aligned extent of an opening, used to interrupt stud stations when
/// no solid oracle is available.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OpeningExtent {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl OpeningExtent {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Extent of an opening on its host curve, between sill and head
    /// elevations measured from the opening center's level.
    pub fn from_opening(
        opening: &Opening,
        host_direction: &Vector3<f64>,
        sill_height: f64,
        head_height: f64,
    ) -> Self {
        let half = opening.width * 0.5;
        let a = opening.center - host_direction * half;
        let b = opening.center + host_direction * half;
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), opening.center.z + sill_height),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), opening.center.z + head_height),
        }
    }

    /// Whether a station point falls inside the extent's plan footprint.
    ///
    /// The footprint is inflated by the geometric tolerance so stations on
    /// the wall centerline register against zero-thickness extents.
    pub fn contains_footprint(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x - GEOMETRIC_TOLERANCE
            && point.x <= self.max.x + GEOMETRIC_TOLERANCE
            && point.y >= self.min.y - GEOMETRIC_TOLERANCE
            && point.y <= self.max.y + GEOMETRIC_TOLERANCE
    }
}

/// Coarse floor-line check: level within tolerance and below the sill
/// threshold.
#[inline]
pub fn is_bottom_edge(segment: &Segment, sill_threshold: f64) -> bool {
    segment.is_level() && segment.average_z() < sill_threshold
}

/// Boundary members for a rough opening.
///
/// The sill is the lowest level edge of the loop. Doors omit it, since there
/// is no continuous member across a door threshold, while windows keep it.
/// Independently, any edge on the floor line (see [`is_bottom_edge`]) is
/// omitted regardless of classification; for a door at floor level both
/// rules drop the same edge.
pub fn trace_opening_boundary(
    boundary: &Loop,
    kind: OpeningKind,
    cfg: &FramingConfig,
) -> Vec<Member> {
    let segments = boundary.segments();

    let mut sill_index: Option<usize> = None;
    let mut min_z = f64::MAX;
    for (i, seg) in segments.iter().enumerate() {
        if !seg.is_level() {
            continue;
        }
        let avg = seg.average_z();
        if avg < min_z {
            min_z = avg;
            sill_index = Some(i);
        }
    }

    let mut members = Vec::with_capacity(segments.len());
    for (i, seg) in segments.iter().enumerate() {
        if kind == OpeningKind::Door && Some(i) == sill_index {
            continue;
        }
        if is_bottom_edge(seg, cfg.sill_threshold) {
            continue;
        }
        members.push(Member::new(*seg, MemberRole::OpeningEdge));
    }
    members
}
