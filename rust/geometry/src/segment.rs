// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Oriented line segments
//!
//! The straight segment is the only curve kind the engine consumes; hosts
//! decompose arcs before handing boundaries over.

use crate::tolerance::{approx_eq, GEOMETRIC_TOLERANCE};
use nalgebra::{Point3, Vector3};

/// An oriented straight segment from `start` to `end`.
///
/// Segments are immutable values; [`Segment::reversed`] returns the flipped
/// copy and is the only permitted "mutation".
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Segment {
    /// Create a segment between two points.
    #[inline]
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    /// The same segment with swapped endpoints.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Euclidean length.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unnormalized direction vector `end - start`.
    #[inline]
    pub fn vector(&self) -> Vector3<f64> {
        self.end - self.start
    }

    /// Unit direction vector; the zero vector for a degenerate segment.
    pub fn direction(&self) -> Vector3<f64> {
        let v = self.vector();
        let len = v.norm();
        if len <= GEOMETRIC_TOLERANCE {
            Vector3::zeros()
        } else {
            v / len
        }
    }

    /// Midpoint between the endpoints.
    pub fn midpoint(&self) -> Point3<f64> {
        Point3::from((self.start.coords + self.end.coords) * 0.5)
    }

    /// Point at the given arc length from `start` along the segment.
    ///
    /// The distance is not clamped; callers may probe beyond the endpoints.
    pub fn point_at(&self, arc_length: f64) -> Point3<f64> {
        self.start + self.direction() * arc_length
    }

    /// Translated copy.
    #[inline]
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Whether the segment has no usable extent.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.length() <= GEOMETRIC_TOLERANCE
    }

    /// Whether both endpoints share the same elevation within tolerance.
    #[inline]
    pub fn is_level(&self) -> bool {
        approx_eq(self.start.z, self.end.z)
    }

    /// Average elevation of the two endpoints.
    #[inline]
    pub fn average_z(&self) -> f64 {
        (self.start.z + self.end.z) * 0.5
    }
}
