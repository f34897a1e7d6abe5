// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement-point and facing-direction heuristics
//!
//! Fixtures placed against a wall want to sit as far as possible from the
//! door and face into the room. These helpers pick the far endpoint of the
//! wall's in-room portion and derive a facing vector, either perpendicular
//! to the wall or snapped to the dominant axis toward the room centroid.

use crate::error::{Error, Result};
use crate::segment::Segment;
use crate::tolerance::{approx_eq, GEOMETRIC_TOLERANCE};
use nalgebra::{Point3, Vector3};

/// A solved placement: where to stand and which way to face.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub location: Point3<f64>,
    pub facing: Vector3<f64>,
}

/// Endpoint of `curve` farther from `reference`; ties favor the end point.
pub fn farthest_endpoint(reference: &Point3<f64>, curve: &Segment) -> Point3<f64> {
    let to_start = (curve.start - reference).norm();
    let to_end = (curve.end - reference).norm();
    if to_start > to_end {
        curve.start
    } else {
        curve.end
    }
}

/// Horizontal unit normal of `edge_direction` pointing away from `reference`.
///
/// Both candidate normals are applied at `target`; the one landing farther
/// from `reference` wins (ties keep the `+` candidate). An edge direction
/// with no usable horizontal projection has no defined normal and is
/// rejected with [`Error::DegenerateDirection`].
pub fn perpendicular_away_from(
    reference: &Point3<f64>,
    target: &Point3<f64>,
    edge_direction: &Vector3<f64>,
) -> Result<Vector3<f64>> {
    let horizontal = Vector3::new(edge_direction.x, edge_direction.y, 0.0);
    if horizontal.norm() <= GEOMETRIC_TOLERANCE {
        return Err(Error::DegenerateDirection);
    }
    let normal = Vector3::z().cross(&horizontal).normalize();

    let positive = ((target + normal) - reference).norm();
    let negative = ((target - normal) - reference).norm();
    if negative > positive {
        Ok(-normal)
    } else {
        Ok(normal)
    }
}

/// Numeric sign with `sign(0) = +1`.
#[inline]
fn axis_sign(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Axis unit vector from `from` toward `toward`, snapped to the dominant
/// horizontal axis.
///
/// A vertical reference edge (endpoints sharing X) snaps to the X axis;
/// anything else snaps to the Y axis. The exact-zero delta resolves to the
/// positive axis.
pub fn axis_aligned_orientation(
    from: &Point3<f64>,
    toward: &Point3<f64>,
    edge_is_vertical: bool,
) -> Vector3<f64> {
    let delta = toward - from;
    if edge_is_vertical {
        Vector3::new(axis_sign(delta.x), 0.0, 0.0)
    } else {
        Vector3::new(0.0, axis_sign(delta.y), 0.0)
    }
}

/// Whether the curve runs vertically in plan (endpoints share X within
/// tolerance).
#[inline]
pub fn is_vertical(curve: &Segment) -> bool {
    approx_eq(curve.start.x, curve.end.x)
}

/// Solve the in-room placement flow in one call.
///
/// Location is the endpoint of the wall's in-room portion farthest from the
/// door; facing snaps toward the space centroid on the axis perpendicular
/// to the wall's plan orientation.
pub fn solve_placement(
    door_point: &Point3<f64>,
    wall_curve: &Segment,
    space_centroid: &Point3<f64>,
) -> Placement {
    let location = farthest_endpoint(door_point, wall_curve);
    let facing = axis_aligned_orientation(&location, space_centroid, is_vertical(wall_curve));
    Placement { location, facing }
}
