// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tolerance policy for point and scalar comparison
//!
//! Every coincidence test in the crate funnels through this module so the
//! tolerance can be audited and exercised in one place.

use nalgebra::Point3;

/// Geometric tolerance in model length units.
///
/// Two points closer than this are the same vertex for loop assembly and
/// boundary matching purposes.
pub const GEOMETRIC_TOLERANCE: f64 = 1e-3;

/// Scalar comparison against [`GEOMETRIC_TOLERANCE`].
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    approx_eq_eps(a, b, GEOMETRIC_TOLERANCE)
}

/// Scalar comparison with an explicit epsilon.
#[inline]
pub fn approx_eq_eps(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Point coincidence: Euclidean distance at most [`GEOMETRIC_TOLERANCE`].
#[inline]
pub fn points_coincident(a: &Point3<f64>, b: &Point3<f64>) -> bool {
    (b - a).norm() <= GEOMETRIC_TOLERANCE
}
