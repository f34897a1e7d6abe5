// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid-intersection oracle seam
//!
//! The layout engine never reasons about solid geometry itself. The host
//! kernel answers "where does this probe line lie inside material" through
//! this trait, which keeps solid booleans, voids and cut geometry entirely
//! on the host side.

use crate::error::Result;
use framing_lite_geometry::Segment;

/// Capability answering probe-inside-solid queries.
pub trait SolidIntersectionOracle {
    /// Ordered sub-segments of `probe` lying inside the host solid.
    ///
    /// An empty answer means the probe misses the solid entirely; openings
    /// and voids surface as gaps between the returned pieces. Failures here
    /// are faults of the host kernel, not expected rejections.
    fn intersect(&self, probe: &Segment) -> Result<Vec<Segment>>;
}

/// Oracle for unbounded hosts: the whole probe is material.
///
/// Useful in tests and for hosts that trim members themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullExtentOracle;

impl SolidIntersectionOracle for FullExtentOracle {
    fn intersect(&self, probe: &Segment) -> Result<Vec<Segment>> {
        Ok(vec![*probe])
    }
}
