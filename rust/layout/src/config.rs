// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout configuration

use serde::{Deserialize, Serialize};

/// Tunable parameters for the framing layout engine.
///
/// Distances are in model length units; unit conversion is the host's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FramingConfig {
    /// Member thickness. Probe sub-segments shorter than twice this are too
    /// small to frame and are discarded; survivors are trimmed by this much
    /// at both ends so members never overlap the plates.
    pub member_thickness: f64,
    /// Spacing between vertical member stations along the base curve.
    pub spacing: f64,
    /// Thickness of the host wall; plate lines sit at half this distance
    /// from the wall centerline.
    pub wall_thickness: f64,
    /// How far the vertical probe extends beyond the span on each side, so
    /// the oracle sees the full material column regardless of base levels.
    pub probe_extent: f64,
    /// Level edges below this elevation are floor-line edges and never get
    /// a boundary member.
    pub sill_threshold: f64,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            member_thickness: 0.15,
            spacing: 0.6,
            wall_thickness: 0.3,
            probe_extent: 100.0,
            sill_threshold: 1.0,
        }
    }
}
