// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary-segment association between spaces and reference edges
//!
//! A space (room) decomposes into one or more boundary loops whose pieces
//! are tagged with the identity of the edge (wall) they coincide with.
//! Matching answers "which space touches this wall, and with which pieces".
//!
//! When several spaces reference the same edge the winner is chosen by an
//! explicit total ranking (greatest total matched length, ties to the
//! lowest enumeration index), so the association does not depend on the
//! order hosts enumerate their spaces in.

use crate::error::{Error, Result};
use crate::segment::Segment;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Identity of a reference edge (wall) in the host model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId(pub u64);

/// Identity of a space (room) in the host model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpaceId(pub u64);

/// A perimeter piece tagged with the edge it coincides with.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundarySegment {
    pub segment: Segment,
    pub edge: EdgeId,
}

impl BoundarySegment {
    pub fn new(segment: Segment, edge: EdgeId) -> Self {
        Self { segment, edge }
    }
}

/// A space's boundary decomposition: one or more loops of tagged segments.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpaceBoundary {
    pub space: SpaceId,
    pub loops: Vec<Vec<BoundarySegment>>,
}

impl SpaceBoundary {
    pub fn new(space: SpaceId, loops: Vec<Vec<BoundarySegment>>) -> Self {
        Self { space, loops }
    }
}

/// Result of matching a reference edge against space boundaries.
#[derive(Debug, Clone)]
pub struct EdgeMatch {
    /// Index of the owning space within the scanned slice.
    pub space_index: usize,
    /// Identity of the owning space.
    pub space: SpaceId,
    /// Every boundary segment of the owning space tagged with the edge.
    pub segments: Vec<BoundarySegment>,
}

/// Find the space owning the given edge, with its matching segments.
///
/// Scans every loop of every space and collects the boundary segments whose
/// tag equals `edge`. [`Error::EdgeNotFound`] when no segment matches
/// anywhere. Callers that pre-filter the space slice (by name keyword or
/// similar) restrict the association to that subset.
pub fn segments_touching_edge(spaces: &[SpaceBoundary], edge: EdgeId) -> Result<EdgeMatch> {
    let mut best: Option<EdgeMatch> = None;
    let mut best_length = 0.0;

    for (space_index, space) in spaces.iter().enumerate() {
        let segments: Vec<BoundarySegment> = space
            .loops
            .iter()
            .flatten()
            .filter(|b| b.edge == edge)
            .cloned()
            .collect();
        if segments.is_empty() {
            continue;
        }

        let total: f64 = segments.iter().map(|b| b.segment.length()).sum();
        // Strictly greater keeps the earliest space on equal totals
        if best.is_none() || total > best_length {
            best_length = total;
            best = Some(EdgeMatch {
                space_index,
                space: space.space,
                segments,
            });
        }
    }

    best.ok_or(Error::EdgeNotFound(edge))
}

/// First boundary segment of a loop tagged with the given edge, if any.
///
/// The cheap single-loop form used when the owning space is already known.
pub fn segment_for_edge(segments: &[BoundarySegment], edge: EdgeId) -> Option<&BoundarySegment> {
    segments.iter().find(|b| b.edge == edge)
}

/// Position of a boundary segment: (space index, loop index, segment index).
pub type BoundaryPosition = (usize, usize, usize);

/// Precomputed edge-to-segment index for repeated queries against the same
/// boundary decomposition.
#[derive(Debug, Default)]
pub struct BoundaryIndex {
    by_edge: FxHashMap<EdgeId, SmallVec<[BoundaryPosition; 4]>>,
}

impl BoundaryIndex {
    /// Index every tagged segment of the given spaces.
    pub fn build(spaces: &[SpaceBoundary]) -> Self {
        let mut by_edge: FxHashMap<EdgeId, SmallVec<[BoundaryPosition; 4]>> =
            FxHashMap::default();
        for (si, space) in spaces.iter().enumerate() {
            for (li, loop_) in space.loops.iter().enumerate() {
                for (bi, bound) in loop_.iter().enumerate() {
                    by_edge.entry(bound.edge).or_default().push((si, li, bi));
                }
            }
        }
        Self { by_edge }
    }

    /// Positions of every segment tagged with the edge; empty when unknown.
    pub fn positions(&self, edge: EdgeId) -> &[BoundaryPosition] {
        self.by_edge.get(&edge).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Whether any segment references the edge.
    pub fn contains(&self, edge: EdgeId) -> bool {
        self.by_edge.contains_key(&edge)
    }
}
