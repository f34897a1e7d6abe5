// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Framing plan output types

use framing_lite_geometry::Segment;
use serde::{Deserialize, Serialize};

/// Semantic role of a generated member line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberRole {
    /// Vertical member between the plates.
    Stud,
    /// Horizontal plate at the top of the wall.
    TopPlate,
    /// Horizontal plate at the base of the wall.
    BottomPlate,
    /// Edge of a door or window rough opening.
    OpeningEdge,
    /// Edge of the wall-face perimeter.
    PerimeterEdge,
}

/// A generated framing line tagged with its role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Member {
    pub curve: Segment,
    pub role: MemberRole,
}

impl Member {
    pub fn new(curve: Segment, role: MemberRole) -> Self {
        Self { curve, role }
    }
}

/// Aggregate output of the framing pipeline.
///
/// Members appear in generation order: studs, plates, perimeter, openings.
/// The host either materializes the whole plan or discards it; the plan is
/// never partially applied from this side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FramingPlan {
    pub members: Vec<Member>,
}

impl FramingPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Members carrying the given role, in generation order.
    pub fn with_role(&self, role: MemberRole) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(move |m| m.role == role)
    }

    /// Vertical members.
    pub fn studs(&self) -> impl Iterator<Item = &Member> {
        self.with_role(MemberRole::Stud)
    }

    /// Top and bottom plate members.
    pub fn plates(&self) -> impl Iterator<Item = &Member> {
        self.members
            .iter()
            .filter(|m| matches!(m.role, MemberRole::TopPlate | MemberRole::BottomPlate))
    }

    /// Opening boundary members.
    pub fn opening_edges(&self) -> impl Iterator<Item = &Member> {
        self.with_role(MemberRole::OpeningEdge)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
