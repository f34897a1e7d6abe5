// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interval-based member layout along a base curve
//!
//! Stud stations are spaced evenly along the wall centerline; at each
//! station a vertical probe is trimmed to the material actually present by
//! the host's solid oracle, so openings and voids interrupt members without
//! this module knowing any solid geometry. Plates, the wall-face perimeter
//! and opening boundaries complete the plan.

use crate::config::FramingConfig;
use crate::error::{Error, Result};
use crate::opening::{is_bottom_edge, trace_opening_boundary, Opening, OpeningExtent, OpeningKind};
use crate::oracle::SolidIntersectionOracle;
use crate::plan::{FramingPlan, Member, MemberRole};
use framing_lite_geometry::{Loop, Point3, Segment, Vector3, GEOMETRIC_TOLERANCE};
use tracing::debug;

/// Lay vertical members along the base curve, trimmed by the solid oracle.
///
/// Stations sit at arc lengths `i * spacing` for `i = 1..count` with
/// `count = floor(length / spacing)`; the curve endpoints never get a
/// member. Each surviving probe piece shorter than twice the member
/// thickness is discarded; the rest are trimmed by the member thickness at
/// both ends and emitted as studs. A probe crossing an opening yields
/// several pieces, so a station can produce zero, one or more members.
pub fn lay_members(
    base: &Segment,
    span_height: f64,
    cfg: &FramingConfig,
    oracle: &dyn SolidIntersectionOracle,
) -> Result<Vec<Member>> {
    let length = base.length();
    if length <= GEOMETRIC_TOLERANCE {
        return Err(Error::DegenerateBase(format!(
            "base curve has length {}",
            length
        )));
    }
    if cfg.spacing <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "spacing must be positive, got {}",
            cfg.spacing
        )));
    }

    let count = (length / cfg.spacing).floor() as usize;
    let mut members = Vec::new();

    for i in 1..count {
        let station = base.point_at(i as f64 * cfg.spacing);
        let probe = Segment::new(
            Point3::new(station.x, station.y, station.z - cfg.probe_extent),
            Point3::new(station.x, station.y, station.z + span_height + cfg.probe_extent),
        );

        for piece in oracle.intersect(&probe)? {
            if piece.length() < cfg.member_thickness * 2.0 {
                continue;
            }
            let dir = piece.direction();
            let trimmed = Segment::new(
                piece.start + dir * cfg.member_thickness,
                piece.end - dir * cfg.member_thickness,
            );
            members.push(Member::new(trimmed, MemberRole::Stud));
        }
    }

    debug!(
        stations = count.saturating_sub(1),
        studs = members.len(),
        "laid vertical members"
    );
    Ok(members)
}

/// Oracle-free stud layout that dodges openings by their extents.
///
/// Stations falling inside an opening's plan footprint emit only the piece
/// between the opening head and the top of the wall, when there is one;
/// stations in the clear emit full-height studs. No end trimming is applied;
/// this is the coarse path for hosts without a solid kernel.
pub fn lay_members_clear_of_openings(
    base: &Segment,
    span_height: f64,
    spacing: f64,
    extents: &[OpeningExtent],
) -> Result<Vec<Member>> {
    let length = base.length();
    if length <= GEOMETRIC_TOLERANCE {
        return Err(Error::DegenerateBase(format!(
            "base curve has length {}",
            length
        )));
    }
    if spacing <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "spacing must be positive, got {}",
            spacing
        )));
    }

    let count = (length / spacing).floor() as usize;
    let mut members = Vec::new();

    for i in 1..count {
        let station = base.point_at(i as f64 * spacing);
        let top_z = station.z + span_height;

        match extents.iter().find(|e| e.contains_footprint(&station)) {
            Some(extent) => {
                // Only the piece above the opening head survives
                if extent.max.z < top_z {
                    members.push(Member::new(
                        Segment::new(
                            Point3::new(station.x, station.y, extent.max.z),
                            Point3::new(station.x, station.y, top_z),
                        ),
                        MemberRole::Stud,
                    ));
                }
            }
            None => {
                members.push(Member::new(
                    Segment::new(station, Point3::new(station.x, station.y, top_z)),
                    MemberRole::Stud,
                ));
            }
        }
    }

    Ok(members)
}

/// Horizontal face normal of a base curve: Z × direction, unit length.
pub fn face_normal(base: &Segment) -> Result<Vector3<f64>> {
    let v = base.vector();
    let horizontal = Vector3::new(v.x, v.y, 0.0);
    if horizontal.norm() <= GEOMETRIC_TOLERANCE {
        return Err(Error::Geometry(
            framing_lite_geometry::Error::DegenerateDirection,
        ));
    }
    Ok(Vector3::z().cross(&horizontal).normalize())
}

/// Bottom and top plate lines for a wall.
///
/// The bottom plate is the base curve pushed `offset_distance` along the
/// face normal onto the wall face; the top plate is the same line lifted by
/// `top_height`.
pub fn generate_plate_lines(
    base: &Segment,
    offset_distance: f64,
    top_height: f64,
) -> Result<[Member; 2]> {
    let normal = face_normal(base)?;
    let bottom = base.translated(&(normal * offset_distance));
    let top = bottom.translated(&(Vector3::z() * top_height));
    Ok([
        Member::new(bottom, MemberRole::BottomPlate),
        Member::new(top, MemberRole::TopPlate),
    ])
}

/// Rectangular face outline of a wall elevation: bottom, top and the two
/// end verticals.
pub fn wall_outline(base: &Segment, height: f64) -> [Segment; 4] {
    let up = Vector3::z() * height;
    [
        *base,
        base.translated(&up),
        Segment::new(base.start, base.start + up),
        Segment::new(base.end, base.end + up),
    ]
}

/// Perimeter members for the wall face, skipping floor-line edges.
pub fn trace_face_boundary(face: &Loop, cfg: &FramingConfig) -> Vec<Member> {
    face.segments()
        .iter()
        .filter(|seg| !is_bottom_edge(seg, cfg.sill_threshold))
        .map(|seg| Member::new(*seg, MemberRole::PerimeterEdge))
        .collect()
}

/// Run the whole framing pipeline for one wall.
///
/// `face_loops[0]` is the outer wall-face boundary; the remaining loops are
/// rough openings, each classified by the nearest opening descriptor (by
/// centroid distance). Openings without any descriptor default to windows,
/// which keep every boundary edge.
pub fn frame_wall(
    base: &Segment,
    span_height: f64,
    face_loops: &[Loop],
    openings: &[Opening],
    cfg: &FramingConfig,
    oracle: &dyn SolidIntersectionOracle,
) -> Result<FramingPlan> {
    let mut plan = FramingPlan::new();

    plan.members
        .extend(lay_members(base, span_height, cfg, oracle)?);

    let plates = generate_plate_lines(base, cfg.wall_thickness * 0.5, span_height)?;
    plan.members.extend(plates);

    if let Some((face, opening_loops)) = face_loops.split_first() {
        plan.members.extend(trace_face_boundary(face, cfg));

        for boundary in opening_loops {
            let kind = classify_opening_loop(boundary, openings);
            plan.members
                .extend(trace_opening_boundary(boundary, kind, cfg));
        }
    }

    debug!(
        members = plan.members.len(),
        opening_loops = face_loops.len().saturating_sub(1),
        "framing plan assembled"
    );
    Ok(plan)
}

/// Kind of the opening descriptor nearest to the loop centroid.
fn classify_opening_loop(boundary: &Loop, openings: &[Opening]) -> OpeningKind {
    let centroid = boundary.centroid();
    openings
        .iter()
        .min_by(|a, b| {
            let da = (a.center - centroid).norm();
            let db = (b.center - centroid).norm();
            da.total_cmp(&db)
        })
        .map(|o| o.kind)
        .unwrap_or(OpeningKind::Window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::FullExtentOracle;
    use approx::assert_relative_eq;

    fn base_wall() -> Segment {
        Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0))
    }

    #[test]
    fn test_station_count_excludes_endpoints() {
        // Length 10, spacing 2: floor(10 / 2) = 5 stations would include the
        // far endpoint; only the 4 interior ones are emitted
        let cfg = FramingConfig {
            spacing: 2.0,
            ..FramingConfig::default()
        };
        let members = lay_members(&base_wall(), 2.4, &cfg, &FullExtentOracle).unwrap();
        assert_eq!(members.len(), 4);

        for (i, member) in members.iter().enumerate() {
            assert_relative_eq!(member.curve.start.x, (i as f64 + 1.0) * 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_members_are_trimmed_at_both_ends() {
        let cfg = FramingConfig {
            spacing: 2.0,
            ..FramingConfig::default()
        };
        let members = lay_members(&base_wall(), 2.4, &cfg, &FullExtentOracle).unwrap();

        // The identity oracle returns the whole probe; the emitted member is
        // shorter by one thickness per end
        let probe_length = 2.4 + cfg.probe_extent * 2.0;
        for member in &members {
            assert_relative_eq!(
                member.curve.length(),
                probe_length - cfg.member_thickness * 2.0,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_short_probe_pieces_are_discarded() {
        struct SliverOracle;
        impl SolidIntersectionOracle for SliverOracle {
            fn intersect(&self, probe: &Segment) -> Result<Vec<Segment>> {
                // A piece too small to frame
                let top = Point3::new(probe.start.x, probe.start.y, probe.start.z + 0.2);
                Ok(vec![Segment::new(probe.start, top)])
            }
        }

        let cfg = FramingConfig {
            spacing: 2.0,
            ..FramingConfig::default()
        };
        let members = lay_members(&base_wall(), 2.4, &cfg, &SliverOracle).unwrap();
        assert!(members.is_empty());
    }

    #[test]
    fn test_degenerate_base_is_rejected() {
        let point = Segment::new(Point3::new(1.0, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0));
        let cfg = FramingConfig::default();
        assert!(matches!(
            lay_members(&point, 2.4, &cfg, &FullExtentOracle),
            Err(Error::DegenerateBase(_))
        ));
    }

    #[test]
    fn test_plate_lines_offsets() {
        let base = base_wall();
        let [bottom, top] = generate_plate_lines(&base, 0.15, 2.4).unwrap();

        assert_eq!(bottom.role, MemberRole::BottomPlate);
        assert_eq!(top.role, MemberRole::TopPlate);

        // Face normal of a +X wall is +Y
        assert_relative_eq!(bottom.curve.start.y, 0.15, epsilon = 1e-9);
        assert_relative_eq!(bottom.curve.start.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(top.curve.start.y, 0.15, epsilon = 1e-9);
        assert_relative_eq!(top.curve.start.z, 2.4, epsilon = 1e-9);
    }

    #[test]
    fn test_plate_lines_reject_plumb_base() {
        let plumb = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 3.0));
        assert!(generate_plate_lines(&plumb, 0.15, 2.4).is_err());
    }

    #[test]
    fn test_wall_outline_rectangle() {
        let [bottom, top, start_edge, end_edge] = wall_outline(&base_wall(), 2.4);
        assert_relative_eq!(bottom.start.z, 0.0);
        assert_relative_eq!(top.start.z, 2.4);
        assert_relative_eq!(start_edge.length(), 2.4, epsilon = 1e-9);
        assert_relative_eq!(end_edge.length(), 2.4, epsilon = 1e-9);
        assert_relative_eq!(end_edge.start.x, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bbox_layout_emits_above_head_piece() {
        let extent = OpeningExtent::new(
            Point3::new(2.5, 0.0, 0.0),
            Point3::new(3.5, 0.0, 2.0),
        );
        let members =
            lay_members_clear_of_openings(&base_wall(), 2.4, 1.0, &[extent]).unwrap();

        // Stations at 1..9; station 3 is inside the opening footprint
        assert_eq!(members.len(), 9);
        let interrupted = members
            .iter()
            .find(|m| (m.curve.start.x - 3.0).abs() < 1e-9)
            .unwrap();
        assert_relative_eq!(interrupted.curve.start.z, 2.0, epsilon = 1e-9);
        assert_relative_eq!(interrupted.curve.end.z, 2.4, epsilon = 1e-9);

        let clear = members
            .iter()
            .find(|m| (m.curve.start.x - 1.0).abs() < 1e-9)
            .unwrap();
        assert_relative_eq!(clear.curve.length(), 2.4, epsilon = 1e-9);
    }

    #[test]
    fn test_bbox_layout_swallows_station_under_tall_opening() {
        // Opening reaching the top of the wall: the covered station emits
        // nothing at all
        let extent = OpeningExtent::new(
            Point3::new(4.5, 0.0, 0.0),
            Point3::new(5.5, 0.0, 2.4),
        );
        let members =
            lay_members_clear_of_openings(&base_wall(), 2.4, 1.0, &[extent]).unwrap();
        assert_eq!(members.len(), 8);
        assert!(members
            .iter()
            .all(|m| (m.curve.start.x - 5.0).abs() > 1e-9));
    }
}
