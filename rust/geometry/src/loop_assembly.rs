// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed boundary-loop assembly and validation
//!
//! Hosts hand over bags of line segments (sketched floor boundaries, face
//! edges, opening outlines) and need a single closed, connected cycle back.
//! [`validate_loop`] checks a candidate ordering as given; [`sort_into_loop`]
//! reorders (and reverses) an unordered bag first. Construction of a [`Loop`]
//! is all-or-nothing: a partially connected cycle is never observable.

use crate::error::{Error, Result};
use crate::segment::Segment;
use crate::tolerance::{points_coincident, GEOMETRIC_TOLERANCE};
use nalgebra::{Point3, Vector3};

/// Upper bound on states explored by the backtracking strategy.
const MAX_SEARCH_STATES: usize = 100_000;

/// Ordering strategy for [`sort_into_loop_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStrategy {
    /// Single-pass nearest-connection: first unused segment touching the free
    /// end wins, in list order, with no backtracking. This matches the
    /// historical behavior and is incomplete: a branch point with several
    /// valid continuations can dead-end even though a closed ordering exists.
    Greedy,
    /// Depth-first search over connection choices (both orientations, every
    /// candidate). Finds orderings the greedy pass misses, at the cost of a
    /// bounded search ([`Error::SearchBudgetExhausted`] on pathological input).
    Backtracking,
}

/// A closed, connected cycle of segments.
///
/// Invariants, enforced at construction:
/// - at least 3 segments;
/// - each segment's end coincides with the next segment's start, including
///   the wrap-around from last to first;
/// - no zero-length segment, no doubling back, no transversal
///   self-intersection.
#[derive(Debug, Clone)]
pub struct Loop {
    segments: Vec<Segment>,
}

impl Loop {
    /// Build a loop from pre-ordered segments, enforcing every invariant.
    pub fn new(segments: Vec<Segment>) -> Result<Self> {
        if segments.len() < 3 {
            return Err(Error::TooFewSegments(segments.len()));
        }
        for i in 0..segments.len() {
            let next = (i + 1) % segments.len();
            if !points_coincident(&segments[i].end, &segments[next].start) {
                return Err(Error::Disconnected { index: i });
            }
        }
        check_degeneracy(&segments)?;
        Ok(Self { segments })
    }

    /// The segments in cycle order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments in the cycle.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// The vertex at the start of each segment, in cycle order.
    pub fn vertices(&self) -> Vec<Point3<f64>> {
        self.segments.iter().map(|s| s.start).collect()
    }

    /// Average of the loop vertices.
    pub fn centroid(&self) -> Point3<f64> {
        let mut acc = Vector3::zeros();
        for seg in &self.segments {
            acc += seg.start.coords;
        }
        Point3::from(acc / self.segments.len() as f64)
    }

    /// Consume the loop, returning its segments.
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

/// Validate an ordered candidate cycle.
///
/// Rejects with [`Error::TooFewSegments`] below 3 segments (checked before
/// anything else), [`Error::Disconnected`] on the first adjacency mismatch,
/// and [`Error::DegenerateLoop`] when the connected cycle is geometrically
/// unusable. On success the returned loop holds exactly the input segments in
/// the input order.
pub fn validate_loop(segments: &[Segment]) -> Result<Loop> {
    Loop::new(segments.to_vec())
}

/// Reorder an unordered bag of segments into a closed loop.
///
/// Uses the greedy strategy; see [`sort_into_loop_with`] for the policy and
/// its alternatives. Callers typically try [`validate_loop`] on the input
/// order first and fall back to this on rejection.
pub fn sort_into_loop(segments: &[Segment]) -> Result<Loop> {
    sort_into_loop_with(SortStrategy::Greedy, segments)
}

/// Reorder an unordered bag of segments into a closed loop with an explicit
/// search strategy.
///
/// The output is a permutation of the input with some segments reversed;
/// the multiset of undirected segments is preserved. The seed is always
/// `segments[0]`; the starting choice is not optimized over.
pub fn sort_into_loop_with(strategy: SortStrategy, segments: &[Segment]) -> Result<Loop> {
    if segments.is_empty() {
        return Err(Error::TooFewSegments(0));
    }
    let ordered = match strategy {
        SortStrategy::Greedy => greedy_order(segments)?,
        SortStrategy::Backtracking => backtracking_order(segments)?,
    };
    Loop::new(ordered)
}

/// Greedy nearest-connection ordering.
///
/// Each iteration consumes one segment, so the scan is bounded by n passes
/// over the remaining bag (O(n²) overall).
fn greedy_order(segments: &[Segment]) -> Result<Vec<Segment>> {
    let mut unused = segments.to_vec();
    let mut ordered = Vec::with_capacity(unused.len());
    ordered.push(unused.remove(0));
    let mut free_end = ordered[0].end;

    while !unused.is_empty() {
        let found = unused.iter().position(|s| {
            points_coincident(&s.start, &free_end) || points_coincident(&s.end, &free_end)
        });
        let index = match found {
            Some(index) => index,
            None => {
                return Err(Error::NoConnectingSegment {
                    placed: ordered.len(),
                    remaining: unused.len(),
                });
            }
        };

        let mut next = unused.remove(index);
        if !points_coincident(&next.start, &free_end) {
            next = next.reversed();
        }
        free_end = next.end;
        ordered.push(next);
    }

    if !points_coincident(&free_end, &ordered[0].start) {
        return Err(Error::NotClosed);
    }
    Ok(ordered)
}

/// Depth-first ordering that explores every connection choice.
fn backtracking_order(segments: &[Segment]) -> Result<Vec<Segment>> {
    let mut used = vec![false; segments.len()];
    used[0] = true;
    let mut ordered = vec![segments[0]];
    let mut states = 0usize;

    if search(segments, &mut used, &mut ordered, &mut states)? {
        Ok(ordered)
    } else if ordered.len() == segments.len() {
        Err(Error::NotClosed)
    } else {
        Err(Error::NoConnectingSegment {
            placed: ordered.len(),
            remaining: segments.len() - ordered.len(),
        })
    }
}

fn search(
    all: &[Segment],
    used: &mut [bool],
    ordered: &mut Vec<Segment>,
    states: &mut usize,
) -> Result<bool> {
    *states += 1;
    if *states > MAX_SEARCH_STATES {
        return Err(Error::SearchBudgetExhausted(MAX_SEARCH_STATES));
    }

    if ordered.len() == all.len() {
        let closed = points_coincident(&ordered[ordered.len() - 1].end, &ordered[0].start);
        return Ok(closed);
    }

    let free_end = ordered[ordered.len() - 1].end;
    for i in 0..all.len() {
        if used[i] {
            continue;
        }
        let candidate = if points_coincident(&all[i].start, &free_end) {
            Some(all[i])
        } else if points_coincident(&all[i].end, &free_end) {
            Some(all[i].reversed())
        } else {
            None
        };
        if let Some(seg) = candidate {
            used[i] = true;
            ordered.push(seg);
            if search(all, used, ordered, states)? {
                return Ok(true);
            }
            ordered.pop();
            used[i] = false;
        }
    }
    Ok(false)
}

/// Construction-time geometry checks on a connected cycle.
///
/// Zero-length segments, a segment doubling straight back on its
/// predecessor, and transversal crossings reject the loop. Contact at shared
/// vertices is allowed; cycles through a branch vertex are legal boundaries.
fn check_degeneracy(segments: &[Segment]) -> Result<()> {
    let n = segments.len();

    for (i, seg) in segments.iter().enumerate() {
        if seg.is_degenerate() {
            return Err(Error::DegenerateLoop(format!(
                "zero-length segment at index {}",
                i
            )));
        }
    }

    for i in 0..n {
        let next = &segments[(i + 1) % n];
        if (segments[i].direction() + next.direction()).norm() <= GEOMETRIC_TOLERANCE {
            return Err(Error::DegenerateLoop(format!(
                "segment {} doubles back on segment {}",
                (i + 1) % n,
                i
            )));
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            // Neighbors legitimately share a vertex
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let (dist, s, t) = closest_approach(&segments[i], &segments[j]);
            if dist > GEOMETRIC_TOLERANCE {
                continue;
            }
            let li = segments[i].length();
            let lj = segments[j].length();
            let interior_i = s * li > GEOMETRIC_TOLERANCE && (1.0 - s) * li > GEOMETRIC_TOLERANCE;
            let interior_j = t * lj > GEOMETRIC_TOLERANCE && (1.0 - t) * lj > GEOMETRIC_TOLERANCE;
            if interior_i && interior_j {
                return Err(Error::DegenerateLoop(format!(
                    "segments {} and {} cross",
                    i, j
                )));
            }
        }
    }

    Ok(())
}

/// Closest approach between two segments: `(distance, s, t)` with the
/// normalized parameters clamped to `[0, 1]`.
fn closest_approach(a: &Segment, b: &Segment) -> (f64, f64, f64) {
    let d1 = a.end - a.start;
    let d2 = b.end - b.start;
    let r = a.start - b.start;
    let aa = d1.dot(&d1);
    let ee = d2.dot(&d2);
    let f = d2.dot(&r);

    let (s, t);
    if aa <= f64::EPSILON && ee <= f64::EPSILON {
        s = 0.0;
        t = 0.0;
    } else if aa <= f64::EPSILON {
        s = 0.0;
        t = (f / ee).clamp(0.0, 1.0);
    } else {
        let c = d1.dot(&r);
        if ee <= f64::EPSILON {
            t = 0.0;
            s = (-c / aa).clamp(0.0, 1.0);
        } else {
            let bb = d1.dot(&d2);
            let denom = aa * ee - bb * bb;
            let mut s_candidate = if denom.abs() > f64::EPSILON {
                ((bb * f - c * ee) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mut t_candidate = (bb * s_candidate + f) / ee;
            if t_candidate < 0.0 {
                t_candidate = 0.0;
                s_candidate = (-c / aa).clamp(0.0, 1.0);
            } else if t_candidate > 1.0 {
                t_candidate = 1.0;
                s_candidate = ((bb - c) / aa).clamp(0.0, 1.0);
            }
            s = s_candidate;
            t = t_candidate;
        }
    }

    let p1 = a.start + d1 * s;
    let p2 = b.start + d2 * t;
    ((p2 - p1).norm(), s, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment::new(Point3::new(ax, ay, 0.0), Point3::new(bx, by, 0.0))
    }

    fn square() -> Vec<Segment> {
        vec![
            seg(0.0, 0.0, 4.0, 0.0),
            seg(4.0, 0.0, 4.0, 4.0),
            seg(4.0, 4.0, 0.0, 4.0),
            seg(0.0, 4.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_validate_ordered_cycle() {
        let input = square();
        let loop_ = validate_loop(&input).unwrap();
        assert_eq!(loop_.segment_count(), input.len());
        assert_eq!(loop_.segments()[0], input[0]);
    }

    #[test]
    fn test_validate_rejects_below_three_segments() {
        // The count check fires before any adjacency test: a single segment
        // and a back-and-forth pair both report the count, not Disconnected.
        let one = vec![seg(0.0, 0.0, 1.0, 0.0)];
        assert!(matches!(
            validate_loop(&one),
            Err(Error::TooFewSegments(1))
        ));

        let two = vec![seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 0.0, 0.0)];
        assert!(matches!(
            validate_loop(&two),
            Err(Error::TooFewSegments(2))
        ));
    }

    #[test]
    fn test_validate_rejects_disconnected() {
        let mut input = square();
        input.swap(1, 2);
        match validate_loop(&input) {
            Err(Error::Disconnected { index }) => assert_eq!(index, 0),
            other => panic!("expected Disconnected, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_length_segment() {
        let input = vec![
            seg(0.0, 0.0, 4.0, 0.0),
            seg(4.0, 0.0, 4.0, 0.0),
            seg(4.0, 0.0, 4.0, 4.0),
            seg(4.0, 4.0, 0.0, 0.0),
        ];
        assert!(matches!(
            validate_loop(&input),
            Err(Error::DegenerateLoop(_))
        ));
    }

    #[test]
    fn test_validate_rejects_crossing_bowtie() {
        // Figure of a bowtie: two segments cross mid-air without a shared vertex
        let input = vec![
            seg(0.0, 0.0, 4.0, 4.0),
            seg(4.0, 4.0, 4.0, 0.0),
            seg(4.0, 0.0, 0.0, 4.0),
            seg(0.0, 4.0, 0.0, 0.0),
        ];
        assert!(matches!(
            validate_loop(&input),
            Err(Error::DegenerateLoop(_))
        ));
    }

    #[test]
    fn test_sort_recovers_shuffled_square() {
        let mut input = square();
        input.swap(0, 2);
        input.swap(1, 3);
        let loop_ = sort_into_loop(&input).unwrap();
        assert_eq!(loop_.segment_count(), 4);
        // Re-validating the produced order must succeed
        assert!(validate_loop(loop_.segments()).is_ok());
    }

    #[test]
    fn test_sort_reverses_flipped_segments() {
        let mut input = square();
        input[1] = input[1].reversed();
        input[3] = input[3].reversed();
        let loop_ = sort_into_loop(&input).unwrap();
        assert_eq!(loop_.segment_count(), 4);
        assert!(validate_loop(loop_.segments()).is_ok());
    }

    #[test]
    fn test_sort_rejects_disconnected_bag() {
        let input = vec![
            seg(0.0, 0.0, 4.0, 0.0),
            seg(4.0, 0.0, 4.0, 4.0),
            // Far-away segment that connects to nothing
            seg(100.0, 100.0, 104.0, 100.0),
        ];
        assert!(matches!(
            sort_into_loop(&input),
            Err(Error::NoConnectingSegment { .. })
        ));
    }

    #[test]
    fn test_sort_rejects_open_chain() {
        let input = vec![
            seg(0.0, 0.0, 4.0, 0.0),
            seg(4.0, 0.0, 4.0, 4.0),
            seg(4.0, 4.0, 0.0, 4.0),
            // Missing the closing edge back to the origin
        ];
        assert!(matches!(sort_into_loop(&input), Err(Error::NotClosed)));
    }

    #[test]
    fn test_greedy_dead_ends_where_backtracking_succeeds() {
        // Two triangle lobes sharing the vertex V = (0, 0). Seeded from AB,
        // the greedy pass reaches V and takes VA first (list order), which
        // strands the second lobe. Backtracking explores the alternative.
        let ab = seg(2.0, 0.0, 1.0, 1.0);
        let va = seg(0.0, 0.0, 2.0, 0.0);
        let bv = seg(1.0, 1.0, 0.0, 0.0);
        let vc = seg(0.0, 0.0, -2.0, 0.0);
        let cd = seg(-2.0, 0.0, -1.0, -1.0);
        let dv = seg(-1.0, -1.0, 0.0, 0.0);
        let input = vec![ab, va, bv, vc, cd, dv];

        assert!(matches!(
            sort_into_loop_with(SortStrategy::Greedy, &input),
            Err(Error::NoConnectingSegment { .. })
        ));

        let loop_ = sort_into_loop_with(SortStrategy::Backtracking, &input).unwrap();
        assert_eq!(loop_.segment_count(), 6);
    }

    #[test]
    fn test_sort_preserves_segment_multiset() {
        let mut input = square();
        input.swap(0, 3);
        input[2] = input[2].reversed();
        let loop_ = sort_into_loop(&input).unwrap();

        // Every input segment appears exactly once, ignoring direction
        for original in &input {
            let found = loop_.segments().iter().any(|s| {
                (points_coincident(&s.start, &original.start)
                    && points_coincident(&s.end, &original.end))
                    || (points_coincident(&s.start, &original.end)
                        && points_coincident(&s.end, &original.start))
            });
            assert!(found, "missing segment {:?}", original);
        }
    }

    #[test]
    fn test_sort_accepts_near_coincident_endpoints() {
        // Endpoints jittered within the geometric tolerance still connect
        let input = vec![
            seg(0.0, 0.0, 4.0, 0.0),
            seg(4.0, 0.0004, 4.0, 4.0),
            seg(4.0, 4.0005, 0.0, 4.0),
            seg(0.0003, 4.0, 0.0, 0.0004),
        ];
        let loop_ = sort_into_loop(&input).unwrap();
        assert_eq!(loop_.segment_count(), 4);
    }
}
