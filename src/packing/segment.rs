// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Greedy corner packing of one segment of an annulus.
//!
//! A segment is a run of discs of one order, possibly of several radii. They
//! are packed into the annulus `[r0, r1]`, sweeping counterclockwise from the
//! ray at `thetamin`, around the circles already placed by earlier segments.
//!
//! # Algorithm
//!
//! 1. The walls (inner circle, outer boundary, starting ray) and the nearby
//!    prior circles form the *constructive* anchors.
//! 2. Every pair of constructive anchors yields up to two *corners* per
//!    outstanding radius: circles tangent to both (see
//!    [`find_touching_centers`]). Admissible corners become candidates.
//! 3. Repeatedly commit the candidate with the highest hole degree, prune the
//!    candidates it invalidates, and add the corners it forms with every other
//!    constructive anchor.
//!
//! The segment succeeds once every disc is placed and fails when the
//! candidates run out first.

use std::cmp::Ordering;

use tracing::trace;

use crate::geometry::constants::EPS;
use crate::geometry::{find_touching_centers, Circle, Outside, ShapeArena, ShapeId, ThetaRay};
use crate::packing::admissible::{admissible, max_theta_span, Sweep};
use crate::packing::Disc;

/// `count` discs of one radius.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusGroup {
    pub size: u64,
    pub radius: f64,
    pub count: usize,
}

/// A run of same-order discs to be packed together.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub order: u64,
    pub groups: Vec<RadiusGroup>,
}

impl Segment {
    /// Split display-sorted discs into maximal runs of equal order.
    ///
    /// Within a run, radius groups keep the order in which sizes first appear.
    pub fn split(discs: &[Disc]) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();
        for disc in discs {
            if segments.last().map_or(true, |s| s.order != disc.order) {
                segments.push(Segment {
                    order: disc.order,
                    groups: Vec::new(),
                });
            }
            let Some(segment) = segments.last_mut() else {
                continue;
            };
            match segment.groups.iter_mut().find(|g| g.size == disc.size) {
                Some(group) => group.count += 1,
                None => segment.groups.push(RadiusGroup {
                    size: disc.size,
                    radius: disc.radius,
                    count: 1,
                }),
            }
        }
        segments
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_radius(&self) -> f64 {
        self.groups.iter().map(|g| g.radius).fold(0.0, f64::max)
    }
}

/// Where a segment goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentWindow {
    pub r0: f64,
    pub r1: f64,
    pub thetamin: f64,

    /// Largest radius anywhere in the annulus.
    pub rmax: f64,
}

/// Result of [`place_segment`]; `placed` holds whatever was committed, even
/// on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOutcome {
    pub success: bool,
    pub placed: Vec<Circle>,
}

/// A corner that passed the admissibility test, with its cached hole degree.
#[derive(Debug, Clone)]
struct Candidate {
    circle: Circle,
    slot: usize,
    hole_degree: f64,
}

/// Working state of one segment.
struct SegmentPacker<'a> {
    segment: &'a Segment,
    arena: ShapeArena,
    /// Anchors new corners may be built against.
    constructive: Vec<ShapeId>,
    /// Everything a candidate must not overlap.
    obstacles: Vec<ShapeId>,
    sweep: Sweep,
    remaining: Vec<usize>,
    candidates: Vec<Candidate>,
    placed: Vec<Circle>,
}

/// Pack `segment` into `window`, around the `prior` circles of this annulus.
///
/// `last` marks the segment that closes the ring: prior circles near angle 0
/// then become anchors rather than mere obstacles.
pub fn place_segment(
    segment: &Segment,
    window: &SegmentWindow,
    prior: &[Circle],
    last: bool,
) -> SegmentOutcome {
    let mut packer = SegmentPacker::new(segment, window, prior, last);
    packer.seed();
    packer.run();
    SegmentOutcome {
        success: packer.remaining.iter().all(|&n| n == 0),
        placed: packer.placed,
    }
}

impl<'a> SegmentPacker<'a> {
    fn new(segment: &'a Segment, window: &SegmentWindow, prior: &[Circle], last: bool) -> Self {
        let mut arena = ShapeArena::new();
        let inner = arena.push(Circle::wall(window.r0));
        let start_ray = ThetaRay::new(window.r0, window.r1, window.thetamin);
        let start = arena.push(start_ray);
        let outer = arena.push(Outside::new(window.r1));
        let end_ray = ThetaRay::new(window.r0, window.r1, 0.0);

        let mut constructive = vec![inner, start, outer];
        let mut obstacles = constructive.clone();
        let mut max_theta: f64 = 0.0;

        // Prior circles far from both rays cannot interact with this segment.
        let reach = segment.max_radius();
        for circle in prior {
            let near_start = start_ray.distance(circle) < circle.r + reach;
            let near_end = end_ray.distance(circle) < circle.r + reach;
            if !near_start && !near_end {
                continue;
            }
            let id = arena.push(circle.detached());
            obstacles.push(id);
            max_theta = max_theta.max(circle.theta());
            if near_start || last {
                constructive.push(id);
            }
        }

        let spans = segment
            .groups
            .iter()
            .map(|g| max_theta_span(g.radius, window.rmax, window.r0))
            .collect();

        Self {
            segment,
            arena,
            constructive,
            obstacles,
            sweep: Sweep {
                r0: window.r0,
                r1: window.r1,
                thetamin: window.thetamin,
                max_theta,
                spans,
            },
            remaining: segment.groups.iter().map(|g| g.count).collect(),
            candidates: Vec::new(),
            placed: Vec::with_capacity(segment.len()),
        }
    }

    fn outstanding(&self) -> Vec<usize> {
        (0..self.remaining.len())
            .filter(|&slot| self.remaining[slot] > 0)
            .collect()
    }

    /// Add the admissible corners of `a` and `b` for every outstanding radius.
    fn add_corners(&mut self, a: ShapeId, b: ShapeId, slots: &[usize]) {
        for &slot in slots {
            let radius = self.segment.groups[slot].radius;
            for circle in
                find_touching_centers(&self.arena, a, b, radius, Some(self.segment.order))
            {
                if let Some(hole_degree) =
                    admissible(&circle, slot, &self.obstacles, &self.arena, &self.sweep)
                {
                    self.candidates.push(Candidate {
                        circle,
                        slot,
                        hole_degree,
                    });
                }
            }
        }
    }

    fn seed(&mut self) {
        let slots = self.outstanding();
        let anchors = self.constructive.clone();
        for (i, &a) in anchors.iter().enumerate() {
            for &b in &anchors[i + 1..] {
                self.add_corners(a, b, &slots);
            }
        }
    }

    /// Index of the snuggest candidate; near-ties go to the lowest angle,
    /// then the smallest radius.
    fn best_candidate(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, candidate) in self.candidates.iter().enumerate() {
            let Some(b) = best else {
                best = Some(i);
                continue;
            };
            let current = &self.candidates[b];
            let better = if candidate.hole_degree > current.hole_degree + EPS {
                true
            } else if candidate.hole_degree < current.hole_degree - EPS {
                false
            } else {
                candidate
                    .circle
                    .theta()
                    .total_cmp(&current.circle.theta())
                    .then_with(|| candidate.circle.r.total_cmp(&current.circle.r))
                    == Ordering::Less
            };
            if better {
                best = Some(i);
            }
        }
        best
    }

    fn run(&mut self) {
        while self.remaining.iter().any(|&n| n > 0) {
            let Some(index) = self.best_candidate() else {
                break;
            };
            let best = self.candidates.remove(index);
            self.commit(best);
        }
    }

    fn commit(&mut self, best: Candidate) {
        trace!(
            order = self.segment.order,
            r = best.circle.r,
            radial = best.circle.radial(),
            theta = best.circle.theta(),
            hole_degree = best.hole_degree,
            "placed circle"
        );
        let id = self.arena.push(best.circle);
        self.constructive.push(id);
        self.obstacles.push(id);
        self.sweep.max_theta = self.sweep.max_theta.max(best.circle.theta());
        self.placed.push(best.circle.detached());

        self.remaining[best.slot] -= 1;
        if self.remaining[best.slot] == 0 {
            self.candidates.retain(|c| c.slot != best.slot);
        }

        // The new circle may invalidate candidates or tighten their fit.
        self.candidates.retain_mut(|c| {
            let d = c.circle.distance_to_circle(&best.circle);
            if d < 0.0 {
                false
            } else {
                c.hole_degree = c.hole_degree.max(1.0 - d / c.circle.r);
                true
            }
        });

        let slots = self.outstanding();
        if slots.is_empty() {
            return;
        }
        let anchors: Vec<ShapeId> = self
            .constructive
            .iter()
            .copied()
            .filter(|&a| a != id)
            .collect();
        for a in anchors {
            self.add_corners(a, id, &slots);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(placed: &[Circle], window: &SegmentWindow, prior: &[Circle]) {
        for (i, a) in placed.iter().enumerate() {
            assert!(a.in_annulus(window.r0, window.r1), "circle {} leaves annulus", i);
            for b in placed.iter().skip(i + 1).chain(prior) {
                assert!(a.distance_to_circle(b) > -1e-7, "circle {} overlaps", i);
            }
        }
    }

    #[test]
    fn test_split_runs_by_order() {
        let discs = vec![
            Disc::new(4, 2),
            Disc::new(4, 2),
            Disc::new(1, 2),
            Disc::new(2, 4),
            Disc::new(3, 2),
        ];
        let segments = Segment::split(&discs);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].order, 2);
        assert_eq!(segments[0].groups.len(), 2);
        assert_eq!(segments[0].groups[0].count, 2);
        assert_eq!(segments[0].len(), 3);
        assert_eq!(segments[1].order, 4);
        assert_eq!(segments[2].order, 2);
        assert_eq!(segments[2].max_radius(), 3f64.sqrt());
    }

    #[test]
    fn test_single_circle_sits_in_first_corner() {
        let segment = Segment::split(&[Disc::new(1, 2)]).remove(0);
        let window = SegmentWindow {
            r0: 3.0,
            r1: 5.0,
            thetamin: 0.0,
            rmax: 1.0,
        };
        let outcome = place_segment(&segment, &window, &[], true);
        assert!(outcome.success);
        assert_eq!(outcome.placed.len(), 1);
        let c = &outcome.placed[0];
        assert!((c.radial() - 4.0).abs() < 1e-9);
        assert!(c.theta().abs() < 1e-9);
        assert_eq!(c.order, Some(2));
    }

    #[test]
    fn test_packs_several_radii() {
        let discs: Vec<Disc> = [9, 4, 4, 1, 1, 1]
            .iter()
            .map(|&size| Disc::new(size, 3))
            .collect();
        let segment = Segment::split(&discs).remove(0);
        let window = SegmentWindow {
            r0: 4.0,
            r1: 12.0,
            thetamin: 0.0,
            rmax: 3.0,
        };
        let outcome = place_segment(&segment, &window, &[], true);
        assert!(outcome.success);
        assert_eq!(outcome.placed.len(), 6);
        assert_valid(&outcome.placed, &window, &[]);
    }

    #[test]
    fn test_respects_prior_circles() {
        let first = Segment::split(&[Disc::new(4, 2), Disc::new(4, 2)]).remove(0);
        let window = SegmentWindow {
            r0: 3.0,
            r1: 9.0,
            thetamin: 0.0,
            rmax: 2.0,
        };
        let first_outcome = place_segment(&first, &window, &[], false);
        assert!(first_outcome.success);

        let thetamin = first_outcome
            .placed
            .iter()
            .map(Circle::theta)
            .fold(0.0, f64::max);
        let second = Segment::split(&[Disc::new(4, 3), Disc::new(1, 3)]).remove(0);
        let window = SegmentWindow { thetamin, ..window };
        let outcome = place_segment(&second, &window, &first_outcome.placed, true);
        assert!(outcome.success);
        assert_valid(&outcome.placed, &window, &first_outcome.placed);
        for c in &outcome.placed {
            assert!(c.theta() >= thetamin - 1e-9);
        }
    }

    #[test]
    fn test_fails_when_annulus_is_too_small() {
        let discs: Vec<Disc> = (0..40).map(|_| Disc::new(1, 2)).collect();
        let segment = Segment::split(&discs).remove(0);
        let window = SegmentWindow {
            r0: 1.0,
            r1: 3.0,
            thetamin: 0.0,
            rmax: 1.0,
        };
        let outcome = place_segment(&segment, &window, &[], true);
        assert!(!outcome.success);
        assert!(outcome.placed.len() < 40);
        assert_valid(&outcome.placed, &window, &[]);
    }
}
