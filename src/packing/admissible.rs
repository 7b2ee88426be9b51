// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Admissibility and quality scoring of candidate placements.
//!
//! A candidate is a circle wedged against two anchors. It is admissible when
//! it lies inside the annulus, does not run ahead of the packed region by more
//! than any single placement could, is not behind the segment's starting ray,
//! and does not overlap any obstacle. Admissible candidates are ranked by
//! their *hole degree* `1 - gap / r`, where `gap` is the distance to the
//! nearest obstacle other than the two anchors. A candidate that also touches
//! a third obstacle fills a hole exactly and scores 1; the more room is left
//! around it the lower it scores; anything above 1 overlaps.

use crate::geometry::constants::{EPS, OVERLAP_HOLE_DEGREE};
use crate::geometry::{Circle, ShapeArena, ShapeId};

/// Fixed parameters of the region a segment is swept into.
#[derive(Debug, Clone)]
pub struct Sweep {
    pub r0: f64,
    pub r1: f64,

    /// Candidates must not start behind this angle.
    pub thetamin: f64,

    /// Largest angle of any circle placed so far (walls count as 0).
    pub max_theta: f64,

    /// Per radius slot, the largest angle a new circle can sit ahead of
    /// `max_theta`.
    pub spans: Vec<f64>,
}

/// Angle between the centers of two abutting circles of combined reach
/// `r + rmax`, both on the innermost centerline available to radius `r`.
///
/// This is the widest angular step one placement can take, so anything
/// further ahead is unreachable and can be pruned.
pub fn max_theta_span(r: f64, rmax: f64, r0: f64) -> f64 {
    let reach = r + rmax;
    let rho = r0 + r;
    (1.0 - reach * reach / (2.0 * rho * rho))
        .clamp(-1.0, 1.0)
        .acos()
}

/// `1 - (smallest gap to an obstacle) / r`, skipping the candidate's own anchors.
///
/// Returns [`OVERLAP_HOLE_DEGREE`] as soon as an overlap beyond `EPS` shows up.
pub fn hole_degree(candidate: &Circle, obstacles: &[ShapeId], arena: &ShapeArena) -> f64 {
    let mut dmin = f64::INFINITY;
    for &id in obstacles {
        if candidate.is_touching(id) {
            continue;
        }
        let d = candidate.distance(arena.get(id));
        dmin = dmin.min(d);
        if dmin < -EPS {
            return OVERLAP_HOLE_DEGREE;
        }
    }
    1.0 - dmin / candidate.r
}

/// The candidate's hole degree if it may be placed, `None` otherwise.
pub fn admissible(
    candidate: &Circle,
    slot: usize,
    obstacles: &[ShapeId],
    arena: &ShapeArena,
    sweep: &Sweep,
) -> Option<f64> {
    let radial = candidate.radial();
    if radial < sweep.r0 + candidate.r - EPS || radial > sweep.r1 - candidate.r + EPS {
        return None;
    }
    let theta = candidate.theta();
    if theta > sweep.max_theta + sweep.spans[slot] + EPS {
        return None;
    }
    if theta < sweep.thetamin - EPS {
        return None;
    }
    let degree = hole_degree(candidate, obstacles, arena);
    (degree < 1.0 + EPS).then_some(degree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Outside, Point, ThetaRay};

    struct Fixture {
        arena: ShapeArena,
        obstacles: Vec<ShapeId>,
        sweep: Sweep,
    }

    fn fixture() -> Fixture {
        let mut arena = ShapeArena::new();
        let inner = arena.push(Circle::wall(4.0));
        let ray = arena.push(ThetaRay::new(4.0, 8.0, 0.0));
        let outer = arena.push(Outside::new(8.0));
        Fixture {
            arena,
            obstacles: vec![inner, ray, outer],
            sweep: Sweep {
                r0: 4.0,
                r1: 8.0,
                thetamin: 0.0,
                max_theta: 0.0,
                spans: vec![max_theta_span(1.0, 1.0, 4.0)],
            },
        }
    }

    #[test]
    fn test_span_matches_abutting_circles() {
        // Two unit circles at radius 5 touch when their centers are 2 apart.
        let span = max_theta_span(1.0, 1.0, 4.0);
        let chord = 2.0 * 5.0 * (span / 2.0).sin();
        assert!((chord - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_span_with_one_radius_is_same_radius_pair() {
        // r = rmax: the pair is two touching circles of radius r on R0 + r.
        for (r, r0) in [(1.0, 3.0), (2.5, 4.0), (0.5, 10.0)] {
            let rho: f64 = r0 + r;
            let same_radius = (1.0 - 2.0 * r * r / (rho * rho)).acos();
            assert!((max_theta_span(r, r, r0) - same_radius).abs() < 1e-12);
        }
        // A larger neighbour only widens the span.
        assert!(max_theta_span(1.0, 3.0, 4.0) > max_theta_span(1.0, 1.0, 4.0));
    }

    #[test]
    fn test_loose_corner_scores_low() {
        let f = fixture();
        // Touches the inner wall and the ray (its anchors) and nothing else.
        let c = Circle::new(1.0, Some(2), Point::from_polar(5.0, 0.0)).with_touching(0, 1);
        let degree = admissible(&c, 0, &f.obstacles, &f.arena, &f.sweep);
        // Gap to the outer wall is 8 - 5 - 1 = 2, so 1 - 2/1 = -1.
        assert_eq!(degree, Some(-1.0));
    }

    #[test]
    fn test_hole_degree_counts_non_anchor_contacts() {
        let mut f = fixture();
        let placed = f
            .arena
            .push(Circle::new(1.0, Some(2), Point::from_polar(5.0, 0.0)));
        f.obstacles.push(placed);
        let c = Circle::new(1.0, Some(2), Point::from_polar(7.0, 0.0)).with_touching(1, 2);
        let degree = hole_degree(&c, &f.obstacles, &f.arena);
        assert!((degree - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_outside_annulus() {
        let f = fixture();
        let c = Circle::new(1.0, Some(2), Point::from_polar(7.5, 0.1));
        assert_eq!(admissible(&c, 0, &f.obstacles, &f.arena, &f.sweep), None);
    }

    #[test]
    fn test_rejects_unreachable_angle() {
        let f = fixture();
        let c = Circle::new(1.0, Some(2), Point::from_polar(6.0, 2.0));
        assert_eq!(admissible(&c, 0, &f.obstacles, &f.arena, &f.sweep), None);
    }

    #[test]
    fn test_rejects_behind_start() {
        let mut f = fixture();
        f.sweep.thetamin = 1.0;
        f.sweep.max_theta = 1.0;
        let c = Circle::new(1.0, Some(2), Point::from_polar(6.0, 0.5));
        assert_eq!(admissible(&c, 0, &f.obstacles, &f.arena, &f.sweep), None);
    }

    #[test]
    fn test_overlap_short_circuits() {
        let mut f = fixture();
        let placed = f
            .arena
            .push(Circle::new(1.0, Some(2), Point::from_polar(6.0, 0.2)));
        f.obstacles.push(placed);
        let c = Circle::new(1.0, Some(2), Point::from_polar(6.0, 0.3));
        assert_eq!(hole_degree(&c, &f.obstacles, &f.arena), OVERLAP_HOLE_DEGREE);
        assert_eq!(admissible(&c, 0, &f.obstacles, &f.arena, &f.sweep), None);
    }
}
