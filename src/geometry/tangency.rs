// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tangency solver: circles of a given radius touching two anchors at once.
//!
//! Every candidate placement in the segment packer is a "corner": a circle
//! wedged against two anchors. The cases are:
//!
//! | anchors           | constraint on the new center `P`                   |
//! |-------------------|----------------------------------------------------|
//! | Circle, Circle    | `|P - A| = r + rA`, `|P - B| = r + rB`             |
//! | Circle, Outside   | `|P - A| = r + rA`, `|P| = R1 - r`                 |
//! | Circle, ThetaRay  | `P` on the ray, `|P - A| = r + rA`                 |
//! | ThetaRay, Outside | `P` on the ray, `|P| = R1 - r`                     |
//!
//! Two rays, or the outer wall with itself, have no isolated solutions.

use std::cmp::Ordering;

use crate::geometry::constants::EPS;
use crate::geometry::point::Point;
use crate::geometry::shape::{Circle, Outside, Shape, ShapeArena, ShapeId, ThetaRay};

/// All circles of radius `r` tangent to both `a` and `b`.
///
/// Returns 0, 1 or 2 circles, each recording `[a, b]` as its touching anchors
/// (in a canonical order). Swapping `a` and `b` yields exactly the same result.
pub fn find_touching_centers(
    arena: &ShapeArena,
    a: ShapeId,
    b: ShapeId,
    r: f64,
    order: Option<u64>,
) -> Vec<Circle> {
    let (a, b) = canonical_pair(arena, a, b);
    let centers = match (arena.get(a), arena.get(b)) {
        (Shape::Circle(ca), Shape::Circle(cb)) => {
            intersect_circles(&ca.center, ca.r + r, &cb.center, cb.r + r)
        }
        (Shape::Circle(circle), Shape::Ray(ray)) => centers_on_ray(circle, ray, r),
        (Shape::Circle(circle), Shape::Outside(outside)) => {
            centers_inside_wall(circle, outside, r)
        }
        (Shape::Ray(ray), Shape::Outside(outside)) => {
            let radial = outside.r - r;
            if radial > 0.0 {
                vec![Point::from_polar(radial, ray.theta)]
            } else {
                vec![]
            }
        }
        _ => vec![],
    };
    centers
        .into_iter()
        .map(|center| Circle::new(r, order, center).with_touching(a, b))
        .collect()
}

fn kind_rank(shape: &Shape) -> u8 {
    match shape {
        Shape::Circle(_) => 0,
        Shape::Ray(_) => 1,
        Shape::Outside(_) => 2,
    }
}

/// Order a pair so the solver always sees the same arguments.
fn canonical_pair(arena: &ShapeArena, a: ShapeId, b: ShapeId) -> (ShapeId, ShapeId) {
    let (sa, sb) = (arena.get(a), arena.get(b));
    let ordering = kind_rank(sa).cmp(&kind_rank(sb)).then_with(|| match (sa, sb) {
        (Shape::Circle(ca), Shape::Circle(cb)) => ca
            .center
            .x()
            .total_cmp(&cb.center.x())
            .then_with(|| ca.center.y().total_cmp(&cb.center.y()))
            .then_with(|| ca.r.total_cmp(&cb.r)),
        _ => Ordering::Equal,
    });
    match ordering.then_with(|| a.cmp(&b)) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    }
}

/// Points at distance `d1` from `p1` and `d2` from `p2`.
fn intersect_circles(p1: &Point, d1: f64, p2: &Point, d2: f64) -> Vec<Point> {
    if d1 <= 0.0 || d2 <= 0.0 {
        return vec![];
    }
    let dx = p2.x() - p1.x();
    let dy = p2.y() - p1.y();
    let a = dx * dx + dy * dy;
    let d = a.sqrt();
    if d < EPS {
        // Concentric: either nothing or a whole circle of solutions.
        return vec![];
    }
    if d > d1 + d2 + EPS || d < (d1 - d2).abs() - EPS {
        return vec![];
    }
    if (d - (d1 + d2)).abs() < EPS {
        let t = d1 / d;
        return vec![Point::from_cartesian(p1.x() + dx * t, p1.y() + dy * t)];
    }
    if (d - (d1 - d2).abs()).abs() < EPS {
        let t = if d1 >= d2 { d1 / d } else { -d1 / d };
        return vec![Point::from_cartesian(p1.x() + dx * t, p1.y() + dy * t)];
    }

    // Shift to p2 as origin; subtracting the two circle equations leaves the
    // line  x' dx + y' dy = e.  Eliminate the coordinate with the larger
    // separation (it is the safe divisor) and solve the quadratic in the other.
    let e = (d1 * d1 - d2 * d2 - a) / 2.0;
    let (sep_major, sep_minor) = if dx.abs() < dy.abs() { (dy, dx) } else { (dx, dy) };
    let b = -2.0 * e * sep_minor;
    let c = e * e - (d2 * sep_major) * (d2 * sep_major);
    let Some(root) = discriminant_root(b * b - 4.0 * a * c, b * b + (4.0 * a * c).abs()) else {
        return vec![];
    };
    let roots = if root == 0.0 {
        vec![-b / (2.0 * a)]
    } else {
        vec![-(b + root) / (2.0 * a), -(b - root) / (2.0 * a)]
    };
    roots
        .into_iter()
        .map(|minor| {
            let major = (e - minor * sep_minor) / sep_major;
            if dx.abs() < dy.abs() {
                Point::from_cartesian(p2.x() + minor, p2.y() + major)
            } else {
                Point::from_cartesian(p2.x() + major, p2.y() + minor)
            }
        })
        .collect()
}

/// Square root of a discriminant, treating eps-scale negatives as zero.
fn discriminant_root(discriminant: f64, scale: f64) -> Option<f64> {
    if discriminant >= 0.0 {
        Some(discriminant.sqrt())
    } else if discriminant >= -EPS * scale.max(1.0) {
        Some(0.0)
    } else {
        None
    }
}

/// Centers on `ray` at distance `circle.r + r` from the center of `circle`.
fn centers_on_ray(circle: &Circle, ray: &ThetaRay, r: f64) -> Vec<Point> {
    // R^2 + Rc^2 - 2 R Rc cos(theta - theta_c) = (rc + r)^2
    let rc = circle.radial();
    let reach = circle.r + r;
    let b = -2.0 * rc * (ray.theta - circle.theta()).cos();
    let c = rc * rc - reach * reach;
    let Some(root) = discriminant_root(b * b - 4.0 * c, b * b + (4.0 * c).abs()) else {
        return vec![];
    };
    if root == 0.0 {
        let radial = -b / 2.0;
        return if radial < 0.0 {
            vec![]
        } else {
            vec![Point::from_polar(radial, ray.theta)]
        };
    }
    let far = (-b + root) / 2.0;
    let near = (-b - root) / 2.0;
    if far < 0.0 {
        vec![]
    } else if near < 0.0 {
        vec![Point::from_polar(far, ray.theta)]
    } else {
        vec![
            Point::from_polar(near, ray.theta),
            Point::from_polar(far, ray.theta),
        ]
    }
}

/// Centers at distance `circle.r + r` from `circle`, touching the wall from inside.
fn centers_inside_wall(circle: &Circle, outside: &Outside, r: f64) -> Vec<Point> {
    intersect_circles(&Point::ORIGIN, outside.r - r, &circle.center, circle.r + r)
}
