// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Points in the plane, built either from Cartesian or polar coordinates.
//!
//! The packer constructs centers both ways: tangency with another circle is
//! naturally Cartesian, tangency with a ray is naturally polar. A `Point`
//! remembers which form it was built from and computes the other form eagerly,
//! so the accessors are plain field reads.

use std::f64::consts::TAU;

/// How a point was constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateForm {
    Cartesian,
    Polar,
}

/// A point with both coordinate forms available.
///
/// `theta` is always normalized into `[0, 2pi)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
    radius: f64,
    theta: f64,
    form: CoordinateForm,
}

/// Normalize an angle into `[0, 2pi)`.
pub fn normalize_angle(theta: f64) -> f64 {
    let t = theta.rem_euclid(TAU);
    if t >= TAU {
        0.0
    } else {
        t
    }
}

impl Point {
    pub const ORIGIN: Point = Point {
        x: 0.0,
        y: 0.0,
        radius: 0.0,
        theta: 0.0,
        form: CoordinateForm::Cartesian,
    };

    pub fn from_cartesian(x: f64, y: f64) -> Self {
        let theta = if x == 0.0 && y == 0.0 {
            0.0
        } else {
            normalize_angle(y.atan2(x))
        };
        Self {
            x,
            y,
            radius: x.hypot(y),
            theta,
            form: CoordinateForm::Cartesian,
        }
    }

    /// Build from distance to the origin and angle.
    ///
    /// # Panics
    ///
    /// Debug builds panic if `radius` is negative.
    pub fn from_polar(radius: f64, theta: f64) -> Self {
        debug_assert!(radius >= 0.0, "negative polar radius: {}", radius);
        let theta = normalize_angle(theta);
        Self {
            x: radius * theta.cos(),
            y: radius * theta.sin(),
            radius,
            theta,
            form: CoordinateForm::Polar,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Distance from the origin.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn form(&self) -> CoordinateForm {
        self.form
    }

    /// Euclidean distance, computed in whichever form both points share.
    pub fn distance(&self, other: &Point) -> f64 {
        match (self.form, other.form) {
            (CoordinateForm::Polar, CoordinateForm::Polar) => polar_distance(
                self.radius,
                self.theta,
                other.radius,
                other.theta,
            ),
            _ => (self.x - other.x).hypot(self.y - other.y),
        }
    }
}

/// Law of cosines distance between `(r1, t1)` and `(r2, t2)`.
pub(crate) fn polar_distance(r1: f64, t1: f64, r2: f64, t2: f64) -> f64 {
    (r1 * r1 + r2 * r2 - 2.0 * r1 * r2 * (t1 - t2).cos())
        .max(0.0)
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOL: f64 = 1e-12;

    #[test]
    fn test_cartesian_to_polar() {
        let p = Point::from_cartesian(0.0, 2.0);
        assert!((p.radius() - 2.0).abs() < TOL);
        assert!((p.theta() - FRAC_PI_2).abs() < TOL);
        assert_eq!(p.form(), CoordinateForm::Cartesian);

        let q = Point::from_cartesian(-1.0, 0.0);
        assert!((q.theta() - PI).abs() < TOL);
    }

    #[test]
    fn test_negative_angles_wrap() {
        let p = Point::from_cartesian(1.0, -1.0);
        assert!((p.theta() - 7.0 * PI / 4.0).abs() < TOL);

        let q = Point::from_polar(1.0, -FRAC_PI_2);
        assert!((q.theta() - 3.0 * FRAC_PI_2).abs() < TOL);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = Point::from_polar(2.0, PI);
        assert!((p.x() + 2.0).abs() < TOL);
        assert!(p.y().abs() < TOL);
        assert_eq!(p.form(), CoordinateForm::Polar);
    }

    #[test]
    fn test_origin() {
        let p = Point::from_cartesian(0.0, 0.0);
        assert_eq!(p.theta(), 0.0);
        assert_eq!(p.radius(), 0.0);
    }

    #[test]
    fn test_distance_agrees_between_forms() {
        let a = Point::from_polar(3.0, 0.4);
        let b = Point::from_polar(5.0, 1.9);
        let a_xy = Point::from_cartesian(a.x(), a.y());
        let b_xy = Point::from_cartesian(b.x(), b.y());
        assert!((a.distance(&b) - a_xy.distance(&b_xy)).abs() < 1e-9);
        assert!((a.distance(&b_xy) - a_xy.distance(&b)).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!((normalize_angle(TAU + 1.0) - 1.0).abs() < TOL);
        assert!(normalize_angle(-1e-300) < TAU);
    }
}
