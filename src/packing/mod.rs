// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Packing the discs of one bucket into an annulus.
//!
//! Three strategies are tried in order of preference:
//!
//! 1. **Uniform** ([`ring::uniform_ring`]): one ring with equal gaps, when
//!    everything fits around the inner edge.
//! 2. **Rings** ([`ring::pack_rings`]): several concentric rings, filled
//!    largest radius first.
//! 3. **Segments** ([`annulus::pack_segments`]): greedy corner packing of
//!    same-order runs ([`segment::place_segment`]) into an annulus sized from
//!    an assumed density, backing off until everything fits.

pub mod admissible;
pub mod annulus;
pub mod ring;
pub mod segment;

pub use annulus::{pack_annulus, AnnulusLayout, Strategy};
pub use segment::{place_segment, RadiusGroup, Segment, SegmentOutcome, SegmentWindow};

use std::cmp::Reverse;

use crate::arithmetic::valuation;

/// One conjugacy class to be drawn, as seen by the packer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    /// Class size; equal sizes give bit-identical radii.
    pub size: u64,
    pub order: u64,
    pub radius: f64,
}

impl Disc {
    /// A disc whose area is proportional to the class size.
    pub fn new(size: u64, order: u64) -> Self {
        Self {
            size,
            order,
            radius: (size as f64).sqrt(),
        }
    }
}

/// Sort discs into display order: descending power of 2 in the order, then
/// descending power of 3, then ascending order, then descending size.
///
/// Discs of equal order end up adjacent.
pub fn sort_for_display(discs: &mut [Disc]) {
    discs.sort_by_key(|d| {
        (
            Reverse(valuation(d.order, 2)),
            Reverse(valuation(d.order, 3)),
            d.order,
            Reverse(d.size),
        )
    });
}

/// Largest radius among `discs` (0 when empty).
pub fn max_radius(discs: &[Disc]) -> f64 {
    discs.iter().map(|d| d.radius).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_radius() {
        assert_eq!(Disc::new(9, 2).radius, 3.0);
        assert_eq!(Disc::new(1, 2).radius, 1.0);
    }

    #[test]
    fn test_display_order() {
        let mut discs = vec![
            Disc::new(3, 3),
            Disc::new(2, 2),
            Disc::new(6, 4),
            Disc::new(1, 6),
            Disc::new(8, 2),
            Disc::new(5, 5),
        ];
        sort_for_display(&mut discs);
        let key: Vec<(u64, u64)> = discs.iter().map(|d| (d.order, d.size)).collect();
        assert_eq!(key, vec![(4, 6), (6, 1), (2, 8), (2, 2), (3, 3), (5, 5)]);
    }

    #[test]
    fn test_max_radius() {
        assert_eq!(max_radius(&[]), 0.0);
        assert_eq!(max_radius(&[Disc::new(4, 2), Disc::new(16, 3)]), 4.0);
    }
}
