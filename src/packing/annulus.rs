// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Packing one bucket into one annulus.

use tracing::debug;

use crate::config::PackingConfig;
use crate::error::{PackingError, Result};
use crate::geometry::Circle;
use crate::packing::ring::{pack_rings, uniform_ring};
use crate::packing::segment::{place_segment, Segment, SegmentWindow};
use crate::packing::{sort_for_display, Disc};

/// Which layout produced an annulus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// A single ring with equal gaps.
    Uniform,
    /// Several concentric rings.
    Rings { rings: usize },
    /// Greedy segment packing at the given assumed density.
    Segments { attempts: usize, density: f64 },
}

#[derive(Debug, Clone)]
pub struct AnnulusLayout {
    pub circles: Vec<Circle>,
    pub outer_radius: f64,
    pub strategy: Strategy,
}

/// Pack `discs` into an annulus with inner radius `r0`.
///
/// Tries the uniform ring, then concentric rings, then segment packing;
/// only the last of these can fail.
pub fn pack_annulus(
    mut discs: Vec<Disc>,
    r0: f64,
    rmax: f64,
    config: &PackingConfig,
) -> Result<AnnulusLayout> {
    if discs.is_empty() {
        return Ok(AnnulusLayout {
            circles: Vec::new(),
            outer_radius: r0,
            strategy: Strategy::Uniform,
        });
    }
    sort_for_display(&mut discs);

    if let Some(circles) = uniform_ring(&discs, r0, rmax) {
        return Ok(AnnulusLayout {
            circles,
            outer_radius: r0 + 2.0 * rmax,
            strategy: Strategy::Uniform,
        });
    }

    if let Some(layout) = pack_rings(&discs, r0, config) {
        return Ok(AnnulusLayout {
            circles: layout.circles,
            outer_radius: layout.outer_radius,
            strategy: Strategy::Rings {
                rings: layout.rings,
            },
        });
    }

    pack_segments(&discs, r0, rmax, config)
}

/// Pack `discs` segment by segment, lowering the assumed density until every
/// segment fits.
///
/// The outer radius is chosen so the annulus area is the total disc area
/// divided by the density, but never narrower than the largest disc.
///
/// Requires `r0 >= rmax`. A narrower inner wall lets the early segments use
/// up the full turn along it, after which widening the annulus gives the
/// remaining segments no angular room, so the call is rejected up front.
pub fn pack_segments(
    discs: &[Disc],
    r0: f64,
    rmax: f64,
    config: &PackingConfig,
) -> Result<AnnulusLayout> {
    if r0 < rmax {
        return Err(PackingError::InvalidInput(format!(
            "inner radius {} is smaller than the largest disc radius {}",
            r0, rmax
        )));
    }
    let segments = Segment::split(discs);
    let area: f64 = discs.iter().map(|d| d.radius * d.radius).sum();
    let mut density = config.initial_density;
    let mut attempts = 0;

    while attempts < config.max_density_attempts && density > config.density_floor {
        attempts += 1;
        let mut r1 = (r0 * r0 + area / density).sqrt();
        let squeezed = r1 < r0 + 2.0 * rmax;
        if squeezed {
            r1 = r0 + 2.0 * rmax;
        }

        if let Some(circles) = place_all(&segments, r0, r1, rmax) {
            return Ok(AnnulusLayout {
                circles,
                outer_radius: r1,
                strategy: Strategy::Segments { attempts, density },
            });
        }

        debug!(attempts, density, r1, squeezed, "segment packing failed; lowering density");
        if squeezed {
            // Density the minimum width actually gives.
            density = area / (4.0 * rmax * (r0 + rmax));
        }
        density -= config.density_step;
    }

    Err(PackingError::PackingInfeasible {
        circles: discs.len(),
        inner_radius: r0,
        attempts,
    })
}

/// One pass over all segments of the annulus `[r0, r1]`.
fn place_all(segments: &[Segment], r0: f64, r1: f64, rmax: f64) -> Option<Vec<Circle>> {
    let mut placed: Vec<Circle> = Vec::new();
    let mut thetamin = 0.0;
    for (i, segment) in segments.iter().enumerate() {
        let window = SegmentWindow {
            r0,
            r1,
            thetamin,
            rmax,
        };
        let outcome = place_segment(segment, &window, &placed, i + 1 == segments.len());
        if !outcome.success {
            return None;
        }
        thetamin = outcome
            .placed
            .iter()
            .map(Circle::theta)
            .fold(thetamin, f64::max);
        placed.extend(outcome.placed);
    }
    Some(placed)
}
