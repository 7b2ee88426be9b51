// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Ring layouts: discs placed with their centers on concentric circles.
//!
//! Rings need no search. [`uniform_ring`] handles the common case of a bucket
//! small enough to go once around the inner edge of its annulus. When that
//! fails, [`pack_rings`] spreads the discs over several rings, largest radius
//! innermost, so each ring is about as wide as the discs it carries.

use std::f64::consts::TAU;

use tracing::debug;

use crate::config::PackingConfig;
use crate::geometry::constants::EPS;
use crate::geometry::{Circle, Point};
use crate::packing::Disc;

/// Whether every pair of circles is at least tangent (within `EPS`).
pub fn pairwise_disjoint(circles: &[Circle]) -> bool {
    circles.iter().enumerate().all(|(i, a)| {
        circles[i + 1..]
            .iter()
            .all(|b| a.distance_to_circle(b) >= -EPS)
    })
}

/// One ring at radius `r0 + rmax` with equal gaps between neighbours.
///
/// `discs` must already be in display order. The angular width of each disc is
/// estimated as `2 r / Rc`; returns `None` when the estimate does not fit in a
/// full turn or the resulting circles collide.
pub fn uniform_ring(discs: &[Disc], r0: f64, rmax: f64) -> Option<Vec<Circle>> {
    let rc = r0 + rmax;
    let estimate: f64 = discs.iter().map(|d| 2.0 * d.radius / rc).sum();
    if estimate >= TAU {
        return None;
    }
    let gap = (TAU - estimate) / discs.len() as f64;
    let mut theta = 0.0;
    let mut circles = Vec::with_capacity(discs.len());
    for (i, disc) in discs.iter().enumerate() {
        if i > 0 {
            theta += (discs[i - 1].radius + disc.radius) / rc + gap;
        }
        circles.push(Circle::new(
            disc.radius,
            Some(disc.order),
            Point::from_polar(rc, theta),
        ));
    }
    pairwise_disjoint(&circles).then_some(circles)
}

/// Merge groups into one sequence that spreads each group evenly.
///
/// At every step the group furthest behind its fair share
/// (`steps * len / total`) goes next; ties go to the earlier group. With two
/// equal groups this alternates strictly.
pub fn interleave<T>(groups: Vec<Vec<T>>) -> Vec<T> {
    let counts: Vec<i128> = groups.iter().map(|g| g.len() as i128).collect();
    let total: i128 = counts.iter().sum();
    let mut taken = vec![0i128; groups.len()];
    let mut iters: Vec<_> = groups.into_iter().map(Vec::into_iter).collect();
    let mut sequence = Vec::with_capacity(total as usize);
    for step in 1..=total {
        let next = (0..iters.len())
            .filter(|&i| taken[i] < counts[i])
            .max_by(|&i, &j| {
                let score_i = step * counts[i] - taken[i] * total;
                let score_j = step * counts[j] - taken[j] * total;
                score_i.cmp(&score_j).then(j.cmp(&i))
            });
        let Some(i) = next else {
            break;
        };
        if let Some(item) = iters[i].next() {
            sequence.push(item);
        }
        taken[i] += 1;
    }
    sequence
}

/// Discs of one radius, interleaved by order so colors spread out.
#[derive(Debug, Clone)]
pub struct RadiusClass {
    pub radius: f64,
    pub discs: Vec<Disc>,
}

/// Group display-sorted discs by size, largest first.
pub fn radius_classes(discs: &[Disc]) -> Vec<RadiusClass> {
    let mut sizes: Vec<u64> = discs.iter().map(|d| d.size).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes.dedup();
    sizes
        .into_iter()
        .map(|size| {
            let mut by_order: Vec<Vec<Disc>> = Vec::new();
            for disc in discs.iter().filter(|d| d.size == size) {
                match by_order.iter_mut().find(|run| run[0].order == disc.order) {
                    Some(run) => run.push(*disc),
                    None => by_order.push(vec![*disc]),
                }
            }
            RadiusClass {
                radius: (size as f64).sqrt(),
                discs: interleave(by_order),
            }
        })
        .collect()
}

/// Angle taken up by a disc of radius `r` among equal neighbours on a ring of
/// radius `rc`.
pub fn chord_angle(r: f64, rc: f64) -> f64 {
    (1.0 - 2.0 * r * r / (rc * rc)).clamp(-1.0, 1.0).acos()
}

/// The discs assigned to one ring.
#[derive(Debug, Clone)]
pub struct RingPlan {
    /// Inner edge of the ring.
    pub inner: f64,
    /// Radius of the largest (first) disc, half the ring's width.
    pub rmax: f64,
    /// Estimated angle used so far.
    used: f64,
    /// Portions of radius classes, largest radius first.
    members: Vec<(usize, Vec<Disc>)>,
}

impl RingPlan {
    fn new(inner: f64, rmax: f64) -> Self {
        Self {
            inner,
            rmax,
            used: 0.0,
            members: Vec::new(),
        }
    }

    pub fn centerline(&self) -> f64 {
        self.inner + self.rmax
    }

    pub fn outer(&self) -> f64 {
        self.inner + 2.0 * self.rmax
    }

    pub fn len(&self) -> usize {
        self.members.iter().map(|(_, discs)| discs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn cost(&self, r: f64, slack: f64) -> f64 {
        slack * chord_angle(r, self.centerline())
    }

    fn add(&mut self, class: usize, disc: Disc, slack: f64) {
        self.used += self.cost(disc.radius, slack);
        match self.members.last_mut() {
            Some((c, discs)) if *c == class => discs.push(disc),
            _ => self.members.push((class, vec![disc])),
        }
    }

    /// Disc order around the ring, large and small alternating.
    fn sequence(&self) -> Vec<Disc> {
        interleave(self.members.iter().map(|(_, d)| d.clone()).collect())
    }
}

/// Fill rings outward from `r0`, largest radius first.
///
/// Each disc costs `slack` times its chord angle on the ring's centerline; a
/// disc that would push the ring past a full turn starts the next ring.
pub fn allocate_rings(classes: &[RadiusClass], r0: f64, slack: f64) -> Vec<RingPlan> {
    let mut rings: Vec<RingPlan> = Vec::new();
    for (index, class) in classes.iter().enumerate() {
        for disc in &class.discs {
            let full = match rings.last() {
                Some(ring) => ring.used + ring.cost(disc.radius, slack) > TAU,
                None => true,
            };
            if full {
                let inner = rings.last().map_or(r0, RingPlan::outer);
                rings.push(RingPlan::new(inner, disc.radius));
            }
            if let Some(ring) = rings.last_mut() {
                ring.add(index, *disc, slack);
            }
        }
    }
    rings
}

/// Centers for one ring, or `None` if its discs do not fit around it.
///
/// Equal spacing is used when every neighbouring pair clears the equal-spacing
/// chord; otherwise each pair gets its exact tangency angle plus an equal share
/// of the leftover.
pub fn place_ring(plan: &RingPlan) -> Option<Vec<Circle>> {
    let sequence = plan.sequence();
    let n = sequence.len();
    let rc = plan.centerline();
    let neighbours = |i: usize| (sequence[i].radius, sequence[(i + 1) % n].radius);

    let thetas: Vec<f64> = if n <= 1 {
        vec![0.0; n]
    } else {
        let step = TAU / n as f64;
        let chord = 2.0 * rc * (step / 2.0).sin();
        if (0..n).all(|i| {
            let (a, b) = neighbours(i);
            a + b <= chord + EPS
        }) {
            (0..n).map(|i| i as f64 * step).collect()
        } else {
            let gaps: Vec<f64> = (0..n)
                .map(|i| {
                    let (a, b) = neighbours(i);
                    2.0 * ((a + b) / (2.0 * rc)).min(1.0).asin()
                })
                .collect();
            let total: f64 = gaps.iter().sum();
            if total > TAU + EPS {
                return None;
            }
            let spare = (TAU - total) / n as f64;
            let mut theta = 0.0;
            let mut thetas = Vec::with_capacity(n);
            for gap in &gaps {
                thetas.push(theta);
                theta += gap + spare;
            }
            thetas
        }
    };

    let circles: Vec<Circle> = sequence
        .iter()
        .zip(thetas)
        .map(|(disc, theta)| {
            Circle::new(disc.radius, Some(disc.order), Point::from_polar(rc, theta))
        })
        .collect();
    pairwise_disjoint(&circles).then_some(circles)
}

/// Result of [`pack_rings`].
#[derive(Debug, Clone)]
pub struct RingLayout {
    pub circles: Vec<Circle>,
    pub outer_radius: f64,
    pub rings: usize,
}

/// Concentric rings starting at `r0`, or `None` if none of the attempts work
/// within `config.max_rings` rings.
///
/// Every failed attempt inflates the estimated footprint of each disc by
/// `config.ring_slack_step`, which only ever moves discs outward.
pub fn pack_rings(discs: &[Disc], r0: f64, config: &PackingConfig) -> Option<RingLayout> {
    let classes = radius_classes(discs);
    for attempt in 0..config.max_ring_attempts {
        let slack = 1.0 + attempt as f64 * config.ring_slack_step;
        let plans = allocate_rings(&classes, r0, slack);
        if plans.len() > config.max_rings {
            debug!(
                rings = plans.len(),
                max_rings = config.max_rings,
                "ring layout needs too many rings"
            );
            return None;
        }
        let mut circles = Vec::with_capacity(discs.len());
        let mut placed_all = true;
        for plan in &plans {
            match place_ring(plan) {
                Some(ring) => circles.extend(ring),
                None => {
                    placed_all = false;
                    break;
                }
            }
        }
        if placed_all {
            return Some(RingLayout {
                circles,
                outer_radius: plans.last().map_or(r0, RingPlan::outer),
                rings: plans.len(),
            });
        }
        debug!(attempt, slack, "ring layout collided; relaxing slack");
    }
    None
}
