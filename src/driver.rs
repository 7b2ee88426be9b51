// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! From conjugacy-class data to a finished packing diagram.
//!
//! The identity sits alone at the origin. Every other class is bucketed by
//! the number of prime factors of its order (with multiplicity), and each
//! bucket gets its own annulus, nested in increasing order of that count.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::arithmetic::prime_omega;
use crate::color::{ColorCache, Rgb};
use crate::config::PackingConfig;
use crate::error::{PackingError, Result};
use crate::packing::{max_radius, pack_annulus, Disc};

/// Size and element order of one conjugacy class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConjugacyClass {
    pub size: u64,
    pub order: u64,
}

impl ConjugacyClass {
    pub fn new(size: u64, order: u64) -> Self {
        Self { size, order }
    }

    pub fn is_identity(&self) -> bool {
        self.order == 1
    }
}

impl From<(u64, u64)> for ConjugacyClass {
    fn from((size, order): (u64, u64)) -> Self {
        Self::new(size, order)
    }
}

/// One drawn circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedCircle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub color: Rgb,
}

/// A finished diagram. Every circle lies inside the square
/// `[-outer_radius, outer_radius]^2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packing {
    pub circles: Vec<PlacedCircle>,
    pub outer_radius: f64,
}

/// Pack `classes` with the default configuration.
pub fn find_packing(classes: &[ConjugacyClass]) -> Result<Packing> {
    find_packing_with(classes, &PackingConfig::default())
}

/// Pack `classes`, identity first, then one annulus per bucket.
///
/// The identity circle is always drawn at the origin, even when `classes`
/// holds no class of order 1.
pub fn find_packing_with(classes: &[ConjugacyClass], config: &PackingConfig) -> Result<Packing> {
    config.validate()?;
    validate_classes(classes)?;

    let mut buckets: BTreeMap<u32, Vec<Disc>> = BTreeMap::new();
    for class in classes.iter().filter(|c| !c.is_identity()) {
        buckets
            .entry(prime_omega(class.order))
            .or_default()
            .push(Disc::new(class.size, class.order));
    }

    let mut colors = ColorCache::new(config.color_scheme);
    let identity = config.identity_radius;
    let mut circles = vec![PlacedCircle {
        x: 0.0,
        y: 0.0,
        r: identity,
        color: Rgb::WHITE,
    }];
    let mut outer_radius = identity;
    let mut previous_rmax = identity;

    for (omega, discs) in buckets {
        let rmax = max_radius(&discs);
        let inner_radius = outer_radius + previous_rmax.max(rmax);
        let count = discs.len();
        let layout = pack_annulus(discs, inner_radius, rmax, config)?;
        info!(
            omega,
            circles = count,
            inner_radius,
            outer_radius = layout.outer_radius,
            strategy = ?layout.strategy,
            "packed bucket"
        );
        circles.extend(layout.circles.iter().map(|c| PlacedCircle {
            x: c.center.x(),
            y: c.center.y(),
            r: c.r,
            color: c.order.map_or(Rgb::WHITE, |order| colors.get(order)),
        }));
        outer_radius = layout.outer_radius;
        previous_rmax = rmax;
    }

    Ok(Packing {
        circles,
        outer_radius,
    })
}

fn validate_classes(classes: &[ConjugacyClass]) -> Result<()> {
    if classes.is_empty() {
        return Err(PackingError::InvalidInput(
            "no conjugacy classes given".to_string(),
        ));
    }
    let mut identities = 0;
    for class in classes {
        if class.size == 0 || class.order == 0 {
            return Err(PackingError::InvalidInput(format!(
                "class sizes and orders must be positive, got size {} order {}",
                class.size, class.order
            )));
        }
        if class.is_identity() {
            if class.size != 1 {
                return Err(PackingError::InvalidInput(format!(
                    "the identity class has size 1, got {}",
                    class.size
                )));
            }
            identities += 1;
        }
    }
    if identities > 1 {
        return Err(PackingError::InvalidInput(format!(
            "expected at most one identity class, got {}",
            identities
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{get_color, ColorScheme};

    fn classes(data: &[(u64, u64)]) -> Vec<ConjugacyClass> {
        data.iter().copied().map(ConjugacyClass::from).collect()
    }

    #[test]
    fn test_rejects_bad_input() {
        for data in [
            &[][..],
            &[(1, 1), (0, 2)][..],
            &[(1, 1), (3, 0)][..],
            &[(2, 1)][..],
            &[(1, 1), (1, 1)][..],
        ] {
            let result = find_packing(&classes(data));
            assert!(
                matches!(result, Err(PackingError::InvalidInput(_))),
                "accepted {:?}",
                data
            );
        }
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = PackingConfig {
            initial_density: 0.0,
            ..PackingConfig::default()
        };
        let result = find_packing_with(&classes(&[(1, 1)]), &config);
        assert!(matches!(result, Err(PackingError::InvalidConfig(_))));
    }

    #[test]
    fn test_identity_only() {
        let packing = find_packing(&classes(&[(1, 1)])).unwrap();
        assert_eq!(
            packing.circles,
            vec![PlacedCircle {
                x: 0.0,
                y: 0.0,
                r: 1.0,
                color: Rgb::WHITE
            }]
        );
        assert_eq!(packing.outer_radius, 1.0);
    }

    #[test]
    fn test_cyclic_group_of_order_two_style() {
        let packing = find_packing(&classes(&[(1, 1), (6, 2)])).unwrap();
        assert_eq!(packing.circles.len(), 2);
        let c = packing.circles[1];
        let root6 = 6f64.sqrt();
        assert_eq!(c.r, root6);
        assert_eq!(c.color, get_color(2));
        assert!(c.x.hypot(c.y) - c.r >= 1.0 + root6 - 1e-9);
        assert!((packing.outer_radius - (1.0 + 3.0 * root6)).abs() < 1e-9);
    }

    #[test]
    fn test_buckets_nest_by_omega() {
        // Orders 2 and 3 share a bucket; 4 and 6 form the next one out.
        let packing =
            find_packing(&classes(&[(1, 1), (1, 2), (2, 3), (1, 4), (3, 6)])).unwrap();
        assert_eq!(packing.circles.len(), 5);
        let radial = |c: &PlacedCircle| c.x.hypot(c.y);
        let inner_max = packing.circles[1..3]
            .iter()
            .map(|c| radial(c) + c.r)
            .fold(0.0, f64::max);
        for c in &packing.circles[3..] {
            assert!(radial(c) - c.r >= inner_max - 1e-9);
        }
    }

    #[test]
    fn test_identity_not_required() {
        let packing = find_packing(&classes(&[(4, 2)])).unwrap();
        assert_eq!(packing.circles.len(), 2);
        assert_eq!(packing.circles[0].color, Rgb::WHITE);
    }

    #[test]
    fn test_configured_scheme_and_identity_radius() {
        let config = PackingConfig {
            identity_radius: 2.0,
            color_scheme: ColorScheme::ExponentBlend,
            ..PackingConfig::default()
        };
        let packing = find_packing_with(&classes(&[(1, 1), (3, 2)]), &config).unwrap();
        assert_eq!(packing.circles[0].r, 2.0);
        assert_eq!(packing.circles[1].color, ColorScheme::ExponentBlend.color(2));
    }
}
