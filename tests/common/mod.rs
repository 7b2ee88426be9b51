// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use conjugacy_packing::{ConjugacyClass, Packing, PlacedCircle};

pub const TOLERANCE: f64 = 1e-6;

/// Route `tracing` output through the test harness; `RUST_LOG` selects levels.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn classes(data: &[(u64, u64)]) -> Vec<ConjugacyClass> {
    data.iter().copied().map(ConjugacyClass::from).collect()
}

pub fn radial(c: &PlacedCircle) -> f64 {
    c.x.hypot(c.y)
}

/// No two circles overlap by more than [`TOLERANCE`].
pub fn assert_no_overlap(packing: &Packing) {
    let circles = &packing.circles;
    for (i, a) in circles.iter().enumerate() {
        for (j, b) in circles.iter().enumerate().skip(i + 1) {
            let gap = (a.x - b.x).hypot(a.y - b.y) - a.r - b.r;
            assert!(
                gap >= -TOLERANCE,
                "circles {} and {} overlap by {}: {:?} {:?}",
                i,
                j,
                -gap,
                a,
                b
            );
        }
    }
}

/// Every circle lies within the outer radius.
pub fn assert_contained(packing: &Packing) {
    for (i, c) in packing.circles.iter().enumerate() {
        assert!(c.r > 0.0, "circle {} has radius {}", i, c.r);
        assert!(
            radial(c) + c.r <= packing.outer_radius + TOLERANCE,
            "circle {} at {} (r = {}) leaves outer radius {}",
            i,
            radial(c),
            c.r,
            packing.outer_radius
        );
    }
}

pub fn assert_valid(packing: &Packing) {
    assert_no_overlap(packing);
    assert_contained(packing);
}
