// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Numerical constants shared by the geometry and the packer.

/// Tolerance absorbing floating point round-off in every geometric comparison.
///
/// Distances in a diagram are of the order of the square root of the largest
/// class size, so an absolute tolerance is adequate.
pub const EPS: f64 = 1e-9;

/// Sentinel hole degree for a candidate that is known to overlap something.
///
/// Anything above 1 rejects the candidate.
pub const OVERLAP_HOLE_DEGREE: f64 = 2.0;
