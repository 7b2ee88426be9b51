// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Geometric types for packing diagrams.
//!
//! This module contains:
//! - Point: centers with explicit Cartesian or polar construction
//! - Circle, Outside, ThetaRay: placement anchors and their signed distances
//! - ShapeArena: owner of the anchors of one packing run
//! - find_touching_centers: the tangency solver

pub mod constants;
pub mod point;
pub mod shape;
pub mod tangency;

// Re-export for convenience
pub use constants::*;
pub use point::{normalize_angle, CoordinateForm, Point};
pub use shape::{Circle, Outside, Shape, ShapeArena, ShapeId, ThetaRay};
pub use tangency::find_touching_centers;
