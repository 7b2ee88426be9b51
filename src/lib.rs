// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Circle packing diagrams of the conjugacy classes of a finite group.
//!
//! Each conjugacy class is drawn as a circle whose area is proportional to
//! the class size, colored by the order of its elements. The identity sits at
//! the origin; the other classes are grouped by the number of prime factors
//! of their order and packed into nested annuli around it.
//!
//! # Architecture
//!
//! ## Geometry
//!
//! [`geometry`] holds points, circles and the two boundary proxies
//! ([`geometry::Outside`], [`geometry::ThetaRay`]) that circles are packed
//! against, all owned by a [`geometry::ShapeArena`]. The tangency solver
//! [`geometry::find_touching_centers`] finds the circles of a given radius
//! touching two such shapes.
//!
//! ## Packing
//!
//! [`packing`] fills one annulus, trying progressively more general layouts:
//!
//! 1. a single uniformly spaced ring,
//! 2. several concentric rings,
//! 3. greedy corner packing, segment by segment, with a density back-off.
//!
//! ## Driver
//!
//! [`find_packing`] validates the input, buckets the classes and stacks the
//! annuli, coloring each circle through [`color`].
//!
//! # Example
//!
//! ```
//! use conjugacy_packing::{find_packing, ConjugacyClass};
//!
//! // The symmetric group S3.
//! let classes = [(1, 1), (3, 2), (2, 3)].map(|(size, order)| ConjugacyClass::new(size, order));
//! let packing = find_packing(&classes)?;
//! assert_eq!(packing.circles.len(), 3);
//! # Ok::<(), conjugacy_packing::PackingError>(())
//! ```

pub mod arithmetic;
pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod packing;

// Re-export commonly used types
pub use color::{get_color, ColorCache, ColorScheme, Rgb};
pub use config::PackingConfig;
pub use driver::{find_packing, find_packing_with, ConjugacyClass, Packing, PlacedCircle};
pub use error::{PackingError, Result};
