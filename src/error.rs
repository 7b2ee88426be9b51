// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for packing.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PackingError>;

/// Errors surfaced to the caller of [`crate::find_packing`].
///
/// Retries inside the packer (density back-off, ring slack) are normal
/// operation and never produce one of these until their caps are exhausted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PackingError {
    /// Empty input, a zero size or order, or a malformed identity class.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value outside its usable range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The fallback packer ran out of room to back off into.
    #[error(
        "cannot pack {circles} circles into the annulus starting at radius {inner_radius} \
         (gave up after {attempts} attempts)"
    )]
    PackingInfeasible {
        circles: usize,
        inner_radius: f64,
        attempts: usize,
    },
}
