// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tunable parameters of the packer.
//!
//! The defaults reproduce the production diagrams; every field can be
//! overridden from JSON/TOML since missing fields fall back to the default.

use serde::{Deserialize, Serialize};

use crate::color::ColorScheme;
use crate::error::{PackingError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingConfig {
    /// Radius of the identity circle at the origin.
    pub identity_radius: f64,

    /// Packing density assumed by the first fallback attempt.
    pub initial_density: f64,

    /// Amount the assumed density drops after each failed fallback attempt.
    pub density_step: f64,

    /// The fallback gives up once the assumed density reaches this value.
    pub density_floor: f64,

    /// Hard cap on fallback attempts per annulus.
    pub max_density_attempts: usize,

    /// Increase of the ring footprint multiplier after a failed ring layout.
    pub ring_slack_step: f64,

    /// Hard cap on multi-ring layout attempts per annulus.
    pub max_ring_attempts: usize,

    /// Layouts needing more concentric rings than this go to the fallback.
    pub max_rings: usize,

    pub color_scheme: ColorScheme,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            identity_radius: 1.0,
            initial_density: 0.86,
            density_step: 0.01,
            density_floor: 0.01,
            max_density_attempts: 200,
            ring_slack_step: 0.05,
            max_ring_attempts: 20,
            max_rings: 12,
            color_scheme: ColorScheme::default(),
        }
    }
}

impl PackingConfig {
    /// Check that every parameter is in a range the retry loops can work with.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(PackingError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )))
            }
        }

        positive("identity_radius", self.identity_radius)?;
        positive("initial_density", self.initial_density)?;
        positive("density_step", self.density_step)?;
        positive("ring_slack_step", self.ring_slack_step)?;

        if self.initial_density > 1.0 {
            return Err(PackingError::InvalidConfig(format!(
                "initial_density must not exceed 1, got {}",
                self.initial_density
            )));
        }
        if !(self.density_floor >= 0.0 && self.density_floor < self.initial_density) {
            return Err(PackingError::InvalidConfig(format!(
                "density_floor must lie in [0, initial_density), got {}",
                self.density_floor
            )));
        }
        if self.max_density_attempts == 0 || self.max_ring_attempts == 0 || self.max_rings == 0 {
            return Err(PackingError::InvalidConfig(
                "attempt caps and max_rings must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
