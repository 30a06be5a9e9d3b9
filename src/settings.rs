//! Physics settings
//!
//! Everything the simulation treats as tunable: friction, stopping
//! threshold, restitution and table geometry. Passed explicitly into every
//! step; nothing here is global.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Pocket, Rectangle};

/// Tunable physics constants and table geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Per-frame velocity loss for free-roll integration (`Body::movement_step`)
    pub friction_coefficient: f64,
    /// Per-frame velocity loss applied by the stepper
    pub rolling_friction: f64,
    /// Net speed below which a ball stops dead
    pub stopping_velocity: f64,
    /// Restitution for ball and cushion impacts (0.0 - 1.0)
    pub collision_friction: f64,
    /// Cushion faces
    pub play_surface: Rectangle,
    /// Pocket mouths
    pub pockets: Vec<Pocket>,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        let play_surface = Rectangle::new(
            PLAY_SURFACE_X1,
            PLAY_SURFACE_Y1,
            PLAY_SURFACE_X2,
            PLAY_SURFACE_Y2,
        );
        Self {
            friction_coefficient: FRICTION_COEFFICIENT,
            rolling_friction: ROLLING_FRICTION,
            stopping_velocity: STOPPING_VELOCITY,
            collision_friction: COLLISION_FRICTION,
            pockets: Pocket::six_pocket_layout(&play_surface, POCKET_RADIUS),
            play_surface,
        }
    }
}

impl PhysicsSettings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        // Plain data with no maps keyed by non-strings; serialization can't fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Malformed settings {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp coefficients into [0, 1] and thresholds to non-negative
    pub fn sanitized(mut self) -> Self {
        self.friction_coefficient = clamp_unit("friction_coefficient", self.friction_coefficient);
        self.rolling_friction = clamp_unit("rolling_friction", self.rolling_friction);
        self.collision_friction = clamp_unit("collision_friction", self.collision_friction);
        if self.stopping_velocity.is_nan() || self.stopping_velocity < 0.0 {
            log::warn!(
                "stopping_velocity {} out of range, using 0",
                self.stopping_velocity
            );
            self.stopping_velocity = 0.0;
        }
        self
    }
}

fn clamp_unit(name: &str, value: f64) -> f64 {
    if (0.0..=1.0).contains(&value) {
        return value;
    }
    let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    log::warn!("{} {} out of range, using {}", name, value, clamped);
    clamped
}
