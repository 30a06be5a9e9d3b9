//! Pool Sim - billiards table physics
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, cushions, pockets)
//! - `settings`: Tunable physics constants and table geometry

pub mod settings;
pub mod sim;

pub use settings::PhysicsSettings;

use glam::DVec2;

/// Default tuning constants
pub mod consts {
    /// Playable surface bounds (cushion faces)
    pub const PLAY_SURFACE_X1: f64 = 60.0;
    pub const PLAY_SURFACE_Y1: f64 = 60.0;
    pub const PLAY_SURFACE_X2: f64 = 1060.0;
    pub const PLAY_SURFACE_Y2: f64 = 560.0;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 10.0;
    pub const BALL_MASS: f64 = 1.0;

    /// Pocket capture radius (ball center must be inside)
    pub const POCKET_RADIUS: f64 = 22.0;

    /// Velocity lost per frame while free rolling (fraction of velocity)
    pub const FRICTION_COEFFICIENT: f64 = 0.01;
    /// Velocity lost per frame after each simulation step (fraction of velocity)
    pub const ROLLING_FRICTION: f64 = 0.015;
    /// Net speed below which a ball is snapped to a full stop
    pub const STOPPING_VELOCITY: f64 = 0.05;
    /// Restitution for ball/ball and ball/cushion impacts (1.0 = perfectly elastic)
    pub const COLLISION_FRICTION: f64 = 0.95;

    /// Gap left between racked balls so the rack starts non-overlapping
    pub const RACK_GAP: f64 = 0.5;
}

/// Length of a 2D vector (hypotenuse of its components)
#[inline]
pub fn hypot(v: DVec2) -> f64 {
    v.x.hypot(v.y)
}

/// Dot product of two 2D vectors
#[inline]
pub fn dot(a: DVec2, b: DVec2) -> f64 {
    a.x * b.x + a.y * b.y
}

/// Sign of a scalar: -1.0, 0.0 or 1.0 (zero stays zero)
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
