//! Ball bodies
//!
//! A body is a circle with position, velocity, radius and mass. Radius and
//! mass stay positive: setters silently ignore non-positive values.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BALL_MASS, BALL_RADIUS};
use crate::hypot;

/// Ball group a body belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallType {
    /// Not yet assigned (players start here)
    #[default]
    Undetermined,
    Cue,
    Solid,
    Striped,
    Eight,
}

impl BallType {
    /// Whether a player can be assigned this group
    pub fn is_playable_group(&self) -> bool {
        matches!(self, BallType::Solid | BallType::Striped)
    }

    /// The other playable group (solid <-> striped)
    pub fn complement(&self) -> Option<BallType> {
        match self {
            BallType::Solid => Some(BallType::Striped),
            BallType::Striped => Some(BallType::Solid),
            _ => None,
        }
    }

    /// Group of a standard pool ball number (0 = cue, 8 = eight)
    pub fn for_number(number: u8) -> Self {
        match number {
            0 => BallType::Cue,
            8 => BallType::Eight,
            1..=7 => BallType::Solid,
            9..=15 => BallType::Striped,
            _ => BallType::Undetermined,
        }
    }
}

/// Ball number reserved for the cue ball
pub const CUE_BALL_NUMBER: u8 = 0;

/// A circular body on the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Stable identifier (insertion order in the table)
    pub id: u32,
    pos: DVec2,
    vel: DVec2,
    radius: f64,
    mass: f64,
    visible: bool,
    ball_type: BallType,
    ball_number: u8,
}

impl Body {
    pub fn new(id: u32, pos: DVec2, radius: f64, mass: f64) -> Self {
        let mut body = Self {
            id,
            pos,
            vel: DVec2::ZERO,
            radius: BALL_RADIUS,
            mass: BALL_MASS,
            visible: true,
            ball_type: BallType::Undetermined,
            ball_number: 0,
        };
        body.set_radius(radius);
        body.set_mass(mass);
        body
    }

    /// Builder-style ball tag
    pub fn with_ball(mut self, ball_type: BallType, ball_number: u8) -> Self {
        self.ball_type = ball_type;
        self.ball_number = ball_number;
        self
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.pos
    }

    pub fn set_position(&mut self, pos: DVec2) {
        self.pos = pos;
    }

    pub fn add_position(&mut self, delta: DVec2) {
        self.pos += delta;
    }

    pub fn sub_position(&mut self, delta: DVec2) {
        self.pos -= delta;
    }

    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.vel
    }

    pub fn set_velocity(&mut self, vel: DVec2) {
        self.vel = vel;
    }

    pub fn add_velocity(&mut self, delta: DVec2) {
        self.vel += delta;
    }

    pub fn sub_velocity(&mut self, delta: DVec2) {
        self.vel -= delta;
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Set the radius; non-positive values are ignored
    pub fn set_radius(&mut self, radius: f64) {
        if radius > 0.0 {
            self.radius = radius;
        }
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Set the mass; non-positive values are ignored
    pub fn set_mass(&mut self, mass: f64) {
        if mass > 0.0 {
            self.mass = mass;
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn ball_type(&self) -> BallType {
        self.ball_type
    }

    pub fn set_ball_type(&mut self, ball_type: BallType) {
        self.ball_type = ball_type;
    }

    pub fn ball_number(&self) -> u8 {
        self.ball_number
    }

    pub fn is_cue(&self) -> bool {
        self.ball_number == CUE_BALL_NUMBER
    }

    /// Any velocity component nonzero
    pub fn is_moving(&self) -> bool {
        self.vel.x != 0.0 || self.vel.y != 0.0
    }

    /// Manhattan speed, used to size sub-steps
    pub fn velocity_sum(&self) -> f64 {
        self.vel.x.abs() + self.vel.y.abs()
    }

    /// Circle-circle overlap test. Touching counts as overlapping; a body
    /// never overlaps itself.
    pub fn is_overlapping_ball(&self, other: &Body) -> bool {
        if other.id == self.id {
            return false;
        }
        let radius_sum = self.radius + other.radius;
        self.pos.distance_squared(other.pos) <= radius_sum * radius_sum
    }

    /// Decay velocity by `friction`, or stop outright once slower than
    /// `stopping_velocity`
    pub fn apply_friction(&mut self, friction: f64, stopping_velocity: f64) {
        if hypot(self.vel) < stopping_velocity {
            self.vel = DVec2::ZERO;
        } else {
            self.vel -= self.vel * friction;
        }
    }

    /// Free-roll integration without collision checks: friction, then a
    /// whole-frame move
    pub fn movement_step(&mut self, friction: f64, stopping_velocity: f64) {
        if hypot(self.vel) < stopping_velocity {
            self.vel = DVec2::ZERO;
            return;
        }
        self.vel -= self.vel * friction;
        self.pos += self.vel;
    }
}
