//! Cushion collisions against the rectangular play surface

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::Body;

/// Axis-aligned playable surface, `(x1, y1)` top-left to `(x2, y2)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x_pos1: f64,
    pub y_pos1: f64,
    pub x_pos2: f64,
    pub y_pos2: f64,
}

impl Rectangle {
    pub const fn new(x_pos1: f64, y_pos1: f64, x_pos2: f64, y_pos2: f64) -> Self {
        Self {
            x_pos1,
            y_pos1,
            x_pos2,
            y_pos2,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_pos2 - self.x_pos1
    }

    pub fn height(&self) -> f64 {
        self.y_pos2 - self.y_pos1
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(
            (self.x_pos1 + self.x_pos2) / 2.0,
            (self.y_pos1 + self.y_pos2) / 2.0,
        )
    }

    /// Whether a circle lies entirely on the surface
    pub fn contains_circle(&self, center: DVec2, radius: f64) -> bool {
        center.x - radius >= self.x_pos1
            && center.x + radius <= self.x_pos2
            && center.y - radius >= self.y_pos1
            && center.y + radius <= self.y_pos2
    }
}

/// Clamp a body back onto the surface, reflecting (and damping) the
/// velocity component of each violated axis.
///
/// Each axis is corrected at most once; both corrections are applied
/// together. Returns true if any cushion was hit.
pub fn resolve_boundary(body: &mut Body, rect: &Rectangle, collision_friction: f64) -> bool {
    let pos = body.position();
    let r = body.radius();
    let mut vel = body.velocity();
    let mut adjust = DVec2::ZERO;

    if pos.x - r < rect.x_pos1 {
        adjust.x = rect.x_pos1 - (pos.x - r);
        vel.x = -vel.x * collision_friction;
    } else if pos.x + r > rect.x_pos2 {
        adjust.x = -(pos.x + r - rect.x_pos2);
        vel.x = -vel.x * collision_friction;
    }

    if pos.y - r < rect.y_pos1 {
        adjust.y = rect.y_pos1 - (pos.y - r);
        vel.y = -vel.y * collision_friction;
    } else if pos.y + r > rect.y_pos2 {
        adjust.y = -(pos.y + r - rect.y_pos2);
        vel.y = -vel.y * collision_friction;
    }

    if adjust == DVec2::ZERO {
        return false;
    }

    log::trace!("body {} hit cushion, correction {:?}", body.id, adjust);
    body.add_position(adjust);
    body.set_velocity(vel);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Rectangle = Rectangle::new(0.0, 0.0, 100.0, 50.0);

    fn ball(x: f64, y: f64, vx: f64, vy: f64) -> Body {
        let mut b = Body::new(0, DVec2::new(x, y), 2.0, 1.0);
        b.set_velocity(DVec2::new(vx, vy));
        b
    }

    #[test]
    fn test_inside_untouched() {
        let mut b = ball(50.0, 25.0, 3.0, -1.0);
        assert!(!resolve_boundary(&mut b, &RECT, 0.9));
        assert_eq!(b.position(), DVec2::new(50.0, 25.0));
        assert_eq!(b.velocity(), DVec2::new(3.0, -1.0));
    }

    #[test]
    fn test_left_cushion_clamp() {
        // Leading edge 0.5 past x1
        let mut b = ball(1.5, 25.0, -4.0, 1.0);
        assert!(resolve_boundary(&mut b, &RECT, 0.5));
        assert!((b.position().x - b.radius() - RECT.x_pos1).abs() < 1e-12);
        assert_eq!(b.velocity(), DVec2::new(2.0, 1.0));
    }

    #[test]
    fn test_right_cushion_clamp() {
        let mut b = ball(99.0, 25.0, 4.0, 0.0);
        resolve_boundary(&mut b, &RECT, 1.0);
        assert!((b.position().x + b.radius() - RECT.x_pos2).abs() < 1e-12);
        assert_eq!(b.velocity().x, -4.0);
    }

    #[test]
    fn test_corner_corrects_both_axes() {
        let mut b = ball(101.0, -1.0, 2.0, -3.0);
        resolve_boundary(&mut b, &RECT, 1.0);
        assert_eq!(b.position(), DVec2::new(98.0, 2.0));
        assert_eq!(b.velocity(), DVec2::new(-2.0, 3.0));
        assert!(RECT.contains_circle(b.position(), b.radius()));
    }
}
