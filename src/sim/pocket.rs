//! Pocket capture
//!
//! The stepper only asks "is this body in a pocket?"; table geometry decides.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::boundary::Rectangle;

/// Pocket-region predicate consumed by the stepper
pub trait PocketDetector {
    fn is_in_pocket(&self, body: &Body) -> bool;
}

impl<F> PocketDetector for F
where
    F: Fn(&Body) -> bool,
{
    fn is_in_pocket(&self, body: &Body) -> bool {
        self(body)
    }
}

/// A circular pocket mouth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pocket {
    pub center: DVec2,
    pub radius: f64,
}

impl Pocket {
    pub const fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// A ball drops once its center is inside the pocket mouth
    #[inline]
    pub fn captures(&self, body: &Body) -> bool {
        body.position().distance_squared(self.center) <= self.radius * self.radius
    }

    /// Four corner pockets plus one at the middle of each long side
    pub fn six_pocket_layout(surface: &Rectangle, radius: f64) -> Vec<Pocket> {
        let mid_x = surface.center().x;
        [
            (surface.x_pos1, surface.y_pos1),
            (mid_x, surface.y_pos1),
            (surface.x_pos2, surface.y_pos1),
            (surface.x_pos1, surface.y_pos2),
            (mid_x, surface.y_pos2),
            (surface.x_pos2, surface.y_pos2),
        ]
        .into_iter()
        .map(|(x, y)| Pocket::new(DVec2::new(x, y), radius))
        .collect()
    }
}

impl PocketDetector for [Pocket] {
    fn is_in_pocket(&self, body: &Body) -> bool {
        self.iter().any(|p| p.captures(body))
    }
}

impl PocketDetector for Vec<Pocket> {
    fn is_in_pocket(&self, body: &Body) -> bool {
        self.as_slice().is_in_pocket(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_pocket_layout() {
        let rect = Rectangle::new(0.0, 0.0, 200.0, 100.0);
        let pockets = Pocket::six_pocket_layout(&rect, 5.0);
        assert_eq!(pockets.len(), 6);
        assert!(pockets.iter().any(|p| p.center == DVec2::new(100.0, 0.0)));
        assert!(pockets.iter().any(|p| p.center == DVec2::new(200.0, 100.0)));
    }

    #[test]
    fn test_capture() {
        let rect = Rectangle::new(0.0, 0.0, 200.0, 100.0);
        let pockets = Pocket::six_pocket_layout(&rect, 5.0);

        let near_corner = Body::new(0, DVec2::new(3.0, 3.0), 1.0, 1.0);
        let mid_table = Body::new(1, DVec2::new(50.0, 50.0), 1.0, 1.0);
        assert!(pockets.is_in_pocket(&near_corner));
        assert!(!pockets.is_in_pocket(&mid_table));
    }

    #[test]
    fn test_closure_detector() {
        let left_half = |b: &Body| b.position().x < 0.0;
        let b = Body::new(0, DVec2::new(-1.0, 0.0), 1.0, 1.0);
        assert!(left_half.is_in_pocket(&b));
    }
}
