//! Ball/ball collision detection and response
//!
//! Resolution happens in two parts that always run together: the pair is
//! pushed apart along the center line until the circles just touch, then
//! velocities are exchanged along that same normal. Tangential velocity is
//! left alone.

use glam::DVec2;

use super::body::Body;
use crate::{dot, hypot};

/// Geometry of a touching or overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first body toward the second
    pub normal: DVec2,
    /// Center-to-center distance
    pub distance: f64,
    /// True when the centers coincided and `normal` is the fallback axis
    pub degenerate: bool,
}

/// Compute the contact normal between two bodies.
///
/// Coincident centers have no direction; the first body is then treated as
/// sitting on the +X side of the second so nothing divides by zero.
pub fn contact(a: &Body, b: &Body) -> Contact {
    let delta = b.position() - a.position();
    let distance = hypot(delta);

    if distance == 0.0 {
        log::warn!(
            "bodies {} and {} share a center at ({}, {}); separating along X",
            a.id,
            b.id,
            a.position().x,
            a.position().y
        );
        return Contact {
            normal: DVec2::NEG_X,
            distance,
            degenerate: true,
        };
    }

    Contact {
        normal: delta / distance,
        distance,
        degenerate: false,
    }
}

/// Circle-circle overlap; symmetric, and false for a body against itself
#[inline]
pub fn is_overlapping(a: &Body, b: &Body) -> bool {
    a.is_overlapping_ball(b)
}

/// Borrow two distinct bodies mutably out of one collection.
///
/// Returns `None` if the indices are equal or out of range.
pub fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> Option<(&mut Body, &mut Body)> {
    if i == j || i >= bodies.len() || j >= bodies.len() {
        return None;
    }
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}

/// Move both bodies apart along the center line so they end up tangent
pub fn resolve_position(a: &mut Body, b: &mut Body) {
    let c = contact(a, b);
    resolve_position_with(a, b, &c);
}

fn resolve_position_with(a: &mut Body, b: &mut Body, c: &Contact) {
    // Negative while the circles overlap
    let overlap = (c.distance - a.radius() - b.radius()) / 2.0;
    let shift = c.normal * overlap;

    log::trace!(
        "position resolution {}<->{}: distance={} overlap={} normal={:?}",
        a.id,
        b.id,
        c.distance,
        overlap,
        c.normal
    );

    a.add_position(shift);
    b.sub_position(shift);
}

/// Exchange momentum along the contact normal.
///
/// `collision_friction` is the restitution: 1.0 reverses the normal
/// relative velocity, 0.0 cancels it.
pub fn resolve_velocity(a: &mut Body, b: &mut Body, collision_friction: f64) {
    let c = contact(a, b);
    resolve_velocity_with(a, b, &c, collision_friction);
}

fn resolve_velocity_with(a: &mut Body, b: &mut Body, c: &Contact, collision_friction: f64) {
    let relative = a.velocity() - b.velocity();
    let impulse =
        (1.0 + collision_friction) * dot(c.normal, relative) / (a.mass() + b.mass());
    let exchange = c.normal * impulse;

    log::trace!(
        "velocity resolution {}<->{}: relative={:?} impulse={} before=({:?}, {:?})",
        a.id,
        b.id,
        relative,
        impulse,
        a.velocity(),
        b.velocity()
    );

    a.sub_velocity(exchange * b.mass());
    b.add_velocity(exchange * a.mass());
}

/// Resolve an overlapping pair: de-overlap, then exchange velocity. The
/// normal is computed once and shared by both parts.
pub fn resolve_collision(a: &mut Body, b: &mut Body, collision_friction: f64) {
    let c = contact(a, b);
    resolve_position_with(a, b, &c);
    resolve_velocity_with(a, b, &c, collision_friction);
}

/// Resolve body `index` against every other visible body in collection
/// order. Returns the indices of the bodies it collided with.
pub fn resolve_collisions(
    bodies: &mut [Body],
    index: usize,
    collision_friction: f64,
) -> Vec<usize> {
    let mut struck = Vec::new();
    for other in 0..bodies.len() {
        let Some((ball, target)) = pair_mut(bodies, index, other) else {
            continue;
        };
        if !ball.is_visible() || !target.is_visible() {
            continue;
        }
        if is_overlapping(ball, target) {
            resolve_collision(ball, target, collision_friction);
            struck.push(other);
        }
    }
    struck
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball(id: u32, x: f64, y: f64, radius: f64) -> Body {
        Body::new(id, DVec2::new(x, y), radius, 1.0)
    }

    #[test]
    fn test_overlap_symmetric_and_self() {
        let a = ball(0, 0.0, 0.0, 1.0);
        let b = ball(1, 1.5, 0.5, 1.0);
        assert!(is_overlapping(&a, &b));
        assert!(is_overlapping(&b, &a));
        assert!(!is_overlapping(&a, &a));
    }

    #[test]
    fn test_pair_mut_rejects_aliasing() {
        let mut bodies = vec![ball(0, 0.0, 0.0, 1.0), ball(1, 5.0, 0.0, 1.0)];
        assert!(pair_mut(&mut bodies, 0, 0).is_none());
        assert!(pair_mut(&mut bodies, 0, 2).is_none());

        let (b, a) = pair_mut(&mut bodies, 1, 0).unwrap();
        assert_eq!(b.id, 1);
        assert_eq!(a.id, 0);
    }

    #[test]
    fn test_resolve_position_ends_tangent() {
        let mut a = ball(0, 0.0, 0.0, 1.0);
        let mut b = ball(1, 1.2, 0.0, 1.0);
        resolve_position(&mut a, &mut b);

        let d = a.position().distance(b.position());
        assert!((d - 2.0).abs() < 1e-9);
        // Symmetric push for equal overlap share
        assert!((a.position().x + 0.4).abs() < 1e-9);
        assert!((b.position().x - 1.6).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_position_coincident_centers() {
        let mut a = ball(0, 5.0, 5.0, 1.0);
        let mut b = ball(1, 5.0, 5.0, 1.0);
        resolve_position(&mut a, &mut b);

        assert!(a.position().is_finite());
        assert!(b.position().is_finite());
        assert!((a.position().x - 6.0).abs() < 1e-9);
        assert!((b.position().x - 4.0).abs() < 1e-9);
        assert_eq!(a.position().y, 5.0);
    }

    #[test]
    fn test_resolve_velocity_coincident_centers_no_nan() {
        let mut a = ball(0, 0.0, 0.0, 1.0);
        let mut b = ball(1, 0.0, 0.0, 1.0);
        a.set_velocity(DVec2::new(0.0, 3.0));
        resolve_collision(&mut a, &mut b, 1.0);
        assert!(a.velocity().is_finite());
        assert!(b.velocity().is_finite());
    }

    #[test]
    fn test_equal_mass_head_on_exchange() {
        let mut a = ball(0, 0.0, 0.0, 1.0);
        let mut b = ball(1, 2.0, 0.0, 1.0);
        a.set_velocity(DVec2::new(1.0, 0.0));
        resolve_velocity(&mut a, &mut b, 1.0);

        assert!(a.velocity().length() < 1e-12);
        assert!((b.velocity() - DVec2::new(1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_elastic_reverses_normal_relative_velocity() {
        let mut a = ball(0, 0.0, 0.0, 1.0);
        let mut b = ball(1, 2.0, 0.0, 1.0);
        a.set_velocity(DVec2::new(2.0, 0.5));
        b.set_velocity(DVec2::new(-1.0, 0.0));
        let n = contact(&a, &b).normal;
        let before = dot(a.velocity() - b.velocity(), n);

        resolve_velocity(&mut a, &mut b, 1.0);
        let after = dot(a.velocity() - b.velocity(), n);
        assert!((after + before).abs() < 1e-12);
        // Tangential components untouched
        assert_eq!(a.velocity().y, 0.5);
        assert_eq!(b.velocity().y, 0.0);
    }

    #[test]
    fn test_inelastic_cancels_normal_relative_velocity() {
        let mut a = ball(0, 0.0, 0.0, 1.0);
        let mut b = ball(1, 1.5, 1.0, 1.0);
        a.set_velocity(DVec2::new(3.0, 1.0));
        let n = contact(&a, &b).normal;

        resolve_velocity(&mut a, &mut b, 0.0);
        let after = dot(a.velocity() - b.velocity(), n);
        assert!(after.abs() < 1e-12);
    }

    #[test]
    fn test_unequal_mass_conserves_momentum() {
        let mut a = Body::new(0, DVec2::ZERO, 1.0, 3.0);
        let mut b = Body::new(1, DVec2::new(1.8, 0.6), 1.0, 1.0);
        a.set_velocity(DVec2::new(1.0, -0.5));
        b.set_velocity(DVec2::new(-2.0, 0.25));
        let before = a.velocity() * a.mass() + b.velocity() * b.mass();

        resolve_collision(&mut a, &mut b, 0.7);
        let after = a.velocity() * a.mass() + b.velocity() * b.mass();
        assert!((after - before).length() < 1e-9);
    }

    #[test]
    fn test_resolve_collisions_skips_invisible() {
        let mut bodies = vec![
            ball(0, 0.0, 0.0, 1.0),
            ball(1, 1.0, 0.0, 1.0),
            ball(2, 0.0, 1.0, 1.0),
        ];
        bodies[1].set_visible(false);
        bodies[0].set_velocity(DVec2::new(0.0, 1.0));

        let struck = resolve_collisions(&mut bodies, 0, 1.0);
        assert_eq!(struck, vec![2]);
        assert_eq!(bodies[1].position(), DVec2::new(1.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(
            ax in -50.0f64..50.0, ay in -50.0f64..50.0,
            bx in -50.0f64..50.0, by in -50.0f64..50.0,
            ar in 0.1f64..10.0, br in 0.1f64..10.0,
        ) {
            let a = ball(0, ax, ay, ar);
            let b = ball(1, bx, by, br);
            prop_assert_eq!(is_overlapping(&a, &b), is_overlapping(&b, &a));
            prop_assert!(!is_overlapping(&a, &a));
        }

        #[test]
        fn prop_resolve_position_tangent(
            ax in -20.0f64..20.0, ay in -20.0f64..20.0,
            dx in -3.0f64..3.0, dy in -3.0f64..3.0,
            ar in 0.5f64..3.0, br in 0.5f64..3.0,
        ) {
            let mut a = ball(0, ax, ay, ar);
            let mut b = ball(1, ax + dx, ay + dy, br);
            prop_assume!(is_overlapping(&a, &b));

            resolve_position(&mut a, &mut b);
            let d = a.position().distance(b.position());
            prop_assert!((d - (ar + br)).abs() < 1e-6);
        }
    }
}
