//! Per-frame simulation step
//!
//! Each visible, moving ball is advanced in sub-steps no longer than its
//! radius so it can't pass through another ball inside one frame. The first
//! collision ends that ball's sub-stepping; it continues next frame with the
//! resolved velocity. Balls are processed in collection order, so which pair
//! resolves "first" is deterministic.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::boundary::resolve_boundary;
use super::collision::resolve_collisions;
use super::pocket::PocketDetector;
use super::state::{Player, TurnInformation, assign_target_groups};
use crate::PhysicsSettings;

/// Something that happened during a step (for sound/UI layers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhysicsEvent {
    /// Moving ball `a` struck ball `b`
    BallCollision { a: u32, b: u32 },
    /// Ball bounced off a cushion
    CushionHit { id: u32 },
    /// Ball dropped into a pocket
    Pocketed { id: u32 },
}

/// Advance every ball by one frame.
///
/// Collisions record the first ball group struck in `turn`; pocketed balls
/// are hidden, appended to `turn.pocketed_balls`, and may settle the
/// players' groups.
pub fn step_physics<P>(
    bodies: &mut [Body],
    players: &mut [Player],
    turn: &mut TurnInformation,
    pockets: &P,
    settings: &PhysicsSettings,
) -> Vec<PhysicsEvent>
where
    P: PocketDetector + ?Sized,
{
    let mut events = Vec::new();

    for index in 0..bodies.len() {
        if !bodies[index].is_visible() || !bodies[index].is_moving() {
            continue;
        }

        let velocity_sum = bodies[index].velocity_sum();
        let steps_needed = (velocity_sum / bodies[index].radius()).ceil() as u32;
        let step = bodies[index].velocity() / f64::from(steps_needed);

        let mut remaining = steps_needed;
        let mut collided = false;
        while remaining > 0 && !collided {
            bodies[index].add_position(step);

            let struck = resolve_collisions(bodies, index, settings.collision_friction);
            for &other in &struck {
                let (ball, target) = (&bodies[index], &bodies[other]);
                events.push(PhysicsEvent::BallCollision {
                    a: ball.id,
                    b: target.id,
                });
                if turn.first_hit_ball_type.is_none() {
                    // The opening contact is assumed to involve the cue ball
                    let first = if ball.is_cue() {
                        target.ball_type()
                    } else {
                        ball.ball_type()
                    };
                    log::debug!("First contact: {} -> {} ({:?})", ball.id, target.id, first);
                    turn.first_hit_ball_type = Some(first);
                }
            }

            collided = !struck.is_empty();
            remaining -= 1;
        }

        let ball = &mut bodies[index];
        ball.apply_friction(settings.rolling_friction, settings.stopping_velocity);

        if resolve_boundary(ball, &settings.play_surface, settings.collision_friction) {
            events.push(PhysicsEvent::CushionHit { id: ball.id });
        }

        if pockets.is_in_pocket(ball) {
            ball.set_visible(false);
            turn.pocketed_balls.push(ball.id);
            events.push(PhysicsEvent::Pocketed { id: ball.id });
            log::info!("Ball {} ({:?}) pocketed", ball.ball_number(), ball.ball_type());
            assign_target_groups(players, turn.turn_player_index, ball.ball_type());
        }
    }

    if !events.is_empty() {
        log::debug!("Step produced {} events", events.len());
    }
    events
}

/// Whether any visible ball is still moving
pub fn are_balls_moving(bodies: &[Body]) -> bool {
    bodies.iter().any(|b| b.is_visible() && b.is_moving())
}
