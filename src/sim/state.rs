//! Table state and turn bookkeeping
//!
//! The table owns every body for the whole game; pocketed balls are hidden,
//! never removed, so ids and indices stay stable.

use glam::DVec2;
use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{BallType, Body, CUE_BALL_NUMBER};
use super::tick::{PhysicsEvent, are_balls_moving, step_physics};
use crate::PhysicsSettings;
use crate::consts::*;

/// A player, as far as the physics needs to know
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    target_ball_type: BallType,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_ball_type(&self) -> BallType {
        self.target_ball_type
    }

    pub fn set_target_ball_type(&mut self, ball_type: BallType) {
        self.target_ball_type = ball_type;
    }
}

/// Per-shot record filled in by the stepper and read by the rules layer.
///
/// The stepper only ever appends; resetting between shots is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnInformation {
    /// Index of the player taking the shot
    pub turn_player_index: usize,
    /// Group of the first ball struck (set at most once)
    pub first_hit_ball_type: Option<BallType>,
    /// Ids of balls pocketed, in the order they dropped
    pub pocketed_balls: Vec<u32>,
}

impl TurnInformation {
    pub fn new(turn_player_index: usize) -> Self {
        Self {
            turn_player_index,
            ..Default::default()
        }
    }
}

/// Give the acting player `ball_type` and the opponent the other group, but
/// only while the acting player's group is still open and the ball belongs
/// to a playable group. Returns true if groups were assigned.
pub fn assign_target_groups(players: &mut [Player], acting: usize, ball_type: BallType) -> bool {
    let Some(other_group) = ball_type.complement() else {
        return false;
    };
    if players.is_empty() {
        return false;
    }
    let acting = acting % players.len();
    if players[acting].target_ball_type() != BallType::Undetermined {
        return false;
    }

    players[acting].set_target_ball_type(ball_type);
    let opponent = (acting + 1) % players.len();
    if opponent != acting {
        players[opponent].set_target_ball_type(other_group);
    }
    log::info!(
        "Player {} takes {:?}, player {} takes {:?}",
        acting,
        ball_type,
        opponent,
        other_group
    );
    true
}

/// Complete table state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Seed used to rack the balls
    pub seed: u64,
    /// Frames stepped so far
    pub frame: u64,
    /// All bodies, in insertion (= id) order
    pub bodies: Vec<Body>,
    pub players: Vec<Player>,
    pub turn: TurnInformation,
}

impl Table {
    /// An empty table with two undetermined players
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            frame: 0,
            bodies: Vec::new(),
            players: vec![Player::new(), Player::new()],
            turn: TurnInformation::new(0),
        }
    }

    /// Add a body, assigning the next id
    pub fn add_body(
        &mut self,
        pos: DVec2,
        radius: f64,
        mass: f64,
        ball_type: BallType,
        number: u8,
    ) -> u32 {
        let id = self.bodies.len() as u32;
        self.bodies
            .push(Body::new(id, pos, radius, mass).with_ball(ball_type, number));
        id
    }

    /// Standard 8-ball setup: cue ball on the head spot and fifteen balls
    /// racked on the foot spot. The eight sits in the center, one solid and
    /// one stripe take the back corners, the rest are shuffled by `seed`.
    pub fn eight_ball(settings: &PhysicsSettings, seed: u64) -> Self {
        let mut table = Self::new(seed);
        let mut rng = Pcg32::seed_from_u64(seed);
        let surface = &settings.play_surface;
        let center_y = surface.center().y;

        table.add_body(
            DVec2::new(surface.x_pos1 + surface.width() / 4.0, center_y),
            BALL_RADIUS,
            BALL_MASS,
            BallType::Cue,
            CUE_BALL_NUMBER,
        );

        let mut solids: Vec<u8> = (1..=7).collect();
        let mut stripes: Vec<u8> = (9..=15).collect();
        solids.shuffle(&mut rng);
        stripes.shuffle(&mut rng);

        let (mut left, mut right) = (solids.pop().unwrap_or(1), stripes.pop().unwrap_or(9));
        if rng.random_bool(0.5) {
            std::mem::swap(&mut left, &mut right);
        }
        let mut rest: Vec<u8> = solids.into_iter().chain(stripes).collect();
        rest.shuffle(&mut rng);
        let mut rest = rest.into_iter();

        let spacing = 2.0 * BALL_RADIUS + RACK_GAP;
        let row_step = spacing * (3.0_f64).sqrt() / 2.0;
        let foot_x = surface.x_pos1 + surface.width() * 3.0 / 4.0;

        for row in 0..5u8 {
            for slot in 0..=row {
                let number = match (row, slot) {
                    (2, 1) => 8,
                    (4, 0) => left,
                    (4, 4) => right,
                    _ => rest.next().unwrap_or(8),
                };
                let pos = DVec2::new(
                    foot_x + f64::from(row) * row_step,
                    center_y + (f64::from(slot) - f64::from(row) / 2.0) * spacing,
                );
                table.add_body(pos, BALL_RADIUS, BALL_MASS, BallType::for_number(number), number);
            }
        }

        log::debug!("Racked {} balls with seed {}", table.bodies.len(), seed);
        table
    }

    /// Index of the cue ball, if present
    pub fn cue_ball_index(&self) -> Option<usize> {
        self.bodies.iter().position(|b| b.is_cue())
    }

    pub fn body(&self, id: u32) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Advance one frame using the settings' pockets
    pub fn step(&mut self, settings: &PhysicsSettings) -> Vec<PhysicsEvent> {
        self.frame += 1;
        step_physics(
            &mut self.bodies,
            &mut self.players,
            &mut self.turn,
            &settings.pockets,
            settings,
        )
    }

    pub fn is_settled(&self) -> bool {
        !are_balls_moving(&self.bodies)
    }
}
