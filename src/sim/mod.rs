//! Deterministic simulation module
//!
//! All table physics lives here. This module must be pure and deterministic:
//! - One step per frame, velocities in distance per frame
//! - Seeded RNG only (rack setup)
//! - Stable iteration order (collection order, ids assigned on insertion)
//! - No rendering or platform dependencies

pub mod body;
pub mod boundary;
pub mod collision;
pub mod pocket;
pub mod state;
pub mod tick;

pub use body::{BallType, Body, CUE_BALL_NUMBER};
pub use boundary::{Rectangle, resolve_boundary};
pub use collision::{
    Contact, contact, is_overlapping, pair_mut, resolve_collision, resolve_collisions,
    resolve_position, resolve_velocity,
};
pub use pocket::{Pocket, PocketDetector};
pub use state::{Player, Table, TurnInformation, assign_target_groups};
pub use tick::{PhysicsEvent, are_balls_moving, step_physics};
