//! Pool Sim entry point
//!
//! Headless run: racks a table, breaks, and steps until every ball stops.
//!
//! Usage: `pool-sim [SETTINGS_JSON] [SEED]`

use std::path::Path;

use glam::DVec2;
use pool_sim::PhysicsSettings;
use pool_sim::sim::{PhysicsEvent, Table};

/// Give up on a break that hasn't settled after this many frames
const MAX_FRAMES: u64 = 50_000;

fn main() {
    env_logger::init();
    log::info!("Pool Sim (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => PhysicsSettings::load(Path::new(&path)),
        None => PhysicsSettings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(20);

    let mut table = Table::eight_ball(&settings, seed);
    log::info!("Table racked with seed: {}", seed);

    let Some(cue) = table.cue_ball_index() else {
        log::error!("No cue ball on the table");
        return;
    };
    table.bodies[cue].set_velocity(DVec2::new(32.0, 0.6));

    let mut collisions = 0usize;
    let mut cushions = 0usize;
    while !table.is_settled() && table.frame < MAX_FRAMES {
        for event in table.step(&settings) {
            match event {
                PhysicsEvent::BallCollision { .. } => collisions += 1,
                PhysicsEvent::CushionHit { .. } => cushions += 1,
                PhysicsEvent::Pocketed { id } => log::info!("Frame {}: ball {} down", table.frame, id),
            }
        }
    }

    if !table.is_settled() {
        log::warn!("Break still moving after {} frames", MAX_FRAMES);
    }

    println!("Settled after {} frames", table.frame);
    println!("Ball collisions: {}, cushion hits: {}", collisions, cushions);
    println!("First ball struck: {:?}", table.turn.first_hit_ball_type);
    let pocketed: Vec<u8> = table
        .turn
        .pocketed_balls
        .iter()
        .filter_map(|&id| table.body(id))
        .map(|b| b.ball_number())
        .collect();
    println!("Pocketed: {:?}", pocketed);
    for (i, player) in table.players.iter().enumerate() {
        println!("Player {} group: {:?}", i + 1, player.target_ball_type());
    }
}
