//! Asteroid spawning: level belts and fragmentation
//!
//! All randomness flows through the state's seeded RNG, so belts and
//! fragments are reproducible from the run seed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::sim::state::{Asteroid, GameState};
use crate::tuning::Tuning;

/// Replace the asteroid set with a fresh belt of `2 × level` large
/// asteroids at uniformly random positions, each re-sampled until it has
/// clearance from the ship so nothing spawns on top of the player.
pub fn create_asteroid_belt(state: &mut GameState) {
    let count = (state.level * 2) as usize;
    let clearance = state.tuning.asteroid_size * 2.0 + state.ship.radius;
    let large = state.tuning.large_radius();

    state.asteroids.clear();
    for _ in 0..count {
        let pos = loop {
            let candidate = Vec2::new(
                state.rng.random::<f32>() * state.field.x,
                state.rng.random::<f32>() * state.field.y,
            );
            if candidate.distance(state.ship.pos) >= clearance {
                break candidate;
            }
        };
        let roid = spawn_asteroid(&mut state.rng, &state.tuning, state.level, pos, large);
        state.asteroids.push(roid);
    }
    log::info!("level {}: belt of {} asteroids", state.level, count);
}

/// Build one asteroid with randomized velocity, rotation and silhouette.
///
/// Velocity magnitude is uniform in [0, max × level multiplier] with an
/// independently random sign per axis; the silhouette is a vertex count
/// in [vert/2, 1.5·vert] with one jitter offset per vertex in
/// [1-jag, 1+jag], fixed for the asteroid's lifetime.
pub fn spawn_asteroid(
    rng: &mut Pcg32,
    tuning: &Tuning,
    level: u32,
    pos: Vec2,
    radius: f32,
) -> Asteroid {
    let speed_cap = tuning.asteroid_speed * tuning.speed_multiplier(level) / tuning.tick_rate;
    let axis = |rng: &mut Pcg32| {
        let magnitude = rng.random::<f32>() * speed_cap;
        if rng.random_bool(0.5) { magnitude } else { -magnitude }
    };
    let vel = Vec2::new(axis(rng), axis(rng));

    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    let vert = (rng.random::<f32>() * (tuning.asteroid_vert + 1) as f32) as u32
        + tuning.asteroid_vert / 2;
    let offsets = (0..vert)
        .map(|_| rng.random::<f32>() * tuning.asteroid_jag * 2.0 + 1.0 - tuning.asteroid_jag)
        .collect();

    Asteroid {
        pos,
        vel,
        radius,
        angle,
        offsets,
    }
}

/// Destroy the asteroid at `index`: remove it, spawn two children of the
/// next-smaller tier at the same position (none if it was already
/// small), and award the destroyed tier's points.
///
/// Removal is a `swap_remove`, safe under the reverse scans in `tick`;
/// children land at the tail, past any index still to be visited.
pub fn destroy_asteroid(state: &mut GameState, index: usize) {
    let roid = state.asteroids.swap_remove(index);
    let tier = roid.tier(&state.tuning);

    if let Some(child_tier) = tier.split() {
        let child_radius = child_tier.radius(&state.tuning);
        for _ in 0..2 {
            let child =
                spawn_asteroid(&mut state.rng, &state.tuning, state.level, roid.pos, child_radius);
            state.asteroids.push(child);
        }
    }

    state.add_score(tier.points(&state.tuning));
}
