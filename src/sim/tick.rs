//! Fixed timestep simulation tick
//!
//! One [`tick`] advances the whole world: held input is applied, every
//! entity integrates, collisions resolve, destroyed asteroids fragment,
//! and the ship/level lifecycle steps its countdowns. The renderer reads
//! the state only between ticks, so each tick leaves a complete,
//! consistent snapshot.
//!
//! All timers are tick-counted fields on the entity they concern. There
//! are no deferred callbacks anywhere, so a countdown can never outlive
//! the entity it targets (a respawn replaces the ship, countdowns and
//! all).

use glam::Vec2;

use crate::sim::state::{GameEvent, GamePhase, GameState, Laser, Ship, ShipState};
use crate::sim::{collision, physics, spawn};

/// Held input sampled once per tick.
///
/// Turn and thrust act while held. `fire` is debounced through the
/// ship's fire-ready flag, so a held key fires exactly once until
/// released. `confirm` is only honored on the game-over screen. Holding
/// both turn directions cancels to zero rotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Swaps in the slower precision turn rate while held
    pub precision_aim: bool,
    /// Restart after game over
    pub confirm: bool,
}

/// Advance the game state by one fixed timestep.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        if input.confirm {
            state.new_game();
        }
        return;
    }

    state.time_ticks += 1;

    apply_input(state, input);

    // integrate every entity before any collision test
    physics::integrate_ship(&mut state.ship, state.field, &state.tuning);
    physics::integrate_asteroids(&mut state.asteroids, state.field);
    physics::integrate_lasers(&mut state.ship, state.field, &state.tuning);

    resolve_laser_hits(state);
    resolve_ship_collision(state);

    advance_ship_lifecycle(state, input);
    advance_level_timers(state);
}

/// Translate held input into this tick's rotation, thrust and fire
/// intent. An exploding ship is uncontrollable.
fn apply_input(state: &mut GameState, input: &TickInput) {
    if state.ship.exploding() {
        state.ship.rot = 0.0;
        state.ship.thrusting = false;
        return;
    }

    let turn_speed = if input.precision_aim {
        state.tuning.precision_turn_speed
    } else {
        state.tuning.turn_speed
    };
    let rot_per_tick = turn_speed.to_radians() / state.tuning.tick_rate;
    state.ship.rot = match (input.turn_left, input.turn_right) {
        (true, false) => rot_per_tick,
        (false, true) => -rot_per_tick,
        _ => 0.0,
    };

    state.ship.thrusting = input.thrust;

    if input.fire {
        fire_laser(state);
    } else {
        // releasing the key is what re-arms the debounce
        state.ship.can_fire = true;
    }
}

/// Append a laser from the ship's nose if the debounce and pool cap
/// allow it. The fire-ready flag clears on every press, even a capped
/// one, and only a release restores it.
fn fire_laser(state: &mut GameState) {
    let ship = &mut state.ship;
    if ship.can_fire && ship.lasers.len() < state.tuning.laser_max {
        let speed = state.tuning.laser_speed / state.tuning.tick_rate;
        let dir = Vec2::new(ship.heading.cos(), -ship.heading.sin());
        ship.lasers.push(Laser {
            pos: ship.nose(),
            vel: dir * speed,
            traveled: 0.0,
            explode_ticks: 0,
            active: true,
        });
    }
    ship.can_fire = false;
}

/// Laser↔asteroid pass.
///
/// Both collections are scanned in reverse index order so mid-scan
/// removal (always `swap_remove`) never disturbs a not-yet-visited
/// element. The first hit ends the scan for that asteroid; the laser is
/// spent immediately, so one laser destroys at most one asteroid.
fn resolve_laser_hits(state: &mut GameState) {
    for i in (0..state.asteroids.len()).rev() {
        for j in (0..state.ship.lasers.len()).rev() {
            if !collision::laser_hits(&state.ship.lasers[j], &state.asteroids[i]) {
                continue;
            }

            let laser = &mut state.ship.lasers[j];
            laser.active = false;
            laser.explode_ticks = state.tuning.ticks(state.tuning.laser_explode_dur);

            destroy_and_check_clear(state, i);
            break;
        }
    }
}

/// Ship↔asteroid pass. Skipped entirely while the ship is spawning
/// (invincible) or already exploding; at most one collision per tick.
/// The asteroid that hit the ship is destroyed in the same tick.
fn resolve_ship_collision(state: &mut GameState) {
    if state.ship.state != ShipState::Active {
        return;
    }

    if let Some(i) = collision::first_ship_hit(&state.ship, &state.asteroids) {
        state.ship.state = ShipState::Exploding {
            ticks_remaining: state.tuning.ticks(state.tuning.ship_explode_dur),
        };
        destroy_and_check_clear(state, i);
    }
}

fn destroy_and_check_clear(state: &mut GameState, index: usize) {
    spawn::destroy_asteroid(state, index);
    if state.asteroids.is_empty() {
        next_level(state);
    }
}

/// Level-clear transition: bump the level, show the banner, and schedule
/// the next belt after a short breather.
fn next_level(state: &mut GameState) {
    state.level += 1;
    state.banner_ticks = state.tuning.ticks(state.tuning.level_banner_dur);
    state.belt_countdown = Some(state.tuning.ticks(state.tuning.belt_delay_dur));
    state.push_event(GameEvent::LevelStarted(state.level));
    log::info!("level cleared, advancing to {}", state.level);
}

/// Step the ship's lifecycle countdowns.
fn advance_ship_lifecycle(state: &mut GameState, input: &TickInput) {
    match state.ship.state {
        ShipState::Spawning {
            mut blinks_remaining,
            mut blink_ticks,
            mut escape_ticks,
        } => {
            blink_ticks = blink_ticks.saturating_sub(1);
            if blink_ticks == 0 {
                blink_ticks = state.tuning.ticks(state.tuning.ship_blink_dur);
                blinks_remaining = blinks_remaining.saturating_sub(1);
            }

            // the first thrust arms a one-shot early exit from the
            // invincibility window
            if input.thrust && escape_ticks.is_none() {
                escape_ticks = Some(state.tuning.ticks(state.tuning.blink_escape_dur));
            }
            if let Some(ticks) = escape_ticks {
                let ticks = ticks.saturating_sub(1);
                if ticks == 0 {
                    blinks_remaining = 0;
                }
                escape_ticks = Some(ticks);
            }

            state.ship.state = if blinks_remaining == 0 {
                ShipState::Active
            } else {
                ShipState::Spawning {
                    blinks_remaining,
                    blink_ticks,
                    escape_ticks,
                }
            };
        }
        ShipState::Exploding { ticks_remaining } => {
            let ticks_remaining = ticks_remaining.saturating_sub(1);
            if ticks_remaining > 0 {
                state.ship.state = ShipState::Exploding { ticks_remaining };
                return;
            }

            state.lives = state.lives.saturating_sub(1);
            state.push_event(GameEvent::ShipDestroyed {
                lives_left: state.lives,
            });
            if state.lives == 0 {
                state.phase = GamePhase::GameOver;
                state.ship.state = ShipState::Exploding { ticks_remaining: 0 };
                state.push_event(GameEvent::GameOver { score: state.score });
                log::info!(
                    "game over at level {} with {} points",
                    state.level,
                    state.score
                );
            } else {
                state.ship = Ship::new(state.field * 0.5, &state.tuning);
            }
        }
        ShipState::Active => {}
    }
}

/// Step the banner and delayed-belt countdowns.
fn advance_level_timers(state: &mut GameState) {
    if state.banner_ticks > 0 {
        state.banner_ticks -= 1;
    }

    if let Some(ticks) = state.belt_countdown {
        if ticks == 0 {
            state.belt_countdown = None;
            spawn::create_asteroid_belt(state);
        } else {
            state.belt_countdown = Some(ticks - 1);
        }
    }
}
