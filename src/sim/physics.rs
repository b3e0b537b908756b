//! Fixed-timestep physics integration
//!
//! Velocities are expressed in px/tick, computed at spawn or command
//! time, so integration is a plain `p += v` followed by the torus wrap.
//! The wrap margin is the entity's radius: an entity slides fully off one
//! edge before re-entering from the other. Lasers are points, so their
//! margin is zero and they wrap at the exact edge.

use glam::Vec2;

use crate::sim::state::{Asteroid, Ship};
use crate::tuning::Tuning;

#[inline]
fn wrap_coord(x: f32, dim: f32, margin: f32) -> f32 {
    if x > dim + margin {
        -margin
    } else if x < -margin {
        dim + margin
    } else {
        x
    }
}

/// Re-normalize a position onto the torus `[-margin, dim + margin]²`.
pub fn wrap_position(pos: Vec2, field: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_coord(pos.x, field.x, margin),
        wrap_coord(pos.y, field.y, margin),
    )
}

/// Advance the ship one tick: thrust accumulation (or friction decay),
/// heading, position, wrap.
///
/// The thrust vector is an accumulator: while thrusting it gains
/// `thrust/tick_rate` along the heading each tick; otherwise it decays
/// geometrically toward zero. Position advances by the accumulator every
/// tick regardless of thrusting state. An exploding ship is frozen in
/// place but its accumulator keeps decaying.
pub fn integrate_ship(ship: &mut Ship, field: Vec2, tuning: &Tuning) {
    if ship.thrusting {
        let accel = tuning.ship_thrust / tuning.tick_rate;
        ship.thrust += accel * Vec2::new(ship.heading.cos(), -ship.heading.sin());
    } else {
        ship.thrust -= tuning.friction * ship.thrust / tuning.tick_rate;
    }

    if !ship.exploding() {
        ship.heading = crate::normalize_angle(ship.heading + ship.rot);
        ship.pos += ship.thrust;
    }
    ship.pos = wrap_position(ship.pos, field, ship.radius);
}

/// Drift all asteroids and wrap them.
pub fn integrate_asteroids(asteroids: &mut [Asteroid], field: Vec2) {
    for roid in asteroids {
        roid.pos += roid.vel;
        roid.pos = wrap_position(roid.pos, field, roid.radius);
    }
}

/// Move flying lasers, advance hit explosions, expire spent lasers.
///
/// A laser is removed once its cumulative travel exceeds the tuned
/// fraction of the field width (strictly greater, checked before it
/// moves again) or when its hit explosion finishes. The scan runs in
/// reverse index order so `swap_remove` never disturbs a not-yet-visited
/// element.
pub fn integrate_lasers(ship: &mut Ship, field: Vec2, tuning: &Tuning) {
    let max_travel = tuning.laser_dist_frac * field.x;
    for i in (0..ship.lasers.len()).rev() {
        let laser = &mut ship.lasers[i];

        if laser.traveled > max_travel {
            ship.lasers.swap_remove(i);
            continue;
        }

        if laser.explode_ticks > 0 {
            laser.explode_ticks -= 1;
            if laser.explode_ticks == 0 {
                ship.lasers.swap_remove(i);
            }
            continue;
        }

        laser.pos += laser.vel;
        laser.traveled += laser.vel.length();
        laser.pos = wrap_position(laser.pos, field, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Laser;
    use proptest::prelude::*;

    fn test_tuning() -> Tuning {
        Tuning::default()
    }

    #[test]
    fn wrap_is_identity_inside_bounds() {
        let field = Vec2::new(800.0, 600.0);
        let pos = Vec2::new(400.0, 300.0);
        assert_eq!(wrap_position(pos, field, 10.0), pos);
    }

    #[test]
    fn wrap_relocates_past_far_edge() {
        let field = Vec2::new(800.0, 600.0);
        // one step past width + radius comes back at -radius
        let pos = Vec2::new(810.5, 300.0);
        assert_eq!(wrap_position(pos, field, 10.0), Vec2::new(-10.0, 300.0));
        // and symmetrically on the near edge
        let pos = Vec2::new(-10.5, 300.0);
        assert_eq!(wrap_position(pos, field, 10.0), Vec2::new(810.0, 300.0));
    }

    #[test]
    fn wrap_boundary_is_inclusive() {
        // exactly dimension + radius stays put; the next positive step wraps
        let field = Vec2::new(800.0, 600.0);
        let edge = Vec2::new(810.0, 300.0);
        assert_eq!(wrap_position(edge, field, 10.0), edge);
        assert_eq!(
            wrap_position(edge + Vec2::new(1.0, 0.0), field, 10.0),
            Vec2::new(-10.0, 300.0)
        );
    }

    #[test]
    fn thrust_accumulates_while_held() {
        let tuning = test_tuning();
        let field = Vec2::new(800.0, 600.0);
        let mut ship = Ship::new(field * 0.5, &tuning);
        ship.thrusting = true;

        integrate_ship(&mut ship, field, &tuning);
        let after_one = ship.thrust.length();
        integrate_ship(&mut ship, field, &tuning);
        assert!(ship.thrust.length() > after_one);

        // facing up at spawn, so the accumulator points up (negative y)
        assert!(ship.thrust.y < 0.0);
        assert!(ship.thrust.x.abs() < 1e-4);
    }

    #[test]
    fn friction_decays_thrust_toward_zero() {
        let tuning = test_tuning();
        let field = Vec2::new(800.0, 600.0);
        let mut ship = Ship::new(field * 0.5, &tuning);
        ship.thrust = Vec2::new(6.0, -3.0);

        let mut last = ship.thrust.length();
        for _ in 0..300 {
            integrate_ship(&mut ship, field, &tuning);
            let len = ship.thrust.length();
            assert!(len <= last);
            last = len;
        }
        assert!(last < 1e-2);
    }

    #[test]
    fn laser_expires_only_after_exceeding_travel_cap() {
        let tuning = test_tuning();
        let field = Vec2::new(800.0, 600.0);
        let mut ship = Ship::new(field * 0.5, &tuning);
        let per_tick = tuning.laser_speed / tuning.tick_rate; // 20 px/tick
        ship.lasers.push(Laser {
            pos: ship.pos,
            vel: Vec2::new(per_tick, 0.0),
            traveled: 0.0,
            explode_ticks: 0,
            active: true,
        });

        let cap = tuning.laser_dist_frac * field.x; // 400 px
        // survives every tick whose entry travel is <= cap
        let surviving_ticks = (cap / per_tick).floor() as u32 + 1; // 21
        for _ in 0..surviving_ticks {
            integrate_lasers(&mut ship, field, &tuning);
            assert_eq!(ship.lasers.len(), 1);
        }
        assert!(ship.lasers[0].traveled > cap);
        integrate_lasers(&mut ship, field, &tuning);
        assert!(ship.lasers.is_empty());
    }

    #[test]
    fn laser_explosion_counts_down_then_removes() {
        let tuning = test_tuning();
        let field = Vec2::new(800.0, 600.0);
        let mut ship = Ship::new(field * 0.5, &tuning);
        ship.lasers.push(Laser {
            pos: ship.pos,
            vel: Vec2::new(20.0, 0.0),
            traveled: 0.0,
            explode_ticks: 3,
            active: false,
        });

        let frozen = ship.lasers[0].pos;
        integrate_lasers(&mut ship, field, &tuning);
        integrate_lasers(&mut ship, field, &tuning);
        assert_eq!(ship.lasers.len(), 1);
        // exploding lasers do not move
        assert_eq!(ship.lasers[0].pos, frozen);
        integrate_lasers(&mut ship, field, &tuning);
        assert!(ship.lasers.is_empty());
    }

    proptest! {
        #[test]
        fn wrap_always_lands_in_bounds(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            margin in 0.0f32..80.0,
        ) {
            let field = Vec2::new(800.0, 600.0);
            let wrapped = wrap_position(Vec2::new(x, y), field, margin);
            prop_assert!(wrapped.x >= -margin && wrapped.x <= field.x + margin);
            prop_assert!(wrapped.y >= -margin && wrapped.y <= field.y + margin);
        }
    }
}
