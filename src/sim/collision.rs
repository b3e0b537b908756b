//! Collision detection for the torus field
//!
//! Everything here is circle-circle: Euclidean center distance against
//! the sum of radii, with strict inequality so exact tangency never
//! counts as a hit. Lasers are points (radius zero). Scan order and the
//! one-hit-per-tick policies live in `tick`; this module only answers
//! geometric questions.

use glam::Vec2;

use crate::dist_between;
use crate::sim::state::{Asteroid, Laser, Ship};

/// Strict circle-circle overlap. Tangency is not a hit.
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    dist_between(a, b) < ra + rb
}

/// Whether a flying laser's point overlaps an asteroid. Spent lasers
/// (already struck something) never hit again.
#[inline]
pub fn laser_hits(laser: &Laser, roid: &Asteroid) -> bool {
    laser.active && circles_overlap(laser.pos, 0.0, roid.pos, roid.radius)
}

/// Index of the first asteroid overlapping the ship, in insertion order.
/// At most one ship collision is processed per tick, so the first hit is
/// the only one that matters.
pub fn first_ship_hit(ship: &Ship, asteroids: &[Asteroid]) -> Option<usize> {
    asteroids
        .iter()
        .position(|roid| circles_overlap(ship.pos, ship.radius, roid.pos, roid.radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ShipState;
    use crate::tuning::Tuning;

    fn roid_at(pos: Vec2, radius: f32) -> Asteroid {
        Asteroid {
            pos,
            vel: Vec2::ZERO,
            radius,
            angle: 0.0,
            offsets: vec![1.0; 8],
        }
    }

    #[test]
    fn overlap_basics() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(25.0, 0.0);
        assert!(circles_overlap(a, 20.0, b, 10.0));
        assert!(!circles_overlap(a, 10.0, b, 10.0));
    }

    #[test]
    fn tangency_is_not_a_hit() {
        // centers exactly sum-of-radii apart
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(30.0, 0.0);
        assert!(!circles_overlap(a, 20.0, b, 10.0));
        // a hair closer is
        assert!(circles_overlap(a, 20.0, Vec2::new(29.99, 0.0), 10.0));
    }

    #[test]
    fn spent_laser_never_hits() {
        let roid = roid_at(Vec2::new(100.0, 100.0), 60.0);
        let mut laser = Laser {
            pos: roid.pos,
            vel: Vec2::ZERO,
            traveled: 0.0,
            explode_ticks: 0,
            active: true,
        };
        assert!(laser_hits(&laser, &roid));
        laser.active = false;
        assert!(!laser_hits(&laser, &roid));
    }

    #[test]
    fn first_ship_hit_picks_earliest_overlap() {
        let tuning = Tuning::default();
        let mut ship = Ship::new(Vec2::new(400.0, 300.0), &tuning);
        ship.state = ShipState::Active;

        let far = roid_at(Vec2::new(0.0, 0.0), 60.0);
        let near_a = roid_at(Vec2::new(420.0, 300.0), 60.0);
        let near_b = roid_at(Vec2::new(380.0, 300.0), 60.0);
        let asteroids = vec![far, near_a, near_b];

        assert_eq!(first_ship_hit(&ship, &asteroids), Some(1));
    }

    #[test]
    fn no_hit_when_clear() {
        let tuning = Tuning::default();
        let ship = Ship::new(Vec2::new(400.0, 300.0), &tuning);
        let asteroids = vec![roid_at(Vec2::new(0.0, 0.0), 60.0)];
        assert_eq!(first_ship_hit(&ship, &asteroids), None);
    }
}
