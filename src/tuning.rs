//! Gameplay tuning and validation
//!
//! Every gameplay constant lives in [`Tuning`]; the defaults are the
//! classic arcade values. A `Tuning` is validated once when a game state
//! is constructed: out-of-range values are rejected with a
//! [`TuningError`], never silently clamped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime-tunable gameplay configuration.
///
/// Speeds and accelerations are per second; the simulation converts them
/// to per-tick units at spawn or command time using [`Tuning::tick_rate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Simulation ticks per second
    pub tick_rate: f32,
    /// Friction coefficient of space per second (0 = none)
    pub friction: f32,
    /// Starting number of lives
    pub lives: u32,

    /// Ship height in pixels; the collision radius is half this
    pub ship_size: f32,
    /// Ship acceleration in px/s²
    pub ship_thrust: f32,
    /// Turn speed in degrees per second
    pub turn_speed: f32,
    /// Alternative turn speed while precision aim is held
    pub precision_turn_speed: f32,
    /// Ship explosion duration in seconds
    pub ship_explode_dur: f32,
    /// Length of one invincibility blink in seconds
    pub ship_blink_dur: f32,
    /// Post-spawn invincibility duration in seconds
    pub ship_invincibility_dur: f32,
    /// Delay between the first thrust and the invincibility cut-off, seconds
    pub blink_escape_dur: f32,

    /// Maximum concurrent lasers
    pub laser_max: usize,
    /// Laser speed in px/s
    pub laser_speed: f32,
    /// Maximum laser travel as a fraction of the field width
    pub laser_dist_frac: f32,
    /// Laser hit-explosion duration in seconds
    pub laser_explode_dur: f32,

    /// Large-tier asteroid size in pixels (smaller tiers derive from it)
    pub asteroid_size: f32,
    /// Maximum asteroid speed at level 1, px/s
    pub asteroid_speed: f32,
    /// Jaggedness of asteroid silhouettes (0 = circle, 1 = max)
    pub asteroid_jag: f32,
    /// Mean vertex count of asteroid polygons
    pub asteroid_vert: u32,

    /// Points for destroying a large asteroid
    pub points_large: u64,
    /// Points for destroying a medium asteroid
    pub points_medium: u64,
    /// Points for destroying a small asteroid
    pub points_small: u64,

    /// Level banner display time in seconds
    pub level_banner_dur: f32,
    /// Pause before the belt spawns on levels after the first, seconds
    pub belt_delay_dur: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_rate: 30.0,
            friction: 0.7,
            lives: 3,

            ship_size: 30.0,
            ship_thrust: 5.0,
            turn_speed: 270.0,
            precision_turn_speed: 100.0,
            ship_explode_dur: 0.3,
            ship_blink_dur: 0.1,
            ship_invincibility_dur: 3.0,
            blink_escape_dur: 0.5,

            laser_max: 10,
            laser_speed: 600.0,
            laser_dist_frac: 0.5,
            laser_explode_dur: 0.1,

            asteroid_size: 120.0,
            asteroid_speed: 50.0,
            asteroid_jag: 0.3,
            asteroid_vert: 10,

            points_large: 20,
            points_medium: 50,
            points_small: 100,

            level_banner_dur: 3.0,
            belt_delay_dur: 1.0,
        }
    }
}

impl Tuning {
    /// Reject constants outside their operating range.
    ///
    /// Called by the state constructors; a failure here is a startup
    /// configuration error, not a recoverable runtime condition.
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(name: &'static str, value: f32) -> Result<(), TuningError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::NonPositive { name, value })
            }
        }

        positive("tick_rate", self.tick_rate)?;
        positive("ship_size", self.ship_size)?;
        positive("ship_thrust", self.ship_thrust)?;
        positive("turn_speed", self.turn_speed)?;
        positive("precision_turn_speed", self.precision_turn_speed)?;
        positive("ship_explode_dur", self.ship_explode_dur)?;
        positive("ship_blink_dur", self.ship_blink_dur)?;
        positive("ship_invincibility_dur", self.ship_invincibility_dur)?;
        positive("blink_escape_dur", self.blink_escape_dur)?;
        positive("laser_speed", self.laser_speed)?;
        positive("laser_explode_dur", self.laser_explode_dur)?;
        positive("asteroid_size", self.asteroid_size)?;
        positive("asteroid_speed", self.asteroid_speed)?;
        positive("level_banner_dur", self.level_banner_dur)?;
        positive("belt_delay_dur", self.belt_delay_dur)?;

        if self.laser_max == 0 {
            return Err(TuningError::ZeroLaserCap);
        }
        if self.lives == 0 {
            return Err(TuningError::OutOfRange {
                name: "lives",
                value: 0.0,
                valid: "[1, ∞)",
            });
        }
        if self.asteroid_vert < 2 {
            return Err(TuningError::OutOfRange {
                name: "asteroid_vert",
                value: self.asteroid_vert as f32,
                valid: "[2, ∞)",
            });
        }
        // friction/tick_rate ≥ 1 would flip the thrust vector's sign
        // instead of decaying it
        if !(0.0..self.tick_rate).contains(&self.friction) {
            return Err(TuningError::OutOfRange {
                name: "friction",
                value: self.friction,
                valid: "[0, tick_rate)",
            });
        }
        if !(0.0..=1.0).contains(&self.asteroid_jag) {
            return Err(TuningError::OutOfRange {
                name: "asteroid_jag",
                value: self.asteroid_jag,
                valid: "[0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.laser_dist_frac) || self.laser_dist_frac == 0.0 {
            return Err(TuningError::OutOfRange {
                name: "laser_dist_frac",
                value: self.laser_dist_frac,
                valid: "(0, 1]",
            });
        }
        Ok(())
    }

    /// Seconds per tick
    #[inline]
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// Convert a duration in seconds to whole ticks (nearest, at least 1)
    #[inline]
    pub fn ticks(&self, seconds: f32) -> u32 {
        ((seconds * self.tick_rate).round() as u32).max(1)
    }

    /// Ship collision radius
    #[inline]
    pub fn ship_radius(&self) -> f32 {
        self.ship_size / 2.0
    }

    /// Large-tier asteroid radius
    pub fn large_radius(&self) -> f32 {
        (self.asteroid_size / 2.0).ceil()
    }

    /// Medium-tier asteroid radius
    pub fn medium_radius(&self) -> f32 {
        (self.asteroid_size / 5.0).ceil()
    }

    /// Small-tier asteroid radius
    pub fn small_radius(&self) -> f32 {
        (self.asteroid_size / 8.0).ceil()
    }

    /// Asteroid speed cap grows linearly with the level
    #[inline]
    pub fn speed_multiplier(&self, level: u32) -> f32 {
        1.0 + 0.1 * level as f32
    }
}

/// A gameplay constant was outside its operating range.
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// A constant that must be strictly positive and finite was not.
    NonPositive { name: &'static str, value: f32 },
    /// A constant fell outside its valid range.
    OutOfRange {
        name: &'static str,
        value: f32,
        valid: &'static str,
    },
    /// The laser pool must admit at least one laser.
    ZeroLaserCap,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::NonPositive { name, value } => {
                write!(f, "'{name}' = {value} must be positive and finite")
            }
            TuningError::OutOfRange { name, value, valid } => {
                write!(f, "'{name}' = {value} is outside valid range {valid}")
            }
            TuningError::ZeroLaserCap => write!(f, "'laser_max' must be at least 1"),
        }
    }
}

impl std::error::Error for TuningError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn zero_tick_rate_rejected() {
        let tuning = Tuning {
            tick_rate: 0.0,
            ..Tuning::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NonPositive {
                name: "tick_rate",
                value: 0.0
            })
        );
    }

    #[test]
    fn negative_asteroid_size_rejected() {
        let tuning = Tuning {
            asteroid_size: -120.0,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonPositive {
                name: "asteroid_size",
                ..
            })
        ));
    }

    #[test]
    fn zero_laser_cap_rejected() {
        let tuning = Tuning {
            laser_max: 0,
            ..Tuning::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::ZeroLaserCap));
    }

    #[test]
    fn excessive_jag_rejected() {
        let tuning = Tuning {
            asteroid_jag: 1.5,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::OutOfRange {
                name: "asteroid_jag",
                ..
            })
        ));
    }

    #[test]
    fn invalid_config_fails_game_construction() {
        use crate::sim::{DEFAULT_FIELD, GameState};

        let tuning = Tuning {
            tick_rate: 0.0,
            ..Tuning::default()
        };
        assert!(GameState::with_config(1, DEFAULT_FIELD, tuning).is_err());
        assert!(
            GameState::with_config(1, glam::Vec2::new(-800.0, 600.0), Tuning::default()).is_err()
        );
    }

    #[test]
    fn classic_tier_radii() {
        let tuning = Tuning::default();
        assert_eq!(tuning.large_radius(), 60.0);
        assert_eq!(tuning.medium_radius(), 24.0);
        assert_eq!(tuning.small_radius(), 15.0);
    }

    #[test]
    fn classic_durations_in_ticks() {
        let tuning = Tuning::default();
        assert_eq!(tuning.ticks(tuning.ship_blink_dur), 3);
        assert_eq!(tuning.ticks(tuning.ship_explode_dur), 9);
        assert_eq!(tuning.ticks(tuning.laser_explode_dur), 3);
        assert_eq!(tuning.ticks(tuning.blink_escape_dur), 15);
        assert_eq!(tuning.ticks(tuning.level_banner_dur), 90);
        assert_eq!(tuning.ticks(tuning.belt_delay_dur), 30);
    }
}
