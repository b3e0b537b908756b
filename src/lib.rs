//! Toroids - classic asteroids on a wrap-around field
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `tuning`: Validated gameplay configuration
//! - `highscores`: In-session leaderboard
//!
//! Rendering, window glue and raw key-event wiring are external
//! collaborators: each frame they feed a [`sim::TickInput`] into
//! [`sim::tick()`] and draw from the [`sim::GameState`] snapshot between
//! ticks. The crate itself never touches a screen.

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

/// Euclidean distance between two points
#[inline]
pub fn dist_between(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
