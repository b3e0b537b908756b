//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, carried inside the state
//! - Stable iteration order for every collision and removal scan
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::circles_overlap;
pub use state::{
    Asteroid, AsteroidTier, DEFAULT_FIELD, GameEvent, GamePhase, GameState, Laser, Ship, ShipState,
};
pub use tick::{TickInput, tick};
