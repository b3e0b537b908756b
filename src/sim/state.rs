//! Game state and core simulation types
//!
//! Everything the renderer reads between ticks lives here. All of it is
//! serializable, so a mid-run snapshot can be persisted and resumed with
//! identical behavior (the RNG is part of the state).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::{Tuning, TuningError};

/// Field dimensions used by [`GameState::new`]
pub const DEFAULT_FIELD: Vec2 = Vec2::new(800.0, 600.0);

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play, including the short belt pause between levels
    Playing,
    /// Run ended; only the confirm input is honored
    GameOver,
}

/// Ship lifecycle as a tagged state.
///
/// Each variant carries only the data that state needs, so combinations
/// like "exploding and invincible" are unrepresentable. Terminal death is
/// world-level ([`GamePhase::GameOver`]), not a ship state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipState {
    /// Post-spawn invincibility: the ship blinks and ignores asteroid
    /// contact until the blink counter runs out, or until thrusting cuts
    /// the window short after a fixed delay.
    Spawning {
        blinks_remaining: u32,
        /// Ticks left in the current blink phase
        blink_ticks: u32,
        /// Early-exit countdown, armed by the first thrust
        escape_ticks: Option<u32>,
    },
    /// Normal control
    Active,
    /// Fixed-duration explosion; the ship is uncontrollable
    Exploding { ticks_remaining: u32 },
}

/// Asteroid size tier. Derived from the radius, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidTier {
    Large,
    Medium,
    Small,
}

impl AsteroidTier {
    /// Classify a radius against the tuned tier radii.
    pub fn from_radius(radius: f32, tuning: &Tuning) -> Self {
        if radius >= tuning.large_radius() {
            AsteroidTier::Large
        } else if radius >= tuning.medium_radius() {
            AsteroidTier::Medium
        } else {
            AsteroidTier::Small
        }
    }

    /// Collision radius for this tier
    pub fn radius(self, tuning: &Tuning) -> f32 {
        match self {
            AsteroidTier::Large => tuning.large_radius(),
            AsteroidTier::Medium => tuning.medium_radius(),
            AsteroidTier::Small => tuning.small_radius(),
        }
    }

    /// Points awarded when an asteroid of this tier is destroyed
    pub fn points(self, tuning: &Tuning) -> u64 {
        match self {
            AsteroidTier::Large => tuning.points_large,
            AsteroidTier::Medium => tuning.points_medium,
            AsteroidTier::Small => tuning.points_small,
        }
    }

    /// Tier produced by fragmentation, if any
    pub fn split(self) -> Option<AsteroidTier> {
        match self {
            AsteroidTier::Large => Some(AsteroidTier::Medium),
            AsteroidTier::Medium => Some(AsteroidTier::Small),
            AsteroidTier::Small => None,
        }
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    /// Velocity in px/tick, fixed at spawn
    pub vel: Vec2,
    /// Collision radius; one of the three tier values
    pub radius: f32,
    /// Static rotation of the silhouette, render-only
    pub angle: f32,
    /// Per-vertex radius jitter in [1-jag, 1+jag], fixed at creation.
    /// The length is the polygon's vertex count.
    pub offsets: Vec<f32>,
}

impl Asteroid {
    /// Size tier of this asteroid
    pub fn tier(&self, tuning: &Tuning) -> AsteroidTier {
        AsteroidTier::from_radius(self.radius, tuning)
    }
}

/// A fired laser. Point-sized for collision purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub pos: Vec2,
    /// Velocity in px/tick, fixed at fire time from the ship's heading
    pub vel: Vec2,
    /// Cumulative distance traveled; compared against the travel cap
    pub traveled: f32,
    /// Ticks left in the hit explosion (0 = in flight)
    pub explode_ticks: u32,
    /// False once the laser has struck something
    pub active: bool,
}

impl Laser {
    /// Whether the renderer should draw the hit explosion
    #[inline]
    pub fn exploding(&self) -> bool {
        self.explode_ticks > 0
    }
}

/// The player's ship. Exactly one exists while a life is in play; a
/// respawn replaces it wholesale (new identity, fresh lasers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub radius: f32,
    /// Heading in radians. Positive y points down the screen, so π/2
    /// faces up and the forward direction is (cos θ, -sin θ).
    pub heading: f32,
    /// Signed rotation in radians per tick, derived from held input
    pub rot: f32,
    /// Velocity accumulator driven by thrust and decayed by friction
    pub thrust: Vec2,
    pub thrusting: bool,
    /// Fire debounce: cleared on fire, re-armed only by releasing the key
    pub can_fire: bool,
    pub lasers: Vec<Laser>,
    pub state: ShipState,
}

impl Ship {
    /// A fresh ship at `pos`, facing up, in its invincibility window.
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            radius: tuning.ship_radius(),
            heading: std::f32::consts::FRAC_PI_2,
            rot: 0.0,
            thrust: Vec2::ZERO,
            thrusting: false,
            can_fire: true,
            lasers: Vec::new(),
            state: ShipState::Spawning {
                blinks_remaining: (tuning.ship_invincibility_dur / tuning.ship_blink_dur).ceil()
                    as u32,
                blink_ticks: tuning.ticks(tuning.ship_blink_dur),
                escape_ticks: None,
            },
        }
    }

    /// Nose position; lasers spawn here
    pub fn nose(&self) -> Vec2 {
        self.pos + 1.5 * self.radius * Vec2::new(self.heading.cos(), -self.heading.sin())
    }

    /// True during the post-spawn invincibility window
    #[inline]
    pub fn invincible(&self) -> bool {
        matches!(self.state, ShipState::Spawning { .. })
    }

    #[inline]
    pub fn exploding(&self) -> bool {
        matches!(self.state, ShipState::Exploding { .. })
    }

    /// Whether the renderer should draw the ship this tick. Alternates
    /// with the blink counter while spawning, always true otherwise.
    pub fn blink_visible(&self) -> bool {
        match self.state {
            ShipState::Spawning {
                blinks_remaining, ..
            } => blinks_remaining % 2 == 0,
            _ => true,
        }
    }
}

/// Discrete notifications for the renderer/HUD, drained once per frame
/// via [`GameState::take_events`] so overlays update without polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new level began; the banner should show
    LevelStarted(u32),
    /// The score changed; payload is the new total
    ScoreChanged(u64),
    /// A ship explosion finished resolving
    ShipDestroyed { lives_left: u32 },
    /// Terminal state entered
    GameOver { score: u64 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; serialized so a restored snapshot resumes identically
    pub rng: Pcg32,
    /// Validated gameplay constants
    pub tuning: Tuning,
    /// Field dimensions; positions wrap on this torus
    pub field: Vec2,
    pub phase: GamePhase,
    /// Current level, starting at 1
    pub level: u32,
    /// Monotonic within a run; reset only by [`GameState::new_game`]
    pub score: u64,
    /// Running session maximum, preserved across resets
    pub high_score: u64,
    pub lives: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    /// Ticks until the pending belt spawns (between levels)
    pub belt_countdown: Option<u32>,
    /// Ticks left on the level banner; display timing only
    pub banner_ticks: u32,
    /// Events since the last drain
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// New game on the default field with the classic tuning.
    pub fn new(seed: u64) -> Self {
        // the default tuning is valid by construction
        Self::from_parts(seed, DEFAULT_FIELD, Tuning::default())
    }

    /// New game with explicit field dimensions and tuning.
    ///
    /// Fails fast on an invalid configuration; nothing is clamped.
    pub fn with_config(seed: u64, field: Vec2, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        if !(field.x > 0.0 && field.y > 0.0 && field.is_finite()) {
            return Err(TuningError::NonPositive {
                name: "field dimension",
                value: field.min_element(),
            });
        }
        Ok(Self::from_parts(seed, field, tuning))
    }

    fn from_parts(seed: u64, field: Vec2, tuning: Tuning) -> Self {
        let ship = Ship::new(field * 0.5, &tuning);
        let lives = tuning.lives;
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            field,
            phase: GamePhase::Playing,
            level: 1,
            score: 0,
            high_score: 0,
            lives,
            time_ticks: 0,
            ship,
            asteroids: Vec::new(),
            belt_countdown: None,
            banner_ticks: 0,
            events: Vec::new(),
        };
        state.new_game();
        state
    }

    /// Reset to a fresh run: level 1, full lives, zero score. The session
    /// high score and the RNG stream carry over. The first belt spawns
    /// immediately (later levels delay theirs).
    pub fn new_game(&mut self) {
        self.phase = GamePhase::Playing;
        self.level = 1;
        self.score = 0;
        self.lives = self.tuning.lives;
        self.ship = Ship::new(self.field * 0.5, &self.tuning);
        self.banner_ticks = self.tuning.ticks(self.tuning.level_banner_dur);
        self.belt_countdown = None;
        self.push_event(GameEvent::LevelStarted(self.level));
        super::spawn::create_asteroid_belt(self);
        log::info!("new game (seed {})", self.seed);
    }

    /// Award points, keep the session high score current.
    pub(crate) fn add_score(&mut self, points: u64) {
        self.score += points;
        self.high_score = self.high_score.max(self.score);
        self.push_event(GameEvent::ScoreChanged(self.score));
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain the events accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the level banner is within its display window
    #[inline]
    pub fn banner_visible(&self) -> bool {
        self.banner_ticks > 0
    }
}
