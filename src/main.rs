//! Toroids entry point
//!
//! Headless demo: runs the simulation under a small autopilot and logs
//! the run. A rendering front-end drives [`toroids::sim::tick`] the same
//! way, feeding real key states instead of the autopilot's.

use toroids::highscores::HighScores;
use toroids::normalize_angle;
use toroids::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xA57E_801D);
    log::info!("toroids demo starting (seed {seed})");

    let mut state = GameState::new(seed);
    let mut scores = HighScores::new();

    // five simulated minutes, tops
    let max_ticks = (state.tuning.tick_rate as u64) * 60 * 5;
    while state.phase == GamePhase::Playing && state.time_ticks < max_ticks {
        let input = autopilot(&state);
        tick(&mut state, &input);

        for event in state.take_events() {
            match event {
                GameEvent::LevelStarted(level) => log::info!("level {level} started"),
                GameEvent::ScoreChanged(score) => log::debug!("score {score}"),
                GameEvent::ShipDestroyed { lives_left } => {
                    log::info!("ship lost, {lives_left} lives left")
                }
                GameEvent::GameOver { score } => log::info!("game over, final score {score}"),
            }
        }
    }

    scores.add_score(state.score, state.level, state.time_ticks);
    println!(
        "final score {} (level {}, {} ticks, session best {})",
        state.score,
        state.level,
        state.time_ticks,
        state.high_score
    );
    if let Some(rank) = scores.potential_rank(state.score) {
        log::debug!("run would re-enter the board at rank {rank}");
    }
}

/// Turn toward the nearest asteroid and fire. Precision aim once the
/// nose is nearly lined up, and a fire release every other tick so the
/// debounce re-arms.
fn autopilot(state: &GameState) -> TickInput {
    let ship = &state.ship;
    let nearest = state
        .asteroids
        .iter()
        .min_by(|a, b| {
            ship.pos
                .distance(a.pos)
                .partial_cmp(&ship.pos.distance(b.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = nearest else {
        // between levels: coast and keep the trigger released
        return TickInput::default();
    };

    // headings use screen coordinates: forward is (cos θ, -sin θ)
    let to_target = target.pos - ship.pos;
    let desired = normalize_angle((-to_target.y).atan2(to_target.x));
    let mut error = normalize_angle(desired - ship.heading);
    if error > std::f32::consts::PI {
        error -= std::f32::consts::TAU;
    }

    let lined_up = error.abs() < 0.35;
    TickInput {
        turn_left: error > 0.02,
        turn_right: error < -0.02,
        thrust: false,
        fire: lined_up && state.time_ticks.is_multiple_of(2),
        precision_aim: lined_up,
        confirm: false,
    }
}
