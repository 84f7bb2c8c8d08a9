//! Fixed timestep simulation tick
//!
//! Advances the runner, traffic, collisions and score by one step.

use rand::Rng;

use super::collision::first_collision;
use super::difficulty::Difficulty;
use super::state::{Car, CarPaint, GameEvent, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump requested (key press or tap)
    pub jump: bool,
}

/// Advance the game state by one fixed step
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !state.game_over {
        step_run(state, input);
    }
    // The road keeps scrolling behind the game-over overlay, at the speed
    // this step ended with
    scroll_ground(state);
}

fn step_run(state: &mut GameState, input: &TickInput) {
    if input.jump {
        state.jump();
    }

    state.time_ticks += 1;
    state.player.step(state.ground_y);
    update_cars(state);

    if let Some(index) = first_collision(&state.player, &state.cars) {
        log::debug!("Hit car {} at x={:.1}", index, state.cars[index].x);
        state.end_run();
        return;
    }

    state.score_tenths += SCORE_TENTHS_PER_STEP;
    state.difficulty = Difficulty::for_score(&state.settings, state.score());
}

/// Shift the ground stripes left by the current speed
fn scroll_ground(state: &mut GameState) {
    state.ground_offset = (state.ground_offset - state.difficulty.speed) % STRIPE_PERIOD;
}

/// Move cars, drop the ones that left the screen, and run the spawn timer
fn update_cars(state: &mut GameState) {
    state.cars.retain_mut(|car| {
        car.x -= car.speed;
        !car.is_off_screen()
    });

    state.car_timer += 1;
    let interval = state.settings.spawn_interval(state.score());
    let timer = state.car_timer as f32;

    if timer > interval {
        if can_spawn_car(state) {
            // The gap is re-rolled inside; the attempt is spent either way
            spawn_car(state);
            state.car_timer = 0;
        } else if timer > interval * 3.0 {
            // Blocked for too long; retry sooner instead of waiting a full interval
            state.car_timer = (interval * 0.5).floor() as u32;
        }
    }
}

/// Whether the newest car is far enough in to allow another one
pub fn can_spawn_car(state: &mut GameState) -> bool {
    let Some(last) = state.cars.last() else {
        return true;
    };
    let gap = state.canvas_width - last.x;
    let required = state.difficulty.min_gap + state.rng.random::<f32>() * state.settings.gap_jitter;
    gap >= required
}

/// Push a new car at the right edge of the canvas if the gap allows it
///
/// Rolls its own gap check, so a spawn may still be refused after
/// [`can_spawn_car`] passed. Returns whether a car was added.
pub fn spawn_car(state: &mut GameState) -> bool {
    if !can_spawn_car(state) {
        log::debug!("Spawn refused: gap too small");
        return false;
    }

    let rng = &mut state.rng;
    let width = CAR_MIN_WIDTH + rng.random::<f32>() * CAR_WIDTH_JITTER;
    let variation = CAR_SPEED_MIN_FACTOR + rng.random::<f32>() * CAR_SPEED_JITTER;
    let paint = CarPaint::ALL[rng.random_range(0..CarPaint::ALL.len())];

    let car = Car {
        x: state.canvas_width,
        y: state.ground_y - CAR_HEIGHT + CAR_GROUND_SINK,
        width,
        height: CAR_HEIGHT,
        speed: state.difficulty.car_speed * variation,
        paint,
    };
    log::debug!(
        "Spawned {:?} car: width={:.1} speed={:.2}",
        car.paint,
        car.width,
        car.speed
    );
    state.cars.push(car);
    state.events.push(GameEvent::CarSpawned);
    true
}
