//! Game state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::{Difficulty, DifficultySettings};
use crate::consts::*;

/// The controllable runner
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Left edge (fixed)
    pub x: f32,
    /// Top edge; grows downward
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Airborne after a jump until landing
    pub jumping: bool,
    /// Vertical velocity (px/step, negative = up)
    pub velocity: f32,
    pub gravity: f32,
    pub jump_force: f32,
    /// Running pose (0 or 1)
    pub run_frame: u8,
    /// Steps since the last pose change
    pub run_frame_count: u32,
}

impl Player {
    /// Create a runner standing on the given ground line
    pub fn on_ground(ground_y: f32) -> Self {
        Self {
            x: PLAYER_X,
            y: Self::rest_y(ground_y),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            jumping: false,
            velocity: 0.0,
            gravity: PLAYER_GRAVITY,
            jump_force: PLAYER_JUMP_FORCE,
            run_frame: 0,
            run_frame_count: 0,
        }
    }

    /// Lowest allowed y for a given ground line
    #[inline]
    pub fn rest_y(ground_y: f32) -> f32 {
        ground_y - PLAYER_GROUND_OFFSET
    }

    /// Put the runner back on the ground, motionless
    pub fn land(&mut self, ground_y: f32) {
        self.y = Self::rest_y(ground_y);
        self.velocity = 0.0;
        self.jumping = false;
    }

    /// Integrate one step of gravity and advance the running animation
    pub fn step(&mut self, ground_y: f32) {
        self.velocity += self.gravity;
        self.y += self.velocity;

        if self.y > Self::rest_y(ground_y) {
            self.land(ground_y);
        }

        if !self.jumping {
            self.run_frame_count += 1;
            if self.run_frame_count > RUN_FRAME_STEPS {
                self.run_frame = (self.run_frame + 1) % 2;
                self.run_frame_count = 0;
            }
        }
    }
}

/// Car body paints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarPaint {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl CarPaint {
    pub const ALL: [CarPaint; 5] = [
        CarPaint::Red,
        CarPaint::Blue,
        CarPaint::Green,
        CarPaint::Yellow,
        CarPaint::Purple,
    ];

    /// sRGB hex code
    pub fn hex(&self) -> u32 {
        match self {
            CarPaint::Red => 0xe74c3c,
            CarPaint::Blue => 0x3498db,
            CarPaint::Green => 0x2ecc71,
            CarPaint::Yellow => 0xf1c40f,
            CarPaint::Purple => 0x9b59b6,
        }
    }
}

/// An obstacle scrolling in from the right
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Leftward speed (px/step)
    pub speed: f32,
    pub paint: CarPaint,
}

impl Car {
    /// True once the whole body has left the screen
    pub fn is_off_screen(&self) -> bool {
        self.x <= -self.width
    }
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    CarSpawned,
    /// Run ended; `previous_high` is the best score before this run
    Crashed { score: u64, previous_high: u64 },
    /// The best score was raised at game over
    NewHighScore(u64),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: DifficultySettings,
    pub difficulty: Difficulty,

    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Road surface line (px from top)
    pub ground_y: f32,

    pub player: Player,
    /// Active cars, oldest (leftmost at spawn time) first
    pub cars: Vec<Car>,
    /// Steps since the last spawn
    pub car_timer: u32,
    /// Ground stripe scroll offset in (-STRIPE_PERIOD, 0]
    pub ground_offset: f32,

    /// Score in tenths of a point
    pub score_tenths: u64,
    pub high_score: u64,
    pub game_over: bool,
    /// Score shown on the game-over overlay
    pub final_score: u64,
    /// Best score before the run that just ended
    pub final_high_score: u64,
    /// Simulation step counter
    pub time_ticks: u64,

    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, viewport_width: f32, high_score: u64) -> Self {
        Self::with_settings(seed, viewport_width, high_score, DifficultySettings::default())
    }

    pub fn with_settings(
        seed: u64,
        viewport_width: f32,
        high_score: u64,
        settings: DifficultySettings,
    ) -> Self {
        let settings = settings.sanitized();
        let canvas_width = crate::canvas_width_for(viewport_width);
        let ground_y = CANVAS_HEIGHT - GROUND_MARGIN;

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            difficulty: Difficulty::initial(&settings),
            canvas_width,
            canvas_height: CANVAS_HEIGHT,
            ground_y,
            player: Player::on_ground(ground_y),
            cars: Vec::new(),
            car_timer: 0,
            ground_offset: 0.0,
            score_tenths: 0,
            high_score,
            game_over: false,
            final_score: 0,
            final_high_score: high_score,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Whole points, floored
    pub fn score(&self) -> u64 {
        self.score_tenths / 10
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Request a jump; ignored while airborne or after game over
    pub fn jump(&mut self) -> bool {
        if self.player.jumping || self.game_over {
            return false;
        }
        self.player.jumping = true;
        self.player.velocity = self.player.jump_force;
        self.events.push(GameEvent::Jumped);
        true
    }

    /// Start a fresh run, keeping the best score and canvas size
    pub fn restart(&mut self) {
        self.game_over = false;
        self.score_tenths = 0;
        self.difficulty = Difficulty::initial(&self.settings);
        self.cars.clear();
        self.car_timer = 0;
        self.player.land(self.ground_y);
        log::info!("Run restarted (best {})", self.high_score);
    }

    /// Fit the canvas to a new viewport width; the runner snaps to the ground
    pub fn resize(&mut self, viewport_width: f32) {
        self.canvas_width = crate::canvas_width_for(viewport_width);
        self.canvas_height = CANVAS_HEIGHT;
        self.ground_y = self.canvas_height - GROUND_MARGIN;
        self.player.y = Player::rest_y(self.ground_y);
    }

    /// End the run, raising the best score if it was beaten
    pub(crate) fn end_run(&mut self) {
        if self.game_over {
            return;
        }
        let score = self.score();
        self.game_over = true;
        self.final_score = score;
        self.final_high_score = self.high_score;
        self.events.push(GameEvent::Crashed {
            score,
            previous_high: self.high_score,
        });

        if score > self.high_score {
            self.high_score = score;
            self.events.push(GameEvent::NewHighScore(score));
            log::info!("New high score: {}", score);
        } else {
            log::info!("Game over at {} (best {})", score, self.high_score);
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(1, 1024.0, 42);
        assert_eq!(state.canvas_width, 800.0);
        assert_eq!(state.canvas_height, 300.0);
        assert_eq!(state.ground_y, 250.0);
        assert_eq!(state.player.y, 205.0);
        assert_eq!(state.player.x, 50.0);
        assert!(!state.player.jumping);
        assert!(state.cars.is_empty());
        assert_eq!(state.score(), 0);
        assert_eq!(state.high_score(), 42);
        assert!(!state.game_over);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut state = GameState::new(1, 800.0, 0);
        assert!(state.jump());
        assert_eq!(state.player.velocity, -15.0);
        assert!(!state.jump());
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_jump_ignored_after_game_over() {
        let mut state = GameState::new(1, 800.0, 0);
        state.game_over = true;
        assert!(!state.jump());
        assert!(!state.player.jumping);
    }

    #[test]
    fn test_player_lands_and_stops() {
        let mut player = Player::on_ground(250.0);
        player.jumping = true;
        player.velocity = -15.0;
        for _ in 0..200 {
            player.step(250.0);
            assert!(player.y <= Player::rest_y(250.0));
        }
        assert!(!player.jumping);
        assert_eq!(player.velocity, 0.0);
        assert_eq!(player.y, 205.0);
    }

    #[test]
    fn test_run_animation_toggles_every_six_steps() {
        let mut player = Player::on_ground(250.0);
        for _ in 0..5 {
            player.step(250.0);
        }
        assert_eq!(player.run_frame, 0);
        player.step(250.0);
        assert_eq!(player.run_frame, 1);
        assert_eq!(player.run_frame_count, 0);
    }

    #[test]
    fn test_run_animation_frozen_mid_air() {
        let mut player = Player::on_ground(250.0);
        player.jumping = true;
        player.velocity = -15.0;
        player.step(250.0);
        assert_eq!(player.run_frame_count, 0);
    }

    #[test]
    fn test_end_run_raises_high_score_once() {
        let mut state = GameState::new(1, 800.0, 10);
        state.score_tenths = 123;
        state.end_run();
        state.end_run();
        assert!(state.game_over);
        assert_eq!(state.high_score, 12);
        assert_eq!(state.final_score, 12);
        assert_eq!(state.final_high_score, 10);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Crashed {
                    score: 12,
                    previous_high: 10
                },
                GameEvent::NewHighScore(12),
            ]
        );
    }

    #[test]
    fn test_end_run_keeps_better_high_score() {
        let mut state = GameState::new(1, 800.0, 500);
        state.score_tenths = 120;
        state.end_run();
        assert_eq!(state.high_score, 500);
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore(_)))
        );
    }

    #[test]
    fn test_restart_resets_run_but_keeps_best() {
        let mut state = GameState::new(1, 800.0, 0);
        state.score_tenths = 5000;
        state.cars.push(Car {
            x: 100.0,
            y: 225.0,
            width: 60.0,
            height: 40.0,
            speed: 5.0,
            paint: CarPaint::Blue,
        });
        state.car_timer = 77;
        state.player.jumping = true;
        state.player.y = 100.0;
        state.end_run();

        state.restart();
        assert!(!state.game_over);
        assert_eq!(state.score(), 0);
        assert_eq!(state.high_score(), 500);
        assert!(state.cars.is_empty());
        assert_eq!(state.car_timer, 0);
        assert_eq!(state.player.y, 205.0);
        assert!(!state.player.jumping);
        assert_eq!(state.difficulty, Difficulty::initial(&state.settings));
    }

    #[test]
    fn test_resize_caps_width_and_grounds_player() {
        let mut state = GameState::new(1, 800.0, 0);
        state.player.y = 50.0;
        state.resize(400.0);
        assert_eq!(state.canvas_width, 400.0);
        assert_eq!(state.ground_y, 250.0);
        assert_eq!(state.player.y, 205.0);
        state.resize(3000.0);
        assert_eq!(state.canvas_width, 800.0);
    }

    #[test]
    fn test_car_off_screen_boundary() {
        let mut car = Car {
            x: -59.0,
            y: 225.0,
            width: 60.0,
            height: 40.0,
            speed: 5.0,
            paint: CarPaint::Green,
        };
        assert!(!car.is_off_screen());
        car.x = -60.0;
        assert!(car.is_off_screen());
    }
}
