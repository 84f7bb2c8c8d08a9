//! Car Hop - a side-scrolling runner that hops over traffic
//!
//! Core modules:
//! - `audio`: Procedural sound effects (Web Audio on wasm)
//! - `sim`: Simulation (player physics, car spawning, collisions, scoring)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform helpers
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `highscores`: The persisted best score
//! - `settings`: Persisted preferences and difficulty overrides

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep; all physics constants are per step at 60 Hz
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Canvas dimensions (pixels)
    pub const MAX_CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 300.0;
    /// Distance from the canvas bottom to the ground line
    pub const GROUND_MARGIN: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Resting y is this far above the ground line (feet sink slightly into the road)
    pub const PLAYER_GROUND_OFFSET: f32 = 45.0;
    pub const PLAYER_GRAVITY: f32 = 0.6;
    pub const PLAYER_JUMP_FORCE: f32 = -15.0;
    /// Steps between running animation frames
    pub const RUN_FRAME_STEPS: u32 = 5;

    /// Car defaults
    pub const CAR_HEIGHT: f32 = 40.0;
    pub const CAR_MIN_WIDTH: f32 = 50.0;
    pub const CAR_WIDTH_JITTER: f32 = 30.0;
    /// Cars sit this far below the ground line
    pub const CAR_GROUND_SINK: f32 = 15.0;
    pub const CAR_SPEED_MIN_FACTOR: f32 = 0.8;
    pub const CAR_SPEED_JITTER: f32 = 0.4;

    /// Score gained per running step
    pub const SCORE_TENTHS_PER_STEP: u64 = 1;

    /// Ground stripe period and size
    pub const STRIPE_PERIOD: f32 = 50.0;
    pub const STRIPE_WIDTH: f32 = 30.0;
    pub const STRIPE_HEIGHT: f32 = 4.0;
}

/// Canvas width for a given viewport width
#[inline]
pub fn canvas_width_for(viewport_width: f32) -> f32 {
    viewport_width.clamp(1.0, consts::MAX_CANVAS_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_width_caps_at_800() {
        assert_eq!(canvas_width_for(1920.0), 800.0);
        assert_eq!(canvas_width_for(375.0), 375.0);
    }
}
