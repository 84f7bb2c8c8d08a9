//! Difficulty scaling
//!
//! Tunables live in [`DifficultySettings`]; the live values are recomputed
//! from the score every running step.

use serde::{Deserialize, Serialize};

/// Tunable difficulty constants (read-only once the game starts)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultySettings {
    /// Ground scroll speed (px/step)
    pub initial_speed: f32,
    pub max_speed: f32,
    pub speed_increase: f32,

    /// Steps between spawn attempts
    pub initial_car_interval: f32,
    pub min_car_interval: f32,
    pub car_interval_decrease: f32,

    /// Minimum horizontal gap between the newest car and the right edge (px)
    pub initial_min_gap: f32,
    pub min_gap: f32,
    pub gap_decrease: f32,
    /// Random extra gap added on top of the minimum (px)
    pub gap_jitter: f32,

    /// Base car speed (px/step) before per-car variation
    pub initial_car_speed: f32,
    pub max_car_speed: f32,
    pub car_speed_increase: f32,

    /// Highest difficulty level
    pub level_cap: u32,
    /// Points per difficulty level
    pub points_per_level: u64,
    /// Points per spawn interval reduction step
    pub points_per_interval_step: u64,
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Self {
            initial_speed: 4.0,
            max_speed: 16.0,
            speed_increase: 0.3,

            initial_car_interval: 120.0,
            min_car_interval: 45.0,
            car_interval_decrease: 0.6,

            initial_min_gap: 350.0,
            min_gap: 100.0,
            gap_decrease: 1.8,
            gap_jitter: 100.0,

            initial_car_speed: 4.0,
            max_car_speed: 18.0,
            car_speed_increase: 0.35,

            level_cap: 10,
            points_per_level: 100,
            points_per_interval_step: 80,
        }
    }
}

impl DifficultySettings {
    /// Repair bounds loaded from user storage so every min <= initial <= max
    pub fn sanitized(mut self) -> Self {
        fn order(lo: &mut f32, hi: &mut f32) {
            if !lo.is_finite() || *lo < 0.0 {
                *lo = 0.0;
            }
            if !hi.is_finite() || *hi < *lo {
                *hi = *lo;
            }
        }

        order(&mut self.initial_speed, &mut self.max_speed);
        order(&mut self.initial_car_speed, &mut self.max_car_speed);
        order(&mut self.min_car_interval, &mut self.initial_car_interval);
        order(&mut self.min_gap, &mut self.initial_min_gap);

        for rate in [
            &mut self.speed_increase,
            &mut self.car_speed_increase,
            &mut self.car_interval_decrease,
            &mut self.gap_decrease,
            &mut self.gap_jitter,
        ] {
            if !rate.is_finite() || *rate < 0.0 {
                *rate = 0.0;
            }
        }

        self.level_cap = self.level_cap.max(1);
        self.points_per_level = self.points_per_level.max(1);
        self.points_per_interval_step = self.points_per_interval_step.max(1);
        self
    }

    /// Difficulty level for a whole-point score (1..=level_cap)
    pub fn level_for(&self, score: u64) -> u32 {
        let level = 1 + score / self.points_per_level;
        level.min(self.level_cap as u64) as u32
    }

    /// Steps the spawn timer must exceed before a car may spawn
    pub fn spawn_interval(&self, score: u64) -> f32 {
        let steps = (score / self.points_per_interval_step) as f32;
        (self.initial_car_interval - steps * self.car_interval_decrease).max(self.min_car_interval)
    }
}

/// Live difficulty values derived from the score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Ground scroll speed
    pub speed: f32,
    /// Base speed for newly spawned cars
    pub car_speed: f32,
    /// Minimum gap required before the next spawn
    pub min_gap: f32,
}

impl Difficulty {
    /// Values used before the first scored step (and after restart)
    pub fn initial(settings: &DifficultySettings) -> Self {
        Self {
            speed: settings.initial_speed,
            car_speed: settings.initial_car_speed,
            min_gap: settings.initial_min_gap,
        }
    }

    pub fn for_score(settings: &DifficultySettings, score: u64) -> Self {
        let level = settings.level_for(score) as f32;
        Self {
            speed: (settings.initial_speed + level * settings.speed_increase)
                .min(settings.max_speed),
            car_speed: (settings.initial_car_speed + level * settings.car_speed_increase)
                .min(settings.max_car_speed),
            min_gap: (settings.initial_min_gap - level * settings.gap_decrease)
                .max(settings.min_gap),
        }
    }
}
