//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Run seeds (wall clock)
//! - Frame timing (fixed-step accumulator)
//! - HUD text and overlay visibility (DOM on web)

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Converts variable frame deltas into a whole number of fixed steps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    /// Last frame timestamp in milliseconds (0 = none yet)
    last_time: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a `requestAnimationFrame` timestamp; returns the steps to run
    pub fn advance(&mut self, time_ms: f64) -> u32 {
        let dt = if self.last_time > 0.0 {
            ((time_ms - self.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        self.last_time = time_ms;

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            // Drop the backlog rather than fast-forwarding later
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    /// Forget accumulated time (after restart or a hidden tab)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = 0.0;
    }
}

/// Rolling frames-per-second estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample is the next slot to be overwritten
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (59.0 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Seed for a new run
#[cfg(target_arch = "wasm32")]
pub fn run_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn run_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// DOM helpers for the HUD
#[cfg(target_arch = "wasm32")]
pub mod dom {
    use web_sys::Document;

    pub fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    /// Replace the text of `#id`, skipping the write if unchanged
    pub fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    /// Toggle the `hidden` class on `#id`
    pub fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let result = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
            if let Err(e) = result {
                log::warn!("Could not toggle #{}: {:?}", id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_runs_one_step() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1000.0), 1);
    }

    #[test]
    fn test_sixty_hz_frames_run_one_step_each() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0);
        let mut total = 0;
        for i in 1..=60 {
            total += clock.advance(1000.0 + i as f64 * 1000.0 / 60.0);
        }
        assert!((59..=61).contains(&total));
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0);
        assert_eq!(clock.advance(6000.0), MAX_SUBSTEPS);
        // Backlog dropped: a normal frame afterwards runs at most two steps
        assert!(clock.advance(6016.0) <= 2);
    }

    #[test]
    fn test_fps_counter_estimates_rate() {
        let mut fps = FpsCounter::default();
        for i in 0..120 {
            fps.record(1.0 + i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }
}
