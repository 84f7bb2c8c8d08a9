//! Best score across sessions
//!
//! A single integer persisted as a decimal string under a fixed key.

use crate::persistence::{self, Storage};

/// The persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key, shared with earlier builds of the game
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Raise the best score if `score` beats it; returns whether it did
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Parse a stored value the way earlier builds read it back
    ///
    /// Leading whitespace and an optional sign, then the leading run of
    /// digits; anything after them is ignored. No digits or a negative value
    /// reads as 0.
    pub fn parse(raw: &str) -> u64 {
        let trimmed = raw.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let digits = &rest[..end];
        if negative || digits.is_empty() {
            return 0;
        }
        // Only overflow can fail here
        digits.parse().unwrap_or(u64::MAX)
    }

    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => {
                let best = Self::parse(&raw);
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("High score unavailable: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> persistence::Result<()> {
        storage.set(Self::STORAGE_KEY, &self.best.to_string())?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}
