//! Simulation module
//!
//! All gameplay logic lives here:
//! - One call to [`tick`] per fixed step
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod state;
pub mod tick;

pub use collision::{Aabb, car_hitbox, first_collision, player_hitbox};
pub use difficulty::{Difficulty, DifficultySettings};
pub use state::{Car, CarPaint, GameEvent, GameState, Player};
pub use tick::{TickInput, tick};
