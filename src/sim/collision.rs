//! Axis-aligned hitbox tests between the runner and cars
//!
//! Hitboxes are inset from the drawn shapes so grazing contact is forgiven.

use super::state::{Car, Player};

/// Axis-aligned box in canvas pixels (y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap; touching edges do not count
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Runner hitbox: a narrow column through the torso and legs
pub fn player_hitbox(player: &Player) -> Aabb {
    Aabb::new(player.x + 8.0, player.y + 15.0, 15.0, 45.0)
}

/// Car hitbox: body minus bumpers and roof edge
pub fn car_hitbox(car: &Car) -> Aabb {
    Aabb::new(car.x + 5.0, car.y + 5.0, car.width - 10.0, car.height - 5.0)
}

/// Index of the first car (oldest first) overlapping the runner
pub fn first_collision(player: &Player, cars: &[Car]) -> Option<usize> {
    let hitbox = player_hitbox(player);
    cars.iter().position(|car| hitbox.intersects(&car_hitbox(car)))
}
