//! Scene tessellation: game state to a triangle list in canvas pixels

use glam::Vec2;
use std::f32::consts::PI;

use super::shapes::{circle, rect, rotated_rect, sector};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Car, GameState, Player};

const HEAD_SEGMENTS: u32 = 20;
const WHEEL_SEGMENTS: u32 = 12;

/// Build the whole frame (ground, runner, then traffic on top)
pub fn build(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(512 + state.cars.len() * 84);
    let offset = if settings.reduced_motion {
        0.0
    } else {
        state.ground_offset
    };
    ground(&mut out, state.canvas_width, state.ground_y, offset);
    player(&mut out, &state.player);
    for car in &state.cars {
        self::car(&mut out, car);
    }
    out
}

/// Road band with dashed center line
pub fn ground(out: &mut Vec<Vertex>, width: f32, ground_y: f32, offset: f32) {
    rect(out, 0.0, ground_y + 10.0, width, 40.0, colors::ROAD);

    let mut x = offset;
    while x < width {
        rect(out, x, ground_y + 28.0, STRIPE_WIDTH, STRIPE_HEIGHT, colors::ROAD_STRIPE);
        x += STRIPE_PERIOD;
    }
}

/// The runner: head, hair, torso, swinging arms and legs
pub fn player(out: &mut Vec<Vertex>, player: &Player) {
    let (x, y) = (player.x, player.y);
    let swing = (player.run_frame_count as f32 * 0.5).sin() * 0.2;

    // Head with hair over the top half
    circle(out, Vec2::new(x + 15.0, y + 10.0), 10.0, colors::SKIN, HEAD_SEGMENTS);
    sector(
        out,
        Vec2::new(x + 15.0, y + 7.0),
        10.0,
        PI,
        2.0 * PI,
        colors::HAIR,
        HEAD_SEGMENTS / 2,
    );

    // Torso
    rect(out, x + 10.0, y + 20.0, 10.0, 20.0, colors::CLOTHES);

    // Arms
    let arm = Vec2::new(5.0, 15.0);
    rotated_rect(
        out,
        Vec2::new(x + 8.0, y + 22.0),
        -0.3 + swing,
        Vec2::ZERO,
        arm,
        colors::CLOTHES,
    );
    rotated_rect(
        out,
        Vec2::new(x + 22.0, y + 22.0),
        0.3 - swing,
        Vec2::new(-2.0, 0.0),
        arm,
        colors::CLOTHES,
    );

    // Legs: two alternating strides on the ground, tucked while airborne
    let (back, front, length) = if player.jumping {
        (-0.3, 0.3, 18.0)
    } else if player.run_frame == 0 {
        (-0.2, 0.2, 20.0)
    } else {
        (0.2, -0.2, 20.0)
    };
    let leg = Vec2::new(6.0, length);
    rotated_rect(out, Vec2::new(x + 12.0, y + 40.0), back, Vec2::ZERO, leg, colors::LEGS);
    rotated_rect(out, Vec2::new(x + 18.0, y + 40.0), front, Vec2::ZERO, leg, colors::LEGS);
}

/// A car body with two windows and two wheels
pub fn car(out: &mut Vec<Vertex>, car: &Car) {
    let (x, y, w, h) = (car.x, car.y, car.width, car.height);
    rect(out, x, y, w, h, colors::rgb(car.paint.hex()));

    rect(out, x + w * 0.15, y + 5.0, w * 0.3, h * 0.4, colors::WINDOW);
    rect(out, x + w * 0.55, y + 5.0, w * 0.3, h * 0.4, colors::WINDOW);

    circle(out, Vec2::new(x + w * 0.2, y + h), 5.0, colors::WHEEL, WHEEL_SEGMENTS);
    circle(out, Vec2::new(x + w * 0.8, y + h), 5.0, colors::WHEEL, WHEEL_SEGMENTS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CarPaint;

    fn sample_car() -> Car {
        Car {
            x: 300.0,
            y: 225.0,
            width: 60.0,
            height: 40.0,
            speed: 5.0,
            paint: CarPaint::Purple,
        }
    }

    #[test]
    fn test_ground_stripes_cover_width() {
        let mut out = Vec::new();
        ground(&mut out, 800.0, 250.0, -20.0);
        // Band + stripes starting at -20 every 50px up to 800
        assert_eq!(out.len(), 6 * (1 + 17));
    }

    #[test]
    fn test_car_uses_its_paint() {
        let mut out = Vec::new();
        car(&mut out, &sample_car());
        assert_eq!(out.len(), 6 * 3 + 2 * 3 * WHEEL_SEGMENTS as usize);
        assert_eq!(out[0].color, colors::rgb(0x9b59b6));
    }

    #[test]
    fn test_player_vertex_count_is_stable_across_poses() {
        let mut grounded = Vec::new();
        player(&mut grounded, &Player::on_ground(250.0));

        let mut airborne = Vec::new();
        let mut p = Player::on_ground(250.0);
        p.jumping = true;
        player(&mut airborne, &p);

        assert_eq!(grounded.len(), airborne.len());
    }

    #[test]
    fn test_build_includes_every_car() {
        let mut state = GameState::new(1, 800.0, 0);
        let empty = build(&state, &Settings::default()).len();
        state.cars.push(sample_car());
        state.cars.push(sample_car());
        let mut one = Vec::new();
        car(&mut one, &sample_car());
        assert_eq!(build(&state, &Settings::default()).len(), empty + 2 * one.len());
    }

    #[test]
    fn test_reduced_motion_pins_stripes() {
        let mut state = GameState::new(1, 800.0, 0);
        state.ground_offset = -37.0;
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let frame = build(&state, &settings);
        // First stripe starts at x = 0 instead of the scrolled offset
        let stripe = &frame[6];
        assert_eq!(stripe.position[0], 0.0);
    }
}
