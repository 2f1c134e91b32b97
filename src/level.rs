//! The fixed course layout and the randomly placed pickups.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Entity, Rect, Role};

/// `[width, height, x, y]` for every platform the player can stand on.
const PLATFORMS: &[[f32; 4]] = &[
    [95.0, 90.0, 515.0, 475.0],
    [145.0, 75.0, 645.0, 261.0],
    [145.0, 65.0, 950.0, 184.0],
    [95.0, 140.0, 1040.0, 456.0],
    [85.0, 260.0, 1550.0, 332.0],
    [290.0, 75.0, 1995.0, 255.0],
    [115.0, 100.0, 2550.0, 467.0],
    [145.0, 75.0, 2740.0, 132.0],
    [65.0, 210.0, 2980.0, 380.0],
    [550.0, 69.0, 3300.0, 210.0],
    [85.0, 93.0, 3759.0, 476.0],
    [80.0, 93.0, 4225.0, 480.0],
    [73.0, 240.0, 4490.0, 342.0],
    [80.0, 97.0, 4810.0, 472.0],
    [220.0, 55.0, 5230.0, 285.0],
    [80.0, 250.0, 5705.0, 340.0],
    [80.0, 80.0, 6445.0, 485.0],
    [80.0, 80.0, 6530.0, 393.0],
    [80.0, 80.0, 6610.0, 310.0],
];

/// Ground slabs; the gaps between them are pits.
const GROUND: &[[f32; 4]] = &[
    [2055.0, 100.0, 0.0, 565.0],
    [865.0, 100.0, 2255.0, 565.0],
    [1260.0, 100.0, 3305.0, 565.0],
    [1170.0, 100.0, 4757.0, 565.0],
    [1800.0, 100.0, 6170.0, 565.0],
];

const PLANTS: &[[f32; 4]] = &[
    [45.0, 130.0, 1070.0, 330.0],
    [40.0, 125.0, 4240.0, 365.0],
    [45.0, 120.0, 5328.0, 330.0],
];

const GOAL: [f32; 4] = [100.0, 700.0, 7380.0, 200.0];

pub const COIN_SIZE: f32 = 50.0;
pub const HOSTILE_SIZE: f32 = 50.0;
pub const POWERUP_WIDTH: f32 = 60.0;
pub const POWERUP_HEIGHT: f32 = 50.0;
/// Power-ups appear no lower than this.
pub const POWERUP_MAX_Y: i32 = 200;

fn from_row(role: Role, &[w, h, x, y]: &[f32; 4]) -> Entity {
    Entity::new(role, Rect::new(x, y, w, h))
}

/// Platforms, ground, plants and the goal wall, in that order.
pub fn blocking_regions() -> Vec<Entity> {
    PLATFORMS
        .iter()
        .chain(GROUND)
        .map(|row| from_row(Role::Walkable, row))
        .chain(PLANTS.iter().map(|row| from_row(Role::Hazard, row)))
        .chain(std::iter::once(from_row(Role::Goal, &GOAL)))
        .collect()
}

/// A coin resting on the ground line at a random point along the course.
pub fn coin(cfg: &GameConfig, rng: &mut impl Rng) -> Entity {
    let span = (cfg.coin_field_width - COIN_SIZE).max(1.0) as i32;
    let x = rng.gen_range(0..span) as f32;
    Entity::new(
        Role::Coin,
        Rect::new(x, cfg.ground_y - COIN_SIZE, COIN_SIZE, COIN_SIZE),
    )
}

/// A creature entering at the right edge of the viewport, somewhere above ground.
pub fn hostile(cfg: &GameConfig, rng: &mut impl Rng) -> Entity {
    let span = (cfg.ground_y - HOSTILE_SIZE).max(1.0) as i32;
    let y = rng.gen_range(0..span) as f32;
    Entity::new(
        Role::Hostile,
        Rect::new(cfg.viewport_width, y, HOSTILE_SIZE, HOSTILE_SIZE),
    )
}

/// A star entering at the right edge of the viewport, high in the sky.
pub fn power_up(cfg: &GameConfig, rng: &mut impl Rng) -> Entity {
    let y = rng.gen_range(0..POWERUP_MAX_Y) as f32;
    Entity::new(
        Role::PowerUp,
        Rect::new(cfg.viewport_width, y, POWERUP_WIDTH, POWERUP_HEIGHT),
    )
}
