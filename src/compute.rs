//! Game-logic functions over a `World`.
//!
//! Each function mutates the world in place and reports what happened as
//! `GameEvent`s. All randomness comes through an injected RNG so callers
//! control determinism (tests use a seeded `StdRng`).

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Direction, Facing, GameEvent, Outcome, Player, Role, World};
use crate::level;
use crate::physics;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the world for a fresh play-through.
pub fn init_world(cfg: &GameConfig, rng: &mut impl Rng) -> World {
    let mut entities = level::blocking_regions();
    entities.extend((0..cfg.coin_count).map(|_| level::coin(cfg, rng)));
    entities.extend((0..cfg.initial_hostiles).map(|_| level::hostile(cfg, rng)));
    entities.push(level::power_up(cfg, rng));

    World {
        player: Player::new(cfg.ground_y, cfg.starting_lives),
        entities,
        background_x: 0.0,
        spawn_countdown: cfg.spawn_interval_ticks(),
        outcome: None,
        frame: 0,
    }
}

// ── Input-driven transitions ─────────────────────────────────────────────────

pub fn press_move(world: &mut World, dir: Direction, cfg: &GameConfig) {
    let player = &mut world.player;
    match dir {
        Direction::Left => {
            player.body.dx = -cfg.player_speed;
            player.facing = Facing::Left;
        }
        Direction::Right => {
            player.body.dx = cfg.player_speed;
            player.facing = Facing::Right;
        }
    }
}

/// Stop running, but only if still running in `dir`: letting go of Left
/// while Right is held keeps the player moving right.
pub fn release_move(world: &mut World, dir: Direction) {
    let body = &mut world.player.body;
    let moving_that_way = match dir {
        Direction::Left => body.dx < 0.0,
        Direction::Right => body.dx > 0.0,
    };
    if moving_that_way {
        body.dx = 0.0;
    }
}

/// Jump if the player is standing on something. Returns whether it jumped.
pub fn request_jump(world: &mut World, cfg: &GameConfig) -> bool {
    if world.is_over() {
        return false;
    }
    let blocks = world.walkable_rects();
    physics::try_jump(&mut world.player.body, &blocks, cfg)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the world by one tick. Does nothing once the outcome is decided.
pub fn tick(world: &mut World, rng: &mut impl Rng, cfg: &GameConfig) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if world.is_over() {
        return events;
    }
    world.frame += 1;

    // ── 1. Player physics ────────────────────────────────────────────────────
    let blocks = world.walkable_rects();
    let report = physics::step_body(&mut world.player.body, &blocks, cfg);

    // ── 2. Keep the player inside the dead-zone ──────────────────────────────
    clamp_to_dead_zone(&mut world.player, cfg);

    // ── 3. Scroll the world against the player's motion ──────────────────────
    // A player pressed against a wall is not moving, so the world holds still.
    let delta = if report.blocked_horizontally {
        0.0
    } else {
        scroll_delta(&world.player, cfg)
    };
    if delta != 0.0 {
        apply_scroll(world, delta);
    }

    // ── 4. Creatures walk left under gravity ─────────────────────────────────
    // Platforms moved with the scroll, so collide against their new positions.
    let blocks = world.walkable_rects();
    for hostile in world.entities.iter_mut().filter(|e| e.role == Role::Hostile) {
        hostile.body.dx = -cfg.hostile_speed;
        physics::step_body(&mut hostile.body, &blocks, cfg);
    }

    // ── 5. Stars drift left ──────────────────────────────────────────────────
    for star in world.entities.iter_mut().filter(|e| e.role == Role::PowerUp) {
        star.body.translate(-cfg.powerup_speed, 0.0);
    }

    // ── 6. Drop movers that can never come back into view ────────────────────
    cull_lost_movers(world, cfg);

    // ── 7. Timed spawns ──────────────────────────────────────────────────────
    world.spawn_countdown = world.spawn_countdown.saturating_sub(1);
    if world.spawn_countdown == 0 {
        world.entities.push(level::hostile(cfg, rng));
        world.entities.push(level::power_up(cfg, rng));
        world.spawn_countdown = cfg.spawn_interval_ticks();
        log::debug!("frame {}: spawned hostile and power-up", world.frame);
        events.push(GameEvent::Spawned);
    }

    // ── 8. Contacts ──────────────────────────────────────────────────────────
    let reached_goal = resolve_contacts(world, &mut events);

    // ── 9. Falling into a pit ────────────────────────────────────────────────
    if world.player.rect().bottom() >= cfg.viewport_height {
        world.player.lives = 0;
        events.push(GameEvent::FellOff);
    }

    // ── 10. Termination ──────────────────────────────────────────────────────
    let outcome = if world.player.lives == 0 {
        Some(Outcome::Lost)
    } else if reached_goal {
        Some(Outcome::Won)
    } else {
        None
    };
    if let Some(outcome) = outcome {
        world.outcome = Some(outcome);
        events.push(GameEvent::Finished(outcome));
    }

    events
}

// ── Tick stages ──────────────────────────────────────────────────────────────

/// Right edge may not pass the screen centre; left edge may not pass the
/// margin. Only one side can apply in a tick.
pub fn clamp_to_dead_zone(player: &mut Player, cfg: &GameConfig) {
    let right_clamp = cfg.right_clamp();
    if player.rect().right() > right_clamp {
        player.body.set_right(right_clamp);
    } else if player.rect().left() < cfg.left_margin {
        player.body.set_left(cfg.left_margin);
    }
}

/// Horizontal offset to apply to the world this tick.
///
/// Zero while the player stands still, and zero while the player is left of
/// the scroll band, where they walk freely instead.
pub fn scroll_delta(player: &Player, cfg: &GameConfig) -> f32 {
    let dx = player.body.dx;
    if dx == 0.0 || player.rect().left() < cfg.scroll_band_left() {
        return 0.0;
    }
    -dx.signum() * cfg.scroll_speed
}

/// Shift every entity and the backdrop by `delta`, once each.
pub fn apply_scroll(world: &mut World, delta: f32) {
    for entity in &mut world.entities {
        entity.body.translate(delta, 0.0);
    }
    world.background_x += delta;
}

fn cull_lost_movers(world: &mut World, cfg: &GameConfig) {
    let floor = cfg.viewport_height;
    let far_left = -cfg.viewport_width;
    world.entities.retain(|e| {
        !matches!(e.role, Role::Hostile | Role::PowerUp)
            || (e.rect().top() <= floor && e.rect().right() >= far_left)
    });
}

/// Apply every contact category the player touches this tick. All categories
/// that fire apply; none takes precedence. Returns whether the goal was hit.
fn resolve_contacts(world: &mut World, events: &mut Vec<GameEvent>) -> bool {
    let coins = take_touching(world, Role::Coin);
    if coins > 0 {
        world.player.points += coins;
        events.push(GameEvent::CoinsCollected(coins));
    }

    if take_touching(world, Role::PowerUp) > 0 {
        world.player.lives += 1;
        events.push(GameEvent::PowerUpCollected);
    }

    let player_rect = *world.player.rect();
    if world.of_role(Role::Hazard).any(|e| e.rect().intersects(&player_rect)) {
        world.player.lives = 0;
        events.push(GameEvent::HazardTouched);
    }

    if take_touching(world, Role::Hostile) > 0 {
        world.player.lives = world.player.lives.saturating_sub(1);
        events.push(GameEvent::HostileHit);
    }

    let reached_goal = take_touching(world, Role::Goal) > 0;
    if reached_goal {
        events.push(GameEvent::GoalReached);
    }
    reached_goal
}

/// Remove every entity of `role` overlapping the player; return how many.
fn take_touching(world: &mut World, role: Role) -> u32 {
    let player_rect = *world.player.rect();
    let before = world.entities.len();
    world
        .entities
        .retain(|e| e.role != role || !e.rect().intersects(&player_rect));
    (before - world.entities.len()) as u32
}
