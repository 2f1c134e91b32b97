use side_scroller::compute::*;
use side_scroller::config::GameConfig;
use side_scroller::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn cfg() -> GameConfig {
    GameConfig::default()
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn ground() -> Entity {
    Entity::new(Role::Walkable, Rect::new(0.0, 565.0, 5000.0, 100.0))
}

/// A world holding only `entities`, with the player standing on the ground
/// line at the left margin (x = 100..190, y = 485..565).
fn bare_world(entities: Vec<Entity>) -> World {
    let mut player = Player::new(565.0, 5);
    player.body.set_left(100.0);
    World {
        player,
        entities,
        background_x: 0.0,
        spawn_countdown: cfg().spawn_interval_ticks(),
        outcome: None,
        frame: 0,
    }
}

fn blocking_positions(world: &World) -> Vec<(f32, f32)> {
    world
        .entities
        .iter()
        .filter(|e| e.role.is_blocking())
        .map(|e| (e.rect().x, e.rect().y))
        .collect()
}

// ── init_world ────────────────────────────────────────────────────────────────

#[test]
fn init_world_layout_counts() {
    let w = init_world(&cfg(), &mut seeded_rng());
    assert_eq!(w.count(Role::Walkable), 24);
    assert_eq!(w.count(Role::Hazard), 3);
    assert_eq!(w.count(Role::Goal), 1);
    assert_eq!(w.count(Role::Coin), 30);
    assert_eq!(w.count(Role::Hostile), 2);
    assert_eq!(w.count(Role::PowerUp), 1);
}

#[test]
fn init_world_player_and_counters() {
    let w = init_world(&cfg(), &mut seeded_rng());
    assert_eq!(w.player.rect().left(), 50.0);
    assert_eq!(w.player.rect().bottom(), 565.0);
    assert_eq!(w.player.lives, 5);
    assert_eq!(w.player.points, 0);
    assert_eq!(w.spawn_countdown, 300);
    assert_eq!(w.outcome, None);
    assert_eq!(w.frame, 0);
}

#[test]
fn init_world_coins_sit_on_ground_within_field() {
    let w = init_world(&cfg(), &mut seeded_rng());
    for coin in w.of_role(Role::Coin) {
        assert_eq!(coin.rect().bottom(), 565.0);
        assert!(coin.rect().left() >= 0.0 && coin.rect().left() < 6450.0);
    }
}

#[test]
fn init_world_hostiles_enter_at_viewport_right() {
    let w = init_world(&cfg(), &mut seeded_rng());
    for h in w.of_role(Role::Hostile) {
        assert_eq!(h.rect().left(), 900.0);
        assert!(h.rect().top() >= 0.0 && h.rect().top() < 515.0);
    }
}

// ── Input transitions ────────────────────────────────────────────────────────

#[test]
fn press_move_sets_speed_and_facing() {
    let c = cfg();
    let mut w = bare_world(vec![ground()]);
    press_move(&mut w, Direction::Left, &c);
    assert_eq!(w.player.body.dx, -10.0);
    assert_eq!(w.player.facing, Facing::Left);
    press_move(&mut w, Direction::Right, &c);
    assert_eq!(w.player.body.dx, 10.0);
    assert_eq!(w.player.facing, Facing::Right);
}

#[test]
fn release_only_stops_matching_direction() {
    let c = cfg();
    let mut w = bare_world(vec![ground()]);
    press_move(&mut w, Direction::Right, &c);
    release_move(&mut w, Direction::Left);
    assert_eq!(w.player.body.dx, 10.0);
    release_move(&mut w, Direction::Right);
    assert_eq!(w.player.body.dx, 0.0);
}

#[test]
fn jump_request_on_ground_and_in_air() {
    let c = cfg();
    let mut w = bare_world(vec![ground()]);
    assert!(request_jump(&mut w, &c));
    assert_eq!(w.player.body.dy, -13.0);
    assert!(request_jump(&mut w, &c)); // still on the ground: same impulse, not more
    assert_eq!(w.player.body.dy, -13.0);

    tick(&mut w, &mut seeded_rng(), &c);
    assert!(!request_jump(&mut w, &c));
    assert!(w.player.body.dy > -13.0);
}

#[test]
fn jump_lands_exactly_back_on_ground() {
    let c = cfg();
    let mut rng = seeded_rng();
    let mut w = bare_world(vec![ground()]);
    assert!(request_jump(&mut w, &c));

    let mut left_ground = false;
    for _ in 0..200 {
        tick(&mut w, &mut rng, &c);
        if w.player.rect().bottom() < 565.0 {
            left_ground = true;
        } else if left_ground {
            break;
        }
    }
    assert!(left_ground);
    assert_eq!(w.player.rect().bottom(), 565.0);
    assert_eq!(w.player.body.dy, 0.0);
}

#[test]
fn wall_scrolled_into_airborne_player_is_not_support() {
    let c = cfg();
    let wall = Entity::new(Role::Walkable, Rect::new(192.0, 0.0, 50.0, 565.0));
    let mut w = bare_world(vec![ground(), wall]);
    w.player.body.set_bottom(300.0);
    w.player.body.dy = 2.0;

    apply_scroll(&mut w, -5.0);
    assert!(w.entities[1].rect().intersects(w.player.rect()));
    assert!(!request_jump(&mut w, &c));
    assert_eq!(w.player.body.dy, 2.0);
}

#[test]
fn running_into_a_wall_mid_air_grants_no_jumps() {
    let c = cfg();
    let mut rng = seeded_rng();
    let wall = Entity::new(Role::Walkable, Rect::new(452.0, 0.0, 50.0, 565.0));
    let mut w = bare_world(vec![ground(), wall]);
    w.player.body.set_right(450.0);
    w.player.body.set_bottom(300.0);
    w.player.body.dy = 2.0;
    press_move(&mut w, Direction::Right, &c);

    let mut last_bottom = w.player.rect().bottom();
    for _ in 0..20 {
        tick(&mut w, &mut rng, &c);
        assert!(!request_jump(&mut w, &c));
        assert!(w.player.rect().bottom() > last_bottom);
        last_bottom = w.player.rect().bottom();
    }
    // Pinned against the wall, so the world never scrolled.
    assert_eq!(w.entities[1].rect().left(), 452.0);
    assert_eq!(w.background_x, 0.0);
    assert_eq!(w.player.rect().right(), 450.0);
}

// ── Dead-zone & scroll ───────────────────────────────────────────────────────

#[test]
fn clamp_holds_right_edge_at_screen_centre() {
    let c = cfg();
    let mut w = bare_world(vec![ground()]);
    w.player.body.set_left(400.0); // right = 490
    tick(&mut w, &mut seeded_rng(), &c);
    assert_eq!(w.player.rect().right(), 450.0);
}

#[test]
fn clamp_holds_left_edge_at_margin() {
    let c = cfg();
    let mut w = bare_world(vec![ground()]);
    w.player.body.set_left(50.0);
    tick(&mut w, &mut seeded_rng(), &c);
    assert_eq!(w.player.rect().left(), 100.0);
}

#[test]
fn scroll_shifts_every_blocking_region_once() {
    let c = cfg();
    let mut w = init_world(&c, &mut seeded_rng());
    w.player.body.set_left(300.0);
    press_move(&mut w, Direction::Right, &c);
    let before = blocking_positions(&w);

    tick(&mut w, &mut seeded_rng(), &c);

    let after = blocking_positions(&w);
    assert_eq!(before.len(), after.len());
    for ((bx, by), (ax, ay)) in before.iter().zip(&after) {
        assert_eq!(*ax, bx - 5.0);
        assert_eq!(ay, by);
    }
    assert_eq!(w.background_x, -5.0);
    // Only the player's own step moved it; the scroll left it alone.
    assert_eq!(w.player.rect().left(), 310.0);
}

#[test]
fn scroll_runs_opposite_way_when_moving_left() {
    let c = cfg();
    let mut w = bare_world(vec![ground()]);
    w.player.body.set_left(300.0);
    press_move(&mut w, Direction::Left, &c);
    tick(&mut w, &mut seeded_rng(), &c);
    assert_eq!(w.entities[0].rect().left(), 5.0);
    assert_eq!(w.player.rect().left(), 290.0);
}

#[test]
fn apply_scroll_never_moves_player() {
    let mut w = bare_world(vec![ground()]);
    let before = *w.player.rect();
    apply_scroll(&mut w, -5.0);
    assert_eq!(*w.player.rect(), before);
    assert_eq!(w.entities[0].rect().left(), -5.0);
}

#[test]
fn no_scroll_left_of_band() {
    let c = cfg();
    let mut w = bare_world(vec![ground()]);
    w.player.body.set_left(150.0);
    press_move(&mut w, Direction::Right, &c);
    tick(&mut w, &mut seeded_rng(), &c);
    assert_eq!(w.entities[0].rect().left(), 0.0);
    assert_eq!(w.background_x, 0.0);
    assert_eq!(w.player.rect().left(), 160.0);
}

#[test]
fn no_scroll_when_standing_still() {
    let c = cfg();
    let mut w = bare_world(vec![ground()]);
    w.player.body.set_left(300.0);
    tick(&mut w, &mut seeded_rng(), &c);
    assert_eq!(w.entities[0].rect().left(), 0.0);
    assert_eq!(scroll_delta(&w.player, &c), 0.0);
}

// ── Movers ───────────────────────────────────────────────────────────────────

#[test]
fn hostile_walks_left_and_rests_on_ground() {
    let c = cfg();
    let hostile = Entity::new(Role::Hostile, Rect::new(600.0, 515.0, 50.0, 50.0));
    let mut w = bare_world(vec![ground(), hostile]);
    tick(&mut w, &mut seeded_rng(), &c);
    let h = w.of_role(Role::Hostile).next().unwrap();
    assert_eq!(h.rect().left(), 597.0);
    assert_eq!(h.rect().bottom(), 565.0);
    assert_eq!(h.body.dy, 0.0);
}

#[test]
fn hostile_stopped_by_wall() {
    let c = cfg();
    let wall = Entity::new(Role::Walkable, Rect::new(500.0, 400.0, 50.0, 165.0));
    let hostile = Entity::new(Role::Hostile, Rect::new(551.0, 515.0, 50.0, 50.0));
    let mut w = bare_world(vec![ground(), wall, hostile]);
    tick(&mut w, &mut seeded_rng(), &c);
    let h = w.of_role(Role::Hostile).next().unwrap();
    assert_eq!(h.rect().left(), 550.0);
}

#[test]
fn power_up_drifts_left() {
    let c = cfg();
    let star = Entity::new(Role::PowerUp, Rect::new(700.0, 100.0, 60.0, 50.0));
    let mut w = bare_world(vec![ground(), star]);
    tick(&mut w, &mut seeded_rng(), &c);
    let s = w.of_role(Role::PowerUp).next().unwrap();
    assert_eq!(s.rect().left(), 692.0);
    assert_eq!(s.rect().top(), 100.0);
}

#[test]
fn lost_movers_are_culled() {
    let c = cfg();
    let sunk = Entity::new(Role::Hostile, Rect::new(600.0, 750.0, 50.0, 50.0));
    let gone = Entity::new(Role::PowerUp, Rect::new(-1200.0, 100.0, 60.0, 50.0));
    let mut w = bare_world(vec![ground(), sunk, gone]);
    tick(&mut w, &mut seeded_rng(), &c);
    assert_eq!(w.count(Role::Hostile), 0);
    assert_eq!(w.count(Role::PowerUp), 0);
    assert_eq!(w.count(Role::Walkable), 1);
}

// ── Spawning ─────────────────────────────────────────────────────────────────

#[test]
fn spawn_countdown_decrements() {
    let c = cfg();
    let mut w = bare_world(vec![ground()]);
    tick(&mut w, &mut seeded_rng(), &c);
    assert_eq!(w.spawn_countdown, 299);
    assert_eq!(w.count(Role::Hostile), 0);
}

#[test]
fn spawn_fires_at_zero_and_resets() {
    let c = cfg();
    let mut w = bare_world(vec![ground()]);
    w.spawn_countdown = 1;
    let events = tick(&mut w, &mut seeded_rng(), &c);
    assert!(events.contains(&GameEvent::Spawned));
    assert_eq!(w.spawn_countdown, 300);

    let h = w.of_role(Role::Hostile).next().unwrap();
    assert_eq!(h.rect().left(), 900.0);
    assert!(h.rect().top() < 515.0);
    let s = w.of_role(Role::PowerUp).next().unwrap();
    assert_eq!(s.rect().left(), 900.0);
    assert!(s.rect().top() < 200.0);
}

#[test]
fn spawns_repeat_every_interval() {
    let c = cfg();
    let mut rng = seeded_rng();
    let mut w = bare_world(vec![ground()]);
    let mut spawns = 0;
    for _ in 0..900 {
        if tick(&mut w, &mut rng, &c).contains(&GameEvent::Spawned) {
            spawns += 1;
        }
    }
    assert_eq!(spawns, 3);
}

// ── Contacts ─────────────────────────────────────────────────────────────────

fn coin_at(x: f32) -> Entity {
    Entity::new(Role::Coin, Rect::new(x, 515.0, 50.0, 50.0))
}

#[test]
fn coins_score_once_and_disappear() {
    let c = cfg();
    let mut rng = seeded_rng();
    let mut w = bare_world(vec![
        ground(),
        coin_at(110.0),
        coin_at(130.0),
        coin_at(150.0),
        coin_at(3000.0),
    ]);
    let events = tick(&mut w, &mut rng, &c);
    assert!(events.contains(&GameEvent::CoinsCollected(3)));
    assert_eq!(w.player.points, 3);
    assert_eq!(w.count(Role::Coin), 1);

    tick(&mut w, &mut rng, &c);
    assert_eq!(w.player.points, 3);
}

#[test]
fn power_up_grants_a_life() {
    let c = cfg();
    let star = Entity::new(Role::PowerUp, Rect::new(120.0, 485.0, 60.0, 50.0));
    let mut w = bare_world(vec![ground(), star]);
    let events = tick(&mut w, &mut seeded_rng(), &c);
    assert!(events.contains(&GameEvent::PowerUpCollected));
    assert_eq!(w.player.lives, 6);
    assert_eq!(w.count(Role::PowerUp), 0);
}

#[test]
fn hazard_zeroes_lives_regardless_of_count() {
    let c = cfg();
    let plant = Entity::new(Role::Hazard, Rect::new(120.0, 400.0, 45.0, 130.0));
    let mut w = bare_world(vec![ground(), plant]);
    w.player.lives = 9;
    let events = tick(&mut w, &mut seeded_rng(), &c);
    assert!(events.contains(&GameEvent::HazardTouched));
    assert_eq!(w.player.lives, 0);
    assert_eq!(w.outcome, Some(Outcome::Lost));
    // The plant stays put; only the player's run ends.
    assert_eq!(w.count(Role::Hazard), 1);
}

#[test]
fn scenario_coins_then_hostile() {
    let c = cfg();
    let mut rng = seeded_rng();
    let mut w = bare_world(vec![ground(), coin_at(110.0), coin_at(130.0), coin_at(150.0)]);
    assert_eq!(w.player.lives, 5);
    tick(&mut w, &mut rng, &c);
    assert_eq!(w.player.points, 3);

    w.entities
        .push(Entity::new(Role::Hostile, Rect::new(150.0, 515.0, 50.0, 50.0)));
    let events = tick(&mut w, &mut rng, &c);
    assert!(events.contains(&GameEvent::HostileHit));
    assert_eq!(w.player.lives, 4);
    assert_eq!(w.player.points, 3);
    assert_eq!(w.count(Role::Hostile), 0);
    assert_eq!(w.outcome, None);
}

#[test]
fn scenario_last_life_on_hazard_is_a_loss() {
    let c = cfg();
    let plant = Entity::new(Role::Hazard, Rect::new(120.0, 400.0, 45.0, 130.0));
    let mut w = bare_world(vec![ground(), plant]);
    w.player.lives = 1;
    let events = tick(&mut w, &mut seeded_rng(), &c);
    assert_eq!(w.player.lives, 0);
    assert!(events.contains(&GameEvent::Finished(Outcome::Lost)));
}

#[test]
fn goal_contact_wins_with_lives_left() {
    let c = cfg();
    let goal = Entity::new(Role::Goal, Rect::new(150.0, 200.0, 100.0, 700.0));
    let mut w = bare_world(vec![ground(), goal]);
    w.player.lives = 2;
    let events = tick(&mut w, &mut seeded_rng(), &c);
    assert!(events.contains(&GameEvent::GoalReached));
    assert_eq!(w.outcome, Some(Outcome::Won));
    assert_eq!(w.player.lives, 2);
    assert_eq!(w.count(Role::Goal), 0);
}

#[test]
fn simultaneous_contacts_all_apply() {
    let c = cfg();
    let plant = Entity::new(Role::Hazard, Rect::new(120.0, 400.0, 45.0, 130.0));
    let goal = Entity::new(Role::Goal, Rect::new(150.0, 200.0, 100.0, 700.0));
    let mut w = bare_world(vec![ground(), coin_at(110.0), plant, goal]);
    let events = tick(&mut w, &mut seeded_rng(), &c);
    assert_eq!(w.player.points, 1);
    assert!(events.contains(&GameEvent::HazardTouched));
    assert!(events.contains(&GameEvent::GoalReached));
    // No lives left, so the run is lost even though the goal was touched.
    assert_eq!(w.outcome, Some(Outcome::Lost));
}

#[test]
fn falling_into_a_pit_is_a_loss() {
    let c = cfg();
    let mut rng = seeded_rng();
    let mut w = bare_world(vec![]);
    let mut fell = false;
    for _ in 0..200 {
        if tick(&mut w, &mut rng, &c).contains(&GameEvent::FellOff) {
            fell = true;
            break;
        }
    }
    assert!(fell);
    assert_eq!(w.player.lives, 0);
    assert_eq!(w.outcome, Some(Outcome::Lost));
}

// ── Termination ──────────────────────────────────────────────────────────────

#[test]
fn finished_world_is_frozen() {
    let c = cfg();
    let hostile = Entity::new(Role::Hostile, Rect::new(600.0, 515.0, 50.0, 50.0));
    let mut w = bare_world(vec![ground(), hostile]);
    w.outcome = Some(Outcome::Lost);
    w.spawn_countdown = 1;
    let before_player = w.player.clone();
    let before_entities = w.entities.clone();

    let events = tick(&mut w, &mut seeded_rng(), &c);
    assert!(events.is_empty());
    assert_eq!(w.frame, 0);
    assert_eq!(w.player, before_player);
    assert_eq!(w.entities, before_entities);
    assert!(!request_jump(&mut w, &c));
}
