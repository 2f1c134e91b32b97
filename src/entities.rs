//! All game entity types. Pure data plus the few mutators that keep
//! position and velocity consistent; game rules live in `compute`.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world pixels. `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ── Moving entity ─────────────────────────────────────────────────────────────

/// A rectangle with a velocity. Size is fixed at construction; only the
/// position and velocity ever change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    rect: Rect,
    pub dx: f32,
    pub dy: f32,
}

impl Body {
    pub fn new(rect: Rect) -> Self {
        Self { rect, dx: 0.0, dy: 0.0 }
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.rect.x += dx;
        self.rect.y += dy;
    }

    pub fn set_left(&mut self, x: f32) {
        self.rect.x = x;
    }

    pub fn set_right(&mut self, x: f32) {
        self.rect.x = x - self.rect.width;
    }

    pub fn set_top(&mut self, y: f32) {
        self.rect.y = y;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.rect.y = y - self.rect.height;
    }

    /// Rest the bottom edge on `top` and stop falling.
    pub fn land_on(&mut self, top: f32) {
        self.set_bottom(top);
        self.dy = 0.0;
    }

    /// Stop an ascent with the top edge against `bottom`.
    pub fn bump_head(&mut self, bottom: f32) {
        self.set_top(bottom);
        self.dy = 0.0;
    }
}

// ── Roles ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Platform or ground slab the player can stand on.
    Walkable,
    /// Poisonous plant: any contact ends the run.
    Hazard,
    /// Finish wall: contact wins.
    Goal,
    Coin,
    /// Star that grants an extra life.
    PowerUp,
    /// Creature that costs a life on contact.
    Hostile,
}

impl Role {
    /// Blocking regions are static; they only move with the scroll.
    pub fn is_blocking(self) -> bool {
        matches!(self, Role::Walkable | Role::Hazard | Role::Goal)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entity {
    pub body: Body,
    pub role: Role,
}

impl Entity {
    pub fn new(role: Role, rect: Rect) -> Self {
        Self { body: Body::new(rect), role }
    }

    pub fn rect(&self) -> &Rect {
        self.body.rect()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Body,
    pub lives: u32,
    pub points: u32,
    pub facing: Facing,
}

impl Player {
    pub const WIDTH: f32 = 90.0;
    pub const HEIGHT: f32 = 80.0;
    pub const START_X: f32 = 50.0;

    /// A fresh player standing on the ground line.
    pub fn new(ground_y: f32, lives: u32) -> Self {
        let rect = Rect::new(Self::START_X, ground_y - Self::HEIGHT, Self::WIDTH, Self::HEIGHT);
        Self {
            body: Body::new(rect),
            lives,
            points: 0,
            facing: Facing::Right,
        }
    }

    pub fn rect(&self) -> &Rect {
        self.body.rect()
    }
}

// ── Outcome & events ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Something that happened during a tick, reported back to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CoinsCollected(u32),
    PowerUpCollected,
    HazardTouched,
    HostileHit,
    GoalReached,
    FellOff,
    Spawned,
    Finished(Outcome),
}

// ── Master world state ────────────────────────────────────────────────────────

/// Everything one play-through owns. A restart builds a new `World`.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    /// Every non-player entity, tagged by role.
    pub entities: Vec<Entity>,
    /// Horizontal offset of the backdrop; only the renderer reads it.
    pub background_x: f32,
    /// Ticks left until the next hostile/power-up spawn.
    pub spawn_countdown: u32,
    pub outcome: Option<Outcome>,
    pub frame: u64,
}

impl World {
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn count(&self, role: Role) -> usize {
        self.entities.iter().filter(|e| e.role == role).count()
    }

    pub fn of_role(&self, role: Role) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.role == role)
    }

    /// Rectangles the physics resolver collides against.
    pub fn walkable_rects(&self) -> Vec<Rect> {
        self.of_role(Role::Walkable).map(|e| *e.rect()).collect()
    }
}
