//! Game tunables, loadable from a TOML file.
//!
//! Every field has a default, so a config file only needs to name the values
//! it changes.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

// ── Defaults ──────────────────────────────────────────────────────────────────

pub const VIEWPORT_WIDTH: f32 = 900.0;
pub const VIEWPORT_HEIGHT: f32 = 700.0;
/// Absolute ground line the player runs on.
pub const GROUND_Y: f32 = 565.0;
pub const FRAME_RATE: u32 = 60;
pub const PLAYER_SPEED: f32 = 10.0;
pub const SCROLL_SPEED: f32 = 5.0;
pub const LEFT_MARGIN: f32 = 100.0;
pub const GRAVITY: f32 = 0.35;
/// Vertical speed a resting body is snapped to before gravity accumulates.
pub const TAKEOFF_VELOCITY: f32 = 1.0;
pub const JUMP_IMPULSE: f32 = -13.0;
/// How far below the feet the grounded probe looks.
pub const PROBE_DEPTH: f32 = 2.0;
pub const STARTING_LIVES: u32 = 5;
pub const COIN_COUNT: u32 = 30;
pub const COIN_FIELD_WIDTH: f32 = 6500.0;
pub const INITIAL_HOSTILES: u32 = 2;
pub const HOSTILE_SPEED: f32 = 3.0;
pub const POWERUP_SPEED: f32 = 8.0;
pub const SPAWN_INTERVAL_SECS: f32 = 5.0;
pub const WIN_DELAY_SECS: f32 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub ground_y: f32,
    pub frame_rate: u32,
    pub player_speed: f32,
    pub scroll_speed: f32,
    pub left_margin: f32,
    pub gravity: f32,
    pub takeoff_velocity: f32,
    pub jump_impulse: f32,
    pub probe_depth: f32,
    pub starting_lives: u32,
    pub coin_count: u32,
    pub coin_field_width: f32,
    pub initial_hostiles: u32,
    pub hostile_speed: f32,
    pub powerup_speed: f32,
    pub spawn_interval_secs: f32,
    pub win_delay_secs: f32,
    pub music_on_start: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            ground_y: GROUND_Y,
            frame_rate: FRAME_RATE,
            player_speed: PLAYER_SPEED,
            scroll_speed: SCROLL_SPEED,
            left_margin: LEFT_MARGIN,
            gravity: GRAVITY,
            takeoff_velocity: TAKEOFF_VELOCITY,
            jump_impulse: JUMP_IMPULSE,
            probe_depth: PROBE_DEPTH,
            starting_lives: STARTING_LIVES,
            coin_count: COIN_COUNT,
            coin_field_width: COIN_FIELD_WIDTH,
            initial_hostiles: INITIAL_HOSTILES,
            hostile_speed: HOSTILE_SPEED,
            powerup_speed: POWERUP_SPEED,
            spawn_interval_secs: SPAWN_INTERVAL_SECS,
            win_delay_secs: WIN_DELAY_SECS,
            music_on_start: true,
        }
    }
}

impl GameConfig {
    /// Load from `path`, or return the defaults when no path is given.
    ///
    /// A named file that cannot be read or parsed is a startup error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::info!("no config file given, using defaults");
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg = Self::from_toml(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let cfg: GameConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.float_fields() {
            if !value.is_finite() {
                bail!("{name} must be a finite number, got {value}");
            }
        }
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            bail!(
                "viewport must be positive, got {}x{}",
                self.viewport_width,
                self.viewport_height
            );
        }
        if self.frame_rate == 0 {
            bail!("frame_rate must be at least 1");
        }
        if self.ground_y <= 0.0 || self.ground_y > self.viewport_height {
            bail!(
                "ground_y {} lies outside the viewport (0, {}]",
                self.ground_y,
                self.viewport_height
            );
        }
        let must_be_positive = [
            ("player_speed", self.player_speed),
            ("scroll_speed", self.scroll_speed),
            ("hostile_speed", self.hostile_speed),
            ("powerup_speed", self.powerup_speed),
            ("gravity", self.gravity),
            ("takeoff_velocity", self.takeoff_velocity),
            ("probe_depth", self.probe_depth),
            ("coin_field_width", self.coin_field_width),
        ];
        for (name, value) in must_be_positive {
            if value <= 0.0 {
                bail!("{name} must be positive, got {value}");
            }
        }
        if self.jump_impulse >= 0.0 {
            bail!("jump_impulse must be negative (upward), got {}", self.jump_impulse);
        }
        if self.spawn_interval_secs <= 0.0 {
            bail!("spawn_interval_secs must be positive");
        }
        if self.left_margin >= self.right_clamp() {
            bail!(
                "left_margin {} must sit left of the right clamp {}",
                self.left_margin,
                self.right_clamp()
            );
        }
        Ok(())
    }

    fn float_fields(&self) -> [(&'static str, f32); 15] {
        [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("ground_y", self.ground_y),
            ("player_speed", self.player_speed),
            ("scroll_speed", self.scroll_speed),
            ("left_margin", self.left_margin),
            ("gravity", self.gravity),
            ("takeoff_velocity", self.takeoff_velocity),
            ("jump_impulse", self.jump_impulse),
            ("probe_depth", self.probe_depth),
            ("coin_field_width", self.coin_field_width),
            ("hostile_speed", self.hostile_speed),
            ("powerup_speed", self.powerup_speed),
            ("spawn_interval_secs", self.spawn_interval_secs),
            ("win_delay_secs", self.win_delay_secs),
        ]
    }

    // ── Derived values ────────────────────────────────────────────────────────

    /// Furthest right the player's right edge may go on screen.
    pub fn right_clamp(&self) -> f32 {
        self.viewport_width / 2.0
    }

    /// The player's left edge must be at or right of this for the world to scroll.
    pub fn scroll_band_left(&self) -> f32 {
        self.viewport_width / 4.0
    }

    pub fn spawn_interval_ticks(&self) -> u32 {
        secs_to_ticks(self.spawn_interval_secs, self.frame_rate).max(1)
    }

    pub fn win_delay_ticks(&self) -> u32 {
        secs_to_ticks(self.win_delay_secs, self.frame_rate)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate.max(1) as f64)
    }
}

fn secs_to_ticks(secs: f32, frame_rate: u32) -> u32 {
    (secs.max(0.0) * frame_rate as f32).round() as u32
}
