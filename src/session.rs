//! Session lifecycle: menu, one play-through, and the end screens.
//!
//! A restart always builds a brand-new `World`; there is no way back from
//! `Terminal` into the world that just ended.

use std::mem;

use rand::Rng;

use crate::audio::SoundCue;
use crate::compute;
use crate::config::GameConfig;
use crate::entities::{Direction, GameEvent, Outcome, World};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Move(Direction),
    Halt(Direction),
    Jump,
    ToggleMusic,
    Restart,
    Quit,
}

#[derive(Clone, Debug)]
enum Phase {
    Menu,
    Playing(World),
    /// The finished world keeps its `outcome`.
    Terminal {
        world: World,
        /// Ticks left before the end screen replaces the frozen world.
        hold_ticks: u32,
    },
}

/// What the renderer should put on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    World,
    /// Goal reached; the frozen world stays up while the jingle plays.
    Holding,
    Won,
    Lost,
}

pub struct Session {
    config: GameConfig,
    phase: Phase,
    music_on: bool,
    cues: Vec<SoundCue>,
    quit_requested: bool,
    runs: u32,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let music_on = config.music_on_start;
        Self {
            config,
            phase: Phase::Menu,
            music_on,
            cues: Vec::new(),
            quit_requested: false,
            runs: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The world being played or just finished, if any.
    pub fn world(&self) -> Option<&World> {
        match &self.phase {
            Phase::Menu => None,
            Phase::Playing(world) | Phase::Terminal { world, .. } => Some(world),
        }
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        match &mut self.phase {
            Phase::Menu => None,
            Phase::Playing(world) | Phase::Terminal { world, .. } => Some(world),
        }
    }

    pub fn music_on(&self) -> bool {
        self.music_on
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Number of play-throughs started so far.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn screen(&self) -> Screen {
        match &self.phase {
            Phase::Menu => Screen::Menu,
            Phase::Playing(_) => Screen::World,
            Phase::Terminal { hold_ticks, .. } if *hold_ticks > 0 => Screen::Holding,
            Phase::Terminal { world, .. } if world.player.lives > 0 => Screen::Won,
            Phase::Terminal { .. } => Screen::Lost,
        }
    }

    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        mem::take(&mut self.cues)
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    pub fn handle(&mut self, cmd: Command, rng: &mut impl Rng) {
        match cmd {
            Command::Quit => {
                log::info!("quit requested");
                self.quit_requested = true;
            }
            Command::ToggleMusic => {
                self.music_on = !self.music_on;
                self.cues.push(if self.music_on {
                    SoundCue::MusicOn
                } else {
                    SoundCue::MusicOff
                });
            }
            Command::Start => match self.phase {
                Phase::Menu => self.begin(rng),
                Phase::Terminal { .. } => self.restart(rng),
                Phase::Playing(_) => {}
            },
            Command::Restart => self.restart(rng),
            Command::Move(dir) => {
                if let Phase::Playing(world) = &mut self.phase {
                    compute::press_move(world, dir, &self.config);
                }
            }
            Command::Halt(dir) => {
                if let Phase::Playing(world) = &mut self.phase {
                    compute::release_move(world, dir);
                }
            }
            Command::Jump => {
                let jumped = match &mut self.phase {
                    Phase::Playing(world) => compute::request_jump(world, &self.config),
                    _ => false,
                };
                if jumped {
                    self.effect(SoundCue::Jump);
                }
            }
        }
    }

    fn begin(&mut self, rng: &mut impl Rng) {
        self.runs += 1;
        self.phase = Phase::Playing(compute::init_world(&self.config, rng));
        self.music_on = self.config.music_on_start;
        if self.music_on {
            self.cues.push(SoundCue::MusicOn);
        }
        log::info!("run {} started", self.runs);
    }

    /// Honored only on the end screen, once any win hold has run out.
    fn restart(&mut self, rng: &mut impl Rng) {
        match self.phase {
            Phase::Terminal { hold_ticks: 0, .. } => self.begin(rng),
            _ => log::debug!("restart ignored outside the end screen"),
        }
    }

    // ── Per-frame update ──────────────────────────────────────────────────────

    pub fn update(&mut self, rng: &mut impl Rng) {
        let events = match &mut self.phase {
            Phase::Menu => return,
            Phase::Terminal { hold_ticks, .. } => {
                *hold_ticks = hold_ticks.saturating_sub(1);
                return;
            }
            Phase::Playing(world) => compute::tick(world, rng, &self.config),
        };

        for event in events {
            log::debug!("event: {:?}", event);
            match event {
                GameEvent::CoinsCollected(_) => self.effect(SoundCue::Pickup),
                GameEvent::PowerUpCollected => self.effect(SoundCue::LevelUp),
                GameEvent::HostileHit => self.effect(SoundCue::Poison),
                GameEvent::Finished(outcome) => self.finish(outcome),
                _ => {}
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        let world = match mem::replace(&mut self.phase, Phase::Menu) {
            Phase::Playing(world) => world,
            other => {
                self.phase = other;
                return;
            }
        };
        log::info!(
            "run {} ended: {:?} with {} lives, {} points",
            self.runs,
            outcome,
            world.player.lives,
            world.player.points
        );

        self.cues.push(SoundCue::MusicOff);
        if self.music_on {
            self.cues.push(match outcome {
                Outcome::Won => SoundCue::Win,
                Outcome::Lost => SoundCue::Lose,
            });
            self.music_on = false;
        }

        let hold_ticks = match outcome {
            Outcome::Won => self.config.win_delay_ticks(),
            Outcome::Lost => 0,
        };
        self.phase = Phase::Terminal { world, hold_ticks };
    }

    /// Sound effects only play while music is on.
    fn effect(&mut self, cue: SoundCue) {
        if self.music_on {
            self.cues.push(cue);
        }
    }
}
