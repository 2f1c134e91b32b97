//! Keyboard → session commands.
//!
//! Direction keys are tracked as "held" rather than acted on per event, so
//! running and jumping combine freely. Two classes of terminal are covered:
//! * **Keyboard-enhancement capable** (kitty protocol): real `Release`
//!   events drop a key immediately.
//! * **Classic terminals**: only `Press` events arrive (OS key-repeat shows
//!   up as repeated presses). A key expires after `HOLD_WINDOW` frames of
//!   silence, which is shorter than any repeat gap while it is held.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Direction;
use crate::session::Command;

/// A key counts as held if its last press/repeat arrived within this many frames.
pub const HOLD_WINDOW: u64 = 4;

fn direction_of(code: &KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// One-shot command bound to a key press, if any.
pub fn command_for(code: &KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::Jump),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::ToggleMusic),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct HeldKeys {
    /// Direction → frame it was last seen pressed or repeating.
    last_seen: HashMap<Direction, u64>,
    left: bool,
    right: bool,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one key event. Returns the one-shot command it triggers, if any.
    pub fn observe(&mut self, event: &KeyEvent, frame: u64) -> Option<Command> {
        let dir = direction_of(&event.code);
        match event.kind {
            KeyEventKind::Press => {
                if let Some(dir) = dir {
                    self.last_seen.insert(dir, frame);
                    return None;
                }
                command_for(&event.code, event.modifiers)
            }
            KeyEventKind::Repeat => {
                if let Some(dir) = dir {
                    self.last_seen.insert(dir, frame);
                }
                None
            }
            KeyEventKind::Release => {
                if let Some(dir) = dir {
                    self.last_seen.remove(&dir);
                }
                None
            }
        }
    }

    fn is_held(&self, dir: Direction, frame: u64) -> bool {
        self.last_seen
            .get(&dir)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Compare what is held now with last frame and emit `Move`/`Halt` for
    /// each change. Releases come first so a quick reversal ends moving the
    /// new way.
    pub fn poll(&mut self, frame: u64) -> Vec<Command> {
        let left = self.is_held(Direction::Left, frame);
        let right = self.is_held(Direction::Right, frame);
        let mut cmds = Vec::new();

        if self.left && !left {
            cmds.push(Command::Halt(Direction::Left));
        }
        if self.right && !right {
            cmds.push(Command::Halt(Direction::Right));
        }
        if !self.left && left {
            cmds.push(Command::Move(Direction::Left));
        }
        if !self.right && right {
            cmds.push(Command::Move(Direction::Right));
        }

        self.left = left;
        self.right = right;
        cmds
    }
}
