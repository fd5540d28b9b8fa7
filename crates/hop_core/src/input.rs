//! Keyboard decoding for the platformer.
//!
//! Keys are tracked as held (level) plus the presses seen since the last
//! `end_frame()` (edges). The simulation only ever sees the held view folded
//! into an [`InputSnapshot`]; the host uses the edges for the single
//! "activation" signal that starts or restarts a session.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    W,
    A,
    D,
}

/// Game meaning of a physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Key {
    pub fn control(self) -> Option<Control> {
        match self {
            Key::Left | Key::A => Some(Control::MoveLeft),
            Key::Right | Key::D => Some(Control::MoveRight),
            Key::Up | Key::W | Key::Space => Some(Control::Jump),
            Key::Down | Key::Enter => None,
        }
    }
}

/// Normalized per-tick controls read by the motion integrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputSnapshot {
    pub const IDLE: InputSnapshot = InputSnapshot {
        left: false,
        right: false,
        jump: false,
    };

    fn with(mut self, control: Control) -> Self {
        match control {
            Control::MoveLeft => self.left = true,
            Control::MoveRight => self.right = true,
            Control::Jump => self.jump = true,
        }
        self
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    down: HashSet<Key>,
    presses: Vec<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repeated down events for a key already held are ignored.
    pub fn key_down(&mut self, key: Key) {
        if self.down.insert(key) {
            self.presses.push(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.down.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    pub fn pressed_this_frame(&self, key: Key) -> bool {
        self.presses.contains(&key)
    }

    /// Folds every held key into the three controls the simulation understands.
    pub fn snapshot(&self) -> InputSnapshot {
        self.down
            .iter()
            .filter_map(|key| key.control())
            .fold(InputSnapshot::IDLE, InputSnapshot::with)
    }

    /// True when any key went down this frame, mapped or not.
    pub fn activation(&self) -> bool {
        !self.presses.is_empty()
    }

    /// Forgets every held key. The start press must not leak into the first
    /// simulated frame.
    pub fn release_all(&mut self) {
        self.down.clear();
    }

    pub fn end_frame(&mut self) {
        self.presses.clear();
    }
}
