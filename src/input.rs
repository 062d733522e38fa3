/// Keyboard polling: turns raw crossterm key events into one `TickInput` per tick.
///
/// Movement is latest-key-wins: every press or repeat overwrites the pending
/// direction, and the pending direction is consumed by the next tick. Precision
/// mode is a held Shift, not a keystroke.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};
use plane_shooter::{Direction, TickInput};

/// Shift counts as held if a shifted key was seen within this many frames.
/// Covers terminals that never report modifier press/release on their own.
const HOLD_WINDOW: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
    Restart,
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    pending: Direction,
    /// Last frame a shifted key was seen
    shift_seen: Option<u64>,
    /// Explicit Shift state from keyboard-enhanced terminals
    shift_down: bool,
}

pub fn direction_for(code: KeyCode) -> Direction {
    match code {
        KeyCode::Up => Direction::Up,
        KeyCode::Down => Direction::Down,
        KeyCode::Left => Direction::Left,
        KeyCode::Right => Direction::Right,
        KeyCode::Char(c) => Direction::from_key(c),
        _ => Direction::None,
    }
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: &KeyEvent, frame: u64) -> KeyAction {
        if let KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) =
            event.code
        {
            self.shift_down = event.kind != KeyEventKind::Release;
            return KeyAction::None;
        }
        if event.kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        let shifted = event.modifiers.contains(KeyModifiers::SHIFT)
            || matches!(event.code, KeyCode::Char(c) if c.is_ascii_uppercase());
        if shifted {
            self.shift_seen = Some(frame);
        }

        match event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyAction::Quit;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => return KeyAction::Restart,
            _ => {}
        }

        let direction = direction_for(event.code);
        if direction != Direction::None {
            self.pending = direction;
        }
        KeyAction::None
    }

    /// Input for the tick about to run. Clears the pending direction.
    pub fn take_tick_input(&mut self, frame: u64) -> TickInput {
        let recent_shift = self
            .shift_seen
            .map(|seen| frame.saturating_sub(seen) <= HOLD_WINDOW)
            .unwrap_or(false);
        TickInput {
            direction: std::mem::take(&mut self.pending),
            precision: self.shift_down || recent_shift,
        }
    }
}
