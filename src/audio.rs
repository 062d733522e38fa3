/// Audio collaborator: rings the terminal bell for impact events.
///
/// The simulation pushes events synchronously; the bell itself is deferred to
/// the end of the frame so a tick never waits on terminal output.

use std::io::Write;

use crossterm::{style::Print, QueueableCommand};
use plane_shooter::{EventSink, GameEvent};

#[derive(Debug, Default)]
pub struct TerminalBell {
    muted: bool,
    pending: bool,
}

impl TerminalBell {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            pending: false,
        }
    }

    /// Emit at most one bell for everything queued this frame.
    pub fn flush<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        if std::mem::take(&mut self.pending) && !self.muted {
            out.queue(Print('\x07'))?;
            out.flush()?;
        }
        Ok(())
    }
}

impl EventSink for TerminalBell {
    fn notify(&mut self, event: GameEvent) {
        // No bell for PlayerFired or pickups.
        if matches!(
            event,
            GameEvent::EnemyHit { .. } | GameEvent::PlayerDamaged | GameEvent::EnemyExploded
        ) {
            self.pending = true;
        }
    }
}
