//! Terminal rendering: print each message once, in order.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::io::Write;

use kabaw_chat::display::{message_view, terminal_line};
use kabaw_chat::{SessionObserver, SessionPhase, SessionState};

pub const DISCONNECT_HINT: &str = "Disconnected. Type /connect to reconnect or /join <username> <channel>.";

/// Session observer that appends new messages to a terminal.
pub struct TerminalObserver<W: Write> {
    out: W,
    printed: usize,
    last_phase: SessionPhase,
}

impl<W: Write> TerminalObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out, printed: 0, last_phase: SessionPhase::Idle }
    }

    fn write_line(&mut self, line: &str) {
        if let Err(error) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            tracing::warn!(%error, "failed to write to terminal");
        }
    }
}

impl<W: Write> SessionObserver for TerminalObserver<W> {
    fn on_state_changed(&mut self, state: &SessionState) {
        // A fresh open clears the list; start over from its first message.
        let reopened = state.phase == SessionPhase::Open && self.last_phase != SessionPhase::Open;
        if reopened || state.messages.len() < self.printed {
            self.printed = 0;
        }
        self.last_phase = state.phase;

        let current_user_id = state.current_user_id.as_deref();
        for message in &state.messages[self.printed..] {
            let line = terminal_line(&message_view(message, current_user_id));
            self.write_line(&line);
        }
        self.printed = state.messages.len();
    }

    fn on_disconnected(&mut self) {
        self.write_line(DISCONNECT_HINT);
    }
}
