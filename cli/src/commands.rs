//! Input-line parsing and command execution for the terminal client.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::io::{self, Write};

use kabaw_chat::display::outgoing_content;
use kabaw_chat::{ChatConfig, ConnectOutcome, Connector, SessionHook};

pub const HELP_TEXT: &str = "\
Commands:
  /help                       show this help
  /clear                      clear the screen
  /connect                    reconnect with the current username and channel
  /join <username> <channel>  switch identity or channel
  /logout                     disconnect
  /quit                       exit
Anything else is sent as a chat message.";

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Blank line.
    Empty,
    /// Text to send as-is.
    Chat(String),
    Help,
    Clear,
    Connect,
    Join { username: String, channel: String },
    Logout,
    Quit,
    /// A command with the wrong arguments; carries the usage line.
    Usage(&'static str),
    /// An unrecognized `/command` (without the slash).
    Unknown(String),
}

/// Whether the main loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn parse_input(line: &str) -> Input {
    let Some(content) = outgoing_content(line) else {
        return Input::Empty;
    };
    let Some(command) = content.trim_start().strip_prefix('/') else {
        return Input::Chat(content.to_owned());
    };

    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    match (name, args.as_slice()) {
        ("help", _) => Input::Help,
        ("clear", _) => Input::Clear,
        ("connect", _) => Input::Connect,
        ("join", [username, channel]) => Input::Join {
            username: (*username).to_owned(),
            channel: (*channel).to_owned(),
        },
        ("join", _) => Input::Usage("/join <username> <channel>"),
        ("logout", _) => Input::Logout,
        ("quit" | "exit", _) => Input::Quit,
        (other, _) => Input::Unknown(other.to_owned()),
    }
}

/// Carry out one input line against the session.
///
/// # Errors
///
/// Returns the I/O error if writing feedback to `out` fails.
pub fn apply_input<C: Connector>(
    input: Input,
    hook: &mut SessionHook<C::Transport>,
    connector: &C,
    config: &mut ChatConfig,
    out: &mut impl Write,
) -> io::Result<Flow> {
    match input {
        Input::Empty => {}
        Input::Chat(text) => {
            if !hook.send_message(&text) {
                writeln!(out, "Not connected. Type /connect to reconnect.")?;
            }
        }
        Input::Help => writeln!(out, "{HELP_TEXT}")?,
        Input::Clear => write!(out, "{CLEAR_SCREEN}")?,
        Input::Connect => match config.address() {
            Ok(address) => {
                if hook.connect(connector, address) == ConnectOutcome::AlreadyActive {
                    writeln!(out, "Already connected. Use /logout first.")?;
                }
            }
            Err(error) => writeln!(out, "Cannot connect: {error}")?,
        },
        Input::Join { username, channel } => {
            let next = ChatConfig { server_url: config.server_url.clone(), username, channel };
            match next.address() {
                Ok(address) => {
                    hook.retarget(connector, Some(address));
                    *config = next;
                }
                Err(error) => writeln!(out, "Cannot join: {error}")?,
            }
        }
        Input::Logout => {
            if !hook.disconnect() {
                writeln!(out, "Not connected.")?;
            }
        }
        Input::Quit => return Ok(Flow::Quit),
        Input::Usage(usage) => writeln!(out, "Usage: {usage}")?,
        Input::Unknown(name) => writeln!(out, "Unknown command /{name}. Type /help for commands.")?,
    }
    out.flush()?;
    Ok(Flow::Continue)
}
