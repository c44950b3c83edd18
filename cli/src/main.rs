//! Terminal client for Kabaw Chat.
//!
//! One `SessionHook` owned by the main loop. Socket tasks report back over a
//! channel and stdin lines are read in the same `select!`, so the hook is
//! only ever touched from here.

mod commands;
mod render;
mod transport;

use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use kabaw_chat::config::{DEFAULT_CHANNEL, DEFAULT_SERVER_URL, DEFAULT_USERNAME};
use kabaw_chat::{AddressError, ChatConfig, SessionHook};

use crate::commands::{Flow, apply_input, parse_input};
use crate::render::TerminalObserver;
use crate::transport::{WsConnector, wait_for_close};

/// How long to wait for the socket to finish its close handshake on exit.
const CLOSE_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid connection settings: {0}")]
    Address(#[from] AddressError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "kabaw-chat", about = "Terminal client for Kabaw Chat")]
struct Cli {
    #[arg(long, env = "KABAW_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,

    #[arg(long, env = "KABAW_USERNAME", default_value = DEFAULT_USERNAME)]
    username: String,

    #[arg(long, env = "KABAW_CHANNEL", default_value = DEFAULT_CHANNEL)]
    channel: String,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ChatConfig {
        server_url: cli.server_url,
        username: cli.username,
        channel: cli.channel,
    };
    let address = config.address()?;

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let connector = WsConnector::new(events_tx);
    let mut hook = SessionHook::new();
    hook.add_observer(Box::new(TerminalObserver::new(io::stdout())));

    let mut stdout = io::stdout();
    writeln!(stdout, "Kabaw Chat. Type /help for commands.")?;
    stdout.flush()?;

    hook.connect(&connector, address);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some((id, event)) = events_rx.recv() => {
                hook.handle(id, event);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let flow = apply_input(parse_input(&line), &mut hook, &connector, &mut config, &mut stdout)?;
                if flow == Flow::Quit {
                    break;
                }
            }
        }
    }

    if let Some(id) = hook.active_transport()
        && hook.disconnect()
    {
        if tokio::time::timeout(CLOSE_GRACE, wait_for_close(&mut events_rx, id)).await.is_err() {
            tracing::debug!("socket did not finish closing before exit");
        }
    }
    Ok(())
}
