use anyhow::Result;
use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use eduvane::engine::UnavailableEngine;
use eduvane::gateway::{Gateway, SessionGateway, SessionState};
use eduvane::profile::{FileProfileStore, NoProfileStore, ProfileStore};

mod prompt;
mod remote;
mod session;

use prompt::rustyline::RustylinePrompt;
use prompt::{render_error, render_markdown, Theme};
use remote::RemoteGateway;
use session::{headless_turn, Session};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Relay through an eduvaned server instead of the in-process gateway
    #[arg(long, env = "EDUVANE_SERVER_URL")]
    server: Option<String>,

    /// Start as a guest; no profile is read
    #[arg(long)]
    guest: bool,

    /// Simulated latency of the in-process engine, in milliseconds
    #[arg(long, default_value_t = 800)]
    latency_ms: u64,

    /// Colour theme for rendered replies
    #[arg(long, value_enum, default_value = "dark")]
    theme: Theme,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive chat session
    Session,

    /// Send a single message, print the reply and exit
    Run {
        /// The message to send
        #[arg(short, long)]
        text: String,
    },
}

fn build_gateway(cli: &Cli) -> Box<dyn Gateway> {
    if let Some(server) = &cli.server {
        tracing::info!("relaying through {}", server);
        return Box::new(RemoteGateway::new(server.as_str()));
    }

    let profiles: Box<dyn ProfileStore> = match FileProfileStore::from_default_location() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!("No profile store available: {}", e);
            Box::new(NoProfileStore)
        }
    };
    Box::new(SessionGateway::new(
        Box::new(UnavailableEngine::with_latency(Duration::from_millis(
            cli.latency_ms,
        ))),
        profiles,
        SessionState::new(),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let gateway = build_gateway(&cli);

    match cli.command {
        Some(Command::Run { text }) => {
            let reply = headless_turn(gateway.as_ref(), text, cli.guest).await?;
            if reply.is_error() {
                render_error(&reply.content);
                std::process::exit(1);
            }
            render_markdown(&reply.content, cli.theme);
        }
        Some(Command::Session) | None => {
            let prompt = RustylinePrompt::new()?;
            let mut session = Session::new(gateway, Box::new(prompt), cli.guest);
            session.start().await?;
        }
    }
    Ok(())
}
