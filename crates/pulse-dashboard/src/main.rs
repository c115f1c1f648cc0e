//! Dashboard entry point.
//!
//! With arguments, runs them as commands, waits for every request to settle
//! and prints the board once. Without arguments, reads commands from stdin.

use anyhow::{Context, Result};
use pulse_config::DashboardSettings;
use pulse_dashboard::session::HELP;
use pulse_dashboard::{ApiClient, Command, Completion, Flow, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .compact()
        .init();

    let settings = DashboardSettings::from_env();
    info!("Using API at {}", settings.api_base_url);

    let (session, completions) = Session::new(ApiClient::new(&settings.api_base_url));

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        run_interactive(session, completions).await
    } else {
        let commands = Command::parse_args(&args)?;
        run_once(session, completions, commands).await;
        Ok(())
    }
}

async fn run_once(
    mut session: Session,
    mut completions: UnboundedReceiver<Completion>,
    commands: Vec<Command>,
) {
    for command in commands {
        if session.execute(command) == Flow::Quit {
            break;
        }
    }
    session.drain(&mut completions).await;
    print!("{}", session.render());
}

async fn run_interactive(
    mut session: Session,
    mut completions: UnboundedReceiver<Completion>,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{}", session.render());
    println!("{}", HELP);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match line.parse::<Command>() {
                    Ok(Command::Help) => println!("{}", HELP),
                    Ok(command) => {
                        if session.execute(command) == Flow::Quit {
                            break;
                        }
                        print!("{}", session.render());
                    }
                    Err(e) => println!("{}", e),
                }
            }
            Some(completion) = completions.recv() => {
                if session.complete(completion) {
                    print!("{}", session.render());
                }
            }
        }
    }

    Ok(())
}
