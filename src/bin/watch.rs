//! civic-watch - terminal client for a running Civic Pulse server
//!
//! Reads the state once, then redraws on every push. Commands are read from
//! stdin one per line.

use civic_pulse::client::{ApiClient, ClientResult};
use civic_pulse::config::ClientConfig;
use civic_pulse::store::VoteKind;
use civic_pulse::view::{render, transition, ViewEvent, ViewState};
use futures::stream::{self, BoxStream, StreamExt};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOAD_FAILED: &str = "Could not load data from server. Please try again later.";

const HELP: &str = "Commands: up <id> | down <id> | feedback <text> | \
                    select <neighborhood> | clear | toggle <id> | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Vote { id: String, kind: VoteKind },
    Feedback(String),
    Select(Option<String>),
    Toggle(String),
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match word {
        "up" | "down" if !rest.is_empty() => Ok(Command::Vote {
            id: rest.to_string(),
            kind: if word == "up" { VoteKind::Up } else { VoteKind::Down },
        }),
        // Empty comments are accepted like any other
        "feedback" => Ok(Command::Feedback(rest.to_string())),
        "select" if !rest.is_empty() => Ok(Command::Select(Some(rest.to_string()))),
        "clear" => Ok(Command::Select(None)),
        "toggle" if !rest.is_empty() => Ok(Command::Toggle(rest.to_string())),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(HELP.to_string()),
    }
}

fn draw(state: &ViewState) {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "\n{}\n{HELP}\n> ", render(state));
    let _ = stdout.flush();
}

type PushStream = BoxStream<'static, ClientResult<civic_pulse::broadcast::PushEvent>>;

#[tokio::main]
async fn main() {
    // Logs go to stderr so they do not interleave with the rendered view
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "civic_pulse=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env();
    let client = ApiClient::new(&config.api_url);

    let mut state = ViewState::Loading;
    draw(&state);

    match client.fetch_data().await {
        Ok(data) => state = transition(state, ViewEvent::Loaded(data)),
        Err(e) => {
            tracing::error!(error = %e, url = %config.api_url, "Initial load failed");
            state = transition(state, ViewEvent::LoadFailed(LOAD_FAILED.to_string()));
            draw(&state);
            std::process::exit(1);
        }
    }

    let mut events: PushStream = match client.events().await {
        Ok(events) => events.boxed(),
        Err(e) => {
            tracing::warn!(error = %e, "Push stream unavailable");
            let notice = format!("Live updates unavailable: {e}");
            state = transition(state, ViewEvent::TransportFailed(notice));
            stream::pending().boxed()
        }
    };
    draw(&state);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let event = tokio::select! {
            pushed = events.next() => match pushed {
                Some(Ok(event)) => ViewEvent::Pushed(event),
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "Bad push event");
                    continue;
                }
                None => {
                    events = stream::pending().boxed();
                    ViewEvent::TransportFailed("Live updates disconnected".to_string())
                }
            },
            line = lines.next_line() => match line {
                Ok(Some(line)) if line.trim().is_empty() => {
                    draw(&state);
                    continue;
                }
                Ok(Some(line)) => match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => match run_command(&client, command).await {
                        Some(event) => event,
                        None => continue,
                    },
                    Err(help) => {
                        println!("{help}");
                        continue;
                    }
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read stdin");
                    break;
                }
            },
        };

        state = transition(state, event);
        draw(&state);
    }
}

/// Perform a command. A successful vote yields no event; the matching push
/// updates the view.
async fn run_command(client: &ApiClient, command: Command) -> Option<ViewEvent> {
    match command {
        Command::Vote { id, kind } => match client.vote(&id, kind).await {
            Ok(entry) => {
                tracing::debug!(
                    id = %entry.id,
                    up = entry.votes.up,
                    down = entry.votes.down,
                    "Vote accepted"
                );
                None
            }
            Err(e) => Some(ViewEvent::TransportFailed(format!("Vote failed: {e}"))),
        },
        Command::Feedback(comment) => Some(match client.submit_feedback(&comment).await {
            Ok(_) => ViewEvent::FeedbackAccepted,
            Err(e) => ViewEvent::TransportFailed(format!("Feedback failed: {e}")),
        }),
        Command::Select(name) => Some(ViewEvent::NeighborhoodSelected(name)),
        Command::Toggle(id) => Some(ViewEvent::LanguageToggled(id)),
        Command::Quit => None,
    }
}
