//! Skirmish client binary.
//!
//! Plays a complete match between two scripted opponents and prints a JSON
//! summary on stdout. Logs go to stderr.
//!
//! # Environment
//!
//! - `SKIRMISH_SEED`: map seed (random when unset)
//! - `SKIRMISH_RULES_PATH`: rules TOML; the stock rules are used otherwise
//! - `SKIRMISH_MAX_ROUNDS`: round limit
//! - `SKIRMISH_OPPONENT_RECRUITS`: whether the opponents buy units
//! - `RUST_LOG`: log filter
//!
//! ```bash
//! SKIRMISH_SEED=7 cargo run -p skirmish-client
//! ```
mod report;

use anyhow::{Context, Result};
use game_content::ConfigLoader;
use game_core::{GameConfig, Side};
use runtime::{MatchSession, RuntimeConfig, ScriptedOpponent, Topic};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use report::{EventCounts, MatchReport};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let mut runtime_config = RuntimeConfig::from_env();
    let seed = runtime_config.resolve_seed();
    runtime_config.seed = Some(seed);

    let rules = load_rules(&runtime_config)?;

    let mut session = MatchSession::from_runtime_config(rules, &runtime_config)?;
    for side in [Side::A, Side::B] {
        if !session.is_scripted(side) {
            session = session.with_provider(
                side,
                ScriptedOpponent::new().with_recruiting(runtime_config.opponent_recruits),
            );
        }
    }

    let listeners =
        [Topic::Units, Topic::Economy, Topic::Turn].map(|topic| count_events(&session, topic));

    tracing::info!(
        "Starting self-play: seed={} max_rounds={}",
        seed,
        runtime_config.max_rounds
    );
    let outcomes = session.advance()?;
    tracing::info!("Self-play finished after {} commands", outcomes.len());

    let mut report = MatchReport::new(seed, &session);
    // Dropping the session closes the bus so the listeners drain and exit.
    drop(session);

    let mut counts = EventCounts::default();
    for listener in listeners {
        let (topic, seen) = listener.await.context("event listener panicked")?;
        counts.record(topic, seen);
    }
    report.events = counts;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_rules(config: &RuntimeConfig) -> Result<GameConfig> {
    match &config.rules_path {
        Some(path) => {
            tracing::info!("Loading rules from {}", path.display());
            ConfigLoader::load(path)
        }
        None => Ok(GameConfig::default()),
    }
}

/// Counts every event published on `topic` until the bus closes.
fn count_events(session: &MatchSession, topic: Topic) -> JoinHandle<(Topic, u64)> {
    let mut receiver = session.subscribe(topic);
    tokio::spawn(async move {
        let mut seen = 0u64;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    seen += 1;
                    tracing::trace!(
                        "[{:?}] round {} {}: {}",
                        topic,
                        event.round,
                        event.side,
                        event.event.as_snake_case()
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("{:?} listener lagged by {} events", topic, skipped);
                    seen += skipped;
                }
                Err(RecvError::Closed) => break,
            }
        }
        (topic, seen)
    })
}
