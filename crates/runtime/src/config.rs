//! Runtime settings read from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use game_core::Side;

/// Settings the runtime needs before a match starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Seed for map generation; drawn from the clock when absent.
    pub seed: Option<u64>,
    /// TOML rules file overlaying the stock rules.
    pub rules_path: Option<PathBuf>,
    /// Side played by the scripted opponent, if any.
    pub opponent: Option<Side>,
    /// Hard stop for self-play and long sessions.
    pub max_rounds: u32,
    /// Whether scripted sides spend gold on new units.
    pub opponent_recruits: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            rules_path: None,
            opponent: Some(Side::B),
            max_rounds: 30,
            opponent_recruits: true,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_SEED` - Map seed (default: system clock)
    /// - `SKIRMISH_RULES_PATH` - Rules TOML file (default: stock rules)
    /// - `SKIRMISH_OPPONENT_SIDE` - `a`, `b` or `none` (default: b)
    /// - `SKIRMISH_MAX_ROUNDS` - Round limit (default: 30)
    /// - `SKIRMISH_OPPONENT_RECRUITS` - Scripted sides buy units (default: true)
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.seed = read_env::<u64>("SKIRMISH_SEED");
        config.rules_path = env::var("SKIRMISH_RULES_PATH").ok().map(PathBuf::from);

        if let Ok(value) = env::var("SKIRMISH_OPPONENT_SIDE") {
            match parse_opponent(&value) {
                Some(opponent) => config.opponent = opponent,
                None => tracing::warn!("ignoring SKIRMISH_OPPONENT_SIDE={:?}", value),
            }
        }

        if let Some(rounds) = read_env::<u32>("SKIRMISH_MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }
        if let Some(recruits) = read_env::<bool>("SKIRMISH_OPPONENT_RECRUITS") {
            config.opponent_recruits = recruits;
        }

        config
    }

    /// The configured seed, or one derived from the system clock.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default()
        })
    }
}

/// Parses an opponent side: `Some(None)` means no scripted opponent.
fn parse_opponent(value: &str) -> Option<Option<Side>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "a" => Some(Some(Side::A)),
        "b" => Some(Some(Side::B)),
        "none" | "" => Some(None),
        _ => None,
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
