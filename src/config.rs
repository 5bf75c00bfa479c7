use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::bot::BetParams;
use crate::fixtures::espn::DEFAULT_BASE_URL;
use crate::fixtures::progol::DEFAULT_COUPON_URL;
use crate::predict::League;

/// Loly: rule-table football predictions, Progol picks and Polymarket bets
#[derive(Parser, Debug, Clone)]
#[command(name = "loly", version, about)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Run in dry-run mode (bets are recorded but never sent)
    #[arg(long, env = "DRY_RUN", default_value = "false", global = true)]
    pub dry_run: bool,

    /// Initial simulated balance (USD)
    #[arg(long, env = "INITIAL_BALANCE", default_value = "100.0", global = true)]
    pub initial_balance: f64,

    /// SQLite database path
    #[arg(long, env = "DATABASE_PATH", default_value = "loly.db", global = true)]
    pub database_path: String,

    /// ESPN soccer API base URL
    #[arg(long, env = "ESPN_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub espn_base_url: String,

    /// Progol coupon page
    #[arg(long, env = "PROGOL_URL", default_value = DEFAULT_COUPON_URL, global = true)]
    pub progol_url: String,

    /// Polymarket API base URL
    #[arg(
        long,
        env = "POLYMARKET_API_URL",
        default_value = "https://gamma-api.polymarket.com",
        global = true
    )]
    pub polymarket_api_url: String,

    /// Polymarket CLOB (Central Limit Order Book) URL
    #[arg(
        long,
        env = "POLYMARKET_CLOB_URL",
        default_value = "https://clob.polymarket.com",
        global = true
    )]
    pub polymarket_clob_url: String,

    /// Polymarket API key (required for live betting)
    #[arg(long, env = "POLYMARKET_API_KEY", global = true)]
    pub polymarket_api_key: Option<String>,

    /// Fractional Kelly multiplier (0.0–1.0)
    #[arg(long, env = "KELLY_FRACTION", default_value = "0.25", global = true)]
    pub kelly_fraction: f64,

    /// Minimum edge required to place a bet (e.g. 0.05 = 5%)
    #[arg(long, env = "MIN_EDGE", default_value = "0.05", global = true)]
    pub min_edge: f64,

    /// Minimum prediction confidence (0–100) to consider betting
    #[arg(long, env = "MIN_CONFIDENCE", default_value = "75.0", global = true)]
    pub min_confidence: f64,

    /// Largest single stake (USD)
    #[arg(long, env = "MAX_STAKE_USD", default_value = "25.0", global = true)]
    pub max_stake_usd: f64,

    /// HTTP timeout for every upstream request, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "10", global = true)]
    pub http_timeout_secs: u64,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Predict the day's fixtures fetched from ESPN
    Predict {
        /// Leagues to fetch (comma separated); all leagues when omitted
        #[arg(long, value_delimiter = ',')]
        league: Vec<League>,
        /// Match day as YYYY-MM-DD; ESPN's "today" when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Predict a single hand-entered match
    Match {
        #[arg(long)]
        league: League,
        #[arg(long)]
        home: String,
        #[arg(long)]
        away: String,
        #[arg(long)]
        venue: Option<String>,
    },
    /// Fill a Progol coupon
    Progol {
        /// Read the coupon from a local text file instead of scraping it
        #[arg(long)]
        coupon: Option<PathBuf>,
        /// Doubles to spend on the least confident main matches
        #[arg(long, default_value = "3")]
        max_doubles: usize,
    },
    /// Predict the day's fixtures and bet on confident picks
    Loly {
        #[arg(long, value_delimiter = ',')]
        league: Vec<League>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show recent predictions, bets and ledger totals
    History {
        #[arg(long, default_value = "20")]
        limit: i64,
    },
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if matches!(self.command, Command::Loly { .. })
            && !self.dry_run
            && self.polymarket_api_key.is_none()
        {
            anyhow::bail!(
                "POLYMARKET_API_KEY is required in live betting mode. Use --dry-run for simulation."
            );
        }
        if !(0.0..=1.0).contains(&self.kelly_fraction) {
            anyhow::bail!("kelly_fraction must be between 0.0 and 1.0");
        }
        if !(0.0..=1.0).contains(&self.min_edge) {
            anyhow::bail!("min_edge must be between 0.0 and 1.0");
        }
        if !(0.0..=100.0).contains(&self.min_confidence) {
            anyhow::bail!("min_confidence must be between 0 and 100");
        }
        if self.initial_balance <= 0.0 {
            anyhow::bail!("initial_balance must be positive");
        }
        if self.max_stake_usd <= 0.0 {
            anyhow::bail!("max_stake_usd must be positive");
        }
        if self.http_timeout_secs == 0 {
            anyhow::bail!("http_timeout_secs must be at least 1");
        }
        if let Command::History { limit } = self.command {
            if limit <= 0 {
                anyhow::bail!("--limit must be positive");
            }
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn bet_params(&self) -> BetParams {
        BetParams {
            kelly_fraction: self.kelly_fraction,
            min_edge: self.min_edge,
            min_confidence: self.min_confidence,
            max_stake_usd: self.max_stake_usd,
        }
    }
}

/// Empty selection means every league.
pub fn leagues_or_all(selected: &[League]) -> Vec<League> {
    if selected.is_empty() {
        League::ALL.to_vec()
    } else {
        selected.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut full = vec!["loly"];
        full.extend_from_slice(args);
        Config::try_parse_from(full).unwrap()
    }

    #[test]
    fn defaults() {
        let c = parse(&["history"]);
        assert!(!c.dry_run);
        assert_eq!(c.database_path, "loly.db");
        assert_eq!(c.espn_base_url, DEFAULT_BASE_URL);
        assert_eq!(c.http_timeout(), Duration::from_secs(10));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn leagues_parse_with_aliases() {
        let c = parse(&["predict", "--league", "epl,la-liga,ucl", "--date", "2024-05-04"]);
        match c.command {
            Command::Predict { league, date } => {
                assert_eq!(league, vec![League::Epl, League::LaLiga, League::ChampionsLeague]);
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 4));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(Config::try_parse_from(["loly", "predict", "--league", "eredivisie"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let c = parse(&["match", "--league", "bundesliga", "--home", "Bayern", "--away", "Mainz", "--json"]);
        assert!(c.json);
        assert!(matches!(c.command, Command::Match { league: League::Bundesliga, .. }));
    }

    #[test]
    fn live_betting_requires_api_key() {
        assert!(parse(&["loly"]).validate().is_err());
        assert!(parse(&["--dry-run", "loly"]).validate().is_ok());
        assert!(parse(&["--polymarket-api-key", "k", "loly"]).validate().is_ok());
        // Predictions never need a key
        assert!(parse(&["predict"]).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_knobs() {
        assert!(parse(&["--kelly-fraction", "1.5", "history"]).validate().is_err());
        assert!(parse(&["--min-confidence", "120", "history"]).validate().is_err());
        assert!(parse(&["--initial-balance", "0", "history"]).validate().is_err());
        assert!(parse(&["history", "--limit", "0"]).validate().is_err());
    }

    #[test]
    fn empty_league_selection_means_all() {
        assert_eq!(leagues_or_all(&[]).len(), League::ALL.len());
        assert_eq!(leagues_or_all(&[League::Mls]), vec![League::Mls]);
    }
}
