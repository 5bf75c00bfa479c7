use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

mod bot;
mod config;
mod db;
mod error;
mod fixtures;
mod polymarket;
mod predict;
mod report;

use bot::LolyRunner;
use config::{leagues_or_all, Command, Config};
use db::models::{Fixture, Prediction};
use db::Database;
use fixtures::{fetch_leagues, load_coupon_file, EspnScoreboard, FixtureProvider, QuinielaPosible};
use polymarket::PolymarketClient;
use predict::{FallbackChain, ProgolPredictor};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    match config.command.clone() {
        Command::Predict { league, date } => {
            let provider: Arc<dyn FixtureProvider> =
                Arc::new(EspnScoreboard::new(&config.espn_base_url, config.http_timeout())?);
            let fixtures = fetch_leagues(provider, &leagues_or_all(&league), date).await;
            let predictions = predict_all(&fixtures);

            let db = Database::open(&config.database_path)?;
            for p in &predictions {
                db.insert_prediction(p)?;
            }

            if config.json {
                println!("{}", report::to_json(&predictions)?);
            } else {
                println!("{}", report::render_predictions(&predictions).trim_end());
            }
        }
        Command::Match {
            league,
            home,
            away,
            venue,
        } => {
            let fixture = Fixture::manual(league, &home, &away, venue.as_deref());
            let prediction = predict::apply_real_algorithm(league, &fixture);
            Database::open(&config.database_path)?.insert_prediction(&prediction)?;

            if config.json {
                println!("{}", report::to_json(&prediction)?);
            } else {
                println!("{}", report::render_prediction(&prediction));
            }
        }
        Command::Progol {
            coupon,
            max_doubles,
        } => {
            let matches = match coupon {
                Some(path) => load_coupon_file(&path)?,
                None => QuinielaPosible::new(&config.progol_url, config.http_timeout())?
                    .fetch_coupon()
                    .await
                    .context("Could not fetch the Progol coupon; pass --coupon <file> to work offline")?,
            };
            let ticket = ProgolPredictor::new().pick_coupon(&matches, max_doubles);

            if config.json {
                println!("{}", report::to_json(&ticket)?);
            } else {
                println!("{}", report::render_ticket(&ticket));
            }
        }
        Command::Loly { league, date } => {
            if config.dry_run {
                info!(
                    "🟡 DRY RUN mode – no real bets will be placed (initial balance: ${:.2})",
                    config.initial_balance
                );
            } else {
                info!("🔴 LIVE mode – real orders WILL be placed on Polymarket");
            }

            let db = Database::open(&config.database_path)?;
            info!("Database opened: {}", config.database_path);

            let provider = Arc::new(EspnScoreboard::new(&config.espn_base_url, config.http_timeout())?);
            let exchange = Arc::new(PolymarketClient::new(
                &config.polymarket_api_url,
                &config.polymarket_clob_url,
                config.polymarket_api_key.clone(),
                config.http_timeout(),
            )?);

            let mut runner = LolyRunner::new(config.clone(), db, provider, exchange)?;
            let summary = runner.run(&leagues_or_all(&league), date).await?;
            info!("Balance after run: ${:.2}", runner.balance());

            if config.json {
                println!("{}", report::to_json(&summary)?);
            } else {
                println!("{}", report::render_summary(&summary));
            }
        }
        Command::History { limit } => {
            let db = Database::open(&config.database_path)?;
            let history = report::History {
                stats: db.get_stats()?,
                predictions: db.list_recent_predictions(limit)?,
                bets: db.list_bets(limit)?,
            };

            if config.json {
                println!("{}", report::to_json(&history)?);
            } else {
                println!("{}", report::render_history(&history));
            }
        }
    }

    Ok(())
}

/// One fallback chain per league, shared across that league's fixtures.
fn predict_all(fixtures: &[Fixture]) -> Vec<Prediction> {
    let mut chains = std::collections::HashMap::new();
    fixtures
        .iter()
        .map(|f| {
            chains
                .entry(f.league)
                .or_insert_with(|| FallbackChain::for_league(f.league))
                .predict(f)
        })
        .collect()
}
