use anyhow::Result;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db::models::{Bet, Fixture, Prediction};
use crate::db::Database;
use crate::fixtures::{fetch_leagues, FixtureProvider};
use crate::polymarket::Exchange;
use crate::predict::{FallbackChain, League};

use super::kelly::edge;
use super::strategy::{plan_bet, BetParams, BetPlan};

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub fixtures: usize,
    pub predictions: usize,
    pub bets_placed: usize,
    pub staked_usd: f64,
}

/// Loly: fetch the day's fixtures, predict every one of them, and bet on the
/// confident picks that Polymarket misprices.
pub struct LolyRunner {
    config: Config,
    db: Database,
    provider: Arc<dyn FixtureProvider>,
    exchange: Arc<dyn Exchange>,
    chains: HashMap<League, FallbackChain>,
    /// Cash available for new bets (simulated in dry-run mode)
    balance: f64,
}

impl LolyRunner {
    pub fn new(
        config: Config,
        db: Database,
        provider: Arc<dyn FixtureProvider>,
        exchange: Arc<dyn Exchange>,
    ) -> Result<Self> {
        let balance = db.get_balance()?;
        let balance = if balance <= 0.0 {
            db.record_balance(config.initial_balance)?;
            info!("Initial balance recorded: ${:.2}", config.initial_balance);
            config.initial_balance
        } else {
            balance
        };
        Ok(LolyRunner {
            config,
            db,
            provider,
            exchange,
            chains: HashMap::new(),
            balance,
        })
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    fn params(&self) -> BetParams {
        self.config.bet_params()
    }

    pub async fn run(&mut self, leagues: &[League], date: Option<NaiveDate>) -> Result<RunSummary> {
        let fixtures = fetch_leagues(Arc::clone(&self.provider), leagues, date).await;
        info!(
            "Loly run: {} fixture(s) across {} league(s)",
            fixtures.len(),
            leagues.len()
        );

        let mut summary = RunSummary {
            fixtures: fixtures.len(),
            ..RunSummary::default()
        };

        for fixture in &fixtures {
            let mut prediction = self
                .chains
                .entry(fixture.league)
                .or_insert_with(|| FallbackChain::for_league(fixture.league))
                .predict(fixture);
            prediction.id = Some(self.db.insert_prediction(&prediction)?);
            summary.predictions += 1;

            if let Some(size) = self.consider_bet(fixture, &prediction).await? {
                summary.bets_placed += 1;
                summary.staked_usd += size;
            }
        }

        info!(
            "Loly run done: {} prediction(s), {} bet(s), ${:.2} staked, balance ${:.2}",
            summary.predictions, summary.bets_placed, summary.staked_usd, self.balance
        );
        Ok(summary)
    }

    /// Returns the stake if a bet was placed.
    async fn consider_bet(&mut self, fixture: &Fixture, prediction: &Prediction) -> Result<Option<f64>> {
        let params = self.params();
        if !fixture.is_bettable() {
            return Ok(None);
        }
        if prediction.fallback || prediction.confidence < params.min_confidence {
            return Ok(None);
        }
        if self.db.has_bet_for_event(&fixture.event_id)? {
            info!("Already bet on '{}', skipping", prediction.matchup());
            return Ok(None);
        }

        let markets = match self
            .exchange
            .search_markets(&fixture.home_team, &fixture.away_team, fixture.league.key())
            .await
        {
            Ok(m) => m,
            Err(e) => {
                warn!("Market search failed for '{}': {:#}", prediction.matchup(), e);
                return Ok(None);
            }
        };

        let best = markets
            .iter()
            .filter(|m| m.status == "active")
            .filter_map(|m| plan_bet(prediction, m, self.balance, &params))
            .max_by(|a, b| a.edge.total_cmp(&b.edge));
        let Some(plan) = best else {
            info!("No bettable market for '{}'", prediction.matchup());
            return Ok(None);
        };

        let order_id = if self.config.dry_run {
            info!(
                "🟡 DRY RUN: would buy {} on '{}' for ${:.2} at {:.3} (edge {:.3})",
                plan.outcome, plan.question, plan.size_usd, plan.price, plan.edge
            );
            None
        } else {
            match self.place_live(&plan, &params).await {
                Some(id) => Some(id),
                None => return Ok(None),
            }
        };

        let bet = Bet {
            id: None,
            market_id: plan.market_id.clone(),
            question: plan.question.clone(),
            event_id: fixture.event_id.clone(),
            league: fixture.league.key().to_string(),
            outcome: plan.outcome.to_string(),
            pick: prediction.pick,
            size_usd: plan.size_usd,
            price: plan.price,
            model_prob: plan.model_prob,
            edge: plan.edge,
            order_id,
            dry_run: self.config.dry_run,
            placed_at: Utc::now(),
        };
        self.db.insert_bet(&bet)?;
        self.balance -= plan.size_usd;
        self.db.record_balance(self.balance)?;
        Ok(Some(plan.size_usd))
    }

    /// Re-check the price, then send the order. `None` when the bet no longer
    /// clears the edge gate or the venue rejected it.
    async fn place_live(&self, plan: &BetPlan, params: &BetParams) -> Option<String> {
        let price = match self.exchange.token_price(&plan.market_id, plan.outcome).await {
            Ok(p) if p > 0.0 && p < 1.0 => p,
            Ok(p) => {
                warn!("Ignoring invalid fresh price {:.4} for {}", p, plan.market_id);
                plan.price
            }
            Err(e) => {
                warn!("Price refresh failed for {}: {:#}", plan.market_id, e);
                plan.price
            }
        };
        if edge(plan.model_prob, price) < params.min_edge {
            info!(
                "Price moved to {:.3} on '{}', edge gone, skipping",
                price, plan.question
            );
            return None;
        }

        match self
            .exchange
            .place_order(&plan.market_id, plan.outcome, plan.size_usd, price)
            .await
        {
            Ok(id) => Some(id),
            Err(e) => {
                error!("Failed to place order on '{}': {:#}", plan.question, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{GameStatus, Market};
    use async_trait::async_trait;
    use clap::Parser;
    use std::sync::Mutex;

    struct OneMatchday;

    #[async_trait]
    impl FixtureProvider for OneMatchday {
        fn name(&self) -> &str {
            "matchday"
        }

        async fn fetch_fixtures(&self, league: League, _date: Option<NaiveDate>) -> Result<Vec<Fixture>> {
            if league != League::Bundesliga {
                return Ok(vec![]);
            }
            let mut live = Fixture::manual(league, "Dortmund", "Leipzig", None);
            live.status = GameStatus::InProgress;
            Ok(vec![
                Fixture::manual(league, "Bayern Munich", "Heidenheim", None),
                Fixture::manual(league, "Bochum", "Darmstadt", None),
                live,
            ])
        }
    }

    #[derive(Default)]
    struct FakeExchange {
        orders: Mutex<Vec<(String, String, f64)>>,
    }

    #[async_trait]
    impl Exchange for FakeExchange {
        async fn search_markets(&self, home: &str, _away: &str, league: &str) -> Result<Vec<Market>> {
            let market = |id: &str, q: String, yes: f64| Market {
                id: id.into(),
                question: q,
                league: Some(league.into()),
                event_name: None,
                yes_price: Some(yes),
                no_price: Some(1.0 - yes),
                volume: Some(1000.0),
                status: "active".into(),
                fetched_at: Utc::now(),
            };
            Ok(vec![
                market("props", format!("{} over 2.5 goals?", home), 0.5),
                market("win", format!("Will {} win?", home), 0.55),
            ])
        }

        async fn token_price(&self, _market_id: &str, _outcome: &str) -> Result<f64> {
            Ok(0.56)
        }

        async fn place_order(&self, market_id: &str, outcome: &str, size_usd: f64, _price: f64) -> Result<String> {
            let mut orders = self.orders.lock().unwrap();
            orders.push((market_id.into(), outcome.into(), size_usd));
            Ok(format!("order-{}", orders.len()))
        }
    }

    fn config(extra: &[&str]) -> Config {
        let mut args = vec!["loly", "--initial-balance", "200", "--min-confidence", "80"];
        args.extend_from_slice(extra);
        args.push("loly");
        Config::try_parse_from(args).unwrap()
    }

    #[tokio::test]
    async fn dry_run_predicts_everything_and_bets_on_confident_picks() {
        let db = Database::open(":memory:").unwrap();
        let exchange = Arc::new(FakeExchange::default());
        let mut runner = LolyRunner::new(
            config(&["--dry-run"]),
            db.clone(),
            Arc::new(OneMatchday),
            exchange.clone(),
        )
        .unwrap();

        let summary = runner.run(&[League::Bundesliga, League::Epl], None).await.unwrap();
        assert_eq!(summary.fixtures, 3);
        assert_eq!(summary.predictions, 3);
        assert_eq!(summary.bets_placed, 1);
        assert!(summary.staked_usd >= 1.0);
        assert!(exchange.orders.lock().unwrap().is_empty());

        let bets = db.list_bets(10).unwrap();
        assert_eq!(bets.len(), 1);
        assert_eq!(bets[0].market_id, "win");
        assert_eq!(bets[0].outcome, "YES");
        assert!(bets[0].dry_run);
        assert!(bets[0].order_id.is_none());
        assert_eq!(db.list_recent_predictions(10).unwrap().len(), 3);
        assert!((runner.balance() - (200.0 - summary.staked_usd)).abs() < 1e-9);
        assert!((db.get_balance().unwrap() - runner.balance()).abs() < 1e-9);
    }

    #[tokio::test]
    async fn second_run_does_not_bet_twice() {
        let db = Database::open(":memory:").unwrap();
        let mut runner = LolyRunner::new(
            config(&["--dry-run"]),
            db.clone(),
            Arc::new(OneMatchday),
            Arc::new(FakeExchange::default()),
        )
        .unwrap();
        runner.run(&[League::Bundesliga], None).await.unwrap();
        let again = runner.run(&[League::Bundesliga], None).await.unwrap();
        assert_eq!(again.bets_placed, 0);
        assert_eq!(db.list_bets(10).unwrap().len(), 1);
        assert_eq!(db.list_recent_predictions(10).unwrap().len(), 6);
    }

    #[tokio::test]
    async fn live_mode_places_orders_at_the_fresh_price() {
        let db = Database::open(":memory:").unwrap();
        let exchange = Arc::new(FakeExchange::default());
        let mut runner = LolyRunner::new(
            config(&["--polymarket-api-key", "k"]),
            db.clone(),
            Arc::new(OneMatchday),
            exchange.clone(),
        )
        .unwrap();
        let summary = runner.run(&[League::Bundesliga], None).await.unwrap();
        assert_eq!(summary.bets_placed, 1);

        let orders = exchange.orders.lock().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].0, "win");
        let bets = db.list_bets(10).unwrap();
        assert_eq!(bets[0].order_id.as_deref(), Some("order-1"));
        assert!(!bets[0].dry_run);
    }
}
