pub mod client;

pub use client::PolymarketClient;

use anyhow::Result;
use async_trait::async_trait;

use crate::db::models::Market;

/// Where Loly looks up markets and sends orders.
#[async_trait]
pub trait Exchange: Send + Sync {
    async fn search_markets(&self, home_team: &str, away_team: &str, league: &str) -> Result<Vec<Market>>;

    /// Fresh price of the YES or NO token.
    async fn token_price(&self, market_id: &str, outcome: &str) -> Result<f64>;

    /// Place a buy and return the venue's order id.
    async fn place_order(&self, market_id: &str, outcome: &str, size_usd: f64, price: f64) -> Result<String>;
}

#[async_trait]
impl Exchange for PolymarketClient {
    async fn search_markets(&self, home_team: &str, away_team: &str, league: &str) -> Result<Vec<Market>> {
        PolymarketClient::search_markets(self, home_team, away_team, league).await
    }

    async fn token_price(&self, market_id: &str, outcome: &str) -> Result<f64> {
        self.get_token_price(market_id, outcome).await
    }

    async fn place_order(&self, market_id: &str, outcome: &str, size_usd: f64, price: f64) -> Result<String> {
        PolymarketClient::place_order(self, market_id, outcome, size_usd, price).await
    }
}
