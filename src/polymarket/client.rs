use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::db::models::Market;

/// Client for the Polymarket Gamma (markets) API and CLOB (order book) API.
#[derive(Clone)]
pub struct PolymarketClient {
    http: Client,
    api_url: String,
    clob_url: String,
    api_key: Option<String>,
}

impl PolymarketClient {
    pub fn new(
        api_url: &str,
        clob_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(PolymarketClient {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            clob_url: clob_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn search_url(&self, home_team: &str, away_team: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/markets", self.api_url))
            .context("Invalid Polymarket API url")?;
        url.query_pairs_mut()
            .append_pair("active", "true")
            .append_pair("closed", "false")
            .append_pair("limit", "20")
            .append_pair("q", &format!("{} {}", home_team, away_team));
        Ok(url)
    }

    /// Search for open markets about a match.
    pub async fn search_markets(
        &self,
        home_team: &str,
        away_team: &str,
        league: &str,
    ) -> Result<Vec<Market>> {
        let url = self.search_url(home_team, away_team)?;
        debug!("Searching Polymarket markets: {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .context("Polymarket API request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Polymarket API error {}: {}", status, body);
        }

        let raw: serde_json::Value = resp
            .json()
            .await
            .context("Failed to parse Polymarket response")?;

        let markets = parse_markets(&raw, league);
        info!(
            "Found {} Polymarket markets for '{} vs {}'",
            markets.len(),
            home_team,
            away_team
        );
        Ok(markets)
    }

    /// Current price (0.0–1.0) of the YES or NO token.
    pub async fn get_token_price(&self, market_id: &str, outcome: &str) -> Result<f64> {
        let url = format!("{}/markets/{}", self.api_url, market_id);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to fetch market price")?;

        if !resp.status().is_success() {
            anyhow::bail!("Polymarket price fetch error: {}", resp.status());
        }

        let raw: serde_json::Value = resp.json().await.context("Failed to parse market")?;
        extract_price(&raw, outcome)
    }

    /// Place a limit buy on the CLOB and return the order id.
    pub async fn place_order(
        &self,
        market_id: &str,
        outcome: &str,
        size_usd: f64,
        price: f64,
    ) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .context("Polymarket API key is required to place orders")?;

        info!(
            "Placing order: market={}, outcome={}, size=${:.2}, price={:.3}",
            market_id, outcome, size_usd, price
        );

        let order = serde_json::json!({
            "market": market_id,
            "outcome": outcome,
            "price": price,
            "size": size_usd,
            "side": "buy",
            "orderType": "limit",
        });

        let url = format!("{}/order", self.clob_url);
        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&order)
            .send()
            .await
            .context("Failed to place Polymarket order")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Order placement failed {}: {}", status, body);
        }

        let result: serde_json::Value = resp.json().await.context("Failed to parse order reply")?;
        let order_id = result["orderId"]
            .as_str()
            .or_else(|| result["orderID"].as_str())
            .context("Order reply has no order id")?
            .to_string();
        info!("Order placed, id={}", order_id);
        Ok(order_id)
    }
}

// ── Parsing helpers ────────────────────────────────────────────────────────────

pub fn parse_markets(raw: &serde_json::Value, league_hint: &str) -> Vec<Market> {
    // Some endpoints return { "markets": [...] }
    let Some(items) = raw
        .as_array()
        .or_else(|| raw.get("markets").and_then(|v| v.as_array()))
    else {
        return vec![];
    };

    items
        .iter()
        .filter_map(|item| {
            let id = item["conditionId"].as_str().or_else(|| item["id"].as_str())?;
            let question = item["question"].as_str().unwrap_or("").to_string();
            let volume = number(&item["volume"]);
            let status = if item["active"].as_bool().unwrap_or(false)
                && !item["closed"].as_bool().unwrap_or(false)
            {
                "active"
            } else {
                "closed"
            };

            let (yes_price, no_price) = parse_token_prices(item);

            Some(Market {
                id: id.to_string(),
                question,
                league: Some(league_hint.to_string()),
                event_name: item["description"].as_str().map(str::to_string),
                yes_price,
                no_price,
                volume,
                status: status.to_string(),
                fetched_at: Utc::now(),
            })
        })
        .collect()
}

fn number(v: &serde_json::Value) -> Option<f64> {
    v.as_f64().or_else(|| v.as_str().and_then(|s| s.parse().ok()))
}

/// YES/NO prices from the `tokens` array, or from `outcomePrices`, which the
/// Gamma API sometimes returns as a JSON-encoded string.
pub fn parse_token_prices(item: &serde_json::Value) -> (Option<f64>, Option<f64>) {
    // Polymarket tokens array: [{ "outcome": "Yes", "price": "0.65" }, ...]
    if let Some(tokens) = item["tokens"].as_array() {
        let mut yes_price = None;
        let mut no_price = None;
        for token in tokens {
            let outcome = token["outcome"].as_str().unwrap_or("").to_lowercase();
            let price = number(&token["price"]);
            match outcome.as_str() {
                "yes" => yes_price = price,
                "no" => no_price = price,
                _ => {}
            }
        }
        return (yes_price, no_price);
    }

    let prices = match &item["outcomePrices"] {
        serde_json::Value::Array(a) => a.clone(),
        serde_json::Value::String(s) => serde_json::from_str(s).unwrap_or_default(),
        _ => return (None, None),
    };
    (
        prices.first().and_then(number),
        prices.get(1).and_then(number),
    )
}

fn extract_price(raw: &serde_json::Value, outcome: &str) -> Result<f64> {
    let (yes_price, no_price) = parse_token_prices(raw);
    match outcome.to_lowercase().as_str() {
        "yes" => yes_price.context("YES price not found in market data"),
        "no" => no_price.context("NO price not found in market data"),
        _ => anyhow::bail!("Unknown outcome: {}", outcome),
    }
}
