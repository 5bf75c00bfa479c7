use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::predict::League;

/// A scheduled or played match as fetched from a fixture provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// External event ID from the provider (ESPN event id, or a synthetic id)
    pub event_id: String,
    pub league: League,
    pub home_team: String,
    pub away_team: String,
    pub venue: Option<String>,
    pub kickoff: Option<DateTime<Utc>>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: GameStatus,
}

impl Fixture {
    /// Build a hand-entered fixture with no provider metadata.
    pub fn manual(league: League, home_team: &str, away_team: &str, venue: Option<&str>) -> Self {
        Fixture {
            event_id: format!(
                "manual_{}_{}_{}",
                league.key(),
                home_team.trim().to_lowercase().replace(' ', "-"),
                away_team.trim().to_lowercase().replace(' ', "-")
            ),
            league,
            home_team: home_team.trim().to_string(),
            away_team: away_team.trim().to_string(),
            venue: venue.map(str::to_string),
            kickoff: None,
            home_score: None,
            away_score: None,
            status: GameStatus::Scheduled,
        }
    }

    pub fn is_bettable(&self) -> bool {
        self.status == GameStatus::Scheduled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Scheduled,
    InProgress,
    HalfTime,
    Finished,
    Postponed,
}

/// Match result a prediction backs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pick {
    HomeWin,
    Draw,
    AwayWin,
}

impl Pick {
    /// Progol coupon code: L (local), E (empate), V (visita)
    pub fn code(self) -> &'static str {
        match self {
            Pick::HomeWin => "L",
            Pick::Draw => "E",
            Pick::AwayWin => "V",
        }
    }

    pub fn from_code(code: &str) -> Option<Pick> {
        match code.trim().to_uppercase().as_str() {
            "L" | "1" | "HOME" => Some(Pick::HomeWin),
            "E" | "X" | "DRAW" => Some(Pick::Draw),
            "V" | "2" | "AWAY" => Some(Pick::AwayWin),
            _ => None,
        }
    }
}

/// Presentation bucket for a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceTier {
    Lean,
    Moderate,
    Strong,
    Elite,
    Legendary,
}

impl ConfidenceTier {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 90.0 {
            ConfidenceTier::Legendary
        } else if confidence >= 80.0 {
            ConfidenceTier::Elite
        } else if confidence >= 70.0 {
            ConfidenceTier::Strong
        } else if confidence >= 60.0 {
            ConfidenceTier::Moderate
        } else {
            ConfidenceTier::Lean
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            ConfidenceTier::Legendary => "🐐 LEGENDARY STATUS",
            ConfidenceTier::Elite => "🔥 ELITE",
            ConfidenceTier::Strong => "💪 STRONG",
            ConfidenceTier::Moderate => "👍 MODERATE",
            ConfidenceTier::Lean => "🤔 LEAN",
        }
    }
}

/// Output of a league predictor for one fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub id: Option<i64>,
    pub event_id: String,
    pub league: League,
    pub home_team: String,
    pub away_team: String,
    pub venue: Option<String>,
    pub pick: Pick,
    /// Rule-table score in the 0–100 range; not a calibrated probability
    pub confidence: f64,
    pub tier: ConfidenceTier,
    /// Presentation string, e.g. "🇩🇪 Bayern Munich gana"
    pub label: String,
    /// e.g. "BUNDESLIGA_HYBRID_ENGINE" or "BRASILEIRAO_ERROR_FALLBACK"
    pub algorithm: String,
    /// Names of the rules that fired, in evaluation order
    pub fired_rules: Vec<String>,
    /// Whether this is the canned fallback returned after every stage failed
    pub fallback: bool,
    pub predicted_at: DateTime<Utc>,
}

impl Prediction {
    pub fn matchup(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }
}

/// A Polymarket prediction market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    /// Polymarket market condition ID
    pub id: String,
    pub question: String,
    pub league: Option<String>,
    pub event_name: Option<String>,
    /// Current YES token price (0.0–1.0)
    pub yes_price: Option<f64>,
    /// Current NO token price (0.0–1.0)
    pub no_price: Option<f64>,
    /// Total traded volume in USD
    pub volume: Option<f64>,
    /// "active" | "closed"
    pub status: String,
    pub fetched_at: DateTime<Utc>,
}

/// A bet placed (or simulated) by the Loly runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bet {
    pub id: Option<i64>,
    pub market_id: String,
    pub question: String,
    pub event_id: String,
    pub league: String,
    /// "YES" or "NO"
    pub outcome: String,
    pub pick: Pick,
    pub size_usd: f64,
    /// Price paid for the outcome token (0.0–1.0)
    pub price: f64,
    /// Confidence / 100 at the time of the bet
    pub model_prob: f64,
    pub edge: f64,
    /// CLOB order id; `None` in dry-run mode
    pub order_id: Option<String>,
    pub dry_run: bool,
    pub placed_at: DateTime<Utc>,
}
