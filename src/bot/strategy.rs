//! Which Polymarket token backs a prediction, and how much to stake on it.

use serde::Serialize;
use tracing::debug;

use crate::db::models::{Market, Pick, Prediction};

use super::kelly::{edge, kelly_stake};

/// Stakes below this are not worth an order.
pub const MIN_STAKE_USD: f64 = 1.0;

/// Match result a market's YES token pays out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum YesSide {
    Home,
    Away,
    Draw,
}

impl YesSide {
    fn backs(self, pick: Pick) -> bool {
        matches!(
            (self, pick),
            (YesSide::Home, Pick::HomeWin) | (YesSide::Away, Pick::AwayWin) | (YesSide::Draw, Pick::Draw)
        )
    }
}

/// Sizing knobs, taken from the CLI config.
#[derive(Debug, Clone, Copy)]
pub struct BetParams {
    pub kelly_fraction: f64,
    pub min_edge: f64,
    pub min_confidence: f64,
    pub max_stake_usd: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BetPlan {
    pub market_id: String,
    pub question: String,
    /// "YES" or "NO"
    pub outcome: &'static str,
    pub yes_side: YesSide,
    pub price: f64,
    pub model_prob: f64,
    pub edge: f64,
    pub size_usd: f64,
}

pub fn normalize_text(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole-word (or whole-phrase) containment on normalised text.
fn has_phrase(text: &str, phrase: &str) -> bool {
    format!(" {} ", text).contains(&format!(" {} ", phrase))
}

/// Words that may sit right before a club name in a market question.
const LEADING_WORDS: &[&str] = &[
    "will", "can", "does", "do", "vs", "v", "versus", "against", "between", "and", "or", "beat",
    "beats", "defeat", "defeats", "draw", "tie", "fc", "cf", "sc", "ac",
];

/// Words that may follow a club name. Anything else means the question names
/// a longer club ("Inter" inside "Inter Miami").
const TRAILING_WORDS: &[&str] = &[
    "will", "win", "wins", "winner", "to", "beat", "beats", "defeat", "defeats", "vs", "v",
    "versus", "against", "draw", "tie", "and", "or", "in", "on", "at", "match", "game",
    "moneyline", "fc", "cf", "sc", "ac",
];

/// Shared by many clubs, so never enough on their own.
const GENERIC_CLUB_WORDS: &[&str] = &[
    "real", "manchester", "inter", "united", "city", "club", "athletic", "atletico", "sporting",
    "deportivo", "racing", "olympique", "borussia", "bayer", "dynamo", "young", "saint",
];

/// Whether `phrase` occurs in `words` as a complete club name: the words
/// around it must not extend it into some other club's name.
fn names_club(words: &[&str], phrase: &[&str]) -> bool {
    if phrase.is_empty() || phrase.len() > words.len() {
        return false;
    }
    (0..=words.len() - phrase.len()).any(|i| {
        let end = i + phrase.len();
        words[i..end] == *phrase
            && (i == 0 || LEADING_WORDS.contains(&words[i - 1]))
            && words
                .get(end)
                .map_or(true, |w| TRAILING_WORDS.contains(w) || w.chars().all(|c| c.is_ascii_digit()))
    })
}

/// Whether normalised `text` mentions `team`, by full name or by its first
/// distinctive word ("Bayern" for "Bayern Munich").
pub fn contains_team(text: &str, team: &str) -> bool {
    let team_norm = normalize_text(team);
    let team_words: Vec<&str> = team_norm.split_whitespace().collect();
    if team_words.is_empty() {
        return false;
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    if names_club(&words, &team_words) {
        return true;
    }
    team_words
        .iter()
        .find(|t| t.chars().count() >= 4 && !GENERIC_CLUB_WORDS.contains(t))
        .is_some_and(|token| names_club(&words, &[token]))
}

/// Work out what a market's YES token pays on. `None` for props, totals and
/// anything that does not name either team.
pub fn infer_yes_side(market: &Market, home_team: &str, away_team: &str) -> Option<YesSide> {
    let question = normalize_text(&market.question);

    let reject_keywords = [
        "over",
        "under",
        "total",
        "spread",
        "handicap",
        "points",
        "goals",
        "corners",
        "cards",
        "player",
        "first",
        "next",
        "exact score",
        "both teams",
        "clean sheet",
        "relegated",
        "champion",
    ];
    if reject_keywords.iter().any(|k| has_phrase(&question, k)) {
        return None;
    }

    let home_in_q = contains_team(&question, home_team);
    let away_in_q = contains_team(&question, away_team);
    if !home_in_q && !away_in_q {
        return None;
    }

    if has_phrase(&question, "draw") || has_phrase(&question, "tie") {
        return Some(YesSide::Draw);
    }

    let winner_keywords = ["win", "winner", "beat", "beats", "moneyline"];
    if !winner_keywords.iter().any(|k| has_phrase(&question, k)) {
        return None;
    }

    match (home_in_q, away_in_q) {
        (true, false) => Some(YesSide::Home),
        (false, true) => Some(YesSide::Away),
        _ => {
            let home_q = normalize_text(home_team);
            let away_q = normalize_text(away_team);
            let says_wins = |team: &str| {
                [
                    format!("will {} win", team),
                    format!("{} to win", team),
                    format!("{} wins", team),
                    format!("{} beat", team),
                ]
                .iter()
                .any(|p| question.contains(p.as_str()))
            };
            if says_wins(&home_q) {
                Some(YesSide::Home)
            } else if says_wins(&away_q) {
                Some(YesSide::Away)
            } else {
                None
            }
        }
    }
}

/// Size a bet on `market` for `prediction`, or `None` if any gate fails.
///
/// Confidence / 100 is treated as the win probability of the pick. When YES
/// backs a different result the NO token is bought instead: the pick is one of
/// the results that resolve NO, so the same number bounds P(NO) from below.
pub fn plan_bet(
    prediction: &Prediction,
    market: &Market,
    balance: f64,
    params: &BetParams,
) -> Option<BetPlan> {
    if prediction.fallback || prediction.confidence < params.min_confidence {
        return None;
    }
    let yes_side = infer_yes_side(market, &prediction.home_team, &prediction.away_team)?;

    let model_prob = (prediction.confidence / 100.0).clamp(0.0, 1.0);
    let (outcome, price) = if yes_side.backs(prediction.pick) {
        ("YES", market.yes_price?)
    } else {
        let no = market
            .no_price
            .or_else(|| market.yes_price.map(|y| (1.0 - y).clamp(0.01, 0.99)))?;
        ("NO", no)
    };
    if price <= 0.0 || price >= 1.0 {
        return None;
    }

    let bet_edge = edge(model_prob, price);
    if bet_edge < params.min_edge {
        debug!(
            "'{}' {} edge {:.3} below {:.3}",
            market.question, outcome, bet_edge, params.min_edge
        );
        return None;
    }

    let size_usd = (balance * kelly_stake(model_prob, price, params.kelly_fraction))
        .min(params.max_stake_usd);
    if size_usd < MIN_STAKE_USD || size_usd > balance {
        debug!("Stake ${:.2} out of range for '{}'", size_usd, market.question);
        return None;
    }

    Some(BetPlan {
        market_id: market.id.clone(),
        question: market.question.clone(),
        outcome,
        yes_side,
        price,
        model_prob,
        edge: bet_edge,
        size_usd,
    })
}
