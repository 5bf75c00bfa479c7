//! Human-readable rendering of predictions, tickets and ledger state. Every
//! report has a JSON twin for `--json`.

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

use crate::bot::RunSummary;
use crate::db::models::{Bet, Prediction};
use crate::db::Stats;
use crate::predict::ProgolTicket;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_prediction(p: &Prediction) -> String {
    let venue = p
        .venue
        .as_deref()
        .map(|v| format!(" @ {}", v))
        .unwrap_or_default();
    format!(
        "{} {} vs {}{} → {} [{}] {:.1}% {} ({})",
        p.league.flag(),
        p.home_team,
        p.away_team,
        venue,
        p.label,
        p.pick.code(),
        p.confidence,
        p.tier.badge(),
        p.algorithm
    )
}

pub fn render_predictions(predictions: &[Prediction]) -> String {
    if predictions.is_empty() {
        return "No fixtures found.".to_string();
    }
    let mut out = String::new();
    for p in predictions {
        let _ = writeln!(out, "{}", render_prediction(p));
        if !p.fired_rules.is_empty() {
            let _ = writeln!(out, "    rules: {}", p.fired_rules.join(", "));
        }
    }
    out
}

pub fn render_ticket(ticket: &ProgolTicket) -> String {
    let mut out = String::from("🎟️  PROGOL\n");
    for (title, picks) in [
        ("Main coupon", ticket.main().collect::<Vec<_>>()),
        ("Revancha", ticket.revancha().collect::<Vec<_>>()),
    ] {
        if picks.is_empty() {
            continue;
        }
        let _ = writeln!(out, "── {} ──", title);
        for p in picks {
            let _ = writeln!(
                out,
                "{:>2}. {:<24} vs {:<24} {:<5} {:>5.1}%  {} {}",
                p.number,
                p.home_team,
                p.away_team,
                p.code(),
                p.confidence,
                p.league.flag(),
                if p.is_double() { "⚡ double" } else { "" }
            );
        }
    }
    let _ = write!(
        out,
        "Doubles: {}  Combinations: {}",
        ticket.doubles,
        ticket.combinations()
    );
    out
}

pub fn render_summary(s: &RunSummary) -> String {
    format!(
        "Loly: {} fixture(s), {} prediction(s), {} bet(s), ${:.2} staked",
        s.fixtures, s.predictions, s.bets_placed, s.staked_usd
    )
}

pub fn render_bet(b: &Bet) -> String {
    let mode = if b.dry_run { "🟡 DRY" } else { "🔴 LIVE" };
    format!(
        "{} {} {} ${:.2} @ {:.3} (p={:.2}, edge {:+.1}%) {}",
        mode,
        b.outcome,
        b.question,
        b.size_usd,
        b.price,
        b.model_prob,
        b.edge * 100.0,
        b.order_id.as_deref().unwrap_or("")
    )
    .trim_end()
    .to_string()
}

pub fn render_stats(stats: &Stats) -> String {
    format!(
        "Predictions: {} ({} fallback)\nBets: {} (${:.2} staked)\nBalance: ${:.2}",
        stats.total_predictions,
        stats.fallback_predictions,
        stats.total_bets,
        stats.total_staked,
        stats.current_balance
    )
}

#[derive(Debug, Serialize)]
pub struct History {
    pub stats: Stats,
    pub predictions: Vec<Prediction>,
    pub bets: Vec<Bet>,
}

pub fn render_history(h: &History) -> String {
    let mut out = render_stats(&h.stats);
    if !h.predictions.is_empty() {
        out.push_str("\n\nRecent predictions:\n");
        out.push_str(&render_predictions(&h.predictions));
    }
    if !h.bets.is_empty() {
        out.push_str("\nRecent bets:\n");
        for b in &h.bets {
            let _ = writeln!(out, "{}", render_bet(b));
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Fixture;
    use crate::fixtures::CouponMatch;
    use crate::predict::{apply_real_algorithm, League, ProgolPredictor};

    #[test]
    fn prediction_line_has_label_tier_and_algorithm() {
        let f = Fixture::manual(League::Bundesliga, "Bayern Munich", "Heidenheim", Some("Allianz Arena"));
        let p = apply_real_algorithm(League::Bundesliga, &f);
        let line = render_prediction(&p);
        assert!(line.starts_with("🇩🇪 Bayern Munich vs Heidenheim @ Allianz Arena"), "{}", line);
        assert!(line.contains("🇩🇪 Bayern Munich gana"));
        assert!(line.contains("[L]"));
        assert!(line.contains("🐐 LEGENDARY STATUS"));
        assert!(line.contains(&format!("{:.1}%", p.confidence)));
        assert!(line.ends_with("(BUNDESLIGA_HYBRID_ENGINE)"));
        assert!(p.fired_rules.iter().any(|r| r == "fortress_venue"));
    }

    #[test]
    fn fallback_prediction_renders_canned_label() {
        let f = Fixture::manual(League::Brasileirao, "", "Santos", None);
        let p = apply_real_algorithm(League::Brasileirao, &f);
        let line = render_prediction(&p);
        assert!(line.contains("🇧🇷 Futebol Brasileiro"));
        assert!(line.contains("70.0%"));
        assert!(line.contains("BRASILEIRAO_ERROR_FALLBACK"));
    }

    #[test]
    fn ticket_lists_both_sections() {
        let coupon = vec![
            CouponMatch::new(1, "Necaxa", "Mazatlán"),
            CouponMatch::new(15, "Querétaro", "Juárez"),
        ];
        let ticket = ProgolPredictor::new().pick_coupon(&coupon, 1);
        let text = render_ticket(&ticket);
        assert!(text.contains("Main coupon"));
        assert!(text.contains("Revancha"));
        assert!(text.contains("⚡ double"));
        assert!(text.ends_with("Doubles: 1  Combinations: 2"));
    }

    #[test]
    fn json_output() {
        let stats = Stats {
            total_predictions: 3,
            fallback_predictions: 1,
            total_bets: 1,
            total_staked: 12.5,
            current_balance: 87.5,
        };
        let json = to_json(&stats).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["total_bets"], 1);
        assert!(render_stats(&stats).contains("Balance: $87.50"));
    }
}
