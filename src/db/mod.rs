use anyhow::{anyhow, Result};
use chrono::Utc;
use rusqlite::{params, types::Type, Connection};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

pub mod models;
use models::*;

use crate::predict::League;

/// Thread-safe SQLite ledger (single connection with mutex)
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the SQLite database at the given path.
    /// `":memory:"` opens a throwaway in-memory ledger.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let db = Database {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))
    }

    /// Run schema migrations (idempotent)
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    // ── Balance ──────────────────────────────────────────────────────────────

    /// Get the current balance from the latest balance_history entry
    pub fn get_balance(&self) -> Result<f64> {
        let conn = self.conn()?;
        let balance: f64 = conn
            .query_row(
                "SELECT balance FROM balance_history ORDER BY id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0.0);
        Ok(balance)
    }

    /// Record a balance snapshot
    pub fn record_balance(&self, balance: f64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO balance_history (balance, recorded_at) VALUES (?1, ?2)",
            params![balance, Utc::now()],
        )?;
        Ok(())
    }

    // ── Predictions ───────────────────────────────────────────────────────────

    /// Insert a prediction and return its row id
    pub fn insert_prediction(&self, p: &Prediction) -> Result<i64> {
        let fired = serde_json::to_string(&p.fired_rules)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO predictions (
                event_id, league, home_team, away_team, venue, pick,
                confidence, label, algorithm, fired_rules, fallback, predicted_at
             ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12)",
            params![
                p.event_id,
                p.league.key(),
                p.home_team,
                p.away_team,
                p.venue,
                p.pick.code(),
                p.confidence,
                p.label,
                p.algorithm,
                fired,
                p.fallback,
                p.predicted_at,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List the most recent predictions, newest first
    pub fn list_recent_predictions(&self, limit: i64) -> Result<Vec<Prediction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, event_id, league, home_team, away_team, venue, pick,
                    confidence, label, algorithm, fired_rules, fallback, predicted_at
             FROM predictions ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], map_prediction)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    // ── Bets ──────────────────────────────────────────────────────────────────

    /// Insert a bet and return its row id
    pub fn insert_bet(&self, bet: &Bet) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO bets (
                market_id, question, event_id, league, outcome, pick, size_usd,
                price, model_prob, edge, order_id, dry_run, placed_at
             ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13)",
            params![
                bet.market_id,
                bet.question,
                bet.event_id,
                bet.league,
                bet.outcome,
                bet.pick.code(),
                bet.size_usd,
                bet.price,
                bet.model_prob,
                bet.edge,
                bet.order_id,
                bet.dry_run,
                bet.placed_at,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List the most recent bets, newest first
    pub fn list_bets(&self, limit: i64) -> Result<Vec<Bet>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, market_id, question, event_id, league, outcome, pick, size_usd,
                    price, model_prob, edge, order_id, dry_run, placed_at
             FROM bets ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], map_bet)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Whether a bet already exists for this event (any market)
    pub fn has_bet_for_event(&self, event_id: &str) -> Result<bool> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM bets WHERE event_id = ?1",
            params![event_id],
            |r| r.get(0),
        )?;
        Ok(count > 0)
    }

    // ── Stats ─────────────────────────────────────────────────────────────────

    /// Get aggregate ledger stats
    pub fn get_stats(&self) -> Result<Stats> {
        let conn = self.conn()?;
        let total_predictions: i64 = conn
            .query_row("SELECT COUNT(*) FROM predictions", [], |r| r.get(0))
            .unwrap_or(0);
        let fallback_predictions: i64 = conn
            .query_row("SELECT COUNT(*) FROM predictions WHERE fallback = 1", [], |r| {
                r.get(0)
            })
            .unwrap_or(0);
        let total_bets: i64 = conn
            .query_row("SELECT COUNT(*) FROM bets", [], |r| r.get(0))
            .unwrap_or(0);
        let total_staked: f64 = conn
            .query_row("SELECT COALESCE(SUM(size_usd),0) FROM bets", [], |r| r.get(0))
            .unwrap_or(0.0);
        let current_balance: f64 = conn
            .query_row(
                "SELECT balance FROM balance_history ORDER BY id DESC LIMIT 1",
                [],
                |r| r.get(0),
            )
            .unwrap_or(0.0);
        Ok(Stats {
            total_predictions,
            fallback_predictions,
            total_bets,
            total_staked,
            current_balance,
        })
    }
}

// ── SQL helpers ────────────────────────────────────────────────────────────────

fn conversion_error(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, msg.into())
}

fn pick_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Pick> {
    let code: String = row.get(idx)?;
    Pick::from_code(&code).ok_or_else(|| conversion_error(idx, format!("unknown pick '{}'", code)))
}

fn map_prediction(row: &rusqlite::Row) -> rusqlite::Result<Prediction> {
    let league_key: String = row.get(2)?;
    let league = League::from_str(&league_key).map_err(|e| conversion_error(2, e.to_string()))?;
    let confidence: f64 = row.get(7)?;
    let fired: String = row.get(10)?;
    let fired_rules: Vec<String> =
        serde_json::from_str(&fired).map_err(|e| conversion_error(10, e.to_string()))?;
    Ok(Prediction {
        id: row.get(0)?,
        event_id: row.get(1)?,
        league,
        home_team: row.get(3)?,
        away_team: row.get(4)?,
        venue: row.get(5)?,
        pick: pick_column(row, 6)?,
        confidence,
        tier: ConfidenceTier::from_confidence(confidence),
        label: row.get(8)?,
        algorithm: row.get(9)?,
        fired_rules,
        fallback: row.get(11)?,
        predicted_at: row.get(12)?,
    })
}

fn map_bet(row: &rusqlite::Row) -> rusqlite::Result<Bet> {
    Ok(Bet {
        id: row.get(0)?,
        market_id: row.get(1)?,
        question: row.get(2)?,
        event_id: row.get(3)?,
        league: row.get(4)?,
        outcome: row.get(5)?,
        pick: pick_column(row, 6)?,
        size_usd: row.get(7)?,
        price: row.get(8)?,
        model_prob: row.get(9)?,
        edge: row.get(10)?,
        order_id: row.get(11)?,
        dry_run: row.get(12)?,
        placed_at: row.get(13)?,
    })
}

/// SQLite schema (idempotent CREATE IF NOT EXISTS)
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS balance_history (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    balance     REAL    NOT NULL,
    recorded_at TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS predictions (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id     TEXT    NOT NULL,
    league       TEXT    NOT NULL,
    home_team    TEXT    NOT NULL,
    away_team    TEXT    NOT NULL,
    venue        TEXT,
    pick         TEXT    NOT NULL,
    confidence   REAL    NOT NULL,
    label        TEXT    NOT NULL,
    algorithm    TEXT    NOT NULL,
    fired_rules  TEXT    NOT NULL DEFAULT '[]',
    fallback     INTEGER NOT NULL DEFAULT 0,
    predicted_at TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS bets (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    market_id   TEXT    NOT NULL,
    question    TEXT    NOT NULL,
    event_id    TEXT    NOT NULL,
    league      TEXT    NOT NULL,
    outcome     TEXT    NOT NULL,
    pick        TEXT    NOT NULL,
    size_usd    REAL    NOT NULL,
    price       REAL    NOT NULL,
    model_prob  REAL    NOT NULL,
    edge        REAL    NOT NULL,
    order_id    TEXT,
    dry_run     INTEGER NOT NULL DEFAULT 1,
    placed_at   TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_predictions_event ON predictions(event_id);
CREATE INDEX IF NOT EXISTS idx_bets_event ON bets(event_id);
"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub total_predictions: i64,
    pub fallback_predictions: i64,
    pub total_bets: i64,
    pub total_staked: f64,
    pub current_balance: f64,
}
