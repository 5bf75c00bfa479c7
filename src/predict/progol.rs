//! Progol pool: turn a 14 + 7 match coupon into a ticket of L/E/V picks,
//! spending a limited number of doubles on the shakiest main-coupon matches.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::db::models::{Fixture, Pick};
use crate::fixtures::CouponMatch;

use super::engine::FallbackChain;
use super::league::League;

/// Matches at or above this confidence never get a double.
pub const DOUBLE_THRESHOLD: f64 = 75.0;

#[derive(Debug, Clone, Serialize)]
pub struct ProgolPick {
    pub number: u8,
    pub home_team: String,
    pub away_team: String,
    pub revancha: bool,
    pub league: League,
    pub primary: Pick,
    pub double: Option<Pick>,
    pub confidence: f64,
    pub algorithm: String,
}

impl ProgolPick {
    /// Coupon marking, e.g. "L", "E/V". Codes are always written in L, E, V order.
    pub fn code(&self) -> String {
        let mut picks = vec![self.primary];
        picks.extend(self.double);
        picks.sort_by_key(|p| pick_order(*p));
        picks.iter().map(|p| p.code()).collect::<Vec<_>>().join("/")
    }

    pub fn is_double(&self) -> bool {
        self.double.is_some()
    }
}

fn pick_order(p: Pick) -> u8 {
    match p {
        Pick::HomeWin => 0,
        Pick::Draw => 1,
        Pick::AwayWin => 2,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgolTicket {
    pub picks: Vec<ProgolPick>,
    pub doubles: usize,
}

impl ProgolTicket {
    /// Number of single-result combinations the ticket covers, saturating at
    /// `u64::MAX`.
    pub fn combinations(&self) -> u64 {
        2u64.saturating_pow(u32::try_from(self.doubles).unwrap_or(u32::MAX))
    }

    pub fn main(&self) -> impl Iterator<Item = &ProgolPick> {
        self.picks.iter().filter(|p| !p.revancha)
    }

    pub fn revancha(&self) -> impl Iterator<Item = &ProgolPick> {
        self.picks.iter().filter(|p| p.revancha)
    }
}

pub struct ProgolPredictor {
    chains: HashMap<League, FallbackChain>,
}

impl Default for ProgolPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgolPredictor {
    pub fn new() -> Self {
        ProgolPredictor {
            chains: HashMap::new(),
        }
    }

    fn chain(&mut self, league: League) -> &FallbackChain {
        self.chains
            .entry(league)
            .or_insert_with(|| FallbackChain::for_league(league))
    }

    pub fn pick_match(&mut self, m: &CouponMatch) -> ProgolPick {
        let league = League::detect(&m.home_team, &m.away_team);
        let mut fixture = Fixture::manual(league, &m.home_team, &m.away_team, None);
        fixture.event_id = format!("progol_{}", m.number);
        let prediction = self.chain(league).predict(&fixture);
        debug!(
            "#{} {} → {} ({}, {:.1})",
            m.number,
            fixture.home_team,
            prediction.pick.code(),
            league.key(),
            prediction.confidence
        );
        ProgolPick {
            number: m.number,
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            revancha: m.revancha,
            league,
            primary: prediction.pick,
            double: None,
            confidence: prediction.confidence,
            algorithm: prediction.algorithm,
        }
    }

    pub fn pick_coupon(&mut self, coupon: &[CouponMatch], max_doubles: usize) -> ProgolTicket {
        let mut picks: Vec<ProgolPick> = coupon.iter().map(|m| self.pick_match(m)).collect();

        let mut shaky: Vec<usize> = picks
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.revancha && p.confidence < DOUBLE_THRESHOLD)
            .map(|(i, _)| i)
            .collect();
        shaky.sort_by(|&a, &b| {
            picks[a]
                .confidence
                .total_cmp(&picks[b].confidence)
                .then(picks[a].number.cmp(&picks[b].number))
        });
        shaky.truncate(max_doubles);

        for &i in &shaky {
            picks[i].double = Some(second_choice(picks[i].primary));
        }

        let doubles = shaky.len();
        info!(
            "Progol ticket: {} matches, {} doubles, {} combinations",
            picks.len(),
            doubles,
            2u64.saturating_pow(u32::try_from(doubles).unwrap_or(u32::MAX))
        );
        ProgolTicket { picks, doubles }
    }
}

/// Result added when a pick is doubled: wins are covered with the draw, and
/// draws with the home side.
fn second_choice(primary: Pick) -> Pick {
    match primary {
        Pick::HomeWin | Pick::AwayWin => Pick::Draw,
        Pick::Draw => Pick::HomeWin,
    }
}
