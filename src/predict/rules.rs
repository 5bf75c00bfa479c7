//! Ordered rule tables over team names.
//!
//! A [`RuleTable`] is a list of [`RuleBlock`]s applied in priority order.
//! Inside a block only the first matching [`Rule`] fires, so a block reads
//! like an `if / else if` ladder while the table as a whole stacks every
//! block's contribution onto one [`Scorecard`].

use serde::Serialize;

use crate::db::models::{Fixture, Pick};

use super::league::LeagueTuning;

/// Uppercase, fold Latin accents to ASCII and collapse whitespace so that
/// "Atlético  Madrid" and "ATLETICO MADRID" compare equal.
pub fn normalize_team(name: &str) -> String {
    name.chars()
        .flat_map(char::to_uppercase)
        .map(fold_accent)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn fold_accent(c: char) -> char {
    match c {
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ç' => 'C',
        'Ñ' => 'N',
        'ẞ' => 'S',
        other => other,
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Which side of the fixture a predicate matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// Normalised view of a fixture that predicates run against.
#[derive(Debug, Clone)]
pub struct MatchView {
    pub home: String,
    pub away: String,
    pub venue: String,
}

impl MatchView {
    pub fn new(fixture: &Fixture) -> Self {
        MatchView {
            home: normalize_team(&fixture.home_team),
            away: normalize_team(&fixture.away_team),
            venue: fixture
                .venue
                .as_deref()
                .map(normalize_team)
                .unwrap_or_default(),
        }
    }
}

/// Condition on team names. Needles are ASCII uppercase substrings.
#[derive(Debug, Clone)]
pub enum Predicate {
    Always,
    HomeAny(&'static [&'static str]),
    AwayAny(&'static [&'static str]),
    /// Either team matches; the first side that matches (home first) is
    /// credited by [`Effect::Side`].
    EitherAny(&'static [&'static str]),
    BothAny(&'static [&'static str]),
    /// One team in the first list and the other in the second, either way round.
    Clash(&'static [&'static str], &'static [&'static str]),
    VenueAny(&'static [&'static str]),
    All(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    /// Evaluate against a fixture. `Some(side)` means matched; the side is
    /// the team the predicate is "about" (home when it is about both).
    pub fn check(&self, m: &MatchView) -> Option<Side> {
        match self {
            Predicate::Always => Some(Side::Home),
            Predicate::HomeAny(n) => contains_any(&m.home, n).then_some(Side::Home),
            Predicate::AwayAny(n) => contains_any(&m.away, n).then_some(Side::Away),
            Predicate::EitherAny(n) => {
                if contains_any(&m.home, n) {
                    Some(Side::Home)
                } else if contains_any(&m.away, n) {
                    Some(Side::Away)
                } else {
                    None
                }
            }
            Predicate::BothAny(n) => {
                (contains_any(&m.home, n) && contains_any(&m.away, n)).then_some(Side::Home)
            }
            Predicate::Clash(a, b) => {
                if contains_any(&m.home, a) && contains_any(&m.away, b) {
                    Some(Side::Home)
                } else if contains_any(&m.home, b) && contains_any(&m.away, a) {
                    Some(Side::Away)
                } else {
                    None
                }
            }
            Predicate::VenueAny(n) => contains_any(&m.venue, n).then_some(Side::Home),
            Predicate::All(preds) => {
                let mut side = Side::Home;
                for (i, p) in preds.iter().enumerate() {
                    let s = p.check(m)?;
                    if i == 0 {
                        side = s;
                    }
                }
                Some(side)
            }
            Predicate::Not(p) => match p.check(m) {
                Some(_) => None,
                None => Some(Side::Home),
            },
        }
    }
}

/// What a fired rule does to the scorecard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Home(f64),
    Away(f64),
    Draw(f64),
    /// Points for whichever side the predicate matched on.
    Side(f64),
    /// Points against whichever side the predicate matched on.
    Opponent(f64),
    /// Flat confidence adjustment, independent of the pick.
    Confidence(f64),
    /// Upper bound on the final confidence.
    Cap(f64),
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub name: &'static str,
    pub predicate: Predicate,
    pub effects: Vec<Effect>,
}

impl Rule {
    pub fn new(name: &'static str, predicate: Predicate, effects: &[Effect]) -> Self {
        Rule {
            name,
            predicate,
            effects: effects.to_vec(),
        }
    }
}

/// First-match-wins group of rules.
#[derive(Debug, Clone)]
pub struct RuleBlock {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

impl RuleBlock {
    pub fn new(name: &'static str, rules: Vec<Rule>) -> Self {
        RuleBlock { name, rules }
    }
}

/// Accumulated points for one fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    pub home: f64,
    pub away: f64,
    pub draw: f64,
    pub adjust: f64,
    pub cap: f64,
    /// Rule names that fired, in evaluation order
    pub fired: Vec<String>,
    /// Blocks that had a rule fire
    pub fired_blocks: Vec<&'static str>,
}

impl Scorecard {
    pub fn new(home_advantage: f64) -> Self {
        Scorecard {
            home: home_advantage,
            away: 0.0,
            draw: 0.0,
            adjust: 0.0,
            cap: f64::INFINITY,
            fired: Vec::new(),
            fired_blocks: Vec::new(),
        }
    }

    fn apply(&mut self, effect: Effect, side: Side) {
        match effect {
            Effect::Home(p) => self.home += p,
            Effect::Away(p) => self.away += p,
            Effect::Draw(p) => self.draw += p,
            Effect::Side(p) => match side {
                Side::Home => self.home += p,
                Side::Away => self.away += p,
            },
            Effect::Opponent(p) => match side {
                Side::Home => self.away += p,
                Side::Away => self.home += p,
            },
            Effect::Confidence(p) => self.adjust += p,
            Effect::Cap(c) => self.cap = self.cap.min(c),
        }
    }

    /// Turn the points into a pick and a clamped confidence.
    pub fn verdict(&self, tuning: &LeagueTuning) -> (Pick, f64) {
        let margin = self.home - self.away;
        let (pick, strength) = if self.draw + tuning.draw_margin > margin.abs() {
            (Pick::Draw, self.draw + (tuning.draw_margin - margin.abs()))
        } else if margin > 0.0 {
            (Pick::HomeWin, margin)
        } else {
            (Pick::AwayWin, -margin)
        };

        let raw = tuning.base_confidence + strength * tuning.margin_weight + self.adjust;
        let upper = tuning.max_confidence.min(self.cap);
        let confidence = if upper < tuning.min_confidence {
            upper
        } else {
            raw.clamp(tuning.min_confidence, upper)
        };
        (pick, confidence)
    }
}

/// Blocks applied in priority order.
#[derive(Debug, Clone)]
pub struct RuleTable {
    pub name: String,
    pub blocks: Vec<RuleBlock>,
}

impl RuleTable {
    pub fn new(name: impl Into<String>, blocks: Vec<RuleBlock>) -> Self {
        RuleTable {
            name: name.into(),
            blocks,
        }
    }

    /// Append blocks, keeping priority order (existing blocks first).
    pub fn extend(mut self, blocks: Vec<RuleBlock>) -> Self {
        self.blocks.extend(blocks);
        self
    }

    pub fn rule_count(&self) -> usize {
        self.blocks.iter().map(|b| b.rules.len()).sum()
    }

    pub fn evaluate(&self, fixture: &Fixture, home_advantage: f64) -> Scorecard {
        let view = MatchView::new(fixture);
        let mut card = Scorecard::new(home_advantage);
        for block in &self.blocks {
            for rule in &block.rules {
                if let Some(side) = rule.predicate.check(&view) {
                    for effect in &rule.effects {
                        card.apply(*effect, side);
                    }
                    card.fired.push(rule.name.to_string());
                    card.fired_blocks.push(block.name);
                    break;
                }
            }
        }
        card
    }
}
