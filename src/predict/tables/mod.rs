//! Per-league rule data and the shared block builders that turn it into
//! [`RuleTable`]s.
//!
//! Every league has a base table (`<LEAGUE>_REAL_ALGORITHM`). Leagues with
//! hardcoded dominance profiles also get a hybrid table
//! (`<LEAGUE>_HYBRID_ENGINE`): the base blocks plus profile and form blocks,
//! ten blocks in total.

mod brasileirao;
mod bundesliga;
mod epl;
mod friendly;
mod laliga;
mod ligamx;
mod ligue1;
mod mls;
mod seriea;
mod ucl;

use crate::error::PredictError;

use super::league::League;
use super::rules::{Effect, Predicate, Rule, RuleBlock, RuleTable};

/// Hardcoded season record for a club ("historical stats" typed into source).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamProfile {
    pub name: &'static str,
    pub needles: &'static [&'static str],
    pub win_percentage: f64,
    pub goals_per_game: f64,
}

impl TeamProfile {
    /// Rule points this record is worth at home.
    pub fn points(&self) -> f64 {
        (self.win_percentage - 50.0) / 4.0 + (self.goals_per_game - 1.5) * 2.0
    }
}

/// Hand-curated team lists for one league.
pub struct LeagueData {
    pub elite: &'static [&'static str],
    pub strong: &'static [&'static str],
    pub weak: &'static [&'static str],
    /// Rivalry pairs: (name, side a, side b)
    pub derbies: &'static [(&'static str, &'static [&'static str], &'static [&'static str])],
    pub fortresses: &'static [&'static str],
    pub profiles: &'static [TeamProfile],
    pub in_form: &'static [&'static str],
    pub slumping: &'static [&'static str],
}

impl LeagueData {
    /// Every needle this league knows about.
    pub fn known_teams(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.elite
            .iter()
            .chain(self.strong.iter())
            .chain(self.weak.iter())
            .copied()
    }
}

pub fn data(league: League) -> &'static LeagueData {
    match league {
        League::Epl => &epl::DATA,
        League::LaLiga => &laliga::DATA,
        League::Bundesliga => &bundesliga::DATA,
        League::SerieA => &seriea::DATA,
        League::Ligue1 => &ligue1::DATA,
        League::LigaMx => &ligamx::DATA,
        League::Brasileirao => &brasileirao::DATA,
        League::Mls => &mls::DATA,
        League::ChampionsLeague => &ucl::DATA,
        League::FifaFriendly => &friendly::DATA,
    }
}

pub fn base_table(league: League) -> RuleTable {
    let d = data(league);
    RuleTable::new(
        format!("{}_REAL_ALGORITHM", league.algorithm_prefix()),
        vec![
            home_tier_block(d),
            away_tier_block(d),
            clash_block(d),
            derby_block(d),
            fortress_block(d),
        ],
    )
}

pub fn hybrid_table(league: League) -> Result<RuleTable, PredictError> {
    let d = data(league);
    if d.profiles.is_empty() {
        return Err(PredictError::NoHybridTable(league.key()));
    }
    let mut table = base_table(league).extend(vec![
        home_profile_block(d),
        away_profile_block(d),
        form_block(d),
        slump_block(d),
        finishing_block(d),
    ]);
    table.name = format!("{}_HYBRID_ENGINE", league.algorithm_prefix());
    Ok(table)
}

/// Names of the hybrid-only blocks; the hybrid engine needs one of these to
/// fire before it trusts its own verdict.
pub const HYBRID_SIGNAL_BLOCKS: [&str; 5] = [
    "home_profile",
    "away_profile",
    "form",
    "slump",
    "finishing",
];

// ── Block builders ─────────────────────────────────────────────────────────────

fn home_tier_block(d: &LeagueData) -> RuleBlock {
    RuleBlock::new(
        "home_tier",
        vec![
            Rule::new("home_elite", Predicate::HomeAny(d.elite), &[Effect::Home(12.0)]),
            Rule::new("home_strong", Predicate::HomeAny(d.strong), &[Effect::Home(7.0)]),
            Rule::new("home_weak", Predicate::HomeAny(d.weak), &[Effect::Away(3.0)]),
        ],
    )
}

fn away_tier_block(d: &LeagueData) -> RuleBlock {
    RuleBlock::new(
        "away_tier",
        vec![
            Rule::new("away_elite", Predicate::AwayAny(d.elite), &[Effect::Away(11.0)]),
            Rule::new("away_strong", Predicate::AwayAny(d.strong), &[Effect::Away(6.0)]),
            Rule::new("away_weak", Predicate::AwayAny(d.weak), &[Effect::Home(3.0)]),
        ],
    )
}

fn clash_block(d: &LeagueData) -> RuleBlock {
    RuleBlock::new(
        "clash",
        vec![
            Rule::new(
                "big_match",
                Predicate::BothAny(d.elite),
                &[Effect::Draw(2.0), Effect::Cap(82.0)],
            ),
            Rule::new(
                "mismatch",
                Predicate::Clash(d.elite, d.weak),
                &[Effect::Side(4.0), Effect::Confidence(3.0)],
            ),
        ],
    )
}

fn derby_block(d: &LeagueData) -> RuleBlock {
    let rules = d
        .derbies
        .iter()
        .map(|&(name, a, b)| {
            Rule::new(
                name,
                Predicate::Clash(a, b),
                &[Effect::Draw(3.0), Effect::Confidence(-4.0), Effect::Cap(78.0)],
            )
        })
        .collect();
    RuleBlock::new("derby", rules)
}

fn fortress_block(d: &LeagueData) -> RuleBlock {
    RuleBlock::new(
        "fortress",
        vec![Rule::new(
            "fortress_venue",
            Predicate::VenueAny(d.fortresses),
            &[Effect::Home(3.0)],
        )],
    )
}

fn home_profile_block(d: &LeagueData) -> RuleBlock {
    let rules = d
        .profiles
        .iter()
        .map(|p| {
            Rule::new(
                p.name,
                Predicate::HomeAny(p.needles),
                &[Effect::Home(p.points())],
            )
        })
        .collect();
    RuleBlock::new("home_profile", rules)
}

fn away_profile_block(d: &LeagueData) -> RuleBlock {
    let rules = d
        .profiles
        .iter()
        .map(|p| {
            Rule::new(
                p.name,
                Predicate::AwayAny(p.needles),
                &[Effect::Away(p.points() * 0.8)],
            )
        })
        .collect();
    RuleBlock::new("away_profile", rules)
}

fn form_block(d: &LeagueData) -> RuleBlock {
    RuleBlock::new(
        "form",
        vec![Rule::new(
            "in_form",
            Predicate::EitherAny(d.in_form),
            &[Effect::Side(3.0), Effect::Confidence(2.0)],
        )],
    )
}

fn slump_block(d: &LeagueData) -> RuleBlock {
    RuleBlock::new(
        "slump",
        vec![Rule::new(
            "slumping",
            Predicate::EitherAny(d.slumping),
            &[Effect::Opponent(3.0), Effect::Confidence(-2.0)],
        )],
    )
}

fn finishing_block(d: &LeagueData) -> RuleBlock {
    RuleBlock::new(
        "finishing",
        vec![Rule::new(
            "elite_home_vs_weak",
            Predicate::All(vec![
                Predicate::HomeAny(d.elite),
                Predicate::AwayAny(d.weak),
                Predicate::Not(Box::new(Predicate::AwayAny(d.in_form))),
            ]),
            &[Effect::Home(2.0), Effect::Confidence(2.0)],
        )],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bayern_dominance_record() {
        let bayern = data(League::Bundesliga)
            .profiles
            .iter()
            .find(|p| p.name == "bayern_dominance")
            .unwrap();
        assert_eq!(bayern.win_percentage, 82.4);
        assert!(bayern.points() > 10.0);
    }

    #[test]
    fn base_tables_are_named_and_non_empty() {
        for league in League::ALL {
            let t = base_table(league);
            assert!(t.name.ends_with("_REAL_ALGORITHM"), "{}", t.name);
            assert_eq!(t.blocks.len(), 5);
            assert!(t.rule_count() > 0);
        }
    }

    #[test]
    fn hybrid_tables_have_ten_blocks() {
        for league in League::ALL {
            match hybrid_table(league) {
                Ok(t) => {
                    assert!(t.name.ends_with("_HYBRID_ENGINE"));
                    assert_eq!(t.blocks.len(), 10);
                    assert!(t.rule_count() > base_table(league).rule_count());
                }
                Err(e) => assert!(matches!(league, League::Mls | League::FifaFriendly), "{}", e),
            }
        }
    }

    #[test]
    fn fortress_venue_boosts_the_home_side() {
        use crate::db::models::Fixture;

        let table = base_table(League::Epl);
        let at_anfield = Fixture::manual(League::Epl, "Liverpool", "Everton", Some("Anfield"));
        let neutral = Fixture::manual(League::Epl, "Liverpool", "Everton", None);

        let with_venue = table.evaluate(&at_anfield, 4.0);
        let without = table.evaluate(&neutral, 4.0);
        assert!(with_venue.fired.iter().any(|r| r == "fortress_venue"));
        assert!(with_venue.fired_blocks.contains(&"fortress"));
        assert!(!without.fired.iter().any(|r| r == "fortress_venue"));
        assert!((with_venue.home - without.home - 3.0).abs() < 1e-9);
    }

    #[test]
    fn mls_has_no_hybrid() {
        assert_eq!(
            hybrid_table(League::Mls).unwrap_err(),
            PredictError::NoHybridTable("mls")
        );
    }

    #[test]
    fn needles_are_normalised_uppercase_ascii() {
        for league in League::ALL {
            let d = data(league);
            let all = d
                .known_teams()
                .chain(d.in_form.iter().copied())
                .chain(d.slumping.iter().copied())
                .chain(d.fortresses.iter().copied())
                .chain(d.profiles.iter().flat_map(|p| p.needles.iter().copied()));
            for n in all {
                assert!(n.is_ascii(), "{} in {}", n, league.key());
                assert_eq!(n, n.to_uppercase(), "{} in {}", n, league.key());
            }
        }
    }

    #[test]
    fn hybrid_signal_blocks_exist_in_hybrid_tables() {
        let t = hybrid_table(League::Epl).unwrap();
        for name in HYBRID_SIGNAL_BLOCKS {
            assert!(t.blocks.iter().any(|b| b.name == name), "{}", name);
        }
    }
}
