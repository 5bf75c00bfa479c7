use chrono::Utc;
use tracing::{debug, warn};

use crate::db::models::{ConfidenceTier, Fixture, Pick, Prediction};
use crate::error::PredictError;

use super::league::{League, FALLBACK_CONFIDENCE};
use super::rules::{normalize_team, RuleTable};
use super::tables::{base_table, hybrid_table, HYBRID_SIGNAL_BLOCKS};

/// One stage of a league's prediction chain.
pub trait Predictor: Send + Sync {
    /// Algorithm name reported on predictions, e.g. "EPL_HYBRID_ENGINE".
    fn name(&self) -> &str;

    fn predict(&self, fixture: &Fixture) -> Result<Prediction, PredictError>;
}

/// Rule-table predictor for one league.
pub struct RuleEngine {
    league: League,
    table: RuleTable,
    /// Fail with `NoSignal` unless a hybrid-only block fired.
    require_signal: bool,
}

impl RuleEngine {
    /// The league's base table (`<LEAGUE>_REAL_ALGORITHM`).
    pub fn real(league: League) -> Self {
        let table = base_table(league);
        debug!("{}: {} rules", table.name, table.rule_count());
        RuleEngine {
            league,
            table,
            require_signal: false,
        }
    }

    /// The league's hybrid table (`<LEAGUE>_HYBRID_ENGINE`), when it has one.
    pub fn hybrid(league: League) -> Result<Self, PredictError> {
        let table = hybrid_table(league)?;
        debug!("{}: {} rules", table.name, table.rule_count());
        Ok(RuleEngine {
            league,
            table,
            require_signal: true,
        })
    }

    fn validate(fixture: &Fixture) -> Result<(), PredictError> {
        let home = normalize_team(&fixture.home_team);
        let away = normalize_team(&fixture.away_team);
        if home.is_empty() {
            return Err(PredictError::MissingTeam("home"));
        }
        if away.is_empty() {
            return Err(PredictError::MissingTeam("away"));
        }
        if home == away {
            return Err(PredictError::SameTeam(fixture.home_team.clone()));
        }
        Ok(())
    }
}

impl Predictor for RuleEngine {
    fn name(&self) -> &str {
        &self.table.name
    }

    fn predict(&self, fixture: &Fixture) -> Result<Prediction, PredictError> {
        Self::validate(fixture)?;

        let tuning = self.league.tuning();
        let card = self.table.evaluate(fixture, tuning.home_advantage);
        if self.require_signal
            && !card
                .fired_blocks
                .iter()
                .any(|b| HYBRID_SIGNAL_BLOCKS.contains(b))
        {
            return Err(PredictError::NoSignal(self.table.name.clone()));
        }

        let (pick, confidence) = card.verdict(&tuning);
        debug!(
            "{}: {} vs {} home={:.1} away={:.1} draw={:.1} → {:?} {:.1}",
            self.table.name,
            fixture.home_team,
            fixture.away_team,
            card.home,
            card.away,
            card.draw,
            pick,
            confidence
        );

        Ok(Prediction {
            id: None,
            event_id: fixture.event_id.clone(),
            league: self.league,
            home_team: fixture.home_team.clone(),
            away_team: fixture.away_team.clone(),
            venue: fixture.venue.clone(),
            pick,
            confidence,
            tier: ConfidenceTier::from_confidence(confidence),
            label: pick_label(self.league, fixture, pick),
            algorithm: self.table.name.clone(),
            fired_rules: card.fired,
            fallback: false,
            predicted_at: Utc::now(),
        })
    }
}

fn pick_label(league: League, fixture: &Fixture, pick: Pick) -> String {
    match pick {
        Pick::HomeWin => format!("{} {} gana", league.flag(), fixture.home_team),
        Pick::AwayWin => format!("{} {} gana", league.flag(), fixture.away_team),
        Pick::Draw => format!("{} Empate", league.flag()),
    }
}

impl Prediction {
    /// Canned prediction returned when every stage of a chain failed.
    pub fn fallback(league: League, fixture: &Fixture) -> Self {
        Prediction {
            id: None,
            event_id: fixture.event_id.clone(),
            league,
            home_team: fixture.home_team.clone(),
            away_team: fixture.away_team.clone(),
            venue: fixture.venue.clone(),
            pick: Pick::Draw,
            confidence: FALLBACK_CONFIDENCE,
            tier: ConfidenceTier::from_confidence(FALLBACK_CONFIDENCE),
            label: league.fallback_label(),
            algorithm: format!("{}_ERROR_FALLBACK", league.algorithm_prefix()),
            fired_rules: Vec::new(),
            fallback: true,
            predicted_at: Utc::now(),
        }
    }
}

/// Hybrid engine first, base table second, canned fallback last.
pub struct FallbackChain {
    league: League,
    stages: Vec<Box<dyn Predictor>>,
}

impl FallbackChain {
    pub fn new(league: League, stages: Vec<Box<dyn Predictor>>) -> Self {
        FallbackChain { league, stages }
    }

    pub fn for_league(league: League) -> Self {
        let mut stages: Vec<Box<dyn Predictor>> = Vec::new();
        match RuleEngine::hybrid(league) {
            Ok(hybrid) => stages.push(Box::new(hybrid)),
            Err(e) => debug!("{}: {}", league.key(), e),
        }
        stages.push(Box::new(RuleEngine::real(league)));
        let chain = FallbackChain::new(league, stages);
        debug!("{} chain: {:?}", league.key(), chain.stage_names());
        chain
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Never fails: stage errors are logged and the next stage is tried.
    pub fn predict(&self, fixture: &Fixture) -> Prediction {
        for stage in &self.stages {
            match stage.predict(fixture) {
                Ok(p) => return p,
                Err(PredictError::NoSignal(name)) => {
                    debug!("{} had no signal for {} vs {}", name, fixture.home_team, fixture.away_team)
                }
                Err(e) => warn!(
                    "{} failed on {} vs {}: {}",
                    stage.name(),
                    fixture.home_team,
                    fixture.away_team,
                    e
                ),
            }
        }
        warn!(
            "All {} stages failed for '{} vs {}', returning fallback",
            self.league.key(),
            fixture.home_team,
            fixture.away_team
        );
        Prediction::fallback(self.league, fixture)
    }
}

/// Public per-league entry point: run the league's chain on one fixture.
pub fn apply_real_algorithm(league: League, fixture: &Fixture) -> Prediction {
    FallbackChain::for_league(league).predict(fixture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::league::MAX_CONFIDENCE;

    fn fixture(league: League, home: &str, away: &str) -> Fixture {
        Fixture::manual(league, home, away, None)
    }

    struct AlwaysFails;

    impl Predictor for AlwaysFails {
        fn name(&self) -> &str {
            "ALWAYS_FAILS"
        }

        fn predict(&self, _fixture: &Fixture) -> Result<Prediction, PredictError> {
            Err(PredictError::MissingTeam("home"))
        }
    }

    #[test]
    fn bayern_at_home_is_a_confident_home_win() {
        let p = apply_real_algorithm(
            League::Bundesliga,
            &fixture(League::Bundesliga, "Bayern Munich", "Heidenheim"),
        );
        assert_eq!(p.pick, Pick::HomeWin);
        assert_eq!(p.algorithm, "BUNDESLIGA_HYBRID_ENGINE");
        assert!(p.confidence >= 90.0, "{}", p.confidence);
        assert!(p.confidence <= MAX_CONFIDENCE);
        assert_eq!(p.tier, ConfidenceTier::Legendary);
        assert_eq!(p.label, "🇩🇪 Bayern Munich gana");
        assert!(p.fired_rules.iter().any(|r| r == "bayern_dominance"));
    }

    #[test]
    fn classic_derby_is_capped() {
        let p = apply_real_algorithm(
            League::LaLiga,
            &fixture(League::LaLiga, "Real Madrid", "Barcelona"),
        );
        assert!(p.confidence <= 78.0, "{}", p.confidence);
        assert!(p.fired_rules.iter().any(|r| r == "el_clasico"));
    }

    #[test]
    fn unknown_teams_fall_back_to_the_real_algorithm() {
        let p = apply_real_algorithm(
            League::Epl,
            &fixture(League::Epl, "Fulham", "Crystal Palace"),
        );
        assert_eq!(p.algorithm, "EPL_REAL_ALGORITHM");
        assert!(!p.fallback);
    }

    #[test]
    fn mls_goes_straight_to_the_real_algorithm() {
        let chain = FallbackChain::for_league(League::Mls);
        assert_eq!(chain.stage_names(), vec!["MLS_REAL_ALGORITHM"]);
        let p = chain.predict(&fixture(League::Mls, "Inter Miami", "Toronto FC"));
        assert_eq!(p.pick, Pick::HomeWin);
    }

    #[test]
    fn empty_team_returns_canned_fallback() {
        let p = apply_real_algorithm(
            League::Brasileirao,
            &fixture(League::Brasileirao, "", "Flamengo"),
        );
        assert!(p.fallback);
        assert_eq!(p.confidence, 70.0);
        assert_eq!(p.label, "🇧🇷 Futebol Brasileiro");
        assert_eq!(p.algorithm, "BRASILEIRAO_ERROR_FALLBACK");
    }

    #[test]
    fn same_team_is_rejected() {
        let engine = RuleEngine::real(League::Epl);
        let err = engine
            .predict(&fixture(League::Epl, "Arsenal", "ARSENAL"))
            .unwrap_err();
        assert!(matches!(err, PredictError::SameTeam(_)));
    }

    #[test]
    fn hybrid_without_signal_errors() {
        let engine = RuleEngine::hybrid(League::SerieA).unwrap();
        let err = engine
            .predict(&fixture(League::SerieA, "Genoa", "Udinese"))
            .unwrap_err();
        assert_eq!(err, PredictError::NoSignal("SERIE_A_HYBRID_ENGINE".into()));
    }

    #[test]
    fn chain_of_failing_stages_uses_fallback() {
        let chain = FallbackChain::new(League::Ligue1, vec![Box::new(AlwaysFails)]);
        let p = chain.predict(&fixture(League::Ligue1, "PSG", "Metz"));
        assert!(p.fallback);
        assert_eq!(p.algorithm, "LIGUE_1_ERROR_FALLBACK");
    }

    #[test]
    fn away_giant_wins_at_a_minnow() {
        let p = apply_real_algorithm(
            League::SerieA,
            &fixture(League::SerieA, "Salernitana", "Inter"),
        );
        assert_eq!(p.pick, Pick::AwayWin);
        assert_eq!(p.label, "🇮🇹 Inter gana");
    }

    #[test]
    fn accents_do_not_break_matching() {
        let p = apply_real_algorithm(
            League::Brasileirao,
            &fixture(League::Brasileirao, "Grêmio", "Internacional"),
        );
        assert!(p.fired_rules.iter().any(|r| r == "gre_nal"));
    }

    #[test]
    fn confidence_always_within_bounds() {
        let teams = ["Bayern", "Real Madrid", "Heidenheim", "Palmeiras", "X", "América"];
        for league in League::ALL {
            let t = league.tuning();
            for home in teams {
                for away in teams {
                    if home == away {
                        continue;
                    }
                    let p = apply_real_algorithm(league, &fixture(league, home, away));
                    assert!(p.confidence <= t.max_confidence, "{:?}", p);
                    assert!(p.confidence >= t.min_confidence, "{:?}", p);
                }
            }
        }
    }
}
