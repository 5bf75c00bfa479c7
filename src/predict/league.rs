use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PredictError;

use super::rules::normalize_team;
use super::tables::data;

/// Confidence never exceeds this, whatever the rules add.
pub const MAX_CONFIDENCE: f64 = 95.0;
/// Confidence of the canned prediction returned when every stage fails.
pub const FALLBACK_CONFIDENCE: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    Epl,
    LaLiga,
    Bundesliga,
    SerieA,
    Ligue1,
    LigaMx,
    Brasileirao,
    Mls,
    #[serde(rename = "ucl")]
    ChampionsLeague,
    #[serde(rename = "friendly")]
    FifaFriendly,
}

/// Per-league constants that turn a scorecard into a confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeagueTuning {
    /// Points the home side starts with
    pub home_advantage: f64,
    /// Margins (plus draw points) below this are called a draw
    pub draw_margin: f64,
    pub base_confidence: f64,
    /// Confidence per point of winning margin
    pub margin_weight: f64,
    pub min_confidence: f64,
    pub max_confidence: f64,
}

impl League {
    pub const ALL: [League; 10] = [
        League::Epl,
        League::LaLiga,
        League::Bundesliga,
        League::SerieA,
        League::Ligue1,
        League::LigaMx,
        League::Brasileirao,
        League::Mls,
        League::ChampionsLeague,
        League::FifaFriendly,
    ];

    pub fn key(self) -> &'static str {
        match self {
            League::Epl => "epl",
            League::LaLiga => "laliga",
            League::Bundesliga => "bundesliga",
            League::SerieA => "seriea",
            League::Ligue1 => "ligue1",
            League::LigaMx => "ligamx",
            League::Brasileirao => "brasileirao",
            League::Mls => "mls",
            League::ChampionsLeague => "ucl",
            League::FifaFriendly => "friendly",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            League::Epl => "Premier League",
            League::LaLiga => "La Liga",
            League::Bundesliga => "Bundesliga",
            League::SerieA => "Serie A",
            League::Ligue1 => "Ligue 1",
            League::LigaMx => "Liga MX",
            League::Brasileirao => "Brasileirão",
            League::Mls => "MLS",
            League::ChampionsLeague => "UEFA Champions League",
            League::FifaFriendly => "International Friendly",
        }
    }

    /// ESPN soccer league ids, tried in order until one returns events.
    pub fn espn_ids(self) -> &'static [&'static str] {
        match self {
            League::Epl => &["eng.1"],
            League::LaLiga => &["esp.1"],
            League::Bundesliga => &["ger.1"],
            League::SerieA => &["ita.1"],
            League::Ligue1 => &["fra.1"],
            League::LigaMx => &["mex.1"],
            League::Brasileirao => &["bra.1", "bra.serie_a"],
            League::Mls => &["usa.1", "mls"],
            League::ChampionsLeague => &["uefa.champions", "uefa.champions_league"],
            League::FifaFriendly => &["fifa.friendly", "fifa.friendlies", "friendly"],
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            League::Epl => "🏴",
            League::LaLiga => "🇪🇸",
            League::Bundesliga => "🇩🇪",
            League::SerieA => "🇮🇹",
            League::Ligue1 => "🇫🇷",
            League::LigaMx => "🇲🇽",
            League::Brasileirao => "🇧🇷",
            League::Mls => "🇺🇸",
            League::ChampionsLeague => "🏆",
            League::FifaFriendly => "🌍",
        }
    }

    /// Label of the canned prediction returned after every stage failed.
    pub fn fallback_label(self) -> String {
        let name = match self {
            League::Epl => "Premier League",
            League::LaLiga => "Fútbol Español",
            League::Bundesliga => "Deutscher Fußball",
            League::SerieA => "Calcio Italiano",
            League::Ligue1 => "Football Français",
            League::LigaMx => "Fútbol Mexicano",
            League::Brasileirao => "Futebol Brasileiro",
            League::Mls => "Major League Soccer",
            League::ChampionsLeague => "Champions League",
            League::FifaFriendly => "International Friendly",
        };
        format!("{} {}", self.flag(), name)
    }

    /// Prefix for algorithm names, e.g. "BUNDESLIGA".
    pub fn algorithm_prefix(self) -> &'static str {
        match self {
            League::Epl => "EPL",
            League::LaLiga => "LA_LIGA",
            League::Bundesliga => "BUNDESLIGA",
            League::SerieA => "SERIE_A",
            League::Ligue1 => "LIGUE_1",
            League::LigaMx => "LIGA_MX",
            League::Brasileirao => "BRASILEIRAO",
            League::Mls => "MLS",
            League::ChampionsLeague => "UCL",
            League::FifaFriendly => "FIFA_FRIENDLY",
        }
    }

    /// Guess the league of a match from team names alone. The league that
    /// knows both teams wins, then the one with the most specific names
    /// ("AMERICA MINEIRO" over "AMERICA"). Needles match whole words only.
    /// Ties go to Liga MX first, which is also the default since Progol
    /// coupons are mostly Mexican.
    pub fn detect(home: &str, away: &str) -> League {
        let home = normalize_team(home);
        let away = normalize_team(away);
        let teams = [name_words(&home), name_words(&away)];
        let order = std::iter::once(League::LigaMx)
            .chain(League::ALL.into_iter().filter(|l| *l != League::LigaMx));

        let mut best = (League::LigaMx, (0, 0));
        for league in order {
            let d = data(league);
            let score = teams
                .iter()
                .filter_map(|words| {
                    d.known_teams()
                        .filter(|n| names_team(words, n))
                        .map(str::len)
                        .max()
                })
                .fold((0, 0), |(hits, len), l| (hits + 1, len + l));
            if score > best.1 {
                best = (league, score);
            }
        }
        best.0
    }

    pub fn tuning(self) -> LeagueTuning {
        let (home_advantage, draw_margin, base_confidence, margin_weight) = match self {
            League::Epl => (4.0, 3.0, 58.0, 1.4),
            League::LaLiga => (5.0, 3.5, 58.0, 1.4),
            League::Bundesliga => (4.0, 2.5, 60.0, 1.5),
            League::SerieA => (4.5, 4.0, 57.0, 1.3),
            League::Ligue1 => (4.0, 3.0, 58.0, 1.4),
            // Altitude and travel make home sides stronger in Mexico and Brazil.
            League::LigaMx => (7.0, 4.0, 56.0, 1.2),
            League::Brasileirao => (7.5, 4.0, 56.0, 1.2),
            League::Mls => (6.0, 3.5, 55.0, 1.2),
            League::ChampionsLeague => (3.0, 3.0, 60.0, 1.5),
            League::FifaFriendly => (2.0, 4.0, 55.0, 1.2),
        };
        LeagueTuning {
            home_advantage,
            draw_margin,
            base_confidence,
            margin_weight,
            min_confidence: 50.0,
            max_confidence: MAX_CONFIDENCE,
        }
    }
}

fn name_words(name: &str) -> Vec<&str> {
    name.split(|c: char| c.is_whitespace() || c == '-')
        .filter(|w| !w.is_empty())
        .collect()
}

/// Whether the words of `needle` appear as consecutive whole words of `team`.
fn names_team(team: &[&str], needle: &str) -> bool {
    let needle = name_words(needle);
    !needle.is_empty() && team.windows(needle.len()).any(|w| w == needle.as_slice())
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for League {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let k = s.trim().to_lowercase().replace(['_', '-', ' '], "");
        let league = match k.as_str() {
            "epl" | "premierleague" | "eng.1" => League::Epl,
            "laliga" | "esp.1" => League::LaLiga,
            "bundesliga" | "ger.1" => League::Bundesliga,
            "seriea" | "ita.1" => League::SerieA,
            "ligue1" | "fra.1" => League::Ligue1,
            "ligamx" | "mex.1" => League::LigaMx,
            "brasileirao" | "brasileirão" | "brazil" | "bra.1" => League::Brasileirao,
            "mls" | "usa.1" => League::Mls,
            "ucl" | "championsleague" | "uefachampionsleague" | "uefa.champions" => {
                League::ChampionsLeague
            }
            "friendly" | "friendlies" | "fifafriendly" | "fifa.friendly" => League::FifaFriendly,
            _ => return Err(PredictError::UnknownLeague(s.to_string())),
        };
        Ok(league)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_roundtrip_through_from_str() {
        for league in League::ALL {
            assert_eq!(league.key().parse::<League>().unwrap(), league);
        }
    }

    #[test]
    fn aliases_parse() {
        assert_eq!("Premier League".parse::<League>().unwrap(), League::Epl);
        assert_eq!("LA-LIGA".parse::<League>().unwrap(), League::LaLiga);
        assert_eq!("Champions League".parse::<League>().unwrap(), League::ChampionsLeague);
        assert_eq!("liga_mx".parse::<League>().unwrap(), League::LigaMx);
    }

    #[test]
    fn unknown_league_is_an_error() {
        assert_eq!(
            "eredivisie".parse::<League>(),
            Err(PredictError::UnknownLeague("eredivisie".into()))
        );
    }

    #[test]
    fn brazil_fallback_label() {
        assert_eq!(League::Brasileirao.fallback_label(), "🇧🇷 Futebol Brasileiro");
    }

    #[test]
    fn every_league_has_espn_candidates_and_capped_tuning() {
        for league in League::ALL {
            assert!(!league.espn_ids().is_empty());
            let t = league.tuning();
            assert_eq!(t.max_confidence, MAX_CONFIDENCE);
            assert!(t.min_confidence < t.base_confidence);
        }
    }

    #[test]
    fn detect_prefers_liga_mx_and_defaults_to_it() {
        assert_eq!(League::detect("Cruz Azul", "Pumas"), League::LigaMx);
        assert_eq!(League::detect("Arsenal", "Chelsea"), League::Epl);
        assert_eq!(League::detect("Flamengo", "Palmeiras"), League::Brasileirao);
        assert_eq!(League::detect("Zorros Azules", "Halcones Grises"), League::LigaMx);
    }

    #[test]
    fn detect_matches_whole_words_and_prefers_the_league_knowing_both_teams() {
        // "INTER" is a Serie A needle but not a prefix match for Internacional
        assert_eq!(League::detect("Internacional", "Grêmio"), League::Brasileirao);
        assert_eq!(League::detect("Inter Miami", "LA Galaxy"), League::Mls);
        assert_eq!(League::detect("América Mineiro", "Cruzeiro"), League::Brasileirao);
        assert_eq!(League::detect("Inter", "Lecce"), League::SerieA);
        assert_eq!(League::detect("Club América", "Chivas"), League::LigaMx);
        // More specific name wins when only one side is known
        assert_eq!(League::detect("América Mineiro", "Zorros Azules"), League::Brasileirao);
        assert_eq!(League::detect("Atlético-MG", "Zorros Azules"), League::Brasileirao);
    }

    #[test]
    fn serde_uses_keys() {
        assert_eq!(serde_json::to_string(&League::ChampionsLeague).unwrap(), "\"ucl\"");
        assert_eq!(serde_json::to_string(&League::LaLiga).unwrap(), "\"laliga\"");
    }
}
