use super::{LeagueData, TeamProfile};

const INTER: &[&str] = &["INTER"];
const MILAN: &[&str] = &["AC MILAN", "MILAN"];
const JUVE: &[&str] = &["JUVENTUS"];
const TORINO: &[&str] = &["TORINO"];
const ROMA: &[&str] = &["ROMA"];
const LAZIO: &[&str] = &["LAZIO"];
const NAPOLI: &[&str] = &["NAPOLI"];

pub const DATA: LeagueData = LeagueData {
    elite: &["INTER", "NAPOLI", "JUVENTUS"],
    strong: &["AC MILAN", "ATALANTA", "ROMA", "LAZIO", "BOLOGNA", "FIORENTINA"],
    weak: &[
        "SALERNITANA",
        "FROSINONE",
        "EMPOLI",
        "LECCE",
        "CAGLIARI",
        "VENEZIA",
        "MONZA",
    ],
    derbies: &[
        ("derby_della_madonnina", INTER, MILAN),
        ("derby_della_mole", JUVE, TORINO),
        ("derby_della_capitale", ROMA, LAZIO),
        ("derby_ditalia", INTER, JUVE),
    ],
    fortresses: &["SAN SIRO", "GIUSEPPE MEAZZA", "MARADONA", "ALLIANZ STADIUM", "OLIMPICO"],
    profiles: &[
        TeamProfile {
            name: "inter_scudetto_machine",
            needles: INTER,
            win_percentage: 73.7,
            goals_per_game: 2.3,
        },
        TeamProfile {
            name: "napoli_maradona_fortress",
            needles: NAPOLI,
            win_percentage: 65.8,
            goals_per_game: 2.0,
        },
        TeamProfile {
            name: "juve_catenaccio",
            needles: JUVE,
            win_percentage: 60.5,
            goals_per_game: 1.4,
        },
    ],
    in_form: &["INTER", "ATALANTA", "NAPOLI"],
    slumping: &["SALERNITANA", "SASSUOLO"],
};
