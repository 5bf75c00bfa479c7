use super::{LeagueData, TeamProfile};

const REAL_MADRID: &[&str] = &["REAL MADRID"];
const BARCA: &[&str] = &["BARCELONA"];
const ATLETICO: &[&str] = &["ATLETICO MADRID", "ATLETICO DE MADRID", "ATLETI"];
const SEVILLA: &[&str] = &["SEVILLA"];
const BETIS: &[&str] = &["BETIS"];
const ATHLETIC: &[&str] = &["ATHLETIC"];
const REAL_SOCIEDAD: &[&str] = &["REAL SOCIEDAD"];

pub const DATA: LeagueData = LeagueData {
    elite: &["REAL MADRID", "BARCELONA"],
    strong: &[
        "ATLETICO",
        "ATHLETIC",
        "REAL SOCIEDAD",
        "VILLARREAL",
        "GIRONA",
        "BETIS",
    ],
    weak: &[
        "ALMERIA",
        "GRANADA",
        "CADIZ",
        "LEGANES",
        "VALLADOLID",
        "LAS PALMAS",
        "ESPANYOL",
    ],
    derbies: &[
        ("el_clasico", REAL_MADRID, BARCA),
        ("derbi_madrileno", REAL_MADRID, ATLETICO),
        ("gran_derbi_sevillano", SEVILLA, BETIS),
        ("derbi_vasco", ATHLETIC, REAL_SOCIEDAD),
    ],
    fortresses: &["BERNABEU", "CAMP NOU", "MONTJUIC", "METROPOLITANO", "SAN MAMES"],
    profiles: &[
        TeamProfile {
            name: "madrid_bernabeu_record",
            needles: REAL_MADRID,
            win_percentage: 74.2,
            goals_per_game: 2.3,
        },
        TeamProfile {
            name: "barca_possession_machine",
            needles: BARCA,
            win_percentage: 71.0,
            goals_per_game: 2.5,
        },
        TeamProfile {
            name: "atleti_cholismo",
            needles: ATLETICO,
            win_percentage: 60.5,
            goals_per_game: 1.7,
        },
    ],
    in_form: &["REAL MADRID", "BARCELONA", "GIRONA"],
    slumping: &["SEVILLA", "VALENCIA"],
};
