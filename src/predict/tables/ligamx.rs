use super::{LeagueData, TeamProfile};

const AMERICA: &[&str] = &["AMERICA"];
const CHIVAS: &[&str] = &["GUADALAJARA", "CHIVAS"];
const PUMAS: &[&str] = &["PUMAS", "UNAM"];
const CRUZ_AZUL: &[&str] = &["CRUZ AZUL"];
const TIGRES: &[&str] = &["TIGRES"];
const MONTERREY: &[&str] = &["MONTERREY", "RAYADOS"];
const ATLAS: &[&str] = &["ATLAS"];

pub const DATA: LeagueData = LeagueData {
    elite: &["AMERICA", "MONTERREY", "RAYADOS", "TIGRES", "CRUZ AZUL"],
    strong: &["TOLUCA", "PUMAS", "UNAM", "GUADALAJARA", "CHIVAS", "PACHUCA", "LEON"],
    weak: &["QUERETARO", "JUAREZ", "MAZATLAN", "PUEBLA", "TIJUANA", "XOLOS", "SAN LUIS"],
    derbies: &[
        ("clasico_nacional", AMERICA, CHIVAS),
        ("clasico_capitalino", AMERICA, PUMAS),
        ("clasico_joven", AMERICA, CRUZ_AZUL),
        ("clasico_regio", TIGRES, MONTERREY),
        ("clasico_tapatio", CHIVAS, ATLAS),
    ],
    // Altitude grounds (Mexico City, Toluca) and the big northern stadiums
    fortresses: &["AZTECA", "NEMESIO", "UNIVERSITARIO", "BBVA", "CIUDAD DE LOS DEPORTES"],
    profiles: &[
        TeamProfile {
            name: "america_azteca_dominance",
            needles: AMERICA,
            win_percentage: 66.0,
            goals_per_game: 2.0,
        },
        TeamProfile {
            name: "tigres_volcan",
            needles: TIGRES,
            win_percentage: 61.2,
            goals_per_game: 1.8,
        },
        TeamProfile {
            name: "rayados_gigante",
            needles: MONTERREY,
            win_percentage: 60.4,
            goals_per_game: 1.9,
        },
    ],
    in_form: &["AMERICA", "CRUZ AZUL", "TOLUCA"],
    slumping: &["GUADALAJARA", "CHIVAS", "PUEBLA"],
};
