use super::{LeagueData, TeamProfile};

const FLAMENGO: &[&str] = &["FLAMENGO"];
const FLUMINENSE: &[&str] = &["FLUMINENSE"];
const PALMEIRAS: &[&str] = &["PALMEIRAS"];
const CORINTHIANS: &[&str] = &["CORINTHIANS"];
const SAO_PAULO: &[&str] = &["SAO PAULO"];
const GREMIO: &[&str] = &["GREMIO"];
const INTERNACIONAL: &[&str] = &["INTERNACIONAL"];
const ATLETICO_MG: &[&str] = &["ATLETICO MINEIRO", "ATLETICO-MG"];
const CRUZEIRO: &[&str] = &["CRUZEIRO"];

pub const DATA: LeagueData = LeagueData {
    elite: &["PALMEIRAS", "FLAMENGO", "ATLETICO MINEIRO", "ATLETICO-MG"],
    strong: &[
        "BOTAFOGO",
        "SAO PAULO",
        "FLUMINENSE",
        "GREMIO",
        "INTERNACIONAL",
        "CORINTHIANS",
        "BRAGANTINO",
    ],
    weak: &["GOIAS", "CORITIBA", "AMERICA MINEIRO", "AMERICA-MG", "CUIABA", "JUVENTUDE", "VITORIA"],
    derbies: &[
        ("fla_flu", FLAMENGO, FLUMINENSE),
        ("derby_paulista", PALMEIRAS, CORINTHIANS),
        ("choque_rei", PALMEIRAS, SAO_PAULO),
        ("majestoso", SAO_PAULO, CORINTHIANS),
        ("gre_nal", GREMIO, INTERNACIONAL),
        ("classico_mineiro", ATLETICO_MG, CRUZEIRO),
    ],
    fortresses: &["MARACANA", "ALLIANZ PARQUE", "MINEIRAO", "ARENA MRV", "ARENA DO GREMIO"],
    profiles: &[
        TeamProfile {
            name: "palmeiras_allianz_parque",
            needles: PALMEIRAS,
            win_percentage: 64.5,
            goals_per_game: 1.8,
        },
        TeamProfile {
            name: "flamengo_maracana",
            needles: FLAMENGO,
            win_percentage: 63.1,
            goals_per_game: 2.0,
        },
        TeamProfile {
            name: "galo_arena_mrv",
            needles: ATLETICO_MG,
            win_percentage: 58.9,
            goals_per_game: 1.7,
        },
    ],
    in_form: &["BOTAFOGO", "PALMEIRAS", "FORTALEZA"],
    slumping: &["CORINTHIANS", "VASCO"],
};
