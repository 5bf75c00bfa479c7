use super::{LeagueData, TeamProfile};

const REAL_MADRID: &[&str] = &["REAL MADRID"];
const BAYERN: &[&str] = &["BAYERN"];
const CITY: &[&str] = &["MANCHESTER CITY", "MAN CITY"];
const BARCA: &[&str] = &["BARCELONA"];
const PSG: &[&str] = &["PARIS SAINT", "PSG"];
const LIVERPOOL: &[&str] = &["LIVERPOOL"];
const INTER: &[&str] = &["INTER"];

pub const DATA: LeagueData = LeagueData {
    elite: &["REAL MADRID", "MANCHESTER CITY", "MAN CITY", "BAYERN", "PARIS SAINT", "PSG"],
    strong: &[
        "BARCELONA",
        "ARSENAL",
        "LIVERPOOL",
        "INTER",
        "DORTMUND",
        "ATLETICO",
        "LEVERKUSEN",
    ],
    weak: &[
        "YOUNG BOYS",
        "SLOVAN",
        "STURM GRAZ",
        "SALZBURG",
        "CRVENA ZVEZDA",
        "RED STAR",
        "SPARTA PRAHA",
        "DINAMO ZAGREB",
        "BOLOGNA",
    ],
    derbies: &[
        ("madrid_vs_bayern_classic", REAL_MADRID, BAYERN),
        ("madrid_vs_city_rivalry", REAL_MADRID, CITY),
        ("barca_vs_psg_remontada", BARCA, PSG),
        ("liverpool_vs_madrid_finals", LIVERPOOL, REAL_MADRID),
    ],
    fortresses: &["BERNABEU", "ALLIANZ ARENA", "ANFIELD", "SIGNAL IDUNA"],
    profiles: &[
        TeamProfile {
            name: "madrid_european_dna",
            needles: REAL_MADRID,
            win_percentage: 68.9,
            goals_per_game: 2.3,
        },
        TeamProfile {
            name: "bayern_group_stage_record",
            needles: BAYERN,
            win_percentage: 72.6,
            goals_per_game: 2.7,
        },
        TeamProfile {
            name: "city_treble_machine",
            needles: CITY,
            win_percentage: 66.2,
            goals_per_game: 2.4,
        },
        TeamProfile {
            name: "inter_finalists",
            needles: INTER,
            win_percentage: 57.5,
            goals_per_game: 1.8,
        },
    ],
    in_form: &["REAL MADRID", "ARSENAL", "INTER"],
    slumping: &["MANCHESTER UNITED", "MAN UNITED", "CELTIC"],
};
