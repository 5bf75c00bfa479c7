use super::{LeagueData, TeamProfile};

const BAYERN: &[&str] = &["BAYERN"];
const DORTMUND: &[&str] = &["DORTMUND"];
const SCHALKE: &[&str] = &["SCHALKE"];
const LEVERKUSEN: &[&str] = &["LEVERKUSEN"];
const KOLN: &[&str] = &["KOLN", "COLOGNE"];
const HAMBURG: &[&str] = &["HAMBURG"];
const ST_PAULI: &[&str] = &["ST. PAULI", "ST PAULI"];

pub const DATA: LeagueData = LeagueData {
    elite: &["BAYERN", "LEVERKUSEN"],
    strong: &["DORTMUND", "LEIPZIG", "STUTTGART", "FRANKFURT"],
    weak: &[
        "DARMSTADT",
        "BOCHUM",
        "HEIDENHEIM",
        "HOLSTEIN",
        "KIEL",
        "ST. PAULI",
        "ST PAULI",
    ],
    derbies: &[
        ("der_klassiker", BAYERN, DORTMUND),
        ("revierderby", DORTMUND, SCHALKE),
        ("rheinderby", LEVERKUSEN, KOLN),
        ("hamburg_stadtderby", HAMBURG, ST_PAULI),
    ],
    fortresses: &["ALLIANZ", "SIGNAL IDUNA", "WESTFALENSTADION", "BAYARENA"],
    profiles: &[
        TeamProfile {
            name: "bayern_dominance",
            needles: BAYERN,
            win_percentage: 82.4,
            goals_per_game: 2.9,
        },
        TeamProfile {
            name: "leverkusen_invincibles",
            needles: LEVERKUSEN,
            win_percentage: 76.5,
            goals_per_game: 2.5,
        },
        TeamProfile {
            name: "dortmund_yellow_wall",
            needles: DORTMUND,
            win_percentage: 61.8,
            goals_per_game: 2.1,
        },
    ],
    in_form: &["LEVERKUSEN", "STUTTGART", "BAYERN"],
    slumping: &["WOLFSBURG", "MONCHENGLADBACH", "GLADBACH"],
};
