use super::{LeagueData, TeamProfile};

const CITY: &[&str] = &["MANCHESTER CITY", "MAN CITY"];
const UNITED: &[&str] = &["MANCHESTER UNITED", "MAN UNITED"];
const ARSENAL: &[&str] = &["ARSENAL"];
const LIVERPOOL: &[&str] = &["LIVERPOOL"];
const SPURS: &[&str] = &["TOTTENHAM", "SPURS"];
const EVERTON: &[&str] = &["EVERTON"];

pub const DATA: LeagueData = LeagueData {
    elite: &["MANCHESTER CITY", "MAN CITY", "ARSENAL", "LIVERPOOL"],
    strong: &[
        "CHELSEA",
        "TOTTENHAM",
        "NEWCASTLE",
        "ASTON VILLA",
        "MANCHESTER UNITED",
        "MAN UNITED",
        "BRIGHTON",
    ],
    weak: &[
        "IPSWICH",
        "SOUTHAMPTON",
        "LEICESTER",
        "LUTON",
        "SHEFFIELD",
        "BURNLEY",
        "SUNDERLAND",
    ],
    derbies: &[
        ("north_london_derby", ARSENAL, SPURS),
        ("manchester_derby", CITY, UNITED),
        ("merseyside_derby", LIVERPOOL, EVERTON),
        ("north_west_derby", LIVERPOOL, UNITED),
    ],
    fortresses: &["ANFIELD", "ETIHAD", "EMIRATES", "ST. JAMES", "ST JAMES"],
    profiles: &[
        TeamProfile {
            name: "city_dominance",
            needles: CITY,
            win_percentage: 72.5,
            goals_per_game: 2.4,
        },
        TeamProfile {
            name: "liverpool_anfield_record",
            needles: LIVERPOOL,
            win_percentage: 70.1,
            goals_per_game: 2.3,
        },
        TeamProfile {
            name: "arsenal_title_charge",
            needles: ARSENAL,
            win_percentage: 68.4,
            goals_per_game: 2.2,
        },
    ],
    in_form: &["ARSENAL", "LIVERPOOL", "ASTON VILLA"],
    slumping: &["MANCHESTER UNITED", "MAN UNITED", "TOTTENHAM"],
};
