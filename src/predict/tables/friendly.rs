use super::LeagueData;

const ARGENTINA: &[&str] = &["ARGENTINA"];
const BRAZIL: &[&str] = &["BRAZIL", "BRASIL"];
const MEXICO: &[&str] = &["MEXICO"];
const USA: &[&str] = &["UNITED STATES", "USA"];
const ENGLAND: &[&str] = &["ENGLAND"];
const GERMANY: &[&str] = &["GERMANY"];

pub const DATA: LeagueData = LeagueData {
    elite: &["ARGENTINA", "FRANCE", "SPAIN", "ENGLAND", "BRAZIL", "BRASIL"],
    strong: &[
        "PORTUGAL",
        "NETHERLANDS",
        "GERMANY",
        "ITALY",
        "BELGIUM",
        "CROATIA",
        "URUGUAY",
        "COLOMBIA",
        "MOROCCO",
    ],
    weak: &[
        "SAN MARINO",
        "ANDORRA",
        "LIECHTENSTEIN",
        "GIBRALTAR",
        "MALTA",
        "FAROE",
        "GUAM",
        "BAHAMAS",
    ],
    derbies: &[
        ("superclasico_de_las_americas", ARGENTINA, BRAZIL),
        ("concacaf_classic", MEXICO, USA),
        ("old_rivals", ENGLAND, GERMANY),
    ],
    fortresses: &["WEMBLEY", "MARACANA", "AZTECA", "MONUMENTAL"],
    profiles: &[],
    in_form: &["ARGENTINA", "SPAIN"],
    slumping: &["ITALY"],
};
