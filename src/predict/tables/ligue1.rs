use super::{LeagueData, TeamProfile};

const PSG: &[&str] = &["PARIS SAINT", "PARIS SG", "PSG"];
const MARSEILLE: &[&str] = &["MARSEILLE"];
const LYON: &[&str] = &["LYON"];
const SAINT_ETIENNE: &[&str] = &["SAINT-ETIENNE", "SAINT ETIENNE", "ST ETIENNE"];
const LILLE: &[&str] = &["LILLE"];
const LENS: &[&str] = &["LENS"];

pub const DATA: LeagueData = LeagueData {
    elite: &["PARIS SAINT", "PARIS SG", "PSG"],
    strong: &["MONACO", "MARSEILLE", "LILLE", "LYON", "NICE", "LENS"],
    weak: &["CLERMONT", "METZ", "LORIENT", "LE HAVRE", "ANGERS", "AUXERRE"],
    derbies: &[
        ("le_classique", PSG, MARSEILLE),
        ("derby_du_rhone", LYON, SAINT_ETIENNE),
        ("derby_du_nord", LILLE, LENS),
        ("choc_des_olympiques", MARSEILLE, LYON),
    ],
    fortresses: &["PARC DES PRINCES", "VELODROME", "BOLLAERT"],
    profiles: &[
        TeamProfile {
            name: "psg_qatari_dominance",
            needles: PSG,
            win_percentage: 75.0,
            goals_per_game: 2.4,
        },
        TeamProfile {
            name: "marseille_velodrome",
            needles: MARSEILLE,
            win_percentage: 55.3,
            goals_per_game: 1.7,
        },
    ],
    in_form: &["PARIS SAINT", "PSG", "MONACO", "BREST"],
    slumping: &["LYON", "NANTES"],
};
