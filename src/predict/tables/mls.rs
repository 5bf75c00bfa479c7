use super::LeagueData;

const LA_GALAXY: &[&str] = &["LA GALAXY", "LOS ANGELES GALAXY"];
const LAFC: &[&str] = &["LAFC", "LOS ANGELES FC"];
const SEATTLE: &[&str] = &["SEATTLE"];
const PORTLAND: &[&str] = &["PORTLAND"];
const NYCFC: &[&str] = &["NEW YORK CITY", "NYCFC"];
const RED_BULLS: &[&str] = &["RED BULLS", "NEW YORK RED BULLS"];

pub const DATA: LeagueData = LeagueData {
    elite: &["INTER MIAMI", "LAFC", "LOS ANGELES FC", "COLUMBUS"],
    strong: &["CINCINNATI", "SEATTLE", "LA GALAXY", "ORLANDO", "PHILADELPHIA", "REAL SALT LAKE"],
    weak: &["SAN JOSE", "TORONTO", "COLORADO", "D.C. UNITED", "DC UNITED", "CHICAGO FIRE"],
    derbies: &[
        ("el_trafico", LA_GALAXY, LAFC),
        ("cascadia_cup", SEATTLE, PORTLAND),
        ("hudson_river_derby", NYCFC, RED_BULLS),
    ],
    fortresses: &["LUMEN FIELD", "BMO STADIUM", "PROVIDENCE PARK"],
    profiles: &[],
    in_form: &["INTER MIAMI", "COLUMBUS"],
    slumping: &["TORONTO", "SAN JOSE"],
};
