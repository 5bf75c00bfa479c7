use thiserror::Error;

/// Failures of a single predictor stage. The fallback chain logs these and
/// moves on to the next stage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictError {
    #[error("{0} team name is empty")]
    MissingTeam(&'static str),

    #[error("home and away are the same team: {0}")]
    SameTeam(String),

    #[error("no rule in {0} matched this fixture")]
    NoSignal(String),

    #[error("no hybrid rule table for {0}")]
    NoHybridTable(&'static str),

    #[error("unknown league '{0}'")]
    UnknownLeague(String),
}

/// Failures fetching fixtures or coupons from an upstream source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{source_name} request failed: {reason}")]
    Request { source_name: String, reason: String },

    #[error("{source_name} returned HTTP {status}")]
    Status { source_name: String, status: u16 },

    #[error("{source_name} returned malformed data: {reason}")]
    Malformed { source_name: String, reason: String },

    #[error("every candidate id for {league} failed (last: {last})")]
    AllCandidatesFailed { league: String, last: Box<FetchError> },
}
