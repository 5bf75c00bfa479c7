use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::db::models::{Fixture, GameStatus};
use crate::error::FetchError;
use crate::predict::League;

use super::provider::FixtureProvider;

pub const DEFAULT_BASE_URL: &str = "https://site.api.espn.com/apis/site/v2/sports/soccer";

const SOURCE: &str = "ESPN";

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct Scoreboard {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
struct Event {
    id: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    competitions: Vec<Competition>,
    #[serde(default)]
    status: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct Competition {
    #[serde(default)]
    competitors: Vec<Competitor>,
    #[serde(default)]
    venue: Option<Venue>,
    #[serde(default)]
    status: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct Competitor {
    #[serde(rename = "homeAway", default)]
    home_away: String,
    #[serde(default)]
    team: Option<Team>,
    #[serde(default)]
    score: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Team {
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Venue {
    #[serde(rename = "fullName", default)]
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(rename = "type", default)]
    status_type: Option<StatusType>,
}

#[derive(Debug, Default, Deserialize)]
struct StatusType {
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    completed: bool,
}

// ── Provider ──────────────────────────────────────────────────────────────────

/// Fixture provider backed by ESPN's public soccer scoreboard.
pub struct EspnScoreboard {
    http: Client,
    /// Base URL for overriding in tests
    base_url: String,
}

impl EspnScoreboard {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(EspnScoreboard {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn scoreboard_url(&self, espn_id: &str, date: Option<NaiveDate>) -> Result<Url, FetchError> {
        let mut url = Url::parse(&format!("{}/{}/scoreboard", self.base_url, espn_id)).map_err(
            |e| FetchError::Request {
                source_name: SOURCE.into(),
                reason: format!("bad url: {}", e),
            },
        )?;
        if let Some(d) = date {
            url.query_pairs_mut()
                .append_pair("dates", &d.format("%Y%m%d").to_string());
        }
        Ok(url)
    }

    async fn fetch_candidate(
        &self,
        league: League,
        espn_id: &str,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Fixture>, FetchError> {
        let url = self.scoreboard_url(espn_id, date)?;
        debug!("Fetching scoreboard from {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                source_name: SOURCE.into(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                source_name: SOURCE.into(),
                status: resp.status().as_u16(),
            });
        }

        let raw: serde_json::Value = resp.json().await.map_err(|e| FetchError::Malformed {
            source_name: SOURCE.into(),
            reason: e.to_string(),
        })?;
        parse_scoreboard(&raw, league)
    }
}

#[async_trait]
impl FixtureProvider for EspnScoreboard {
    fn name(&self) -> &str {
        SOURCE
    }

    async fn fetch_fixtures(&self, league: League, date: Option<NaiveDate>) -> Result<Vec<Fixture>> {
        let mut last_err: Option<FetchError> = None;
        let mut answered = false;

        for espn_id in league.espn_ids() {
            match self.fetch_candidate(league, espn_id, date).await {
                Ok(fixtures) if !fixtures.is_empty() => {
                    info!(
                        "{}: {} fixture(s) from ESPN '{}'",
                        league.key(),
                        fixtures.len(),
                        espn_id
                    );
                    return Ok(fixtures);
                }
                Ok(_) => {
                    debug!("{}: ESPN '{}' returned no events", league.key(), espn_id);
                    answered = true;
                }
                Err(e) => {
                    warn!("{}: ESPN '{}' failed: {}", league.key(), espn_id, e);
                    last_err = Some(e);
                }
            }
        }

        match last_err {
            Some(last) if !answered => Err(FetchError::AllCandidatesFailed {
                league: league.key().to_string(),
                last: Box::new(last),
            }
            .into()),
            _ => Ok(vec![]),
        }
    }
}

// ── Parsing helpers ────────────────────────────────────────────────────────────

/// Turn a raw ESPN scoreboard document into fixtures. Events without both
/// teams are dropped.
pub fn parse_scoreboard(raw: &serde_json::Value, league: League) -> Result<Vec<Fixture>, FetchError> {
    if !raw.is_object() {
        return Err(FetchError::Malformed {
            source_name: SOURCE.into(),
            reason: "scoreboard is not a JSON object".into(),
        });
    }
    let board: Scoreboard =
        serde_json::from_value(raw.clone()).map_err(|e| FetchError::Malformed {
            source_name: SOURCE.into(),
            reason: e.to_string(),
        })?;

    Ok(board
        .events
        .iter()
        .filter_map(|ev| parse_event(ev, league))
        .collect())
}

fn parse_event(ev: &Event, league: League) -> Option<Fixture> {
    let comp = ev.competitions.first()?;

    let mut home: Option<(&str, Option<i32>)> = None;
    let mut away: Option<(&str, Option<i32>)> = None;
    for c in &comp.competitors {
        let name = c.team.as_ref()?.display_name.as_deref()?;
        let score = c.score.as_deref().and_then(|s| s.trim().parse().ok());
        match c.home_away.as_str() {
            "home" => home = Some((name, score)),
            "away" => away = Some((name, score)),
            _ => {}
        }
    }
    let (home_team, home_score) = home?;
    let (away_team, away_score) = away?;

    let status_type = ev
        .status
        .as_ref()
        .or(comp.status.as_ref())
        .and_then(|s| s.status_type.as_ref());
    let status = status_type.map(status_from_espn).unwrap_or(GameStatus::Scheduled);

    // ESPN reports "0" for games that have not kicked off.
    let (home_score, away_score) = match status {
        GameStatus::Scheduled | GameStatus::Postponed => (None, None),
        _ => (home_score, away_score),
    };

    Some(Fixture {
        event_id: ev.id.clone(),
        league,
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        venue: comp.venue.as_ref().and_then(|v| v.full_name.clone()),
        kickoff: ev.date.as_deref().and_then(parse_espn_date),
        home_score,
        away_score,
        status,
    })
}

fn status_from_espn(t: &StatusType) -> GameStatus {
    let name = t.name.as_deref().unwrap_or("").to_uppercase();
    if name.contains("POSTPONED") || name.contains("CANCELED") {
        return GameStatus::Postponed;
    }
    if t.completed {
        return GameStatus::Finished;
    }
    match t.state.as_deref().unwrap_or("pre") {
        "in" if name.contains("HALFTIME") => GameStatus::HalfTime,
        "in" => GameStatus::InProgress,
        "post" => GameStatus::Finished,
        _ => GameStatus::Scheduled,
    }
}

/// ESPN dates come as "2024-08-17T14:00Z" (no seconds) or full RFC 3339.
fn parse_espn_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%MZ")
                .ok()
                .map(|n| n.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn sample() -> serde_json::Value {
        serde_json::json!({
            "events": [
                {
                    "id": "401",
                    "date": "2024-08-17T14:00Z",
                    "status": {"type": {"state": "pre", "name": "STATUS_SCHEDULED", "completed": false}},
                    "competitions": [{
                        "venue": {"fullName": "Allianz Arena"},
                        "competitors": [
                            {"homeAway": "home", "score": "0", "team": {"displayName": "Bayern Munich"}},
                            {"homeAway": "away", "score": "0", "team": {"displayName": "Heidenheim"}}
                        ]
                    }]
                },
                {
                    "id": "402",
                    "date": "2024-08-17T16:30:00Z",
                    "competitions": [{
                        "status": {"type": {"state": "in", "name": "STATUS_HALFTIME", "completed": false}},
                        "competitors": [
                            {"homeAway": "home", "score": "1", "team": {"displayName": "Dortmund"}},
                            {"homeAway": "away", "score": "2", "team": {"displayName": "Leipzig"}}
                        ]
                    }]
                },
                {
                    "id": "403",
                    "competitions": [{
                        "competitors": [
                            {"homeAway": "home", "team": {"displayName": "Lonely FC"}}
                        ]
                    }]
                }
            ]
        })
    }

    #[test]
    fn parses_events_and_drops_incomplete_ones() {
        let fixtures = parse_scoreboard(&sample(), League::Bundesliga).unwrap();
        assert_eq!(fixtures.len(), 2);

        let first = &fixtures[0];
        assert_eq!(first.event_id, "401");
        assert_eq!(first.home_team, "Bayern Munich");
        assert_eq!(first.venue.as_deref(), Some("Allianz Arena"));
        assert_eq!(first.status, GameStatus::Scheduled);
        assert_eq!(first.home_score, None);
        let kickoff = first.kickoff.unwrap();
        assert_eq!((kickoff.month(), kickoff.day(), kickoff.hour()), (8, 17, 14));

        let second = &fixtures[1];
        assert_eq!(second.status, GameStatus::HalfTime);
        assert_eq!((second.home_score, second.away_score), (Some(1), Some(2)));
        assert!(second.kickoff.is_some());
    }

    #[test]
    fn missing_events_is_empty_not_an_error() {
        let fixtures = parse_scoreboard(&serde_json::json!({}), League::Epl).unwrap();
        assert!(fixtures.is_empty());
    }

    #[test]
    fn non_object_is_malformed() {
        let err = parse_scoreboard(&serde_json::json!([1, 2]), League::Epl).unwrap_err();
        assert!(matches!(err, FetchError::Malformed { .. }));
    }

    #[test]
    fn status_mapping() {
        let st = |state: &str, name: &str, completed: bool| StatusType {
            state: Some(state.into()),
            name: Some(name.into()),
            completed,
        };
        assert_eq!(status_from_espn(&st("pre", "STATUS_SCHEDULED", false)), GameStatus::Scheduled);
        assert_eq!(status_from_espn(&st("in", "STATUS_FIRST_HALF", false)), GameStatus::InProgress);
        assert_eq!(status_from_espn(&st("in", "STATUS_HALFTIME", false)), GameStatus::HalfTime);
        assert_eq!(status_from_espn(&st("post", "STATUS_FULL_TIME", true)), GameStatus::Finished);
        assert_eq!(status_from_espn(&st("post", "STATUS_FINAL", false)), GameStatus::Finished);
        assert_eq!(status_from_espn(&st("pre", "STATUS_POSTPONED", false)), GameStatus::Postponed);
        assert_eq!(status_from_espn(&st("post", "STATUS_CANCELED", true)), GameStatus::Postponed);
    }

    #[test]
    fn date_query_is_appended() {
        let espn = EspnScoreboard::new("http://localhost/soccer/", Duration::from_secs(1)).unwrap();
        let url = espn
            .scoreboard_url("bra.1", NaiveDate::from_ymd_opt(2024, 5, 4))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost/soccer/bra.1/scoreboard?dates=20240504");
        let url = espn.scoreboard_url("bra.1", None).unwrap();
        assert_eq!(url.query(), None);
    }

    /// Minimal HTTP/1.1 stub: answers each path from `routes`, 404 otherwise.
    async fn serve(routes: Vec<(&'static str, u16, String)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut sock, _)) = listener.accept().await else {
                    return;
                };
                let routes = routes.clone();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let n = sock.read(&mut buf).await.unwrap_or(0);
                    let req = String::from_utf8_lossy(&buf[..n]);
                    let path = req.split_whitespace().nth(1).unwrap_or("/").to_string();
                    let path = path.split('?').next().unwrap_or("/");
                    let (status, body) = routes
                        .iter()
                        .find(|(p, _, _)| *p == path)
                        .map(|(_, s, b)| (*s, b.clone()))
                        .unwrap_or((404, String::new()));
                    let resp = format!(
                        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = sock.write_all(resp.as_bytes()).await;
                    let _ = sock.shutdown().await;
                });
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn falls_back_to_next_candidate_id() {
        let base = serve(vec![
            ("/bra.1/scoreboard", 500, String::new()),
            ("/bra.serie_a/scoreboard", 200, sample().to_string()),
        ])
        .await;
        let espn = EspnScoreboard::new(&base, Duration::from_secs(5)).unwrap();
        let fixtures = espn.fetch_fixtures(League::Brasileirao, None).await.unwrap();
        assert_eq!(fixtures.len(), 2);
        assert!(fixtures.iter().all(|f| f.league == League::Brasileirao));
    }

    #[tokio::test]
    async fn empty_candidates_give_no_fixtures() {
        let empty = serde_json::json!({"events": []}).to_string();
        let base = serve(vec![
            ("/usa.1/scoreboard", 200, empty.clone()),
            ("/mls/scoreboard", 503, String::new()),
        ])
        .await;
        let espn = EspnScoreboard::new(&base, Duration::from_secs(5)).unwrap();
        let fixtures = espn.fetch_fixtures(League::Mls, None).await.unwrap();
        assert!(fixtures.is_empty());
    }

    #[tokio::test]
    async fn every_candidate_failing_is_an_error() {
        let base = serve(vec![]).await;
        let espn = EspnScoreboard::new(&base, Duration::from_secs(5)).unwrap();
        let err = espn
            .fetch_fixtures(League::ChampionsLeague, None)
            .await
            .unwrap_err();
        match err.downcast_ref::<FetchError>() {
            Some(FetchError::AllCandidatesFailed { league, last }) => {
                assert_eq!(league, "ucl");
                assert!(matches!(**last, FetchError::Status { status: 404, .. }));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
