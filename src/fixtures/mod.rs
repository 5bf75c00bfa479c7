pub mod espn;
pub mod progol;
pub mod provider;

pub use espn::EspnScoreboard;
pub use progol::{load_coupon_file, CouponMatch, QuinielaPosible};
pub use provider::FixtureProvider;

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::warn;

use crate::db::models::Fixture;
use crate::predict::League;

/// Fetch several leagues concurrently. A league whose fetch fails is logged
/// and contributes no fixtures.
pub async fn fetch_leagues(
    provider: Arc<dyn FixtureProvider>,
    leagues: &[League],
    date: Option<NaiveDate>,
) -> Vec<Fixture> {
    let fetches: Vec<_> = leagues
        .iter()
        .map(|&league| {
            let p = Arc::clone(&provider);
            async move { (league, p.fetch_fixtures(league, date).await) }
        })
        .collect();

    let results = futures_util::future::join_all(fetches).await;

    let mut fixtures = Vec::new();
    for (league, result) in results {
        match result {
            Ok(mut f) => fixtures.append(&mut f),
            Err(e) => warn!("Provider '{}' failed for {}: {:#}", provider.name(), league.key(), e),
        }
    }
    fixtures
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;

    struct Canned;

    #[async_trait]
    impl FixtureProvider for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        async fn fetch_fixtures(&self, league: League, _date: Option<NaiveDate>) -> Result<Vec<Fixture>> {
            match league {
                League::Epl => Ok(vec![Fixture::manual(league, "Arsenal", "Luton", None)]),
                League::Mls => anyhow::bail!("down"),
                _ => Ok(vec![]),
            }
        }
    }

    #[tokio::test]
    async fn failed_leagues_are_skipped() {
        let fixtures = fetch_leagues(
            Arc::new(Canned),
            &[League::Epl, League::Mls, League::LaLiga],
            None,
        )
        .await;
        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures[0].home_team, "Arsenal");
    }
}
