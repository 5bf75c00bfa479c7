use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::db::models::Fixture;
use crate::predict::League;

/// Trait that every fixture source must implement.
#[async_trait]
pub trait FixtureProvider: Send + Sync {
    /// Fixtures of one league, for the given day or the provider's "today".
    async fn fetch_fixtures(&self, league: League, date: Option<NaiveDate>) -> Result<Vec<Fixture>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
