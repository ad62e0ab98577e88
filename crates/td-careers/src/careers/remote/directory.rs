use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::cache::TtlCache;
use super::nocodb::{FetchError, NocoDbClient};

pub const POSITIONS_TTL: Duration = Duration::from_secs(5 * 60);

/// Open position listed on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub title: String,
    /// Markdown body rendered by the description viewer.
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct PositionRow {
    #[serde(rename = "Id", default)]
    id: serde_json::Value,
    #[serde(default)]
    job_tittle: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<PositionRow> for Position {
    fn from(row: PositionRow) -> Self {
        Self {
            id: record_id(&row.id),
            title: row.job_tittle.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
        }
    }
}

pub(crate) fn record_id(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Cached reader for the jobs table.
#[derive(Debug)]
pub struct PositionDirectory {
    client: NocoDbClient,
    table_id: String,
    cache: TtlCache<Arc<Vec<Position>>>,
}

impl PositionDirectory {
    pub fn new(client: NocoDbClient, table_id: impl Into<String>) -> Self {
        Self::with_cache(client, table_id, TtlCache::new("positions", POSITIONS_TTL))
    }

    pub fn with_cache(
        client: NocoDbClient,
        table_id: impl Into<String>,
        cache: TtlCache<Arc<Vec<Position>>>,
    ) -> Self {
        Self {
            client,
            table_id: table_id.into(),
            cache,
        }
    }

    /// Open positions, served from cache while fresh.
    pub async fn positions(&self) -> Result<Arc<Vec<Position>>, FetchError> {
        self.cache
            .get_or_fetch(move || async move { self.fetch_positions().await.map(Arc::new) })
            .await
    }

    /// Uncached read of the jobs table.
    pub async fn fetch_positions(&self) -> Result<Vec<Position>, FetchError> {
        let page = self
            .client
            .list_records::<PositionRow>(&self.table_id)
            .await?;
        Ok(page.list.into_iter().map(Position::from).collect())
    }
}
