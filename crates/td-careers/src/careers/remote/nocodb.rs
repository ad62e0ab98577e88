use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::config::NocoDbConfig;

const TOKEN_HEADER: &str = "xc-token";

/// Failure reading from the remote tables. Callers recover from it locally.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build records url for table {table}: {source}")]
    Url {
        table: String,
        source: url::ParseError,
    },
    #[error("records request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("records request returned status {status}")]
    Status { status: u16 },
    #[error("records response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// `GET /api/v2/tables/{id}/records` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPage<T> {
    pub list: Vec<T>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub total_rows: Option<u64>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub is_first_page: Option<bool>,
    pub is_last_page: Option<bool>,
}

/// Minimal NocoDB v2 reader shared by the directory and profile clients.
#[derive(Debug, Clone)]
pub struct NocoDbClient {
    http: reqwest::Client,
    base_url: Url,
    api_token: String,
}

impl NocoDbClient {
    pub fn new(base_url: Url, api_token: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self::with_http(http, base_url, api_token)
    }

    pub fn with_http(http: reqwest::Client, base_url: Url, api_token: impl Into<String>) -> Self {
        Self {
            http,
            base_url,
            api_token: api_token.into(),
        }
    }

    pub fn from_config(config: &NocoDbConfig) -> Self {
        Self::new(config.base_url.clone(), config.api_token.clone())
    }

    pub fn records_url(&self, table_id: &str) -> Result<Url, FetchError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(&format!("api/v2/tables/{table_id}/records"))
            .map_err(|source| FetchError::Url {
                table: table_id.to_string(),
                source,
            })
    }

    /// Fetch the first page of records from a table.
    pub async fn list_records<T: DeserializeOwned>(
        &self,
        table_id: &str,
    ) -> Result<RecordPage<T>, FetchError> {
        let url = self.records_url(table_id)?;

        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, self.api_token.as_str())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<RecordPage<T>>()
            .await
            .map_err(FetchError::Decode)
    }
}
