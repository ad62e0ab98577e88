use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::cache::TtlCache;
use super::directory::record_id;
use super::nocodb::{FetchError, NocoDbClient};

pub const PROFILE_TTL: Duration = Duration::from_secs(10 * 60);

/// Company identity shown in the side panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub introduction: String,
    pub website: String,
    pub behance: String,
    pub facebook: String,
    pub artstation: String,
    pub linkedin: String,
}

/// Labelled social link; links with an empty href are not rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub label: &'static str,
    pub href: String,
}

impl CompanyProfile {
    pub fn social_links(&self) -> Vec<SocialLink> {
        [
            ("Behance", &self.behance),
            ("ArtStation", &self.artstation),
            ("Facebook", &self.facebook),
            ("LinkedIn", &self.linkedin),
        ]
        .into_iter()
        .filter(|(_, href)| !href.trim().is_empty())
        .map(|(label, href)| SocialLink {
            label,
            href: href.clone(),
        })
        .collect()
    }

    /// Website without its scheme, as printed next to the link.
    pub fn website_label(&self) -> &str {
        self.website
            .strip_prefix("https://")
            .or_else(|| self.website.strip_prefix("http://"))
            .unwrap_or(&self.website)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CompanyRow {
    #[serde(rename = "Id")]
    id: serde_json::Value,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Phone")]
    phone: Option<String>,
    #[serde(rename = "Email")]
    email: Option<String>,
    #[serde(rename = "Address")]
    address: Option<String>,
    #[serde(rename = "Introduce")]
    introduce: Option<String>,
    #[serde(rename = "Website")]
    website: Option<String>,
    #[serde(rename = "Behance")]
    behance: Option<String>,
    #[serde(rename = "Facebook")]
    facebook: Option<String>,
    #[serde(rename = "Artstation")]
    artstation: Option<String>,
    #[serde(rename = "Linkedin")]
    linkedin: Option<String>,
    #[serde(rename = "LinkedIn")]
    linked_in: Option<String>,
}

impl From<CompanyRow> for CompanyProfile {
    fn from(row: CompanyRow) -> Self {
        let linkedin = row
            .linkedin
            .filter(|value| !value.is_empty())
            .or(row.linked_in)
            .unwrap_or_default();

        Self {
            id: record_id(&row.id),
            name: row.name.unwrap_or_default(),
            phone: row.phone.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            address: row.address.unwrap_or_default(),
            introduction: row.introduce.unwrap_or_default(),
            website: row.website.unwrap_or_default(),
            behance: row.behance.unwrap_or_default(),
            facebook: row.facebook.unwrap_or_default(),
            artstation: row.artstation.unwrap_or_default(),
            linkedin,
        }
    }
}

/// Cached reader for the company-info table. Only the first record is used.
#[derive(Debug)]
pub struct CompanyProfileSource {
    client: NocoDbClient,
    table_id: String,
    cache: TtlCache<Option<Arc<CompanyProfile>>>,
}

impl CompanyProfileSource {
    pub fn new(client: NocoDbClient, table_id: impl Into<String>) -> Self {
        Self::with_cache(client, table_id, TtlCache::new("company-profile", PROFILE_TTL))
    }

    pub fn with_cache(
        client: NocoDbClient,
        table_id: impl Into<String>,
        cache: TtlCache<Option<Arc<CompanyProfile>>>,
    ) -> Self {
        Self {
            client,
            table_id: table_id.into(),
            cache,
        }
    }

    pub async fn profile(&self) -> Result<Option<Arc<CompanyProfile>>, FetchError> {
        self.cache
            .get_or_fetch(move || async move {
                self.fetch_company_profile()
                    .await
                    .map(|profile| profile.map(Arc::new))
            })
            .await
    }

    /// Uncached read; `None` when the table has no rows.
    pub async fn fetch_company_profile(&self) -> Result<Option<CompanyProfile>, FetchError> {
        let page = self
            .client
            .list_records::<CompanyRow>(&self.table_id)
            .await?;
        Ok(page.list.into_iter().next().map(CompanyProfile::from))
    }
}
